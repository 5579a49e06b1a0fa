use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog;
use crate::domain::{AlbumSummary, Collection, CollectionId, EntryId};
use crate::errors::CoreError;
use crate::genres::{self, GenreBucket};
use crate::ports::{CatalogError, CatalogSearch, CollectionStore, ViewReporter};
use crate::services::rank_store::{PendingSync, RankStore};

/// Sub-mode of a loaded screen. Toggling it never touches data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadyMode {
  Viewing,
  /// Drag interactions are enabled; only in this mode is `reorder` accepted.
  Reordering,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
  Idle,
  Loading,
  Ready(ReadyMode),
  /// Terminal until `retry`.
  Failed(String),
}

/// What to do with the optimistic local state when a reorder or removal fails remotely.
///
/// The failure is always reported to the caller; this only decides what stays on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncFailurePolicy {
  /// Keep showing the local order even though the remote store did not accept it.
  KeepLocal,
  /// Re-fetch the authoritative collection and show that.
  #[default]
  Refetch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
  /// Results were applied as the current candidates.
  Applied(Vec<AlbumSummary>),
  /// A newer search was issued while this one was in flight; its results were dropped.
  Discarded,
  /// Blank query, nothing was requested.
  Skipped,
}

/// Point-in-time copy of what the screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSnapshot {
  pub state: ScreenState,
  pub collection: Option<Collection>,
  pub candidates: Vec<AlbumSummary>,
}

struct ScreenInner {
  state: ScreenState,
  collection: Option<Collection>,
  candidates: Vec<AlbumSummary>,
}

/// One collection screen: search, pick, add, reorder, remove, and the genre distribution.
///
/// Methods take `&self` so several searches can be awaited concurrently from one task. The
/// screen state is only locked for short, synchronous sections; add/reorder/remove are serialized
/// by a gate and a second mutation issued while one is in flight is rejected with
/// [`CoreError::MutationInFlight`].
pub struct CollectionScreen<C, S, R>
where
  C: CatalogSearch,
  S: CollectionStore,
  R: ViewReporter,
{
  collection_id: CollectionId,
  catalog: C,
  ranks: RankStore<S>,
  reporter: R,
  policy: SyncFailurePolicy,
  inner: Mutex<ScreenInner>,
  search_token: AtomicU64,
  mutation_gate: tokio::sync::Mutex<()>,
}

impl<C, S, R> CollectionScreen<C, S, R>
where
  C: CatalogSearch,
  S: CollectionStore,
  R: ViewReporter,
{
  pub fn new(collection_id: CollectionId, catalog: C, ranks: RankStore<S>, reporter: R) -> Self {
    Self {
      collection_id,
      catalog,
      ranks,
      reporter,
      policy: SyncFailurePolicy::default(),
      inner: Mutex::new(ScreenInner { state: ScreenState::Idle, collection: None, candidates: Vec::new() }),
      search_token: AtomicU64::new(0),
      mutation_gate: tokio::sync::Mutex::new(()),
    }
  }

  pub fn with_sync_failure_policy(mut self, policy: SyncFailurePolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn collection_id(&self) -> &CollectionId {
    &self.collection_id
  }

  pub fn snapshot(&self) -> Result<ScreenSnapshot, CoreError> {
    let inner = self.lock()?;
    Ok(ScreenSnapshot {
      state: inner.state.clone(),
      collection: inner.collection.clone(),
      candidates: inner.candidates.clone(),
    })
  }

  /// Genre distribution of the collection currently on screen.
  pub fn genres(&self) -> Result<Vec<GenreBucket>, CoreError> {
    let inner = self.lock()?;
    let entries = inner.collection.as_ref().map(|c| c.entries.as_slice()).unwrap_or_default();
    Ok(genres::distribution(entries))
  }

  // -------- lifecycle --------

  /// `Idle → Loading → Ready(Viewing) | Failed`.
  pub async fn mount(&self) -> Result<(), CoreError> {
    self.load(|s| matches!(s, ScreenState::Idle), "mount").await
  }

  /// Manual retry after a failed load: `Failed → Loading → ...`.
  pub async fn retry(&self) -> Result<(), CoreError> {
    self.load(|s| matches!(s, ScreenState::Failed(_)), "retry").await
  }

  /// Switches between `Viewing` and `Reordering`.
  pub async fn toggle_reordering(&self) -> Result<ReadyMode, CoreError> {
    let mode = {
      let mut inner = self.lock()?;
      let mode = match inner.state {
        ScreenState::Ready(ReadyMode::Viewing) => ReadyMode::Reordering,
        ScreenState::Ready(ReadyMode::Reordering) => ReadyMode::Viewing,
        ref other => return Err(CoreError::InvalidState(format!("cannot toggle reordering while {other:?}"))),
      };
      inner.state = ScreenState::Ready(mode);
      mode
    };

    self.reporter.state_changed(&ScreenState::Ready(mode)).await;
    Ok(mode)
  }

  async fn load(&self, allowed: impl Fn(&ScreenState) -> bool, action: &str) -> Result<(), CoreError> {
    {
      let mut inner = self.lock()?;
      if !allowed(&inner.state) {
        return Err(CoreError::InvalidState(format!("cannot {action} while {:?}", inner.state)));
      }
      inner.state = ScreenState::Loading;
    }
    self.reporter.state_changed(&ScreenState::Loading).await;

    match self.ranks.load(&self.collection_id).await {
      Ok(collection) => {
        let ready = ScreenState::Ready(ReadyMode::Viewing);
        self.lock()?.state = ready.clone();
        self.reporter.state_changed(&ready).await;
        self.publish(collection).await
      }
      Err(err) => {
        warn!(collection = %self.collection_id, error = %err, "collection load failed");
        let failed = ScreenState::Failed(err.to_string());
        self.lock()?.state = failed.clone();
        self.reporter.state_changed(&failed).await;
        self.reporter.error(&err).await;
        Err(err)
      }
    }
  }

  // -------- search --------

  /// Searches the catalog and, unless a newer search was issued meanwhile, replaces the
  /// candidates with the normalized results.
  pub async fn search(&self, query: &str) -> Result<SearchOutcome, CoreError> {
    let query = query.trim();
    if query.is_empty() {
      // A cleared box supersedes whatever is still in flight.
      self.search_token.fetch_add(1, Ordering::SeqCst);
      return Ok(SearchOutcome::Skipped);
    }

    let token = self.search_token.fetch_add(1, Ordering::SeqCst) + 1;
    debug!(query, token, "catalog search issued");

    let result = match self.catalog.search(query).await {
      Ok(raw) => catalog::normalize(&raw.tracks.items),
      Err(e) => Err(map_catalog_error(e)),
    };

    // Token check and candidate write happen under the same lock so a newer response cannot
    // slip in between them.
    let latest = {
      let mut inner = self.lock()?;
      let latest = self.ensure_latest_search(token, query);
      if let (Ok(()), Ok(albums)) = (&latest, &result) {
        inner.candidates = albums.clone();
      }
      latest
    };

    if let Err(stale) = latest {
      debug!(reason = %stale, "search response dropped");
      return Ok(SearchOutcome::Discarded);
    }

    match result {
      Ok(albums) => {
        self.reporter.candidates_changed(&albums).await;
        Ok(SearchOutcome::Applied(albums))
      }
      Err(err) => {
        self.reporter.error(&err).await;
        Err(err)
      }
    }
  }

  fn ensure_latest_search(&self, token: u64, query: &str) -> Result<(), CoreError> {
    if self.search_token.load(Ordering::SeqCst) == token {
      Ok(())
    } else {
      Err(CoreError::StaleResponseDiscarded { query: query.to_string() })
    }
  }

  // -------- mutations --------

  /// Adds a search candidate by its position in the current candidate list.
  pub async fn add_candidate(&self, index: usize) -> Result<Collection, CoreError> {
    let album = {
      let inner = self.lock()?;
      let len = inner.candidates.len();
      inner.candidates.get(index).cloned().ok_or(CoreError::IndexOutOfRange { index, len })?
    };
    self.add_album(album).await
  }

  /// Attaches `album` to the collection. Nothing changes on screen until the remote store
  /// confirms; on success the candidates are cleared.
  pub async fn add_album(&self, album: AlbumSummary) -> Result<Collection, CoreError> {
    let _gate = self.begin_mutation()?;
    let current = self.current_collection(false)?;

    match self.ranks.add_entry(&current, album).await {
      Ok(next) => {
        self.publish(next.clone()).await?;
        {
          let mut inner = self.lock()?;
          // Searches still in flight belong to the candidate list being cleared.
          self.search_token.fetch_add(1, Ordering::SeqCst);
          inner.candidates.clear();
        }
        self.reporter.candidates_changed(&[]).await;
        Ok(next)
      }
      Err(err) => {
        self.reporter.error(&err).await;
        Err(err)
      }
    }
  }

  /// Moves an entry (splice semantics). Only accepted in `Reordering` mode.
  ///
  /// The new order is shown before the remote call resolves. If the remote store rejects it the
  /// error is returned and [`SyncFailurePolicy`] decides what stays on screen.
  pub async fn reorder(&self, from: usize, to: usize) -> Result<Collection, CoreError> {
    let _gate = self.begin_mutation()?;
    let current = self.current_collection(true)?;

    let pending = self.ranks.reorder(&current, from, to)?;
    self.settle(pending, from != to).await
  }

  /// Removes an entry, shown immediately; a remote failure is returned like in `reorder`.
  pub async fn remove(&self, entry_id: &EntryId) -> Result<Collection, CoreError> {
    let _gate = self.begin_mutation()?;
    let current = self.current_collection(false)?;

    let pending = self.ranks.remove_entry(&current, entry_id)?;
    self.settle(pending, true).await
  }

  /// Shows the optimistic collection (when `changed`), then waits for the remote store.
  async fn settle(&self, pending: PendingSync<'_, S>, changed: bool) -> Result<Collection, CoreError> {
    if changed {
      self.publish(pending.collection().clone()).await?;
    }

    match pending.confirm().await {
      Ok(next) => Ok(next),
      Err(failure) => Err(self.sync_failed(failure.error).await),
    }
  }

  fn begin_mutation(&self) -> Result<tokio::sync::MutexGuard<'_, ()>, CoreError> {
    self.mutation_gate.try_lock().map_err(|_| CoreError::MutationInFlight(self.collection_id.clone()))
  }

  fn current_collection(&self, require_reordering: bool) -> Result<Collection, CoreError> {
    let inner = self.lock()?;
    match (&inner.state, require_reordering) {
      (ScreenState::Ready(ReadyMode::Reordering), _) | (ScreenState::Ready(ReadyMode::Viewing), false) => {}
      (ScreenState::Ready(ReadyMode::Viewing), true) => {
        return Err(CoreError::InvalidState("reordering is not enabled".into()));
      }
      (other, _) => return Err(CoreError::InvalidState(format!("collection not ready ({other:?})"))),
    }

    inner.collection.clone().ok_or_else(|| CoreError::Internal("ready screen without a collection".into()))
  }

  async fn sync_failed(&self, err: CoreError) -> CoreError {
    warn!(collection = %self.collection_id, error = %err, policy = ?self.policy, "remote sync failed");
    self.reporter.error(&err).await;

    if self.policy == SyncFailurePolicy::Refetch {
      match self.ranks.load(&self.collection_id).await {
        Ok(authoritative) => {
          if let Err(e) = self.publish(authoritative).await {
            warn!(error = %e, "could not publish reconciled collection");
          }
        }
        Err(e) => warn!(error = %e, "could not reconcile collection after failed sync"),
      }
    }

    err
  }

  /// Stores `collection` as the screen's collection and pushes it with a fresh distribution.
  async fn publish(&self, collection: Collection) -> Result<(), CoreError> {
    let distribution = genres::distribution(&collection.entries);
    self.lock()?.collection = Some(collection.clone());
    self.reporter.collection_changed(&collection, &distribution).await;
    Ok(())
  }

  fn lock(&self) -> Result<MutexGuard<'_, ScreenInner>, CoreError> {
    self.inner.lock().map_err(|_| CoreError::Internal("screen state mutex poisoned".into()))
  }
}

fn map_catalog_error(err: CatalogError) -> CoreError {
  match err {
    CatalogError::InvalidResponse(msg) => CoreError::InvalidCatalogResponse(msg),
    other => CoreError::SearchFailed(other.to_string()),
  }
}
