//! In-memory port implementations for service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::catalog::{RawAlbum, RawArtist, RawSearchResponse, RawTrack, RawTrackPage};
use crate::domain::{
  AlbumSummary, CatalogAlbumId, Collection, CollectionEntry, CollectionId, EntryId, ListenLog, LogId,
  NewListenLog, RankUpdate,
};
use crate::errors::CoreError;
use crate::genres::GenreBucket;
use crate::ports::{
  CatalogError, CatalogSearch, CollectionStore, FavoritesStore, ListenLogStore, StoreError, ViewReporter,
};
use crate::services::collection_screen::ScreenState;

pub fn album(id: &str) -> AlbumSummary {
  AlbumSummary {
    id: CatalogAlbumId::new(id),
    name: format!("Album {id}"),
    artist_name: "Artist".into(),
    image_url: None,
    release_date: "2001-01-01".into(),
    external_url: None,
    genres: vec![],
  }
}

pub fn raw_page(album_ids: &[&str]) -> RawSearchResponse {
  let items = album_ids
    .iter()
    .map(|id| RawTrack {
      album: Some(RawAlbum {
        id: Some(id.to_string()),
        name: Some(format!("Album {id}")),
        artists: vec![RawArtist { name: Some("Artist".into()) }],
        release_date: Some("1999".into()),
        ..RawAlbum::default()
      }),
    })
    .collect();

  RawSearchResponse { tracks: RawTrackPage { items } }
}

fn rejected() -> StoreError {
  StoreError::Rejected { status: 500, message: "injected failure".into() }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryCollections {
  collections: Mutex<HashMap<CollectionId, Collection>>,
  rank_updates: Mutex<Vec<Vec<RankUpdate>>>,
  rank_hold: Mutex<Option<oneshot::Receiver<()>>>,
  fail_reads: AtomicBool,
  fail_writes: AtomicBool,
}

#[derive(Clone, Default)]
pub struct MemoryCollectionStore {
  inner: Arc<MemoryCollections>,
}

impl MemoryCollectionStore {
  /// Inserts a collection with `n` entries (`e1..en`, albums `a1..an`).
  pub fn seed(&self, id: &str, n: usize) -> CollectionId {
    let id = CollectionId::new(id);
    let entries = (1..=n)
      .map(|i| CollectionEntry {
        entry_id: EntryId::new(format!("e{i}")),
        album: album(&format!("a{i}")),
        rank: i as u32,
      })
      .collect();

    let collection = Collection { id: id.clone(), title: "Seeded".into(), description: String::new(), entries };
    self.inner.collections.lock().unwrap().insert(id.clone(), collection);
    id
  }

  pub fn snapshot(&self, id: &CollectionId) -> Option<Collection> {
    self.inner.collections.lock().unwrap().get(id).cloned()
  }

  pub fn fail_reads(&self, fail: bool) {
    self.inner.fail_reads.store(fail, Ordering::SeqCst);
  }

  pub fn fail_writes(&self, fail: bool) {
    self.inner.fail_writes.store(fail, Ordering::SeqCst);
  }

  pub fn last_rank_update(&self) -> Option<Vec<RankUpdate>> {
    self.inner.rank_updates.lock().unwrap().last().cloned()
  }

  /// Makes the next `update_ranks` call wait until the returned sender fires.
  pub fn hold_rank_updates(&self) -> oneshot::Sender<()> {
    let (tx, rx) = oneshot::channel();
    *self.inner.rank_hold.lock().unwrap() = Some(rx);
    tx
  }

  fn check_write(&self) -> Result<(), StoreError> {
    if self.inner.fail_writes.load(Ordering::SeqCst) { Err(rejected()) } else { Ok(()) }
  }

  fn with_collection<T>(
    &self,
    id: &CollectionId,
    f: impl FnOnce(&mut Collection) -> T,
  ) -> Result<T, StoreError> {
    let mut collections = self.inner.collections.lock().unwrap();
    collections.get_mut(id).map(f).ok_or(StoreError::NotFound)
  }
}

#[async_trait]
impl CollectionStore for MemoryCollectionStore {
  async fn fetch(&self, id: &CollectionId) -> Result<Collection, StoreError> {
    if self.inner.fail_reads.load(Ordering::SeqCst) {
      return Err(StoreError::Transport("connection refused".into()));
    }
    self.snapshot(id).ok_or(StoreError::NotFound)
  }

  async fn create(&self, title: &str, description: &str) -> Result<Collection, StoreError> {
    self.check_write()?;
    let collection = Collection::empty(CollectionId::new(Uuid::new_v4().to_string()), title, description);
    self.inner.collections.lock().unwrap().insert(collection.id.clone(), collection.clone());
    Ok(collection)
  }

  async fn attach_album(&self, id: &CollectionId, album: &AlbumSummary) -> Result<(), StoreError> {
    self.check_write()?;
    self.with_collection(id, |c| {
      let rank = c.entries.len() as u32 + 1;
      c.entries.push(CollectionEntry { entry_id: EntryId::new(Uuid::new_v4().to_string()), album: album.clone(), rank });
    })
  }

  async fn update_ranks(&self, id: &CollectionId, ranks: &[RankUpdate]) -> Result<(), StoreError> {
    let hold = self.inner.rank_hold.lock().unwrap().take();
    if let Some(rx) = hold {
      let _ = rx.await;
    }

    self.check_write()?;
    self.inner.rank_updates.lock().unwrap().push(ranks.to_vec());
    self.with_collection(id, |c| {
      for update in ranks {
        if let Some(entry) = c.entries.iter_mut().find(|e| e.entry_id == update.id) {
          entry.rank = update.rank;
        }
      }
      c.entries.sort_by_key(|e| e.rank);
    })
  }

  async fn delete_entry(&self, id: &CollectionId, entry_id: &EntryId) -> Result<(), StoreError> {
    self.check_write()?;
    self.with_collection(id, |c| {
      c.entries.retain(|e| &e.entry_id != entry_id);
      for (i, e) in c.entries.iter_mut().enumerate() {
        e.rank = i as u32 + 1;
      }
    })
  }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Answers every query with the same page.
pub struct StaticCatalog {
  pub page: RawSearchResponse,
}

#[async_trait]
impl CatalogSearch for StaticCatalog {
  async fn search(&self, _query: &str) -> Result<RawSearchResponse, CatalogError> {
    Ok(self.page.clone())
  }
}

/// Holds each query's response until the test releases it.
#[derive(Default)]
pub struct GatedCatalog {
  gates: Mutex<HashMap<String, oneshot::Receiver<RawSearchResponse>>>,
}

impl GatedCatalog {
  pub fn gate(&self, query: &str) -> oneshot::Sender<RawSearchResponse> {
    let (tx, rx) = oneshot::channel();
    self.gates.lock().unwrap().insert(query.to_string(), rx);
    tx
  }
}

#[async_trait]
impl CatalogSearch for GatedCatalog {
  async fn search(&self, query: &str) -> Result<RawSearchResponse, CatalogError> {
    let rx = self.gates.lock().unwrap().remove(query);
    match rx {
      Some(rx) => rx.await.map_err(|_| CatalogError::Transport("gate dropped".into())),
      None => Err(CatalogError::Transport(format!("no gate for {query}"))),
    }
  }
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
  State(ScreenState),
  Collection(Vec<EntryId>, Vec<GenreBucket>),
  Candidates(Vec<CatalogAlbumId>),
  Error(String),
}

#[derive(Clone, Default)]
pub struct RecordingReporter {
  events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl RecordingReporter {
  pub fn events(&self) -> Vec<ViewEvent> {
    self.events.lock().unwrap().clone()
  }

  pub fn errors(&self) -> usize {
    self.events().iter().filter(|e| matches!(e, ViewEvent::Error(_))).count()
  }

  fn push(&self, event: ViewEvent) {
    self.events.lock().unwrap().push(event);
  }
}

#[async_trait]
impl ViewReporter for RecordingReporter {
  async fn state_changed(&self, state: &ScreenState) {
    self.push(ViewEvent::State(state.clone()));
  }

  async fn collection_changed(&self, collection: &Collection, genres: &[GenreBucket]) {
    let ids = collection.entries.iter().map(|e| e.entry_id.clone()).collect();
    self.push(ViewEvent::Collection(ids, genres.to_vec()));
  }

  async fn candidates_changed(&self, candidates: &[AlbumSummary]) {
    self.push(ViewEvent::Candidates(candidates.iter().map(|a| a.id.clone()).collect()));
  }

  async fn error(&self, error: &CoreError) {
    self.push(ViewEvent::Error(error.to_string()));
  }
}

// ---------------------------------------------------------------------------
// Favorites & listen logs
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MemoryFavoritesStore {
  albums: Arc<Mutex<Vec<AlbumSummary>>>,
}

impl MemoryFavoritesStore {
  pub fn stored(&self) -> Vec<AlbumSummary> {
    self.albums.lock().unwrap().clone()
  }
}

#[async_trait]
impl FavoritesStore for MemoryFavoritesStore {
  async fn list(&self) -> Result<Vec<AlbumSummary>, StoreError> {
    Ok(self.stored())
  }

  async fn add(&self, album: &AlbumSummary) -> Result<(), StoreError> {
    self.albums.lock().unwrap().push(album.clone());
    Ok(())
  }

  async fn remove(&self, id: &CatalogAlbumId) -> Result<(), StoreError> {
    self.albums.lock().unwrap().retain(|a| &a.id != id);
    Ok(())
  }
}

#[derive(Clone, Default)]
pub struct MemoryListenLogStore {
  logs: Arc<Mutex<Vec<ListenLog>>>,
}

impl MemoryListenLogStore {
  pub fn insert(&self, log: ListenLog) {
    self.logs.lock().unwrap().insert(0, log);
  }
}

#[async_trait]
impl ListenLogStore for MemoryListenLogStore {
  async fn list(&self) -> Result<Vec<ListenLog>, StoreError> {
    Ok(self.logs.lock().unwrap().clone())
  }

  async fn create(&self, log: &NewListenLog) -> Result<ListenLog, StoreError> {
    let stored = ListenLog {
      id: LogId::new(Uuid::new_v4().to_string()),
      album: log.album.clone(),
      rating: log.rating,
      review: log.review.clone(),
      favorite_track: log.favorite_track.clone(),
      relisten: log.relisten,
      listen_date: log.listen_date,
    };
    self.insert(stored.clone());
    Ok(stored)
  }

  async fn delete(&self, id: &LogId) -> Result<(), StoreError> {
    let mut logs = self.logs.lock().unwrap();
    let before = logs.len();
    logs.retain(|l| &l.id != id);
    if logs.len() == before { Err(StoreError::NotFound) } else { Ok(()) }
  }
}
