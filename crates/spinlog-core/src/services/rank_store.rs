use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{AlbumSummary, Collection, CollectionId, EntryId};
use crate::errors::CoreError;
use crate::ports::{CollectionStore, StoreError};
use crate::ranking;

/// Rank-aware operations on collections backed by a remote [`CollectionStore`].
///
/// The store never keeps a collection of its own: callers pass the current value in and get the
/// next one back.
pub struct RankStore<S>
where
  S: CollectionStore,
{
  store: S,
}

impl<S> RankStore<S>
where
  S: CollectionStore,
{
  pub fn new(store: S) -> Self {
    Self { store }
  }

  /// Fetches the authoritative collection, sorted by rank with contiguous ranks.
  pub async fn load(&self, id: &CollectionId) -> Result<Collection, CoreError> {
    let remote = self.store.fetch(id).await.map_err(read_failed)?;
    debug!(collection = %id, entries = remote.entries.len(), "collection loaded");
    Ok(ranking::canonicalize(remote))
  }

  /// Creates an empty collection.
  pub async fn create(&self, title: &str, description: &str) -> Result<Collection, CoreError> {
    let created = self.store.create(title, description).await.map_err(write_failed)?;
    info!(collection = %created.id, title, "collection created");
    Ok(created)
  }

  /// Attaches `album` at the end of `collection` and returns the refreshed collection.
  ///
  /// The release date is completed to `YYYY-MM-DD` before anything is sent. `collection` is only
  /// borrowed: if the remote call fails the caller still holds the unmodified value. Entry ids in
  /// the result are the ones assigned by the remote store.
  pub async fn add_entry(&self, collection: &Collection, album: AlbumSummary) -> Result<Collection, CoreError> {
    let album = album.with_normalized_release_date();

    self.store.attach_album(&collection.id, &album).await.map_err(write_failed)?;
    info!(collection = %collection.id, album = %album.id, rank = collection.len() + 1, "album attached");

    self.load(&collection.id).await
  }

  /// Splices the entry at `from` into `to` and renumbers every rank.
  ///
  /// The change is applied locally right away; the full rank mapping is only sent when the
  /// returned [`PendingSync`] is confirmed. A move onto the same index sends nothing.
  pub fn reorder(&self, collection: &Collection, from: usize, to: usize) -> Result<PendingSync<'_, S>, CoreError> {
    let next = ranking::reorder(collection.clone(), from, to)?;
    let write = if from == to { PendingWrite::Nothing } else { PendingWrite::Ranks };
    Ok(PendingSync { store: self, collection: next, write })
  }

  /// Removes `entry_id` locally and renumbers from 1; the remote delete runs on confirm.
  pub fn remove_entry(&self, collection: &Collection, entry_id: &EntryId) -> Result<PendingSync<'_, S>, CoreError> {
    let next = ranking::remove_entry(collection.clone(), entry_id)?;
    Ok(PendingSync { store: self, collection: next, write: PendingWrite::Delete(entry_id.clone()) })
  }

  /// Sends `{id, rank}` for every entry, not just the moved one.
  pub async fn persist_ranks(&self, collection: &Collection) -> Result<(), CoreError> {
    let ranks = collection.rank_mapping();
    self.store.update_ranks(&collection.id, &ranks).await.map_err(write_failed)?;
    debug!(collection = %collection.id, entries = ranks.len(), "ranks persisted");
    Ok(())
  }

  pub async fn delete_entry(&self, id: &CollectionId, entry_id: &EntryId) -> Result<(), CoreError> {
    self.store.delete_entry(id, entry_id).await.map_err(write_failed)?;
    info!(collection = %id, entry = %entry_id, "entry deleted");
    Ok(())
  }
}

enum PendingWrite {
  Nothing,
  Ranks,
  Delete(EntryId),
}

/// A collection already changed locally whose remote write has not been sent yet.
#[must_use = "the change stays local until `confirm` is awaited"]
pub struct PendingSync<'s, S>
where
  S: CollectionStore,
{
  store: &'s RankStore<S>,
  collection: Collection,
  write: PendingWrite,
}

impl<'s, S> PendingSync<'s, S>
where
  S: CollectionStore,
{
  /// The optimistic collection, ready to be shown.
  pub fn collection(&self) -> &Collection {
    &self.collection
  }

  /// Sends the remote write. On failure the optimistic collection comes back with the error.
  pub async fn confirm(self) -> Result<Collection, SyncFailure> {
    let result = match &self.write {
      PendingWrite::Nothing => Ok(()),
      PendingWrite::Ranks => self.store.persist_ranks(&self.collection).await,
      PendingWrite::Delete(entry_id) => self.store.delete_entry(&self.collection.id, entry_id).await,
    };

    match result {
      Ok(()) => Ok(self.collection),
      Err(error) => Err(SyncFailure { collection: self.collection, error }),
    }
  }
}

/// The remote store rejected a change that was already applied locally.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SyncFailure {
  /// What the caller is showing: the local change, not what the store holds.
  pub collection: Collection,
  #[source]
  pub error: CoreError,
}

fn read_failed(e: StoreError) -> CoreError {
  CoreError::RemoteReadFailed(e.to_string())
}

fn write_failed(e: StoreError) -> CoreError {
  CoreError::RemoteWriteFailed(e.to_string())
}
