//! Pure rank operations on an owned [`Collection`].
//!
//! Every function takes the collection by value and returns the next version, so the caller
//! decides when (and whether) the new state becomes visible.

use tracing::warn;

use crate::domain::album::AlbumSummary;
use crate::domain::collection::{Collection, CollectionEntry};
use crate::domain::ids::EntryId;
use crate::errors::CoreError;

/// Moves the entry at `from` so that it ends up at index `to` (splice, not swap), then renumbers
/// every entry to `1..=N` in the new positional order.
pub fn reorder(mut collection: Collection, from: usize, to: usize) -> Result<Collection, CoreError> {
  let len = collection.entries.len();
  for index in [from, to] {
    if index >= len {
      return Err(CoreError::IndexOutOfRange { index, len });
    }
  }

  let moved = collection.entries.remove(from);
  collection.entries.insert(to, moved);
  collection.renumber();

  Ok(collection)
}

/// Removes `entry_id` and closes the gap, leaving ranks `1..=N-1`.
pub fn remove_entry(mut collection: Collection, entry_id: &EntryId) -> Result<Collection, CoreError> {
  let position = collection
    .entries
    .iter()
    .position(|e| &e.entry_id == entry_id)
    .ok_or_else(|| CoreError::EntryNotFound(entry_id.clone()))?;

  collection.entries.remove(position);
  collection.renumber();

  Ok(collection)
}

/// Appends `album` at rank `N+1` under the given entry id.
///
/// Used when the caller already knows the id the store assigned; the rank store itself always
/// re-reads the authoritative collection after an insert.
pub fn append_entry(mut collection: Collection, entry_id: EntryId, album: AlbumSummary) -> Collection {
  let rank = collection.entries.len() as u32 + 1;
  collection.entries.push(CollectionEntry { entry_id, album, rank });
  collection
}

/// Restores the rank invariant on a collection read from the remote store.
///
/// Entries are stably sorted by their remote rank; if the ranks have gaps or duplicates they are
/// renumbered from 1.
pub fn canonicalize(mut collection: Collection) -> Collection {
  collection.entries.sort_by_key(|e| e.rank);

  if !collection.ranks_are_contiguous() {
    warn!(collection = %collection.id, entries = collection.entries.len(), "remote ranks not contiguous, renumbering");
    collection.renumber();
  }

  collection
}
