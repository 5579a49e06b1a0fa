//! Genre distribution across the entries of a collection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::collection::CollectionEntry;

/// Number of buckets kept for display.
pub const TOP_GENRES: usize = 5;

/// Label of the placeholder bucket returned when no entry has genre data.
pub const NO_GENRE_DATA: &str = "No genre data available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreBucket {
  pub genre: String,
  pub count: usize,
}

impl GenreBucket {
  fn new(genre: impl Into<String>, count: usize) -> Self {
    Self { genre: genre.into(), count }
  }
}

/// Counts every genre token across `entries`, in first-encounter order.
///
/// Each element of an album's `genres` may hold several comma-separated genres (that is how the
/// remote store persists them), so it is split and trimmed; empty tokens are skipped.
pub fn tally(entries: &[CollectionEntry]) -> Vec<GenreBucket> {
  let mut buckets: Vec<GenreBucket> = Vec::new();
  let mut index: HashMap<String, usize> = HashMap::new();

  let tokens = entries
    .iter()
    .flat_map(|e| e.album.genres.iter())
    .flat_map(|g| g.split(','))
    .map(str::trim)
    .filter(|t| !t.is_empty());

  for token in tokens {
    match index.get(token) {
      Some(&i) => buckets[i].count += 1,
      None => {
        index.insert(token.to_string(), buckets.len());
        buckets.push(GenreBucket::new(token, 1));
      }
    }
  }

  buckets
}

/// Top genres for display: count descending, ties kept in first-encounter order, at most
/// [`TOP_GENRES`] buckets.
///
/// Never empty: without any genre data it returns the single placeholder bucket
/// `(NO_GENRE_DATA, 1)`.
pub fn distribution(entries: &[CollectionEntry]) -> Vec<GenreBucket> {
  let mut buckets = tally(entries);

  if buckets.is_empty() {
    return vec![GenreBucket::new(NO_GENRE_DATA, 1)];
  }

  // sort_by is stable
  buckets.sort_by(|a, b| b.count.cmp(&a.count));
  buckets.truncate(TOP_GENRES);
  buckets
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::album::AlbumSummary;
  use crate::domain::ids::{CatalogAlbumId, EntryId};

  fn entry(rank: u32, genres: &[&str]) -> CollectionEntry {
    CollectionEntry {
      entry_id: EntryId::new(format!("e{rank}")),
      album: AlbumSummary {
        id: CatalogAlbumId::new(format!("a{rank}")),
        name: format!("Album {rank}"),
        artist_name: "Artist".into(),
        image_url: None,
        release_date: String::new(),
        external_url: None,
        genres: genres.iter().map(|g| g.to_string()).collect(),
      },
      rank,
    }
  }

  #[test]
  fn comma_joined_genres_are_split() {
    let entries = [entry(1, &["Rock, Pop"]), entry(2, &["Pop"])];

    let dist = distribution(&entries);
    assert_eq!(dist, vec![GenreBucket::new("Pop", 2), GenreBucket::new("Rock", 1)]);
  }

  #[test]
  fn no_genres_yields_placeholder() {
    let entries = [entry(1, &[]), entry(2, &["", " , "])];
    assert_eq!(distribution(&entries), vec![GenreBucket::new(NO_GENRE_DATA, 1)]);
    assert_eq!(distribution(&[]), vec![GenreBucket::new(NO_GENRE_DATA, 1)]);
  }

  #[test]
  fn ties_keep_encounter_order_not_alphabetical() {
    let entries = [entry(1, &["Jazz"]), entry(2, &["Blues"]), entry(3, &["Ambient"])];

    let genres: Vec<String> = distribution(&entries).into_iter().map(|b| b.genre).collect();
    assert_eq!(genres, ["Jazz", "Blues", "Ambient"]);
  }

  #[test]
  fn only_top_five_are_presented_but_all_are_counted() {
    let entries = [
      entry(1, &["A", "B", "C", "D", "E", "F", "G"]),
      entry(2, &["G"]),
      entry(3, &["F", "G"]),
    ];

    assert_eq!(tally(&entries).len(), 7);

    let dist = distribution(&entries);
    assert_eq!(dist.len(), TOP_GENRES);
    assert_eq!(dist[0], GenreBucket::new("G", 3));
    assert_eq!(dist[1], GenreBucket::new("F", 2));
    assert_eq!(dist[2].genre, "A");
  }
}
