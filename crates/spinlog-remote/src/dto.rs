//! Wire shapes of the collection API and their mapping to domain values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spinlog_core::domain::{
  AlbumSummary, CatalogAlbumId, Collection, CollectionEntry, CollectionId, EntryId, ListenLog, LogId, Rating,
};

use crate::client::RemoteError;

/// Ids come back as strings from some endpoints and as integers from others.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
  Text(String),
  Number(i64),
}

impl From<WireId> for String {
  fn from(id: WireId) -> Self {
    match id {
      WireId::Text(s) => s,
      WireId::Number(n) => n.to_string(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireAlbum {
  pub id: WireId,
  pub name: String,
  #[serde(default)]
  pub artist_name: String,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default)]
  pub release_date: Option<String>,
  #[serde(default)]
  pub external_url: Option<String>,
  #[serde(default)]
  pub genres: Vec<String>,
}

impl From<WireAlbum> for AlbumSummary {
  fn from(w: WireAlbum) -> Self {
    AlbumSummary {
      id: CatalogAlbumId::new(String::from(w.id)),
      name: w.name,
      artist_name: w.artist_name,
      image_url: w.image_url,
      release_date: w.release_date.unwrap_or_default(),
      external_url: w.external_url,
      genres: w.genres,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireEntry {
  pub id: WireId,
  pub rank: u32,
  pub album: WireAlbum,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCollection {
  pub id: WireId,
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub entries: Vec<WireEntry>,
}

impl From<WireCollection> for Collection {
  fn from(w: WireCollection) -> Self {
    Collection {
      id: CollectionId::new(String::from(w.id)),
      title: w.title,
      description: w.description.unwrap_or_default(),
      entries: w
        .entries
        .into_iter()
        .map(|e| CollectionEntry { entry_id: EntryId::new(String::from(e.id)), album: e.album.into(), rank: e.rank })
        .collect(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct CreateCollectionBody<'a> {
  pub title: &'a str,
  pub description: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireListenLog {
  pub id: WireId,
  pub album: WireAlbum,
  pub rating: u8,
  #[serde(default)]
  pub review: Option<String>,
  #[serde(default)]
  pub favorite_track: Option<String>,
  #[serde(default)]
  pub relisten: bool,
  pub listen_date: NaiveDate,
}

/// Decodes one element of the `/logs` listing.
///
/// A null album, an album without a name, or a rating outside 1..=5 is a [`RemoteError::Decode`],
/// so callers can drop that record and keep the rest.
pub fn decode_listen_log(value: serde_json::Value) -> Result<ListenLog, RemoteError> {
  let wire: WireListenLog = serde_json::from_value(value).map_err(|e| RemoteError::Decode(e.to_string()))?;
  ListenLog::try_from(wire)
}

impl TryFrom<WireListenLog> for ListenLog {
  type Error = RemoteError;

  fn try_from(w: WireListenLog) -> Result<Self, Self::Error> {
    let id = String::from(w.id);
    let rating =
      Rating::new(w.rating).ok_or_else(|| RemoteError::Decode(format!("log {id} has rating {}", w.rating)))?;
    if w.album.name.trim().is_empty() {
      return Err(RemoteError::Decode(format!("log {id} has an album without a name")));
    }

    Ok(ListenLog {
      id: LogId::new(id),
      album: w.album.into(),
      rating,
      review: w.review,
      favorite_track: w.favorite_track,
      relisten: w.relisten,
      listen_date: w.listen_date,
    })
  }
}
