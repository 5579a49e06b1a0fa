//! Catalog normalizer.
//!
//! The catalog answers a free-text search with a page of *tracks*, each embedding its parent
//! album. Several tracks usually share the same album, so the raw page is turned into a list of
//! unique [`AlbumSummary`] values, keeping the order in which each album was first seen.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use crate::domain::album::AlbumSummary;
use crate::domain::ids::CatalogAlbumId;
use crate::errors::CoreError;

/// Typed envelope of a catalog search response: `{ "tracks": { "items": [...] } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchResponse {
  pub tracks: RawTrackPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrackPage {
  pub items: Vec<RawTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
  #[serde(default)]
  pub album: Option<RawAlbum>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlbum {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub artists: Vec<RawArtist>,
  #[serde(default)]
  pub images: Vec<RawImage>,
  #[serde(default)]
  pub release_date: Option<String>,
  #[serde(default)]
  pub external_urls: Option<RawExternalUrls>,
  #[serde(default)]
  pub genres: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtist {
  #[serde(default)]
  pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImage {
  #[serde(default)]
  pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExternalUrls {
  #[serde(default)]
  pub spotify: Option<String>,
}

/// Decodes a raw search body into the typed envelope.
///
/// This is the only place where the response shape is checked. A body that is not JSON, or that
/// lacks `tracks.items`, fails with [`CoreError::InvalidCatalogResponse`]; an empty `items` array
/// is a valid, empty page.
pub fn decode_search_response(body: &[u8]) -> Result<RawSearchResponse, CoreError> {
  serde_json::from_slice(body).map_err(|e| CoreError::InvalidCatalogResponse(e.to_string()))
}

/// Collapses a page of raw tracks into unique albums, in first-seen order.
///
/// Later occurrences of an album id are dropped without being validated.
pub fn normalize(raw_items: &[RawTrack]) -> Result<Vec<AlbumSummary>, CoreError> {
  let mut seen: HashSet<&str> = HashSet::with_capacity(raw_items.len());
  let mut albums = Vec::new();

  for (position, track) in raw_items.iter().enumerate() {
    let album = track
      .album
      .as_ref()
      .ok_or_else(|| CoreError::MalformedEntity(format!("track #{position} has no album")))?;

    let id = album
      .id
      .as_deref()
      .ok_or_else(|| CoreError::MalformedEntity(format!("album of track #{position} has no id")))?;

    if !seen.insert(id) {
      continue;
    }

    albums.push(summarize(id, album)?);
  }

  debug!(tracks = raw_items.len(), albums = albums.len(), "normalized catalog page");
  Ok(albums)
}

fn summarize(id: &str, album: &RawAlbum) -> Result<AlbumSummary, CoreError> {
  let name = album.name.clone().ok_or_else(|| CoreError::MalformedEntity(format!("album {id} has no name")))?;

  let artist = album.artists.first().ok_or_else(|| CoreError::MalformedEntity(format!("album {id} has no artists")))?;
  let artist_name =
    artist.name.clone().ok_or_else(|| CoreError::MalformedEntity(format!("first artist of album {id} has no name")))?;

  Ok(AlbumSummary {
    id: CatalogAlbumId::new(id),
    name,
    artist_name,
    image_url: album.images.first().and_then(|i| i.url.clone()),
    release_date: album.release_date.clone().unwrap_or_default(),
    external_url: album.external_urls.as_ref().and_then(|u| u.spotify.clone()),
    genres: album.genres.clone().unwrap_or_default(),
  })
}
