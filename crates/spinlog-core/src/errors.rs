use thiserror::Error;

use crate::domain::ids::{CollectionId, EntryId};

/// Error genérico del núcleo de spinlog.
///
/// Cada fallo queda acotado a la acción del usuario que lo provocó. Las capas superiores
/// (CLI, UI) deberían mapear este error a mensajes de usuario o logs.
///
/// `StaleResponseDiscarded` nunca se muestra al usuario: es una respuesta de búsqueda
/// que llegó tarde y se descartó en silencio.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("invalid catalog response: {0}")]
  InvalidCatalogResponse(String),

  #[error("malformed catalog entity: {0}")]
  MalformedEntity(String),

  #[error("catalog search failed: {0}")]
  SearchFailed(String),

  #[error("stale search response discarded for query {query:?}")]
  StaleResponseDiscarded { query: String },

  #[error("remote read failed: {0}")]
  RemoteReadFailed(String),

  #[error("remote write failed: {0}")]
  RemoteWriteFailed(String),

  #[error("index {index} out of range for collection of {len} entries")]
  IndexOutOfRange { index: usize, len: usize },

  #[error("entry {0} not found in collection")]
  EntryNotFound(EntryId),

  #[error("another mutation is already in flight for collection {0}")]
  MutationInFlight(CollectionId),

  #[error("invalid state: {0}")]
  InvalidState(String),

  #[error("favorites are full (max {limit})")]
  FavoritesFull { limit: usize },

  #[error("album {0} is already a favorite")]
  AlreadyFavorite(String),

  #[error("release date is required")]
  MissingReleaseDate,

  #[error("invalid rating {0}, expected 1-5")]
  InvalidRating(u8),

  #[error("internal error: {0}")]
  Internal(String),
}

impl CoreError {
  /// `true` para errores que vienen del almacenamiento remoto.
  pub fn is_remote(&self) -> bool {
    matches!(self, CoreError::RemoteReadFailed(_) | CoreError::RemoteWriteFailed(_) | CoreError::SearchFailed(_))
  }
}
