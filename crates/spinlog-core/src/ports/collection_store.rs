use crate::domain::{AlbumSummary, Collection, CollectionId, EntryId, RankUpdate};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("transport error: {0}")]
  Transport(String),

  #[error("remote rejected request ({status}): {message}")]
  Rejected { status: u16, message: String },

  #[error("not found")]
  NotFound,

  #[error("decode error: {0}")]
  Decode(String),
}

/// Port del almacenamiento remoto de colecciones.
///
/// Cada método corresponde a una llamada remota independiente:
/// - `fetch`        → `GET /collections/{id}`
/// - `create`       → `POST /collections`
/// - `attach_album` → `POST /collections/{id}/entries`
/// - `update_ranks` → `PUT /collections/{id}/ranks`
/// - `delete_entry` → `DELETE /collections/{id}/entries/{entryId}`
///
/// El adapter no mantiene estado local: la representación autoritativa es siempre
/// la que devuelve `fetch`.
#[async_trait::async_trait]
pub trait CollectionStore: Send + Sync {
  async fn fetch(&self, id: &CollectionId) -> Result<Collection, StoreError>;

  async fn create(&self, title: &str, description: &str) -> Result<Collection, StoreError>;

  async fn attach_album(&self, id: &CollectionId, album: &AlbumSummary) -> Result<(), StoreError>;

  async fn update_ranks(&self, id: &CollectionId, ranks: &[RankUpdate]) -> Result<(), StoreError>;

  async fn delete_entry(&self, id: &CollectionId, entry_id: &EntryId) -> Result<(), StoreError>;
}
