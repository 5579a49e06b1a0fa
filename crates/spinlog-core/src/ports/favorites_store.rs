use crate::domain::{AlbumSummary, CatalogAlbumId};
use crate::ports::collection_store::StoreError;

/// Port del conjunto remoto de favoritos del usuario.
#[async_trait::async_trait]
pub trait FavoritesStore: Send + Sync {
  async fn list(&self) -> Result<Vec<AlbumSummary>, StoreError>;

  async fn add(&self, album: &AlbumSummary) -> Result<(), StoreError>;

  async fn remove(&self, id: &CatalogAlbumId) -> Result<(), StoreError>;
}
