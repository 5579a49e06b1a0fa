use tracing::info;

use crate::domain::{AlbumSummary, CatalogAlbumId, Favorites, MAX_FAVORITES};
use crate::errors::CoreError;
use crate::ports::{FavoritesStore, StoreError};

/// Favoritos del usuario: hasta [`MAX_FAVORITES`] álbumes únicos.
///
/// Las reglas se validan antes de llamar al store; tras cada escritura se relee la lista
/// remota, que es la fuente de verdad.
pub struct FavoritesService<F: FavoritesStore> {
  store: F,
}

impl<F: FavoritesStore> FavoritesService<F> {
  pub fn new(store: F) -> Self {
    Self { store }
  }

  pub async fn load(&self) -> Result<Favorites, CoreError> {
    let albums = self.store.list().await.map_err(read_failed)?;
    Ok(Favorites::new(albums))
  }

  pub async fn add(&self, current: &Favorites, album: AlbumSummary) -> Result<Favorites, CoreError> {
    if current.is_full() {
      return Err(CoreError::FavoritesFull { limit: MAX_FAVORITES });
    }
    if current.contains(&album.id) {
      return Err(CoreError::AlreadyFavorite(album.id.to_string()));
    }
    if album.release_date.trim().is_empty() {
      return Err(CoreError::MissingReleaseDate);
    }

    let album = album.with_normalized_release_date();
    self.store.add(&album).await.map_err(write_failed)?;
    info!(album = %album.id, "album added to favorites");

    self.load().await
  }

  pub async fn remove(&self, id: &CatalogAlbumId) -> Result<Favorites, CoreError> {
    self.store.remove(id).await.map_err(write_failed)?;
    info!(album = %id, "album removed from favorites");

    self.load().await
  }
}

fn read_failed(e: StoreError) -> CoreError {
  CoreError::RemoteReadFailed(e.to_string())
}

fn write_failed(e: StoreError) -> CoreError {
  CoreError::RemoteWriteFailed(e.to_string())
}
