use serde::{Deserialize, Serialize};

use crate::domain::album::AlbumSummary;
use crate::domain::ids::CatalogAlbumId;

/// Cantidad máxima de álbumes favoritos por usuario.
pub const MAX_FAVORITES: usize = 4;

/// Conjunto de álbumes favoritos del usuario, único por `id` de catálogo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorites {
  pub albums: Vec<AlbumSummary>,
}

impl Favorites {
  pub fn new(albums: Vec<AlbumSummary>) -> Self {
    Self { albums }
  }

  pub fn len(&self) -> usize {
    self.albums.len()
  }

  pub fn is_empty(&self) -> bool {
    self.albums.is_empty()
  }

  pub fn is_full(&self) -> bool {
    self.albums.len() >= MAX_FAVORITES
  }

  pub fn contains(&self, id: &CatalogAlbumId) -> bool {
    self.albums.iter().any(|a| &a.id == id)
  }
}
