use async_trait::async_trait;

use crate::domain::{AlbumSummary, Collection};
use crate::errors::CoreError;
use crate::genres::GenreBucket;
use crate::services::collection_screen::ScreenState;

// Puerto de salida de la pantalla de colección.
// La UI (o la CLI) implementa esto para redibujar cuando cambia algo.
#[async_trait]
pub trait ViewReporter: Send + Sync {
  async fn state_changed(&self, state: &ScreenState);

  /// La colección cambió (carga, alta, reordenamiento, baja); `genres` ya está recalculado.
  async fn collection_changed(&self, collection: &Collection, genres: &[GenreBucket]);

  async fn candidates_changed(&self, candidates: &[AlbumSummary]);

  async fn error(&self, error: &CoreError);
}
