use tracing::{info, warn};

use crate::domain::{ListenDraft, ListenLog, LogId, NewListenLog, Rating};
use crate::errors::CoreError;
use crate::ports::ListenLogStore;

/// Cantidad de reseñas que muestra el resumen de actividad reciente.
pub const RECENT_REVIEWS: usize = 3;

pub struct ListenLogService<L: ListenLogStore> {
  store: L,
}

impl<L: ListenLogStore> ListenLogService<L> {
  pub fn new(store: L) -> Self {
    Self { store }
  }

  /// Valida el borrador y lo persiste.
  ///
  /// La valoración tiene que estar en `1..=5`; la fecha del álbum se completa igual que al
  /// agregarlo a una colección. Reseña y pista favorita vacías se guardan como `None`.
  pub async fn record(&self, draft: ListenDraft) -> Result<ListenLog, CoreError> {
    let rating = Rating::new(draft.rating).ok_or(CoreError::InvalidRating(draft.rating))?;

    let log = NewListenLog {
      album: draft.album.with_normalized_release_date(),
      rating,
      review: non_blank(draft.review),
      favorite_track: non_blank(draft.favorite_track),
      relisten: draft.relisten,
      listen_date: draft.listen_date,
    };

    let stored = self.store.create(&log).await.map_err(|e| CoreError::RemoteWriteFailed(e.to_string()))?;
    info!(log = %stored.id, album = %stored.album.id, rating = stored.rating.stars(), "listen recorded");
    Ok(stored)
  }

  /// Escuchas recientes en el orden del store (más reciente primero).
  ///
  /// Los registros cuyo álbum no tiene nombre se descartan: no hay nada que mostrar de ellos.
  pub async fn recent(&self) -> Result<Vec<ListenLog>, CoreError> {
    let logs = self.store.list().await.map_err(|e| CoreError::RemoteReadFailed(e.to_string()))?;
    let total = logs.len();

    let logs: Vec<ListenLog> = logs.into_iter().filter(|l| !l.album.name.trim().is_empty()).collect();
    if logs.len() != total {
      warn!(dropped = total - logs.len(), "listen logs without album name skipped");
    }

    Ok(logs)
  }

  pub async fn delete(&self, id: &LogId) -> Result<(), CoreError> {
    self.store.delete(id).await.map_err(|e| CoreError::RemoteWriteFailed(e.to_string()))?;
    info!(log = %id, "listen log deleted");
    Ok(())
  }
}

/// Las primeras `limit` escuchas que tienen reseña.
pub fn recent_reviews(logs: &[ListenLog], limit: usize) -> Vec<&ListenLog> {
  logs.iter().filter(|l| l.has_review()).take(limit).collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
