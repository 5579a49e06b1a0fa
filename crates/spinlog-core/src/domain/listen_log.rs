use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::album::AlbumSummary;
use crate::domain::ids::LogId;
use crate::domain::rating::Rating;

/// Registro de una escucha de un álbum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenLog {
  pub id: LogId,
  pub album: AlbumSummary,
  pub rating: Rating,

  /// Reseña libre; `None` si el usuario no escribió nada.
  pub review: Option<String>,

  /// Pista favorita del álbum en esta escucha.
  pub favorite_track: Option<String>,

  /// `true` si no es la primera vez que el usuario escucha el álbum.
  pub relisten: bool,

  pub listen_date: NaiveDate,
}

impl ListenLog {
  /// `true` si el registro tiene una reseña con contenido.
  pub fn has_review(&self) -> bool {
    self.review.as_deref().is_some_and(|r| !r.trim().is_empty())
  }
}

/// Datos introducidos por el usuario para registrar una escucha.
///
/// La valoración llega como entero sin validar; el servicio la convierte en
/// [`Rating`] antes de enviar nada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenDraft {
  pub album: AlbumSummary,
  pub rating: u8,
  pub review: Option<String>,
  pub favorite_track: Option<String>,
  pub relisten: bool,
  pub listen_date: NaiveDate,
}

/// Registro listo para persistir: álbum con fecha normalizada y valoración validada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewListenLog {
  pub album: AlbumSummary,
  pub rating: Rating,
  pub review: Option<String>,
  pub favorite_track: Option<String>,
  pub relisten: bool,
  pub listen_date: NaiveDate,
}
