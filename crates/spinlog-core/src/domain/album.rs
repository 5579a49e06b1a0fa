use serde::{Deserialize, Serialize};

use crate::domain::ids::CatalogAlbumId;

/// Resumen de un álbum tal como lo presenta el catálogo.
///
/// Es un *value type*: se construye una vez a partir de la respuesta del catálogo
/// (o del almacenamiento remoto) y no se muta después. Las operaciones que necesitan
/// otra versión (por ejemplo, con la fecha normalizada) construyen una copia nueva.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
  /// Identificador del catálogo, único por entidad.
  pub id: CatalogAlbumId,

  /// Título del álbum tal como aparece en el catálogo.
  pub name: String,

  /// Nombre del primer artista acreditado.
  pub artist_name: String,

  /// URL de la primera portada disponible, si existe.
  pub image_url: Option<String>,

  /// Fecha de lanzamiento.
  ///
  /// Se mantiene como `String` porque el catálogo la entrega con precisión variable
  /// ("1998", "1998-05", "1998-05-21"). Ver [`normalize_release_date`].
  pub release_date: String,

  /// Enlace público al álbum en el catálogo.
  pub external_url: Option<String>,

  /// Géneros asignados, en el orden del catálogo. Puede estar vacío.
  pub genres: Vec<String>,
}

impl AlbumSummary {
  /// Devuelve una copia con la fecha de lanzamiento completada a `YYYY-MM-DD`.
  pub fn with_normalized_release_date(&self) -> Self {
    Self { release_date: normalize_release_date(&self.release_date), ..self.clone() }
  }
}

/// Completa una fecha parcial del catálogo para que el almacenamiento remoto la acepte como fecha.
///
/// - `"YYYY"`    → `"YYYY-01-01"`
/// - `"YYYY-MM"` → `"YYYY-MM-01"`
/// - cualquier otra cosa se devuelve sin cambios.
pub fn normalize_release_date(raw: &str) -> String {
  let bytes = raw.as_bytes();
  let all_digits = |s: &[u8]| s.iter().all(u8::is_ascii_digit);

  match bytes.len() {
    4 if all_digits(bytes) => format!("{raw}-01-01"),
    7 if all_digits(&bytes[..4]) && bytes[4] == b'-' && all_digits(&bytes[5..]) => format!("{raw}-01"),
    _ => raw.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bare_year_gets_first_of_january() {
    assert_eq!(normalize_release_date("1995"), "1995-01-01");
  }

  #[test]
  fn year_month_gets_first_day() {
    assert_eq!(normalize_release_date("1995-06"), "1995-06-01");
  }

  #[test]
  fn full_dates_and_oddities_pass_through() {
    assert_eq!(normalize_release_date("1995-06-15"), "1995-06-15");
    assert_eq!(normalize_release_date(""), "");
    assert_eq!(normalize_release_date("May 1998"), "May 1998");
  }

  #[test]
  fn normalized_copy_keeps_other_fields() {
    let album = AlbumSummary {
      id: CatalogAlbumId::new("abc"),
      name: "Blue Lines".into(),
      artist_name: "Massive Attack".into(),
      image_url: None,
      release_date: "1991".into(),
      external_url: None,
      genres: vec!["Trip Hop".into()],
    };

    let normalized = album.with_normalized_release_date();
    assert_eq!(normalized.release_date, "1991-01-01");
    assert_eq!(normalized.name, album.name);
    assert_eq!(album.release_date, "1991");
  }
}
