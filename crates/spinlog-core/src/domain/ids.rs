use serde::{Deserialize, Serialize};
use std::fmt;

/// Declara un identificador opaco respaldado por `String`.
///
/// Los IDs de spinlog los asigna siempre un sistema externo (el catálogo o el
/// almacenamiento remoto), así que no se generan localmente: solo se transportan.
macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(value: impl Into<String>) -> Self {
        $name(value.into())
      }

      pub fn as_str(&self) -> &str {
        &self.0
      }

      pub fn into_string(self) -> String {
        self.0
      }
    }

    impl From<String> for $name {
      fn from(s: String) -> Self {
        $name(s)
      }
    }

    impl From<&str> for $name {
      fn from(s: &str) -> Self {
        $name(s.to_string())
      }
    }

    impl From<$name> for String {
      fn from(id: $name) -> Self {
        id.0
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }
  };
}

string_id!(
  /// Identificador de un álbum tal como lo entrega el catálogo.
  ///
  /// Es único de forma global para cada entidad del catálogo, y es la clave
  /// usada para deduplicar resultados de búsqueda.
  CatalogAlbumId
);

string_id!(
  /// Identificador de una entrada dentro de una colección.
  ///
  /// Lo asigna el almacenamiento remoto y se mantiene estable entre reordenamientos.
  EntryId
);

string_id!(
  /// Identificador de una colección (una "lista" del usuario).
  CollectionId
);

string_id!(
  /// Identificador de un registro de escucha.
  LogId
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_serialize_as_plain_strings() {
    let id = EntryId::new("42");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");

    let back: EntryId = serde_json::from_str("\"42\"").unwrap();
    assert_eq!(back, id);
  }
}
