use serde::{Deserialize, Serialize};

use crate::domain::album::AlbumSummary;
use crate::domain::ids::{CollectionId, EntryId};

/// Pertenencia de un álbum a una colección, con su posición explícita.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
  /// Identificador estable de la entrada (no cambia al reordenar).
  pub entry_id: EntryId,

  /// Álbum referenciado.
  pub album: AlbumSummary,

  /// Posición 1-based dentro de la colección.
  pub rank: u32,
}

/// Una lista ordenada de álbumes del usuario.
///
/// Invariante: `entries` está ordenado por `rank` ascendente y los ranks forman
/// exactamente la permutación `1..=N`, sin huecos ni duplicados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
  pub id: CollectionId,
  pub title: String,
  pub description: String,
  pub entries: Vec<CollectionEntry>,
}

/// Un elemento del mapeo completo `{id, rank}` que se envía al actualizar posiciones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankUpdate {
  pub id: EntryId,
  pub rank: u32,
}

impl Collection {
  /// Colección vacía, tal como la devuelve una llamada de creación.
  pub fn empty(id: CollectionId, title: impl Into<String>, description: impl Into<String>) -> Self {
    Self { id, title: title.into(), description: description.into(), entries: Vec::new() }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn entry(&self, entry_id: &EntryId) -> Option<&CollectionEntry> {
    self.entries.iter().find(|e| &e.entry_id == entry_id)
  }

  /// Comprueba el invariante de ranks contiguos en orden de visualización.
  pub fn ranks_are_contiguous(&self) -> bool {
    self.entries.iter().enumerate().all(|(i, e)| e.rank as usize == i + 1)
  }

  /// Mapeo completo `{id, rank}` de todas las entradas.
  pub fn rank_mapping(&self) -> Vec<RankUpdate> {
    self.entries.iter().map(|e| RankUpdate { id: e.entry_id.clone(), rank: e.rank }).collect()
  }

  /// Reasigna `rank = posición + 1` a todas las entradas según su orden actual.
  pub(crate) fn renumber(&mut self) {
    for (index, entry) in self.entries.iter_mut().enumerate() {
      entry.rank = index as u32 + 1;
    }
  }
}
