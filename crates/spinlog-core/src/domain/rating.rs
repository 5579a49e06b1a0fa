use serde::{Deserialize, Serialize};
use std::fmt;

/// Valoración de una escucha en una escala entera de 1 a 5 estrellas.
///
/// No existe la valoración 0: una escucha registrada siempre lleva al menos una
/// estrella. Para construirla desde la entrada del usuario se usa [`Rating::new`],
/// que rechaza valores fuera de rango.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
  /// Valor mínimo permitido.
  pub const MIN: u8 = 1;
  /// Valor máximo permitido (cantidad de estrellas).
  pub const MAX: u8 = 5;

  /// Crea una `Rating` si `stars` está en el rango `[1, 5]`.
  pub fn new(stars: u8) -> Option<Self> {
    (Self::MIN..=Self::MAX).contains(&stars).then_some(Self(stars))
  }

  pub fn stars(&self) -> u8 {
    self.0
  }
}

impl TryFrom<u8> for Rating {
  type Error = String;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Rating::new(value).ok_or_else(|| format!("rating {value} out of range 1-5"))
  }
}

impl From<Rating> for u8 {
  fn from(rating: Rating) -> Self {
    rating.0
  }
}

impl fmt::Display for Rating {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let full_stars = self.0 as usize;

    for _ in 0..full_stars {
      write!(f, "★")?;
    }
    for _ in full_stars..Self::MAX as usize {
      write!(f, "☆")?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_one_to_five() {
    assert!(Rating::new(0).is_none());
    assert_eq!(Rating::new(1).map(|r| r.stars()), Some(1));
    assert_eq!(Rating::new(5).map(|r| r.stars()), Some(5));
    assert!(Rating::new(6).is_none());
  }

  #[test]
  fn renders_as_stars() {
    assert_eq!(Rating::new(3).unwrap().to_string(), "★★★☆☆");
    assert_eq!(Rating::new(5).unwrap().to_string(), "★★★★★");
  }

  #[test]
  fn deserialization_rejects_out_of_range() {
    assert!(serde_json::from_str::<Rating>("4").is_ok());
    assert!(serde_json::from_str::<Rating>("9").is_err());
  }
}
