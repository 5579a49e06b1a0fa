use crate::io::atomic_write_str;
use crate::paths::{ConfigError, SpinlogPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

use toml_edit::{DocumentMut, Item};

/// Acceso tipado a secciones (`[remote]`, `[screen]`, ...) del archivo de configuración.
pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

pub struct TomlConfigBackend {
  paths: SpinlogPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: SpinlogPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &SpinlogPaths {
    &self.paths
  }

  /// Como [`ConfigBackend::load_section`], pero un archivo o una sección ausentes dan `T::default()`.
  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(content) = self.read_config()? else {
      return Ok(T::default());
    };

    let toml_val: toml::Value = toml::from_str(&content)?;
    match toml_val.get(section) {
      Some(table) => decode_section(section, table),
      None => Ok(T::default()),
    }
  }

  fn read_config(&self) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(self.paths.config_file()) {
      Ok(c) => Ok(Some(c)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

fn decode_section<T: DeserializeOwned>(section: &str, table: &toml::Value) -> Result<T, ConfigError> {
  table.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let content = fs::read_to_string(&path)?;
    let toml_val: toml::Value = toml::from_str(&content)?;

    let table = toml_val
      .get(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", path)))?;

    decode_section(section, table)
  }

  /// Reemplaza solo `[section]`; el resto del documento (comentarios incluidos) se conserva.
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let mut doc: DocumentMut = match self.read_config()? {
      Some(content) => {
        content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?
      }
      None => DocumentMut::new(),
    };

    // `toml::to_string` da las claves sueltas ("a = 1\nb = 2\n"); como documento es una tabla.
    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;
    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    doc[section] = section_item;

    atomic_write_str(&self.paths.config_file(), &doc.to_string())?;
    Ok(())
  }
}
