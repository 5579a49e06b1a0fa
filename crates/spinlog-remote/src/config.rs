use serde::{Deserialize, Serialize};
use spinlog_config::{ConfigBackend, ConfigError, TomlConfigBackend, config_backend};

const SECTION: &str = "remote";

/// Sección `[remote]`: dónde viven el catálogo y el almacenamiento de colecciones.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
  /// URL base de la API, sin barra final.
  #[serde(default = "default_base_url")]
  pub base_url: String,

  /// Ruta del endpoint de búsqueda del catálogo, relativa a `base_url`.
  #[serde(default = "default_search_path")]
  pub search_path: String,

  /// Cantidad de resultados que se piden por búsqueda.
  #[serde(default = "default_search_limit")]
  pub search_limit: u32,

  /// Límite por petición en segundos; sin valor no hay límite.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timeout_secs: Option<u64>,

  /// Token de acceso enviado como `Authorization: Bearer`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub access_token: Option<String>,
}

fn default_base_url() -> String {
  "http://127.0.0.1:8000".into()
}

fn default_search_path() -> String {
  "/api/spotify/search/".into()
}

fn default_search_limit() -> u32 {
  20
}

impl Default for RemoteConfig {
  fn default() -> Self {
    RemoteConfig {
      base_url: default_base_url(),
      search_path: default_search_path(),
      search_limit: default_search_limit(),
      timeout_secs: None,
      access_token: None,
    }
  }
}

impl RemoteConfig {
  /// Carga `[remote]` del archivo del proceso y la vuelve a escribir con los defaults completos.
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(config_backend()?)
  }

  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let cfg = backend.load_section_with_default(SECTION)?;
    backend.save_section(SECTION, &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    config_backend()?.save_section(SECTION, self)
  }

  /// URL absoluta de `path` bajo `base_url`.
  pub fn endpoint(&self, path: &str) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
  }
}
