use serde::{Deserialize, Serialize};
use spinlog_config::{config_backend, ConfigBackend, ConfigError, TomlConfigBackend};
use spinlog_core::services::SyncFailurePolicy;

const SECTION: &str = "screen";

/// Sección `[screen]`: comportamiento de la pantalla de colección y del log.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
  /// Qué hacer con el orden local cuando el servidor rechaza un reordenamiento o una baja.
  #[serde(default)]
  pub sync_failure: SyncFailurePolicy,

  /// Filtro de `tracing` usado cuando `LOG_LEVEL` no está definida.
  #[serde(default = "default_log_filter")]
  pub log_filter: String,
}

fn default_log_filter() -> String {
  "warn".into()
}

impl Default for ScreenConfig {
  fn default() -> Self {
    ScreenConfig { sync_failure: SyncFailurePolicy::default(), log_filter: default_log_filter() }
  }
}

impl ScreenConfig {
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(config_backend()?)
  }

  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let cfg = backend.load_section_with_default(SECTION)?;
    backend.save_section(SECTION, &cfg)?;
    Ok(cfg)
  }
}
