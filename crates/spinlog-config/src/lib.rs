mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{BASE_DIR_ENV, ConfigError, SpinlogPaths};

use once_cell::sync::OnceCell;

// Singletons del proceso: paths (portable / system) y backend de config.
static PATHS: OnceCell<SpinlogPaths> = OnceCell::new();
static CONFIG_BACKEND: OnceCell<TomlConfigBackend> = OnceCell::new();

/// Paths del proceso, resueltos en el primer uso.
pub fn paths() -> Result<&'static SpinlogPaths, ConfigError> {
  PATHS.get_or_try_init(SpinlogPaths::detect)
}

/// Backend de configuración compartido, sobre [`paths`].
pub fn config_backend() -> Result<&'static TomlConfigBackend, ConfigError> {
  CONFIG_BACKEND.get_or_try_init(|| Ok(TomlConfigBackend::new(paths()?.clone())))
}
