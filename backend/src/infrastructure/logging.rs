use tracing_subscriber::EnvFilter;

/// Variable de entorno con el filtro de logs (sintaxis de `EnvFilter`).
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Inicializa `tracing` hacia stderr. `LOG_LEVEL` tiene prioridad sobre `default_filter`.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
  let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
    .or_else(|_| EnvFilter::try_new(default_filter))
    .unwrap_or_else(|_| EnvFilter::new("warn"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init()
    .map_err(|e| anyhow::anyhow!("init logging: {e}"))
}
