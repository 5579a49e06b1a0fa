use crate::domain::{ListenLog, LogId, NewListenLog};
use crate::ports::collection_store::StoreError;

/// Port del historial remoto de escuchas.
#[async_trait::async_trait]
pub trait ListenLogStore: Send + Sync {
  /// Registros del usuario, del más reciente al más antiguo.
  async fn list(&self) -> Result<Vec<ListenLog>, StoreError>;

  async fn create(&self, log: &NewListenLog) -> Result<ListenLog, StoreError>;

  async fn delete(&self, id: &LogId) -> Result<(), StoreError>;
}
