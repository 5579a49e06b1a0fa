pub mod catalog;
pub mod collection_store;
pub mod favorites_store;
pub mod listen_log_store;
pub mod reporter;

pub use catalog::{CatalogError, CatalogSearch};
pub use collection_store::{CollectionStore, StoreError};
pub use favorites_store::FavoritesStore;
pub use listen_log_store::ListenLogStore;
pub use reporter::ViewReporter;
