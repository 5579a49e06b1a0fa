pub mod adapters;
pub mod client;
pub mod config;
pub mod dto;

pub use adapters::{HttpCatalogSearch, HttpCollectionStore, HttpFavoritesStore, HttpListenLogStore};
pub use client::{ApiClient, RemoteError};
pub use config::RemoteConfig;
