mod catalog;
mod collections;
mod favorites;
mod logs;

pub use catalog::HttpCatalogSearch;
pub use collections::HttpCollectionStore;
pub use favorites::HttpFavoritesStore;
pub use logs::HttpListenLogStore;
