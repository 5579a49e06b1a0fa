pub mod album;
pub mod collection;
pub mod favorites;
pub mod ids;
pub mod listen_log;
pub mod rating;

pub use album::{AlbumSummary, normalize_release_date};
pub use collection::{Collection, CollectionEntry, RankUpdate};
pub use favorites::{Favorites, MAX_FAVORITES};
pub use ids::{CatalogAlbumId, CollectionId, EntryId, LogId};
pub use listen_log::{ListenDraft, ListenLog, NewListenLog};
pub use rating::Rating;
