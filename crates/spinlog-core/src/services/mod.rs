pub mod collection_screen;
pub mod favorites;
pub mod listen_log;
pub mod rank_store;

#[cfg(test)]
pub(crate) mod fakes;

pub use collection_screen::{
  CollectionScreen, ReadyMode, ScreenSnapshot, ScreenState, SearchOutcome, SyncFailurePolicy,
};
pub use favorites::FavoritesService;
pub use listen_log::{ListenLogService, RECENT_REVIEWS, recent_reviews};
pub use rank_store::{PendingSync, RankStore, SyncFailure};
