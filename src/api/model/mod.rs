mod app_state;
mod playlist_cache;

pub use self::app_state::*;
pub use self::playlist_cache::*;

#[cfg(test)]
pub(crate) use self::playlist_cache::tests as playlist_cache_tests;
