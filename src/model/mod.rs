mod addon;
mod config;
mod healthcheck;
mod playlist;

pub use self::addon::*;
pub use self::config::*;
pub use self::healthcheck::*;
pub use self::playlist::*;
