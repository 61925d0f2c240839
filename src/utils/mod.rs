mod constants;
mod file;
mod logging;
pub mod network;
mod string_utils;
pub mod sys_utils;

pub use self::constants::*;
pub use self::file::*;
pub use self::logging::*;
pub use self::network::request;
pub use self::string_utils::*;

pub const fn default_as_true() -> bool {
    true
}
