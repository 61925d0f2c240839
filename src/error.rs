use std::error::Error;
use std::fmt::{Display, Formatter, Result};

#[macro_export]
macro_rules! config_err {
    ($($arg:tt)*) => {
        $crate::error::AddonError::new($crate::error::AddonErrorKind::Config, format!($($arg)*))
    };
}

pub use config_err;

#[macro_export]
macro_rules! config_err_res {
    ($($arg:tt)*) => {
        Err($crate::error::AddonError::new($crate::error::AddonErrorKind::Config, format!($($arg)*)))
    };
}

pub use config_err_res;

#[macro_export]
macro_rules! fetch_err {
    // Messages usually carry the playlist url, credentials are masked before storing.
    ($($arg:tt)*) => {
        $crate::error::AddonError::new($crate::error::AddonErrorKind::Fetch,
            $crate::utils::sanitize_sensitive_info(&format!($($arg)*)).into_owned())
    };
}

pub use fetch_err;

#[macro_export]
macro_rules! fetch_err_res {
    ($($arg:tt)*) => {
        Err($crate::error::AddonError::new($crate::error::AddonErrorKind::Fetch,
            $crate::utils::sanitize_sensitive_info(&format!($($arg)*)).into_owned()))
    };
}

pub use fetch_err_res;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddonErrorKind {
    // invalid or unreadable configuration, fatal at startup
    Config,
    // playlist source unreachable or answered with garbage
    Fetch,
}

#[derive(Debug, Clone)]
pub struct AddonError {
    pub kind: AddonErrorKind,
    pub message: String,
}

impl AddonError {
    pub const fn new(kind: AddonErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl Display for AddonError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.kind {
            AddonErrorKind::Config => write!(f, "Config error: {}", self.message),
            AddonErrorKind::Fetch => write!(f, "Fetch error: {}", self.message),
        }
    }
}

impl Error for AddonError {}

#[cfg(test)]
mod tests {
    use super::AddonErrorKind;

    #[test]
    fn test_fetch_err_masks_credentials() {
        let err = fetch_err!("Request failed: http://host/get.php?username=joe&password=secret&type=m3u_plus");
        assert_eq!(err.kind, AddonErrorKind::Fetch);
        assert!(!err.message.contains("joe"));
        assert!(!err.message.contains("secret"));
        assert!(err.message.contains("type=m3u_plus"));
    }

    #[test]
    fn test_fetch_err_res_masks_credentials() {
        let res: Result<(), _> = fetch_err_res!("Request failed with status {} http://host/get.php?username=joe&password=secret", 500);
        let err = res.unwrap_err();
        assert_eq!(err.kind, AddonErrorKind::Fetch);
        assert_eq!(err.message, "Request failed with status 500 http://host/get.php?username=***&password=***");
    }

    #[test]
    fn test_display_prefix() {
        let err = config_err!("port {} is invalid", 0);
        assert_eq!(err.to_string(), "Config error: port 0 is invalid");
    }
}
