use crate::utils::{default_as_true, is_blank_optional_string};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_as_true")]
    pub sanitize_sensitive_info: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            sanitize_sensitive_info: default_as_true(),
            log_level: None,
        }
    }
}

impl LogConfig {
    pub fn prepare(&mut self) {
        if is_blank_optional_string(&self.log_level) {
            self.log_level = None;
        }
    }
}
