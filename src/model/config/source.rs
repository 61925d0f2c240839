use crate::error::{config_err_res, AddonError};
use crate::utils::sanitize_sensitive_info;

const fn default_connect_timeout_secs() -> u32 {
    10
}

const fn default_timeout_secs() -> u32 {
    60
}

/// The remote playlist. Credentials belong into the url query and should be injected
/// with `${env:VAR}` placeholders instead of being written into the file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PlaylistSourceConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
}

impl PlaylistSourceConfig {
    pub fn prepare(&mut self) -> Result<(), AddonError> {
        self.url = self.url.trim().to_string();
        if self.url.is_empty() {
            return config_err_res!("source.url is missing");
        }
        match url::Url::parse(&self.url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    return config_err_res!("source.url must be http or https: {}", sanitize_sensitive_info(&self.url));
                }
            }
            Err(err) => return config_err_res!("source.url is invalid: {} {err}", sanitize_sensitive_info(&self.url)),
        }
        if self.user_agent.as_ref().is_some_and(|ua| ua.trim().is_empty()) {
            self.user_agent = None;
        }
        if self.timeout_secs == 0 {
            return config_err_res!("source.timeout_secs must be greater than 0");
        }
        Ok(())
    }
}
