use crate::error::{config_err_res, AddonError};

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    7000
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigApi {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// How many ports above `port` are tried when it is already taken. `0` disables the search.
    #[serde(default)]
    pub port_search: u16,
}

impl Default for ConfigApi {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            port_search: 0,
        }
    }
}

impl ConfigApi {
    pub fn prepare(&mut self) -> Result<(), AddonError> {
        self.host = self.host.trim().to_string();
        if self.host.is_empty() {
            self.host = default_host();
        }
        if self.port == 0 && self.port_search > 0 {
            return config_err_res!("api.port_search needs a fixed api.port to start from");
        }
        Ok(())
    }

    /// Candidate ports in bind order.
    pub fn candidate_ports(&self) -> impl Iterator<Item = u16> {
        let start = self.port;
        let end = start.saturating_add(self.port_search);
        start..=end
    }
}
