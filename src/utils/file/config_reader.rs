use crate::error::{config_err, AddonError};
use crate::model::Config;
use crate::utils::{CONFIG_FILE, CONFIG_PATH, CONSTANTS};
use log::error;
use std::env;
use std::path::{Path, PathBuf};

pub fn get_default_config_path() -> String {
    let default_path = PathBuf::from(CONFIG_PATH);
    let path = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join(CONFIG_PATH)))
        .filter(|p| p.exists())
        .unwrap_or(default_path);
    path.to_string_lossy().to_string()
}

pub fn get_default_config_file_path(config_path: &str) -> String {
    PathBuf::from(config_path).join(CONFIG_FILE).to_string_lossy().to_string()
}

pub fn resolve_env_var(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    CONSTANTS.re_env_var.replace_all(value, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|e| {
            error!("Could not resolve env var '{var_name}': {e}");
            format!("${{env:{var_name}}}")
        })
    }).to_string()
}

/// Parses config content. `${env:VAR}` placeholders are resolved before deserializing.
pub fn parse_config(content: &str) -> Result<Config, AddonError> {
    let resolved = resolve_env_var(content);
    let mut config: Config = serde_yaml::from_str(&resolved)
        .map_err(|err| config_err!("Can't parse the config: {err}"))?;
    config.prepare()?;
    Ok(config)
}

pub fn read_config(config_file: &Path) -> Result<Config, AddonError> {
    let content = std::fs::read_to_string(config_file)
        .map_err(|err| config_err!("Can't read the config file: {}: {err}", config_file.display()))?;
    parse_config(&content)
        .map_err(|err| config_err!("{}: {}", config_file.display(), err.message))
}
