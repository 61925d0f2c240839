#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod modules;

include_modules!();

use crate::model::{Config, Healthcheck};
use crate::utils::{get_default_config_file_path, get_default_config_path, init_logger, read_config, resolve_env_var};
use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "iptv-addon")]
#[command(version)]
#[command(about = "IPTV playlist catalog addon", long_about = None)]
struct Args {
    /// The config directory
    #[arg(short = 'p', long = "config-path")]
    config_path: Option<String>,

    /// The config file
    #[arg(short = 'c', long = "config")]
    config_file: Option<String>,

    /// Overrides the api port from the config file
    #[arg(long = "port")]
    port: Option<u16>,

    /// log level
    #[arg(short = 'l', long = "log-level", default_missing_value = "info")]
    log_level: Option<String>,

    #[arg(short = None, long = "healthcheck", default_value_t = false, default_missing_value = "true")]
    healthcheck: bool,
}

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn get_config_file(args: &Args) -> PathBuf {
    let config_path = resolve_env_var(&args.config_path.as_ref().map_or_else(get_default_config_path, ToString::to_string));
    let config_file = resolve_env_var(&args.config_file.as_ref().map_or_else(|| get_default_config_file_path(&config_path), ToString::to_string));
    PathBuf::from(config_file)
}

fn load_config(args: &Args, config_file: &Path) -> Config {
    let mut config = match read_config(config_file) {
        Ok(config) => config,
        Err(err) => {
            // the logger is not configured yet
            init_logger(args.log_level.as_deref(), None);
            exit!("{err}");
        }
    };
    if let Some(port) = args.port {
        config.api.port = port;
    }
    config.update_runtime();
    config
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config_file = get_config_file(&args);
    let config = load_config(&args, &config_file);

    init_logger(args.log_level.as_deref(), config.log_level());

    if args.healthcheck {
        let healthy = healthcheck(&config).await;
        std::process::exit(i32::from(!healthy));
    }

    info!("Version: {VERSION}");
    info!("Current time: {}", chrono::offset::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("Config file: {}", config_file.display());

    if let Err(err) = api::main_api::start_server(Arc::new(config)).await {
        exit!("Can't start server: {err}");
    }
}

fn is_healthy(body: &str) -> bool {
    matches!(serde_json::from_str::<Healthcheck>(body), Ok(check) if check.status == "ok")
}

async fn healthcheck(config: &Config) -> bool {
    let host = if config.api.host == "0.0.0.0" { "localhost" } else { config.api.host.as_str() };
    match reqwest::Client::new()
        .get(format!("http://{host}:{}/healthcheck", config.api.port))
        .send()
        .await
    {
        Ok(response) => match response.text().await {
            Ok(body) => is_healthy(&body),
            Err(err) => {
                error!("Healthcheck failed {err}");
                false
            }
        },
        Err(err) => {
            error!("Healthcheck failed {err}");
            false
        }
    }
}
