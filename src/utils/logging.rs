use crate::utils::LOG_ENV_VAR;
use env_logger::{Builder, Target};
use log::{info, LevelFilter};

const LOG_ERROR_LEVEL_MOD: &[&str] = &[
    "reqwest::async_impl::client",
    "reqwest::connect",
    "hyper_util::client",
];

fn get_log_level(log_level: &str) -> LevelFilter {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        // "info" => LevelFilter::Info,
        _ => LevelFilter::Info,
    }
}

/// Resolves the effective level string.
/// Priority: CLI argument, env var, config file, default `info`.
pub fn resolve_log_level(user_log_level: Option<&str>, env_log_level: Option<String>, config_log_level: Option<&str>) -> String {
    user_log_level
        .map(ToString::to_string)
        .or(env_log_level)
        .or_else(|| config_log_level.map(ToString::to_string))
        .unwrap_or_else(|| "info".to_string())
}

fn apply_log_levels(log_builder: &mut Builder, log_level: &str) -> Vec<String> {
    let mut log_levels = vec![];
    if log_level.contains('=') {
        for pair in log_level.split(',') {
            if pair.contains('=') {
                let mut kv_iter = pair.split('=').map(str::trim);
                if let (Some(module), Some(level)) = (kv_iter.next(), kv_iter.next()) {
                    let log_level = get_log_level(level);
                    log_levels.push(format!("{module}={log_level}"));
                    log_builder.filter_module(module, log_level);
                }
            } else {
                let level = get_log_level(pair);
                log_levels.push(level.to_string());
                log_builder.filter_level(level);
            }
        }
    } else {
        let level = get_log_level(log_level);
        log_builder.filter_level(level);
        log_levels.push(level.to_string());
    }
    log_levels
}

pub fn init_logger(user_log_level: Option<&str>, config_log_level: Option<&str>) {
    let env_log_level = std::env::var(LOG_ENV_VAR).ok();

    let mut log_builder = Builder::from_default_env();
    log_builder.target(Target::Stdout);

    let log_level = resolve_log_level(user_log_level, env_log_level, config_log_level);
    let log_levels = apply_log_levels(&mut log_builder, &log_level);
    for module in LOG_ERROR_LEVEL_MOD {
        log_builder.filter_module(module, LevelFilter::Error);
    }
    // a second init (tests) must not panic
    if log_builder.try_init().is_ok() {
        info!("Log Level {}", &log_levels.join(", "));
    }
}
