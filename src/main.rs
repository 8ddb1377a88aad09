mod bot;
mod commands;
mod config;
mod domain;
mod engine;
mod notification;
mod scheduler;

use bot::{Bot, BotConfig};
use config::Config;
use std::env;
use std::path::Path;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

fn parse_config_path() -> String {
    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            return path.to_string();
        }
    }
    DEFAULT_CONFIG_PATH.to_string()
}

fn parse_seed() -> Result<Option<u64>, String> {
    for arg in env::args().skip(1) {
        if let Some(raw) = arg.strip_prefix("--seed=") {
            return raw
                .parse()
                .map(Some)
                .map_err(|_| format!("invalid --seed value: {}", raw));
        }
    }
    Ok(None)
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    // stdout belongs to the console view
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config_path = parse_config_path();
    let seed = match parse_seed() {
        Ok(seed) => seed,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let config = match Config::load_or_default(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return;
        }
    };

    init_tracing(config.app.log_level.as_deref());

    if !Path::new(&config_path).exists() {
        info!(config = %config_path, "Config file not found, running with defaults");
    }

    let env = config.app.env.clone();
    let bot = match Bot::new(BotConfig::new(config).with_seed(seed)) {
        Ok(bot) => bot,
        Err(e) => {
            eprintln!("Failed to create bot: {}", e);
            return;
        }
    };

    info!(config = %config_path, env = %env, "Bot initialized");

    if let Err(e) = bot.start().await {
        error!(error = %e, "Bot error");
        return;
    }

    println!("Type 'help' for commands.");

    let reason = tokio::select! {
        result = commands::run_console(&bot, tokio::io::stdin()) => match result {
            Ok(()) => "operator quit",
            Err(e) => {
                error!(error = %e, "Console input failed");
                "console error"
            }
        },
        _ = tokio::signal::ctrl_c() => "interrupted",
    };

    let _ = bot.shutdown(reason).await;

    // a pending stdin read would otherwise hold up runtime shutdown
    std::process::exit(0);
}
