mod app;
mod catalog;
mod error;
mod form;
mod input;
mod sink;
mod slot;
mod ui;
mod util;

#[cfg(test)]
mod it_flow;

use anyhow::{bail, Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cfg = Config::from_env()?;
    init_tracing(&cfg.log_file)?;
    info!(log_file = %cfg.log_file, date_format = %cfg.date_format, "booting room-booking");

    let (tx, rx) = mpsc::unbounded_channel();
    let receiver = sink::spawn_receiver(rx, sink::LogSink);
    let mut sink = sink::ChannelSink::new(tx);

    let today = chrono::Local::now().date_naive();
    let mut app = app::App::new(today, cfg.date_format.clone(), cfg.input_max_len)
        .with_default_room(cfg.default_room);
    ui::run(&mut app, &mut sink, Duration::from_millis(cfg.tick_ms)).context("run terminal ui")?;

    drop(sink);
    let committed = receiver.await.context("join booking receiver")?;
    info!(committed, "shutting down");
    Ok(())
}

fn init_tracing(path: &str) -> Result<()> {
    // stdout belongs to the TUI, so logs go to a file
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {path}"))?;
    let env = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .init();
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Config {
    pub log_file: String,
    pub default_room: Option<&'static catalog::Room>,
    pub date_format: String,
    pub input_max_len: usize,
    pub tick_ms: u64,
}

impl Config {
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_file = get("BOOKING_LOG_FILE").unwrap_or_else(|| "room-booking.log".to_string());
        let default_room = match get("BOOKING_DEFAULT_ROOM") {
            Some(name) if !name.trim().is_empty() => Some(
                catalog::find(&name)
                    .with_context(|| format!("BOOKING_DEFAULT_ROOM names an unknown room: {name:?}"))?,
            ),
            _ => None,
        };
        let date_format = get("BOOKING_DATE_FORMAT").unwrap_or_else(|| "%d/%m/%Y".to_string());
        if !util::is_valid_date_format(&date_format) {
            bail!("BOOKING_DATE_FORMAT is not a valid strftime format: {date_format:?}");
        }
        let input_max_len = get("BOOKING_INPUT_MAX_LEN").and_then(|v| v.parse().ok()).unwrap_or(64);
        let tick_ms = get("BOOKING_TICK_MS").and_then(|v| v.parse().ok()).unwrap_or(100);
        Ok(Self { log_file, default_room, date_format, input_max_len, tick_ms })
    }
}
