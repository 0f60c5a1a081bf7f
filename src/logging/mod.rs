#[cfg(test)]
mod tests;

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::stderr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer, Registry};

/// Target of the one-line-per-request access log events.
pub const ACCESS_TARGET: &str = "access";
pub const ACCESS_LOG: &str = "access.log";
pub const DEBUG_LOG: &str = "debug.log";

pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber: stderr at `level`, plus log files when `log_dir` is set.
pub fn init(level: LevelFilter, log_dir: Option<&Path>) -> Result<()> {
    let mut layers = vec![terminal_layer(level)];

    if let Some(log_dir) = log_dir {
        layers.extend(file_layers(log_dir)?);
    }

    tracing_subscriber::registry()
        .with(layers)
        .init();

    Ok(())
}

fn terminal_layer(level: LevelFilter) -> BoxedLayer {
    fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level)
        .boxed()
}

/// `access.log` receives only access events at info and above; `debug.log` receives everything
/// at debug and above.
pub fn file_layers(log_dir: &Path) -> Result<Vec<BoxedLayer>> {
    create_dir_all(log_dir)
        .with_context(|| format!("unable to create log dir {}", log_dir.display()))?;

    let access = open_log(&log_dir.join(ACCESS_LOG))?;
    let debug = open_log(&log_dir.join(DEBUG_LOG))?;

    let access_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(access))
        .with_filter(LevelFilter::INFO)
        .with_filter(filter_fn(|metadata| metadata.target() == ACCESS_TARGET))
        .boxed();

    let debug_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(debug))
        .with_filter(LevelFilter::DEBUG)
        .boxed();

    Ok(vec![access_layer, debug_layer])
}

fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("unable to open log file {}", path.display()))
}
