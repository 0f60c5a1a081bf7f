use super::{file_layers, ACCESS_LOG, ACCESS_TARGET, DEBUG_LOG};

use std::fs;

use anyhow::Result;
use tempfile::TempDir;
use tracing::{debug, info, trace};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

#[test]
fn test_file_layers_split_access_and_debug_logs() -> Result<()> {
    let log_dir = TempDir::new()?;
    let subscriber = Registry::default().with(file_layers(log_dir.path())?);

    tracing::subscriber::with_default(subscriber, || {
        info!(target: ACCESS_TARGET, "GET /health 200");
        debug!("Report stage Start -> Parsed");
        trace!("too chatty for any file");
    });

    let access = fs::read_to_string(log_dir.path().join(ACCESS_LOG))?;
    let debug = fs::read_to_string(log_dir.path().join(DEBUG_LOG))?;

    assert!(access.contains("GET /health 200"));
    assert!(!access.contains("Report stage"));
    assert!(debug.contains("Report stage Start -> Parsed"));
    assert!(debug.contains("GET /health 200"));
    assert!(!debug.contains("too chatty"));

    Ok(())
}

#[test]
fn test_file_layers_append_to_existing_logs() -> Result<()> {
    let log_dir = TempDir::new()?;
    fs::write(log_dir.path().join(DEBUG_LOG), "earlier line\n")?;

    let subscriber = Registry::default().with(file_layers(log_dir.path())?);

    tracing::subscriber::with_default(subscriber, || {
        debug!("later line");
    });

    let debug = fs::read_to_string(log_dir.path().join(DEBUG_LOG))?;

    assert!(debug.starts_with("earlier line\n"));
    assert!(debug.contains("later line"));

    Ok(())
}
