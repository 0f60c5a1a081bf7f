use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unable to read upload [{}]: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Malformed CSV in upload [{}]: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: csv::Error
    }
}
