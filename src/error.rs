use std::path::PathBuf;

use thiserror::Error;

/// The source sheet could not be turned into a dataset. Fatal for the run.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("required column '{0}' is missing")]
    MissingColumn(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("incorrect username or password")]
    InvalidCredentials,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("spreadsheet writer: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("table too large for a worksheet: {0}")]
    TooLarge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
