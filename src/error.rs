use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to read config file {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("a key file was given without a certificate file")]
    MissingCertificate,
    #[error("a certificate file was given without a key file")]
    MissingKey,
    #[error("failed to load tls key and certificate: {0}")]
    Tls(#[source] io::Error),
    #[error("server stopped with an error: {0}")]
    Serve(#[from] io::Error),
}
