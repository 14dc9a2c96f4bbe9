use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::error::ServerError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ASSETS_PATH: &str = "assets";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML file with defaults for the options below.
    #[arg(long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory the frontend is served from.
    #[arg(short, long, env = "ASSETS_PATH")]
    pub assets_path: Option<PathBuf>,

    #[arg(short, long, value_enum, env = "APP_ENVIRONMENT")]
    pub environment: Option<Environment>,

    #[arg(short, long, env = "KEY_FILE_PATH")]
    pub key_file_path: Option<PathBuf>,

    #[arg(short, long, env = "CERT_FILE_PATH")]
    pub cert_file_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    assets_path: Option<PathBuf>,
    environment: Option<Environment>,
    key_file_path: Option<PathBuf>,
    cert_file_path: Option<PathBuf>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<FileConfig, ServerError> {
        let text = std::fs::read_to_string(path).map_err(|source| ServerError::ReadConfig {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ServerError::ParseConfig {
            path: path.to_owned(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TlsConfig {
    pub key_file_path: PathBuf,
    pub cert_file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub assets_path: PathBuf,
    pub environment: Environment,
    pub tls: Option<TlsConfig>,
}

impl ServerConfig {
    /// Command line (and environment variables) win over the config file,
    /// which wins over the built in defaults.
    pub fn load(args: Args) -> Result<ServerConfig, ServerError> {
        let file = match &args.config {
            Some(path) => {
                log::debug!("reading config from {}", path.display());
                FileConfig::read(path)?
            }
            None => FileConfig::default(),
        };
        ServerConfig::merge(args, file)
    }

    fn merge(args: Args, file: FileConfig) -> Result<ServerConfig, ServerError> {
        let key_file_path = args.key_file_path.or(file.key_file_path);
        let cert_file_path = args.cert_file_path.or(file.cert_file_path);
        let tls = match (key_file_path, cert_file_path) {
            (Some(key_file_path), Some(cert_file_path)) => Some(TlsConfig {
                key_file_path,
                cert_file_path,
            }),
            (Some(_), None) => return Err(ServerError::MissingCertificate),
            (None, Some(_)) => return Err(ServerError::MissingKey),
            (None, None) => None,
        };

        Ok(ServerConfig {
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            assets_path: args
                .assets_path
                .or(file.assets_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_PATH)),
            environment: args.environment.or(file.environment).unwrap_or_default(),
            tls,
        })
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
