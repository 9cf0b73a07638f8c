//! Server configuration

use std::path::PathBuf;

/// Flat, read-only record of the CLI-supplied settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Model name assigned by the serving backend
    pub model_name: String,

    /// Inference protocol; only "v1" is accepted and it is not consulted
    /// further once validated
    pub api_protocol: String,

    /// Optional predictor plugin library path
    pub predictor_file: Option<PathBuf>,

    /// Listen address
    pub listen: String,

    /// Listen port
    pub port: u16,
}

impl ServerConfig {
    /// Build the configuration record from parsed CLI arguments
    pub fn from_cli(cli: crate::Cli) -> Self {
        Self {
            model_name: cli.model_name,
            api_protocol: cli.api_protocol,
            predictor_file: cli.file,
            listen: cli.listen,
            port: cli.port,
        }
    }
}
