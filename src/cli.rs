use clap::Parser;
use std::path::PathBuf;

/// Cartmate - a price-match chat assistant service
#[derive(Parser, Debug, Clone)]
#[command(name = "cartmate", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "CARTMATE_CONFIG", default_value = "cartmate.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "CARTMATE_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "CARTMATE_PORT")]
    pub port: Option<u16>,

    /// Model identifier to start with (switchable at runtime)
    #[arg(long, env = "CARTMATE_MODEL")]
    pub model: Option<String>,
}
