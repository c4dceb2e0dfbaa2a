use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(version, about, long_about=None)]
pub struct CliOpts {
    #[arg(
        long,
        env = "ECOAI_HOST",
        default_value = "localhost",
        help = "Host to bind to"
    )]
    pub host: String,

    #[arg(long, env = "ECOAI_PORT", default_value = "5000", help = "Port to bind to")]
    pub port: u16,

    #[arg(
        long,
        env = "DATASET_PATH",
        default_value = "data/dataset.csv",
        help = "Reference dataset (CSV) to load at start-up"
    )]
    pub dataset_path: PathBuf,

    #[arg(long, env = "CORS_ALLOW_ORIGIN", help = "CORS Allow Origin")]
    pub cors_allow_origin: Option<String>,

    #[arg(
        long,
        env = "REQUEST_TIMEOUT_SECS",
        default_value = "30",
        help = "Seconds before an in-flight request is aborted"
    )]
    pub request_timeout_secs: u64,

    #[arg(
        long,
        value_enum,
        env = "TRACING_LEVEL",
        default_value = "info",
        help = "Tracing level, it can be overridden by *RUST_LOG* env var"
    )]
    pub tracing_level: TracingLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TracingLevel {
    Off,
    Info,
    Debug,
    Trace,
}

impl From<TracingLevel> for LevelFilter {
    fn from(level: TracingLevel) -> Self {
        match level {
            TracingLevel::Off => Self::OFF,
            TracingLevel::Info => Self::INFO,
            TracingLevel::Debug => Self::DEBUG,
            TracingLevel::Trace => Self::TRACE,
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}
