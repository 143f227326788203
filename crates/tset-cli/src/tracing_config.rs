//! Tracing setup for the `tset` binary.
//!
//! `TSET_LOG` holds an `EnvFilter` directive (falling back to `RUST_LOG`);
//! `TSET_LOG_FORMAT` picks the output:
//!
//! ```bash
//! TSET_LOG=debug tset check unit.json                      # flat lines
//! TSET_LOG=tset_solver=trace TSET_LOG_FORMAT=tree tset check unit.json
//! TSET_LOG=debug TSET_LOG_FORMAT=json tset check unit.json # one object per event
//! ```
//!
//! Nothing is installed when no filter variable is set. Output goes to
//! stderr, leaving stdout to the type-set report.

use std::str::FromStr;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_VAR: &str = "TSET_LOG";
pub const LOG_FORMAT_VAR: &str = "TSET_LOG_FORMAT";
const FALLBACK_LOG_VAR: &str = "RUST_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    /// Indented span tree via `tracing-tree`.
    Tree,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(LogFormat::Text),
            "tree" => Ok(LogFormat::Tree),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format `{other}` (expected text, tree or json)")),
        }
    }
}

/// What to install, decided from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub directives: String,
    pub format: LogFormat,
}

impl TracingConfig {
    /// Read the configuration through `var`. Returns `None` when neither
    /// filter variable is set. An unknown format falls back to text.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let directives = var(LOG_VAR).or_else(|| var(FALLBACK_LOG_VAR))?;
        let format = var(LOG_FORMAT_VAR)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        Some(TracingConfig { directives, format })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::builder().parse_lossy(&self.directives)
    }

    /// Install the global subscriber. Fails if one is already set.
    pub fn install(&self) -> Result<(), tracing_subscriber::util::TryInitError> {
        let registry = Registry::default().with(self.filter());
        match self.format {
            LogFormat::Text => registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Tree => registry
                .with(
                    tracing_tree::HierarchicalLayer::default()
                        .with_indent_amount(2)
                        .with_indent_lines(true)
                        .with_deferred_spans(true)
                        .with_targets(true),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
        }
    }
}

/// Install tracing if `TSET_LOG` or `RUST_LOG` asks for it.
pub fn init_tracing() {
    if let Some(config) = TracingConfig::from_env() {
        // Keep a subscriber that is already installed.
        let _ = config.install();
    }
}
