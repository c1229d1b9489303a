//! CLI configuration groups

use clap::Args;
use tls_sig::{Issuer, IssuerConfig, identifier::validate_identifier};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        global = true,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact
    )]
    pub log_format: LogFormat,
}

/// Issuer settings shared by the issuing commands.
#[derive(Debug, Args)]
pub(crate) struct IssuerArgs {
    /// Application id assigned by the platform
    #[arg(long, env = "TLS_SDK_APP_ID")]
    pub sdk_app_id: u32,

    /// Shared secret key
    #[arg(long, env = "TLS_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Reject identifiers outside the documented charset and length
    #[arg(long)]
    pub strict_identifier: bool,
}

impl IssuerArgs {
    pub(crate) fn issuer(&self) -> Result<Issuer, String> {
        IssuerConfig::new(self.sdk_app_id, &self.secret_key)
            .map(Issuer::new)
            .map_err(|error| format!("invalid issuer configuration: {error}"))
    }

    pub(crate) fn check_identifier(&self, identifier: &str) -> Result<(), String> {
        if !self.strict_identifier {
            return Ok(());
        }

        validate_identifier(identifier).map_err(|error| format!("invalid identifier: {error}"))
    }
}
