use clap::Parser;
use std::env;

const STRICT_ENV: &str = "DIVVY_STRICT";

/// Print balances and suggested settlements for a ledger file
#[derive(Debug, Parser)]
#[command(name = "divvy")]
pub struct Args {
    /// Path to the JSON ledger
    pub ledger: String,

    /// Reject inconsistent ledgers instead of reporting best-effort balances
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub path: String,
    pub strict: bool,
}

impl InterpreterConfig {
    /// Reads `.env` if present, then the process arguments and environment.
    ///
    /// Exits with clap's usage message on invalid arguments or `--help`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let strict_env = env::var(STRICT_ENV).ok();
        Self::from_args(Args::parse(), strict_env.as_deref())
    }

    /// `DIVVY_STRICT` can only switch strict mode on; the flag wins otherwise.
    pub fn from_args(args: Args, strict_env: Option<&str>) -> Self {
        Self {
            path: args.ledger,
            strict: args.strict || strict_env.is_some_and(is_truthy),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
