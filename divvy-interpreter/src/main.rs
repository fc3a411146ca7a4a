mod config;

use std::{borrow::Cow, fs, process};

use config::InterpreterConfig;
use divvy_application::{LedgerProcessor, ProcessingOutcome, ProcessorOptions};
use divvy_infrastructure::JsonLedgerParser;
use divvy_presentation::{SettlementPresenter, format_processing_failure};

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// Logs go to stderr, filtered by `RUST_LOG`, so stdout only carries the report.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> CliResult<()> {
    let config = InterpreterConfig::from_env();
    let source = fs::read_to_string(&config.path)
        .map_err(|err| format!("Failed to read '{}': {err}", config.path))?;

    let parser = JsonLedgerParser;
    let processor = LedgerProcessor::with_options(
        &parser,
        ProcessorOptions {
            strict: config.strict,
            ..ProcessorOptions::default()
        },
    );

    let ledger = match processor.parse_ledger(&source) {
        ProcessingOutcome::Success(ledger) => ledger,
        failure => {
            let message = format_processing_failure(&failure)
                .unwrap_or_else(|| "Failed to load ledger".to_owned());
            return Err(message.into());
        }
    };

    tracing::info!(
        path = %config.path,
        members = ledger.members().len(),
        expenses = ledger.expenses().len(),
        "ledger loaded"
    );

    let result = processor.build_settlement_result(&ledger);
    println!("{}", SettlementPresenter::render(&result).to_text());

    Ok(())
}
