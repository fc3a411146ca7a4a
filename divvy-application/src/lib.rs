#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod ledger_processor;
pub mod model;
pub mod ports;
pub mod validation;

pub use error::{LedgerParseError, LedgerValidationError};
pub use ledger_processor::{LedgerProcessor, ProcessingOutcome, ProcessorOptions};
pub use model::{Ledger, SettlementResult};
pub use ports::{LedgerParser, MemberDirectory};
pub use validation::LedgerValidator;
