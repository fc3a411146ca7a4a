use crate::{
    error::{LedgerParseError, LedgerValidationError},
    model::{Ledger, SettlementResult},
    ports::LedgerParser,
    validation::LedgerValidator,
};
use divvy_domain::{
    BalanceCalculator, Money, SETTLEMENT_TOLERANCE, SettlementPlanner, apply_transfers,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessorOptions {
    /// Reject ledgers that fail validation instead of computing best-effort balances.
    pub strict: bool,
    pub tolerance: Money,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            strict: false,
            tolerance: SETTLEMENT_TOLERANCE,
        }
    }
}

#[derive(Clone, Copy)]
pub struct LedgerProcessor<'a> {
    parser: &'a dyn LedgerParser,
    options: ProcessorOptions,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Success(Ledger),
    SyntaxError {
        line: usize,
        column: usize,
        detail: String,
    },
    UnknownSplitType {
        expense: String,
        value: String,
    },
    InvalidLedger(Vec<LedgerValidationError>),
}

impl<'a> LedgerProcessor<'a> {
    pub fn new(parser: &'a dyn LedgerParser) -> Self {
        Self::with_options(parser, ProcessorOptions::default())
    }

    pub fn with_options(parser: &'a dyn LedgerParser, options: ProcessorOptions) -> Self {
        Self { parser, options }
    }

    pub fn parse_ledger(&self, content: &str) -> ProcessingOutcome {
        let ledger = match self.parser.parse(content) {
            Ok(ledger) => ledger,
            Err(err) => return Self::map_parse_error(err),
        };

        match LedgerValidator::with_tolerance(self.options.tolerance).validate(&ledger) {
            Ok(()) => ProcessingOutcome::Success(ledger),
            Err(errors) if self.options.strict => ProcessingOutcome::InvalidLedger(errors),
            Err(errors) => {
                for error in &errors {
                    tracing::warn!(%error, "ledger accepted with inconsistent data");
                }
                ProcessingOutcome::Success(ledger)
            }
        }
    }

    pub fn build_settlement_result(&self, ledger: &Ledger) -> SettlementResult {
        let calculator = BalanceCalculator;
        let balances = calculator.calculate(ledger.members(), ledger.expenses());
        let breakdowns = calculator.breakdown(ledger.members(), ledger.expenses());
        let transfers = SettlementPlanner::with_tolerance(self.options.tolerance).plan(&balances);

        let residual = apply_transfers(&balances, &transfers);
        for (member, amount) in &residual {
            if !amount.is_settled_within(self.options.tolerance) {
                tracing::warn!(
                    %member,
                    %amount,
                    "balance left open after settlement, ledger does not sum to zero"
                );
            }
        }

        tracing::debug!(
            member_count = balances.len(),
            expense_count = ledger.expenses().len(),
            transfer_count = transfers.len(),
            "settlement result built"
        );

        SettlementResult {
            balances,
            breakdowns,
            transfers,
        }
    }

    fn map_parse_error(err: LedgerParseError) -> ProcessingOutcome {
        match err {
            LedgerParseError::Syntax {
                line,
                column,
                detail,
            } => ProcessingOutcome::SyntaxError {
                line,
                column,
                detail,
            },
            LedgerParseError::UnknownSplitType { expense, value } => {
                ProcessingOutcome::UnknownSplitType { expense, value }
            }
        }
    }
}
