use divvy_application::ProcessingOutcome;
use std::fmt::Write as _;

/// Human-readable description of a failed parse, or `None` for a successful one.
pub fn format_processing_failure(outcome: &ProcessingOutcome) -> Option<String> {
    match outcome {
        ProcessingOutcome::Success(_) => None,
        ProcessingOutcome::SyntaxError {
            line,
            column,
            detail,
        } => Some(format!(
            "Syntax error at line {line}, column {column}: {detail}"
        )),
        ProcessingOutcome::UnknownSplitType { expense, value } => Some(format!(
            "Expense '{expense}' has split type '{value}' (expected 'equal' or 'unequal')"
        )),
        ProcessingOutcome::InvalidLedger(errors) => {
            let mut message = String::from("Ledger rejected:");
            for error in errors {
                let _ = write!(message, "\n  - {error}");
            }
            Some(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use divvy_application::{Ledger, LedgerValidationError};
    use divvy_domain::{ExpenseId, MemberId};
    use rstest::rstest;

    #[rstest]
    #[case::syntax(
        ProcessingOutcome::SyntaxError {
            line: 3,
            column: 14,
            detail: "expected value".to_owned(),
        },
        "Syntax error at line 3, column 14: expected value"
    )]
    #[case::split_type(
        ProcessingOutcome::UnknownSplitType {
            expense: "e1".to_owned(),
            value: "weighted".to_owned(),
        },
        "Expense 'e1' has split type 'weighted' (expected 'equal' or 'unequal')"
    )]
    #[case::invalid_ledger(
        ProcessingOutcome::InvalidLedger(vec![
            LedgerValidationError::DuplicateMember { member: MemberId::from("a") },
            LedgerValidationError::EmptySplits { expense: ExpenseId::from("e2") },
        ]),
        "Ledger rejected:\n  - member 'a' is declared more than once\n  - expense 'e2' is split unequally but lists no shares"
    )]
    fn formats_failures(#[case] outcome: ProcessingOutcome, #[case] expected: &str) {
        assert_eq!(format_processing_failure(&outcome).as_deref(), Some(expected));
    }

    #[test]
    fn success_is_not_a_failure() {
        let outcome = ProcessingOutcome::Success(Ledger::default());
        assert!(format_processing_failure(&outcome).is_none());
    }
}
