use divvy_domain::{ExpenseId, MemberId, Money};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerParseError {
    #[error("syntax error at line {line}, column {column}: {detail}")]
    Syntax {
        line: usize,
        column: usize,
        detail: String,
    },
    #[error("expense '{expense}' has unknown split type '{value}'")]
    UnknownSplitType { expense: String, value: String },
}

/// Problems a caller may want to reject before balances are computed.
///
/// The balance engine itself tolerates all of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerValidationError {
    #[error("member '{member}' is declared more than once")]
    DuplicateMember { member: MemberId },
    #[error("expense '{expense}' is paid by unknown member '{payer}'")]
    UnknownPayer { expense: ExpenseId, payer: MemberId },
    #[error("expense '{expense}' has non-positive amount {amount}")]
    NonPositiveAmount { expense: ExpenseId, amount: Money },
    #[error("expense '{expense}' is split unequally but lists no shares")]
    EmptySplits { expense: ExpenseId },
    #[error("expense '{expense}' assigns a share to unknown member '{member}'")]
    UnknownSplitMember { expense: ExpenseId, member: MemberId },
    #[error("expense '{expense}' assigns a non-positive share {amount} to '{member}'")]
    NonPositiveSplit {
        expense: ExpenseId,
        member: MemberId,
        amount: Money,
    },
    #[error("expense '{expense}' shares add up to {actual}, expected {expected}")]
    SplitSumMismatch {
        expense: ExpenseId,
        expected: Money,
        actual: Money,
    },
    #[error("expense '{expense}' shares add up to more than an amount can hold")]
    SplitSumOverflow { expense: ExpenseId },
}
