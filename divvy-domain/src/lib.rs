#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Balance, BalanceAccumulator, BalanceBreakdown, Expense, ExpenseId, Member, MemberBalances,
    MemberId, Money, SETTLEMENT_TOLERANCE, Split, SplitRule, Transfer, apply_transfers,
};
pub use services::{BalanceCalculator, SettlementPlanner};

/// Net balance of every member after applying `expenses` in order.
pub fn compute_balances(members: &[Member], expenses: &[Expense]) -> Vec<Balance> {
    BalanceCalculator.calculate(members, expenses)
}

/// Payment plan that zeroes `balances`, using [`SETTLEMENT_TOLERANCE`].
pub fn compute_settlements(balances: &[Balance]) -> Vec<Transfer> {
    SettlementPlanner::default().plan(balances)
}
