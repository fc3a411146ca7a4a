use crate::model::{Balance, BalanceAccumulator, BalanceBreakdown, Expense, Member};

/// Balance computation service
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Calculate the net balance of every member
    ///
    /// Expenses are applied in the order given. The result holds one entry per
    /// distinct member id, in the order of `members`.
    ///
    /// # Arguments
    /// * `members` - Current group members
    /// * `expenses` - Expenses logged for the group
    pub fn calculate(&self, members: &[Member], expenses: &[Expense]) -> Vec<Balance> {
        Self::accumulate(members, expenses).into_balances()
    }

    /// Same traversal as [`calculate`](Self::calculate), keeping paid and owed totals apart.
    pub fn breakdown(&self, members: &[Member], expenses: &[Expense]) -> Vec<BalanceBreakdown> {
        Self::accumulate(members, expenses).breakdowns()
    }

    fn accumulate(members: &[Member], expenses: &[Expense]) -> BalanceAccumulator {
        let mut accumulator = BalanceAccumulator::new(members);
        for expense in expenses {
            accumulator.apply(expense);
        }
        accumulator
    }
}
