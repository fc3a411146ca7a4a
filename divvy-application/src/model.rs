use divvy_domain::{Balance, BalanceBreakdown, Expense, Member, Transfer};

/// A consistent snapshot of one group's members and expenses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    members: Vec<Member>,
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new(members: Vec<Member>, expenses: Vec<Expense>) -> Self {
        Self { members, expenses }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementResult {
    pub balances: Vec<Balance>,
    pub breakdowns: Vec<BalanceBreakdown>,
    pub transfers: Vec<Transfer>,
}
