use arcstr::ArcStr;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

/// Absolute amount under which a balance counts as settled (one minor currency unit).
///
/// Every "is this zero" decision in the workspace goes through this value so that
/// residues left by the balance engine are treated the same way by the planner.
pub const SETTLEMENT_TOLERANCE: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

/// Net balance per member, in group member order.
pub type MemberBalances = IndexMap<MemberId, Money, FxBuildHasher>;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(pub ArcStr);

impl MemberId {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExpenseId(pub ArcStr);

impl ExpenseId {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Exact decimal amount.
///
/// The arithmetic operators panic on overflow like [`Decimal`]'s. Code that sums
/// untrusted amounts uses the `checked_*` or `saturating_*` methods instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// `num * 10^-scale`.
    ///
    /// # Panics
    /// Panics if `scale` exceeds 28, the largest scale a [`Decimal`] can hold.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Whether the amount is within [`SETTLEMENT_TOLERANCE`] of zero.
    pub fn is_settled(self) -> bool {
        self.is_settled_within(SETTLEMENT_TOLERANCE)
    }

    /// Whether the amount is strictly closer to zero than `tolerance`. An exact
    /// zero is always settled, so a zero tolerance means exact matching.
    pub fn is_settled_within(self, tolerance: Money) -> bool {
        self.is_zero() || self.abs() < tolerance.abs()
    }

    /// Splits the amount into `count` equal shares. `None` when `count` is zero.
    pub fn divide_among(self, count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(count)).map(Self)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    pub fn round_dp(self, dp: u32) -> Self {
        Self(self.0.round_dp(dp))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Self)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    /// Display only; may repeat within a group.
    pub name: ArcStr,
}

impl Member {
    pub fn new(id: impl Into<ArcStr>, name: impl Into<ArcStr>) -> Self {
        Self {
            id: MemberId::new(id),
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    pub member: MemberId,
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitRule {
    /// Divided evenly across every member of the group.
    Equal,
    /// Explicit per-member shares. Their sum is expected to match the expense amount.
    Unequal(Vec<Split>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub payer: MemberId,
    pub amount: Money,
    pub split: SplitRule,
}

impl Expense {
    pub fn equal(id: impl Into<ExpenseId>, payer: impl Into<MemberId>, amount: Money) -> Self {
        Self {
            id: id.into(),
            payer: payer.into(),
            amount,
            split: SplitRule::Equal,
        }
    }

    pub fn unequal<I, M>(
        id: impl Into<ExpenseId>,
        payer: impl Into<MemberId>,
        amount: Money,
        splits: I,
    ) -> Self
    where
        I: IntoIterator<Item = (M, Money)>,
        M: Into<MemberId>,
    {
        Self {
            id: id.into(),
            payer: payer.into(),
            amount,
            split: SplitRule::Unequal(
                splits
                    .into_iter()
                    .map(|(member, amount)| Split {
                        member: member.into(),
                        amount,
                    })
                    .collect(),
            ),
        }
    }
}

/// A member's net position: positive when the group owes them, negative when they owe the group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    pub member: MemberId,
    pub name: ArcStr,
    pub amount: Money,
}

impl Balance {
    pub fn is_settled(&self) -> bool {
        self.amount.is_settled()
    }
}

/// How a member's balance was reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceBreakdown {
    pub member: MemberId,
    pub name: ArcStr,
    /// Total credited for expenses this member paid.
    pub paid: Money,
    /// Total debited for this member's portion of expenses.
    pub share: Money,
}

impl BalanceBreakdown {
    pub fn net(&self) -> Money {
        self.paid - self.share
    }
}

/// One suggested payment: `from` pays `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

#[derive(Clone, Debug)]
struct Position {
    name: ArcStr,
    paid: Money,
    share: Money,
}

/// Incremental balance accumulator over a fixed member list.
///
/// Expenses that reference ids outside the member list are applied on a
/// best-effort basis: an unknown payer receives no credit and unknown split
/// members are skipped.
pub struct BalanceAccumulator {
    positions: IndexMap<MemberId, Position, FxBuildHasher>,
}

impl BalanceAccumulator {
    pub fn new(members: &[Member]) -> Self {
        let mut positions =
            IndexMap::with_capacity_and_hasher(members.len(), FxBuildHasher::default());
        for member in members {
            positions.entry(member.id.clone()).or_insert_with(|| Position {
                name: member.name.clone(),
                paid: Money::ZERO,
                share: Money::ZERO,
            });
        }

        Self { positions }
    }

    pub fn member_count(&self) -> usize {
        self.positions.len()
    }

    /// Applies one expense. An expense whose amounts would overflow any running
    /// total is skipped as a whole, leaving every total untouched.
    pub fn apply(&mut self, expense: &Expense) {
        let mut totals: Vec<(Money, Money)> = self
            .positions
            .values()
            .map(|position| (position.paid, position.share))
            .collect();

        if self.stage(expense, &mut totals).is_none() {
            tracing::warn!(
                expense = %expense.id,
                amount = %expense.amount,
                "expense overflows the balance range, skipped"
            );
            return;
        }

        for (position, (paid, share)) in self.positions.values_mut().zip(totals) {
            position.paid = paid;
            position.share = share;
        }
    }

    fn stage(&self, expense: &Expense, totals: &mut [(Money, Money)]) -> Option<()> {
        match self.positions.get_index_of(&expense.payer) {
            Some(idx) => totals[idx].0 = totals[idx].0.checked_add(expense.amount)?,
            None => tracing::debug!(
                expense = %expense.id,
                payer = %expense.payer,
                "payer is not a group member, no credit applied"
            ),
        }

        match &expense.split {
            SplitRule::Equal => {
                if let Some(share) = expense.amount.divide_among(totals.len()) {
                    for (_, owed) in totals.iter_mut() {
                        *owed = owed.checked_add(share)?;
                    }
                }
            }
            SplitRule::Unequal(splits) => {
                for split in splits {
                    match self.positions.get_index_of(&split.member) {
                        Some(idx) => totals[idx].1 = totals[idx].1.checked_add(split.amount)?,
                        None => tracing::debug!(
                            expense = %expense.id,
                            member = %split.member,
                            "split member is not a group member, share skipped"
                        ),
                    }
                }
            }
        }

        // Net balances must stay representable too.
        for (paid, share) in totals.iter() {
            paid.checked_sub(*share)?;
        }
        Some(())
    }

    pub fn balances(&self) -> Vec<Balance> {
        self.positions
            .iter()
            .map(|(member, position)| Balance {
                member: member.clone(),
                name: position.name.clone(),
                amount: position.paid - position.share,
            })
            .collect()
    }

    pub fn breakdowns(&self) -> Vec<BalanceBreakdown> {
        self.positions
            .iter()
            .map(|(member, position)| BalanceBreakdown {
                member: member.clone(),
                name: position.name.clone(),
                paid: position.paid,
                share: position.share,
            })
            .collect()
    }

    pub fn into_balances(self) -> Vec<Balance> {
        self.positions
            .into_iter()
            .map(|(member, position)| Balance {
                member,
                name: position.name,
                amount: position.paid - position.share,
            })
            .collect()
    }
}

/// Applies a settlement plan to `balances`: each payer moves up by the amount, each
/// payee moves down. Transfers naming unknown members are skipped, and totals
/// saturate at the [`Decimal`] range.
pub fn apply_transfers(balances: &[Balance], transfers: &[Transfer]) -> MemberBalances {
    let mut residual: MemberBalances = balances
        .iter()
        .map(|balance| (balance.member.clone(), balance.amount))
        .collect();

    for transfer in transfers {
        if let Some(balance) = residual.get_mut(&transfer.from) {
            *balance = balance.saturating_add(transfer.amount);
        }
        if let Some(balance) = residual.get_mut(&transfer.to) {
            *balance = balance.saturating_sub(transfer.amount);
        }
    }

    residual
}
