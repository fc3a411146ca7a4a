use crate::model::{Balance, MemberId, Money, SETTLEMENT_TOLERANCE, Transfer};

/// Greedy debt simplification.
///
/// The largest remaining debtor is always matched against the largest remaining
/// creditor. This is not guaranteed to produce the fewest possible transfers
/// (that problem is NP-hard in general) but it is deterministic, runs in
/// O(n log n) and never emits more than `n - 1` transfers for `n` unsettled
/// balances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementPlanner {
    tolerance: Money,
}

struct Outstanding<'a> {
    member: &'a MemberId,
    /// Magnitude still to be paid or received; always positive while unsettled.
    remaining: Money,
}

impl SettlementPlanner {
    pub fn new() -> Self {
        Self::with_tolerance(SETTLEMENT_TOLERANCE)
    }

    /// Planner whose "settled" threshold is `tolerance` instead of [`SETTLEMENT_TOLERANCE`].
    pub fn with_tolerance(tolerance: Money) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// Produce the transfers that bring every balance to within tolerance of zero
    ///
    /// # Arguments
    /// * `balances` - Net balances (positive: owed money, negative: owes money)
    ///
    /// # Returns
    /// Transfers in the order they were matched
    pub fn plan(&self, balances: &[Balance]) -> Vec<Transfer> {
        let mut debtors = Vec::new();
        let mut creditors = Vec::new();
        for balance in balances {
            if balance.amount.is_settled_within(self.tolerance) {
                continue;
            }
            let outstanding = Outstanding {
                member: &balance.member,
                remaining: balance.amount.abs(),
            };
            if balance.amount.is_negative() {
                debtors.push(outstanding);
            } else {
                creditors.push(outstanding);
            }
        }

        // Stable sorts: equal magnitudes keep their input order.
        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

        let mut transfers = Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
        let (mut d, mut c) = (0, 0);
        while d < debtors.len() && c < creditors.len() {
            let debtor = &mut debtors[d];
            let creditor = &mut creditors[c];

            let amount = debtor.remaining.min(creditor.remaining);
            transfers.push(Transfer {
                from: debtor.member.clone(),
                to: creditor.member.clone(),
                amount,
            });
            debtor.remaining -= amount;
            creditor.remaining -= amount;

            if debtor.remaining.is_settled_within(self.tolerance) {
                d += 1;
            }
            if creditor.remaining.is_settled_within(self.tolerance) {
                c += 1;
            }
        }

        if d < debtors.len() || c < creditors.len() {
            tracing::debug!(
                unmatched_debtors = debtors.len() - d,
                unmatched_creditors = creditors.len() - c,
                "balances do not sum to zero, leftover positions have no counterpart"
            );
        }
        tracing::debug!(
            debtor_count = debtors.len(),
            creditor_count = creditors.len(),
            transfer_count = transfers.len(),
            "settlement planned"
        );

        transfers
    }
}

impl Default for SettlementPlanner {
    fn default() -> Self {
        Self::new()
    }
}
