use divvy_domain::{BalanceCalculator, Expense, Member, Money, compute_balances};
use proptest::prelude::*;

const IDS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

fn members(count: usize) -> Vec<Member> {
    IDS[..count]
        .iter()
        .map(|&id| Member::new(id, id.to_uppercase()))
        .collect()
}

fn build_expenses(
    member_count: usize,
    amounts: &[i64],
    payer_indexes: &[usize],
    unequal_mask: &[bool],
    split_cents: &[i64],
) -> Vec<Expense> {
    let mut expenses = Vec::with_capacity(amounts.len());
    for (idx, &cents) in amounts.iter().enumerate() {
        let payer = IDS[payer_indexes.get(idx).copied().unwrap_or(0) % member_count];
        let id = format!("e{idx}");
        if unequal_mask.get(idx).copied().unwrap_or(false) {
            let splits: Vec<(&str, Money)> = IDS[..member_count]
                .iter()
                .enumerate()
                .map(|(offset, &member)| {
                    let cents = split_cents
                        .get((idx + offset) % split_cents.len().max(1))
                        .copied()
                        .unwrap_or(0);
                    (member, Money::new(cents, 2))
                })
                .collect();
            let total: Money = splits.iter().map(|(_, amount)| *amount).sum();
            expenses.push(Expense::unequal(id.as_str(), payer, total, splits));
        } else {
            expenses.push(Expense::equal(id.as_str(), payer, Money::new(cents, 2)));
        }
    }
    expenses
}

proptest! {
    #[test]
    fn balances_sum_to_zero(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(1i64..=1_000_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=30),
        unequal_mask in prop::collection::vec(any::<bool>(), 0..=30),
        split_cents in prop::collection::vec(0i64..=50_000, 0..=12),
    ) {
        let members = members(member_count);
        let expenses = build_expenses(member_count, &amounts, &payer_indexes, &unequal_mask, &split_cents);

        let balances = compute_balances(&members, &expenses);
        let total: Money = balances.iter().map(|balance| balance.amount).sum();

        prop_assert_eq!(balances.len(), member_count);
        prop_assert!(total.abs() < Money::new(1, 6), "total {total} is not zero");
    }

    #[test]
    fn no_expenses_means_exact_zero(member_count in 0usize..=6) {
        let balances = compute_balances(&members(member_count), &[]);

        prop_assert_eq!(balances.len(), member_count);
        for balance in &balances {
            prop_assert!(balance.amount.is_zero());
        }
    }

    #[test]
    fn equal_split_charges_every_member(
        member_count in 1usize..=6,
        payer_idx in 0usize..=5,
        cents in 1i64..=1_000_000,
    ) {
        let payer = IDS[payer_idx % member_count];
        let amount = Money::new(cents, 2);
        let share = amount.divide_among(member_count).expect("non-empty group");

        let balances = compute_balances(
            &members(member_count),
            &[Expense::equal("e1", payer, amount)],
        );

        for balance in &balances {
            let expected = if balance.member.as_str() == payer { amount - share } else { -share };
            prop_assert_eq!(balance.amount, expected);
        }
    }

    #[test]
    fn recomputation_is_idempotent(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(1i64..=1_000_000, 0..=20),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=20),
        unequal_mask in prop::collection::vec(any::<bool>(), 0..=20),
        split_cents in prop::collection::vec(0i64..=50_000, 0..=12),
    ) {
        let members = members(member_count);
        let expenses = build_expenses(member_count, &amounts, &payer_indexes, &unequal_mask, &split_cents);

        prop_assert_eq!(
            BalanceCalculator.calculate(&members, &expenses),
            BalanceCalculator.calculate(&members, &expenses)
        );
    }
}
