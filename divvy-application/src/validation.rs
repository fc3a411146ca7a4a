use crate::{Ledger, error::LedgerValidationError};
use divvy_domain::{Expense, MemberId, Money, SETTLEMENT_TOLERANCE, SplitRule};
use fxhash::FxHashSet;

/// Caller-side checks for ledger data.
///
/// Collects every problem instead of stopping at the first one so a front end
/// can report them together.
#[derive(Clone, Copy, Debug)]
pub struct LedgerValidator {
    tolerance: Money,
}

impl LedgerValidator {
    pub fn new() -> Self {
        Self::with_tolerance(SETTLEMENT_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: Money) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn validate(&self, ledger: &Ledger) -> Result<(), Vec<LedgerValidationError>> {
        let mut errors = Vec::new();

        let mut known: FxHashSet<&MemberId> = FxHashSet::default();
        for member in ledger.members() {
            if !known.insert(&member.id) {
                errors.push(LedgerValidationError::DuplicateMember {
                    member: member.id.clone(),
                });
            }
        }

        for expense in ledger.expenses() {
            self.validate_expense(expense, &known, &mut errors);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn validate_expense(
        &self,
        expense: &Expense,
        known: &FxHashSet<&MemberId>,
        errors: &mut Vec<LedgerValidationError>,
    ) {
        if !known.contains(&expense.payer) {
            errors.push(LedgerValidationError::UnknownPayer {
                expense: expense.id.clone(),
                payer: expense.payer.clone(),
            });
        }
        if !expense.amount.is_positive() {
            errors.push(LedgerValidationError::NonPositiveAmount {
                expense: expense.id.clone(),
                amount: expense.amount,
            });
        }

        let SplitRule::Unequal(splits) = &expense.split else {
            return;
        };
        if splits.is_empty() {
            errors.push(LedgerValidationError::EmptySplits {
                expense: expense.id.clone(),
            });
            return;
        }

        for split in splits {
            if !known.contains(&split.member) {
                errors.push(LedgerValidationError::UnknownSplitMember {
                    expense: expense.id.clone(),
                    member: split.member.clone(),
                });
            }
            if !split.amount.is_positive() {
                errors.push(LedgerValidationError::NonPositiveSplit {
                    expense: expense.id.clone(),
                    member: split.member.clone(),
                    amount: split.amount,
                });
            }
        }

        let Some(actual) = splits
            .iter()
            .try_fold(Money::ZERO, |sum, split| sum.checked_add(split.amount))
        else {
            errors.push(LedgerValidationError::SplitSumOverflow {
                expense: expense.id.clone(),
            });
            return;
        };
        let matches = actual
            .checked_sub(expense.amount)
            .is_some_and(|diff| diff.is_settled_within(self.tolerance));
        if !matches {
            errors.push(LedgerValidationError::SplitSumMismatch {
                expense: expense.id.clone(),
                expected: expense.amount,
                actual,
            });
        }
    }
}

impl Default for LedgerValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use divvy_domain::{ExpenseId, Member};
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn validator() -> LedgerValidator {
        LedgerValidator::default()
    }

    fn members() -> Vec<Member> {
        vec![Member::new("a", "A"), Member::new("b", "B")]
    }

    #[rstest]
    #[case::equal(Expense::equal("e1", "a", Money::from_i64(90)))]
    #[case::unequal_exact(Expense::unequal(
        "e1",
        "a",
        Money::from_i64(100),
        [("a", Money::from_i64(30)), ("b", Money::from_i64(70))],
    ))]
    #[case::unequal_within_tolerance(Expense::unequal(
        "e1",
        "b",
        Money::from_i64(10),
        [("a", Money::new(333, 2)), ("b", Money::new(667, 2)), ("a", Money::new(1, 3))],
    ))]
    fn accepts_consistent_expenses(validator: LedgerValidator, #[case] expense: Expense) {
        let ledger = Ledger::new(members(), vec![expense]);
        assert_eq!(validator.validate(&ledger), Ok(()));
    }

    #[rstest]
    #[case::unknown_payer(
        Expense::equal("e1", "z", Money::from_i64(10)),
        vec![LedgerValidationError::UnknownPayer {
            expense: ExpenseId::from("e1"),
            payer: MemberId::from("z"),
        }]
    )]
    #[case::zero_amount(
        Expense::equal("e1", "a", Money::ZERO),
        vec![LedgerValidationError::NonPositiveAmount {
            expense: ExpenseId::from("e1"),
            amount: Money::ZERO,
        }]
    )]
    #[case::empty_splits(
        Expense::unequal("e1", "a", Money::from_i64(10), Vec::<(&str, Money)>::new()),
        vec![LedgerValidationError::EmptySplits { expense: ExpenseId::from("e1") }]
    )]
    #[case::split_sum_mismatch(
        Expense::unequal("e1", "a", Money::from_i64(100), [("a", Money::from_i64(30)), ("b", Money::from_i64(60))]),
        vec![LedgerValidationError::SplitSumMismatch {
            expense: ExpenseId::from("e1"),
            expected: Money::from_i64(100),
            actual: Money::from_i64(90),
        }]
    )]
    #[case::unknown_split_member_and_negative_share(
        Expense::unequal("e1", "a", Money::from_i64(10), [("z", Money::from_i64(15)), ("b", Money::from_i64(-5))]),
        vec![
            LedgerValidationError::UnknownSplitMember {
                expense: ExpenseId::from("e1"),
                member: MemberId::from("z"),
            },
            LedgerValidationError::NonPositiveSplit {
                expense: ExpenseId::from("e1"),
                member: MemberId::from("b"),
                amount: Money::from_i64(-5),
            },
        ]
    )]
    #[case::zero_share(
        Expense::unequal("e1", "a", Money::from_i64(10), [("a", Money::from_i64(10)), ("b", Money::ZERO)]),
        vec![LedgerValidationError::NonPositiveSplit {
            expense: ExpenseId::from("e1"),
            member: MemberId::from("b"),
            amount: Money::ZERO,
        }]
    )]
    #[case::split_sum_overflow(
        Expense::unequal(
            "e1",
            "a",
            Money::from_i64(10),
            [("a", Money::from_decimal(Decimal::MAX)), ("b", Money::from_decimal(Decimal::MAX))],
        ),
        vec![LedgerValidationError::SplitSumOverflow { expense: ExpenseId::from("e1") }]
    )]
    fn reports_expense_problems(
        validator: LedgerValidator,
        #[case] expense: Expense,
        #[case] expected: Vec<LedgerValidationError>,
    ) {
        let ledger = Ledger::new(members(), vec![expense]);
        assert_eq!(validator.validate(&ledger), Err(expected));
    }

    #[rstest]
    fn reports_duplicate_members(validator: LedgerValidator) {
        let ledger = Ledger::new(
            vec![Member::new("a", "A"), Member::new("a", "Again")],
            Vec::new(),
        );
        assert_eq!(
            validator.validate(&ledger),
            Err(vec![LedgerValidationError::DuplicateMember {
                member: MemberId::from("a"),
            }])
        );
    }

    #[test]
    fn zero_tolerance_accepts_exact_shares() {
        let validator = LedgerValidator::with_tolerance(Money::ZERO);
        let ledger = Ledger::new(
            members(),
            vec![Expense::unequal(
                "e1",
                "a",
                Money::new(1000, 2),
                [("a", Money::new(333, 2)), ("b", Money::new(667, 2))],
            )],
        );
        assert_eq!(validator.validate(&ledger), Ok(()));
    }

    #[test]
    fn error_messages_name_the_expense() {
        let error = LedgerValidationError::SplitSumMismatch {
            expense: ExpenseId::from("taxi"),
            expected: Money::from_i64(100),
            actual: Money::from_i64(90),
        };
        assert_eq!(
            error.to_string(),
            "expense 'taxi' shares add up to 90, expected 100"
        );
    }
}
