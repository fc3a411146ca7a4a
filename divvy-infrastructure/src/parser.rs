use arcstr::ArcStr;
use divvy_application::{Ledger, LedgerParseError, LedgerParser};
use divvy_domain::{Expense, ExpenseId, Member, MemberId, Money, Split, SplitRule};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Reads a ledger from a JSON document:
///
/// ```json
/// {
///   "members": [{ "id": "a", "name": "Alice" }],
///   "expenses": [
///     { "id": "e1", "payerId": "a", "amount": 90, "splitType": "equal" },
///     { "id": "e2", "payerId": "a", "amount": "12.50", "splitType": "unequal",
///       "splits": [{ "memberId": "a", "amount": 12.5 }] }
///   ]
/// }
/// ```
#[derive(Default)]
pub struct JsonLedgerParser;

#[derive(Deserialize)]
struct LedgerDocument {
    #[serde(default)]
    members: Vec<MemberRecord>,
    #[serde(default)]
    expenses: Vec<ExpenseRecord>,
}

#[derive(Deserialize)]
struct MemberRecord {
    id: ArcStr,
    name: ArcStr,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseRecord {
    id: ArcStr,
    payer_id: ArcStr,
    amount: Decimal,
    split_type: String,
    #[serde(default)]
    splits: Vec<SplitRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SplitRecord {
    member_id: ArcStr,
    amount: Decimal,
}

impl LedgerParser for JsonLedgerParser {
    fn parse(&self, content: &str) -> Result<Ledger, LedgerParseError> {
        let document: LedgerDocument =
            serde_json::from_str(content).map_err(|err| LedgerParseError::Syntax {
                line: err.line(),
                column: err.column(),
                detail: err.to_string(),
            })?;

        let members = document
            .members
            .into_iter()
            .map(|record| Member {
                id: MemberId(record.id),
                name: record.name,
            })
            .collect();
        let expenses = document
            .expenses
            .into_iter()
            .map(to_expense)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Ledger::new(members, expenses))
    }
}

fn to_expense(record: ExpenseRecord) -> Result<Expense, LedgerParseError> {
    let split = if record.split_type.eq_ignore_ascii_case("equal") {
        SplitRule::Equal
    } else if record.split_type.eq_ignore_ascii_case("unequal") {
        SplitRule::Unequal(
            record
                .splits
                .into_iter()
                .map(|split| Split {
                    member: MemberId(split.member_id),
                    amount: Money::from_decimal(split.amount),
                })
                .collect(),
        )
    } else {
        return Err(LedgerParseError::UnknownSplitType {
            expense: record.id.to_string(),
            value: record.split_type,
        });
    };

    Ok(Expense {
        id: ExpenseId(record.id),
        payer: MemberId(record.payer_id),
        amount: Money::from_decimal(record.amount),
        split,
    })
}
