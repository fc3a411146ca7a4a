use crate::{
    labels,
    text_table::{Alignment, TextTableBuilder},
};
use divvy_application::{MemberDirectory, SettlementResult};
use divvy_domain::{Balance, BalanceBreakdown, MemberId, Money, Transfer};
use std::borrow::Cow;

pub struct SettlementPresenter;

#[derive(Debug)]
pub struct SettlementView {
    pub balance_table: String,
    /// `None` when nobody needs to pay anybody.
    pub transfer_table: Option<String>,
}

impl SettlementView {
    pub fn to_text(&self) -> String {
        let transfers = self.transfer_table.as_deref().unwrap_or(labels::ALL_SETTLED);
        format!("{}\n{transfers}", self.balance_table)
    }
}

impl SettlementPresenter {
    /// Renders with the member names carried by the balances.
    pub fn render(result: &SettlementResult) -> SettlementView {
        let directory = BalanceDirectory(&result.balances);
        Self::render_with_members(result, &directory)
    }

    pub fn render_with_members(
        result: &SettlementResult,
        member_directory: &dyn MemberDirectory,
    ) -> SettlementView {
        let balance_table =
            Self::build_balance_table(&result.balances, &result.breakdowns, member_directory);

        let transfer_table = if result.transfers.is_empty() {
            None
        } else {
            Some(Self::build_transfer_table(
                &result.transfers,
                member_directory,
            ))
        };

        SettlementView {
            balance_table,
            transfer_table,
        }
    }

    pub fn build_balance_table(
        balances: &[Balance],
        breakdowns: &[BalanceBreakdown],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(labels::MEMBER),
                Cow::Borrowed(labels::PAID),
                Cow::Borrowed(labels::SHARE),
                Cow::Borrowed(labels::BALANCE),
            ]);

        for (idx, balance) in balances.iter().enumerate() {
            let breakdown = breakdowns
                .get(idx)
                .filter(|breakdown| breakdown.member == balance.member);
            let (paid, share) = match breakdown {
                Some(breakdown) => (
                    Cow::Owned(format_amount(breakdown.paid)),
                    Cow::Owned(format_amount(breakdown.share)),
                ),
                None => (
                    Cow::Borrowed(labels::NOT_AVAILABLE),
                    Cow::Borrowed(labels::NOT_AVAILABLE),
                ),
            };
            builder = builder.row([
                format_member_label(&balance.member, member_directory),
                paid,
                share,
                Cow::Owned(format_balance(balance)),
            ]);
        }

        builder.build()
    }

    pub fn build_transfer_table(
        transfers: &[Transfer],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(labels::FROM),
                Cow::Borrowed(labels::TO),
                Cow::Borrowed(labels::AMOUNT),
            ])
            .rows(transfers.iter().map(|transfer| {
                [
                    format_member_label(&transfer.from, member_directory),
                    format_member_label(&transfer.to, member_directory),
                    Cow::Owned(format_amount(transfer.amount)),
                ]
            }))
            .build()
    }
}

struct BalanceDirectory<'a>(&'a [Balance]);

impl MemberDirectory for BalanceDirectory<'_> {
    fn display_name(&self, member_id: &MemberId) -> Option<&str> {
        self.0
            .iter()
            .find(|balance| &balance.member == member_id)
            .map(|balance| balance.name.as_str())
    }
}

fn format_member_label<'a>(
    member_id: &MemberId,
    member_directory: &'a dyn MemberDirectory,
) -> Cow<'a, str> {
    match member_directory.display_name(member_id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("#{member_id}")),
    }
}

fn format_amount(amount: Money) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Settled balances print as a plain zero; owed money carries an explicit `+`.
fn format_balance(balance: &Balance) -> String {
    if balance.is_settled() {
        return format_amount(Money::ZERO);
    }
    let sign = if balance.amount.is_positive() { "+" } else { "" };
    format!("{sign}{}", format_amount(balance.amount))
}
