use crate::{Ledger, error::LedgerParseError};
use divvy_domain::MemberId;
use std::collections::HashMap;

pub trait LedgerParser: Send + Sync {
    fn parse(&self, content: &str) -> Result<Ledger, LedgerParseError>;
}

pub trait MemberDirectory: Send + Sync {
    fn display_name(&self, member_id: &MemberId) -> Option<&str>;
}

impl MemberDirectory for HashMap<MemberId, String> {
    fn display_name(&self, member_id: &MemberId) -> Option<&str> {
        self.get(member_id).map(String::as_str)
    }
}

impl MemberDirectory for Ledger {
    fn display_name(&self, member_id: &MemberId) -> Option<&str> {
        self.members()
            .iter()
            .find(|member| &member.id == member_id)
            .map(|member| member.name.as_str())
    }
}
