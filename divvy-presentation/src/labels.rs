pub const MEMBER: &str = "Member";
pub const PAID: &str = "Paid";
pub const SHARE: &str = "Share";
pub const BALANCE: &str = "Balance";
pub const FROM: &str = "From";
pub const TO: &str = "To";
pub const AMOUNT: &str = "Amount";
pub const ALL_SETTLED: &str = "Everyone is settled up.";
pub const NOT_AVAILABLE: &str = "-";
