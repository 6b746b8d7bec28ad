use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Direction of money flow, chosen on the first wizard step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type `{}`", other)),
        }
    }
}

/// Payment structure of a transaction; selects the form strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionMode {
    /// One transaction on one date.
    Simple,
    /// One total split into N equal future-dated parcels.
    Installment,
    /// One amount repeated on a periodic schedule.
    Recurring,
}

impl TransactionMode {
    pub const ALL: [TransactionMode; 3] = [
        TransactionMode::Simple,
        TransactionMode::Installment,
        TransactionMode::Recurring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionMode::Simple => "simple",
            TransactionMode::Installment => "installment",
            TransactionMode::Recurring => "recurring",
        }
    }
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(TransactionMode::Simple),
            "installment" => Ok(TransactionMode::Installment),
            "recurring" => Ok(TransactionMode::Recurring),
            other => Err(format!("unknown transaction mode `{}`", other)),
        }
    }
}

/// Who can see a transaction inside the couple.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Shared,
    FreeSpending,
    Private,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [
        Visibility::Shared,
        Visibility::FreeSpending,
        Visibility::Private,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Shared => "SHARED",
            Visibility::FreeSpending => "FREE_SPENDING",
            Visibility::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recurrence unit for recurring transactions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_server_casing() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Expense).unwrap(),
            "\"EXPENSE\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionMode::Installment).unwrap(),
            "\"installment\""
        );
        assert_eq!(
            serde_json::to_string(&Visibility::FreeSpending).unwrap(),
            "\"FREE_SPENDING\""
        );
        assert_eq!(serde_json::to_string(&Frequency::Monthly).unwrap(), "\"MONTHLY\"");
    }

    #[test]
    fn as_str_agrees_with_serde() {
        for visibility in Visibility::ALL {
            let json = serde_json::to_value(visibility).unwrap();
            assert_eq!(json.as_str(), Some(visibility.as_str()));
        }
        for frequency in Frequency::ALL {
            let json = serde_json::to_value(frequency).unwrap();
            assert_eq!(json.as_str(), Some(frequency.as_str()));
        }
    }

    #[test]
    fn parses_mode_case_insensitively() {
        assert_eq!(" Recurring ".parse::<TransactionMode>(), Ok(TransactionMode::Recurring));
        assert!("weekly".parse::<TransactionMode>().is_err());
        assert_eq!("income".parse::<TransactionType>(), Ok(TransactionType::Income));
    }
}
