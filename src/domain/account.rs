use serde::{Deserialize, Serialize};

/// Account record as delivered by the server; read-only within this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Joint accounts are shared by both members of the couple.
    #[serde(default)]
    pub is_joint: bool,
}

impl Account {
    pub fn joint(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_joint: true,
        }
    }

    pub fn personal(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_joint: false,
        }
    }

    pub fn display_label(&self) -> String {
        let scope = if self.is_joint { "joint" } else { "personal" };
        format!("{} ({})", self.name, scope)
    }
}

/// Looks up an account by identifier.
pub fn find_account<'a>(accounts: &'a [Account], id: &str) -> Option<&'a Account> {
    accounts.iter().find(|account| account.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_joint_flag_as_personal() {
        let account: Account = serde_json::from_str(r#"{"id":"a1","name":"Wallet"}"#).unwrap();
        assert!(!account.is_joint);
        assert_eq!(account.display_label(), "Wallet (personal)");
    }

    #[test]
    fn find_account_matches_exact_id() {
        let accounts = vec![Account::joint("a1", "House"), Account::personal("a2", "Mine")];
        assert_eq!(find_account(&accounts, "a2").map(|a| a.name.as_str()), Some("Mine"));
        assert!(find_account(&accounts, "A2").is_none());
    }
}
