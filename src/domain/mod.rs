//! Domain vocabulary shared by the wizard and schedule modules.

pub mod account;
pub mod transaction;

pub use account::{find_account, Account};
pub use transaction::{Frequency, TransactionMode, TransactionType, Visibility};
