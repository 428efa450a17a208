//! User domain module.
//!
//! Accounts, their email identity, and password handling.

mod account;
mod email;
mod password;

pub use account::UserAccount;
pub use email::Email;
pub use password::{check_password_policy, PasswordHash, PasswordHashError, PasswordPolicyError};
