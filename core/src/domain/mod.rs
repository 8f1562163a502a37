//! One handle per API area. Handles borrow the client and are cheap to create.

mod bank_account;
mod mutation;
mod tagging;
mod topup;

pub use bank_account::BankAccounts;
pub use mutation::Mutations;
pub use tagging::Tagging;
pub use topup::Topups;
