//! Transactions: the model, the per-user store, and the pages for registering them.

mod clear_endpoint;
mod core;
mod create_endpoint;
mod create_page;
mod form;
mod store;

pub use clear_endpoint::clear_transactions_endpoint;
pub use core::{Transaction, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use store::{append_transaction, clear_transactions, get_transactions, transactions_key};
