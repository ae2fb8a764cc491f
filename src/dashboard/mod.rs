//! Dashboard module
//!
//! The landing page for signed-in users: a greeting, the income, expense and
//! balance highlight cards and the list of every transaction.

mod cards;
mod handlers;
mod list;

pub use handlers::get_dashboard_page;
