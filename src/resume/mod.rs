//! The monthly resume: a month's expenses broken down by category.

mod chart;
mod handlers;

pub use handlers::get_resume_page;
