//! The API endpoints URIs.

/// The root route which redirects to the dashboard or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in users, listing their transactions.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for registering a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page with the monthly breakdown of expenses by category.
pub const RESUME_VIEW: &str = "/resume";
/// The page for viewing and editing the user's details.
pub const PROFILE_VIEW: &str = "/profile";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to create users.
pub const USERS: &str = "/api/users";
/// The route to create or delete the current user's transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update the current user's details.
pub const PROFILE_API: &str = "/api/profile";
