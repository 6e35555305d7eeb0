//! Core business logic - framework-agnostic loan status, alert and reporting operations.

/// Alert generation and joined alert rows
pub mod alerts;
/// Overview, alert feed and company summaries
pub mod dashboard;
/// View state reducers for tables and the alert feed
pub mod filters;
/// Currency, date and countdown formatting
pub mod format;
/// Alert priority policy
pub mod priority;
/// Filters, sorting and aggregation helpers
pub mod query;
/// Loan status derivation from maturity dates
pub mod status;
/// Maturity timeline and calendar grouping
pub mod timeline;
