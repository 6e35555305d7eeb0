//! Entity module - Contains the record shapes held by the portfolio store.
//! Each entity has a Model struct for data; enums used by more than one module live
//! beside the entity that owns them.

pub mod alert;
pub mod company;
pub mod loan;

// Re-export specific types to avoid conflicts
pub use alert::{AlertPriority, AlertType, Model as Alert};
pub use company::{ContactInfo, Model as Company};
pub use loan::{CovenantBound, CovenantTest, LoanStatus, Model as Loan};
