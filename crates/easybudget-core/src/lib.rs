//! easybudget-core
//!
//! Business logic and services for EasyBudget.
//! Depends on easybudget-domain. No CLI, no terminal I/O, no direct storage
//! interactions.

pub mod balance_service;
pub mod calendar;
pub mod error;
pub mod expansion_service;
pub mod rule_service;
pub mod storage;
pub mod time;
pub mod transaction_service;

pub use balance_service::*;
pub use error::CoreError;
pub use expansion_service::*;
pub use rule_service::*;
pub use transaction_service::*;
