//! easybudget-domain
//!
//! Pure domain models (Money, Transaction, RecurrenceRule, Book, time
//! primitives). No I/O, no CLI, no storage. Only data types and core enums.

pub mod book;
pub mod common;
pub mod money;
pub mod rule;
pub mod transaction;

pub use book::*;
pub use common::*;
pub use money::*;
pub use rule::*;
pub use transaction::*;
