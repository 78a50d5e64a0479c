pub mod transaction;

pub use transaction::{OrderItem, Transaction, TransactionStatus, Transition};
