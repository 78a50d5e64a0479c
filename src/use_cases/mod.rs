pub mod create_payment;
pub mod reconcile;

pub use create_payment::{CreatePayment, PaymentCreated};
pub use reconcile::{ReconcileNotification, ReconcileOutcome};
