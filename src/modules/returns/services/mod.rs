pub mod balance_reconciler;
pub mod return_service;

pub use balance_reconciler::{reconcile, AddedLine, Reconciliation, ReturnedLine, Settlement};
pub use return_service::ReturnService;
