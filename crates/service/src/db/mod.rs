//! SeaORM-backed operations. Every function takes the pool handle explicitly.

use std::{future::Future, pin::Pin};

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionError, TransactionTrait};
use tracing::{error, warn};

use crate::errors::ServiceError;

pub mod vehicle_service;
pub mod work_service;

type TxnFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, ServiceError>> + Send + 'c>>;

/// Run `f` in one transaction: committed on `Ok`, rolled back on `Err`.
pub(crate) async fn in_txn<T, F>(db: &DatabaseConnection, f: F) -> Result<T, ServiceError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, T> + Send,
    T: Send,
{
    db.transaction::<_, T, ServiceError>(f).await.map_err(|e| match e {
        TransactionError::Connection(e) => ServiceError::from(e),
        TransactionError::Transaction(e) => e,
    })
}

/// Log a failed operation with its name and the id it targeted.
pub(crate) fn failed(op: &'static str, id: Option<i32>, err: &ServiceError) {
    if err.is_client_error() {
        warn!(op, id, err = %err, "operation rejected");
    } else {
        error!(op, id, err = %err, "operation failed");
    }
}
