//! Service layer providing the vehicle and work operations on top of `models`.
//! - Every write runs inside a single transaction that rolls back on failure.
//! - Missing ids are reported as values (`None` / `false`), never as errors.
//! - Errors distinguish invalid input, conflicts with stored state, and store failures.

pub mod errors;
pub mod db;
#[cfg(test)]
pub mod test_support;

pub use db::{vehicle_service, work_service};
pub use errors::ServiceError;
