//! Entities of the repair-shop store and the field rules attached to them.

pub mod errors;
pub mod db;
pub mod validation;
pub mod client;
pub mod vehicle;
pub mod work;

pub use work::WorkStatus;

#[cfg(test)]
mod tests;
