pub mod demand;
pub mod error;
pub mod reporting;
pub mod store;
