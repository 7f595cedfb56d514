//! Data module - CSV loading and record types

mod loader;
mod records;

pub use loader::DataLoader;
pub use records::{FuelRecord, RawRecord};
