pub mod fingerprint;
pub mod item;
pub mod stock_snapshot;
