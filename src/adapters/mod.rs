// Adapters layer: decoding of external data formats into domain types.

pub mod catalog;
