pub mod default;
pub mod registry;
pub mod scrambled;

pub use registry::{all, find, VariantEntry};

inventory::submit! { VariantEntry::new("default", "canonical worked-scenario byte assignments", default::build) }
inventory::submit! { VariantEntry::new("scrambled", "default's byte assignments under a different physical instruction order", scrambled::build) }
