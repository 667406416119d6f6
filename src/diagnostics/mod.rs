// Session diagnostics.

pub mod stats;
