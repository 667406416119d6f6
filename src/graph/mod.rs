// Graph boundary: side packets, output packets, engine contract, and model assets.

pub mod assets;
pub mod config;
pub mod engine;
pub mod error;
pub mod packets;
