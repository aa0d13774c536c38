pub mod config;
pub mod context;
pub mod engine;
pub mod result;
pub mod target;
