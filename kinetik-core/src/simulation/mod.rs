pub mod builder;
pub mod engine;
pub mod network;
pub mod state;
