//! lob-server
//!
//! Multi-client async TCP server for the order book engine.
//!
//! The engine itself is single-threaded: one task owns it and every
//! client request is funnelled through a channel into that task.

pub mod config;
pub mod types;
pub mod server;

// these are internal modules, not re-exported
mod client;
mod engine_task;
