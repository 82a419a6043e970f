//! PostgreSQL integration
//!
//! Destination tables are written with `COPY FROM STDIN`; the checkpoint lives in a
//! `sync_checkpoints` table in the same schema.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
