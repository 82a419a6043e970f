//! Tiny ERP adapter
//!
//! [`OrderSource`] is the single-attempt view of the three endpoints the sync uses
//! (order search, order detail, product detail). [`TinyClient`] layers the bounded
//! retry policy and the product rate limit on top of it.

pub mod client;
pub mod http;
pub mod models;
pub mod rate_limit;
pub mod retry;
mod source;

pub use client::TinyClient;
pub use http::TinyHttpSource;
pub use rate_limit::RateLimiter;
pub use retry::{Fetch, RetryPolicy};
pub use source::{OrderPage, OrderSource, RejectedEntry};
