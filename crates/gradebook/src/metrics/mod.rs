//! Metrics recorder implementations.
//!
//! Concrete implementations of `gradebook_core::metrics::MetricsRecorder`.
//! The recorder follows the cache backend: Redis-backed lists when the
//! `redis` feature is enabled, an in-process recorder otherwise, so latency
//! history survives exactly as long as the cache it describes.

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(feature = "memory")]
#[allow(unused_imports)]
pub use memory::MemoryMetrics;

#[cfg(feature = "redis")]
#[allow(unused_imports)]
pub use redis_impl::RedisMetrics;
