//! Application layer: window-facing use cases over the core pipeline.
//!
//! Both use cases depend only on traits ([`monitor::CaptureHandle`],
//! [`preferences::BlobStore`]) and `imon-core` types; infrastructure
//! implementations are injected at construction time, keeping this layer
//! fully unit-testable.

pub mod monitor;
pub mod preferences;
