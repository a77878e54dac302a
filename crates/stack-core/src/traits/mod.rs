//! Core traits defined in `stack-core` and implemented by other crates.

pub mod publisher;

pub use publisher::EventPublisher;
