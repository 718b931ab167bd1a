//! Sentix provides a robust sentiment classification pipeline for Rust, powered
//! by the [Candle](https://github.com/huggingface/candle) crate.
//!
//! The pipeline wraps a pretrained 3-class sentiment model (negative / neutral /
//! positive), loads it exactly once per process, and exposes a total
//! [`classify`](sentiment::SentimentPipeline::classify) call that always
//! returns a valid probability distribution: malformed rows in a batch
//! degrade individually instead of aborting the run.

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod loaders;
pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod error;

pub use pipelines::cache::{ModelCache, ModelOptions};
pub use pipelines::sentiment;
