//! Sentiment analysis pipeline.
//!
//! Classify text as negative, neutral, or positive. Every call returns the
//! full confidence distribution over the three labels alongside the winning
//! label, and the call itself never fails: empty input and per-row inference
//! errors both degrade to a uniform neutral default, marked as such via
//! [`ResultOrigin`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sentix::sentiment::{SentimentPipelineBuilder, TwitterRobertaVariant};
//!
//! # fn main() -> sentix::error::Result<()> {
//! let pipeline = SentimentPipelineBuilder::twitter_roberta(TwitterRobertaVariant::Base)
//!     .build()?;
//! let result = pipeline.classify("I absolutely love this product!");
//!
//! // sentiment: Positive (confidence: 0.98)
//! println!("sentiment: {} (confidence: {:.2})", result.label, result.score());
//! # Ok(())
//! # }
//! ```
//!
//! # Batch Inference
//!
//! Rows of a user-supplied table are classified independently; a blank or
//! garbage row yields the neutral default instead of aborting the run:
//!
//! ```rust,no_run
//! # use sentix::sentiment::{SentimentPipelineBuilder, TwitterRobertaVariant};
//! # fn main() -> sentix::error::Result<()> {
//! # let pipeline = SentimentPipelineBuilder::twitter_roberta(TwitterRobertaVariant::Base).build()?;
//! let rows = &[
//!     "Best purchase I've ever made!",
//!     "",
//!     "Terrible quality, very disappointed.",
//! ];
//!
//! for (row, result) in rows.iter().zip(pipeline.classify_batch(rows)) {
//!     println!("{row}: {} {:?}", result.label, result.scores);
//! }
//! # Ok(())
//! # }
//! ```

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;

// ============ Public API ============

pub use crate::models::{RobertaSentimentOptions, TwitterRobertaVariant};
pub use builder::SentimentPipelineBuilder;
pub use model::SentimentModel;
pub use pipeline::{
    Label, ResultOrigin, SentimentPipeline, SentimentResult, LABEL_COUNT,
};

/// Only for generic annotations. Use [`SentimentPipelineBuilder::twitter_roberta`].
pub type SentimentRoberta = crate::models::roberta::SentimentRobertaModel;
