use super::pipeline::LABEL_COUNT;
use crate::error::Result;
use tokenizers::Tokenizer;

/// A 3-class sentiment model usable by [`SentimentPipeline`].
///
/// The trait is the seam between the pipeline's robustness contract and the
/// actual inference backend: tests inject fake implementations to exercise
/// the pipeline without downloading weights.
///
/// [`SentimentPipeline`]: super::pipeline::SentimentPipeline
pub trait SentimentModel {
    /// Model selection and acquisition options.
    type Options: std::fmt::Debug + Clone;

    /// Acquires the model for `options` and places it on `device`.
    fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Raw probability distribution over the labels, in [`Label`] order.
    ///
    /// Implementations apply softmax to the model logits so the returned
    /// values are a proper distribution, and truncate input at encoding time
    /// to bound per-call latency and memory.
    ///
    /// [`Label`]: super::pipeline::Label
    fn predict_scores(&self, tokenizer: &Tokenizer, text: &str) -> Result<[f32; LABEL_COUNT]>;

    /// Loads the tokenizer matching the model named by `options`.
    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer>;

    /// The device the model runs on.
    fn device(&self) -> &candle_core::Device;
}
