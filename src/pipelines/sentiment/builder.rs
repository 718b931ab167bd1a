use super::model::SentimentModel;
use super::pipeline::SentimentPipeline;
use crate::error::Result;
use crate::pipelines::cache::{ModelCache, ModelOptions};
use crate::pipelines::utils::{BasePipelineBuilder, DeviceRequest, StandardPipelineBuilder};

crate::pipelines::utils::impl_device_methods!(delegated: SentimentPipelineBuilder<M: SentimentModel>);

/// Builder for creating [`SentimentPipeline`] instances.
///
/// Use [`Self::twitter_roberta`] as the entry point. Building acquires the
/// model and its tokenizer as one unit through the process-wide cache: the
/// first build downloads and loads the artifacts (or falls back to a
/// previously cached copy when offline), every later build with the same
/// options reuses the resident pair without reattempting acquisition.
///
/// # Examples
///
/// ```rust,no_run
/// # use sentix::sentiment::{SentimentPipelineBuilder, TwitterRobertaVariant};
/// # fn main() -> sentix::error::Result<()> {
/// let pipeline = SentimentPipelineBuilder::twitter_roberta(TwitterRobertaVariant::Base)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SentimentPipelineBuilder<M: SentimentModel>(StandardPipelineBuilder<M::Options>);

impl<M: SentimentModel> SentimentPipelineBuilder<M> {
    /// Creates a builder for an arbitrary [`SentimentModel`] backend.
    ///
    /// [`Self::twitter_roberta`] covers the shipped model; this constructor
    /// exists for alternative backends and for tests that drive the build
    /// flow with a fake model.
    pub fn new(options: M::Options) -> Self {
        Self(StandardPipelineBuilder::new(options))
    }

    /// Memoizes into `cache` instead of the process-wide cache.
    ///
    /// Clones of a [`ModelCache`] share storage, so keep a clone to observe
    /// or clear what the build deposited.
    pub fn with_cache(mut self, cache: ModelCache) -> Self {
        self.0.cache = Some(cache);
        self
    }

    /// Builds the pipeline with configured settings.
    ///
    /// # Errors
    ///
    /// Returns [`SentixError::ModelUnavailable`] when neither the Hub nor the
    /// local cache can supply the model artifacts, or another error if device
    /// initialization or tokenizer loading fails.
    ///
    /// [`SentixError::ModelUnavailable`]: crate::error::SentixError::ModelUnavailable
    pub fn build(self) -> Result<SentimentPipeline<M>>
    where
        M: Clone + Send + Sync + 'static,
        M::Options: ModelOptions + Clone,
    {
        BasePipelineBuilder::build(self)
    }
}

impl<M: SentimentModel> BasePipelineBuilder<M> for SentimentPipelineBuilder<M>
where
    M: Clone + Send + Sync + 'static,
    M::Options: ModelOptions + Clone,
{
    type Model = M;
    type Pipeline = SentimentPipeline<M>;
    type Options = M::Options;

    fn options(&self) -> &Self::Options {
        &self.0.options
    }

    fn device_request(&self) -> &DeviceRequest {
        &self.0.device_request
    }

    fn cache(&self) -> Option<&ModelCache> {
        self.0.cache.as_ref()
    }

    fn create_model(options: Self::Options, device: candle_core::Device) -> Result<M> {
        M::new(options, device)
    }

    fn get_tokenizer(options: Self::Options) -> Result<tokenizers::Tokenizer> {
        M::get_tokenizer(options)
    }

    fn construct_pipeline(model: M, tokenizer: tokenizers::Tokenizer) -> Result<Self::Pipeline> {
        Ok(SentimentPipeline { model, tokenizer })
    }
}

impl SentimentPipelineBuilder<super::SentimentRoberta> {
    /// Creates a builder for a Twitter-RoBERTa sentiment model.
    pub fn twitter_roberta(variant: crate::models::TwitterRobertaVariant) -> Self {
        Self::new(crate::models::RobertaSentimentOptions::new(variant))
    }

    /// Overrides the on-disk artifact cache directory (created if absent).
    pub fn cache_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.0.options.cache_dir = Some(dir.into());
        self
    }
}
