use super::{build_cache_key, DeviceRequest};
use crate::error::Result;
use crate::pipelines::cache::{global_cache, ModelCache, ModelOptions};

/// Shared build flow for pipelines: resolve the device, then acquire the
/// model and its tokenizer as one cached unit (loading at most once per key)
/// and assemble the pipeline.
///
/// The model and tokenizer are cached together so a repeated build performs
/// no second acquisition of either; in particular the tokenizer's artifact
/// download is not re-attempted once a pipeline for the same key exists.
pub trait BasePipelineBuilder<M>: Sized
where
    M: Clone + Send + Sync + 'static,
{
    type Model: Clone + Send + Sync + 'static;
    type Pipeline;

    type Options: ModelOptions + Clone;

    fn options(&self) -> &Self::Options;

    fn device_request(&self) -> &DeviceRequest;

    /// The cache to memoize into, or `None` for the process-wide one.
    fn cache(&self) -> Option<&ModelCache>;

    fn create_model(options: Self::Options, device: candle_core::Device) -> Result<M>;

    fn get_tokenizer(options: Self::Options) -> Result<tokenizers::Tokenizer>;

    fn construct_pipeline(model: M, tokenizer: tokenizers::Tokenizer) -> Result<Self::Pipeline>;

    fn build(self) -> Result<Self::Pipeline> {
        let device = self.device_request().clone().resolve()?;

        let key = build_cache_key(self.options(), &device);

        let cache = self
            .cache()
            .cloned()
            .unwrap_or_else(|| global_cache().clone());

        let (model, tokenizer) = cache.get_or_create(&key, || {
            let model = Self::create_model(self.options().clone(), device.clone())?;
            let tokenizer = Self::get_tokenizer(self.options().clone())?;
            Ok((model, tokenizer))
        })?;

        Self::construct_pipeline(model, tokenizer)
    }
}

pub struct StandardPipelineBuilder<Opts> {
    pub(crate) options: Opts,
    pub(crate) device_request: DeviceRequest,
    pub(crate) cache: Option<ModelCache>,
}

impl<Opts> StandardPipelineBuilder<Opts> {
    pub fn new(options: Opts) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Cpu,
            cache: None,
        }
    }

    pub(crate) fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}
