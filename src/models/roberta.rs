//! Twitter-RoBERTa sentiment model wrapper.
//!
//! Uses `candle_transformers::models::xlm_roberta` for the underlying
//! implementation; the Cardiff NLP checkpoints share the RoBERTa layout.

use std::path::PathBuf;
use std::sync::Arc;

use candle_core::{DType, Device, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{
    Config as RobertaConfig, XLMRobertaForSequenceClassification,
};
use serde::Deserialize;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

use crate::error::{Result, SentixError};
use crate::loaders::{HfLoader, TokenizerLoader};
use crate::pipelines::sentiment::pipeline::LABEL_COUNT;

/// Maximum sequence length; input is truncated to this many tokens at encode
/// time so worst-case latency and memory per call stay bounded.
const MAX_SEQ_LEN: usize = 512;

/// Available Twitter-RoBERTa sentiment checkpoints.
///
/// Both are 3-class models with the label order Negative, Neutral, Positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwitterRobertaVariant {
    /// `cardiffnlp/twitter-roberta-base-sentiment`.
    Base,
    /// `cardiffnlp/twitter-roberta-base-sentiment-latest`, retrained on a
    /// larger, more recent corpus.
    Latest,
}

impl TwitterRobertaVariant {
    fn model_id(self) -> &'static str {
        match self {
            TwitterRobertaVariant::Base => "cardiffnlp/twitter-roberta-base-sentiment",
            TwitterRobertaVariant::Latest => "cardiffnlp/twitter-roberta-base-sentiment-latest",
        }
    }
}

impl std::fmt::Display for TwitterRobertaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TwitterRobertaVariant::Base => "twitter-roberta-sentiment",
            TwitterRobertaVariant::Latest => "twitter-roberta-sentiment-latest",
        };
        write!(f, "{name}")
    }
}

/// Options for acquiring a [`SentimentRobertaModel`].
#[derive(Debug, Clone)]
pub struct RobertaSentimentOptions {
    /// Which checkpoint to load.
    pub variant: TwitterRobertaVariant,
    /// On-disk artifact cache override (created if absent). Defaults to the
    /// standard hf-hub cache location.
    pub cache_dir: Option<PathBuf>,
}

impl RobertaSentimentOptions {
    /// Options for `variant` with the default cache location.
    pub fn new(variant: TwitterRobertaVariant) -> Self {
        Self {
            variant,
            cache_dir: None,
        }
    }

    fn loader(&self, filename: &str) -> HfLoader {
        let loader = HfLoader::new(self.variant.model_id(), filename);
        match &self.cache_dir {
            Some(dir) => loader.with_cache_dir(dir.clone()),
            None => loader,
        }
    }
}

impl crate::pipelines::cache::ModelOptions for RobertaSentimentOptions {
    fn cache_key(&self) -> String {
        match &self.cache_dir {
            Some(dir) => format!("{}@{}", self.variant, dir.display()),
            None => self.variant.to_string(),
        }
    }
}

/// Classifier head config fields not covered by the candle config struct.
#[derive(Deserialize)]
struct ClassifierConfigJson {
    #[serde(default)]
    id2label: std::collections::HashMap<String, String>,
}

/// Sentiment analysis model using Twitter-RoBERTa.
///
/// The inner model is shared behind an `Arc`: the process-wide cache hands
/// out clones, all of which read the same resident weights.
#[derive(Clone)]
pub struct SentimentRobertaModel {
    model: Arc<XLMRobertaForSequenceClassification>,
    device: Device,
}

impl SentimentRobertaModel {
    /// Downloads (or finds in the local cache) and loads the checkpoint.
    pub fn new(options: RobertaSentimentOptions, device: Device) -> Result<Self> {
        let config_path = options.loader("config.json").load()?;
        let config_str = std::fs::read_to_string(&config_path)?;
        let config: RobertaConfig = serde_json::from_str(&config_str)?;
        let class_cfg: ClassifierConfigJson = serde_json::from_str(&config_str)?;

        // The pipeline's label order is fixed; refuse checkpoints with a
        // different class count rather than misreading their scores.
        if !class_cfg.id2label.is_empty() && class_cfg.id2label.len() != LABEL_COUNT {
            return Err(SentixError::Unexpected(format!(
                "expected a {LABEL_COUNT}-class sentiment model, config declares {} labels",
                class_cfg.id2label.len()
            )));
        }

        let weights_path = options
            .loader("model.safetensors")
            .load()
            .or_else(|_| options.loader("pytorch_model.bin").load())?;

        let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)? }
        } else {
            VarBuilder::from_pth(&weights_path, DType::F32, &device)?
        };
        let model = XLMRobertaForSequenceClassification::new(LABEL_COUNT, &config, vb)?;

        tracing::info!(model = %options.variant, "sentiment model resident");

        Ok(Self {
            model: Arc::new(model),
            device,
        })
    }

    /// The device the model runs on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    fn predict_scores(&self, tokenizer: &Tokenizer, text: &str) -> Result<[f32; LABEL_COUNT]> {
        let encoding = tokenizer
            .encode(text, true)
            .map_err(|e| SentixError::Tokenization(format!("Tokenization error: {e}")))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;
        // RoBERTa does not use token type ids; pass zeros.
        let token_type_ids = input_ids.zeros_like()?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)?;

        // Softmax over the raw logits preserves confidence-score semantics.
        let probs = softmax(&logits, D::Minus1)?;
        let probs_vec = probs.squeeze(0)?.to_vec1::<f32>()?;

        probs_vec.as_slice().try_into().map_err(|_| {
            SentixError::Unexpected(format!(
                "expected {LABEL_COUNT} class scores, model produced {}",
                probs_vec.len()
            ))
        })
    }

    /// Loads the tokenizer and pins truncation/padding so every encoded
    /// single-example batch is well-formed and capped at [`MAX_SEQ_LEN`].
    pub fn get_tokenizer(options: RobertaSentimentOptions) -> Result<Tokenizer> {
        let mut tokenizer = TokenizerLoader {
            tokenizer_file_loader: options.loader("tokenizer.json"),
        }
        .load()?;

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| SentixError::Tokenization(format!("Invalid truncation params: {e}")))?;
        tokenizer.with_padding(Some(PaddingParams::default()));

        Ok(tokenizer)
    }
}

impl crate::pipelines::sentiment::model::SentimentModel for SentimentRobertaModel {
    type Options = RobertaSentimentOptions;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentRobertaModel::new(options, device)
    }

    fn predict_scores(&self, tokenizer: &Tokenizer, text: &str) -> Result<[f32; LABEL_COUNT]> {
        self.predict_scores(tokenizer, text)
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        Self::get_tokenizer(options)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
