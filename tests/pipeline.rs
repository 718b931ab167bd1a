//! Pipeline robustness tests with a fake model: no network, no weights.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use candle_core::Device;
use sentix::error::{Result, SentixError};
use sentix::sentiment::{
    Label, ResultOrigin, SentimentModel, SentimentPipeline, SentimentPipelineBuilder, LABEL_COUNT,
};
use sentix::{ModelCache, ModelOptions};
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::Tokenizer;

/// How many times the build flow constructed a fake model / loaded its
/// tokenizer. Only the builder path touches these, so counts stay
/// deterministic across the suite.
static MODEL_LOADS: AtomicUsize = AtomicUsize::new(0);
static TOKENIZER_LOADS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone)]
struct FakeOptions;

impl ModelOptions for FakeOptions {
    fn cache_key(&self) -> String {
        "fake-sentiment".into()
    }
}

/// Deterministic keyword-based fake; counts forward passes.
#[derive(Clone)]
struct FakeModel {
    device: Device,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl FakeModel {
    fn on(device: Device) -> Self {
        Self {
            device,
            calls: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    fn fresh() -> Self {
        Self::on(Device::Cpu)
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::fresh()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SentimentModel for FakeModel {
    type Options = FakeOptions;

    fn new(_options: FakeOptions, device: Device) -> Result<Self> {
        MODEL_LOADS.fetch_add(1, Ordering::SeqCst);
        Ok(Self::on(device))
    }

    fn predict_scores(&self, _tokenizer: &Tokenizer, text: &str) -> Result<[f32; LABEL_COUNT]> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SentixError::Unexpected("synthetic inference failure".into()));
        }
        if text.contains("love") {
            Ok([0.05, 0.10, 0.85])
        } else if text.contains("worst") {
            Ok([0.90, 0.07, 0.03])
        } else {
            Ok([0.30, 0.40, 0.30])
        }
    }

    fn get_tokenizer(_options: FakeOptions) -> Result<Tokenizer> {
        TOKENIZER_LOADS.fetch_add(1, Ordering::SeqCst);
        Ok(empty_tokenizer())
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

fn empty_tokenizer() -> Tokenizer {
    Tokenizer::new(WordPiece::default())
}

fn pipeline(model: FakeModel) -> SentimentPipeline<FakeModel> {
    SentimentPipeline::from_parts(model, empty_tokenizer())
}

#[test]
fn empty_input_yields_neutral_without_invoking_model() {
    let model = FakeModel::fresh();
    let pipeline = pipeline(model.clone());

    for input in ["", "   ", "\t\n"] {
        let result = pipeline.classify(input);
        assert_eq!(result.label, Label::Neutral);
        assert_eq!(result.origin, ResultOrigin::EmptyInput);
        for score in result.scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-6);
        }
    }
    let result = pipeline.classify_cell(None);
    assert_eq!(result.origin, ResultOrigin::EmptyInput);

    assert_eq!(model.calls(), 0, "model must not run on empty input");
}

#[test]
fn scores_form_a_distribution_and_label_is_argmax() {
    let pipeline = pipeline(FakeModel::fresh());

    for text in ["I love it", "the worst", "it arrived on Tuesday"] {
        let result = pipeline.classify(text);
        assert_eq!(result.scores.len(), LABEL_COUNT);
        let sum: f32 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "scores must sum to 1, got {sum}");
        for score in result.scores {
            assert!((0.0..=1.0).contains(&score));
        }
        let max = result
            .scores
            .iter()
            .cloned()
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(result.scores[result.label.index()], max);
    }
}

#[test]
fn inference_failure_degrades_to_neutral() {
    let model = FakeModel::failing();
    let pipeline = pipeline(model.clone());

    let result = pipeline.classify("anything at all");
    assert!(result.is_degraded());
    assert_eq!(result.label, Label::Neutral);
    let sum: f32 = result.scores.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5);
    assert_eq!(model.calls(), 1);
}

#[test]
fn batch_tolerates_a_blank_row() {
    let model = FakeModel::fresh();
    let pipeline = pipeline(model.clone());

    let rows = [
        "I love this",
        "the worst service",
        "",
        "I love everything",
        "fine I guess",
    ];
    let results = pipeline.classify_batch(&rows.iter().copied().collect::<Vec<_>>());

    assert_eq!(results.len(), rows.len());
    assert_eq!(results[0].label, Label::Positive);
    assert_eq!(results[1].label, Label::Negative);
    assert_eq!(results[2].origin, ResultOrigin::EmptyInput);
    assert_eq!(results[2].label, Label::Neutral);
    assert_eq!(results[3].label, Label::Positive);
    assert_eq!(results[4].origin, ResultOrigin::Inference);
    assert_eq!(model.calls(), 4, "blank row must skip the model");
}

#[test]
fn repeated_classification_is_bit_identical() {
    let pipeline = pipeline(FakeModel::fresh());

    let first = pipeline.classify("I love this product");
    for _ in 0..5 {
        let again = pipeline.classify("I love this product");
        assert_eq!(again.scores, first.scores);
        assert_eq!(again.label, first.label);
    }
}

#[test]
fn second_build_reuses_model_and_tokenizer() {
    let cache = ModelCache::new();

    let first = SentimentPipelineBuilder::<FakeModel>::new(FakeOptions)
        .with_cache(cache.clone())
        .build()
        .unwrap();
    assert_eq!(MODEL_LOADS.load(Ordering::SeqCst), 1);
    assert_eq!(TOKENIZER_LOADS.load(Ordering::SeqCst), 1);

    let second = SentimentPipelineBuilder::<FakeModel>::new(FakeOptions)
        .with_cache(cache.clone())
        .build()
        .unwrap();
    assert_eq!(
        MODEL_LOADS.load(Ordering::SeqCst),
        1,
        "second build must not reconstruct the model"
    );
    assert_eq!(
        TOKENIZER_LOADS.load(Ordering::SeqCst),
        1,
        "second build must not reacquire the tokenizer"
    );

    assert_eq!(
        first.classify("I love it").label,
        second.classify("I love it").label
    );

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn degraded_rows_do_not_poison_neighbours() {
    // A model that fails only on one marker row.
    #[derive(Clone)]
    struct FlakyModel(FakeModel);

    impl SentimentModel for FlakyModel {
        type Options = FakeOptions;

        fn new(_options: FakeOptions, device: Device) -> Result<Self> {
            Ok(Self(FakeModel::on(device)))
        }

        fn predict_scores(
            &self,
            tokenizer: &Tokenizer,
            text: &str,
        ) -> Result<[f32; LABEL_COUNT]> {
            if text.contains("POISON") {
                return Err(SentixError::Unexpected("bad row".into()));
            }
            self.0.predict_scores(tokenizer, text)
        }

        fn get_tokenizer(options: FakeOptions) -> Result<Tokenizer> {
            FakeModel::get_tokenizer(options)
        }

        fn device(&self) -> &Device {
            self.0.device()
        }
    }

    let pipeline = SentimentPipeline::from_parts(FlakyModel(FakeModel::fresh()), empty_tokenizer());
    let results = pipeline.classify_batch(&["I love it", "POISON", "the worst"]);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].label, Label::Positive);
    assert!(results[1].is_degraded());
    assert_eq!(results[2].label, Label::Negative);
}
