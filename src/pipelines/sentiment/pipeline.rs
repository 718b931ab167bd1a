use super::model::SentimentModel;
use serde::Serialize;
use tokenizers::Tokenizer;

/// Number of sentiment classes. The score vector always has this length.
pub const LABEL_COUNT: usize = 3;

/// The fixed, ordered sentiment label set.
///
/// Order is significant: it defines the index-to-label mapping of the score
/// vector and must never change without updating all consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Label {
    /// Index 0.
    Negative,
    /// Index 1.
    Neutral,
    /// Index 2.
    Positive,
}

impl Label {
    /// All labels in score-vector order.
    pub const ALL: [Label; LABEL_COUNT] = [Label::Negative, Label::Neutral, Label::Positive];

    /// The label's position in the score vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The label at a score-vector position, if in range.
    pub fn from_index(index: usize) -> Option<Label> {
        Self::ALL.get(index).copied()
    }

    /// Plain label name. Presentational decoration is the caller's business.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Negative => "Negative",
            Label::Neutral => "Neutral",
            Label::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a [`SentimentResult`] was produced.
///
/// `classify` never fails, so failures show up here instead: callers that
/// care (structured logs, UI badges) can distinguish a real model prediction
/// from a substituted neutral default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultOrigin {
    /// Scores came from a model forward pass.
    Inference,
    /// Input was empty or whitespace-only; the model was not invoked.
    EmptyInput,
    /// Tokenization or inference failed; the neutral default was substituted.
    Degraded,
}

/// A probability distribution over the three sentiment labels plus the
/// winning label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    /// Softmax scores in [`Label`] order, each in `[0, 1]`, summing to ~1.
    pub scores: [f32; LABEL_COUNT],
    /// The winning label. For [`ResultOrigin::Inference`] results this is
    /// the argmax of `scores`, ties resolving to the lowest index;
    /// substituted defaults are always labelled [`Label::Neutral`] even
    /// though their uniform scores have no meaningful argmax.
    pub label: Label,
    /// Whether this is a real prediction or a substituted default.
    pub origin: ResultOrigin,
}

impl SentimentResult {
    /// The uniform fallback distribution, labelled neutral.
    pub(crate) fn neutral(origin: ResultOrigin) -> Self {
        let third = 1.0 / LABEL_COUNT as f32;
        Self {
            scores: [third; LABEL_COUNT],
            label: Label::Neutral,
            origin,
        }
    }

    pub(crate) fn from_scores(scores: [f32; LABEL_COUNT]) -> Self {
        let label = Label::from_index(argmax(&scores)).unwrap_or(Label::Neutral);
        Self {
            scores,
            label,
            origin: ResultOrigin::Inference,
        }
    }

    /// Confidence of the winning label.
    pub fn score(&self) -> f32 {
        self.scores[self.label.index()]
    }

    /// True when the scores are a substituted default rather than a prediction.
    pub fn is_degraded(&self) -> bool {
        self.origin == ResultOrigin::Degraded
    }
}

/// Index of the largest score; the strict comparison keeps the earliest
/// maximum, so exact ties resolve to the lowest index.
pub(crate) fn argmax(scores: &[f32; LABEL_COUNT]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

/// A ready-to-use sentiment pipeline: a loaded model plus its tokenizer.
///
/// `classify` is total: it always returns a valid [`SentimentResult`] and
/// never aborts the caller's flow. One bad row in a 10,000-row batch must not
/// take down the other 9,999.
pub struct SentimentPipeline<M: SentimentModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: SentimentModel> SentimentPipeline<M> {
    /// Assembles a pipeline from an already acquired model and tokenizer.
    ///
    /// The builder is the normal entry point; this exists so callers that
    /// manage model lifecycle themselves (or tests with a fake model) can
    /// still get the pipeline's robustness contract.
    pub fn from_parts(model: M, tokenizer: Tokenizer) -> Self {
        Self { model, tokenizer }
    }

    /// Classify one piece of text.
    ///
    /// Empty or whitespace-only input short-circuits to the neutral default
    /// without invoking the model. Tokenization or inference failures are
    /// logged and mapped to the neutral default with
    /// [`ResultOrigin::Degraded`].
    pub fn classify(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::neutral(ResultOrigin::EmptyInput);
        }

        match self.model.predict_scores(&self.tokenizer, text) {
            Ok(scores) => SentimentResult::from_scores(scores),
            Err(err) => {
                tracing::error!(error = %err, "inference failed, substituting neutral default");
                SentimentResult::neutral(ResultOrigin::Degraded)
            }
        }
    }

    /// Classify a cell of tabular input, where the cell may be missing.
    ///
    /// A missing cell yields the same neutral default as empty text.
    pub fn classify_cell(&self, cell: Option<&str>) -> SentimentResult {
        match cell {
            Some(text) => self.classify(text),
            None => SentimentResult::neutral(ResultOrigin::EmptyInput),
        }
    }

    /// Classify a batch of rows, one result per row.
    ///
    /// Rows are processed sequentially and independently; a degraded row does
    /// not affect its neighbours.
    pub fn classify_batch(&self, texts: &[&str]) -> Vec<SentimentResult> {
        texts.iter().map(|text| self.classify(text)).collect()
    }

    /// The device the model runs on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}
