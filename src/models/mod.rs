pub(crate) mod roberta;

pub use roberta::{RobertaSentimentOptions, SentimentRobertaModel, TwitterRobertaVariant};
