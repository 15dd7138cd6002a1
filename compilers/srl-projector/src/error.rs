use srl_syntax::TreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("malformed source parse: {0}")]
    MalformedSource(#[source] TreeError),
    #[error("malformed target parse: {0}")]
    MalformedTarget(#[source] TreeError),
    #[error("document {document}, sentence {sentence}: {source}")]
    InSentence {
        document: String,
        sentence: usize,
        #[source]
        source: Box<ProjectError>,
    },
}
