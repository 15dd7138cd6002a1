use rkyv::{Archive, Deserialize, Serialize};
use crate::frame::SrlFrame;
use crate::ids::SentenceId;
use crate::projection::ProjectedFrame;
use crate::token::Token;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Everything known about one sentence pair before projection.
#[derive(Debug, Clone, PartialEq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SentenceInput {
    pub source_tokens: Vec<Token>,
    pub target_tokens: Vec<Token>,
    pub frames: Vec<SrlFrame>,
    pub alignment: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SourceSide {
    pub frames: Vec<SrlFrame>,
    pub words: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TargetSide {
    pub frames: Vec<ProjectedFrame>,
    pub words: Vec<Token>,
}

/// A source sentence, its translation and the projected annotation.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SentencePair {
    pub sentence: SentenceId,
    pub source: SourceSide,
    pub target: TargetSide,
    pub alignment: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Document {
    pub name: String,
    /// Third `_`-separated component of the document name, when present.
    pub imdb_id: Option<String>,
    pub sentences: Vec<SentencePair>,
}

/// Compiled corpus written by the CLI and browsed by the wasm viewer.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct CorpusBundle {
    pub version: u32,
    pub documents: Vec<Document>,
}

impl CorpusBundle {
    pub const VERSION: u32 = 1;

    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            version: Self::VERSION,
            documents,
        }
    }
}
