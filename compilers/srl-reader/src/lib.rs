//! Readers for the inputs of a projection run: CoNLL-U parses, SRL JSON
//! lines and `i-j` word alignments, plus the on-disk dataset layout that
//! ties them together per document.

pub mod alignment;
pub mod conllu;
pub mod dataset;
pub mod error;
pub mod srl;

pub use dataset::{Dataset, DatasetLayout};
pub use error::ReadError;
