use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::TokenId;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One row of a dependency parse.
///
/// Only `id`, `form` and `head` drive projection. The remaining columns are
/// carried through untouched so the presentation layer can show them.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Token {
    pub id: TokenId,
    pub form: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lemma: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, rename = "upostag"))]
    pub upos: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, rename = "xpostag"))]
    pub xpos: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub feats: Vec<(String, String)>,
    pub head: TokenId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deprel: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deps: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub misc: Option<String>,
}

impl Token {
    /// Bare token with only the columns projection reads.
    pub fn new(id: u32, form: impl Into<String>, head: u32, deprel: impl Into<String>) -> Self {
        Self {
            id: TokenId(id),
            form: form.into(),
            lemma: None,
            upos: None,
            xpos: None,
            feats: Vec::new(),
            head: TokenId(head),
            deprel: deprel.into(),
            deps: None,
            misc: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.head.is_root()
    }

    /// 0-based offset of this token in its sentence.
    pub fn position(&self) -> usize {
        self.id.position().unwrap_or(0)
    }
}
