use serde::{Deserialize, Serialize};

/// Which spans of a target or frame element get projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanSelection {
    /// Only the first span; any further spans are not carried over.
    #[default]
    First,
    All,
}

/// Which annotation sets of a frame get projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSetSelection {
    /// Only the rank-0 set, the parser's best guess.
    #[default]
    First,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub spans: SpanSelection,
    pub annotation_sets: AnnotationSetSelection,
    /// Reject parses that are not single-rooted trees before projecting.
    pub validate_trees: bool,
}

impl SpanSelection {
    pub fn select<T>(self, items: &[T]) -> &[T] {
        match self {
            SpanSelection::First => &items[..items.len().min(1)],
            SpanSelection::All => items,
        }
    }
}

impl AnnotationSetSelection {
    pub fn select<T>(self, items: &[T]) -> &[T] {
        match self {
            AnnotationSetSelection::First => &items[..items.len().min(1)],
            AnnotationSetSelection::All => items,
        }
    }
}
