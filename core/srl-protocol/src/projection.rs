use rkyv::{Archive, Deserialize, Serialize};
use crate::span::TextSpan;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Why a single span could not be carried over to the target sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[archive(check_bytes)]
pub enum UnresolvedReason {
    /// The span reaches past the end of the source sentence or ends before it starts.
    SpanOutOfBounds,
    /// Head-of-span returned zero or several tokens. An empty span has zero.
    AmbiguousHead { heads: u32 },
    /// The span's head has no alignment entry.
    UnalignedSource { position: usize },
    /// The span's head aligns to more than one target position.
    AmbiguousAlignment { position: usize, targets: u32 },
    /// The alignment points past the end of the target sentence.
    TargetOutOfBounds { position: usize },
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::SpanOutOfBounds => write!(f, "span lies outside the source sentence"),
            UnresolvedReason::AmbiguousHead { heads } => {
                write!(f, "span has {} heads, expected exactly one", heads)
            }
            UnresolvedReason::UnalignedSource { position } => {
                write!(f, "source position {} is not aligned", position)
            }
            UnresolvedReason::AmbiguousAlignment { position, targets } => write!(
                f,
                "source position {} aligns to {} target positions",
                position, targets
            ),
            UnresolvedReason::TargetOutOfBounds { position } => {
                write!(f, "aligned target position {} lies outside the target sentence", position)
            }
        }
    }
}

/// Outcome of projecting one span.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
#[archive(check_bytes)]
pub enum SpanProjection {
    /// Offsets and text expressed in the target sentence.
    Projected(TextSpan),
    /// Left unresolved; `source` is still in source-sentence offsets.
    Unresolved {
        source: TextSpan,
        reason: UnresolvedReason,
    },
}

impl SpanProjection {
    pub fn reason(&self) -> Option<UnresolvedReason> {
        match self {
            SpanProjection::Projected(_) => None,
            SpanProjection::Unresolved { reason, .. } => Some(*reason),
        }
    }

    pub fn is_projected(&self) -> bool {
        matches!(self, SpanProjection::Projected(_))
    }
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ProjectedTarget {
    pub name: String,
    pub spans: Vec<SpanProjection>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ProjectedElement {
    pub name: String,
    pub spans: Vec<SpanProjection>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ProjectedAnnotationSet {
    pub rank: u32,
    pub score: f64,
    #[cfg_attr(feature = "serde", serde(rename = "frameElements"))]
    pub frame_elements: Vec<ProjectedElement>,
}

/// An SRL frame re-expressed over the target sentence.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ProjectedFrame {
    pub target: ProjectedTarget,
    #[cfg_attr(feature = "serde", serde(rename = "annotationSets"))]
    pub annotation_sets: Vec<ProjectedAnnotationSet>,
    pub issues: ProjectionIssues,
}

impl ProjectedFrame {
    /// Builds the frame and derives `issues` from its span results.
    pub fn new(target: ProjectedTarget, annotation_sets: Vec<ProjectedAnnotationSet>) -> Self {
        let mut issues = ProjectionIssues::empty();
        for reason in target.spans.iter().filter_map(SpanProjection::reason) {
            issues |= ProjectionIssues::TARGET_UNRESOLVED | ProjectionIssues::from_reason(reason);
        }
        let element_spans = annotation_sets
            .iter()
            .flat_map(|set| set.frame_elements.iter())
            .flat_map(|element| element.spans.iter());
        for reason in element_spans.filter_map(SpanProjection::reason) {
            issues |= ProjectionIssues::ELEMENT_UNRESOLVED | ProjectionIssues::from_reason(reason);
        }

        Self {
            target,
            annotation_sets,
            issues,
        }
    }

    pub fn is_fully_projected(&self) -> bool {
        !self
            .issues
            .intersects(ProjectionIssues::TARGET_UNRESOLVED | ProjectionIssues::ELEMENT_UNRESOLVED)
    }

    /// Every span result in the frame, target spans first.
    pub fn spans(&self) -> impl Iterator<Item = &SpanProjection> {
        self.target.spans.iter().chain(
            self.annotation_sets
                .iter()
                .flat_map(|set| set.frame_elements.iter())
                .flat_map(|element| element.spans.iter()),
        )
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &SpanProjection> {
        self.spans().filter(|span| !span.is_projected())
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct ProjectionIssues: u32 {
        // Where (Bits 0-1)
        const TARGET_UNRESOLVED = 1;
        const ELEMENT_UNRESOLVED = 2;

        // Why (Bits 4-7)
        const AMBIGUOUS_HEAD = 16;
        const UNALIGNED_SOURCE = 32;
        const AMBIGUOUS_ALIGNMENT = 64;
        const OUT_OF_BOUNDS = 128;
    }
}

impl ProjectionIssues {
    pub fn from_reason(reason: UnresolvedReason) -> Self {
        match reason {
            UnresolvedReason::SpanOutOfBounds | UnresolvedReason::TargetOutOfBounds { .. } => {
                ProjectionIssues::OUT_OF_BOUNDS
            }
            UnresolvedReason::AmbiguousHead { .. } => ProjectionIssues::AMBIGUOUS_HEAD,
            UnresolvedReason::UnalignedSource { .. } => ProjectionIssues::UNALIGNED_SOURCE,
            UnresolvedReason::AmbiguousAlignment { .. } => ProjectionIssues::AMBIGUOUS_ALIGNMENT,
        }
    }
}

// rkyv support for ProjectionIssues
impl Archive for ProjectionIssues {
    type Archived = u32;
    type Resolver = ();

    unsafe fn resolve(&self, _pos: usize, _resolver: Self::Resolver, out: *mut Self::Archived) {
        out.write(self.bits());
    }
}

impl<S: rkyv::ser::Serializer + ?Sized> Serialize<S> for ProjectionIssues {
    fn serialize(&self, _serializer: &mut S) -> Result<Self::Resolver, S::Error> {
        Ok(())
    }
}

impl<D: rkyv::Fallible + ?Sized> Deserialize<ProjectionIssues, D> for u32 {
    fn deserialize(&self, _deserializer: &mut D) -> Result<ProjectionIssues, D::Error> {
        Ok(ProjectionIssues::from_bits_truncate(*self))
    }
}
