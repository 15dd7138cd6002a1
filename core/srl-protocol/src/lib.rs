#![no_std] // Shared with the wasm platform

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod span;
pub mod token;

// Re-export core types for convenience
pub use ids::{SentenceId, TokenId};
pub use span::{Span, TextSpan};
pub use token::Token;

pub mod frame;
pub use frame::*;

pub mod projection;
pub use projection::*;

pub mod corpus;
pub use corpus::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    fn text_span(start: usize, end: usize, text: &str) -> TextSpan {
        TextSpan::new(Span::new(start, end), text)
    }

    fn frame(target: SpanProjection, element: SpanProjection) -> ProjectedFrame {
        ProjectedFrame::new(
            ProjectedTarget {
                name: "Vehicle".to_string(),
                spans: vec![target],
            },
            vec![ProjectedAnnotationSet {
                rank: 0,
                score: 26.6,
                frame_elements: vec![ProjectedElement {
                    name: "Vehicle".to_string(),
                    spans: vec![element],
                }],
            }],
        )
    }

    #[test]
    fn test_token_id_positions() {
        assert_eq!(TokenId::ROOT.position(), None);
        assert_eq!(TokenId::new(4).position(), Some(3));
        assert_eq!(TokenId::from_position(3), TokenId::new(4));
        assert!(TokenId::ROOT.is_root());
    }

    #[test]
    fn test_ids_display_as_numbers() {
        assert_eq!(TokenId::new(12).to_string(), "12");
        assert_eq!(SentenceId::new(0).to_string(), "0");
    }

    #[test]
    fn test_span_is_half_open() {
        let span = Span::new(4, 6);
        assert_eq!(span.len(), 2);
        assert!(span.contains(4));
        assert!(span.contains(5));
        assert!(!span.contains(6));
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    fn test_issues_follow_span_results() {
        let fully = frame(
            SpanProjection::Projected(text_span(4, 6, "a b")),
            SpanProjection::Projected(text_span(5, 6, "b")),
        );
        assert!(fully.is_fully_projected());
        assert!(fully.issues.is_empty());

        let partial = frame(
            SpanProjection::Projected(text_span(4, 6, "a b")),
            SpanProjection::Unresolved {
                source: text_span(7, 8, "boat"),
                reason: UnresolvedReason::UnalignedSource { position: 7 },
            },
        );
        assert!(!partial.is_fully_projected());
        assert_eq!(
            partial.issues,
            ProjectionIssues::ELEMENT_UNRESOLVED | ProjectionIssues::UNALIGNED_SOURCE
        );
        assert_eq!(partial.unresolved().count(), 1);
    }

    #[test]
    fn test_projected_frame_archive() {
        let original = frame(
            SpanProjection::Unresolved {
                source: text_span(2, 4, "two heads"),
                reason: UnresolvedReason::AmbiguousHead { heads: 2 },
            },
            SpanProjection::Projected(text_span(0, 1, "x")),
        );

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize ProjectedFrame");
        let deserialized: ProjectedFrame =
            from_bytes(&bytes).expect("Failed to deserialize ProjectedFrame");

        assert_eq!(original, deserialized);
        assert!(deserialized.issues.contains(ProjectionIssues::TARGET_UNRESOLVED));
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(core::mem::size_of::<TokenId>(), 4);
    }
}
