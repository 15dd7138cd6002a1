use srl_align::AlignmentIndex;
use srl_protocol::{
    FrameElement, ProjectedAnnotationSet, ProjectedElement, ProjectedFrame, ProjectedTarget,
    Span, SpanProjection, SrlFrame, TextSpan, Token, UnresolvedReason,
};
use srl_syntax::DependencyTree;
use tracing::debug;

use crate::config::ProjectionConfig;
use crate::error::ProjectError;

/// Projects one source span onto the target sentence.
///
/// The span's single syntactic head is followed through the alignment to a
/// single target token, and the result is the span covered by that token's
/// subtree, `[min(id) - 1, max(id))`.
pub fn project_span(
    span: Span,
    alignment: &AlignmentIndex,
    source: &DependencyTree,
    target: &DependencyTree,
) -> Result<Span, UnresolvedReason> {
    if span.start > span.end || span.end > source.len() {
        return Err(UnresolvedReason::SpanOutOfBounds);
    }

    let head = match source.head_of_span(span).as_slice() {
        [head] => head.position(),
        heads => {
            return Err(UnresolvedReason::AmbiguousHead {
                heads: heads.len() as u32,
            })
        }
    };

    let aligned = match alignment.targets_for(head) {
        None => return Err(UnresolvedReason::UnalignedSource { position: head }),
        Some([aligned]) => *aligned,
        Some(targets) => {
            return Err(UnresolvedReason::AmbiguousAlignment {
                position: head,
                targets: targets.len() as u32,
            })
        }
    };

    let subtree = target.subtree_from_head(aligned);
    match (subtree.first(), subtree.last()) {
        (Some(first), Some(last)) => Ok(Span::new(first.position(), last.position() + 1)),
        _ => Err(UnresolvedReason::TargetOutOfBounds { position: aligned }),
    }
}

/// Rewrites SRL frames from source-sentence offsets to target-sentence offsets.
///
/// Every span is projected on its own: a span that cannot be projected is
/// marked unresolved and the rest of the frame still goes through.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: ProjectionConfig,
}

struct Sentence<'a> {
    alignment: &'a AlignmentIndex,
    source: &'a DependencyTree,
    target: &'a DependencyTree,
}

impl Projector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn project(
        &self,
        frames: &[SrlFrame],
        alignment: &AlignmentIndex,
        source: &DependencyTree,
        target: &DependencyTree,
    ) -> Vec<ProjectedFrame> {
        let sentence = Sentence {
            alignment,
            source,
            target,
        };
        frames
            .iter()
            .map(|frame| self.project_frame(frame, &sentence))
            .collect()
    }

    /// Projects straight from raw tokens and alignment pairs.
    pub fn project_sentence(
        &self,
        frames: &[SrlFrame],
        pairs: &[(usize, usize)],
        source_tokens: &[Token],
        target_tokens: &[Token],
    ) -> Result<Vec<ProjectedFrame>, ProjectError> {
        let (source, target) = if self.config.validate_trees {
            (
                DependencyTree::validated(source_tokens.to_vec())
                    .map_err(ProjectError::MalformedSource)?,
                DependencyTree::validated(target_tokens.to_vec())
                    .map_err(ProjectError::MalformedTarget)?,
            )
        } else {
            (
                DependencyTree::new(source_tokens.to_vec()),
                DependencyTree::new(target_tokens.to_vec()),
            )
        };
        let alignment = AlignmentIndex::new(pairs);

        Ok(self.project(frames, &alignment, &source, &target))
    }

    fn project_frame(&self, frame: &SrlFrame, sentence: &Sentence<'_>) -> ProjectedFrame {
        let name = frame.target.name.as_str();
        let target = ProjectedTarget {
            name: frame.target.name.clone(),
            spans: self.project_spans(&frame.target.spans, name, name, sentence),
        };

        let annotation_sets = self
            .config
            .annotation_sets
            .select(&frame.annotation_sets)
            .iter()
            .map(|set| ProjectedAnnotationSet {
                rank: set.rank,
                score: set.score,
                frame_elements: set
                    .frame_elements
                    .iter()
                    .map(|element| self.project_element(element, name, sentence))
                    .collect(),
            })
            .collect();

        let projected = ProjectedFrame::new(target, annotation_sets);
        if !projected.is_fully_projected() {
            debug!(frame = name, issues = ?projected.issues, "frame partially projected");
        }
        projected
    }

    fn project_element(
        &self,
        element: &FrameElement,
        frame: &str,
        sentence: &Sentence<'_>,
    ) -> ProjectedElement {
        ProjectedElement {
            name: element.name.clone(),
            spans: self.project_spans(&element.spans, frame, &element.name, sentence),
        }
    }

    fn project_spans(
        &self,
        spans: &[TextSpan],
        frame: &str,
        role: &str,
        sentence: &Sentence<'_>,
    ) -> Vec<SpanProjection> {
        self.config
            .spans
            .select(spans)
            .iter()
            .map(|span| {
                match project_span(span.span(), sentence.alignment, sentence.source, sentence.target) {
                    Ok(projected) => SpanProjection::Projected(TextSpan::new(
                        projected,
                        sentence.target.text(projected),
                    )),
                    Err(reason) => {
                        debug!(
                            frame,
                            role,
                            start = span.start,
                            end = span.end,
                            %reason,
                            "span left unresolved"
                        );
                        SpanProjection::Unresolved {
                            source: span.clone(),
                            reason,
                        }
                    }
                }
            })
            .collect()
    }
}

/// [`Projector::project`] with the default configuration.
pub fn project(
    frames: &[SrlFrame],
    alignment: &AlignmentIndex,
    source: &DependencyTree,
    target: &DependencyTree,
) -> Vec<ProjectedFrame> {
    Projector::default().project(frames, alignment, source, target)
}
