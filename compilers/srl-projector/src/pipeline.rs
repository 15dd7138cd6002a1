use srl_protocol::{Document, SentenceId, SentenceInput, SentencePair, SourceSide, TargetSide};
use tracing::info;

use crate::engine::Projector;
use crate::error::ProjectError;

/// Third `_`-separated component of a document name, e.g. the `tt0111161`
/// of `subs_en_tt0111161_1`.
pub fn imdb_id(name: &str) -> Option<String> {
    name.split('_').nth(2).map(str::to_string)
}

impl Projector {
    /// Projects every sentence of a document.
    ///
    /// Unprojectable spans never fail the document; only a malformed parse
    /// does, when tree validation is on.
    pub fn project_document(
        &self,
        name: &str,
        inputs: &[SentenceInput],
    ) -> Result<Document, ProjectError> {
        let sentences = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| {
                self.project_pair(SentenceId(index as u32), input)
                    .map_err(|source| ProjectError::InSentence {
                        document: name.to_string(),
                        sentence: index,
                        source: Box::new(source),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let frames: usize = sentences.iter().map(|pair| pair.target.frames.len()).sum();
        let complete = sentences
            .iter()
            .flat_map(|pair| pair.target.frames.iter())
            .filter(|frame| frame.is_fully_projected())
            .count();
        info!(document = name, sentences = sentences.len(), frames, complete, "projected document");

        Ok(Document {
            name: name.to_string(),
            imdb_id: imdb_id(name),
            sentences,
        })
    }

    pub fn project_pair(
        &self,
        sentence: SentenceId,
        input: &SentenceInput,
    ) -> Result<SentencePair, ProjectError> {
        let frames = self.project_sentence(
            &input.frames,
            &input.alignment,
            &input.source_tokens,
            &input.target_tokens,
        )?;

        Ok(SentencePair {
            sentence,
            source: SourceSide {
                frames: input.frames.clone(),
                words: input.source_tokens.clone(),
            },
            target: TargetSide {
                frames,
                words: input.target_tokens.clone(),
            },
            alignment: input.alignment.clone(),
        })
    }
}
