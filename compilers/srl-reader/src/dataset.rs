use serde::{Deserialize, Serialize};
use srl_protocol::SentenceInput;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::ReadError;
use crate::{alignment, conllu, srl};

/// Where each input lives under the dataset root.
///
/// Every document is one file name shared by the parse, SRL and alignment
/// directories; the alignment file additionally carries `alignment_suffix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetLayout {
    pub source_parsed: String,
    pub target_parsed: String,
    pub source_srl: String,
    pub alignments: String,
    pub alignment_suffix: String,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self {
            source_parsed: "english_parsed".to_string(),
            target_parsed: "hebrew_parsed".to_string(),
            source_srl: "english_srl".to_string(),
            alignments: "fastalign_outputs".to_string(),
            alignment_suffix: ".forward".to_string(),
        }
    }
}

impl DatasetLayout {
    /// Reads a JSON layout file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ReadError> {
        let raw = read(path)?;
        serde_json::from_str(&raw).map_err(|source| ReadError::Layout {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn read(path: &Path) -> Result<String, ReadError> {
    fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub struct Dataset {
    root: PathBuf,
    layout: DatasetLayout,
}

impl Dataset {
    pub fn open(root: impl Into<PathBuf>, layout: DatasetLayout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    /// Document names found in the source parse directory, sorted.
    pub fn documents(&self) -> Result<Vec<String>, ReadError> {
        let dir = self.root.join(&self.layout.source_parsed);
        let entries = fs::read_dir(&dir).map_err(|source| ReadError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ReadError::Io {
                path: dir.clone(),
                source,
            })?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Source sentences of a document as space-joined forms.
    pub fn source_sentences(&self, name: &str) -> Result<Vec<String>, ReadError> {
        let path = self.root.join(&self.layout.source_parsed).join(name);
        let sentences = conllu::parse_document(&read(&path)?)?;
        Ok(sentences
            .iter()
            .map(|tokens| {
                tokens
                    .iter()
                    .map(|token| token.form.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect())
    }

    /// Reads the four inputs of a document and pairs them sentence by sentence.
    ///
    /// Inputs of different lengths are truncated to the shortest.
    pub fn load(&self, name: &str) -> Result<Vec<SentenceInput>, ReadError> {
        let source_path = self.root.join(&self.layout.source_parsed).join(name);
        let target_path = self.root.join(&self.layout.target_parsed).join(name);
        let srl_path = self.root.join(&self.layout.source_srl).join(name);
        let alignment_path = self
            .root
            .join(&self.layout.alignments)
            .join(format!("{}{}", name, self.layout.alignment_suffix));

        let source = conllu::parse_document(&read(&source_path)?)?;
        let target = conllu::parse_document(&read(&target_path)?)?;
        let records = srl::parse_document(&read(&srl_path)?)?;
        let alignments = alignment::parse_document(&read(&alignment_path)?)?;

        let counts = [source.len(), target.len(), records.len(), alignments.len()];
        let paired = counts.iter().copied().min().unwrap_or(0);
        if counts.iter().any(|&count| count != paired) {
            warn!(
                document = name,
                source = counts[0],
                target = counts[1],
                srl = counts[2],
                alignments = counts[3],
                "sentence counts differ, truncating to {}",
                paired
            );
        }

        let sentences: Vec<SentenceInput> = source
            .into_iter()
            .zip(target)
            .zip(records)
            .zip(alignments)
            .map(|(((source_tokens, target_tokens), record), alignment)| SentenceInput {
                source_tokens,
                target_tokens,
                frames: record.frames,
                alignment,
            })
            .collect();

        debug!(root = %self.root.display(), document = name, "read dataset files");
        info!(document = name, sentences = sentences.len(), "loaded document");
        Ok(sentences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "1\tJames\t_\tNNP\tNNP\t_\t2\tnsubj\t_\t_\n\
2\tfalls\t_\tVBZ\tVBZ\t_\t0\tnull\t_\t_\n\
\n\
1\tBoats\t_\tNNS\tNNS\t_\t2\tnsubj\t_\t_\n\
2\tsink\t_\tVBP\tVBP\t_\t0\tnull\t_\t_\n";

    const TARGET: &str = "1\tnofel\t_\tVB\tVB\t_\t0\tROOT\t_\t_\n\
2\tJames\t_\tNNP\tNNP\t_\t1\tsubj\t_\t_\n";

    const SRL: &str = "{\"frames\": []}\n{\"frames\": []}\n";

    fn write_dataset(root: &Path, layout: &DatasetLayout, name: &str) {
        for dir in [&layout.source_parsed, &layout.target_parsed, &layout.source_srl, &layout.alignments] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        fs::write(root.join(&layout.source_parsed).join(name), SOURCE).unwrap();
        fs::write(root.join(&layout.target_parsed).join(name), TARGET).unwrap();
        fs::write(root.join(&layout.source_srl).join(name), SRL).unwrap();
        fs::write(
            root.join(&layout.alignments).join(format!("{}.forward", name)),
            "0-1 1-0\n0-0\n",
        )
        .unwrap();
    }

    #[test]
    fn test_load_truncates_to_shortest() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DatasetLayout::default();
        write_dataset(dir.path(), &layout, "subs_en_tt0111161_1");

        let dataset = Dataset::open(dir.path(), layout);
        assert_eq!(dataset.documents().unwrap(), vec!["subs_en_tt0111161_1".to_string()]);

        let sentences = dataset.load("subs_en_tt0111161_1").unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].source_tokens.len(), 2);
        assert_eq!(sentences[0].target_tokens[0].form, "nofel");
        assert_eq!(sentences[0].alignment, vec![(0, 1), (1, 0)]);

        assert_eq!(
            dataset.source_sentences("subs_en_tt0111161_1").unwrap(),
            vec!["James falls".to_string(), "Boats sink".to_string()]
        );
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset::open(dir.path(), DatasetLayout::default());
        match dataset.load("absent").unwrap_err() {
            ReadError::Io { path, .. } => assert!(path.ends_with("english_parsed/absent")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_layout_defaults_fill_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, r#"{"target_parsed": "german_parsed"}"#).unwrap();

        let layout = DatasetLayout::from_file(&path).unwrap();
        assert_eq!(layout.target_parsed, "german_parsed");
        assert_eq!(layout.source_parsed, "english_parsed");
        assert_eq!(layout.alignment_suffix, ".forward");
    }
}
