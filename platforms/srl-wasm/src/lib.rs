use rkyv::{AlignedVec, Deserialize as _};
use serde::{Deserialize, Serialize};
use srl_projector::{ProjectionConfig, Projector};
use srl_protocol::{CorpusBundle, ProjectedFrame, SentencePair, SrlFrame, Token};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// What the page sends for a live projection.
#[derive(Deserialize)]
pub struct ProjectionRequest {
    pub frames: Vec<SrlFrame>,
    pub alignment: Vec<(usize, usize)>,
    pub source: Vec<Token>,
    pub target: Vec<Token>,
    #[serde(default)]
    pub config: ProjectionConfig,
}

/// The structured response sent back to JavaScript
#[derive(Serialize)]
pub struct ProjectionReport {
    pub frames: Vec<ProjectedFrame>,
    pub complete: usize,
    pub unresolved_spans: usize,
}

impl ProjectionRequest {
    pub fn run(&self) -> Result<ProjectionReport, String> {
        let frames = Projector::new(self.config)
            .project_sentence(&self.frames, &self.alignment, &self.source, &self.target)
            .map_err(|e| e.to_string())?;

        Ok(ProjectionReport {
            complete: frames.iter().filter(|frame| frame.is_fully_projected()).count(),
            unresolved_spans: frames.iter().map(|frame| frame.unresolved().count()).sum(),
            frames,
        })
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Projects one sentence: `{frames, alignment, source, target, config?}` in,
/// `{frames, complete, unresolved_spans}` out.
#[wasm_bindgen]
pub fn project(input: JsValue) -> Result<JsValue, JsValue> {
    let request: ProjectionRequest = serde_wasm_bindgen::from_value(input)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let report = request.run().map_err(|e| JsValue::from_str(&e))?;
    to_js(&report)
}

#[derive(Serialize)]
struct DocumentEntry<'a> {
    name: &'a str,
    imdbid: Option<&'a str>,
    sentences: usize,
}

/// A compiled corpus bundle held by the browser.
#[wasm_bindgen]
pub struct CorpusViewer {
    // We own the raw binary of the bundle (loaded via fetch() in JS),
    // copied into a buffer aligned for rkyv.
    data: AlignedVec,
}

impl CorpusViewer {
    /// Validates the archive; the accessors below rely on it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        let mut data = AlignedVec::with_capacity(bytes.len());
        data.extend_from_slice(bytes);
        rkyv::check_archived_root::<CorpusBundle>(&data)
            .map_err(|e| format!("invalid corpus bundle: {}", e))?;
        Ok(Self { data })
    }

    fn bundle(&self) -> &rkyv::Archived<CorpusBundle> {
        // SAFETY: `data` passed `check_archived_root` in `from_bytes` and is never mutated.
        unsafe { rkyv::archived_root::<CorpusBundle>(&self.data) }
    }

    pub fn sentence_pair(&self, document: usize, index: usize) -> Option<SentencePair> {
        let archived = self.bundle().documents.get(document)?.sentences.get(index)?;
        archived.deserialize(&mut rkyv::Infallible).ok()
    }
}

#[wasm_bindgen]
impl CorpusViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<CorpusViewer, JsValue> {
        Self::from_bytes(&data).map_err(|e| JsValue::from_str(&e))
    }

    /// `[{name, imdbid, sentences}]` for every document in the bundle.
    pub fn documents(&self) -> Result<JsValue, JsValue> {
        let entries: Vec<DocumentEntry> = self
            .bundle()
            .documents
            .iter()
            .map(|document| DocumentEntry {
                name: document.name.as_str(),
                imdbid: document.imdb_id.as_ref().map(|id| id.as_str()),
                sentences: document.sentences.len(),
            })
            .collect();
        to_js(&entries)
    }

    pub fn sentence_count(&self, document: usize) -> usize {
        self.bundle()
            .documents
            .get(document)
            .map_or(0, |document| document.sentences.len())
    }

    pub fn sentence(&self, document: usize, index: usize) -> Result<JsValue, JsValue> {
        match self.sentence_pair(document, index) {
            Some(pair) => to_js(&pair),
            None => Err(JsValue::from_str(&format!(
                "no sentence {} in document {}",
                index, document
            ))),
        }
    }
}
