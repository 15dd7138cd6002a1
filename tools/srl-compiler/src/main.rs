use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use serde::Serialize;
use srl_projector::{AnnotationSetSelection, ProjectionConfig, Projector, SpanSelection};
use srl_protocol::{CorpusBundle, Document, SentencePair};
use srl_reader::{Dataset, DatasetLayout};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One projected sentence pair per line.
    Jsonl,
    /// A zero-copy corpus bundle for the browser viewer.
    Rkyv,
}

#[derive(Parser)]
#[command(author, version, about = "Projects source-language SRL frames onto aligned target sentences")]
struct Cli {
    /// Dataset root holding the parse, SRL and alignment directories.
    #[arg(short, long, value_name = "DIR")]
    root: PathBuf,

    /// JSON file overriding the dataset directory layout.
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// JSON file with projection settings.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Project a single document instead of the whole dataset.
    #[arg(short, long, value_name = "NAME")]
    document: Option<String>,

    #[arg(short, long, value_enum, default_value = "jsonl")]
    format: Format,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Project every span of a target or frame element, not just the first.
    #[arg(long)]
    all_spans: bool,

    /// Project every annotation set, not just the rank-0 one.
    #[arg(long)]
    all_sets: bool,

    /// Reject parses that are not single-rooted trees.
    #[arg(long)]
    validate: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn projection_config(&self) -> anyhow::Result<ProjectionConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading projection config {:?}", path))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing projection config {:?}", path))?
            }
            None => ProjectionConfig::default(),
        };
        if self.all_spans {
            config.spans = SpanSelection::All;
        }
        if self.all_sets {
            config.annotation_sets = AnnotationSetSelection::All;
        }
        if self.validate {
            config.validate_trees = true;
        }
        Ok(config)
    }
}

#[derive(Serialize)]
struct Line<'a> {
    document: &'a str,
    imdbid: Option<&'a str>,
    #[serde(flatten)]
    pair: &'a SentencePair,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    documents: usize,
    sentences: usize,
    frames: usize,
    complete: usize,
    unresolved_spans: usize,
}

impl Summary {
    fn of(documents: &[Document]) -> Self {
        let frames = documents
            .iter()
            .flat_map(|document| document.sentences.iter())
            .flat_map(|pair| pair.target.frames.iter());

        let mut summary = Summary {
            documents: documents.len(),
            sentences: documents.iter().map(|document| document.sentences.len()).sum(),
            ..Summary::default()
        };
        for frame in frames {
            summary.frames += 1;
            if frame.is_fully_projected() {
                summary.complete += 1;
            }
            summary.unresolved_spans += frame.unresolved().count();
        }
        summary
    }
}

/// Loads and projects each named document. With `skip_failures`, a document
/// that cannot be read or projected is logged and left out.
fn project_documents(
    dataset: &Dataset,
    projector: &Projector,
    names: &[String],
    skip_failures: bool,
) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::with_capacity(names.len());
    for name in names {
        let projected = dataset
            .load(name)
            .with_context(|| format!("loading document {}", name))
            .and_then(|inputs| Ok(projector.project_document(name, &inputs)?));
        match projected {
            Ok(document) => documents.push(document),
            Err(err) if skip_failures => error!(document = %name, "skipping document: {:#}", err),
            Err(err) => return Err(err),
        }
    }
    Ok(documents)
}

fn write_jsonl(path: &Path, documents: &[Document]) -> anyhow::Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {:?}", path))?;
    let mut out = BufWriter::new(file);
    for document in documents {
        for pair in &document.sentences {
            let line = Line {
                document: &document.name,
                imdbid: document.imdb_id.as_deref(),
                pair,
            };
            serde_json::to_writer(&mut out, &line)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_bundle(path: &Path, documents: Vec<Document>) -> anyhow::Result<()> {
    let bundle = CorpusBundle::new(documents);

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&bundle)
        .map_err(|e| anyhow!("failed to archive corpus: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner();

    fs::write(path, bytes).with_context(|| format!("writing {:?}", path))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let layout = match &cli.layout {
        Some(path) => DatasetLayout::from_file(path)?,
        None => DatasetLayout::default(),
    };
    let projector = Projector::new(cli.projection_config()?);
    let dataset = Dataset::open(&cli.root, layout);

    let names = match &cli.document {
        Some(name) => vec![name.clone()],
        None => dataset.documents()?,
    };
    info!(documents = names.len(), config = ?projector.config(), "projecting dataset");

    let documents = project_documents(&dataset, &projector, &names, cli.document.is_none())?;

    let summary = Summary::of(&documents);
    match cli.format {
        Format::Jsonl => write_jsonl(&cli.output, &documents)?,
        Format::Rkyv => write_bundle(&cli.output, documents)?,
    }

    info!(
        documents = summary.documents,
        sentences = summary.sentences,
        frames = summary.frames,
        complete = summary.complete,
        unresolved_spans = summary.unresolved_spans,
        output = ?cli.output,
        "projection written"
    );
    Ok(())
}
