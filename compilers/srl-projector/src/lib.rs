pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;

pub use config::{AnnotationSetSelection, ProjectionConfig, SpanSelection};
pub use engine::{project, project_span, Projector};
pub use error::ProjectError;
pub use pipeline::imdb_id;
