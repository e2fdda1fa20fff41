//! Price file loading, normalization and caching

pub mod cache;
pub mod dataset;
pub mod loader;
pub mod schema;

pub use cache::{SnapshotCache, SourceStamp};
pub use dataset::Dataset;
pub use loader::{load_csv, load_from_reader, LoadError, LoadOptions, MalformedRows, DEFAULT_DATE_FORMAT};
pub use schema::{Column, HeaderMap, SchemaError};
