//! Guide ingestion
//!
//! Streaming XMLTV parsing and source-file loading.

mod parser;

pub use parser::{load_file, parse_reader, GuideData, GuideProgram};
