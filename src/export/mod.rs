//! Export stage: serialize a flattened comment list to a file.

mod csv;
mod json;
mod text;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;

use crate::infra::instagram::Comment;

/// Output file stem used when the user does not name one.
pub const DEFAULT_FILE_STEM: &str = "comments";

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One comment per line, replies indented under their thread
    Text,
    /// Pretty-printed JSON array
    Json,
    /// Spreadsheet-importable CSV
    Csv,
}

impl ExportFormat {
    fn exporter(self) -> Box<dyn Exporter> {
        match self {
            Self::Text => Box::new(text::TextExporter),
            Self::Json => Box::new(json::JsonExporter),
            Self::Csv => Box::new(csv::CsvExporter),
        }
    }
}

/// Serializes a comment list into one output format.
pub trait Exporter {
    fn render(&self, comments: &[Comment]) -> anyhow::Result<String>;

    /// File extension, without the dot.
    fn file_extension(&self) -> &'static str;
}

/// Render `comments` and write them to `path`, appending the format's
/// extension when the path has none. Returns the path actually written.
pub fn export_to_file(
    comments: &[Comment],
    format: ExportFormat,
    path: &Path,
) -> anyhow::Result<PathBuf> {
    let exporter = format.exporter();
    let content = exporter.render(comments)?;

    let path = if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(exporter.file_extension())
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
