//! JSON export: a pretty-printed array of comment records.

use anyhow::Context;

use super::Exporter;
use crate::infra::instagram::Comment;

pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn render(&self, comments: &[Comment]) -> anyhow::Result<String> {
        serde_json::to_string_pretty(comments).context("failed to serialize comments to JSON")
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}
