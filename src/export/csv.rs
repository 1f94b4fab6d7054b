//! CSV export, the spreadsheet-importable form.

use anyhow::Context;
use serde::Serialize;

use super::Exporter;
use crate::infra::instagram::Comment;

#[derive(Serialize)]
struct Row<'a> {
    author: &'a str,
    text: &'a str,
    replied_to: &'a str,
}

pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn render(&self, comments: &[Comment]) -> anyhow::Result<String> {
        let mut writer = ::csv::Writer::from_writer(Vec::new());
        for comment in comments {
            writer
                .serialize(Row {
                    author: &comment.author,
                    text: &comment.text,
                    replied_to: comment.replied_to.as_deref().unwrap_or(""),
                })
                .context("failed to serialize comment row")?;
        }
        let bytes = writer.into_inner().context("failed to flush CSV writer")?;
        String::from_utf8(bytes).context("CSV output was not valid UTF-8")
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }
}
