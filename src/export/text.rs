//! Plain-text export, one comment per line.

use super::Exporter;
use crate::infra::instagram::Comment;

pub struct TextExporter;

impl Exporter for TextExporter {
    fn render(&self, comments: &[Comment]) -> anyhow::Result<String> {
        let mut out = String::new();
        for comment in comments {
            let prefix = if comment.replied_to.is_some() {
                "  ↳ "
            } else {
                ""
            };
            out.push_str(prefix);
            out.push_str(&format!("[{}] {}\n", comment.author, comment.text));
        }
        Ok(out)
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::sample_comments;
    use super::*;

    #[test]
    fn replies_are_indented_under_their_thread() {
        let rendered = TextExporter.render(&sample_comments()).unwrap();
        assert_eq!(rendered, "[alice] first!\n  ↳ [bob] hi, \"alice\"\n");
    }

    #[test]
    fn no_comments_renders_empty() {
        assert_eq!(TextExporter.render(&[]).unwrap(), "");
    }
}
