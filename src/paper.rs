use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::fetch::arxiv::{self, ArxivEntry};
use crate::filename;
use crate::identifier;

/// Everything shown about a paper after looking it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperReference {
    pub id: String,
    pub version: String,
    pub title: String,
    pub published: NaiveDate,
    pub abs_url: String,
    pub pdf_url: String,
    pub file_name: String,
}

impl PaperReference {
    /// `id` is the identifier as it was found in the user's input, `entry` the
    /// matching arXiv search result.
    pub fn new(id: &str, entry: ArxivEntry) -> Self {
        let version = identifier::version(&entry.id);
        Self {
            abs_url: arxiv::abs_url(id),
            pdf_url: arxiv::pdf_url(id, &version),
            file_name: filename::normalize(&format!("[{id}{version}] {}.pdf", entry.title)),
            id: id.to_string(),
            version,
            title: entry.title,
            published: entry.published,
        }
    }

    /// Link that opens the PDF in the web viewer hosted at `viewer`.
    pub fn viewer_url(&self, viewer: &str) -> String {
        format!("{viewer}?file={}", self.pdf_url)
    }
}

impl fmt::Display for PaperReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title:        {}", self.title)?;
        writeln!(f, "Published:    {}", self.published)?;
        writeln!(f, "ID:           {}", self.id)?;
        writeln!(f, "Version:      {}", self.version)?;
        writeln!(f, "URL:          {}", self.abs_url)?;
        writeln!(f, "PDF URL:      {}", self.pdf_url)?;
        writeln!(f, "PDF filename: {}", self.file_name)
    }
}

/// Finds the arXiv identifier in `input` and looks the paper up.
pub fn extract_and_resolve(input: &str) -> Result<PaperReference> {
    let id = identifier::extract(input)?;
    debug!("Found arXiv id {id} in {input:?}");
    let entry = arxiv::query(id)?;
    Ok(PaperReference::new(id, entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn entry(id: &str, title: &str) -> ArxivEntry {
        ArxivEntry {
            id: id.to_string(),
            title: title.to_string(),
            published: NaiveDate::from_ymd_opt(2021, 6, 23).unwrap(),
        }
    }

    #[test]
    fn builds_reference_from_entry() {
        let paper = PaperReference::new(
            "2106.12345",
            entry("http://arxiv.org/abs/2106.12345v1", "a: paper title"),
        );
        assert_eq!(
            paper,
            PaperReference {
                id: "2106.12345".to_string(),
                version: "v1".to_string(),
                title: "a: paper title".to_string(),
                published: NaiveDate::from_ymd_opt(2021, 6, 23).unwrap(),
                abs_url: "https://arxiv.org/abs/2106.12345".to_string(),
                pdf_url: "https://arxiv.org/pdf/2106.12345v1.pdf".to_string(),
                file_name: "[2106.12345v1] (A) paper title.pdf".to_string(),
            }
        );
    }

    #[test]
    fn double_digit_versions_survive() {
        let paper = PaperReference::new(
            "1706.03762",
            entry("http://arxiv.org/abs/1706.03762v10", "Attention Is All You Need"),
        );
        assert_eq!(paper.version, "v10");
        assert_eq!(paper.pdf_url, "https://arxiv.org/pdf/1706.03762v10.pdf");
        assert_eq!(
            paper.file_name,
            "[1706.03762v10] Attention Is All You Need.pdf"
        );
    }

    #[test]
    fn unversioned_entry_defaults_to_v1() {
        let paper = PaperReference::new("2106.12345", entry("http://arxiv.org/abs/2106.12345", "T"));
        assert_eq!(paper.version, "v1");
    }

    #[test]
    fn viewer_link() {
        let paper = PaperReference::new(
            "2106.12345",
            entry("http://arxiv.org/abs/2106.12345v3", "T"),
        );
        assert_eq!(
            paper.viewer_url("https://mozilla.github.io/pdf.js/web/viewer.html"),
            "https://mozilla.github.io/pdf.js/web/viewer.html?file=https://arxiv.org/pdf/2106.12345v3.pdf"
        );
    }

    #[test]
    fn display_lists_every_field() {
        let paper = PaperReference::new(
            "2106.12345",
            entry("http://arxiv.org/abs/2106.12345v1", "Title"),
        );
        let shown = paper.to_string();
        for value in [
            "2106.12345",
            "v1",
            "2021-06-23",
            "Title",
            "https://arxiv.org/abs/2106.12345",
            "https://arxiv.org/pdf/2106.12345v1.pdf",
            "[2106.12345v1] Title.pdf",
        ] {
            assert!(shown.contains(value), "{value} missing from {shown}");
        }
    }

    #[test]
    fn invalid_input_fails_before_any_lookup() {
        assert!(matches!(
            extract_and_resolve("https://example.com/not-a-paper"),
            Err(Error::InvalidInput(_))
        ));
    }
}
