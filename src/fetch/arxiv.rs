use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

pub const API_URL: &str = "http://export.arxiv.org/api/query";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    published: Option<DateTime<Utc>>,
}

/// The fields of an arXiv search result the tool cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArxivEntry {
    /// Canonical identifier, e.g. `http://arxiv.org/abs/2106.12345v1`
    pub id: String,
    pub title: String,
    pub published: NaiveDate,
}

/// Looks up a single identifier with the arXiv API.
pub fn query(arxiv_id: &str) -> Result<ArxivEntry> {
    let url = format!("{API_URL}?id_list={arxiv_id}");
    debug!("Fetching from arXiv via: {url}");
    let response = ureq::get(&url)
        .set("Accept", "application/atom+xml; charset=utf-8")
        .call()?
        .into_string()?;
    first_entry(arxiv_id, &response)
}

/// Picks the first entry out of an Atom response.
pub fn first_entry(arxiv_id: &str, feed: &str) -> Result<ArxivEntry> {
    let feed: Feed = quick_xml::de::from_str(feed)?;
    let entry = feed
        .entries
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(arxiv_id.to_string()))?;

    // arXiv reports bad queries as an entry living under /api/errors
    if entry.id.contains("/api/errors") {
        return Err(Error::Api {
            id: arxiv_id.to_string(),
            message: collapse_whitespace(&entry.summary),
        });
    }
    let published = entry
        .published
        .ok_or_else(|| Error::NotFound(arxiv_id.to_string()))?;

    Ok(ArxivEntry {
        id: entry.id.trim().to_string(),
        title: collapse_whitespace(&entry.title),
        published: published.date_naive(),
    })
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s.trim(), " ").into_owned()
}

pub fn abs_url(arxiv_id: &str) -> String {
    format!("https://arxiv.org/abs/{arxiv_id}")
}

pub fn pdf_url(arxiv_id: &str, version: &str) -> String {
    format!("https://arxiv.org/pdf/{arxiv_id}{version}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="http://arxiv.org/api/query?id_list=1706.03762" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query: id_list=1706.03762</title>
  <id>http://arxiv.org/api/cHxbiOdZaP56ODnBPIenZhzg5f8</id>
  <updated>2024-01-01T00:00:00-05:00</updated>
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">1</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <updated>2023-08-02T00:41:18Z</updated>
    <published>2017-06-12T17:57:34Z</published>
    <title>Attention Is All
  You Need</title>
    <summary>The dominant sequence transduction models are based on complex recurrent networks.</summary>
    <author>
      <name>Ashish Vaswani</name>
    </author>
    <author>
      <name>Noam Shazeer</name>
    </author>
    <link href="http://arxiv.org/abs/1706.03762v7" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/1706.03762v7" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>
"#;

    const ERROR_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: id_list=1999.99999</title>
  <entry>
    <id>http://arxiv.org/api/errors#incorrect_id_format_for_1999.99999</id>
    <title>Error</title>
    <summary>incorrect id format for 1999.99999</summary>
  </entry>
</feed>
"#;

    const EMPTY_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: id_list=2106.99999</title>
</feed>
"#;

    #[test]
    fn parses_entry() {
        let entry = first_entry("1706.03762", FEED).unwrap();
        assert_eq!(entry.id, "http://arxiv.org/abs/1706.03762v7");
        assert_eq!(entry.title, "Attention Is All You Need");
        assert_eq!(entry.published, NaiveDate::from_ymd_opt(2017, 6, 12).unwrap());
    }

    #[test]
    fn error_entry() {
        let err = first_entry("1999.99999", ERROR_FEED).unwrap_err();
        assert!(
            matches!(err, Error::Api { ref message, .. } if message == "incorrect id format for 1999.99999")
        );
    }

    #[test]
    fn no_entries() {
        assert!(matches!(
            first_entry("2106.99999", EMPTY_FEED),
            Err(Error::NotFound(id)) if id == "2106.99999"
        ));
    }

    #[test]
    fn garbage_response() {
        assert!(first_entry("2106.12345", "not xml at all").is_err());
    }

    #[test]
    fn urls() {
        assert_eq!(abs_url("2106.12345"), "https://arxiv.org/abs/2106.12345");
        assert_eq!(
            pdf_url("2106.12345", "v2"),
            "https://arxiv.org/pdf/2106.12345v2.pdf"
        );
    }
}
