use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::filename::short_title;
use crate::registry::DatabaseRegistry;

pub const API_URL: &str = "https://api.notion.com";
pub const API_VERSION: &str = "2022-06-28";

#[derive(Debug, Clone)]
pub struct NotionClient {
    base_url: String,
    token: Option<String>,
}

impl NotionClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            base_url: API_URL.to_string(),
            token,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Adds a paper to the Notion database registered under `database`.
    ///
    /// Only an unknown database key is reported back. Anything that goes wrong on
    /// the Notion side is logged and otherwise ignored, so the caller always
    /// sees success once the database has been found.
    pub fn submit_record(
        &self,
        registry: &DatabaseRegistry,
        database: &str,
        paper_id: &str,
        title: &str,
        published: NaiveDate,
        abs_url: &str,
    ) -> Result<()> {
        let database_id = registry.get(database)?;
        match self.create_page(database_id, properties(title, published, abs_url)) {
            Ok(()) => info!("Paper '{paper_id}' added to {database} DB successfully!"),
            Err(err) => error!("Could not add paper '{paper_id}' to {database} DB: {err}"),
        }
        Ok(())
    }

    fn create_page(&self, database_id: &str, properties: Value) -> Result<()> {
        let token = self.token.as_deref().ok_or(Error::MissingToken)?;
        let url = format!("{}/v1/pages", self.base_url);
        debug!("Creating Notion page in {database_id} via: {url}");
        let result = ureq::post(&url)
            .set("Authorization", &format!("Bearer {token}"))
            .set("Notion-Version", API_VERSION)
            .send_json(json!({
                "parent": { "database_id": database_id },
                "properties": properties,
            }));
        match result {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, response)) => Err(Error::Notion {
                status,
                message: response.into_string().unwrap_or_default(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

/// Page properties for a paper. `Name` is only filled in when the title starts
/// with a single-word short title (`BERT: ...`).
pub fn properties(title: &str, published: NaiveDate, abs_url: &str) -> Value {
    let mut props = json!({
        "FullName": { "rich_text": [{ "text": { "content": title } }] },
        "Date": { "date": { "start": published.format("%Y-%m-%d").to_string() } },
        "Arxiv": { "url": abs_url },
    });
    if let Some((short, _)) = short_title(title) {
        props["Name"] = json!({ "title": [{ "text": { "content": short } }] });
    }
    props
}
