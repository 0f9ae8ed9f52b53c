use std::collections::BTreeMap;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::filename::capitalize;

/// Each environment variable starting with this names one Notion database.
pub const ENV_PREFIX: &str = "NOTION_DB_";

/// Human-readable database names mapped to Notion database ids.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Default, Clone)]
pub struct DatabaseRegistry {
    databases: BTreeMap<String, String>,
}

impl DatabaseRegistry {
    /// Picks out the `NOTION_DB_*` variables; `NOTION_DB_READING_LIST` becomes `Reading List`.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self::default().with_vars(vars)
    }

    /// Adds the `NOTION_DB_*` variables on top of the existing entries, replacing any with the same name.
    pub fn with_vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.databases.extend(
            vars.into_iter()
                .filter(|(name, _)| name.starts_with(ENV_PREFIX))
                .map(|(name, id)| (display_name(&name.replace(ENV_PREFIX, "")), id)),
        );
        self
    }

    pub fn get(&self, name: &str) -> Result<&str> {
        self.databases
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownDatabase(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.databases.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }
}

impl From<BTreeMap<String, String>> for DatabaseRegistry {
    fn from(databases: BTreeMap<String, String>) -> Self {
        Self { databases }
    }
}

fn display_name(var: &str) -> String {
    var.to_lowercase().split('_').map(capitalize).join(" ")
}
