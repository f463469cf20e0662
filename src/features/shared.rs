//! Types shared by the route and review features: the library service's page
//! envelope and the author summary embedded in both records.

use crate::app_lib::ids;
use serde::{Deserialize, Deserializer, Serialize};

/// Author summary. A missing or `null` author decodes as the default record
/// (empty id, `unknown` name) so one incomplete row does not fail a page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(deserialize_with = "ids::deserialize")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Spring-style page envelope. Counters the server omits are derived from
/// `content`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub content: Vec<T>,
    #[serde(default, alias = "total")]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Zero-based page index.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: Option<u32>,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            id: String::new(),
            username: "unknown".to_string(),
            avatar_url: None,
        }
    }
}

/// Decodes `null` as `T::default()`; pair with `#[serde(default)]` for absent fields.
///
/// # Errors
/// Fails when the value is present but not a valid `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> Page<T> {
    #[must_use]
    pub fn total_elements(&self) -> u64 {
        self.total_elements
            .unwrap_or_else(|| self.content.len() as u64)
    }

    /// Server-reported page count, or the ceiling of `total / page_size`.
    /// Never less than one.
    #[must_use]
    pub fn total_pages(&self, page_size: u32) -> u32 {
        let pages = self.total_pages.unwrap_or_else(|| {
            let size = u64::from(page_size.max(1));
            u32::try_from(self.total_elements().div_ceil(size)).unwrap_or(u32::MAX)
        });
        pages.max(1)
    }
}

/// Query pairs for a 1-based console page; the wire uses a 0-based index.
#[must_use]
pub fn page_query(page: u32, size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.saturating_sub(1).to_string()),
        ("size", size.to_string()),
    ]
}

/// Appends a filter unless it is blank.
pub fn push_filter(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        query.push((key, value.to_string()));
    }
}
