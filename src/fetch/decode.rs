//! Response normalization
//!
//! The search endpoint answers either with a bare array of posts or with an
//! envelope object holding the array under a nested field (`statuses`).
//! Both are reduced to a `Page` of `Item`s; every other field is dropped.

use crate::error::{Error, Result};
use crate::types::{Item, ItemId, Page};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Default envelope field holding the posts
pub const DEFAULT_RECORDS_FIELD: &str = "statuses";

/// `created_at` format used by the search service
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Extracts items from a search response body
#[derive(Debug, Clone)]
pub struct PageDecoder {
    /// Dot-separated path of the envelope field holding the posts
    records_field: String,
}

impl Default for PageDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_RECORDS_FIELD)
    }
}

impl PageDecoder {
    /// Create a decoder reading the envelope field at `records_field`
    pub fn new(records_field: impl Into<String>) -> Self {
        Self {
            records_field: records_field.into(),
        }
    }

    /// The envelope field this decoder reads
    pub fn records_field(&self) -> &str {
        &self.records_field
    }

    /// Locate the array of raw posts in either supported shape
    pub fn normalize<'a>(&self, body: &'a Value) -> Option<&'a [Value]> {
        match body {
            Value::Array(arr) => Some(arr.as_slice()),
            Value::Object(_) => extract_path(body, &self.records_field)
                .and_then(Value::as_array)
                .map(Vec::as_slice),
            _ => None,
        }
    }

    /// Decode a response body into a page.
    ///
    /// A body in neither shape is logged and treated as an empty page.
    /// Posts that cannot be mapped are skipped individually, but a page
    /// where no post could be mapped is an error rather than an empty page.
    pub fn decode(&self, body: &Value) -> Result<Page> {
        let Some(raw_items) = self.normalize(body) else {
            warn!(
                records_field = %self.records_field,
                "Malformed search response: expected an array or an object with an array field, treating as empty page"
            );
            return Ok(Vec::new());
        };

        let mut last_error = None;
        let page: Page = raw_items
            .iter()
            .filter_map(|raw| match map_item(raw) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable post");
                    last_error = Some(e);
                    None
                }
            })
            .collect();

        match last_error {
            Some(e) if page.is_empty() => Err(Error::decode(format!(
                "none of the {} posts in the page could be read: {e}",
                raw_items.len()
            ))),
            _ => Ok(page),
        }
    }
}

/// The fields of a raw post we keep
#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    id_str: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    full_text: Option<String>,
}

/// Map one raw post to an `Item`.
///
/// `id_str` wins over `id` (the numeric form loses precision in some
/// producers) and `full_text` wins over `text`.
pub fn map_item(raw: &Value) -> Result<Item> {
    let post = RawPost::deserialize(raw).map_err(|e| Error::decode(format!("bad post: {e}")))?;

    let id = match (&post.id_str, post.id) {
        (Some(s), _) => s
            .parse::<u64>()
            .map_err(|e| Error::decode(format!("bad id_str '{s}': {e}")))?,
        (None, Some(id)) => id,
        (None, None) => return Err(Error::decode("post has no id")),
    };

    let created_at = post
        .created_at
        .as_deref()
        .ok_or_else(|| Error::decode(format!("post {id} has no created_at")))
        .and_then(parse_created_at)?;

    let text = post.full_text.or(post.text).unwrap_or_default();

    Ok(Item {
        id: ItemId(id),
        created_at,
        text,
    })
}

/// Parse a post timestamp (`Wed Aug 27 13:08:45 +0000 2008` or RFC 3339)
pub fn parse_created_at(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(s, CREATED_AT_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::decode(format!("bad created_at '{s}': {e}")))
}

/// Walk a dot-separated path through nested objects
fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    path.split('.')
        .try_fold(value, |current, part| current.as_object()?.get(part))
}
