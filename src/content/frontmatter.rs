//! Front-matter parsing
//!
//! Posts start with a `---` delimited YAML block. The block is parsed into
//! loosely typed values first and then resolved field by field against the
//! post schema, so one bad field never discards the rest of the header.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_yaml::Value;

/// A resolved front-matter field, tagged with where its value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// Present in the header and valid
    Loaded(T),
    /// Absent or empty; the schema default was used
    Defaulted(T),
    /// Present but unusable; the schema default was used
    Invalid(T),
}

impl<T> Field<T> {
    /// Drop the tag and keep the value
    pub fn into_inner(self) -> T {
        match self {
            Field::Loaded(v) | Field::Defaulted(v) | Field::Invalid(v) => v,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Field::Loaded(_))
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Field::Defaulted(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Field::Invalid(_))
    }
}

/// Raw header values, before schema resolution
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawFrontMatter {
    title: Option<Value>,
    description: Option<Value>,
    date: Option<Value>,
    author: Option<Value>,
    image: Option<Value>,
    #[serde(rename = "updatedDate", alias = "updated_date", alias = "updated")]
    updated_date: Option<Value>,
}

/// Front-matter of a post
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    raw: RawFrontMatter,
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content). Never fails: a header that
    /// is not valid YAML is treated as absent.
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();

        if !trimmed.starts_with("---") {
            return (FrontMatter::default(), content);
        }

        let rest = trimmed[3..].trim_start_matches([' ', '\t']);
        let rest = match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
            Some(rest) => rest,
            // `---something` on the first line is not a header
            None => return (FrontMatter::default(), content),
        };

        let (yaml_content, remaining) = if let Some(remaining) = rest.strip_prefix("---") {
            ("", remaining)
        } else if let Some(end_pos) = rest.find("\n---") {
            (&rest[..end_pos], &rest[end_pos + 4..])
        } else {
            // No closing ---, treat as no front-matter
            return (FrontMatter::default(), content);
        };

        // Skip the remainder of the closing delimiter line
        let remaining = match remaining.find('\n') {
            Some(pos) if remaining[..pos].trim().chars().all(|c| c == '-') => {
                &remaining[pos + 1..]
            }
            None if remaining.trim().chars().all(|c| c == '-') => "",
            _ => remaining,
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        match serde_yaml::from_str::<RawFrontMatter>(yaml_content) {
            Ok(raw) => (FrontMatter { raw }, remaining),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    /// Post title, defaulting to the slug
    pub fn title(&self, slug: &str) -> Field<String> {
        resolve_text(self.raw.title.as_ref(), || slug.to_string())
    }

    /// Post description, defaulting to an empty string
    pub fn description(&self) -> Field<String> {
        resolve_text(self.raw.description.as_ref(), String::new)
    }

    /// Post author, defaulting to the site author
    pub fn author(&self, default_author: &str) -> Field<String> {
        resolve_text(self.raw.author.as_ref(), || default_author.to_string())
    }

    /// Cover image path
    pub fn image(&self) -> Field<Option<String>> {
        match resolve_text(self.raw.image.as_ref(), String::new) {
            Field::Loaded(path) => Field::Loaded(Some(path)),
            Field::Defaulted(_) => Field::Defaulted(None),
            Field::Invalid(_) => Field::Invalid(None),
        }
    }

    /// Publish date, defaulting to `fallback`
    pub fn date(&self, fallback: DateTime<Utc>) -> Field<DateTime<Utc>> {
        match resolve_date(self.raw.date.as_ref()) {
            Field::Loaded(Some(date)) => Field::Loaded(date),
            Field::Invalid(_) => Field::Invalid(fallback),
            _ => Field::Defaulted(fallback),
        }
    }

    /// Last update date
    pub fn updated(&self) -> Field<Option<DateTime<Utc>>> {
        resolve_date(self.raw.updated_date.as_ref())
    }
}

/// Resolve a textual field. Strings and plain scalars load, empty values
/// default, collections are invalid.
fn resolve_text(value: Option<&Value>, default: impl FnOnce() -> String) -> Field<String> {
    match value {
        None | Some(Value::Null) => Field::Defaulted(default()),
        Some(Value::String(s)) if s.trim().is_empty() => Field::Defaulted(default()),
        Some(Value::String(s)) => Field::Loaded(s.trim().to_string()),
        Some(Value::Number(n)) => Field::Loaded(n.to_string()),
        Some(Value::Bool(b)) => Field::Loaded(b.to_string()),
        Some(_) => Field::Invalid(default()),
    }
}

fn resolve_date(value: Option<&Value>) -> Field<Option<DateTime<Utc>>> {
    match value {
        None | Some(Value::Null) => Field::Defaulted(None),
        Some(Value::String(s)) if s.trim().is_empty() => Field::Defaulted(None),
        Some(Value::String(s)) => match parse_date_string(s) {
            Some(date) => Field::Loaded(Some(date)),
            None => Field::Invalid(None),
        },
        Some(_) => Field::Invalid(None),
    }
}

/// Parse a date string in various formats. Dates without an offset are UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    // Try RFC 3339 / ISO 8601 with offset first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
