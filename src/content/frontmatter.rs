//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors raised while reading a front-matter block
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("malformed YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unrecognized date in `{field}`: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter keys consumed by the index builder.
///
/// Unknown keys are ignored so posts can carry data for other tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(alias = "updated")]
    pub last_modified: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub thumbnail: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        match split(content) {
            (Some(yaml), body) if !yaml.trim().is_empty() => {
                let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
                Ok((fm, body))
            }
            (_, body) => Ok((FrontMatter::default(), body)),
        }
    }

    /// Parse the `date` field, if present
    pub fn parse_date(&self) -> Result<Option<DateTime<Utc>>, FrontMatterError> {
        parse_field("date", self.date.as_deref())
    }

    /// Parse the `lastModified` field, if present
    pub fn parse_last_modified(&self) -> Result<Option<DateTime<Utc>>, FrontMatterError> {
        parse_field("lastModified", self.last_modified.as_deref())
    }
}

/// Strip the front-matter block and return only the body.
///
/// Does not validate the YAML, so a post with broken metadata still yields its body.
pub fn strip(content: &str) -> &str {
    split(content).1
}

/// Split content into the raw YAML block (if any) and the body
fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let content = content.trim_start();

    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };
    let rest = rest.trim_start_matches(['\n', '\r']);

    // `---` immediately followed by the closing delimiter
    if let Some(remaining) = rest.strip_prefix("---") {
        return (Some(""), remaining.trim_start_matches(['\n', '\r']));
    }

    let Some(end_pos) = rest.find("\n---") else {
        // No closing ---, treat as no front-matter
        return (None, content);
    };

    let yaml_content = &rest[..end_pos];
    let remaining = &rest[end_pos + 4..];
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    if yaml_content.trim().is_empty() {
        return (Some(""), remaining);
    }

    if !has_yaml_structure(yaml_content) {
        // A markdown horizontal rule, not a metadata block
        return (None, content);
    }

    (Some(yaml_content), remaining)
}

/// Whether a block looks like YAML (at least one `key: value` line)
fn has_yaml_structure(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        // "- item" alone is also markdown list syntax, so only keys count
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after_colon = &trimmed[colon_pos + 1..];
        after_colon.is_empty() || after_colon.starts_with(' ')
    })
}

fn parse_field(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, FrontMatterError> {
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_date_string(s)
            .map(Some)
            .ok_or_else(|| FrontMatterError::InvalidDate {
                field,
                value: s.to_string(),
            }),
    }
}

/// Parse a date string in various formats.
///
/// Values without an offset are read as UTC, so `2024-01-01` is midnight UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    // RFC 3339 / ISO 8601 with offset
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
