//! Task field resolution and source-location labels.

use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use crate::raw::{Location, Metadata, RawField, RawFieldName, RawFieldValue};

/// Label used when a task has no usable location.
pub const UNKNOWN_LOCATION: &str = "<unknown location>";

/// Well-known field names attached to runtime task spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    SpawnLocation,
    Kind,
    Name,
    TaskId,
}

impl FieldName {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SpawnLocation => "spawn.location",
            Self::Kind => "kind",
            Self::Name => "task.name",
            Self::TaskId => "task.id",
        }
    }

    /// Look up a well-known name; `None` for anything else.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        [Self::SpawnLocation, Self::Kind, Self::Name, Self::TaskId]
            .into_iter()
            .find(|known| known.as_str() == name)
    }
}

fn registry_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r".*/\.cargo(/registry/src/[^/]*/|/git/checkouts/)")
            .expect("registry path pattern is valid")
    })
}

/// Replace a cargo registry or git checkout prefix with `<cargo>/`.
///
/// ```
/// use consoleview_stats::field::truncate_registry_path;
///
/// let path = "/home/me/.cargo/registry/src/index.crates.io-6f17d22bba15001f/tokio-1.38.0/src/task.rs";
/// assert_eq!(truncate_registry_path(path), "<cargo>/tokio-1.38.0/src/task.rs");
/// ```
#[must_use]
pub fn truncate_registry_path(path: &str) -> Cow<'_, str> {
    registry_path_pattern().replace(path, "<cargo>/")
}

/// Format a source location as `path:line:column`.
///
/// Prefers the module path over the file. `0:0` is a valid position.
#[must_use]
pub fn format_location(location: Option<&Location>) -> String {
    let Some(location) = location else {
        return UNKNOWN_LOCATION.to_string();
    };

    let mut result = location
        .module_path
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .or_else(|| {
            location
                .file
                .as_deref()
                .map(|file| truncate_registry_path(file).into_owned())
                .filter(|file| !file.is_empty())
        })
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

    if let Some(line) = location.line {
        result.push_str(&format!(":{line}"));
        if let Some(column) = location.column {
            result.push_str(&format!(":{column}"));
        }
    }

    result
}

/// A resolved field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum FieldValue {
    Bool(bool),
    Str(String),
    U64(u64),
    I64(i64),
    Debug(String),
}

impl FieldValue {
    /// Apply [`truncate_registry_path`] to string-like values.
    #[must_use]
    pub fn truncate_registry_path(self) -> Self {
        match self {
            Self::Str(s) => Self::Str(truncate_registry_path(&s).into_owned()),
            Self::Debug(s) => Self::Debug(truncate_registry_path(&s).into_owned()),
            other => other,
        }
    }

    /// `None` for empty string-like values.
    #[must_use]
    pub fn non_empty(self) -> Option<Self> {
        let empty = matches!(&self, Self::Str(s) | Self::Debug(s) if s.is_empty());
        if empty {
            None
        } else {
            Some(self)
        }
    }
}

impl From<&RawFieldValue> for FieldValue {
    fn from(raw: &RawFieldValue) -> Self {
        match raw {
            RawFieldValue::Debug(s) => Self::Debug(s.clone()),
            RawFieldValue::Str(s) => Self::Str(s.clone()),
            RawFieldValue::U64(v) => Self::U64(*v),
            RawFieldValue::I64(v) => Self::I64(*v),
            RawFieldValue::Bool(v) => Self::Bool(*v),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(s) | Self::Debug(s) => f.write_str(s),
            Self::U64(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
        }
    }
}

/// A task field with its name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

impl Field {
    /// Resolve a raw field against the metadata of the span it came from.
    ///
    /// Returns `None` if the name cannot be resolved (index out of range, or
    /// the field belongs to other metadata) or if the name or a string value
    /// is empty. `spawn.location` values get registry paths truncated.
    #[must_use]
    pub fn from_raw(raw: &RawField, meta: &Metadata) -> Option<Self> {
        let name = match raw.name.as_ref()? {
            RawFieldName::StrName(name) => name.clone(),
            RawFieldName::NameIdx(index) => {
                if raw.metadata_id != Some(meta.id) {
                    return None;
                }
                let index = usize::try_from(*index).ok()?;
                meta.field_names.get(index)?.clone()
            }
        };
        if name.is_empty() {
            return None;
        }

        let mut value = FieldValue::from(raw.value.as_ref()?).non_empty()?;
        if FieldName::parse(&name) == Some(FieldName::SpawnLocation) {
            value = value.truncate_registry_path();
        }

        Some(Self { name, value })
    }

    /// The well-known name of this field, if it is one.
    #[must_use]
    pub fn well_known(&self) -> Option<FieldName> {
        FieldName::parse(&self.name)
    }
}

/// Find the value of a well-known field.
#[must_use]
pub fn find_field(fields: &[Field], name: FieldName) -> Option<&FieldValue> {
    fields
        .iter()
        .find(|field| field.well_known() == Some(name))
        .map(|field| &field.value)
}
