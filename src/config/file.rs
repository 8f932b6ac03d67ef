//! Configuration file loading
//!
//! Finds and parses the key/value settings file. Properties files are the
//! primary format; YAML and JSON files with a flat map of scalars are
//! accepted as well.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./config.properties",
    "./player-api-tests.yaml",
    "./player-api-tests.yml",
    "./player-api-tests.json",
];

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Supported on-disk formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Properties,
    Yaml,
    Json,
}

impl FileFormat {
    /// Pick the format from the file extension, defaulting to properties
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Properties,
        }
    }
}

/// Find a configuration file in the standard locations
pub fn find() -> Option<PathBuf> {
    CONFIG_LOCATIONS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Read and parse a configuration file into a flat key/value map
pub fn read(path: impl AsRef<Path>) -> Result<BTreeMap<String, String>, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match FileFormat::from_path(path) {
        FileFormat::Properties => Ok(parse_properties(&content)),
        FileFormat::Yaml => {
            let raw: BTreeMap<String, serde_yaml::Value> =
                serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
            raw.into_iter()
                .filter_map(|(key, value)| yaml_scalar(&key, value).transpose())
                .collect::<Result<_, _>>()
                .map_err(parse_error)
        }
        FileFormat::Json => {
            let raw: BTreeMap<String, serde_json::Value> =
                serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
            raw.into_iter()
                .filter_map(|(key, value)| json_scalar(&key, value).transpose())
                .collect::<Result<_, _>>()
                .map_err(parse_error)
        }
    }
}

/// Parse `key=value`, `key: value` and `key value` lines.
///
/// The key ends at the first unescaped `=`, `:` or blank; whitespace around
/// the separator is dropped. `#` and `!` start comments, an odd number of
/// trailing backslashes continues the line, and `\=`, `\:`, `\ `, `\t`,
/// `\n` and `\uXXXX` escapes are decoded. A line with no separator defines
/// the key with an empty value.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    let mut pending = String::new();

    for raw_line in content.lines() {
        let line = raw_line.trim_start_matches(is_blank);

        if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
        {
            continue;
        }

        if continues(line) {
            pending.push_str(&line[..line.len() - 1]);
            continue;
        }

        pending.push_str(line);
        let logical = std::mem::take(&mut pending);
        if let Some((key, value)) = split_property(&logical) {
            properties.insert(key, value);
        }
    }

    if let Some((key, value)) = split_property(&pending) {
        properties.insert(key, value);
    }

    properties
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// A line continues when it ends in an unescaped backslash
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_property(line: &str) -> Option<(String, String)> {
    let line = line.trim_start_matches(is_blank);
    if line.is_empty() {
        return None;
    }

    let mut key_end = line.len();
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = idx;
            break;
        }
    }

    let mut value = line[key_end..].trim_start_matches(is_blank);
    if let Some(rest) = value.strip_prefix(['=', ':']) {
        value = rest.trim_start_matches(is_blank);
    }

    Some((unescape(&line[..key_end]), unescape(value)))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

fn yaml_scalar(key: &str, value: serde_yaml::Value) -> Result<Option<(String, String)>, String> {
    use serde_yaml::Value;

    let text = match value {
        Value::Null => return Ok(None),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(format!("value of '{key}' must be a scalar")),
    };
    Ok(Some((key.to_string(), text)))
}

fn json_scalar(key: &str, value: serde_json::Value) -> Result<Option<(String, String)>, String> {
    use serde_json::Value;

    let text = match value {
        Value::Null => return Ok(None),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(format!("value of '{key}' must be a scalar")),
    };
    Ok(Some((key.to_string(), text)))
}
