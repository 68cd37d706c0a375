//! Front-matter block extraction.

use serde_yaml::{Mapping, Value};

/// Split a document into its raw front-matter and body.
///
/// A document without a leading `---` block yields an empty mapping, so that
/// schema validation reports the required fields as missing rather than
/// silently accepting the page. An empty block also yields an empty mapping.
pub fn extract_frontmatter(source: &str) -> Result<(Value, &str), FrontmatterError> {
    let trimmed = source.trim_start_matches('\u{feff}').trim_start();

    if !trimmed.starts_with("---") {
        return Ok((Value::Mapping(Mapping::new()), source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let data = if yaml_content.is_empty() {
        Value::Mapping(Mapping::new())
    } else {
        match serde_yaml::from_str(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
        {
            Value::Null => Value::Mapping(Mapping::new()),
            value => value,
        }
    };

    // Drop the rest of the closing delimiter line
    let body = match remaining.find('\n') {
        Some(pos) if remaining[..pos].trim().is_empty() => &remaining[pos + 1..],
        _ if remaining.trim().is_empty() => "",
        _ => remaining,
    };

    Ok((data, body))
}

/// Errors that can occur when extracting front-matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed front-matter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in front-matter: {0}")]
    InvalidYaml(String),
}
