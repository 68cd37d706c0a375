//! Glob patterns for selecting collection files.
//!
//! Supported syntax:
//! - `**/` matches zero or more directories
//! - `*` matches any run of characters within one path segment
//! - `?` matches a single character within one path segment
//! - `[abc]`, `[a-z]`, `[!abc]` / `[^abc]` character classes
//! - `{md,mdx}` alternation (may nest)
//!
//! Paths are matched with `/` separators, relative to the collection base.

use regex::Regex;

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    glob: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a glob pattern.
    pub fn new(glob: &str) -> Result<Self, PatternError> {
        let source = translate(glob)?;
        let regex = Regex::new(&source).map_err(|e| PatternError::Regex {
            glob: glob.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    /// The glob text as given.
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Check a `/`-separated relative path against the pattern.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Errors that can occur when compiling a pattern.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Unclosed character class in pattern '{0}'")]
    UnclosedClass(String),

    #[error("Unbalanced braces in pattern '{0}'")]
    UnbalancedBraces(String),

    #[error("Invalid pattern '{glob}': {message}")]
    Regex { glob: String, message: String },
}

/// Translate a glob into an anchored regular expression.
fn translate(glob: &str) -> Result<String, PatternError> {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::from("^");
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' if chars.get(i + 1) == Some(&'*') => {
                let at_segment_start = i == 0 || chars[i - 1] == '/';
                if at_segment_start && chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:[^/]*/)*");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '[' => {
                i = push_class(&chars, i, &mut out)
                    .ok_or_else(|| PatternError::UnclosedClass(glob.to_string()))?;
                continue;
            }
            '{' => {
                depth += 1;
                out.push_str("(?:");
            }
            '}' if depth > 0 => {
                depth -= 1;
                out.push(')');
            }
            ',' if depth > 0 => out.push('|'),
            '}' => return Err(PatternError::UnbalancedBraces(glob.to_string())),
            _ => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }

    if depth != 0 {
        return Err(PatternError::UnbalancedBraces(glob.to_string()));
    }

    out.push('$');
    Ok(out)
}

/// Emit a character class starting at `chars[start] == '['`.
///
/// Returns the index just past the closing `]`, or `None` if unclosed.
fn push_class(chars: &[char], start: usize, out: &mut String) -> Option<usize> {
    let mut i = start + 1;
    let negated = matches!(chars.get(i), Some('!') | Some('^'));
    if negated {
        i += 1;
    }

    let body_start = i;
    // A leading ']' is a literal member
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while i < chars.len() && chars[i] != ']' {
        i += 1;
    }
    if i >= chars.len() {
        return None;
    }

    out.push('[');
    if negated {
        // Classes never cross a segment boundary
        out.push_str("^/");
    }
    for &c in &chars[body_start..i] {
        match c {
            '\\' | '[' | ']' | '^' | '&' | '~' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push(']');

    Some(i + 1)
}
