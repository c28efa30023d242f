use crate::error::{Error, Result};

const MAX_KEY_BYTES: usize = 768;

/// Splits a store path into its keys. The empty path and `/` address the root.
pub fn parse_path(path: &str) -> Result<Vec<String>> {
    let segments: Vec<&str> = path
        .trim()
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    for segment in &segments {
        validate_key(segment)?;
    }

    Ok(segments.into_iter().map(str::to_string).collect())
}

/// Joins keys back into the canonical slash-separated form.
#[must_use]
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}

pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidPath("key cannot be empty".to_string()));
    }

    if key.len() > MAX_KEY_BYTES {
        return Err(Error::InvalidPath(format!(
            "key cannot exceed {MAX_KEY_BYTES} bytes"
        )));
    }

    const INVALID_CHARS: &[char] = &['.', '$', '#', '[', ']', '/'];
    if key
        .chars()
        .any(|c| INVALID_CHARS.contains(&c) || c.is_control())
    {
        return Err(Error::InvalidPath(format!(
            "key '{key}' contains invalid characters"
        )));
    }

    Ok(())
}
