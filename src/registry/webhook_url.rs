use url::Url;

use crate::error::ValidationError;

const DISPLAY_CHARS: usize = 50;

/// Boundary check for destination identifiers: a parseable http(s) URL under
/// the configured webhook prefix. Returns the trimmed identifier.
pub fn validate(raw: Option<&str>, expected_prefix: &str) -> Result<String, ValidationError> {
    let candidate = raw.map(str::trim).unwrap_or_default();
    if candidate.is_empty() {
        return Err(ValidationError::Missing);
    }

    if !candidate.starts_with(expected_prefix) {
        return Err(ValidationError::WrongPrefix {
            expected_prefix: expected_prefix.to_string(),
        });
    }

    let url = Url::parse(candidate).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidUrl(format!(
            "unsupported scheme {}",
            url.scheme()
        )));
    }

    if candidate.len() == expected_prefix.len() {
        return Err(ValidationError::InvalidUrl(
            "webhook id and token are missing".to_string(),
        ));
    }

    Ok(candidate.to_string())
}

/// Webhook URLs embed their secret token; logs only get the head.
pub fn abbreviate(url: &str) -> String {
    match url.char_indices().nth(DISPLAY_CHARS) {
        Some((cut, _)) => format!("{}...", &url[..cut]),
        None => url.to_string(),
    }
}
