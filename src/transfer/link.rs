//! Share links of the form `<origin><path>?import=<token>`.

use url::Url;

use super::DecodeError;

/// Query parameter that carries the token.
pub const IMPORT_PARAM: &str = "import";

/// Builds a share link for `token` on top of `base`.
///
/// Scheme, host, port and path of `base` are kept; its query and fragment
/// are dropped.
#[must_use]
pub fn share_link(base: &Url, token: &str) -> Url {
    let mut link = base.clone();
    link.set_fragment(None);
    link.set_query(None);
    link.query_pairs_mut().append_pair(IMPORT_PARAM, token);
    link
}

/// Pulls the token out of whatever the user pasted.
///
/// Accepts a full link, a bare `import=<token>` query (with or without the
/// leading `?`), or the token on its own.
///
/// # Errors
///
/// Returns [`DecodeError::MissingImportParameter`] if the input is a link
/// without an `import` parameter, or [`DecodeError::Empty`] if the input is
/// blank.
pub fn extract_token(input: &str) -> Result<String, DecodeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }

    if let Ok(url) = Url::parse(trimmed) {
        return url
            .query_pairs()
            .find(|(key, _)| key == IMPORT_PARAM)
            .map(|(_, value)| value.into_owned())
            .ok_or(DecodeError::MissingImportParameter);
    }

    let query = trimmed.strip_prefix('?').unwrap_or(trimmed);
    match query.strip_prefix("import=") {
        Some(token) => Ok(token.to_owned()),
        None => Ok(trimmed.to_owned()),
    }
}
