//! Selection of the `Content-Disposition` for a served object.

use serde::Deserialize;

/// Content types previewable in a browser besides `image/*`, `text/*` and
/// PDF.
const PREVIEW_TYPES: &[&str] = &[
    "application/json",
    "application/xml",
    "application/javascript",
    "text/javascript",
];

/// The `Content-Disposition` chosen for a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Render the object in the client.
    Inline,
    /// Offer the object as a file download.
    Attachment,
}

impl Disposition {
    /// The header value for this disposition.
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        }
    }
}

/// Operator-configured MIME overrides for disposition selection.
///
/// Each entry is matched as a substring of the lowercased content type, so a
/// bare `"zip"` covers `application/zip` as well as `application/x-zip`.
/// Entries are expected in lowercase; [`DispositionOverrides::from_lists`]
/// takes care of that when building from raw configuration strings.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DispositionOverrides {
    /// Types forced to render inline, checked before everything else.
    #[serde(default)]
    pub preview: Vec<String>,
    /// Types forced to download, checked after the preview list.
    #[serde(default)]
    pub download: Vec<String>,
}

impl DispositionOverrides {
    /// Build overrides from the two comma-separated configuration values.
    ///
    /// Tokens are trimmed and lowercased, empty tokens are dropped, and an
    /// absent or empty value yields no overrides.
    pub fn from_lists(preview: Option<&str>, download: Option<&str>) -> Self {
        Self {
            preview: parse_override_list(preview),
            download: parse_override_list(download),
        }
    }
}

fn parse_override_list(value: Option<&str>) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    value
        .split(',')
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Decide the disposition for a content type.
///
/// Overrides take precedence over the built-in rules, and the preview list
/// takes precedence over the download list. An empty content type is always
/// a download.
pub fn resolve_disposition(content_type: &str, overrides: &DispositionOverrides) -> Disposition {
    if content_type.is_empty() {
        return Disposition::Attachment;
    }
    let content_type = content_type.to_ascii_lowercase();

    if overrides.preview.iter().any(|t| content_type.contains(t.as_str())) {
        return Disposition::Inline;
    }
    if overrides.download.iter().any(|t| content_type.contains(t.as_str())) {
        return Disposition::Attachment;
    }

    if content_type.starts_with("image/") || content_type.starts_with("text/") {
        return Disposition::Inline;
    }
    if content_type.contains("application/pdf") {
        return Disposition::Inline;
    }
    if PREVIEW_TYPES.iter().any(|t| content_type.contains(t)) {
        return Disposition::Inline;
    }

    Disposition::Attachment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> DispositionOverrides {
        DispositionOverrides::default()
    }

    #[test]
    fn images_and_text_render_inline() {
        assert_eq!(resolve_disposition("image/png", &no_overrides()), Disposition::Inline);
        assert_eq!(resolve_disposition("text/plain", &no_overrides()), Disposition::Inline);
        assert_eq!(resolve_disposition("application/pdf", &no_overrides()), Disposition::Inline);
        assert_eq!(resolve_disposition("application/json", &no_overrides()), Disposition::Inline);
    }

    #[test]
    fn unknown_types_download() {
        assert_eq!(
            resolve_disposition("application/zip", &no_overrides()),
            Disposition::Attachment
        );
        assert_eq!(
            resolve_disposition("application/octet-stream", &no_overrides()),
            Disposition::Attachment
        );
    }

    #[test]
    fn empty_type_downloads() {
        assert_eq!(resolve_disposition("", &no_overrides()), Disposition::Attachment);
    }

    #[test]
    fn comparison_is_case_insensitive() {
        assert_eq!(resolve_disposition("IMAGE/PNG", &no_overrides()), Disposition::Inline);
    }

    #[test]
    fn preview_override_beats_builtin_rules() {
        let overrides = DispositionOverrides::from_lists(Some("zip"), None);
        assert_eq!(
            resolve_disposition("application/zip", &overrides),
            Disposition::Inline
        );
    }

    #[test]
    fn download_override_beats_builtin_rules() {
        let overrides = DispositionOverrides::from_lists(None, Some("pdf"));
        assert_eq!(
            resolve_disposition("application/pdf", &overrides),
            Disposition::Attachment
        );
    }

    #[test]
    fn preview_list_is_checked_before_download_list() {
        let overrides = DispositionOverrides::from_lists(Some("zip"), Some("zip"));
        assert_eq!(
            resolve_disposition("application/zip", &overrides),
            Disposition::Inline
        );
    }

    #[test]
    fn override_lists_are_trimmed_and_lowercased() {
        let overrides = DispositionOverrides::from_lists(Some(" ZIP , , video/ "), None);
        assert_eq!(overrides.preview, vec!["zip", "video/"]);
        assert!(overrides.download.is_empty());
    }

    #[test]
    fn absent_configuration_yields_no_overrides() {
        let overrides = DispositionOverrides::from_lists(None, Some(""));
        assert!(overrides.preview.is_empty());
        assert!(overrides.download.is_empty());
    }
}
