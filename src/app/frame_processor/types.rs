// SPDX-License-Identifier: GPL-3.0-only

//! Frame processing result types

/// What to do with decoded QR content
///
/// URLs get the open-and-print flow; everything else is only shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrAction {
    /// Open in the default browser and print
    Url(String),
    /// Plain text, display only
    Text(String),
}

impl QrAction {
    /// Classify decoded QR content
    pub fn from_content(content: &str) -> Self {
        let trimmed = content.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            QrAction::Url(trimmed.to_string())
        } else {
            QrAction::Text(content.to_string())
        }
    }

    /// The decoded content, regardless of classification
    pub fn content(&self) -> &str {
        match self {
            QrAction::Url(s) | QrAction::Text(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_http_and_https_as_url() {
        assert_eq!(
            QrAction::from_content("https://example.com/doc"),
            QrAction::Url("https://example.com/doc".to_string())
        );
        assert_eq!(
            QrAction::from_content("http://example.com"),
            QrAction::Url("http://example.com".to_string())
        );
    }

    #[test]
    fn classifies_trimmed_url() {
        assert_eq!(
            QrAction::from_content("  https://example.com  "),
            QrAction::Url("https://example.com".to_string())
        );
    }

    #[test]
    fn classifies_other_content_as_text() {
        assert_eq!(
            QrAction::from_content("WIFI:S:net;;"),
            QrAction::Text("WIFI:S:net;;".to_string())
        );
        assert_eq!(
            QrAction::from_content("ftp://example.com"),
            QrAction::Text("ftp://example.com".to_string())
        );
    }

    #[test]
    fn content_is_preserved_for_both_kinds() {
        assert_eq!(
            QrAction::from_content("https://example.com").content(),
            "https://example.com"
        );
        assert_eq!(QrAction::from_content("hello").content(), "hello");
    }
}
