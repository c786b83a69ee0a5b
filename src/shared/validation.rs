use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationErrors;

lazy_static! {
    /// Regex for validating media MIME types
    /// Must be an image or video type with a non-empty subtype
    /// - Valid: "image/jpeg", "video/mp4", "image/svg+xml", "video/x-matroska"
    /// - Invalid: "image/", "application/pdf", "imagejpeg", "Image/PNG"
    pub static ref MEDIA_MIME_REGEX: Regex =
        Regex::new(r"^(image|video)/[a-z0-9][a-z0-9.+-]*$").unwrap();
}

/// A single failing form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field errors ordered the way the form presents its inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Collect `validator` errors, ordering them by `field_order`.
    ///
    /// Fields missing from `field_order` are appended alphabetically.
    pub fn from_validation(errors: &ValidationErrors, field_order: &[&str]) -> Self {
        let mut collected: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let field: &str = field.as_ref();
                errs.first().map(|err| FieldError {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                })
            })
            .collect();

        collected.sort_by(|a, b| {
            let rank = |f: &FieldError| {
                field_order
                    .iter()
                    .position(|name| *name == f.field)
                    .unwrap_or(field_order.len())
            };
            rank(a).cmp(&rank(b)).then_with(|| a.field.cmp(&b.field))
        });

        Self(collected)
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    /// The first failing field, where the client should move focus
    pub fn focus(&self) -> Option<&str> {
        self.0.first().map(|f| f.field.as_str())
    }

    #[cfg(test)]
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|f| f.field.as_str()).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|f| format!("{}: {}", f.field, f.message))
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::ValidationError;

    #[test]
    fn test_media_mime_regex_valid() {
        assert!(MEDIA_MIME_REGEX.is_match("image/jpeg"));
        assert!(MEDIA_MIME_REGEX.is_match("image/png"));
        assert!(MEDIA_MIME_REGEX.is_match("image/svg+xml"));
        assert!(MEDIA_MIME_REGEX.is_match("video/mp4"));
        assert!(MEDIA_MIME_REGEX.is_match("video/x-matroska"));
    }

    #[test]
    fn test_media_mime_regex_invalid() {
        assert!(!MEDIA_MIME_REGEX.is_match("image/")); // missing subtype
        assert!(!MEDIA_MIME_REGEX.is_match("application/pdf")); // not media
        assert!(!MEDIA_MIME_REGEX.is_match("imagejpeg")); // no slash
        assert!(!MEDIA_MIME_REGEX.is_match("Image/PNG")); // uppercase
        assert!(!MEDIA_MIME_REGEX.is_match("text/plain"));
        assert!(!MEDIA_MIME_REGEX.is_match(""));
    }

    #[test]
    fn test_field_errors_follow_given_order() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "location",
            ValidationError::new("required").with_message(Cow::Borrowed("pick one")),
        );
        errors.add(
            "title",
            ValidationError::new("length").with_message(Cow::Borrowed("too short")),
        );

        let ordered = FieldErrors::from_validation(&errors, &["title", "description", "location"]);

        assert_eq!(ordered.fields(), vec!["title", "location"]);
        assert_eq!(ordered.focus(), Some("title"));
        assert_eq!(
            ordered.messages(),
            vec!["title: too short".to_string(), "location: pick one".to_string()]
        );
    }

    #[test]
    fn test_field_errors_empty() {
        let ordered = FieldErrors::from_validation(&ValidationErrors::new(), &["title"]);
        assert!(ordered.messages().is_empty());
        assert_eq!(ordered.focus(), None);
    }
}
