use serde::Deserialize;
use serde_json::Value;

use crate::case_studies::slug::{is_valid_slug, slugify};
use crate::errors::{AppError, FieldError};
use crate::ordering::normalize_names;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseStudyInput {
    pub title: String,
    pub slug: String,
    pub description: String,
    /// The editor document, either already serialized to a string or as a
    /// JSON object. Stored as text either way.
    pub content: Option<Value>,
    pub featured_image: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseStudyRecord {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
}

impl CaseStudyInput {
    /// The block document itself is not checked; malformed content is saved
    /// and degrades at render time.
    pub fn validate(self) -> Result<CaseStudyRecord, AppError> {
        let mut errors = Vec::new();

        let title = self.title.trim().to_string();
        if title.is_empty() {
            errors.push(FieldError::new("title", "is required"));
        }

        let slug = match self.slug.trim() {
            "" => slugify(&title),
            provided => provided.to_string(),
        };
        if !is_valid_slug(&slug) {
            errors.push(FieldError::new(
                "slug",
                "must be lowercase letters, digits and single hyphens",
            ));
        }

        if !errors.is_empty() {
            return Err(AppError::InvalidFields(errors));
        }

        let content = match self.content {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
        };

        Ok(CaseStudyRecord {
            title,
            slug,
            description: self.description.trim().to_string(),
            content,
            featured_image: self
                .featured_image
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
            tags: normalize_names(self.tags),
            published: self.published,
            featured: self.featured,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slug_derived_from_title() {
        let record = CaseStudyInput {
            title: "Scaling the Checkout".into(),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(record.slug, "scaling-the-checkout");
    }

    #[test]
    fn test_invalid_slug_rejected() {
        let err = CaseStudyInput {
            title: "Title".into(),
            slug: "Not A Slug".into(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidFields(ref f) if f[0].field == "slug"));
    }

    #[test]
    fn test_untitled_reports_title_and_slug() {
        match CaseStudyInput::default().validate() {
            Err(AppError::InvalidFields(fields)) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["title", "slug"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_content_object_is_serialized() {
        let record = CaseStudyInput {
            title: "T".into(),
            content: Some(json!({ "blocks": [] })),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(record.content, r#"{"blocks":[]}"#);
    }

    #[test]
    fn test_content_string_stored_verbatim() {
        let raw = "{ \"blocks\": [ broken";
        let record = CaseStudyInput {
            title: "T".into(),
            content: Some(Value::String(raw.into())),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(record.content, raw);
    }

    #[test]
    fn test_tags_and_image_normalized() {
        let record = CaseStudyInput {
            title: "T".into(),
            tags: vec![" ml ".into(), "".into(), "ml".into(), "search".into()],
            featured_image: Some("   ".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(record.tags, vec!["ml", "search"]);
        assert!(record.featured_image.is_none());
    }
}
