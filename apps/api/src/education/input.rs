use serde::Deserialize;

use crate::errors::{AppError, FieldError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationInput {
    pub name: String,
    pub category: String,
    pub link: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationRecord {
    pub name: String,
    pub category: String,
    pub link: Option<String>,
    pub date: Option<String>,
}

impl EducationInput {
    pub fn validate(self) -> Result<EducationRecord, AppError> {
        let mut errors = Vec::new();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.push(FieldError::new("name", "is required"));
        }
        let category = self.category.trim().to_string();
        if category.is_empty() {
            errors.push(FieldError::new("category", "is required"));
        }

        let link = non_blank(self.link);
        if let Some(link) = &link {
            if !(link.starts_with("http://") || link.starts_with("https://")) {
                errors.push(FieldError::new("link", "must be an http(s) URL"));
            }
        }

        if !errors.is_empty() {
            return Err(AppError::InvalidFields(errors));
        }

        Ok(EducationRecord {
            name,
            category,
            link,
            date: non_blank(self.date),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_education() {
        let record = EducationInput {
            name: " Rust in Action ".into(),
            category: "Books".into(),
            link: Some("https://example.com/book".into()),
            date: Some("".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(record.name, "Rust in Action");
        assert!(record.date.is_none());
    }

    #[test]
    fn test_missing_name_and_category() {
        match EducationInput::default().validate() {
            Err(AppError::InvalidFields(fields)) => assert_eq!(fields.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_non_http_link_rejected() {
        let result = EducationInput {
            name: "Course".into(),
            category: "Courses".into(),
            link: Some("javascript:alert(1)".into()),
            date: None,
        }
        .validate();
        assert!(result.is_err());
    }
}
