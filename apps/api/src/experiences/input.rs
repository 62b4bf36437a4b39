use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::{AppError, FieldError};
use crate::experiences::embedded::{
    parse_education_ref, parse_tool, stringify_education_ref, stringify_tool,
};

/// Request body for creating or replacing an experience.
///
/// Every field defaults so that missing fields are reported as field errors
/// (400) rather than as a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceInput {
    pub job_title: String,
    pub company: String,
    pub industry: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_current_job: bool,
    pub description: String,
    pub accomplishments: String,
    pub tools: Vec<String>,
    pub education: Vec<String>,
}

/// A validated, normalized experience ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceRecord {
    pub job_title: String,
    pub company: String,
    pub industry: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_current_job: bool,
    pub description: String,
    pub accomplishments: String,
    pub tools: Vec<String>,
    pub education: Vec<String>,
}

impl ExperienceInput {
    pub fn validate(self) -> Result<ExperienceRecord, AppError> {
        let mut errors = Vec::new();

        let job_title = required(&mut errors, "jobTitle", &self.job_title);
        let company = required(&mut errors, "company", &self.company);
        let industry = required(&mut errors, "industry", &self.industry);

        let start_date = self.start_date.trim().to_string();
        let start = parse_year_month(&start_date);
        if start.is_none() {
            errors.push(FieldError::new("startDate", "must be a YYYY-MM date"));
        }

        // A current job has no end date, whatever the client sent.
        let end_date = if self.is_current_job {
            None
        } else {
            self.end_date
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
        };
        if let Some(end_date) = &end_date {
            match parse_year_month(end_date) {
                None => errors.push(FieldError::new("endDate", "must be a YYYY-MM date")),
                Some(end) => {
                    if start.is_some_and(|start| end < start) {
                        errors.push(FieldError::new("endDate", "must not be before startDate"));
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(AppError::InvalidFields(errors));
        }

        let tools = self
            .tools
            .iter()
            .map(|t| parse_tool(t))
            .filter(|t| !t.name.is_empty())
            .map(|t| stringify_tool(&t))
            .collect();
        let education = self
            .education
            .iter()
            .map(|e| parse_education_ref(e))
            .filter(|e| !e.name.is_empty())
            .map(|e| stringify_education_ref(&e))
            .collect();

        Ok(ExperienceRecord {
            job_title,
            company,
            industry,
            start_date,
            end_date,
            is_current_job: self.is_current_job,
            description: self.description,
            accomplishments: self.accomplishments,
            tools,
            education,
        })
    }
}

fn required(errors: &mut Vec<FieldError>, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
    value.to_string()
}

/// Parses a strict `YYYY-MM` string into the first day of that month.
pub fn parse_year_month(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ExperienceInput {
        ExperienceInput {
            job_title: "Staff Engineer".into(),
            company: "Acme".into(),
            industry: "Fintech".into(),
            start_date: "2021-03".into(),
            end_date: Some("2023-11".into()),
            is_current_job: false,
            description: "Platform work".into(),
            accomplishments: "- Shipped things".into(),
            tools: vec![r#"{"name":"Rust","usage":"services"}"#.into()],
            education: vec![],
        }
    }

    fn field_names(err: AppError) -> Vec<String> {
        match err {
            AppError::InvalidFields(fields) => fields.into_iter().map(|f| f.field).collect(),
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        let record = valid_input().validate().unwrap();
        assert_eq!(record.start_date, "2021-03");
        assert_eq!(record.end_date.as_deref(), Some("2023-11"));
    }

    #[test]
    fn test_missing_required_fields_reported_together() {
        let err = ExperienceInput::default().validate().unwrap_err();
        let fields = field_names(err);
        assert!(fields.contains(&"jobTitle".to_string()));
        assert!(fields.contains(&"company".to_string()));
        assert!(fields.contains(&"industry".to_string()));
        assert!(fields.contains(&"startDate".to_string()));
    }

    #[test]
    fn test_bad_date_formats_rejected() {
        for bad in ["2021", "2021-13", "21-03", "2021/03", "2021-3", "2021-03-01"] {
            let mut input = valid_input();
            input.start_date = bad.into();
            assert!(input.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut input = valid_input();
        input.end_date = Some("2020-01".into());
        assert_eq!(field_names(input.validate().unwrap_err()), vec!["endDate"]);
    }

    #[test]
    fn test_current_job_clears_end_date() {
        let mut input = valid_input();
        input.is_current_job = true;
        input.end_date = Some("not a date".into());
        let record = input.validate().unwrap();
        assert!(record.end_date.is_none());
    }

    #[test]
    fn test_blank_end_date_is_none() {
        let mut input = valid_input();
        input.end_date = Some("  ".into());
        assert!(input.validate().unwrap().end_date.is_none());
    }

    #[test]
    fn test_tools_are_canonicalized() {
        let mut input = valid_input();
        input.tools = vec!["Docker".into(), r#"{"name":"  ","usage":""}"#.into()];
        let record = input.validate().unwrap();
        assert_eq!(record.tools, vec![r#"{"name":"Docker","usage":""}"#.to_string()]);
    }

    #[test]
    fn test_tool_names_are_trimmed_on_save() {
        let mut input = valid_input();
        input.tools = vec![r#"{"name":"Zig ","usage":" build "}"#.into(), " Ada".into()];
        let record = input.validate().unwrap();
        assert_eq!(
            record.tools,
            vec![
                r#"{"name":"Zig","usage":"build"}"#.to_string(),
                r#"{"name":"Ada","usage":""}"#.to_string(),
            ]
        );
    }
}
