//! Tool and education references are stored on the experience row as arrays
//! of embedded JSON strings. Entries written by older clients may be bare
//! names, so parsing falls back instead of failing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    #[serde(default)]
    pub usage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRef {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

fn default_category() -> String {
    "Other".to_string()
}

/// Parses one stored tool string. Anything that is not a `{name, usage}`
/// object becomes a tool named after the raw text with no usage note.
///
/// Names and usage are trimmed so a tool matches its entry in the stored
/// tools order, which is trimmed on write.
pub fn parse_tool(raw: &str) -> ToolEntry {
    let tool = serde_json::from_str::<ToolEntry>(raw).unwrap_or_else(|_| ToolEntry {
        name: raw.to_string(),
        usage: String::new(),
    });
    ToolEntry {
        name: tool.name.trim().to_string(),
        usage: tool.usage.trim().to_string(),
    }
}

pub fn parse_tools(raw: &[String]) -> Vec<ToolEntry> {
    raw.iter()
        .map(|t| parse_tool(t))
        .filter(|t| !t.name.is_empty())
        .collect()
}

pub fn parse_education_ref(raw: &str) -> EducationRef {
    let mut edu = serde_json::from_str::<EducationRef>(raw).unwrap_or_else(|_| EducationRef {
        name: raw.to_string(),
        category: default_category(),
        link: None,
        date: None,
    });
    edu.name = edu.name.trim().to_string();
    edu
}

pub fn stringify_tool(tool: &ToolEntry) -> String {
    serde_json::json!({ "name": tool.name, "usage": tool.usage }).to_string()
}

pub fn stringify_education_ref(edu: &EducationRef) -> String {
    serde_json::to_string(edu).unwrap_or_else(|_| edu.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tool_object() {
        let tool = parse_tool(r#"{"name":"Rust","usage":"Backend services"}"#);
        assert_eq!(tool.name, "Rust");
        assert_eq!(tool.usage, "Backend services");
    }

    #[test]
    fn test_parse_tool_missing_usage() {
        let tool = parse_tool(r#"{"name":"Figma"}"#);
        assert_eq!(tool.name, "Figma");
        assert_eq!(tool.usage, "");
    }

    #[test]
    fn test_parse_tool_bare_name_falls_back() {
        let tool = parse_tool("Kubernetes");
        assert_eq!(tool.name, "Kubernetes");
        assert!(tool.usage.is_empty());
    }

    #[test]
    fn test_parse_tool_trims_name_and_usage() {
        let tool = parse_tool(r#"{"name":"Zig ","usage":"  Build tooling "}"#);
        assert_eq!(tool.name, "Zig");
        assert_eq!(tool.usage, "Build tooling");
        assert_eq!(parse_tool("  Terraform\t").name, "Terraform");
    }

    #[test]
    fn test_parse_tools_skips_blank_names() {
        let raw = vec![
            r#"{"name":"","usage":"x"}"#.to_string(),
            "   ".to_string(),
            r#"{"name":"Go","usage":"CLI"}"#.to_string(),
        ];
        let tools = parse_tools(&raw);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "Go");
    }

    #[test]
    fn test_stringify_then_parse_tool() {
        let tool = ToolEntry {
            name: "Postgres".into(),
            usage: "Primary store \"with quotes\"".into(),
        };
        assert_eq!(parse_tool(&stringify_tool(&tool)), tool);
    }

    #[test]
    fn test_parse_education_ref_defaults_category() {
        let edu = parse_education_ref(r#"{"name":"AWS SAA"}"#);
        assert_eq!(edu.category, "Other");
        let bare = parse_education_ref("BSc Physics");
        assert_eq!(bare.name, "BSc Physics");
        assert_eq!(bare.category, "Other");
    }
}
