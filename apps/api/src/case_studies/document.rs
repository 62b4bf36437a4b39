//! Block documents as produced by the admin editor:
//!
//! ```json
//! { "time": 1640995200000, "blocks": [ { "type": "header", "data": { "text": "Challenge", "level": 2 } } ] }
//! ```
//!
//! Documents are stored verbatim and only interpreted here, at render time.
//! Parsing never fails: invalid JSON gives an empty document, and blocks
//! missing what they need are skipped, so a damaged article renders partially.
//! Image blocks whose URL is not http(s) are skipped the same way.

use maud::{html, Markup, PreEscaped};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub content: String,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph { text: String },
    Header { text: String, level: u8 },
    List { ordered: bool, items: Vec<ListItem> },
    Quote { text: String, caption: Option<String> },
    Code { code: String },
    Delimiter,
    Image { url: String, caption: Option<String> },
    /// A block type this renderer does not know. Its `text`, if any, renders
    /// as a paragraph.
    Other { kind: String, text: Option<String> },
}

impl Block {
    pub fn kind(&self) -> &str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Header { .. } => "header",
            Block::List { .. } => "list",
            Block::Quote { .. } => "quote",
            Block::Code { .. } => "code",
            Block::Delimiter => "delimiter",
            Block::Image { .. } => "image",
            Block::Other { kind, .. } => kind.as_str(),
        }
    }

    fn from_value(value: &Value) -> Option<Block> {
        let kind = value.get("type")?.as_str()?;
        let data = value.get("data").unwrap_or(&Value::Null);

        let block = match kind {
            "paragraph" => Block::Paragraph {
                text: str_field(data, "text").unwrap_or_default(),
            },
            "header" => Block::Header {
                text: str_field(data, "text").unwrap_or_default(),
                level: data
                    .get("level")
                    .and_then(Value::as_u64)
                    .map(|l| l.clamp(1, 6) as u8)
                    .unwrap_or(2),
            },
            "list" => Block::List {
                ordered: data.get("style").and_then(Value::as_str) == Some("ordered"),
                items: list_items(data.get("items")?),
            },
            "quote" => Block::Quote {
                text: str_field(data, "text").unwrap_or_default(),
                caption: str_field(data, "caption").filter(|c| !c.trim().is_empty()),
            },
            "code" => Block::Code {
                code: str_field(data, "code").unwrap_or_default(),
            },
            "delimiter" => Block::Delimiter,
            "image" => {
                let url = data
                    .get("file")
                    .and_then(|f| f.get("url"))
                    .and_then(Value::as_str)
                    .or_else(|| data.get("url").and_then(Value::as_str))
                    .map(str::trim)
                    .filter(|u| is_http_url(u))?;
                Block::Image {
                    url: url.to_string(),
                    caption: str_field(data, "caption").filter(|c| !c.trim().is_empty()),
                }
            }
            other => Block::Other {
                kind: other.to_string(),
                text: str_field(data, "text"),
            },
        };
        Some(block)
    }

    /// `None` for blocks that produce no markup.
    fn render(&self) -> Option<Markup> {
        let markup = match self {
            Block::Paragraph { text } => html! { p { (PreEscaped(text)) } },
            Block::Header { text, level } => render_heading(*level, text),
            Block::List { ordered, items } => render_list(*ordered, items),
            Block::Quote { text, caption } => html! {
                blockquote {
                    p { (PreEscaped(text)) }
                    @if let Some(caption) = caption {
                        cite { (PreEscaped(caption)) }
                    }
                }
            },
            Block::Code { code } => html! { pre { code { (code) } } },
            Block::Delimiter => html! { hr; },
            Block::Image { url, caption } => html! {
                figure {
                    img src=(url) alt=(caption.as_deref().unwrap_or_default());
                    @if let Some(caption) = caption {
                        figcaption { (PreEscaped(caption)) }
                    }
                }
            },
            Block::Other { text, .. } => {
                let text = text.as_ref()?;
                html! { p { (PreEscaped(text)) } }
            }
        };
        Some(markup)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockDocument {
    pub blocks: Vec<Block>,
}

impl BlockDocument {
    pub fn parse(content: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(content) else {
            return Self::default();
        };
        let blocks = value
            .get("blocks")
            .and_then(Value::as_array)
            .map(|blocks| blocks.iter().filter_map(Block::from_value).collect())
            .unwrap_or_default();
        Self { blocks }
    }

    /// The sequence of block types, in document order.
    pub fn block_kinds(&self) -> Vec<&str> {
        self.blocks.iter().map(Block::kind).collect()
    }

    /// Renders every block as an HTML fragment, one per line.
    ///
    /// Inline markup inside text fields (bold, italic, links) is
    /// admin-authored and emitted as-is. Code and attribute values go through
    /// maud's escaping.
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        for markup in self.blocks.iter().filter_map(Block::render) {
            out.push_str(&markup.into_string());
            out.push('\n');
        }
        out
    }
}

/// Parses `content` and renders it in one step.
pub fn render_content(content: &str) -> String {
    BlockDocument::parse(content).render_html()
}

fn str_field(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Items are plain strings in older editor output and
/// `{ "content": "...", "items": [...] }` objects in nested lists.
fn list_items(value: &Value) -> Vec<ListItem> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(ListItem {
                        content: s.clone(),
                        items: Vec::new(),
                    }),
                    Value::Object(_) => Some(ListItem {
                        content: str_field(item, "content")?,
                        items: item.get("items").map(list_items).unwrap_or_default(),
                    }),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn render_heading(level: u8, text: &str) -> Markup {
    let text = PreEscaped(text);
    match level {
        1 => html! { h1 { (text) } },
        2 => html! { h2 { (text) } },
        3 => html! { h3 { (text) } },
        4 => html! { h4 { (text) } },
        5 => html! { h5 { (text) } },
        _ => html! { h6 { (text) } },
    }
}

fn render_list(ordered: bool, items: &[ListItem]) -> Markup {
    let body = html! {
        @for item in items {
            li {
                (PreEscaped(&item.content))
                @if !item.items.is_empty() {
                    (render_list(ordered, &item.items))
                }
            }
        }
    };
    if ordered {
        html! { ol { (body) } }
    } else {
        html! { ul { (body) } }
    }
}

/// Image sources must be absolute http(s) URLs.
fn is_http_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(blocks: Value) -> String {
        json!({ "time": 1640995200000u64, "blocks": blocks, "version": "2.28.0" }).to_string()
    }

    #[test]
    fn test_saved_document_renders_same_block_sequence() {
        let content = doc(json!([
            { "type": "header", "data": { "text": "Challenge", "level": 2 } },
            { "type": "paragraph", "data": { "text": "Bounce rate was <b>60%</b>." } },
            { "type": "list", "data": { "style": "unordered", "items": ["One", "Two"] } },
            { "type": "quote", "data": { "text": "Ship it", "caption": "PM" } },
            { "type": "code", "data": { "code": "fn main() {}" } },
            { "type": "delimiter", "data": {} },
            { "type": "image", "data": { "file": { "url": "https://cdn.example.com/a.png" }, "caption": "" } }
        ]));

        // Stored verbatim, so a reload is the same text.
        let reloaded = content.clone();
        let kinds = BlockDocument::parse(&reloaded).block_kinds().join(",");
        assert_eq!(kinds, "header,paragraph,list,quote,code,delimiter,image");
    }

    #[test]
    fn test_invalid_json_is_empty_document() {
        assert!(BlockDocument::parse("not json {").blocks.is_empty());
        assert!(BlockDocument::parse("").blocks.is_empty());
        assert_eq!(render_content("{\"blocks\": 5}"), "");
    }

    #[test]
    fn test_malformed_blocks_are_skipped() {
        let content = doc(json!([
            { "data": { "text": "no type" } },
            { "type": "image", "data": { "caption": "no url" } },
            { "type": "list", "data": { "style": "ordered" } },
            { "type": "paragraph", "data": { "text": "kept" } }
        ]));
        let parsed = BlockDocument::parse(&content);
        assert_eq!(parsed.block_kinds(), vec!["paragraph"]);
        assert_eq!(parsed.render_html(), "<p>kept</p>\n");
    }

    #[test]
    fn test_header_level_defaults_and_clamps() {
        let content = doc(json!([
            { "type": "header", "data": { "text": "A" } },
            { "type": "header", "data": { "text": "B", "level": 9 } }
        ]));
        assert_eq!(render_content(&content), "<h2>A</h2>\n<h6>B</h6>\n");
    }

    #[test]
    fn test_ordered_and_nested_lists() {
        let content = doc(json!([
            { "type": "list", "data": { "style": "ordered", "items": [
                { "content": "Outer", "items": [ { "content": "Inner", "items": [] } ] }
            ] } }
        ]));
        assert_eq!(
            render_content(&content),
            "<ol><li>Outer<ol><li>Inner</li></ol></li></ol>\n"
        );
    }

    #[test]
    fn test_code_is_escaped_inline_markup_is_not() {
        let content = doc(json!([
            { "type": "code", "data": { "code": "<script>alert('x')</script>" } },
            { "type": "paragraph", "data": { "text": "see <a href=\"https://x.dev\">docs</a>" } }
        ]));
        let html = render_content(&content);
        assert!(html.contains("<pre><code>&lt;script&gt;alert("));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<a href=\"https://x.dev\">docs</a>"));
    }

    #[test]
    fn test_image_url_fallback_and_caption() {
        let content = doc(json!([
            { "type": "image", "data": { "url": "https://cdn.example.com/b.png", "caption": "Team <br>photo" } }
        ]));
        let html = render_content(&content);
        assert!(html.contains("src=\"https://cdn.example.com/b.png\""));
        assert!(html.contains("alt=\"Team &lt;br&gt;photo\""));
        assert!(html.contains("<figcaption>Team <br>photo</figcaption>"));
    }

    #[test]
    fn test_quote_without_caption() {
        let content = doc(json!([{ "type": "quote", "data": { "text": "Hi", "caption": " " } }]));
        assert_eq!(render_content(&content), "<blockquote><p>Hi</p></blockquote>\n");
    }

    #[test]
    fn test_unknown_block_renders_text_as_paragraph() {
        let content = doc(json!([
            { "type": "warning", "data": { "text": "Careful" } },
            { "type": "embed", "data": { "service": "youtube" } }
        ]));
        let parsed = BlockDocument::parse(&content);
        assert_eq!(parsed.block_kinds(), vec!["warning", "embed"]);
        assert_eq!(parsed.render_html(), "<p>Careful</p>\n");
    }

    #[test]
    fn test_delimiter_renders_rule() {
        let content = doc(json!([{ "type": "delimiter", "data": {} }]));
        assert_eq!(render_content(&content), "<hr>\n");
    }

    #[test]
    fn test_image_requires_http_url() {
        let content = doc(json!([
            { "type": "image", "data": { "url": "javascript:alert(1)" } },
            { "type": "image", "data": { "file": { "url": "data:image/png;base64,AAAA" } } },
            { "type": "image", "data": { "url": "//cdn.example.com/c.png" } },
            { "type": "image", "data": { "url": "HTTPS://cdn.example.com/d.png" } }
        ]));
        let parsed = BlockDocument::parse(&content);
        assert_eq!(parsed.block_kinds(), vec!["image"]);
        let html = parsed.render_html();
        assert!(html.contains("src=\"HTTPS://cdn.example.com/d.png\""));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("data:"));
    }

    #[test]
    fn test_image_attributes_cannot_break_out() {
        let content = doc(json!([
            { "type": "image", "data": {
                "url": "https://cdn.example.com/e.png\" onerror=\"alert(1)",
                "caption": "x\" onload=\"y"
            } }
        ]));
        let html = render_content(&content);
        assert!(html.contains("src=\"https://cdn.example.com/e.png&quot; onerror=&quot;alert(1)\""));
        assert!(html.contains("alt=\"x&quot; onload=&quot;y\""));
    }
}
