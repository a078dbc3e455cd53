// Content module - static reference material supplied to the viewer
//
// The registry is the ordered catalog; the library holds Markdown bodies.
// `DocumentContent` parses the bodies once at startup into blocks the
// document panel renders, and exposes the code-id -> code-text map that the
// clipboard controller copies from.

pub mod library;
pub mod registry;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
pub use registry::{Section, SECTIONS};

/// Inline run inside a paragraph, heading or list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Code(String),
}

impl Inline {
    pub fn as_str(&self) -> &str {
        match self {
            Inline::Text(s) | Inline::Strong(s) | Inline::Code(s) => s,
        }
    }
}

/// A fenced code block with a stable copy id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// `{section_id}-{n}`, numbered from 1 within the section
    pub id: String,
    pub lang: Option<String>,
    pub code: String,
}

/// Block-level element of a parsed section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(Vec<Inline>),
    Bullet { number: Option<u64>, spans: Vec<Inline> },
    Code(CodeBlock),
}

/// A registry section together with its parsed body
#[derive(Debug, Clone)]
pub struct ParsedSection {
    pub section: &'static Section,
    pub blocks: Vec<Block>,
}

impl ParsedSection {
    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Code(code) => Some(code),
            _ => None,
        })
    }
}

/// All renderable content, in registry order
#[derive(Debug, Clone, Default)]
pub struct DocumentContent {
    pub sections: Vec<ParsedSection>,
}

impl DocumentContent {
    /// Parse every registry section that has a library body
    ///
    /// Sections without a body are skipped, so they have no anchor in the
    /// rendered document.
    pub fn load() -> Self {
        let sections = SECTIONS
            .iter()
            .filter_map(|section| {
                library::body(section.id).map(|markdown| ParsedSection {
                    section,
                    blocks: parse_blocks(section.id, markdown),
                })
            })
            .collect();
        Self { sections }
    }

    /// Literal text of a code block by id
    pub fn code(&self, code_id: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.code_blocks())
            .find(|c| c.id == code_id)
            .map(|c| c.code.as_str())
    }
}

/// Parse a Markdown body into blocks, numbering code blocks per section
pub fn parse_blocks(section_id: &str, markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut spans: Vec<Inline> = Vec::new();
    let mut in_strong = false;
    let mut heading: Option<u8> = None;
    let mut code: Option<(Option<String>, String)> = None;
    // Stack of ordered-list counters (None = bullet list)
    let mut lists: Vec<Option<u64>> = Vec::new();
    // Open list items and their number, taken when the item's text is emitted
    let mut items: Vec<Option<u64>> = Vec::new();
    let mut code_count = 0usize;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some(heading_level(level));
                spans.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                let text = spans.drain(..).map(|s| s.as_str().to_string()).collect();
                blocks.push(Block::Heading {
                    level: heading.take().unwrap_or(1),
                    text,
                });
            }
            Event::Start(Tag::Paragraph) => {
                if items.is_empty() {
                    spans.clear();
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if items.is_empty() && !spans.is_empty() {
                    blocks.push(Block::Paragraph(std::mem::take(&mut spans)));
                }
            }
            Event::Start(Tag::List(first)) => {
                lists.push(first);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
            }
            Event::Start(Tag::Item) => {
                // A nested item ends the text of the item around it
                flush_item(&mut blocks, &mut spans, &mut items);
                if items.is_empty() {
                    spans.clear();
                }
                let number = match lists.last_mut() {
                    Some(Some(n)) => {
                        let current = *n;
                        *n += 1;
                        Some(current)
                    }
                    _ => None,
                };
                items.push(number);
            }
            Event::End(TagEnd::Item) => {
                flush_item(&mut blocks, &mut spans, &mut items);
                items.pop();
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                flush_item(&mut blocks, &mut spans, &mut items);
                let lang = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => Some(info.to_string()),
                    _ => None,
                };
                code = Some((lang, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, text)) = code.take() {
                    code_count += 1;
                    blocks.push(Block::Code(CodeBlock {
                        id: format!("{}-{}", section_id, code_count),
                        lang,
                        code: text.trim_end_matches('\n').to_string(),
                    }));
                }
            }
            Event::Start(Tag::Strong) => in_strong = true,
            Event::End(TagEnd::Strong) => in_strong = false,
            Event::Text(text) => {
                if let Some((_, buf)) = code.as_mut() {
                    buf.push_str(&text);
                } else if in_strong {
                    spans.push(Inline::Strong(text.to_string()));
                } else {
                    spans.push(Inline::Text(text.to_string()));
                }
            }
            Event::Code(text) => spans.push(Inline::Code(text.to_string())),
            Event::SoftBreak | Event::HardBreak => spans.push(Inline::Text(" ".to_string())),
            _ => {}
        }
    }

    blocks
}

/// Emit the pending text of the innermost open list item as a bullet
fn flush_item(blocks: &mut Vec<Block>, spans: &mut Vec<Inline>, items: &mut [Option<u64>]) {
    if spans.is_empty() {
        return;
    }
    if let Some(number) = items.last_mut() {
        blocks.push(Block::Bullet {
            number: number.take(),
            spans: std::mem::take(spans),
        });
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_blocks_numbered_per_section() {
        let md = "Intro\n\n```bash\nkubectl get pods\n```\n\ntext\n\n```yaml\na: 1\n```\n";
        let blocks = parse_blocks("k8s-basics", md);
        let ids: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Code(c) => Some(c.id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["k8s-basics-1", "k8s-basics-2"]);
    }

    #[test]
    fn test_code_text_is_literal() {
        let blocks = parse_blocks("x", "```bash\nkubectl get pods\n```\n");
        assert_eq!(
            blocks,
            vec![Block::Code(CodeBlock {
                id: "x-1".to_string(),
                lang: Some("bash".to_string()),
                code: "kubectl get pods".to_string(),
            })]
        );
    }

    #[test]
    fn test_ordered_list_numbers() {
        let blocks = parse_blocks("x", "1. one\n2. two\n");
        let numbers: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Bullet { number, .. } => *number,
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_nested_list_keeps_outer_item_text() {
        let md = "1. first\n   - detail a\n   - detail b\n2. second\n";
        let bullets: Vec<_> = parse_blocks("x", md)
            .into_iter()
            .filter_map(|b| match b {
                Block::Bullet { number, spans } => {
                    let text: String = spans.iter().map(Inline::as_str).collect();
                    Some((number, text))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            bullets,
            vec![
                (Some(1), "first".to_string()),
                (None, "detail a".to_string()),
                (None, "detail b".to_string()),
                (Some(2), "second".to_string()),
            ]
        );
    }

    #[test]
    fn test_inline_styles() {
        let blocks = parse_blocks("x", "Use **bold** and `code`.\n");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                Inline::Text("Use ".to_string()),
                Inline::Strong("bold".to_string()),
                Inline::Text(" and ".to_string()),
                Inline::Code("code".to_string()),
                Inline::Text(".".to_string()),
            ])]
        );
    }

    #[test]
    fn test_library_loads_every_section() {
        let content = DocumentContent::load();
        assert_eq!(content.sections.len(), SECTIONS.len());
        assert!(content.code("k8s-basics-1").unwrap().contains("kubectl get pods"));
        assert!(content.code("missing-1").is_none());
    }
}
