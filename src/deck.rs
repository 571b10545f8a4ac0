// ABOUTME: Deck parsing module for the slidewire application
// ABOUTME: Converts presentation markdown into slides with prose and code blocks

use crate::dom::escape_html;
use crate::errors::Result;
use crate::highlight::Highlighter;
use crate::source::SourceFile;
use comrak::{markdown_to_html, ComrakOptions};
use log::info;

/// A parsed presentation: frontmatter metadata plus an ordered list of slides.
#[derive(Debug, Clone)]
pub struct Deck {
    pub title: String,
    pub author: String,
    pub date: String,
    pub slides: Vec<Slide>,
}

/// One slide: a title and the content blocks beneath it.
#[derive(Debug, Clone)]
pub struct Slide {
    pub title: String,
    pub blocks: Vec<SlideBlock>,
}

/// A content block within a slide.
#[derive(Debug, Clone)]
pub enum SlideBlock {
    /// Markdown prose, converted to HTML at render time.
    Prose(String),
    /// A fenced code block, kept as raw source so it can be highlighted
    /// (and re-highlighted) later.
    Code {
        lang: Option<String>,
        source: String,
    },
}

impl Deck {
    /// Load and parse a deck from a local path or remote URL.
    pub fn load(source: &str) -> Result<Deck> {
        let markdown = SourceFile::new(source).content()?;
        Deck::parse(&markdown)
    }

    /// Parse a deck from markdown content.
    ///
    /// Frontmatter is three `% `-prefixed lines (title, author, date). Each
    /// top-level `#` header starts a new slide; headers inside fenced code
    /// blocks are content, not slide breaks. A deck always has at least one
    /// slide, even for empty input.
    pub fn parse(markdown: &str) -> Result<Deck> {
        let (title, author, date, content) = parse_frontmatter(markdown);

        let sections = split_into_sections(&content);
        let mut slides: Vec<Slide> = sections.iter().map(|s| parse_slide(s)).collect();
        if slides.is_empty() {
            slides.push(Slide {
                title: String::new(),
                blocks: Vec::new(),
            });
        }

        info!("Parsed deck \"{}\" with {} slides", title, slides.len());

        Ok(Deck {
            title,
            author,
            date,
            slides,
        })
    }

    /// Total number of code blocks across all slides.
    pub fn code_block_count(&self) -> usize {
        self.slides
            .iter()
            .flat_map(|s| s.blocks.iter())
            .filter(|b| matches!(b, SlideBlock::Code { .. }))
            .count()
    }
}

/// Parse frontmatter in the format: % Title\n% Author\n% Date
fn parse_frontmatter(content: &str) -> (String, String, String, String) {
    let lines: Vec<&str> = content.lines().collect();

    // Default values
    let mut title = "Presentation".to_string();
    let mut author = "".to_string();
    let mut date = "".to_string();

    if lines.len() >= 3 && lines[0].starts_with("% ") {
        title = lines[0].trim_start_matches("% ").trim().to_string();
        if lines[1].starts_with("% ") {
            author = lines[1].trim_start_matches("% ").trim().to_string();
            if lines[2].starts_with("% ") {
                date = lines[2].trim_start_matches("% ").trim().to_string();

                // Skip optional blank lines after the frontmatter
                let mut start_idx = 3;
                while start_idx < lines.len() && lines[start_idx].trim().is_empty() {
                    start_idx += 1;
                }

                return (title, author, date, lines[start_idx..].join("\n"));
            }
        }
    }

    // No frontmatter found, return the original content
    (title, author, date, content.to_string())
}

/// True for a top-level `#` header line: "# Text", "#Text", or a bare "#".
/// "##" and deeper headers stay within the current slide.
fn is_slide_header(line: &str) -> bool {
    let trimmed = line.trim();
    match trimmed.strip_prefix('#') {
        Some(rest) => !rest.starts_with('#'),
        None => false,
    }
}

/// Fence delimiter character of a code fence line (``` or ~~~, with optional
/// info string), if any. A fence only closes on the character that opened it.
fn fence_char(line: &str) -> Option<char> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
        Some('`')
    } else if trimmed.starts_with("~~~") {
        Some('~')
    } else {
        None
    }
}

/// Split content into per-slide sections on top-level headers.
/// Lines inside fenced code blocks never start a new section.
fn split_into_sections(content: &str) -> Vec<String> {
    let mut sections: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut fence: Option<char> = None;

    for line in content.lines() {
        match (fence, fence_char(line)) {
            (None, Some(open)) => fence = Some(open),
            (Some(open), Some(c)) if c == open => fence = None,
            (None, None) if is_slide_header(line) && !current.is_empty() => {
                sections.push(std::mem::take(&mut current));
            }
            _ => {}
        }
        current.push(line);
    }
    if !current.is_empty() {
        sections.push(current);
    }

    sections
        .into_iter()
        .map(|lines| lines.join("\n"))
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Parse one section into a slide: title from the leading header, then
/// alternating prose and fenced code blocks.
fn parse_slide(section: &str) -> Slide {
    let mut title = String::new();
    let mut blocks: Vec<SlideBlock> = Vec::new();
    let mut prose = String::new();
    let mut code: Option<(char, Option<String>, String)> = None;
    let mut seen_title = false;

    for line in section.lines() {
        if let Some((open, lang, source)) = code.as_mut() {
            if fence_char(line) == Some(*open) {
                blocks.push(SlideBlock::Code {
                    lang: lang.take(),
                    source: source.clone(),
                });
                code = None;
            } else {
                source.push_str(line);
                source.push('\n');
            }
            continue;
        }

        if let Some(open) = fence_char(line) {
            flush_prose(&mut prose, &mut blocks);
            let info = line.trim_start().trim_start_matches(open).trim();
            let lang = if info.is_empty() {
                None
            } else {
                Some(info.to_string())
            };
            code = Some((open, lang, String::new()));
        } else if !seen_title && is_slide_header(line) {
            // "#Text" and "# Text" are both accepted
            title = line.trim().trim_start_matches('#').trim().to_string();
            seen_title = true;
        } else {
            prose.push_str(line);
            prose.push('\n');
        }
    }

    // An unterminated fence still yields a code block
    if let Some((_, lang, source)) = code {
        blocks.push(SlideBlock::Code { lang, source });
    }
    flush_prose(&mut prose, &mut blocks);

    Slide { title, blocks }
}

fn flush_prose(prose: &mut String, blocks: &mut Vec<SlideBlock>) {
    if !prose.trim().is_empty() {
        blocks.push(SlideBlock::Prose(std::mem::take(prose)));
    } else {
        prose.clear();
    }
}

/// Convert markdown prose to HTML, with options to allow raw HTML
pub fn prose_to_html(markdown: &str) -> String {
    let mut options = ComrakOptions::default();
    options.render.unsafe_ = true;
    markdown_to_html(markdown, &options)
}

/// Render the whole deck as a standalone HTML document with every code block
/// highlighted and the highlighter's theme stylesheet embedded.
pub fn export_html(deck: &Deck, highlighter: &Highlighter) -> Result<String> {
    info!("Exporting deck \"{}\" to HTML", deck.title);

    let mut html_doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html_doc.push_str("<meta charset=\"UTF-8\">\n");
    html_doc.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html_doc.push_str(&format!("<title>{}</title>\n", escape_html(&deck.title)));
    html_doc.push_str("<style>\n");
    html_doc.push_str(highlighter.theme_css());
    html_doc.push_str("</style>\n</head>\n<body>\n");

    for slide in &deck.slides {
        html_doc.push_str("<div>");
        if !slide.title.is_empty() {
            html_doc.push_str(&format!("<h1>{}</h1>", escape_html(&slide.title)));
        }
        for block in &slide.blocks {
            match block {
                SlideBlock::Prose(markdown) => {
                    html_doc.push_str(&prose_to_html(markdown));
                }
                SlideBlock::Code { lang, source } => {
                    let markup = highlighter.highlight(lang.as_deref(), source)?;
                    let class = lang
                        .as_deref()
                        .map(|l| format!(r#" class="language-{}""#, l))
                        .unwrap_or_default();
                    html_doc.push_str(&format!("<pre><code{}>{}</code></pre>", class, markup));
                }
            }
        }
        html_doc.push_str("</div>\n");
    }

    html_doc.push_str("</body>\n</html>");

    Ok(html_doc)
}
