use super::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn create_temp_markdown_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

#[test]
fn test_parse_deck_basic() {
    let deck = Deck::parse("# First Slide\n\nHello.\n\n# Second Slide\n\nWorld.").unwrap();

    assert_eq!(deck.slides.len(), 2);
    assert_eq!(deck.slides[0].title, "First Slide");
    assert_eq!(deck.slides[1].title, "Second Slide");
}

#[test]
fn test_parse_deck_frontmatter() {
    let deck = Deck::parse("% My Talk\n% Ada\n% 2024-01-01\n\n# Intro\n\nHi.").unwrap();

    assert_eq!(deck.title, "My Talk");
    assert_eq!(deck.author, "Ada");
    assert_eq!(deck.date, "2024-01-01");
    assert_eq!(deck.slides.len(), 1);
    assert_eq!(deck.slides[0].title, "Intro");
}

#[test]
fn test_parse_deck_without_frontmatter_uses_default_title() {
    let deck = Deck::parse("# Only Slide\n\nContent.").unwrap();
    assert_eq!(deck.title, "Presentation");
}

#[test]
fn test_parse_deck_code_blocks() {
    let markdown = "# Code\n\n```rust\nfn main() {}\n```\n\nAfter.";
    let deck = Deck::parse(markdown).unwrap();

    assert_eq!(deck.slides.len(), 1);
    assert_eq!(deck.code_block_count(), 1);

    let code = deck.slides[0]
        .blocks
        .iter()
        .find_map(|b| match b {
            SlideBlock::Code { lang, source } => Some((lang.clone(), source.clone())),
            _ => None,
        })
        .expect("Expected a code block");
    assert_eq!(code.0.as_deref(), Some("rust"));
    assert_eq!(code.1, "fn main() {}\n");
}

#[test]
fn test_parse_deck_header_inside_fence_is_not_a_slide_break() {
    let markdown = "# Shell\n\n```bash\n# this is a comment\necho hi\n```";
    let deck = Deck::parse(markdown).unwrap();

    assert_eq!(deck.slides.len(), 1);
    match &deck.slides[0].blocks[0] {
        SlideBlock::Code { source, .. } => {
            assert!(source.contains("# this is a comment"));
        }
        other => panic!("Expected code block, got {:?}", other),
    }
}

#[test]
fn test_parse_deck_tilde_line_inside_backtick_fence_is_content() {
    let markdown = "# Mixed\n\n```text\nbefore\n~~~\nafter\n```";
    let deck = Deck::parse(markdown).unwrap();

    assert_eq!(deck.slides.len(), 1);
    assert_eq!(deck.code_block_count(), 1);
    match &deck.slides[0].blocks[0] {
        SlideBlock::Code { source, .. } => {
            assert!(source.contains("~~~"));
            assert!(source.contains("after"));
        }
        other => panic!("Expected code block, got {:?}", other),
    }
}

#[test]
fn test_parse_deck_tilde_fence_block() {
    let markdown = "# Tilde\n\n~~~python\nprint(\"hi\")\n~~~\n\nafter";
    let deck = Deck::parse(markdown).unwrap();

    assert_eq!(deck.code_block_count(), 1);
    match &deck.slides[0].blocks[0] {
        SlideBlock::Code { lang, source } => {
            assert_eq!(lang.as_deref(), Some("python"));
            assert!(source.contains("print"));
        }
        other => panic!("Expected code block, got {:?}", other),
    }
}

#[test]
fn test_parse_deck_empty_input_yields_one_slide() {
    let deck = Deck::parse("").unwrap();
    assert_eq!(deck.slides.len(), 1);
    assert!(deck.slides[0].blocks.is_empty());
}

#[test]
fn test_parse_deck_hash_text_without_space() {
    let deck = Deck::parse("#First\n\ntext\n\n#Second").unwrap();
    assert_eq!(deck.slides.len(), 2);
    assert_eq!(deck.slides[0].title, "First");
    assert_eq!(deck.slides[1].title, "Second");
}

#[test]
fn test_parse_deck_h2_stays_in_slide() {
    let deck = Deck::parse("# Top\n\n## Sub-heading\n\ntext").unwrap();
    assert_eq!(deck.slides.len(), 1);
}

#[test]
fn test_document_element_by_id() {
    let mut doc = Document::new();
    let container = doc.create_element("div");
    doc.set_id(container, "container");
    doc.append_child(doc.root(), container);

    assert_eq!(doc.element_by_id("container"), Some(container));
    assert_eq!(doc.element_by_id("missing"), None);
}

#[test]
fn test_document_code_blocks_query() {
    let mut doc = Document::new();
    let pre = doc.create_element("pre");
    let code = doc.create_element("code");
    doc.append_child(pre, code);
    doc.append_child(doc.root(), pre);

    // A bare <code> without a <pre> parent does not match
    let inline_code = doc.create_element("code");
    doc.append_child(doc.root(), inline_code);

    assert_eq!(doc.code_blocks(), vec![code]);
}

#[test]
fn test_document_detached_nodes_are_invisible_to_queries() {
    let mut doc = Document::new();
    let pre = doc.create_element("pre");
    let code = doc.create_element("code");
    doc.append_child(pre, code);
    doc.append_child(doc.root(), pre);
    assert_eq!(doc.code_blocks().len(), 1);

    doc.clear_children(doc.root());
    assert!(doc.code_blocks().is_empty());
}

#[test]
fn test_document_to_html_escapes_text() {
    let mut doc = Document::new();
    let pre = doc.create_element("pre");
    let code = doc.create_element("code");
    doc.set_text(code, "if a < b && b > c {}");
    doc.append_child(pre, code);
    doc.append_child(doc.root(), pre);

    let html = doc.to_html();
    assert!(html.contains("if a &lt; b &amp;&amp; b &gt; c {}"));
}

#[test]
fn test_highlighter_marks_up_rust_source() {
    let highlighter = Highlighter::new().unwrap();
    let markup = highlighter.highlight(Some("rust"), "fn main() {}\n").unwrap();

    assert!(markup.contains("<span"));
    assert!(markup.contains("main"));
}

#[test]
fn test_highlighter_unknown_language_falls_back_to_plain_text() {
    let highlighter = Highlighter::new().unwrap();
    let markup = highlighter
        .highlight(Some("not-a-language"), "plain text\n")
        .unwrap();

    assert!(markup.contains("plain text"));
}

#[test]
fn test_highlighter_is_idempotent_per_block() {
    let highlighter = Highlighter::new().unwrap();

    let mut doc = Document::new();
    let pre = doc.create_element("pre");
    let code = doc.create_element("code");
    doc.add_class(code, "language-rust");
    doc.set_text(code, "let x = 1;\n");
    doc.append_child(pre, code);
    doc.append_child(doc.root(), pre);

    highlighter.highlight_block(&mut doc, code).unwrap();
    let first = doc.rendered(code).unwrap().to_string();

    highlighter.highlight_block(&mut doc, code).unwrap();
    let second = doc.rendered(code).unwrap().to_string();

    assert_eq!(first, second);
}

#[test]
fn test_highlighter_unknown_theme_is_an_error() {
    let result = Highlighter::with_theme("no-such-theme");
    assert!(matches!(result, Err(WireError::ConfigError(_))));
}

#[test]
fn test_source_file_remote_detection() {
    assert!(SourceFile::new("https://example.com/deck.md").is_remote);
    assert!(SourceFile::new("http://example.com/deck.md").is_remote);
    assert!(!SourceFile::new("deck.md").is_remote);
    assert!(!SourceFile::new("/tmp/deck.md").is_remote);
}

#[test]
fn test_validate_file_exists() {
    let file = create_temp_markdown_file("# Slide");
    assert!(utils::validate_file_exists(file.path()).is_ok());

    let missing = std::path::Path::new("/definitely/not/a/real/path.md");
    assert!(matches!(
        utils::validate_file_exists(missing),
        Err(WireError::PathNotFoundError(_))
    ));

    let dir = TempDir::new().expect("Failed to create temp dir");
    assert!(matches!(
        utils::validate_file_exists(dir.path()),
        Err(WireError::ValidationError(_))
    ));
}

#[test]
fn test_highlighter_reports_its_theme() {
    let highlighter = Highlighter::with_theme("base16-ocean.dark").unwrap();
    assert_eq!(highlighter.theme_name(), "base16-ocean.dark");
}

#[test]
fn test_fetch_failure_returns_without_trailing_backoff() {
    // Connection refused on every attempt: the two inter-attempt backoffs
    // (1s + 2s) are expected, a third sleep after the final failure is not.
    let source = SourceFile::new("http://127.0.0.1:1/deck.md");
    let start = std::time::Instant::now();

    assert!(source.content().is_err());
    assert!(
        start.elapsed() < std::time::Duration::from_secs(6),
        "Error took {:?} to surface",
        start.elapsed()
    );
}

#[test]
fn test_source_file_local_missing_path() {
    let source = SourceFile::new("/definitely/not/a/real/path.md");
    assert!(matches!(
        source.content(),
        Err(WireError::PathNotFoundError(_))
    ));
}

#[test]
fn test_deck_load_from_local_file() {
    let file = create_temp_markdown_file("# Loaded\n\nFrom disk.");
    let deck = Deck::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(deck.slides.len(), 1);
    assert_eq!(deck.slides[0].title, "Loaded");
}

#[test]
fn test_export_html_structure() {
    let deck = Deck::parse("# Demo\n\n```rust\nfn main() {}\n```").unwrap();
    let highlighter = Highlighter::new().unwrap();

    let html = export_html(&deck, &highlighter).unwrap();

    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Demo</h1>"));
    assert!(html.contains(r#"<pre><code class="language-rust">"#));
    assert!(html.contains("<span"));
    // Theme stylesheet is embedded
    assert!(html.contains("<style>"));
}

#[test]
fn test_config_defaults() {
    let config = Config::new();
    assert_eq!(config.container_id, "container");
    assert_eq!(config.source, "presentation.md");
    assert_eq!(config.theme, "InspiredGitHub");
}

#[test]
fn test_config_from_env() {
    // Set, load, and unset in one test; no other test touches these vars
    std::env::set_var("CONTAINER_ID", "deck-root");
    std::env::set_var("PRESENTATION_URL", "talk.md");
    std::env::set_var("HIGHLIGHT_THEME", "base16-ocean.dark");

    let config = Config::from_env();

    std::env::remove_var("CONTAINER_ID");
    std::env::remove_var("PRESENTATION_URL");
    std::env::remove_var("HIGHLIGHT_THEME");

    assert_eq!(config.container_id, "deck-root");
    assert_eq!(config.source, "talk.md");
    assert_eq!(config.theme, "base16-ocean.dark");

    // With the vars gone, loading falls back to the defaults
    let config = Config::from_env();
    assert_eq!(config.container_id, "container");
    assert_eq!(config.source, "presentation.md");
    assert_eq!(config.theme, "InspiredGitHub");
}
