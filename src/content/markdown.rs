//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::SiteConfig;
use crate::helpers::{html_escape, heading_text, slugify, url_for_root};

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
    root: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
            root: "/".to_string(),
        }
    }

    /// Create from the site configuration
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut renderer =
            Self::with_options(&config.highlight.theme, config.highlight.line_number);
        renderer.root = config.root.clone();
        renderer
    }

    /// Render markdown to HTML.
    ///
    /// Headings get ids derived from their source text, root-relative image
    /// sources are prefixed with the site root and fenced code is highlighted.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options).into_offset_iter();

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for (event, range) in parser {
            if let Some((lang, code)) = code_block.as_mut() {
                match event {
                    Event::Text(text) => code.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted = self.highlight_code(code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        code_block = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split([' ', ','])
                            .next()
                            .filter(|l| !l.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::Heading {
                    level,
                    id: None,
                    classes,
                    attrs,
                }) => {
                    let id = heading_id(&markdown[range]);
                    events.push(Event::Start(Tag::Heading {
                        level,
                        id: (!id.is_empty()).then(|| CowStr::from(id)),
                        classes,
                        attrs,
                    }));
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    let dest_url = if dest_url.starts_with('/') && !dest_url.starts_with("//") {
                        CowStr::from(url_for_root(&self.root, &dest_url))
                    } else {
                        dest_url
                    };
                    events.push(Event::Start(Tag::Image {
                        link_type,
                        dest_url,
                        title,
                        id,
                    }));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                html_escape(lang),
                highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            html_escape(lang),
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Anchor id for a heading, from the first line of its source
fn heading_id(source: &str) -> String {
    let line = source.lines().next().unwrap_or("");
    let text = line.trim().trim_start_matches('#');
    slugify(&heading_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::extract_toc;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Intro paragraph.\n\nThis is a test.");
        assert!(html.contains("<p>Intro paragraph.</p>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_headings_get_ids() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## How Scalable Yield Works\n\n### What's **pUSD**?\n");
        assert!(html.contains(r#"<h2 id="how-scalable-yield-works">"#));
        assert!(html.contains(r#"<h3 id="whats-pusd">"#));
    }

    #[test]
    fn test_heading_ids_match_toc() {
        let md = "## First `part`\n\ntext\n\n### Second: the *sequel*\n\n## Third & last ##\n";
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(md);
        for entry in extract_toc(md, 3).unwrap() {
            assert!(
                html.contains(&format!(r#"id="{}""#, entry.id)),
                "missing anchor {} in {}",
                entry.id,
                html
            );
        }
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("highlight rust"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_indented_code_block_not_rendered_as_text() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Paragraph.\n\n    let x = 1;\n");
        assert!(html.contains("highlight text"));
        assert!(!html.contains("<p>let x"));
    }

    #[test]
    fn test_image_sources_prefixed_with_root() {
        let mut config = SiteConfig::default();
        config.root = "/site/".to_string();
        let renderer = MarkdownRenderer::from_config(&config);

        let html = renderer.render(
            "![Diagram](/blog/diagram.png)\n\n![Remote](https://cdn.example.com/a.png)\n",
        );
        assert!(html.contains(r#"src="/site/blog/diagram.png""#));
        assert!(html.contains(r#"src="https://cdn.example.com/a.png""#));
    }

    #[test]
    fn test_raw_text_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Fish & chips < 5 > 3");
        assert!(html.contains("Fish &amp; chips &lt; 5 &gt; 3"));
    }
}
