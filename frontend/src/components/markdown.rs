//! Markdown rendering behind an adapter trait.
//!
//! Assistant replies arrive as markdown. Rendering is best effort: the
//! adapter is chosen once at startup, and a `None` from it tells the
//! caller to display the source text untouched. Swapping backends (or
//! running without one) is a one-line change here, never a per-call
//! branch in view code.

use once_cell::unsync::OnceCell;
use pulldown_cmark::{Options, Parser, html::push_html};
use yew::{AttrValue, Html, html};

/// A markdown backend the chat view can ask for HTML.
pub trait MarkdownRenderer {
    /// HTML for the source text, or `None` when this backend cannot
    /// render and the caller should fall back to plain text.
    fn render(&self, source: &str) -> Option<String>;
}

/// CommonMark backend built on pulldown-cmark.
#[derive(Debug)]
pub struct CommonMark;

impl MarkdownRenderer for CommonMark {
    fn render(&self, source: &str) -> Option<String> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(source, options);
        let mut out = String::with_capacity(source.len() * 2);
        push_html(&mut out, parser);
        Some(out)
    }
}

/// Null backend: always defers to plain text.
#[derive(Debug)]
pub struct PlainText;

impl MarkdownRenderer for PlainText {
    fn render(&self, _source: &str) -> Option<String> {
        None
    }
}

static COMMON_MARK: CommonMark = CommonMark;

thread_local! {
    static ACTIVE: OnceCell<&'static dyn MarkdownRenderer> = OnceCell::new();
}

/// The backend selected for this page load.
pub fn active() -> &'static dyn MarkdownRenderer {
    ACTIVE.with(|cell| *cell.get_or_init(|| &COMMON_MARK))
}

/// An assistant bubble body: rendered markdown when the active backend
/// produces some, else the literal text.
pub fn render_assistant(text: &str) -> Html {
    match active().render(text) {
        Some(rendered) => Html::from_html_unchecked(AttrValue::from(rendered)),
        None => html! { { text.to_string() } },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_mark_renders_emphasis() {
        let rendered = CommonMark.render("**hi**").unwrap();
        assert!(rendered.contains("<strong>hi</strong>"));
    }

    #[test]
    fn common_mark_renders_lists() {
        let rendered = CommonMark.render("- one\n- two").unwrap();
        assert!(rendered.contains("<ul>"));
        assert!(rendered.contains("<li>one</li>"));
    }

    #[test]
    fn plain_text_backend_defers() {
        // With no backend available the bubble shows "**hi**" literally.
        assert_eq!(PlainText.render("**hi**"), None);
    }
}
