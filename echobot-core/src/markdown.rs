//! Bot text formatting
//!
//! Bot replies are escaped first and then given a small subset of
//! markdown, applied as a fixed sequence of substitutions:
//!
//! 1. line breaks to `<br>`
//! 2. `**bold**` to `<strong>`
//! 3. `*italic*` to `<em>`
//! 4. fenced ```` ``` ```` blocks to `<pre><code>`
//! 5. `` `inline` `` code to `<code>`
//! 6. runs of two or more spaces to `&nbsp;` per space
//!
//! The order matters: newlines are gone before fences are matched, so a
//! fenced block holds `<br>` separators, and emphasis inside a fence has
//! already been converted.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// `.` in the emphasis patterns must not cross line terminators.
static BOLD: Lazy<Regex> = Lazy::new(|| compile(r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*"));
static ITALIC: Lazy<Regex> = Lazy::new(|| compile(r"\*([^\n\r\x{2028}\x{2029}]*?)\*"));
static FENCE: Lazy<Regex> = Lazy::new(|| compile(r"(?s)```(.*?)```"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| compile(r"`([^`]+)`"));
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| compile(r" {2,}"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid formatter pattern {pattern}: {e}"))
}

/// Escape text the way a DOM text node serializes.
///
/// Only `&`, `<`, `>` and the no-break space are rewritten; quotes pass
/// through unchanged.
pub fn sanitize_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Convert bot text to safe HTML with light markdown.
pub fn markdown_to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let html = sanitize_html(text).replace('\n', "<br>");
    let html = BOLD.replace_all(&html, "<strong>${1}</strong>");
    let html = ITALIC.replace_all(&html, "<em>${1}</em>");
    let html = FENCE.replace_all(&html, "<pre><code>${1}</code></pre>");
    let html = INLINE_CODE.replace_all(&html, "<code>${1}</code>");
    let html = SPACE_RUN.replace_all(&html, |caps: &Captures| "&nbsp;".repeat(caps[0].len()));

    html.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(markdown_to_html(""), "");
    }

    #[test]
    fn test_sanitize_escapes_markup() {
        assert_eq!(
            sanitize_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
        assert_eq!(sanitize_html("Tom & \"Jerry\""), "Tom &amp; \"Jerry\"");
        assert_eq!(sanitize_html("a\u{a0}b"), "a&nbsp;b");
    }

    #[test]
    fn test_markup_in_bot_text_is_inert() {
        assert_eq!(
            markdown_to_html("<b>hi</b>\n**there**"),
            "&lt;b&gt;hi&lt;/b&gt;<br><strong>there</strong>"
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(markdown_to_html("one\ntwo\n"), "one<br>two<br>");
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            markdown_to_html("**bold** and *italic*"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn test_bold_is_non_greedy() {
        assert_eq!(
            markdown_to_html("**a** b **c**"),
            "<strong>a</strong> b <strong>c</strong>"
        );
    }

    #[test]
    fn test_lone_asterisk_is_kept() {
        assert_eq!(markdown_to_html("2 * 3"), "2 * 3");
    }

    #[test]
    fn test_emphasis_spans_source_lines() {
        assert_eq!(markdown_to_html("**a\nb**"), "<strong>a<br>b</strong>");
    }

    #[test]
    fn test_carriage_return_blocks_emphasis() {
        assert_eq!(
            markdown_to_html("**a\r\nb**"),
            "<em></em>a\r<br>b<em></em>"
        );
    }

    #[test]
    fn test_fenced_block_spans_lines() {
        assert_eq!(
            markdown_to_html("```let a = 1;\nlet b = 2;```"),
            "<pre><code>let a = 1;<br>let b = 2;</code></pre>"
        );
    }

    #[test]
    fn test_emphasis_inside_fence_already_converted() {
        assert_eq!(
            markdown_to_html("```a *b* c```"),
            "<pre><code>a <em>b</em> c</code></pre>"
        );
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            markdown_to_html("run `cargo fmt` now"),
            "run <code>cargo fmt</code> now"
        );
        assert_eq!(markdown_to_html("empty `` ticks"), "empty `` ticks");
    }

    #[test]
    fn test_space_runs_preserved() {
        assert_eq!(markdown_to_html("a  b"), "a&nbsp;&nbsp;b");
        assert_eq!(markdown_to_html("a   b c"), "a&nbsp;&nbsp;&nbsp;b c");
    }

    #[test]
    fn test_indented_code_keeps_indent() {
        assert_eq!(
            markdown_to_html("```\n    x```"),
            "<pre><code><br>&nbsp;&nbsp;&nbsp;&nbsp;x</code></pre>"
        );
    }

    #[test]
    fn test_escaped_entities_survive_formatting() {
        assert_eq!(
            markdown_to_html("`a < b && c`"),
            "<code>a &lt; b &amp;&amp; c</code>"
        );
    }
}
