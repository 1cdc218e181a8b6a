// crates/codelink/src/lib.rs

//! Adds links to `#include` statements in rendered HTML.
//!
//! Given a code block containing:
//!
//! ```text
//! #include <foo/bar.hpp>
//! foo::bar();
//! ```
//!
//! the "foo/bar.hpp" part of the first line becomes clickable, linking to
//! `link_prefix` + "foo/bar.hpp", where `link_prefix` is user specified
//! (typically the base URL of a source browser).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<code[^>]*>.*?</code>").unwrap());

// The angle brackets are already HTML-escaped by the markdown renderer.
static INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#include &lt;(.+?\.hpp)&gt;").unwrap());

pub struct Codelink {
    link_prefix: String,
}

impl Codelink {
    pub fn new<S: Into<String>>(link_prefix: S) -> Self {
        Codelink {
            link_prefix: link_prefix.into(),
        }
    }

    /// Rewrites every `#include &lt;X.hpp&gt;` token found inside a `<code>`
    /// element into a link pointing at `link_prefix` + X.hpp. Text outside
    /// code elements is left untouched.
    pub fn link_includes(&self, html: &str) -> String {
        CODE_RE
            .replace_all(html, |code: &Captures| {
                INCLUDE_RE
                    .replace_all(&code[0], |inc: &Captures| {
                        format!(
                            "#include &lt;<a href=\"{}{}\">{}</a>&gt;",
                            self.link_prefix, &inc[1], &inc[1]
                        )
                    })
                    .into_owned()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_includes_inside_code_blocks() {
        let codelink = Codelink::new("https://example.com/browse/");
        let html = "<pre><code>#include &lt;foo/bar.hpp&gt;\nfoo::bar();\n</code></pre>";
        let out = codelink.link_includes(html);
        assert_eq!(
            out,
            "<pre><code>#include &lt;<a href=\"https://example.com/browse/foo/bar.hpp\">\
             foo/bar.hpp</a>&gt;\nfoo::bar();\n</code></pre>"
        );
    }

    #[test]
    fn ignores_includes_outside_code_blocks() {
        let codelink = Codelink::new("https://example.com/");
        let html = "<p>#include &lt;foo/bar.hpp&gt;</p>";
        assert_eq!(codelink.link_includes(html), html);
    }

    #[test]
    fn ignores_non_hpp_includes() {
        let codelink = Codelink::new("https://example.com/");
        let html = "<code>#include &lt;vector&gt;</code>";
        assert_eq!(codelink.link_includes(html), html);
    }

    #[test]
    fn links_every_include_in_a_block() {
        let codelink = Codelink::new("/src/");
        let html = "<code>#include &lt;a.hpp&gt;\n#include &lt;b/c.hpp&gt;\n</code>";
        let out = codelink.link_includes(html);
        assert!(out.contains("<a href=\"/src/a.hpp\">a.hpp</a>"));
        assert!(out.contains("<a href=\"/src/b/c.hpp\">b/c.hpp</a>"));
    }

    #[test]
    fn no_op_on_html_without_code() {
        let codelink = Codelink::new("/src/");
        let html = "<h1>Title</h1><p>prose</p>";
        assert_eq!(codelink.link_includes(html), html);
    }

    #[test]
    fn inline_code_spans_are_linked_too() {
        let codelink = Codelink::new("/src/");
        let html = "<p>See <code>#include &lt;foo.hpp&gt;</code> for details.</p>";
        let out = codelink.link_includes(html);
        assert!(out.contains("<a href=\"/src/foo.hpp\">foo.hpp</a>"));
        assert!(out.starts_with("<p>See <code>"));
    }
}
