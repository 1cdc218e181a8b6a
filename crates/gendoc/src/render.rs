// crates/gendoc/src/render.rs

use std::collections::HashMap;

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::{Captures, Regex};

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<h([1-6])>(.*?)</h[1-6]>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Converts preprocessed markdown to HTML and anchor-links every heading.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    anchor_headings(&out)
}

/// Gives each heading a slug id and wraps its content in a self-referential
/// link. Repeated slugs get a numeric suffix so ids stay unique.
fn anchor_headings(html: &str) -> String {
    let mut seen: HashMap<String, usize> = HashMap::new();
    HEADING_RE
        .replace_all(html, |caps: &Captures| {
            let level = &caps[1];
            let inner = &caps[2];
            let text = TAG_RE.replace_all(inner, "");
            let mut slug = slugify(&text);
            let n = seen.entry(slug.clone()).or_insert(0);
            if *n > 0 {
                slug = format!("{}_{}", slug, n);
            }
            *n += 1;
            format!(
                "<h{level} id=\"{slug}\"><a class=\"toclink\" href=\"#{slug}\">{inner}</a></h{level}>"
            )
        })
        .into_owned()
}

fn slugify(text: &str) -> String {
    let mut slug = String::new();
    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if (c.is_whitespace() || c == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
