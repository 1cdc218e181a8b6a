// crates/gendoc/src/template.rs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

pub const DATE_TAG: &str = "{% date-generated %}";
pub const TITLE_TAG: &str = "{% title %}";
pub const CONTENT_TAG: &str = "{% content %}";

/// Fills the fixed HTML shell around the rendered document.
/// Tag replacement is literal; no escaping is performed.
pub fn fill<P: AsRef<Path>>(template_path: P, title: &str, content: &str) -> Result<String> {
    let template_path = template_path.as_ref();
    let template = fs::read_to_string(template_path)
        .with_context(|| format!("Failed to read template {}", template_path.display()))?;
    let date = Local::now().format("%Y. %m. %d.").to_string();
    Ok(fill_tags(&template, title, content, &date))
}

fn fill_tags(template: &str, title: &str, content: &str, date: &str) -> String {
    template
        .replace(DATE_TAG, date)
        .replace(TITLE_TAG, title)
        .replace(CONTENT_TAG, content)
}
