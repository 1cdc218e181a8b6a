// crates/gendoc/src/main.rs

use std::io::Read;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

use catchfile::Catchfile;
use codelink::Codelink;

mod meta;
mod render;
mod template;

fn main() -> Result<()> {
    let matches = Command::new("gendoc")
        .version("0.1.0")
        .about("Reads a markdown file from stdin, prints a HTML file to stdout")
        .arg(
            Arg::new("catchfile_dir")
                .short('c')
                .long("catchfile-dir")
                .num_args(1)
                .default_value(".")
                .help("Directory of files to be included by catchfile"),
        )
        .arg(
            Arg::new("source_browser_base_url")
                .short('s')
                .long("source-browser-base-url")
                .num_args(1)
                .help("URL prefix of links in code snippets"),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .num_args(1)
                .default_value("body.html")
                .help("HTML shell template file"),
        )
        .arg(
            Arg::new("markdown_only")
                .long("markdown-only")
                .action(ArgAction::SetTrue)
                .help("Print the preprocessed markdown instead of HTML"),
        )
        .get_matches();

    let catchfile_dir = matches.get_one::<String>("catchfile_dir").unwrap();
    let template_path = matches.get_one::<String>("template").unwrap();
    let markdown_only = matches.get_flag("markdown_only");

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read markdown from stdin")?;

    let (metadata, body) = meta::split_metadata(&input);

    let engine = Catchfile::new(catchfile_dir);
    let processed = engine
        .process_str(&body)
        .context("Failed to resolve catchfile markers")?;

    if markdown_only {
        print!("{}", processed);
        return Ok(());
    }

    let mut html = render::to_html(&processed);

    // only add links to code if there's a source browser configured
    if let Some(prefix) = matches.get_one::<String>("source_browser_base_url") {
        html = Codelink::new(prefix.as_str()).link_includes(&html);
    }

    let title = metadata.get("title").map(String::as_str).unwrap_or("");
    let page = template::fill(template_path, title, &html)?;
    println!("{}", page);

    Ok(())
}
