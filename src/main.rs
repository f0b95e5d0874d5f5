use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};
use preview::{PageKind, PreviewSession, SelectedFile};
use std::path::PathBuf;
use std::time::Duration;

/// kennel-preview - replay admin form edits against a page and print the live preview
#[derive(Parser, Debug)]
#[command(name = "kennel-preview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Admin page markup to load
    #[arg(value_name = "HTML_FILE")]
    page_file: PathBuf,

    /// Which page's bindings to install (hero, about, parent, puppy, announcement, review, content, image-upload)
    #[arg(short = 'p', long = "page", value_parser = parse_page)]
    page: PageKind,

    /// Type into a text field (repeatable), e.g. --set main_title=Hello
    #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Pick a select option by value (repeatable)
    #[arg(long = "select", value_name = "ID=VALUE", value_parser = parse_assignment)]
    select: Vec<(String, String)>,

    /// Choose a file for a file input (repeatable)
    #[arg(long = "file", value_name = "ID=PATH", value_parser = parse_assignment)]
    file: Vec<(String, String)>,

    /// Click an element by id (repeatable)
    #[arg(long = "click", value_name = "ID")]
    click: Vec<String>,

    /// Advance carousel clocks by this many milliseconds before printing
    #[arg(long = "tick-ms", value_name = "MS", default_value = "0")]
    tick_ms: u64,

    /// Preview config (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the serialized document instead of the outline
    #[arg(long = "html")]
    html: bool,

    /// Maximum outline lines
    #[arg(long = "outline-cap", default_value = "400")]
    outline_cap: usize,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn parse_page(s: &str) -> Result<PageKind, String> {
    s.parse()
}

/// Parse "ID=VALUE"; the value may itself contain '='.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => Ok((id.trim().to_string(), value.to_string())),
        _ => Err(format!("Expected format: ID=VALUE, got: {s}")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG overrides -d
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let markup = std::fs::read_to_string(&cli.page_file)
        .with_context(|| format!("reading {}", cli.page_file.display()))?;
    let mut builder = PreviewSession::builder(cli.page, markup);
    if let Some(path) = &cli.config {
        builder = builder
            .config_file(path)
            .with_context(|| format!("loading config {}", path.display()))?;
    }
    let mut session = builder.open();
    info!("loaded {} as {} page", cli.page_file.display(), cli.page);

    for (id, value) in &cli.set {
        if !session.type_text(id, value) {
            warn!("--set: no element #{id}");
        }
    }
    for (id, value) in &cli.select {
        if !session.select_value(id, value) {
            warn!("--select: no element #{id}");
        }
    }
    for (id, path) in &cli.file {
        if !session.choose_file(id, SelectedFile::Path(PathBuf::from(path))) {
            warn!("--file: no element #{id}");
        }
    }
    if !session.wait_for_reads(Duration::from_secs(10)) {
        bail!("{} file read(s) still pending after 10s", session.pending_reads());
    }
    for id in &cli.click {
        if !session.click(id) {
            warn!("--click: #{id} did nothing");
        }
    }
    if cli.tick_ms > 0 {
        session.tick(Duration::from_millis(cli.tick_ms));
    }

    if cli.html {
        println!("{}", session.document().to_html());
    } else {
        for line in session.document().outline(cli.outline_cap) {
            println!("{line}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_split_on_first_equals() {
        assert_eq!(
            parse_assignment("sub_text=a=b").unwrap(),
            ("sub_text".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_assignment("name=").unwrap().1, "");
        assert!(parse_assignment("=x").is_err());
        assert!(parse_assignment("novalue").is_err());
    }

    #[test]
    fn page_names_parse() {
        assert_eq!(parse_page("image-upload").unwrap(), PageKind::ImageUpload);
        assert!(parse_page("kennel").is_err());
    }

    #[test]
    fn cli_parses_repeated_actions() {
        let cli = Cli::try_parse_from([
            "kennel-preview",
            "page.html",
            "--page",
            "parent",
            "--set",
            "name=Bella",
            "--set",
            "weight_kg=4.5",
            "--click",
            "next",
            "-d",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.page, PageKind::Parent);
        assert_eq!(cli.set.len(), 2);
        assert_eq!(cli.click, ["next"]);
        assert_eq!(cli.debug, 2);
    }
}
