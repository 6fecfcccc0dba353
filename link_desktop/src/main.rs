//! Linkspan - add a hyperlink to a text file.
//!
//! Usage: linkspan [--config PATH] FILE START END [URL [ANCHOR]]
//!
//! Without URL the link target is taken from the clipboard.

mod clipboard;

use clipboard::SystemClipboard;
use linkspan_core::{ClipboardUrlSource, Config, Document, LinkMutator};
use std::env;
use std::path::PathBuf;
use std::process;

const DEFAULT_CONFIG: &str = "linkspan.toml";
const USAGE: &str = "Usage: linkspan [--config PATH] FILE START END [URL [ANCHOR]]";

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Args {
    config: PathBuf,
    file: PathBuf,
    start: usize,
    end: usize,
    url: Option<String>,
    anchor: Option<String>,
}

impl Args {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut config = PathBuf::from(DEFAULT_CONFIG);
        let mut positional = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--config" {
                let path = iter.next().ok_or("--config needs a path")?;
                config = PathBuf::from(path);
            } else {
                positional.push(arg.as_str());
            }
        }

        if !(3..=5).contains(&positional.len()) {
            return Err(USAGE.to_string());
        }
        let offset = |s: &str| {
            s.parse::<usize>()
                .map_err(|_| format!("'{}' is not a character offset", s))
        };

        Ok(Self {
            config,
            file: PathBuf::from(positional[0]),
            start: offset(positional[1])?,
            end: offset(positional[2])?,
            url: positional.get(3).map(|s| s.to_string()),
            anchor: positional.get(4).map(|s| s.to_string()),
        })
    }
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match Args::parse(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let config = Config::load(&args.config).map_err(|e| format!("Bad config: {}", e))?;
    let style = config.link_style().map_err(|e| format!("Bad config: {}", e))?;

    log::info!("Opening file: {}", args.file.display());
    let mut doc = Document::open_file(&args.file)
        .map_err(|e| format!("Failed to open file '{}': {}", args.file.display(), e))?;
    doc.check_range(args.start, args.end)
        .map_err(|e| e.to_string())?;
    doc.set_selection(args.start, args.end);

    let (url, anchor) = match &args.url {
        Some(url) => (
            url.clone(),
            args.anchor.clone().unwrap_or_else(|| doc.selected_text()),
        ),
        None if config.clipboard.enabled => {
            let mut source = ClipboardUrlSource::new(SystemClipboard::new());
            let selected = doc.resolver().current_url_with_anchor(&mut source);
            (selected.url, selected.anchor)
        }
        None => (String::new(), String::new()),
    };
    if url.is_empty() {
        return Err("No URL given and the clipboard holds none".to_string());
    }

    LinkMutator::new(&style)
        .add_link(&mut doc, &url, &anchor, args.start, args.end)
        .map_err(|e| e.to_string())?;

    println!("{}", doc.buffer().to_string());
    for span in doc.links().iter() {
        println!("{}..{}\t{}", span.start, span.end, span.link.url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_minimal() {
        let parsed = Args::parse(&args(&["notes.txt", "3", "8"])).unwrap();
        assert_eq!(parsed.config, PathBuf::from(DEFAULT_CONFIG));
        assert_eq!(parsed.file, PathBuf::from("notes.txt"));
        assert_eq!((parsed.start, parsed.end), (3, 8));
        assert_eq!(parsed.url, None);
    }

    #[test]
    fn test_parse_full() {
        let parsed = Args::parse(&args(&[
            "--config", "/tmp/l.toml", "notes.txt", "3", "3", "http://a.io", "site",
        ]))
        .unwrap();
        assert_eq!(parsed.config, PathBuf::from("/tmp/l.toml"));
        assert_eq!(parsed.url.as_deref(), Some("http://a.io"));
        assert_eq!(parsed.anchor.as_deref(), Some("site"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Args::parse(&args(&["notes.txt", "3"])).is_err());
        assert!(Args::parse(&args(&["notes.txt", "x", "3"])).is_err());
        assert!(Args::parse(&args(&["notes.txt", "1", "3", "--config"])).is_err());
    }
}
