//! HTML Condense CLI
//!
//! Usage:
//!   html-condense [OPTIONS] [MARKUP]...
//!
//! Options:
//!   --html                  Use the HTML-like output syntax
//!   --fragment              Parse the input as a fragment
//!   -i, --input <FILE>      Read markup from a file
//!   -c, --config <FILE>     Options file (TOML format)
//!   -O, --optimize <LEVEL>  none, format-only, granular or full
//!   -h, --help              Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::debug;

use html_condense::html::{condense_html, condense_html_fragment};
use html_condense::{CondenseOptions, FormatKind, OptimizeLevel};

#[derive(Parser)]
#[command(name = "html-condense")]
#[command(about = "Factor repeated markup into parameterized templates")]
struct Cli {
    /// Markup to condense, joined with spaces (reads --input or stdin if absent)
    markup: Vec<String>,

    /// Read markup from a file
    #[arg(short, long, conflicts_with = "markup")]
    input: Option<PathBuf>,

    /// Options file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the HTML-like output syntax
    #[arg(long)]
    html: bool,

    /// Parse the input as a fragment instead of a full document
    #[arg(long)]
    fragment: bool,

    /// Optimization level
    #[arg(short = 'O', long, value_enum)]
    optimize: Option<Level>,

    /// With granular optimization, skip inlining of shared attribute and text values
    #[arg(long)]
    no_inline_static: bool,

    /// With granular optimization, skip inlining of short templates
    #[arg(long)]
    no_inline_short: bool,

    /// Keep whitespace-only text nodes
    #[arg(long)]
    preserve_whitespace: bool,

    /// Log optimization decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    None,
    FormatOnly,
    Granular,
    Full,
}

impl Cli {
    fn options(&self) -> CondenseOptions {
        let mut options = match &self.config {
            Some(path) => match CondenseOptions::from_file(path) {
                Ok(options) => options,
                Err(e) => {
                    eprintln!("Error loading config '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            },
            None => CondenseOptions::default(),
        };

        if self.html {
            options = options.with_shared_format(FormatKind::Html.strategy());
        }
        if let Some(level) = self.optimize {
            options = options.with_level(match level {
                Level::None => OptimizeLevel::None,
                Level::FormatOnly => OptimizeLevel::FormatOnly,
                Level::Granular => OptimizeLevel::Granular {
                    inline_static: !self.no_inline_static,
                    inline_short_templates: !self.no_inline_short,
                },
                Level::Full => OptimizeLevel::Full,
            });
        }
        if self.preserve_whitespace {
            options.optimize.preserve_empty_whitespace = true;
        }
        options
    }

    fn read_markup(&self) -> io::Result<String> {
        if !self.markup.is_empty() {
            return Ok(self.markup.join(" "));
        }
        match &self.input {
            Some(path) => fs::read_to_string(path),
            None => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let options = cli.options();
    debug!("options: {:?}", options);

    let markup = match cli.read_markup() {
        Ok(markup) => markup,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            std::process::exit(1);
        }
    };

    let result = if cli.fragment {
        condense_html_fragment(&markup, &options)
    } else {
        condense_html(&markup, &options)
    };

    match result {
        Ok(condensed) => {
            println!("{}", condensed);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
