// src/main.rs
//
// bookmark-beautifier: command line front end
//
// - Validates the input path, picks `<stem>_new.html` next to it when no output is given;
//   a bare output file name is placed next to the input too.
// - Runs the conversion and prints colored status lines.
// - `--open` shows the result in the default browser; failing to open is not an error.
//
// Logging goes to stderr via tracing; RUST_LOG overrides the level chosen by -v.

use anyhow::{bail, Context, Result};
use bookmark_beautifier::{convert_with, resolve_output_path, LineRange, Options, Template};
use clap::{ArgAction, Parser, ValueEnum};
use owo_colors::{OwoColorize, Stream::Stdout};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Bookmark export file (Netscape HTML format)
    input: PathBuf,

    /// Output file; a bare file name is placed next to the input
    /// (default: <input-stem>_new.html)
    output: Option<PathBuf>,

    /// Page heading text (default: "Bookmarks")
    #[arg(long)]
    title: Option<String>,

    /// First line (1-based) whose tag names are lowercased
    #[arg(long, default_value_t = 1)]
    start_line: usize,

    /// Last line (1-based, inclusive) whose tag names are lowercased
    #[arg(long)]
    end_line: Option<usize>,

    /// Open the result in the default browser
    #[arg(long, action = ArgAction::SetTrue)]
    open: bool,

    /// When to color status output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    if !cli.input.is_file() {
        bail!("input path is not a file: {}", cli.input.display());
    }

    let output = resolve_output_path(&cli.input, cli.output.as_deref());

    let options = Options {
        range: LineRange::new(cli.start_line, cli.end_line),
        template: cli.title.clone().map(Template::with_title).unwrap_or_default(),
    };
    debug!(title = options.template.title(), range = ?options.range, "resolved options");

    println!(
        "{} Converting {}",
        "►".if_supports_color(Stdout, |t| t.yellow()),
        cli.input.display()
    );

    if let Err(err) = convert_with(&cli.input, &output, &options) {
        println!(
            "{} Conversion failed: {}",
            "✗".if_supports_color(Stdout, |t| t.red()),
            err.path().display()
        );
        return Err(err).with_context(|| format!("failed to convert {}", cli.input.display()));
    }

    println!("{} Done", "✓".if_supports_color(Stdout, |t| t.green()));
    println!(
        "Result saved to: {}",
        output.display().if_supports_color(Stdout, |t| t.cyan())
    );

    if cli.open {
        match open::that(&output) {
            Ok(()) => println!(
                "{} Opened in browser",
                "✓".if_supports_color(Stdout, |t| t.green())
            ),
            Err(e) => {
                warn!(error = %e, "failed to open output");
                println!(
                    "{} Could not open file: {e}",
                    "✗".if_supports_color(Stdout, |t| t.red())
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .init();
}
