//! ansihtml is a CLI tool for converting terminal output to HTML.
//!
//! Given a command, ansihtml runs it under a pseudo-terminal so the program
//! colors its output as if a person were watching, then converts the ANSI
//! escape sequences in that output to an HTML fragment with inline styles.
//! Given no command, it converts whatever arrives on standard input. The
//! generated HTML goes to stdout by default so it can be piped onward, or to
//! a file with `--file`.

use ansihtml_core::{
    cli::{list_palette, run_conversion},
    configs::{ConfigOverride, initialize_config},
};
use clap::{Parser, Subcommand};
use miette::{Context, IntoDiagnostic};
use tracing::{Level, event, span};

#[derive(Parser)]
#[command(name = "ansihtml", version, about, long_about = None)]
#[command(next_line_help = true)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// The command to run and capture under a pseudo-terminal.
    ///
    /// With no command, annotated text is read from standard input instead.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
    /// Number of columns per tab stop when expanding tabs.
    #[arg(short, long, value_parser = valid_tabsize)]
    tabsize: Option<usize>,
    /// Emit the bare HTML fragment without the surrounding `<code>` element.
    #[arg(short, long)]
    bare: bool,
    /// Path to a file for the generated HTML.
    ///
    /// Relative paths land under the configured out-dir.
    #[arg(short, long)]
    file: Option<String>,
    /// Write a raw capture dump and a trace file next to the output
    #[arg(short, long)]
    debug: bool,
    #[command(subcommand)]
    command_action: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists the active base and bright palettes
    ListColors,
}

fn valid_tabsize(s: &str) -> Result<usize, String> {
    let tabsize: usize = s
        .parse()
        .map_err(|_| format!("`{s}` isn't a valid tab size"))?;
    if tabsize <= 64 {
        Ok(tabsize)
    } else {
        Err(format!(
            "'{tabsize}' is not a reasonable tab size; pick something up to 64"
        ))
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let _guard = if cli.debug {
        Some(init_tracing()?)
    } else {
        None
    };

    let span = span!(Level::TRACE, "Main");
    let _enter = span.enter();

    initialize_config(ConfigOverride {
        tabsize: cli.tabsize,
        wrap: cli.bare.then_some(false),
        out_dir: None,
    })?;

    if let Some(cmd) = cli.command_action {
        match cmd {
            Commands::ListColors => {
                event!(Level::INFO, "listing palette");
                list_palette()?;
            }
        }
    } else {
        event!(Level::TRACE, "starting conversion");
        run_conversion(cli.command, cli.file, cli.debug).await?;
    }
    Ok(())
}

fn init_tracing() -> miette::Result<tracing_appender::non_blocking::WorkerGuard> {
    let file = std::fs::File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open("./ansihtml-trace.txt")
        .into_diagnostic()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .into_diagnostic()
        .wrap_err("Failed to set subscriber")?;
    Ok(guard)
}
