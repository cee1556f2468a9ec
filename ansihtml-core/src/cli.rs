use std::{
    io::{self, Write},
    path::PathBuf,
};

use crossterm::style::{Color, Stylize};
use miette::{Context, IntoDiagnostic};
use tracing::{Level, event};

use crate::{
    capture::capture,
    configs::get_config,
    convert::{Converter, Palette},
    create_recursive,
    debug::dump_raw,
    map_miette,
};

/// Builds a [`Converter`] from the initialized global config.
#[must_use]
pub fn converter_from_config() -> Converter {
    let config = get_config();
    Converter::new()
        .with_palette(Palette::from(&config.appearance))
        .with_tabsize(config.defaults.tabsize)
        .with_code_wrapper(config.defaults.wrap)
}

/// Captures `command` (or drains stdin when `command` is empty), converts the
/// text to HTML, and writes the result to stdout or `file`.
///
/// # Errors
/// Returns a diagnostic when the capture fails, the raw dump cannot be
/// written, or the output destination cannot be written.
pub async fn run_conversion(
    command: Vec<String>,
    file: Option<String>,
    debug: bool,
) -> miette::Result<()> {
    let text = if command.is_empty() {
        read_stdin().await?
    } else {
        event!(Level::DEBUG, ?command, "capturing command output");
        let captured = tokio::task::spawn_blocking(move || capture(&command))
            .await
            .into_diagnostic()
            .wrap_err("Capture task failed.".red())?;
        map_miette!(
            captured,
            "Failed to capture the command's output.",
            format!(
                "{} {} [OPTIONS] [COMMAND]...",
                "USAGE:".bold().underlined(),
                "ansihtml".bold()
            )
        )?
    };

    if debug {
        let dump_path = PathBuf::from("ansihtml-debug.txt");
        map_miette!(
            dump_raw(&text, &dump_path),
            "Failed to write the raw capture dump."
        )?;
        event!(Level::INFO, path = %dump_path.display(), "wrote raw capture dump");
    }

    let html = converter_from_config().convert(&text);
    match file {
        Some(path) => write_html_file(&html, path)?,
        None => {
            let mut stdout = io::stdout();
            writeln!(stdout, "{html}")
                .into_diagnostic()
                .wrap_err("Failed to write to stdout.".red())?;
        }
    }
    Ok(())
}

/// Reads all of standard input, decoding lossily so stray bytes in a piped
/// capture never abort the conversion.
///
/// # Errors
/// Returns a diagnostic when stdin cannot be read.
pub async fn read_stdin() -> miette::Result<String> {
    use tokio::io::AsyncReadExt;

    let mut raw = Vec::new();
    map_miette!(
        tokio::io::stdin().read_to_end(&mut raw).await,
        "Failed to read from stdin."
    )?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Prints the active palettes, one swatch per line.
///
/// # Errors
/// Returns a diagnostic when stdout cannot be written.
pub fn list_palette() -> miette::Result<()> {
    let config = get_config();
    let palette = Palette::from(&config.appearance);
    let mut stdout = io::stdout();
    for (label, row) in [("base", &palette.base), ("bright", &palette.bright)] {
        for (i, color) in row.iter().enumerate() {
            let rgb = color.channels();
            let swatch = "    ".on(Color::Rgb {
                r: rgb.r,
                g: rgb.g,
                b: rgb.b,
            });
            writeln!(stdout, "{swatch} {label}[{i}] = {color}")
                .into_diagnostic()
                .wrap_err("Failed to write to stdout.".red())?;
        }
    }
    Ok(())
}

fn write_html_file(html: &str, path: String) -> miette::Result<()> {
    let config = get_config();
    let default_out_dir = config.defaults.out_dir.clone();
    let input_path = PathBuf::from(path);

    let file_path = if input_path.is_absolute() {
        let parent = input_path.parent().unwrap_or(&default_out_dir);
        create_recursive!(parent);
        input_path
    } else {
        let joined_path = default_out_dir.join(input_path);
        let parent_path = joined_path.parent().expect("Does not have root");
        create_recursive!(parent_path);
        joined_path
    };

    event!(Level::INFO, path = %file_path.display(), "writing html output");
    map_miette!(
        std::fs::write(&file_path, html),
        format!("Failed to write HTML to '{}'", file_path.display())
    )?;
    Ok(())
}
