//! As of now, there is only one function, [`dump_raw`], which is meant to
//! debug the text handed to the converter before any markup is generated.
//! Escape sequences arrive from captures in surprising shapes, and the dump
//! shows exactly which bytes the scanner will see.

use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `text` to `path` as a hex dump, 16 bytes per line, with a lossy
/// ASCII rendering alongside.
///
/// A line of a capture of `ls --color` looks like this:
///
/// "1B 5B 30 6D 1B 5B 30 31 3B 33 34 6D 64 6F 63 73  .[0m.[01;34mdocs"
///
/// # Errors
/// Returns the underlying [`std::io::Error`] if the file cannot be created
/// or written.
pub fn dump_raw(text: &str, path: &Path) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "Capture session at: {}", chrono::Utc::now())?;
    writeln!(writer, "{} bytes", text.len())?;
    for chunk in text.as_bytes().chunks(16) {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
        writeln!(writer, "{:<47}  {}", hex.join(" "), printable(chunk))?;
    }
    writer.flush()
}

fn printable(chunk: &[u8]) -> String {
    chunk
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                char::from(b)
            } else {
                '.'
            }
        })
        .collect()
}
