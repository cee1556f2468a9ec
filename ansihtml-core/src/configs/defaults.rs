use std::path::PathBuf;

use serde::Deserialize;

use crate::convert::DEFAULT_TABSIZE;

/// Represents the `[defaults]` table of the `config.toml` file.
///
/// The `[defaults]` table holds conversion and output defaults: the tab stop
/// width, whether the generated fragment is wrapped in a `<code>` element,
/// and the directory relative `--file` outputs land in. All fields are
/// optional:
///
/// ```toml
/// [defaults]
/// tabsize = 4
/// wrap = true
/// out-dir = "./"
/// ```
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Defaults {
    #[serde(default = "default_tabsize")]
    pub tabsize: usize,
    #[serde(default = "default_wrap")]
    pub wrap: bool,
    #[serde(rename = "out-dir")]
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            tabsize: DEFAULT_TABSIZE,
            wrap: true,
            out_dir: PathBuf::from("./"),
        }
    }
}

const fn default_tabsize() -> usize {
    DEFAULT_TABSIZE
}

const fn default_wrap() -> bool {
    true
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("./")
}
