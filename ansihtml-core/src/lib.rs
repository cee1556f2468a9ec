#![doc(html_root_url = "https://docs.rs/ansihtml-core/0.1.0")]
//! `ansihtml-core` is the underlying library for [`ansihtml`](https://crates.io/crates/ansihtml)
//!
//! The interesting part lives in [`convert`]: a tokenizer and style-stack
//! renderer that turns text annotated with ANSI SGR escape sequences into an
//! HTML fragment with inline styles. [`capture`] feeds it by running an
//! external command under a pseudo-terminal, and [`configs`] supplies
//! palette and output defaults from a `config.toml`.
//!
//! The converter itself is freestanding: it never touches the config, the
//! filesystem, or the network, and it never fails. Use
//! [`convert::convert`] or [`convert::Converter`] directly from other code;
//! everything else here exists for the `ansihtml` binary.

pub mod capture;
pub mod cli;
pub mod configs;
pub mod convert;
pub mod debug;

mod macros {
    //! This module holds generic macros that are used throughout ansihtml.

    /// Takes a [`&Path`][std::path::Path] and first checks whether it exists
    /// or if it is a directory.
    ///
    /// If it doesn't exist or is not a directory, it will create
    /// the directory recursively; creating the necessary parent directories.
    ///
    /// ## Example
    /// ```
    /// use ansihtml_core::create_recursive;
    /// use std::path::PathBuf;
    /// fn mkdir() {
    ///     let path = PathBuf::from("some/dir");
    ///     create_recursive!(&path);
    ///     assert!(path.is_dir() && path.exists());
    /// }
    /// ```
    #[macro_export]
    macro_rules! create_recursive {
        ($path:expr) => {
            let create_recursive_dir = |p: &std::path::Path| {
                if !p.exists() || !p.is_dir() {
                    let mut builder = std::fs::DirBuilder::new();
                    builder.recursive(true);
                    builder.create(p).expect("Recursive mode won't panic");
                }
            };

            create_recursive_dir($path)
        };
    }

    /// Used to add a `.map_err()` to function calls that return a
    /// `Result<T, E>` to provide better context for the error and print it
    /// nicely to stdout.
    ///
    /// Takes 2 arguments and optionally a third and fourth:
    /// - The first argument is the expression or function call that would return a `Result<T, E>`
    /// - The second argument is context that better describes the returned error
    /// - The optional third argument is the 'USAGE: ansihtml ...' that would typically be printed
    ///   by `clap` for the respective command
    /// - The optional fourth argument is an additional "help:" message
    ///
    /// ## Example
    /// ```
    /// use crossterm::style::Stylize;
    /// use ansihtml_core::map_miette;
    /// fn returns_err() -> miette::Result<()> {
    ///     let text = map_miette!(
    ///         std::fs::read_to_string("/no/such/capture.txt"),
    ///         "Failed to read the capture",
    ///         format!("{} {} [OPTIONS] [COMMAND]...",
    ///             "USAGE:".bold().underlined(),
    ///             "ansihtml".bold()
    ///         ),
    ///         help = format!(
    ///             "To inspect the active palette, try `{}`.",
    ///             "ansihtml list-colors".bold().cyan()
    ///         )
    ///     )?;
    ///     drop(text);
    ///     Ok(())
    /// }
    /// let fn_err = returns_err();
    /// assert!(fn_err.is_err());
    /// ```
    #[macro_export]
    macro_rules! map_miette {
        // Clap-style USAGE: && additional "help" message
        ($expr:expr, $wrap_msg:expr, $usage:expr, help = $add_help:expr) => {
            $expr.map_err(|e| {
                use crossterm::style::Stylize;
                miette::miette!(
                    help = format!("{}\nFor more information, try `ansihtml --help`.", $add_help),
                    "{e}"
                )
                .wrap_err(format!("{}\n\n{}\n", $wrap_msg, $usage).red())
            })
        };

        // Clap-style USAGE: && default "help" message
        ($expr:expr, $wrap_msg:expr, $usage:expr) => {
            $expr.map_err(|e| {
                use crossterm::style::Stylize;
                miette::miette!(help = "For more information, try `ansihtml --help`.", "{e}")
                    .wrap_err(format!("{}\n\n{}\n", $wrap_msg, $usage).red())
            })
        };

        // Additional "help" message
        ($expr:expr, $wrap_msg:expr, help = $add_help:expr) => {
            $expr.map_err(|e| {
                use crossterm::style::Stylize;
                miette::miette!(
                    help = format!("{}\nFor more information, try `ansihtml --help`.", $add_help),
                    "{e}"
                )
                .wrap_err(format!("{}", $wrap_msg).red())
            })
        };

        // Default "help" message
        ($expr:expr, $wrap_msg:expr) => {
            $expr.map_err(|e| {
                use crossterm::style::Stylize;
                miette::miette!(help = "For more information, try `ansihtml --help`.", "{e}")
                    .wrap_err(format!("{}", $wrap_msg).red())
            })
        };
    }
}
