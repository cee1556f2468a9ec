//! Conversion of ANSI-SGR-annotated text to an HTML fragment.
//!
//! The pipeline is a single pass: [`Scanner`] classifies the input into
//! plain-text, URL, and SGR tokens; SGR bodies translate to inline-CSS
//! `<span>` scopes; plain text is HTML-escaped; and one whitespace-encoding
//! pass over the assembled fragment keeps indentation and interior space
//! runs visible in a browser.

mod html;
mod palette;
mod scanner;
mod sgr;


pub use palette::{CssColor, Palette, Rgb, VALID_CSS_COLORS};
pub use scanner::{Scanner, Token, TokenKind};

/// Escape 'ESC'
pub(crate) const ESC: u8 = 0x1B;
/// Bracket '['
pub(crate) const BK: u8 = b'[';
/// Escape sequence separator ';'
pub(crate) const SEP: u8 = b';';

/// Columns per tab stop unless configured otherwise.
pub const DEFAULT_TABSIZE: usize = 4;

/// The ANSI-to-HTML converter.
///
/// Pure and deterministic: a `Converter` holds only its settings, every
/// [`convert`][Self::convert] call starts with fresh render state, and no
/// input ever makes it fail.
///
/// ## Example
/// ```
/// use ansihtml_core::convert::Converter;
///
/// let html = Converter::new().convert("I like \x1b[1;34mbirds\x1b[0m");
/// assert_eq!(
///     html,
///     "<code>I like <span style=\"font-weight:bold;color:blue\">birds</span></code>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    palette: Palette,
    tabsize: usize,
    code: bool,
}

impl Converter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            palette: Palette::DEFAULT,
            tabsize: DEFAULT_TABSIZE,
            code: true,
        }
    }

    #[must_use]
    pub const fn with_tabsize(mut self, tabsize: usize) -> Self {
        self.tabsize = tabsize;
        self
    }

    /// Controls the surrounding `<code>` element (on by default).
    #[must_use]
    pub const fn with_code_wrapper(mut self, code: bool) -> Self {
        self.code = code;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Converts text with ANSI escape sequences to HTML.
    ///
    /// At most one style scope is open at a time: a non-reset SGR sequence
    /// that yields declarations closes the previous scope before opening its
    /// own, and a reset emits a close whether or not a scope is open. A
    /// scope still open when the input ends is left open, matching what a
    /// terminal would show.
    #[must_use]
    pub fn convert(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len() + text.len() / 4);
        let mut in_span = false;
        for token in Scanner::new(text) {
            match token.kind {
                TokenKind::Text => output.push_str(&html::html_encode(token.text)),
                TokenKind::Url => output.push_str(&html::url_anchor(token.text)),
                TokenKind::Sgr => {
                    let body = token.sgr_body();
                    if sgr::is_reset(body) {
                        output.push_str("</span>");
                        in_span = false;
                    } else {
                        let decls = sgr::declarations(body, &self.palette);
                        if !decls.is_empty() {
                            if in_span {
                                output.push_str("</span>");
                            }
                            output.push_str("<span style=\"");
                            output.push_str(&decls.join(";"));
                            output.push_str("\">");
                            in_span = true;
                        }
                    }
                }
            }
        }
        let encoded = html::encode_whitespace(&output, self.tabsize);
        if self.code {
            format!("<code>{encoded}</code>")
        } else {
            encoded
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts with the default palette, tab size, and `<code>` wrapper.
#[must_use]
pub fn convert(text: &str) -> String {
    Converter::new().convert(text)
}
