use super::{BK, ESC, SEP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Text,
    Url,
    Sgr,
}

/// One classified slice of the input. Tokens are non-overlapping, cover the
/// input, and concatenating `text` in order reproduces it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// The digit/semicolon body between `ESC[` and the trailing `m`.
    ///
    /// Only meaningful for [`TokenKind::Sgr`] tokens, whose shape the scanner
    /// guarantees.
    #[must_use]
    pub fn sgr_body(&self) -> &'a str {
        &self.text[2..self.text.len() - 1]
    }
}

/// Splits input into [`Token`]s in a single left-to-right pass.
///
/// At every position two patterns are attempted independently: an SGR escape
/// of the exact form `ESC [ digits-and-semicolons m`, and a URL introduced by
/// `http://`, `https://`, or `www.`. Escape-looking text that does not match
/// the exact form falls through as plain text. Each call starts fresh; the
/// scanner holds no state beyond its cursor.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.pos >= self.input.len() {
            return None;
        }
        match find_special(self.input, self.pos) {
            Some((start, end, kind)) if start == self.pos => {
                self.pos = end;
                Some(Token {
                    kind,
                    text: &self.input[start..end],
                })
            }
            Some((start, _, _)) => {
                let text = &self.input[self.pos..start];
                self.pos = start;
                Some(Token {
                    kind: TokenKind::Text,
                    text,
                })
            }
            None => {
                let text = &self.input[self.pos..];
                self.pos = self.input.len();
                Some(Token {
                    kind: TokenKind::Text,
                    text,
                })
            }
        }
    }
}

const URL_PREFIXES: [&str; 3] = ["http://", "https://", "www."];

fn find_special(input: &str, from: usize) -> Option<(usize, usize, TokenKind)> {
    let bytes = input.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            ESC => {
                if let Some(end) = match_sgr(bytes, i) {
                    return Some((i, end, TokenKind::Sgr));
                }
            }
            b'h' | b'w' => {
                if let Some(end) = match_url(input, i) {
                    return Some((i, end, TokenKind::Url));
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn match_sgr(bytes: &[u8], at: usize) -> Option<usize> {
    if bytes.get(at) != Some(&ESC) || bytes.get(at + 1) != Some(&BK) {
        return None;
    }
    let mut i = at + 2;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == SEP) {
        i += 1;
    }
    (bytes.get(i) == Some(&b'm')).then_some(i + 1)
}

fn match_url(input: &str, at: usize) -> Option<usize> {
    let rest = &input[at..];
    let prefix = URL_PREFIXES.iter().find(|p| rest.starts_with(**p))?;
    let tail = &rest[prefix.len()..];
    // URLs run until whitespace or an escape sequence; a bare prefix is text.
    let len = tail
        .find(|c: char| c.is_whitespace() || c == '\u{1b}')
        .unwrap_or(tail.len());
    (len > 0).then_some(at + prefix.len() + len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, &str)> {
        Scanner::new(input).map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn tokens_cover_the_input() {
        let inputs = [
            "",
            "plain text only",
            "I like \x1b[1;34mbirds\x1b[0m - www.eelstheband.com",
            "truncated \x1b[31",
            "\x1b[m\x1b[0m\x1b[1;2;3m",
            "mixed http://a.example/x \x1b[7mnested\x1b[0m www.",
            "unicode \u{00e9}\u{4e16}\u{754c} \x1b[32mok\x1b[0m",
        ];
        for input in inputs {
            let rebuilt: String = Scanner::new(input).map(|t| t.text).collect();
            assert_eq!(rebuilt, input, "token coverage broken for {input:?}");
        }
    }

    #[test]
    fn classifies_the_three_kinds() {
        assert_eq!(
            kinds("a \x1b[1mb http://c.example"),
            vec![
                (TokenKind::Text, "a "),
                (TokenKind::Sgr, "\x1b[1m"),
                (TokenKind::Text, "b "),
                (TokenKind::Url, "http://c.example"),
            ]
        );
    }

    #[test]
    fn malformed_escapes_are_text() {
        assert_eq!(kinds("\x1b[31x"), vec![(TokenKind::Text, "\x1b[31x")]);
        assert_eq!(kinds("\x1b[31"), vec![(TokenKind::Text, "\x1b[31")]);
        assert_eq!(kinds("\x1b]0;title\x07"), vec![(TokenKind::Text, "\x1b]0;title\x07")]);
    }

    #[test]
    fn empty_sgr_body_is_a_token() {
        assert_eq!(kinds("\x1b[m"), vec![(TokenKind::Sgr, "\x1b[m")]);
        let token = Scanner::new("\x1b[1;34m").next().unwrap();
        assert_eq!(token.sgr_body(), "1;34");
    }

    #[test]
    fn bare_url_prefixes_are_text() {
        assert_eq!(kinds("www."), vec![(TokenKind::Text, "www.")]);
        assert_eq!(kinds("see http:// there"), vec![
            (TokenKind::Text, "see http:// there"),
        ]);
    }

    #[test]
    fn urls_stop_at_whitespace_and_escapes() {
        assert_eq!(
            kinds("www.a.example\x1b[0m"),
            vec![
                (TokenKind::Url, "www.a.example"),
                (TokenKind::Sgr, "\x1b[0m"),
            ]
        );
        assert_eq!(
            kinds("https://a.example/path?q=1 tail"),
            vec![
                (TokenKind::Url, "https://a.example/path?q=1"),
                (TokenKind::Text, " tail"),
            ]
        );
    }
}
