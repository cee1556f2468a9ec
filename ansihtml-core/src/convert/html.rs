use std::borrow::Cow;

/// Escapes the HTML-significant characters in plain text.
///
/// Single pass, so ampersands are never re-escaped by the later
/// substitutions.
pub(crate) fn html_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps a recognized URL in an anchor that inherits the surrounding color.
///
/// Schemeless `www.` tokens get `http://` prepended in the href only; the
/// visible text stays exactly what was matched.
pub(crate) fn url_anchor(token: &str) -> String {
    let href: Cow<'_, str> = if token.contains("://") {
        Cow::Borrowed(token)
    } else {
        Cow::Owned(format!("http://{token}"))
    };
    format!(
        "<a href=\"{}\" style=\"color:inherit\">{}</a>",
        html_encode(&href),
        html_encode(token)
    )
}

/// Makes whitespace survive HTML rendering.
///
/// Runs over the fully assembled fragment: line endings normalize to `\n`,
/// every `\n` gains a visible `<br>`, tabs expand against `tabsize`-wide tab
/// stops, and space runs that browsers would collapse (line-leading runs and
/// interior runs of two or more) become `&nbsp;` entities. Single interior
/// spaces stay literal so text can still word-wrap.
pub(crate) fn encode_whitespace(text: &str, tabsize: usize) -> String {
    let text = text.replace("\r\n", "\n");
    let text = text.replace('\n', "<br>\n");
    let text = expand_tabs(&text, tabsize);
    encode_spaces(&text)
}

fn expand_tabs(text: &str, tabsize: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut col = 0usize;
    for c in text.chars() {
        match c {
            '\t' => {
                if tabsize > 0 {
                    let pad = tabsize - col % tabsize;
                    out.extend(std::iter::repeat_n(' ', pad));
                    col += pad;
                }
            }
            '\n' => {
                out.push('\n');
                col = 0;
            }
            _ => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}

fn encode_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_line_start = true;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                out.push('\n');
                at_line_start = true;
            }
            ' ' => {
                let mut run = 1usize;
                while chars.peek() == Some(&' ') {
                    chars.next();
                    run += 1;
                }
                if at_line_start || run >= 2 {
                    for _ in 0..run {
                        out.push_str("&nbsp;");
                    }
                } else {
                    out.push(' ');
                }
                at_line_start = false;
            }
            _ => {
                out.push(c);
                at_line_start = false;
            }
        }
    }
    out
}
