/// Replays terminal control characters against a line/column cursor.
///
/// Carriage returns rewind the column, backspaces step it left, and `ESC[K`
/// erases from the cursor to the end of the line, so overwritten output
/// (progress bars, spinners) collapses to what a terminal would actually
/// show. SGR sequences pass through untouched for the converter to pick up.
/// Trailing whitespace is trimmed per line and trailing empty lines are
/// dropped.
pub(crate) fn clean_terminal_output(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut lines: Vec<Vec<char>> = Vec::new();
    let mut line: Vec<char> = Vec::new();
    let mut col = 0usize;

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\r' if chars.get(i + 1) == Some(&'\n') => {
                lines.push(std::mem::take(&mut line));
                col = 0;
                i += 1;
            }
            '\r' => col = 0,
            '\n' => {
                lines.push(std::mem::take(&mut line));
                col = 0;
            }
            '\u{8}' => col = col.saturating_sub(1),
            '\u{1b}' if chars.get(i + 1) == Some(&'[') && chars.get(i + 2) == Some(&'K') => {
                line.truncate(col);
                i += 2;
            }
            c => {
                if col < line.len() {
                    line[col] = c;
                } else {
                    line.push(c);
                }
                col += 1;
            }
        }
        i += 1;
    }
    lines.push(line);

    for line in &mut lines {
        while line.last().is_some_and(|c| c.is_whitespace()) {
            line.pop();
        }
    }
    while lines.last().is_some_and(Vec::is_empty) {
        lines.pop();
    }
    let cleaned: Vec<String> = lines.into_iter().map(String::from_iter).collect();
    cleaned.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Case<'a> {
        input: &'a str,
        expected: &'a str,
        label: &'a str,
    }

    fn test_cases(cases: &[Case]) {
        for (idx, case) in cases.iter().enumerate() {
            assert_eq!(
                clean_terminal_output(case.input),
                case.expected,
                "Case# {} - cleanup mismatch on '{}'",
                idx,
                case.label
            );
        }
    }

    #[test]
    fn test_carriage_return_overwrites() {
        test_cases(&[
            Case {
                input: "downloading 10%\rdownloading 99%",
                expected: "downloading 99%",
                label: "progress line collapses to the last frame",
            },
            Case {
                input: "long first\rab",
                expected: "abng first",
                label: "short rewrites only cover their own columns",
            },
            Case {
                input: "one\r\ntwo",
                expected: "one\ntwo",
                label: "crlf is a line break, not an overwrite",
            },
        ]);
    }

    #[test]
    fn test_backspace_steps_left() {
        test_cases(&[
            Case {
                input: "abc\u{8}d",
                expected: "abd",
                label: "backspace then write replaces one character",
            },
            Case {
                input: "\u{8}\u{8}x",
                expected: "x",
                label: "backspace at column zero stays put",
            },
        ]);
    }

    #[test]
    fn test_erase_line() {
        test_cases(&[
            Case {
                input: "scratch\r\u{1b}[Kfinal",
                expected: "final",
                label: "erase from column zero drops the line",
            },
            Case {
                input: "keep me\u{1b}[K",
                expected: "keep me",
                label: "erase at end of line is a no-op",
            },
        ]);
    }

    #[test]
    fn test_sgr_sequences_survive() {
        test_cases(&[Case {
            input: "\u{1b}[1;34mbirds\u{1b}[0m",
            expected: "\u{1b}[1;34mbirds\u{1b}[0m",
            label: "graphic renditions are the converter's business",
        }]);
    }

    #[test]
    fn test_trailing_cleanup() {
        test_cases(&[
            Case {
                input: "padded   \nrest\n\n\n",
                expected: "padded\nrest",
                label: "trailing spaces and empty lines drop",
            },
            Case {
                input: "\n\n",
                expected: "",
                label: "all-empty input collapses to nothing",
            },
        ]);
    }
}
