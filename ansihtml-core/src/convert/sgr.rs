use std::borrow::Cow;

use super::palette::{CssColor, Palette};

/// How far each RGB channel drops for the faint (SGR 2) rendition.
const FAINT_ADJUSTMENT: u8 = 40;

/// Luminance above which inverse-video text flips to black for contrast.
const CONTRAST_THRESHOLD: f32 = 186.0;

/// An empty body (`ESC[m`) and the single code `0` close the open scope.
pub(crate) fn is_reset(body: &str) -> bool {
    body.is_empty() || body == "0"
}

/// Collects the CSS declarations implied by one non-reset SGR body.
///
/// Codes are walked in order; recognized text styles and palette colors
/// append declarations at the position they appear, everything else is
/// skipped without comment. Faint (2) and inverse (7) contribute no
/// declaration of their own, they change how color codes render.
pub(crate) fn declarations(body: &str, palette: &Palette) -> Vec<Cow<'static, str>> {
    let codes: Vec<&str> = body.split(';').collect();
    let faint = codes.contains(&"2");
    let inverse = codes.contains(&"7");

    let mut decls: Vec<Cow<'static, str>> = Vec::new();
    for code in codes {
        match code {
            "1" => decls.push(Cow::Borrowed("font-weight:bold")),
            "4" => decls.push(Cow::Borrowed("text-decoration:underline")),
            "9" => decls.push(Cow::Borrowed("text-decoration:line-through")),
            _ => {
                let Some(color) = lookup_color(code, palette) else {
                    continue;
                };
                if inverse {
                    decls.push(format!("background-color:{color}").into());
                    decls.push(format!("color:{}", select_text_color(color)).into());
                } else if faint {
                    let darkened = color.channels().darken(FAINT_ADJUSTMENT);
                    decls.push(format!("color:{}", CssColor::from(darkened)).into());
                } else {
                    decls.push(format!("color:{color}").into());
                }
            }
        }
    }
    decls
}

/// Resolves `3x`/`9x` codes against the base/bright palette.
///
/// Anything else, including indices 8 and 9, resolves to `None`.
fn lookup_color(code: &str, palette: &Palette) -> Option<CssColor> {
    let &[group, digit] = code.as_bytes() else {
        return None;
    };
    let table = match group {
        b'3' => &palette.base,
        b'9' => &palette.bright,
        _ => return None,
    };
    table.get(usize::from(digit.wrapping_sub(b'0'))).copied()
}

/// Black or white, whichever reads against `background`.
fn select_text_color(background: CssColor) -> &'static str {
    if background.channels().luminance() > CONTRAST_THRESHOLD {
        "black"
    } else {
        "white"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Case<'a> {
        body: &'a str,
        expected: &'a [&'a str],
        label: &'a str,
    }

    fn test_cases(cases: &[Case]) {
        let palette = Palette::DEFAULT;
        for (idx, case) in cases.iter().enumerate() {
            let decls = declarations(case.body, &palette);
            assert_eq!(
                decls, case.expected,
                "Case# {} - declaration mismatch on '{}'",
                idx, case.label
            );
        }
    }

    #[test]
    fn test_text_styles() {
        test_cases(&[
            Case {
                body: "1",
                expected: &["font-weight:bold"],
                label: "bold",
            },
            Case {
                body: "4",
                expected: &["text-decoration:underline"],
                label: "underline",
            },
            Case {
                body: "9",
                expected: &["text-decoration:line-through"],
                label: "strike-through",
            },
            Case {
                body: "1;4",
                expected: &["font-weight:bold", "text-decoration:underline"],
                label: "bold + underline, order of discovery",
            },
        ]);
    }

    #[test]
    fn test_base_and_bright_colors() {
        test_cases(&[
            Case {
                body: "34",
                expected: &["color:blue"],
                label: "base blue keeps its CSS name",
            },
            Case {
                body: "32",
                expected: &["color:#4e9a06"],
                label: "tuned base green renders as hex",
            },
            Case {
                body: "94",
                expected: &["color:#729fcf"],
                label: "bright blue",
            },
            Case {
                body: "1;34",
                expected: &["font-weight:bold", "color:blue"],
                label: "style before color",
            },
        ]);
    }

    #[test]
    fn test_faint_darkens() {
        test_cases(&[
            Case {
                body: "2;31",
                expected: &["color:#d70000"],
                label: "faint red drops each channel by 40",
            },
            Case {
                body: "2;30",
                expected: &["color:#000000"],
                label: "faint black clamps at zero",
            },
        ]);
    }

    #[test]
    fn test_inverse_video() {
        test_cases(&[
            Case {
                body: "7;34",
                expected: &["background-color:blue", "color:white"],
                label: "dark background gets white text",
            },
            Case {
                body: "7;37",
                expected: &["background-color:white", "color:black"],
                label: "light background gets black text",
            },
        ]);
    }

    #[test]
    fn test_inverse_tracks_luminance_threshold() {
        let palette = Palette::DEFAULT;
        for (i, color) in palette.base.iter().enumerate() {
            let body = format!("7;3{i}");
            let decls = declarations(&body, &palette);
            let expected_text = if color.channels().luminance() > 186.0 {
                "black"
            } else {
                "white"
            };
            assert_eq!(decls[0], format!("background-color:{color}"));
            assert_eq!(decls[1], format!("color:{expected_text}"));
        }
    }

    #[test]
    fn test_unrecognized_codes_are_silent() {
        test_cases(&[
            Case {
                body: "39",
                expected: &[],
                label: "out-of-range base index",
            },
            Case {
                body: "38",
                expected: &[],
                label: "extended-color introducer is not supported",
            },
            Case {
                body: "99",
                expected: &[],
                label: "out-of-range bright index",
            },
            Case {
                body: "999",
                expected: &[],
                label: "unknown multi-digit code",
            },
            Case {
                body: "2;7",
                expected: &[],
                label: "faint and inverse alone emit nothing",
            },
            Case {
                body: "999;1;58",
                expected: &["font-weight:bold"],
                label: "recognized codes still land amid unknown ones",
            },
        ]);
    }
}
