use std::borrow::Cow;

use serde::{Deserialize, Deserializer};

use crate::convert::{CssColor, Palette, VALID_CSS_COLORS};

/// Represents the `[appearance]` table of the `config.toml` file.
///
/// The `[appearance]` table replaces the built-in base and bright color
/// palettes. Each row takes exactly eight CSS colors, ordered black, red,
/// green, yellow, blue, magenta, cyan, white:
///
/// ```toml
/// [appearance]
/// base = ["black", "red", "#4e9a06", "#c4a000", "blue", "#75507b", "cyan", "white"]
/// bright = ["#555753", "#ef2929", "#8ae234", "#fce94f", "#729fcf", "#ad7fa8", "#34e2e2", "#eeeeec"]
/// ```
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Appearance {
    #[serde(default = "default_base")]
    #[serde(deserialize_with = "palette_row")]
    pub base: [CssColor; 8],
    #[serde(default = "default_bright")]
    #[serde(deserialize_with = "palette_row")]
    pub bright: [CssColor; 8],
}

fn default_base() -> [CssColor; 8] {
    Palette::DEFAULT.base
}

fn default_bright() -> [CssColor; 8] {
    Palette::DEFAULT.bright
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            base: default_base(),
            bright: default_bright(),
        }
    }
}

impl From<&Appearance> for Palette {
    fn from(value: &Appearance) -> Self {
        Self {
            base: value.base,
            bright: value.bright,
        }
    }
}

/// Uses [`Cow`] to normalize strings passed to it.
///
/// If the input is already normalized, it simply returns a
/// [`Cow::Borrowed`], else will remove '-', '_', and uppercase characters so
/// that `Dark-Gray` and `darkgray` read the same.
pub const NORMALIZER: fn(&str) -> Cow<'_, str> = normalizer;

fn normalizer(s: &str) -> Cow<'_, str> {
    let mut curr_cow: Cow<'_, str> = Cow::Borrowed(s);

    if curr_cow.contains('-') || curr_cow.contains('_') {
        let owned_str = curr_cow.to_mut();
        *owned_str = owned_str.replace(['-', '_'], "");
    }

    if curr_cow.chars().any(|c| c.is_ascii_uppercase()) {
        let owned_str = curr_cow.to_mut();
        *owned_str = owned_str.to_lowercase();
    }
    curr_cow
}

fn palette_row<'de, D>(deserializer: D) -> Result<[CssColor; 8], D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<String>::deserialize(deserializer)?;
    let parsed = entries
        .iter()
        .map(|entry| {
            CssColor::parse_from_str(entry, NORMALIZER).map_err(|_| {
                serde::de::Error::custom(format!(
                    "`{entry}` is not a recognized color; use one of {VALID_CSS_COLORS:?}, `#rrggbb`, or `rgb(r,g,b)`"
                ))
            })
        })
        .collect::<Result<Vec<CssColor>, D::Error>>()?;
    parsed.try_into().map_err(|row: Vec<CssColor>| {
        serde::de::Error::custom(format!("a palette needs exactly 8 colors, got {}", row.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizer_strips_separators_and_case() {
        assert_eq!(normalizer("Dark-Gray"), "darkgray");
        assert_eq!(normalizer("blue"), "blue");
        assert!(matches!(normalizer("blue"), Cow::Borrowed(_)));
    }

    #[test]
    fn palette_rows_need_eight_entries() {
        let short: Result<Appearance, _> = toml::from_str(r#"base = ["black", "red"]"#);
        assert!(short.is_err());
    }

    #[test]
    fn unknown_colors_are_rejected() {
        let bad: Result<Appearance, _> = toml::from_str(
            r##"base = ["black", "red", "chartreuse", "#c4a000", "blue", "#75507b", "cyan", "white"]"##,
        );
        assert!(bad.is_err());
    }
}
