use std::fmt;

/// A 24-bit color value used for the palette math (faint darkening and the
/// contrast choice for inverse video).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness on a 0-255 scale.
    #[must_use]
    pub fn luminance(self) -> f32 {
        0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b)
    }

    /// Subtracts `amount` from every channel, clamped at 0.
    #[must_use]
    pub const fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A palette entry as it appears in generated CSS.
///
/// Entries render as a CSS color name where the browser name is exact and as
/// `#rrggbb` hex otherwise; both carry the RGB channels needed for the faint
/// and inverse-video computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssColor {
    Named { name: &'static str, rgb: Rgb },
    Rgb(Rgb),
}

impl CssColor {
    #[must_use]
    pub const fn named(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self::Named {
            name,
            rgb: Rgb::new(r, g, b),
        }
    }

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    #[must_use]
    pub const fn channels(self) -> Rgb {
        match self {
            Self::Named { rgb, .. } | Self::Rgb(rgb) => rgb,
        }
    }

    /// Parses `input` to a [`CssColor`]. Accepts the names in
    /// [`VALID_CSS_COLORS`], `#rrggbb`/`#rgb` hex, and `rgb(r,g,b)`.
    ///
    /// Takes a `normalizer` to be used for normalizing `input` before
    /// matching; pairs with the config module's standard normalizer.
    ///
    /// # Errors
    /// Returns [`VALID_CSS_COLORS`] if `input` matches none of the accepted
    /// forms.
    pub fn parse_from_str<S, F>(input: S, normalizer: F) -> Result<Self, &'static [&'static str]>
    where
        S: AsRef<str>,
        F: Fn(&str) -> std::borrow::Cow<'_, str>,
    {
        let normalized_cow = normalizer(input.as_ref());
        let normalized = normalized_cow.as_ref().trim();
        if let Some((name, rgb)) = NAMED_CSS_COLORS
            .iter()
            .find(|(name, _)| *name == normalized)
        {
            return Ok(Self::Named { name, rgb: *rgb });
        }
        if let Some(hex) = normalized.strip_prefix('#') {
            return parse_hex(hex).ok_or(VALID_CSS_COLORS);
        }
        if let Some(body) = normalized
            .strip_prefix("rgb(")
            .and_then(|s| s.strip_suffix(')'))
        {
            return parse_rgb_triplet(body).ok_or(VALID_CSS_COLORS);
        }
        Err(VALID_CSS_COLORS)
    }
}

impl From<Rgb> for CssColor {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, .. } => f.write_str(name),
            Self::Rgb(rgb) => rgb.fmt(f),
        }
    }
}

/// A list of the color names accepted in palette configuration.
pub static VALID_CSS_COLORS: &[&str] = &[
    "black", "blue", "cyan", "gray", "green", "magenta", "red", "white", "yellow",
];

static NAMED_CSS_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("gray", Rgb::new(128, 128, 128)),
    ("green", Rgb::new(0, 128, 0)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
];

fn parse_hex(hex: &str) -> Option<CssColor> {
    let digits: Vec<u32> = hex.chars().map(|c| c.to_digit(16)).collect::<Option<_>>()?;
    let rgb = match digits.as_slice() {
        // Shorthand `#rgb` doubles each digit.
        [r, g, b] => Rgb::new(
            (r * 17) as u8,
            (g * 17) as u8,
            (b * 17) as u8,
        ),
        [r1, r0, g1, g0, b1, b0] => Rgb::new(
            (r1 * 16 + r0) as u8,
            (g1 * 16 + g0) as u8,
            (b1 * 16 + b0) as u8,
        ),
        _ => return None,
    };
    Some(CssColor::Rgb(rgb))
}

fn parse_rgb_triplet(body: &str) -> Option<CssColor> {
    let mut channels = body.split(',').map(|part| part.trim().parse::<u8>().ok());
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    if channels.next().is_some() {
        return None;
    }
    Some(CssColor::rgb(r, g, b))
}

/// The two 8-entry color tables SGR color codes index into.
///
/// `base` answers codes `30`-`37`, `bright` answers `90`-`97`, both ordered
/// black, red, green, yellow, blue, magenta, cyan, white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub base: [CssColor; 8],
    pub bright: [CssColor; 8],
}

impl Palette {
    /// Browser-portable defaults: plain CSS names where those render close to
    /// traditional terminal colors, tuned RGB values where they do not (pure
    /// CSS green/yellow/magenta are too garish next to terminal output).
    pub const DEFAULT: Self = Self {
        base: [
            CssColor::named("black", 0, 0, 0),
            CssColor::named("red", 255, 0, 0),
            CssColor::rgb(78, 154, 6),
            CssColor::rgb(196, 160, 0),
            CssColor::named("blue", 0, 0, 255),
            CssColor::rgb(117, 80, 123),
            CssColor::named("cyan", 0, 255, 255),
            CssColor::named("white", 255, 255, 255),
        ],
        bright: [
            CssColor::rgb(85, 87, 83),
            CssColor::rgb(239, 41, 41),
            CssColor::rgb(138, 226, 52),
            CssColor::rgb(252, 233, 79),
            CssColor::rgb(114, 159, 207),
            CssColor::rgb(173, 127, 168),
            CssColor::rgb(52, 226, 226),
            CssColor::rgb(238, 238, 236),
        ],
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn identity(s: &str) -> Cow<'_, str> {
        Cow::Borrowed(s)
    }

    #[test]
    fn named_colors_parse() {
        assert_eq!(
            CssColor::parse_from_str("blue", identity),
            Ok(CssColor::named("blue", 0, 0, 255))
        );
        assert_eq!(
            CssColor::parse_from_str("mauve", identity),
            Err(VALID_CSS_COLORS)
        );
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(
            CssColor::parse_from_str("#4e9a06", identity),
            Ok(CssColor::rgb(78, 154, 6))
        );
        assert_eq!(
            CssColor::parse_from_str("#f00", identity),
            Ok(CssColor::rgb(255, 0, 0))
        );
        assert_eq!(
            CssColor::parse_from_str("#12345", identity),
            Err(VALID_CSS_COLORS)
        );
    }

    #[test]
    fn rgb_triplets_parse() {
        assert_eq!(
            CssColor::parse_from_str("rgb(196, 160, 0)", identity),
            Ok(CssColor::rgb(196, 160, 0))
        );
        assert_eq!(
            CssColor::parse_from_str("rgb(1,2)", identity),
            Err(VALID_CSS_COLORS)
        );
        assert_eq!(
            CssColor::parse_from_str("rgb(300,0,0)", identity),
            Err(VALID_CSS_COLORS)
        );
    }

    #[test]
    fn darken_clamps_at_zero() {
        assert_eq!(Rgb::new(255, 30, 0).darken(40), Rgb::new(215, 0, 0));
    }

    #[test]
    fn display_prefers_names() {
        assert_eq!(Palette::DEFAULT.base[4].to_string(), "blue");
        assert_eq!(Palette::DEFAULT.base[2].to_string(), "#4e9a06");
    }
}
