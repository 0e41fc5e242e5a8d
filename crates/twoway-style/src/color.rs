#![forbid(unsafe_code)]

//! Colors, color profiles, and downgrade logic.

use std::fmt;
use std::str::FromStr;

/// The color capability of the output terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorProfile {
    Mono,
    Ansi16,
    #[default]
    TrueColor,
}

impl ColorProfile {
    /// Map `color` to what this profile can display.
    ///
    /// Returns `None` for [`ColorProfile::Mono`], which has no foreground colors.
    #[must_use]
    pub fn downgrade(self, color: Color) -> Option<Color> {
        match (self, color) {
            (Self::Mono, _) => None,
            (Self::Ansi16, Color::Rgb(r, g, b)) => Some(Color::Ansi16(Ansi16Color::nearest(r, g, b))),
            (_, color) => Some(color),
        }
    }
}

impl fmt::Display for ColorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mono => "mono",
            Self::Ansi16 => "ansi16",
            Self::TrueColor => "truecolor",
        })
    }
}

/// Error returned when a color profile name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColorProfile(pub String);

impl fmt::Display for UnknownColorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown color profile {:?} (expected mono, ansi16, or truecolor)",
            self.0
        )
    }
}

impl std::error::Error for UnknownColorProfile {}

impl FromStr for ColorProfile {
    type Err = UnknownColorProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mono" | "none" => Ok(Self::Mono),
            "ansi16" | "16" => Ok(Self::Ansi16),
            "truecolor" | "24bit" => Ok(Self::TrueColor),
            _ => Err(UnknownColorProfile(s.to_string())),
        }
    }
}

/// A foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    Rgb(u8, u8, u8),
    Ansi16(Ansi16Color),
}

impl Color {
    /// The de-emphasized grey used for finished items.
    pub const GREY: Self = Self::Rgb(142, 142, 147);
    pub const ACCENT: Self = Self::Rgb(10, 132, 255);

    /// Whether this is the de-emphasis grey, in either palette.
    #[must_use]
    pub const fn is_muted(self) -> bool {
        matches!(
            self,
            Self::Rgb(142, 142, 147) | Self::Ansi16(Ansi16Color::BrightBlack)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ansi16Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Ansi16Color {
    const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::BrightBlack,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    /// SGR palette index (0..=15).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Typical xterm rendition of this palette entry.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Black => (0, 0, 0),
            Self::Red => (205, 0, 0),
            Self::Green => (0, 205, 0),
            Self::Yellow => (205, 205, 0),
            Self::Blue => (0, 0, 238),
            Self::Magenta => (205, 0, 205),
            Self::Cyan => (0, 205, 205),
            Self::White => (229, 229, 229),
            Self::BrightBlack => (127, 127, 127),
            Self::BrightRed => (255, 0, 0),
            Self::BrightGreen => (0, 255, 0),
            Self::BrightYellow => (255, 255, 0),
            Self::BrightBlue => (92, 92, 255),
            Self::BrightMagenta => (255, 0, 255),
            Self::BrightCyan => (0, 255, 255),
            Self::BrightWhite => (255, 255, 255),
        }
    }

    /// Palette entry closest to `(r, g, b)` by squared euclidean distance.
    ///
    /// Ties resolve to the lower palette index.
    #[must_use]
    pub fn nearest(r: u8, g: u8, b: u8) -> Self {
        let dist = |c: Self| {
            let (cr, cg, cb) = c.rgb();
            let dr = i32::from(r) - i32::from(cr);
            let dg = i32::from(g) - i32::from(cg);
            let db = i32::from(b) - i32::from(cb);
            dr * dr + dg * dg + db * db
        };
        let mut best = Self::Black;
        let mut best_dist = i32::MAX;
        for c in Self::ALL {
            let d = dist(c);
            if d < best_dist {
                best = c;
                best_dist = d;
            }
        }
        best
    }
}
