#![forbid(unsafe_code)]

//! Text style: an optional foreground plus attribute flags.
//!
//! Styles are plain `Copy` values. [`Style::merge`] layers one style on top
//! of another: a foreground set on the top layer wins, flags are unioned.

use bitflags::bitflags;

use crate::color::{Color, ColorProfile};

bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StyleFlags: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const STRIKETHROUGH = 0b0001_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Foreground color. `None` keeps the terminal default.
    pub fg: Option<Color>,
    pub attrs: StyleFlags,
}

impl Style {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            attrs: StyleFlags::empty(),
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.add(StyleFlags::BOLD)
    }

    #[must_use]
    pub fn dim(self) -> Self {
        self.add(StyleFlags::DIM)
    }

    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.add(StyleFlags::STRIKETHROUGH)
    }

    #[must_use]
    pub fn add(mut self, flags: StyleFlags) -> Self {
        self.attrs |= flags;
        self
    }

    #[must_use]
    pub const fn has(&self, flags: StyleFlags) -> bool {
        self.attrs.contains(flags)
    }

    /// Layer `top` over `self`.
    #[must_use]
    pub fn merge(self, top: Self) -> Self {
        Self {
            fg: top.fg.or(self.fg),
            attrs: self.attrs | top.attrs,
        }
    }

    /// Adapt the style to what `profile` can show.
    ///
    /// Colors are downgraded. [`ColorProfile::Mono`] drops the foreground;
    /// only a muted grey turns into DIM there, any other color leaves the
    /// attributes as they were.
    #[must_use]
    pub fn for_profile(self, profile: ColorProfile) -> Self {
        let Some(color) = self.fg else {
            return self;
        };
        match profile.downgrade(color) {
            Some(fg) => Self { fg: Some(fg), ..self },
            None if color.is_muted() => Self { fg: None, ..self }.dim(),
            None => Self { fg: None, ..self },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Ansi16Color;

    #[test]
    fn default_has_no_fg_or_flags() {
        assert_eq!(Style::new(), Style::default());
        assert_eq!(Style::new().fg, None);
        assert!(Style::new().attrs.is_empty());
    }

    #[test]
    fn builders_accumulate_flags() {
        let s = Style::new().bold().strikethrough();
        assert!(s.has(StyleFlags::BOLD));
        assert!(s.has(StyleFlags::STRIKETHROUGH));
        assert!(!s.has(StyleFlags::DIM));
    }

    #[test]
    fn merge_top_fg_wins_and_flags_union() {
        let base = Style::new().fg(Color::ACCENT).bold();
        let top = Style::new().fg(Color::GREY).strikethrough();
        let merged = base.merge(top);
        assert_eq!(merged.fg, Some(Color::GREY));
        assert!(merged.has(StyleFlags::BOLD | StyleFlags::STRIKETHROUGH));
    }

    #[test]
    fn merge_keeps_base_fg_when_top_has_none() {
        let merged = Style::new().fg(Color::ACCENT).merge(Style::new().bold());
        assert_eq!(merged.fg, Some(Color::ACCENT));
    }

    #[test]
    fn mono_turns_grey_into_dim() {
        let s = Style::new().fg(Color::GREY).strikethrough();
        let mono = s.for_profile(ColorProfile::Mono);
        assert_eq!(mono.fg, None);
        assert!(mono.has(StyleFlags::DIM | StyleFlags::STRIKETHROUGH));
    }

    #[test]
    fn mono_accent_does_not_dim() {
        let s = Style::new().fg(Color::ACCENT).bold();
        let mono = s.for_profile(ColorProfile::Mono);
        assert_eq!(mono.fg, None);
        assert!(mono.has(StyleFlags::BOLD));
        assert!(!mono.has(StyleFlags::DIM));
    }

    #[test]
    fn mono_dims_downgraded_grey_too() {
        let s = Style::new()
            .fg(Color::GREY)
            .for_profile(ColorProfile::Ansi16)
            .for_profile(ColorProfile::Mono);
        assert!(s.has(StyleFlags::DIM));
    }

    #[test]
    fn ansi16_downgrades_fg() {
        let s = Style::new().fg(Color::GREY).for_profile(ColorProfile::Ansi16);
        assert_eq!(s.fg, Some(Color::Ansi16(Ansi16Color::BrightBlack)));
        assert!(!s.has(StyleFlags::DIM));
    }

    #[test]
    fn uncolored_style_unchanged_by_profile() {
        let s = Style::new().bold();
        assert_eq!(s.for_profile(ColorProfile::Mono), s);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let s = Style::new().fg(Color::GREY).strikethrough();
        let json = serde_json::to_string(&s).unwrap();
        let back: Style = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
