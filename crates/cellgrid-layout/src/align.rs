#![forbid(unsafe_code)]

//! Alignment flags for slots and for the grid as a whole.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Where content sits inside the space it was given.
    ///
    /// An axis with neither of its two edge flags set is centered, so
    /// `Align::TOP` means "top, horizontally centered". `CENTER` carries no
    /// edge bits and exists so that the default reads naturally.
    ///
    /// When both edges of one axis are set, slots favor `LEFT`/`TOP` while
    /// the grid placement favors `RIGHT`/`BOTTOM`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Align: u8 {
        /// Centered on both axes.
        const CENTER = 1 << 0;
        /// Top edge.
        const TOP    = 1 << 1;
        /// Bottom edge.
        const BOTTOM = 1 << 2;
        /// Left edge.
        const LEFT   = 1 << 3;
        /// Right edge.
        const RIGHT  = 1 << 4;
        /// Top-left corner.
        const TOP_LEFT = Self::TOP.bits() | Self::LEFT.bits();
        /// Top-right corner.
        const TOP_RIGHT = Self::TOP.bits() | Self::RIGHT.bits();
        /// Bottom-left corner.
        const BOTTOM_LEFT = Self::BOTTOM.bits() | Self::LEFT.bits();
        /// Bottom-right corner.
        const BOTTOM_RIGHT = Self::BOTTOM.bits() | Self::RIGHT.bits();
    }
}

impl Default for Align {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Error returned when parsing an [`Align`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAlignError {
    /// The input contained no alignment tokens.
    Empty,
    /// A token was not one of `center`, `top`, `bottom`, `left`, `right`.
    UnknownToken(String),
}

impl fmt::Display for ParseAlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty alignment"),
            Self::UnknownToken(token) => write!(f, "unknown alignment token '{token}'"),
        }
    }
}

impl std::error::Error for ParseAlignError {}

impl FromStr for Align {
    type Err = ParseAlignError;

    /// Parse `"top-left"`, `"bottom | right"`, `"center"`, ...
    ///
    /// Tokens are case-insensitive and may be joined by `-`, `|`, `_`, or
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut align = Align::empty();
        let mut seen = false;
        for token in s
            .split(|c: char| c == '-' || c == '|' || c == '_' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            seen = true;
            align |= match token.to_ascii_lowercase().as_str() {
                "center" | "centre" | "middle" => Align::CENTER,
                "top" => Align::TOP,
                "bottom" => Align::BOTTOM,
                "left" => Align::LEFT,
                "right" => Align::RIGHT,
                _ => return Err(ParseAlignError::UnknownToken(token.to_string())),
            };
        }
        if seen {
            Ok(align)
        } else {
            Err(ParseAlignError::Empty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_center() {
        assert_eq!(Align::default(), Align::CENTER);
    }

    #[test]
    fn parses_corner_names() {
        assert_eq!("top-left".parse::<Align>().unwrap(), Align::TOP_LEFT);
        assert_eq!("Bottom | Right".parse::<Align>().unwrap(), Align::BOTTOM_RIGHT);
        assert_eq!("center".parse::<Align>().unwrap(), Align::CENTER);
        assert_eq!("  left  ".parse::<Align>().unwrap(), Align::LEFT);
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert_eq!(
            "top-sideways".parse::<Align>(),
            Err(ParseAlignError::UnknownToken("sideways".into()))
        );
        assert_eq!(" - ".parse::<Align>(), Err(ParseAlignError::Empty));
    }

    #[test]
    fn error_messages_name_the_token() {
        let err = "up".parse::<Align>().unwrap_err();
        assert_eq!(err.to_string(), "unknown alignment token 'up'");
    }
}
