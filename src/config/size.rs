//! `WxH` size strings.

use crate::error::FormatError;
use std::fmt;
use std::str::FromStr;

/// A width/height pair in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse a string matching `^\d+x\d+$`. Whitespace, signs, extra fields
    /// and values that overflow `u32` are rejected.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let err = || FormatError {
            input: text.to_string(),
        };

        let (w, h) = text.split_once('x').ok_or_else(err)?;
        let dimension = |s: &str| {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            s.parse::<u32>().map_err(|_| err())
        };

        Ok(Self::new(dimension(w)?, dimension(h)?))
    }
}

impl FromStr for Size {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Size::parse("240x80"), Ok(Size::new(240, 80)));
        assert_eq!(Size::parse("0x0"), Ok(Size::new(0, 0)));
        assert_eq!("064x64".parse::<Size>(), Ok(Size::new(64, 64)));
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "abcx80", "240", "240x", "x80", "240x80x10", "240X80", " 240x80", "240x80 ",
            "-1x5", "+1x5", "2.5x3", "", "99999999999x1",
        ] {
            let err = Size::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn test_display_round_trip() {
        let size = Size::new(32, 48);
        assert_eq!(Size::parse(&size.to_string()), Ok(size));
    }
}
