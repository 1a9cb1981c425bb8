//! Validation for schema simple types

use crate::error::{Error, Result};
use crate::util::Centipoints;

/// `ST_TextIndentLevelType`: 0 through 8
pub(crate) fn text_indent_level(value: i32) -> Result<u8> {
    match u8::try_from(value) {
        Ok(level) if level <= 8 => Ok(level),
        _ => Err(Error::InvalidValue(format!(
            "paragraph level must be in range 0..=8, got {}",
            value
        ))),
    }
}

/// `ST_TextFontSize`: 100 through 400000 hundredths of a point
pub(crate) fn text_font_size(value: Centipoints) -> Result<Centipoints> {
    if (100..=400_000).contains(&value.0) {
        Ok(value)
    } else {
        Err(Error::InvalidValue(format!(
            "font size must be in range 1..=4000 pt, got {} centipoints",
            value.0
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_indent_level() {
        for level in 0..=8 {
            assert_eq!(text_indent_level(level).unwrap(), level as u8);
        }
        for bad in [-1, 9, 256, i32::MIN] {
            assert!(matches!(text_indent_level(bad), Err(Error::InvalidValue(_))));
        }
    }

    #[test]
    fn test_text_font_size() {
        for ok in [100, 1800, 400_000] {
            assert_eq!(text_font_size(Centipoints(ok)).unwrap(), Centipoints(ok));
        }
        for bad in [0, 99, 400_001] {
            assert!(matches!(text_font_size(Centipoints(bad)), Err(Error::InvalidValue(_))));
        }
    }
}
