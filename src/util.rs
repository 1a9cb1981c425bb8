//! Measurement units

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

const EMU_PER_INCH: i64 = 914_400;
const EMU_PER_POINT: i64 = 12_700;
const EMU_PER_CM: i64 = 360_000;

/// A length in English Metric Units, the native DrawingML coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length(i64);

impl Length {
    pub const fn emu(emu: i64) -> Self {
        Length(emu)
    }

    pub fn inches(inches: f64) -> Self {
        Length((inches * EMU_PER_INCH as f64).round() as i64)
    }

    pub fn pt(points: f64) -> Self {
        Length((points * EMU_PER_POINT as f64).round() as i64)
    }

    pub fn cm(cm: f64) -> Self {
        Length((cm * EMU_PER_CM as f64).round() as i64)
    }

    /// Value in EMU
    pub fn to_emu(self) -> i64 {
        self.0
    }

    pub fn to_inches(self) -> f64 {
        self.0 as f64 / EMU_PER_INCH as f64
    }

    pub fn to_pt(self) -> f64 {
        self.0 as f64 / EMU_PER_POINT as f64
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Length {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Length)
    }
}

impl From<Pt> for Length {
    fn from(value: Pt) -> Self {
        Length::pt(value.0)
    }
}

/// A size in points, as a caller would write it
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Pt(pub f64);

/// A font size in hundredths of a point (`a:rPr/@sz`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Centipoints(pub u32);

impl Centipoints {
    pub fn to_pt(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl TryFrom<Pt> for Centipoints {
    type Error = Error;

    /// Rounds to the nearest hundredth; NaN, infinite and negative sizes are rejected
    fn try_from(value: Pt) -> Result<Self, Self::Error> {
        let centipoints = (value.0 * 100.0).round();
        if (0.0..=f64::from(u32::MAX)).contains(&centipoints) {
            Ok(Centipoints(centipoints as u32))
        } else {
            Err(Error::InvalidValue(format!(
                "font size must be a non-negative number of points, got {}",
                value.0
            )))
        }
    }
}

impl From<u32> for Centipoints {
    fn from(value: u32) -> Self {
        Centipoints(value)
    }
}

impl fmt::Display for Centipoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Centipoints {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Centipoints)
    }
}
