use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::Point;

/// 0-based frame index on the output timeline. Doubles as the video presentation timestamp.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_pts(self) -> i64 {
        self.0 as i64
    }
}

/// Rational unit in which a stream's timestamps are counted (`num/den` seconds per tick).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    pub fn is_valid(self) -> bool {
        self.num > 0 && self.den > 0
    }

    /// Convert `ts` ticks of `from` into ticks of `to`.
    ///
    /// Rounds to nearest with ties away from zero, the same rule libav applies when it rescales
    /// packet timestamps.
    pub fn rescale(ts: i64, from: Rational, to: Rational) -> i64 {
        if from == to {
            return ts;
        }

        let num = i128::from(ts) * i128::from(from.num) * i128::from(to.den);
        let den = i128::from(from.den) * i128::from(to.num);
        if den == 0 {
            return ts;
        }

        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
        let half = den / 2;
        let rounded = if num >= 0 {
            (num + half) / den
        } else {
            -((-num + half) / den)
        };
        rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

impl Fps {
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        if i32::try_from(num).is_err() || i32::try_from(den).is_err() {
            return Err(ReelError::validation("Fps num/den must fit in i32"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Simulated clock value of frame `idx`, computed as `idx * den / num` so that it does not
    /// accumulate error over long runs.
    pub fn frame_time_secs(self, idx: FrameIndex) -> f64 {
        (idx.0 as f64 * f64::from(self.den)) / f64::from(self.num)
    }

    /// Encoder time base: one tick per frame.
    pub fn time_base(self) -> Rational {
        Rational::new(self.den as i32, self.num as i32)
    }

    pub fn as_rational(self) -> Rational {
        Rational::new(self.num as i32, self.den as i32)
    }
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
