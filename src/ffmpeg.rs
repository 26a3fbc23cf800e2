//! libav backend: named encoders, path-guessed containers and audio passthrough sources.

pub mod codec;
pub mod container;
pub mod source;

use crate::foundation::core::Rational;
use crate::foundation::error::{ReelError, ReelResult};

pub(crate) fn init() -> ReelResult<()> {
    ffmpeg_next::init().map_err(|e| ReelError::setup(format!("failed to initialize libav: {e}")))
}

pub(crate) fn to_av(r: Rational) -> ffmpeg_next::Rational {
    ffmpeg_next::Rational::new(r.num, r.den)
}

pub(crate) fn from_av(r: ffmpeg_next::Rational) -> Rational {
    Rational::new(r.numerator(), r.denominator())
}
