use std::fmt::Debug;

use num_traits::{Bounded, FromPrimitive, Num, ToPrimitive};

/// Trait for PCM sample types.
///
/// Conversion from normalized f32 follows one fixed convention: clamp the
/// input into [-1.0, 1.0], scale by the type's positive maximum, truncate
/// toward zero. Scaling by the positive maximum in both directions means the
/// most negative representable value is never produced (e.g. -1.0 maps to
/// -32767 for i16, not -32768). This matches the wire format consumers
/// expect and must not be "corrected" to an asymmetric scale.
pub trait PcmSample:
    Num
    + Copy
    + Send
    + Sync
    + PartialOrd
    + ToPrimitive
    + FromPrimitive
    + Bounded
    + Debug
    + 'static
{
    fn silence() -> Self;

    fn to_f32_normalized(self) -> f32;

    fn from_f32_clamped(value: f32) -> Self;
}

impl PcmSample for i16 {
    fn silence() -> Self {
        0
    }

    fn to_f32_normalized(self) -> f32 {
        self as f32 / i16::MAX as f32
    }

    fn from_f32_clamped(value: f32) -> Self {
        (value.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
    }
}

impl PcmSample for f32 {
    fn silence() -> Self {
        0.0
    }

    fn to_f32_normalized(self) -> f32 {
        self
    }

    fn from_f32_clamped(value: f32) -> Self {
        value.clamp(-1.0, 1.0)
    }
}
