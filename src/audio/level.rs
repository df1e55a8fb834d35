//! Audio level metering.

use crate::audio::sample::PcmSample;

/// Compute the RMS level of a block of samples as an integer percentage.
/// Range: 0-100.
pub fn calculate_rms_level<Sample: PcmSample>(samples: &[Sample]) -> u32 {
    if samples.is_empty() {
        return 0;
    }
    let sum_sq: f64 = samples
        .iter()
        .map(|s| {
            let v = s.to_f32_normalized() as f64;
            v * v
        })
        .sum();
    let rms = (sum_sq / samples.len() as f64).sqrt();
    (rms * 100.0).min(100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_is_zero() {
        assert_eq!(calculate_rms_level::<i16>(&[0; 128]), 0);
        assert_eq!(calculate_rms_level::<i16>(&[]), 0);
    }

    #[test]
    fn test_full_scale_is_hundred() {
        assert_eq!(calculate_rms_level(&[i16::MAX; 128]), 100);
    }

    #[test]
    fn test_half_scale() {
        let level = calculate_rms_level(&[0.5f32; 128]);
        assert_eq!(level, 50);
    }
}
