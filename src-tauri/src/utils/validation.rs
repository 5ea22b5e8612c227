use crate::utils::{ConvertError, ConvertResult};

/// Quality used when a transfer leaves it unset.
pub const DEFAULT_QUALITY: u8 = 100;

/// Resolves an optional UI quality value to an encoder quality.
///
/// Only whole numbers in 0..=100 are accepted.
pub fn resolve_quality(quality: Option<f64>) -> ConvertResult<u8> {
    match quality {
        None => Ok(DEFAULT_QUALITY),
        Some(q) if q.fract() == 0.0 && (0.0..=100.0).contains(&q) => Ok(q as u8),
        Some(q) => Err(ConvertError::InvalidQuality(q)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_quality_defaults_to_maximum() {
        assert_eq!(resolve_quality(None).unwrap(), 100);
        assert_eq!(resolve_quality(None).unwrap(), resolve_quality(Some(100.0)).unwrap());
    }

    #[test]
    fn whole_quality_is_accepted() {
        assert_eq!(resolve_quality(Some(80.0)).unwrap(), 80);
        assert_eq!(resolve_quality(Some(0.0)).unwrap(), 0);
    }

    #[test]
    fn fractional_quality_is_rejected() {
        assert_eq!(resolve_quality(Some(79.6)), Err(ConvertError::InvalidQuality(79.6)));
        assert_eq!(
            resolve_quality(Some(99.5)).unwrap_err().to_string(),
            "Expected integer between 0 and 100 for quality but received 99.5"
        );
    }

    #[test]
    fn out_of_range_quality_is_rejected() {
        assert_eq!(resolve_quality(Some(101.0)), Err(ConvertError::InvalidQuality(101.0)));
        assert!(resolve_quality(Some(-1.0)).is_err());
        assert!(resolve_quality(Some(f64::NAN)).is_err());
        assert!(resolve_quality(Some(f64::INFINITY)).is_err());
    }
}
