use std::fmt;

use chrono::{DateTime, Utc};

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z, the
/// reference instant bplist dates are measured from.
pub const EPOCH_OFFSET_SECS: i64 = 978_307_200;

/// A bplist date: a float64 count of seconds since 2001-01-01T00:00:00Z.
///
/// The raw offset is kept as decoded. Conversion to a calendar
/// timestamp happens on demand because not every finite `f64` maps to
/// a representable [`DateTime`].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct PlistDate(f64);

impl PlistDate {
    pub fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    /// Seconds relative to 2001-01-01T00:00:00Z (negative before it).
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// The date as a UTC timestamp, or `None` for NaN, infinities and
    /// offsets outside chrono's range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        let whole = self.0.floor();
        if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
            return None;
        }
        let nanos = (((self.0 - whole) * 1e9).round() as u32).min(999_999_999);
        let secs = (whole as i64).checked_add(EPOCH_OFFSET_SECS)?;
        DateTime::from_timestamp(secs, nanos)
    }
}

impl fmt::Display for PlistDate {
    /// ISO 8601 with whole seconds, e.g. `2001-01-01T00:00:00Z`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%SZ")),
            None => write!(f, "{}s since 2001-01-01T00:00:00Z", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_the_reference_instant() {
        let date = PlistDate::from_seconds(0.0);
        assert_eq!(date.to_string(), "2001-01-01T00:00:00Z");
        assert_eq!(date.to_utc().unwrap().timestamp(), EPOCH_OFFSET_SECS);
    }

    #[test]
    fn negative_offsets_precede_the_epoch() {
        let date = PlistDate::from_seconds(-86_400.0);
        assert_eq!(date.to_string(), "2000-12-31T00:00:00Z");
    }

    #[test]
    fn fractional_seconds_are_kept_but_not_displayed() {
        let date = PlistDate::from_seconds(1.5);
        let ts = date.to_utc().unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 500);
        assert_eq!(date.to_string(), "2001-01-01T00:00:01Z");
    }

    #[test]
    fn non_finite_has_no_timestamp() {
        assert!(PlistDate::from_seconds(f64::NAN).to_utc().is_none());
        assert!(PlistDate::from_seconds(f64::INFINITY).to_utc().is_none());
        assert_eq!(
            PlistDate::from_seconds(f64::NAN).to_string(),
            "NaNs since 2001-01-01T00:00:00Z"
        );
    }

    #[test]
    fn out_of_range_has_no_timestamp() {
        assert!(PlistDate::from_seconds(1e300).to_utc().is_none());
    }
}
