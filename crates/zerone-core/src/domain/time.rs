//! Conversions between epoch milliseconds and local calendar time.
//!
//! Post times are stored without a zone, interpreted in the system's local zone.

use chrono::{Local, NaiveDateTime, TimeZone};

use crate::error::DomainError;

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Convert epoch milliseconds to local calendar time.
pub fn from_epoch_millis(millis: i64) -> Result<NaiveDateTime, DomainError> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.naive_local())
        .ok_or_else(|| DomainError::Validation(format!("invalid timestamp: {millis}")))
}

/// Publication time for a create or edit request; zero means "now".
pub fn publish_time(millis: i64) -> Result<NaiveDateTime, DomainError> {
    if millis == 0 {
        return Ok(local_now());
    }
    from_epoch_millis(millis)
}

/// Convert a local calendar time back to epoch milliseconds.
pub fn to_epoch_millis(time: NaiveDateTime) -> i64 {
    Local
        .from_local_datetime(&time)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        // Times inside a DST gap have no local instant; fall back to UTC.
        .unwrap_or_else(|| time.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_means_now() {
        let before = local_now();
        let time = publish_time(0).unwrap();
        assert!(time >= before);
        assert!(time <= local_now());
    }

    #[test]
    fn test_millis_survive_conversion() {
        let millis = 1_700_000_000_123;
        let time = publish_time(millis).unwrap();
        assert_eq!(to_epoch_millis(time), millis);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            from_epoch_millis(i64::MAX),
            Err(DomainError::Validation(_))
        ));
    }
}
