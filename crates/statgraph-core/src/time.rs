// File: crates/statgraph-core/src/time.rs
// Summary: Timestamp normalization (compact YYYYMMDD[HH] or ISO-8601) into a UTC ordering key.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::error::{ChartError, Result};

/// Zoned layouts beyond RFC 3339: minute precision, basic `+hhmm` offsets, `Z`.
const ZONED_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Offset-less layouts accepted on the ISO branch; read as UTC.
const NAIVE_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A UTC point in time with whole-second precision.
///
/// This is the equality and ordering key of the band scale domain: any two raw
/// encodings of the same civil moment normalize to the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedInstant(DateTime<Utc>);

impl NormalizedInstant {
    /// Seconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 { self.0.timestamp() }

    /// Month and year as rendered under the X axis, e.g. `June 2022`.
    pub fn month_year_label(&self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

/// Normalize a raw timestamp into a [`NormalizedInstant`].
///
/// Strings of at most 10 bytes are compact dates (`YYYYMMDD`, optionally followed
/// by hour digits that are ignored) and become midnight UTC. Longer strings are
/// parsed as ISO-8601. Either way the instant is rebuilt from its UTC calendar
/// fields, which drops sub-second precision.
pub fn normalize(raw: &str) -> Result<NormalizedInstant> {
    let parsed = if raw.len() <= 10 {
        parse_compact(raw)?.and_utc()
    } else {
        parse_iso(raw)?
    };

    Utc.with_ymd_and_hms(
        parsed.year(),
        parsed.month(),
        parsed.day(),
        parsed.hour(),
        parsed.minute(),
        parsed.second(),
    )
    .single()
    .map(NormalizedInstant)
    .ok_or_else(|| ChartError::malformed(raw, "not representable in UTC"))
}

fn parse_compact(raw: &str) -> Result<NaiveDateTime> {
    if raw.len() != 8 && raw.len() != 10 {
        return Err(ChartError::malformed(raw, "compact timestamp must be YYYYMMDD or YYYYMMDDHH"));
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChartError::malformed(raw, "compact timestamp must be digits only"));
    }

    // All-ASCII digits, so byte slicing lands on char boundaries.
    let field = |range: std::ops::Range<usize>| -> Result<u32> {
        raw[range].parse::<u32>().map_err(|_| ChartError::malformed(raw, "bad digit field"))
    };
    let year = field(0..4)? as i32;
    let month = field(4..6)?;
    let day = field(6..8)?;
    if raw.len() == 10 && field(8..10)? > 23 {
        return Err(ChartError::malformed(raw, "hour out of range"));
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ChartError::malformed(raw, "not a calendar date"))
}

fn parse_iso(raw: &str) -> Result<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for layout in ZONED_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(s, layout) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Ok(naive.and_utc());
        }
    }
    Err(ChartError::malformed(raw, "not an ISO-8601 timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_and_iso_agree() {
        let a = normalize("20220601").unwrap();
        let b = normalize("2022-06-01T00:00:00Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn compact_hour_digits_are_ignored() {
        assert_eq!(normalize("2022060113").unwrap(), normalize("20220601").unwrap());
        assert_eq!(normalize("2022060100").unwrap().timestamp(), 1_654_041_600);
        assert_eq!(normalize("2022060123").unwrap(), normalize("20220601").unwrap());
    }

    #[test]
    fn offsets_and_fractions_collapse_to_the_same_second() {
        let utc = normalize("2022-06-01T12:00:00Z").unwrap();
        assert_eq!(normalize("2022-06-01T14:00:00+02:00").unwrap(), utc);
        assert_eq!(normalize("2022-06-01T12:00:00.750Z").unwrap(), utc);
        assert_eq!(normalize("2022-06-01T12:00:00").unwrap(), utc);
        assert_eq!(normalize("2022-06-01 12:00:00").unwrap(), utc);
        assert_eq!(normalize("2022-06-01T12:00Z").unwrap(), utc);
        assert_eq!(normalize("2022-06-01T14:00+02:00").unwrap(), utc);
        assert_eq!(normalize("2022-06-01T14:00:00+0200").unwrap(), utc);
        assert_eq!(normalize("2022-06-01T14:00:00.250+0200").unwrap(), utc);
    }

    #[test]
    fn rejects_non_digit_compact_strings() {
        for raw in ["2022-06-01", "2022O601", "202206", "", "202206011", "2022060199", "2022060124"] {
            let err = normalize(raw).unwrap_err();
            assert!(matches!(err, ChartError::MalformedTimestamp { .. }), "{raw}: {err}");
        }
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(normalize("20220230").is_err());
        assert!(normalize("20221301").is_err());
        assert!(normalize("2022-02-30T00:00:00Z").is_err());
        assert!(normalize("yesterday at noon").is_err());
    }

    #[test]
    fn month_year_label_uses_utc() {
        let t = normalize("2022-06-30T23:30:00-02:00").unwrap();
        assert_eq!(t.month_year_label(), "July 2022");
        assert_eq!(normalize("20220601").unwrap().month_year_label(), "June 2022");
    }
}
