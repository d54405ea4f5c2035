//! The `duration` format: a signed span of time with nanosecond resolution.
//!
//! Two notations are accepted:
//! - compact, as in `1h30m`, `1.5s`, `-300ms`, `2h45m10.5s`
//! - friendly, as in `3 days`, `1 hour 30 minutes`, `2 weeks`, `-5 sec`
//!
//! The canonical text is the compact notation, e.g. `1h30m0s`, `1.5s`, `0s`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::Regex;

use crate::document::{self, DocValue, DocumentCodec};
use crate::sql::{self, DbValue, SqlScan, SqlValue};
use crate::{CodecOptions, FormatError, TextCodec};

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;
const DAY: u128 = 24 * HOUR;
const WEEK: u128 = 7 * DAY;
const YEAR: u128 = 365 * DAY;

/// Friendly unit spellings. The last spelling of each group also matches as a
/// prefix (`min` matches `minutes`); any spelling may take a plural `s`.
const FRIENDLY_UNITS: &[(&[&str], u128)] = &[
    (&["ns", "nano"], NANOSECOND),
    (&["us", "µs", "μs", "micro"], MICROSECOND),
    (&["ms", "milli"], MILLISECOND),
    (&["s", "sec"], SECOND),
    (&["m", "min"], MINUTE),
    (&["h", "hr", "hour"], HOUR),
    (&["d", "day"], DAY),
    (&["w", "wk", "week"], WEEK),
    (&["y", "yr", "year"], YEAR),
];

static FRIENDLY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-\s?)?([0-9]+)\s*([A-Za-zµμ]+)").expect("valid duration token pattern")
});

/// Returns true if `s` is a duration in either notation.
pub fn is_duration(s: &str) -> bool {
    parse_nanos(s).is_some()
}

fn parse_nanos(s: &str) -> Option<i64> {
    parse_compact(s).or_else(|| parse_friendly(s))
}

fn compact_unit(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

fn leading_digits(s: &str) -> (&str, &str) {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    s.split_at(len)
}

fn parse_compact(s: &str) -> Option<i64> {
    let (negative, mut rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if rest == "0" {
        return Some(0);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (int_part, after) = leading_digits(rest);
        let (frac_part, after) = match after.strip_prefix('.') {
            Some(after) => leading_digits(after),
            None => ("", after),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        let unit_len = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        let scale = compact_unit(unit)?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };
        let mut value = whole.checked_mul(scale)?;
        if !frac_part.is_empty() {
            // digits past nanosecond resolution cannot contribute
            let digits = &frac_part[..frac_part.len().min(18)];
            let frac: u128 = digits.parse().ok()?;
            value = value.checked_add(frac * scale / 10u128.pow(digits.len() as u32))?;
        }
        total = total.checked_add(value)?;
        rest = after;
    }

    to_signed(total, negative)
}

fn parse_friendly(s: &str) -> Option<i64> {
    let mut total: i128 = 0;
    let mut matched = false;
    let mut last_end = 0;

    for caps in FRIENDLY_TOKEN.captures_iter(s) {
        let whole = caps.get(0)?;
        if !s[last_end..whole.start()].trim().is_empty() {
            return None;
        }
        last_end = whole.end();

        let count: u128 = caps[2].parse().ok()?;
        let unit = friendly_unit(&caps[3].to_lowercase())?;
        let value = i128::try_from(count.checked_mul(unit)?).ok()?;
        total = if caps.get(1).is_some() {
            total.checked_sub(value)?
        } else {
            total.checked_add(value)?
        };
        matched = true;
    }

    if !matched || !s[last_end..].trim().is_empty() {
        return None;
    }
    i64::try_from(total).ok()
}

fn friendly_unit(unit: &str) -> Option<u128> {
    let lookup = |unit: &str| {
        FRIENDLY_UNITS.iter().find_map(|(spellings, scale)| {
            let last = spellings.len() - 1;
            spellings
                .iter()
                .enumerate()
                .any(|(i, spelling)| unit == *spelling || (i == last && unit.starts_with(spelling)))
                .then_some(*scale)
        })
    };
    lookup(unit).or_else(|| unit.strip_suffix('s').and_then(lookup))
}

fn to_signed(total: u128, negative: bool) -> Option<i64> {
    if negative {
        let magnitude = i128::try_from(total).ok()?;
        i64::try_from(-magnitude).ok()
    } else {
        i64::try_from(total).ok()
    }
}

/// Fractional digits of `v` below `10^prec`, without trailing zeros, and the
/// remaining integer part.
fn split_frac(v: u64, prec: u32) -> (String, u64) {
    let pow = 10u64.pow(prec);
    let frac = v % pow;
    let digits = if frac == 0 {
        String::new()
    } else {
        let padded = format!("{frac:0width$}", width = prec as usize);
        format!(".{}", padded.trim_end_matches('0'))
    };
    (digits, v / pow)
}

/// A signed duration in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    /// The registry name of this format.
    pub const FORMAT: &'static str = "duration";

    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub const fn nanos(&self) -> i64 {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, FormatError> {
        parse_nanos(s)
            .map(Self)
            .ok_or_else(|| FormatError::invalid(Self::FORMAT, s))
    }

    pub fn to_time_delta(&self) -> TimeDelta {
        TimeDelta::nanoseconds(self.0)
    }
}

impl TryFrom<TimeDelta> for Duration {
    type Error = FormatError;

    fn try_from(delta: TimeDelta) -> Result<Self, Self::Error> {
        delta
            .num_nanoseconds()
            .map(Self)
            .ok_or_else(|| FormatError::invalid(Self::FORMAT, delta.to_string()))
    }
}

impl From<Duration> for TimeDelta {
    fn from(d: Duration) -> Self {
        d.to_time_delta()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0s");
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }

        let u = self.0.unsigned_abs();
        if u < SECOND as u64 {
            let (prec, unit) = if u < MICROSECOND as u64 {
                return write!(f, "{u}ns");
            } else if u < MILLISECOND as u64 {
                (3, "µs")
            } else {
                (6, "ms")
            };
            let (frac, whole) = split_frac(u, prec);
            return write!(f, "{whole}{frac}{unit}");
        }

        let (frac, secs) = split_frac(u, 9);
        let (s, minutes) = (secs % 60, secs / 60);
        let (m, h) = (minutes % 60, minutes / 60);
        if h > 0 {
            write!(f, "{h}h{m}m{s}{frac}s")
        } else if m > 0 {
            write!(f, "{m}m{s}{frac}s")
        } else {
            write!(f, "{s}{frac}s")
        }
    }
}

impl FromStr for Duration {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TextCodec for Duration {
    fn unmarshal_text(text: &str) -> Result<Self, FormatError> {
        if text.is_empty() {
            return Ok(Self::default());
        }
        Self::parse(text)
    }

    fn marshal_text(&self) -> String {
        self.to_string()
    }
}

impl serde::Serialize for Duration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Duration {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
            Some(s) => Self::unmarshal_text(&s).map_err(serde::de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}

impl SqlScan for Duration {
    fn scan_with(src: DbValue, _options: &CodecOptions) -> Result<Self, FormatError> {
        match src {
            DbValue::Int(nanos) => return Ok(Self(nanos)),
            DbValue::Float(nanos) => {
                // truncates toward zero; the upper bound is exclusive as i64::MAX rounds up
                if nanos.is_finite() && nanos >= i64::MIN as f64 && nanos < i64::MAX as f64 {
                    return Ok(Self(nanos as i64));
                }
                return Err(FormatError::invalid(Self::FORMAT, nanos.to_string()));
            }
            _ => {}
        }
        match sql::scan_text(src, Self::FORMAT)? {
            Some(text) => Self::parse(&text),
            None => Ok(Self::default()),
        }
    }
}

impl SqlValue for Duration {
    fn value_with(&self, _options: &CodecOptions) -> Result<DbValue, FormatError> {
        Ok(DbValue::Int(self.0))
    }
}

impl DocumentCodec for Duration {
    fn to_document(&self) -> DocValue {
        DocValue::Int64(self.0)
    }

    fn from_document(value: DocValue) -> Result<Self, FormatError> {
        match value {
            DocValue::Int64(nanos) => Ok(Self(nanos)),
            other => match document::expect_string(other, Self::FORMAT)? {
                Some(text) => Self::parse(&text),
                None => Ok(Self::default()),
            },
        }
    }
}
