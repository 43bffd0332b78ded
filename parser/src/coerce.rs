//! Built-in coercions.
//!
//! Each function converts one raw argument. They are registered with the
//! default [`TypeResolver`](crate::TypeResolver) but can be reused directly
//! when building custom rules.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use easy_options_core::{OptionValue, ValueError};
use rust_decimal::Decimal;
use tracing::warn;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%d %b %Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const TIME_OF_DAY_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

pub fn string(raw: &str) -> Result<OptionValue, ValueError> {
    Ok(OptionValue::String(raw.to_string()))
}

pub fn symbol(raw: &str) -> Result<OptionValue, ValueError> {
    Ok(OptionValue::Symbol(raw.to_string()))
}

pub fn integer(raw: &str) -> Result<OptionValue, ValueError> {
    raw.trim()
        .parse::<i64>()
        .map(OptionValue::Integer)
        .map_err(|e| ValueError::invalid("integer", raw, e))
}

pub fn float(raw: &str) -> Result<OptionValue, ValueError> {
    raw.trim()
        .parse::<f64>()
        .map(OptionValue::Float)
        .map_err(|e| ValueError::invalid("float", raw, e))
}

/// Exact decimal; scientific notation (`1.5e3`) is accepted.
pub fn big_decimal(raw: &str) -> Result<OptionValue, ValueError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(OptionValue::Decimal)
        .map_err(|e| ValueError::invalid("big_decimal", raw, e))
}

/// Case-sensitive: `1 true TRUE t T` and `0 false FALSE f F`.
pub fn boolean(raw: &str) -> Result<OptionValue, ValueError> {
    match raw {
        "1" | "true" | "TRUE" | "t" | "T" => Ok(OptionValue::Boolean(true)),
        "0" | "false" | "FALSE" | "f" | "F" => Ok(OptionValue::Boolean(false)),
        other => Err(ValueError::InvalidBoolean(other.to_string())),
    }
}

pub fn date(raw: &str) -> Result<OptionValue, ValueError> {
    let trimmed = raw.trim();
    parse_date(trimmed)
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
        .or_else(|| parse_naive_datetime(trimmed).map(|dt| dt.date()))
        .map(OptionValue::Date)
        .ok_or_else(|| ValueError::invalid("date", raw, "unrecognised date format"))
}

/// Timestamp; input without an offset is read as UTC.
pub fn datetime(raw: &str) -> Result<OptionValue, ValueError> {
    parse_timestamp(raw.trim(), |naive| Some(naive.and_utc().fixed_offset()))
        .map(OptionValue::DateTime)
        .ok_or_else(|| ValueError::invalid("datetime", raw, "unrecognised timestamp format"))
}

/// Timestamp or time of day; input without an offset is read in the local
/// time zone, and a bare time of day means today.
pub fn time(raw: &str) -> Result<OptionValue, ValueError> {
    let trimmed = raw.trim();
    parse_timestamp(trimmed, localize)
        .or_else(|| {
            let time_of_day = TIME_OF_DAY_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())?;
            localize(Local::now().date_naive().and_time(time_of_day))
        })
        .map(OptionValue::Time)
        .ok_or_else(|| ValueError::invalid("time", raw, "unrecognised time format"))
}

/// Existing path, file or directory.
pub fn read_file(raw: &str) -> Result<OptionValue, ValueError> {
    let path = PathBuf::from(raw);
    if !path.exists() {
        return Err(ValueError::PathNotFound(path));
    }
    Ok(OptionValue::Path(path))
}

/// Existing directory.
pub fn dir(raw: &str) -> Result<OptionValue, ValueError> {
    let value = read_file(raw)?;
    if !Path::new(raw).is_dir() {
        return Err(ValueError::NotADirectory(PathBuf::from(raw)));
    }
    Ok(value)
}

/// Paths matching a glob pattern, in the order `glob` yields them.
///
/// No match is an empty list. Entries that cannot be read are skipped.
pub fn dir_glob(raw: &str) -> Result<OptionValue, ValueError> {
    let paths = glob::glob(raw).map_err(|e| ValueError::InvalidGlob {
        pattern: raw.to_string(),
        reason: e.to_string(),
    })?;

    let matches = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(OptionValue::Path(path)),
            Err(e) => {
                warn!(pattern = raw, error = %e, "Skipping unreadable glob entry");
                None
            }
        })
        .collect();

    Ok(OptionValue::List(matches))
}

/// Splits a comma-separated list; trailing empty items are dropped.
///
/// # Examples
///
/// ```
/// use easy_options::coerce::split_list;
///
/// assert_eq!(split_list("1,2,3,4"), vec!["1", "2", "3", "4"]);
/// assert_eq!(split_list("a,,b,,"), vec!["a", "", "b"]);
/// assert!(split_list("").is_empty());
/// ```
pub fn split_list(raw: &str) -> Vec<&str> {
    let mut items: Vec<&str> = raw.split(',').collect();
    while items.last().is_some_and(|item| item.is_empty()) {
        items.pop();
    }
    items
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_naive_datetime(raw: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn parse_timestamp<F>(raw: &str, from_naive: F) -> Option<DateTime<FixedOffset>>
where
    F: Fn(NaiveDateTime) -> Option<DateTime<FixedOffset>>,
{
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt);
    }

    parse_naive_datetime(raw)
        .or_else(|| parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0)))
        .and_then(from_naive)
}

fn localize(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_spellings() {
        for raw in ["1", "true", "TRUE", "t", "T"] {
            assert_eq!(boolean(raw), Ok(OptionValue::Boolean(true)), "{raw}");
        }
        for raw in ["0", "false", "FALSE", "f", "F"] {
            assert_eq!(boolean(raw), Ok(OptionValue::Boolean(false)), "{raw}");
        }
    }

    #[test]
    fn test_boolean_rejects_other_literals() {
        let err = boolean("whatever").unwrap_err();
        assert_eq!(err.to_string(), "Invalid boolean value \"whatever\"");
        assert!(boolean("True").is_err());
        assert!(boolean("yes").is_err());
    }

    #[test]
    fn test_big_decimal() {
        let value = big_decimal("2.45").unwrap();
        assert_eq!(value.as_decimal().unwrap().to_string(), "2.45");
        assert_eq!(
            big_decimal("1.5e3").unwrap().as_decimal(),
            Some(Decimal::from(1500))
        );
        assert!(matches!(
            big_decimal("axdcv"),
            Err(ValueError::Invalid { .. })
        ));
    }

    #[test]
    fn test_integer_and_float() {
        assert_eq!(integer(" 42 "), Ok(OptionValue::Integer(42)));
        assert_eq!(integer("-7"), Ok(OptionValue::Integer(-7)));
        assert!(integer("4.2").is_err());
        assert_eq!(float("2.5"), Ok(OptionValue::Float(2.5)));
        assert!(float("two").is_err());
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2015, 12, 13).unwrap();
        for raw in ["2015-12-13", "2015/12/13", "20151213", "13 Dec 2015", "2015-12-13T15:00:00"] {
            assert_eq!(date(raw), Ok(OptionValue::Date(expected)), "{raw}");
        }
        assert!(date("axdcv").is_err());
        assert!(date("2015-13-45").is_err());
    }

    #[test]
    fn test_datetime_defaults_to_utc() {
        let value = datetime("2011-12-12T15:00:00").unwrap();
        let expected = DateTime::parse_from_rfc3339("2011-12-12T15:00:00+00:00").unwrap();
        assert_eq!(value, OptionValue::DateTime(expected));

        let with_offset = datetime("2011-12-12T15:00:00+02:00").unwrap();
        assert_eq!(with_offset.as_datetime().unwrap().offset().local_minus_utc(), 7200);

        let midnight = datetime("2011-12-12").unwrap();
        assert_eq!(midnight.to_string(), "2011-12-12T00:00:00+00:00");
        assert!(datetime("axdcv").is_err());
    }

    #[test]
    fn test_time_uses_local_zone() {
        let naive = NaiveDate::from_ymd_opt(2015, 12, 13)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        let expected = localize(naive).unwrap();

        assert_eq!(time("2015-12-13T15:00:00"), Ok(OptionValue::Time(expected)));
        assert!(time("15:30").is_ok());
        assert!(time("axdcv").is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("2.45,3.45"), vec!["2.45", "3.45"]);
        assert_eq!(split_list("single"), vec!["single"]);
        assert_eq!(split_list(",a"), vec!["", "a"]);
    }

    #[test]
    fn test_paths() {
        let dir_path = tempfile::tempdir().unwrap();
        let file_path = dir_path.path().join("input.txt");
        std::fs::write(&file_path, " ").unwrap();
        let file = file_path.to_str().unwrap();
        let missing = dir_path.path().join("missing");
        let missing = missing.to_str().unwrap();

        assert_eq!(read_file(file), Ok(OptionValue::Path(file_path.clone())));
        assert_eq!(
            read_file(missing).unwrap_err().to_string(),
            format!("Path {missing} does not exist")
        );
        assert_eq!(
            dir(file).unwrap_err().to_string(),
            format!("Path {file} exists but is not a directory")
        );
        assert!(dir(dir_path.path().to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_dir_glob() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("a.log"), "").unwrap();
        std::fs::write(root.path().join("b.log"), "").unwrap();
        std::fs::write(root.path().join("c.txt"), "").unwrap();

        let pattern = format!("{}/*.log", root.path().display());
        let value = dir_glob(&pattern).unwrap();
        assert_eq!(
            value,
            OptionValue::List(vec![
                OptionValue::Path(root.path().join("a.log")),
                OptionValue::Path(root.path().join("b.log")),
            ])
        );

        let nothing = format!("{}/*.csv", root.path().display());
        assert_eq!(dir_glob(&nothing), Ok(OptionValue::List(Vec::new())));
        assert!(matches!(dir_glob("[a"), Err(ValueError::InvalidGlob { .. })));
    }
}
