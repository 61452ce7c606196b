use crate::error::Result;
use chrono::{Datelike, Days, NaiveDate};

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    // Day 1 of a month in 1..=12 always exists, and it always has a predecessor.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(NaiveDate::MAX)
}

/// Month-end on which the monthly depreciation for `date`'s month is booked.
pub fn month_end_of(date: NaiveDate) -> NaiveDate {
    last_day_of_month(date.year(), date.month())
}

/// Inclusive count of calendar months touched by the period.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let year_diff = end.year() - start.year();
    let month_diff = end.month() as i32 - start.month() as i32;
    year_diff * 12 + month_diff + 1
}

/// Rounds half away from zero to whole yen.
pub fn round_currency(value: f64) -> f64 {
    value.round()
}

/// `part / whole * 100`, or `None` when `whole` is zero.
pub fn percentage_of(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        None
    } else {
        Some(part / whole * 100.0)
    }
}

/// Rounds to whole yen and formats with thousands separators
/// (e.g. `12,000,000`, `-2,400,000`, `166_666.67` as `166,667`).
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Writes a header and rows as RFC 4180 CSV, quoting fields that contain
/// separators, quotes or line breaks.
pub fn render_csv<I, R, F>(header: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(
            last_day_of_month(2023, 2),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
        assert_eq!(
            last_day_of_month(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            last_day_of_month(2023, 4),
            NaiveDate::from_ymd_opt(2023, 4, 30).unwrap()
        );
    }

    #[test]
    fn test_months_between_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        assert_eq!(months_between(start, end), 12);
        assert_eq!(months_between(start, start), 1);
    }

    #[test]
    fn test_render_csv_quotes_fields() {
        let csv = render_csv(
            &["Name", "Note"],
            vec![vec!["plain", "a, b"], vec!["say \"hi\"", "two\nlines"]],
        )
        .unwrap();

        assert!(csv.starts_with("Name,Note\n"));
        assert!(csv.contains("plain,\"a, b\"\n"));
        assert!(csv.contains("\"say \"\"hi\"\"\",\"two\nlines\"\n"));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(12_000_000.0), "12,000,000");
        assert_eq!(format_amount(-2_400_000.0), "-2,400,000");
        assert_eq!(format_amount(166_666.67), "166,667");
    }

    #[test]
    fn test_percentage_of_zero_whole() {
        assert_eq!(percentage_of(5.0, 0.0), None);
        assert_eq!(percentage_of(25.0, 200.0), Some(12.5));
    }
}
