// src/common/time.rs

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::common::error::AppError;

/// Offset usado quando `SHOP_UTC_OFFSET` não está definido (horário de Brasília).
pub const DEFAULT_UTC_OFFSET: &str = "-03:00";

/// Interpreta um offset no formato `±HH:MM`.
pub fn parse_utc_offset(raw: &str) -> anyhow::Result<FixedOffset> {
    let raw = raw.trim();
    let (sign, rest) = match raw.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => anyhow::bail!("offset '{}' deve começar com + ou -", raw),
    };

    let (hours, minutes) = rest
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("offset '{}' deve ter o formato ±HH:MM", raw))?;
    let hours: i32 = hours.parse()?;
    let minutes: i32 = minutes.parse()?;
    if hours > 23 || minutes > 59 {
        anyhow::bail!("offset '{}' fora do intervalo", raw);
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| anyhow::anyhow!("offset '{}' fora do intervalo", raw))
}

/// Intervalo semiaberto `[início, fim)` em UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Result<DateTime<Utc>, AppError> {
    offset
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(AppError::InvalidDateRange)
}

/// Converte dias locais inclusivos `[start, end]` para `[start 00:00, end+1 00:00)` em UTC.
pub fn local_day_range(
    start: NaiveDate,
    end: NaiveDate,
    offset: FixedOffset,
) -> Result<UtcRange, AppError> {
    if end < start {
        return Err(AppError::InvalidDateRange);
    }
    let day_after = end.checked_add_days(Days::new(1)).ok_or(AppError::InvalidDateRange)?;

    Ok(UtcRange {
        start: local_midnight(start, offset)?,
        end: local_midnight(day_after, offset)?,
    })
}

/// Maior série diária aceita em um relatório.
pub const MAX_DAILY_SPAN_DAYS: i64 = 366;

/// Rejeita séries diárias maiores que `MAX_DAILY_SPAN_DAYS` dias.
pub fn ensure_daily_span(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if end < start {
        return Err(AppError::InvalidDateRange);
    }
    if (end - start).num_days() + 1 > MAX_DAILY_SPAN_DAYS {
        return Err(AppError::DateRangeTooLong { max_days: MAX_DAILY_SPAN_DAYS });
    }
    Ok(())
}

/// Data no calendário local da loja.
pub fn local_date(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

pub fn local_today(offset: FixedOffset) -> NaiveDate {
    local_date(Utc::now(), offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brt() -> FixedOffset {
        parse_utc_offset(DEFAULT_UTC_OFFSET).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_signed_offsets() {
        assert_eq!(brt().local_minus_utc(), -3 * 3600);
        assert_eq!(parse_utc_offset("+05:30").unwrap().local_minus_utc(), 5 * 3600 + 1800);
        assert!(parse_utc_offset("03:00").is_err());
        assert!(parse_utc_offset("-3").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
    }

    #[test]
    fn single_day_range_is_shifted_by_offset() {
        let range = local_day_range(date(2024, 3, 10), date(2024, 3, 10), brt()).unwrap();
        assert_eq!(range.start.to_rfc3339(), "2024-03-10T03:00:00+00:00");
        assert_eq!(range.end.to_rfc3339(), "2024-03-11T03:00:00+00:00");
    }

    #[test]
    fn range_end_is_exclusive_day_after() {
        let range = local_day_range(date(2024, 2, 28), date(2024, 2, 29), brt()).unwrap();
        assert_eq!(range.end.to_rfc3339(), "2024-03-01T03:00:00+00:00");
    }

    #[test]
    fn inverted_range_is_rejected() {
        let result = local_day_range(date(2024, 3, 10), date(2024, 3, 9), brt());
        assert!(matches!(result, Err(AppError::InvalidDateRange)));
    }

    #[test]
    fn daily_span_accepts_a_full_leap_year() {
        assert!(ensure_daily_span(date(2024, 1, 1), date(2024, 12, 31)).is_ok());
        assert!(ensure_daily_span(date(2024, 3, 10), date(2024, 3, 10)).is_ok());
    }

    #[test]
    fn daily_span_rejects_longer_or_inverted_ranges() {
        assert!(matches!(
            ensure_daily_span(date(2024, 1, 1), date(2025, 1, 1)),
            Err(AppError::DateRangeTooLong { max_days: MAX_DAILY_SPAN_DAYS })
        ));
        assert!(matches!(
            ensure_daily_span(date(2024, 3, 10), date(2024, 3, 9)),
            Err(AppError::InvalidDateRange)
        ));
    }

    #[test]
    fn late_evening_utc_belongs_to_previous_local_day() {
        let at = Utc.with_ymd_and_hms(2024, 3, 11, 2, 30, 0).unwrap();
        assert_eq!(local_date(at, brt()), date(2024, 3, 10));
    }
}
