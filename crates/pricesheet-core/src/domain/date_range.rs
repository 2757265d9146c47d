use std::fmt::{Display, Formatter};

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const UTC_OFFSET: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

/// Parse an ISO calendar date (`yyyy-MM-dd`).
pub fn parse_iso_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), ISO_DATE).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

/// Render a date as `yyyy-MM-dd`. No time or zone component is involved.
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Render a date as `yyyyMMdd`, the form used in download filenames.
pub fn format_compact_date(date: Date) -> String {
    format!(
        "{:04}{:02}{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parse a UTC offset written as `+hh:mm` or `-hh:mm`.
pub fn parse_utc_offset(input: &str) -> Result<UtcOffset, ValidationError> {
    UtcOffset::parse(input.trim(), UTC_OFFSET).map_err(|_| ValidationError::InvalidUtcOffset {
        value: input.to_owned(),
    })
}

/// Calendar date of an epoch-milliseconds instant, as seen at `offset`.
pub fn date_from_epoch_millis(millis: i64, offset: UtcOffset) -> Result<Date, ValidationError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map(|instant| instant.to_offset(offset).date())
        .map_err(|_| ValidationError::InvalidDate {
            value: millis.to_string(),
        })
}

/// Today's calendar date in UTC.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Inclusive calendar date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange {
                start: format_iso_date(start),
                end: format_iso_date(end),
            });
        }

        Ok(Self { start, end })
    }

    /// Build a range from two `yyyy-MM-dd` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(parse_iso_date(start)?, parse_iso_date(end)?)
    }

    /// The range ending on `end` and reaching back `days` calendar days
    /// (clamped at the earliest representable date).
    pub fn trailing_days(end: Date, days: u16) -> Self {
        let mut start = end;
        for _ in 0..days {
            match start.previous_day() {
                Some(previous) => start = previous,
                None => break,
            }
        }
        Self { start, end }
    }

    pub const fn start(&self) -> Date {
        self.start
    }

    pub const fn end(&self) -> Date {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> usize {
        ((self.end - self.start).whole_days() + 1) as usize
    }

    /// Every date in the range, most recent first.
    pub fn iter_desc(&self) -> impl Iterator<Item = Date> {
        let start = self.start;
        std::iter::successors(Some(self.end), move |date| {
            date.previous_day().filter(|previous| *previous >= start)
        })
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..{}",
            format_iso_date(self.start),
            format_iso_date(self.end)
        )
    }
}
