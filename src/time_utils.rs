use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, UtcOffset};
use tracing::trace;

use crate::AppResult;

/// How far back a commit may have been authored and still count as today's work.
pub const LOOKBACK: Duration = Duration::days(1);

const ISO_DATE: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

#[tracing::instrument(level = "trace")]
pub fn yesterday() -> OffsetDateTime {
    OffsetDateTime::now_utc().saturating_sub(LOOKBACK)
}

/// Current time in the local offset, or UTC when the offset can't be determined.
#[tracing::instrument(level = "trace")]
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|e| {
        trace!("Local offset unavailable ({}), falling back to UTC", e);
        OffsetDateTime::now_utc()
    })
}

#[tracing::instrument(level = "trace")]
pub fn iso_date(date: Date) -> AppResult<String> {
    Ok(date.format(ISO_DATE)?)
}

/// Convert a git timestamp (seconds plus offset in minutes) into an `OffsetDateTime`.
#[tracing::instrument(level = "trace", skip_all)]
pub fn git_time_to_datetime(time: git2::Time) -> AppResult<OffsetDateTime> {
    let offset = UtcOffset::from_whole_seconds(time.offset_minutes() * 60)?;
    Ok(OffsetDateTime::from_unix_timestamp(time.seconds())?.to_offset(offset))
}
