use crate::error::AppError;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Wall-clock string in the shape the store records, e.g. "06:05 AM".
pub fn format_clock(moment: OffsetDateTime) -> Result<String, AppError> {
    let format = format_description!("[hour repr:12]:[minute] [period case:upper]");
    moment
        .format(&format)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

/// Date header line, e.g. "23 August, 2026".
pub fn format_date(moment: OffsetDateTime) -> Result<String, AppError> {
    let format = format_description!("[day padding:none] [month repr:long], [year]");
    moment
        .format(&format)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

/// Current local time as a clock string. Captured once per session and
/// reused for every task added during that session.
pub fn current_clock() -> Result<String, AppError> {
    format_clock(now_local())
}

pub fn current_date() -> Result<String, AppError> {
    format_date(now_local())
}

fn now_local() -> OffsetDateTime {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetDateTime::now_utc().to_offset(offset)
}
