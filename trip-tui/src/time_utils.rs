use time::{Date, OffsetDateTime, UtcOffset};

/// The machine's offset, or UTC when it cannot be determined.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

pub fn to_local_time(dt: OffsetDateTime, offset: UtcOffset) -> OffsetDateTime {
    dt.to_offset(offset)
}

pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}

/// `HH:MM` in `offset`.
pub fn clock(dt: OffsetDateTime, offset: UtcOffset) -> String {
    let local = to_local_time(dt, offset);
    format!("{:02}:{:02}", local.hour(), local.minute())
}

const WEEKDAYS: [&str; 7] = ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"];
const MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// `mar 1 jul`
pub fn short_day(date: Date) -> String {
    format!(
        "{} {} {}",
        WEEKDAYS[date.weekday().number_days_from_monday() as usize],
        date.day(),
        MONTHS[date.month() as usize - 1]
    )
}
