use chrono::{DateTime, Duration, TimeZone};

/// Local midnight of the calendar day `t` falls on, in `t`'s own zone.
///
/// An ambiguous midnight resolves to its earlier instant. When midnight is
/// skipped by a DST transition the first valid quarter hour after it is used.
pub fn begin_of_day<Z: TimeZone>(t: &DateTime<Z>) -> Option<DateTime<Z>> {
    let midnight = t.date_naive().and_hms_opt(0, 0, 0)?;
    let tz = t.timezone();
    (0..96).find_map(|quarter| {
        tz.from_local_datetime(&(midnight + Duration::minutes(15 * quarter)))
            .earliest()
    })
}
