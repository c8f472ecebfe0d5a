//! Timestamps in the `YYYY-MM-DD HH:MM:SS` shape the server stores.

/// Browser local time.
pub fn local_timestamp() -> String {
    let now = js_sys::Date::new_0();

    format_timestamp(
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date(),
        now.get_hours(),
        now.get_minutes(),
        now.get_seconds(),
    )
}

pub fn format_timestamp(year: u32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, month, day, hour, minute, second
    )
}
