//! Time and date text

use core::fmt::Write;

use chrono::Datelike;
use heapless::String;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Time text buffer ("23:59")
pub type TimeText = String<8>;

/// Date text buffer ("Wed, Sep 30 2026")
pub type DateText = String<20>;

/// Format the time as `H:MM`: hour unpadded, minute zero-padded
pub fn time_text(hour: u32, minute: u32) -> TimeText {
    let mut out = TimeText::new();
    // Fits for any u8-range input; larger values are a caller bug
    let _ = write!(out, "{}:{:02}", hour, minute);
    out
}

/// Format a date as `Www, Mmm D YYYY`
pub fn date_text(date: &impl Datelike) -> DateText {
    let mut out = DateText::new();
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize % 12];
    let _ = write!(out, "{}, {} {} {}", weekday, month, date.day(), date.year());
    out
}
