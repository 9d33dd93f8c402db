//! Status page clock
//!
//! The portal displays Nepal time (UTC+5:45). Going through chrono-tz
//! rather than a hand-built offset keeps this correct if the zone rules
//! ever change.

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Kathmandu;

/// Format an instant as Kathmandu wall-clock time, `YYYY-MM-DD HH:MM:SS`.
pub fn kathmandu_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Kathmandu)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Current Kathmandu wall-clock time, for the dashboard footer.
pub fn kathmandu_now() -> String {
    kathmandu_time(Utc::now())
}
