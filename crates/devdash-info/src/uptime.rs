//! Uptime formatting
//!
//! Single-dominant-unit rendering: the two largest applicable units are shown
//! and everything below is dropped. Deterministic given the elapsed duration.

use std::time::Duration;

/// Shown when elapsed time cannot be computed (e.g. fallback snapshot).
pub const FALLBACK_UPTIME: &str = "刚刚启动";

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * 60;
const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Format an elapsed duration:
/// days+hours if >= 1 day, else hours+minutes if >= 1 hour, else
/// minutes+seconds if >= 1 minute, else seconds.
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();

    if total >= SECS_PER_DAY {
        let days = total / SECS_PER_DAY;
        let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
        format!("{}天 {}小时", days, hours)
    } else if total >= SECS_PER_HOUR {
        let hours = total / SECS_PER_HOUR;
        let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
        format!("{}小时 {}分钟", hours, minutes)
    } else if total >= SECS_PER_MINUTE {
        let minutes = total / SECS_PER_MINUTE;
        let seconds = total % SECS_PER_MINUTE;
        format!("{}分钟 {}秒", minutes, seconds)
    } else {
        format!("{}秒", total)
    }
}
