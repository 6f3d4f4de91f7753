//! Active-time calculation
//!
//! Elapsed time excludes every paused interval. While a session is paused
//! the clock is frozen at `paused_at`; once resumed the interval has been
//! folded into `total_paused_duration`.

use shared::Timestamp;
use shared::models::Session;

/// Milliseconds in one billable hour
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Active milliseconds of `session` at `now`, never negative.
///
/// A start time edited into the future (or clock skew) clamps to zero.
pub fn elapsed(session: &Session, now: Timestamp) -> u64 {
    let until = match (session.is_paused, session.paused_at) {
        (true, Some(paused_at)) => paused_at,
        _ => now,
    };
    let active = until
        .saturating_sub(session.start_time)
        .saturating_sub(session.total_paused_duration);
    active.max(0) as u64
}
