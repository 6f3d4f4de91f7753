//! Dashboard statistics
//!
//! Computed on demand from the room table and session history; nothing here
//! is stored. Ranges are venue-local calendar periods, bounds inclusive.

use crate::sessions::{BillingPolicy, elapsed};
use crate::utils::time::{day_end_millis, day_start_millis, local_date, local_hour, month_start, week_start};
use chrono::{Duration, Months};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::Timestamp;
use shared::models::{Room, SessionRecord};

/// Dashboard period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateRange {
    #[default]
    Today,
    Yesterday,
    /// Monday through Sunday
    ThisWeek,
    ThisMonth,
}

impl DateRange {
    /// `[start, end]` in Unix millis, both inclusive
    pub fn bounds(self, now: Timestamp, tz: Tz) -> (Timestamp, Timestamp) {
        let today = local_date(now, tz);
        let (first, last) = match self {
            DateRange::Today => (today, today),
            DateRange::Yesterday => {
                let yesterday = today - Duration::days(1);
                (yesterday, yesterday)
            }
            DateRange::ThisWeek => {
                let monday = week_start(today);
                (monday, monday + Duration::days(6))
            }
            DateRange::ThisMonth => {
                let first = month_start(today);
                let last = first
                    .checked_add_months(Months::new(1))
                    .map(|next| next - Duration::days(1))
                    .unwrap_or(today);
                (first, last)
            }
        };
        (day_start_millis(first, tz), day_end_millis(last, tz))
    }

    pub fn contains(self, instant: Timestamp, now: Timestamp, tz: Tz) -> bool {
        let (start, end) = self.bounds(now, tz);
        (start..=end).contains(&instant)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Occupied rooms right now, regardless of range
    pub active_rooms: usize,
    /// Live sessions that started inside the range
    pub active_sessions_in_range: usize,
    /// Sealed sessions that started inside the range
    pub completed_sessions: usize,
    /// History totals plus live bills, both started in range
    pub total_revenue: Decimal,
    pub total_guests: u32,
    /// Mean active milliseconds over history and live sessions in range
    pub average_duration: u64,
    /// History in range plus every live session
    pub service_calls: u32,
}

pub fn dashboard_stats(
    rooms: &[Room],
    history: &[SessionRecord],
    range: DateRange,
    policy: &BillingPolicy,
    now: Timestamp,
    tz: Tz,
) -> DashboardStats {
    let (start, end) = range.bounds(now, tz);
    let in_range = |t: Timestamp| (start..=end).contains(&t);

    let mut total_revenue = Decimal::ZERO;
    let mut total_duration: u64 = 0;
    let mut total_guests: u32 = 0;
    let mut service_calls: u32 = 0;

    let mut completed_sessions = 0;
    for record in history.iter().filter(|r| in_range(r.session.start_time)) {
        completed_sessions += 1;
        total_revenue += record.settlement.total_bill;
        total_guests = total_guests.saturating_add(record.session.guest_count);
        total_duration = total_duration.saturating_add(elapsed(&record.session, record.end_time()));
        service_calls = service_calls.saturating_add(record.session.service_call_count);
    }

    let mut active_rooms = 0;
    let mut active_sessions_in_range = 0;
    for room in rooms.iter().filter(|r| r.is_occupied()) {
        active_rooms += 1;
        let Some(session) = room.session.as_ref() else {
            continue;
        };
        service_calls = service_calls.saturating_add(session.service_call_count);
        if in_range(session.start_time) {
            active_sessions_in_range += 1;
            total_revenue += policy.compute(session, room, now).total_amount;
            total_duration = total_duration.saturating_add(elapsed(session, now));
        }
    }

    let counted = (completed_sessions + active_sessions_in_range) as u64;
    let average_duration = if counted > 0 { total_duration / counted } else { 0 };

    DashboardStats {
        active_rooms,
        active_sessions_in_range,
        completed_sessions,
        total_revenue,
        total_guests,
        average_duration,
        service_calls,
    }
}

/// History revenue per venue-local start hour (index 0 = 00:00-00:59)
pub fn hourly_revenue(
    history: &[SessionRecord],
    range: DateRange,
    now: Timestamp,
    tz: Tz,
) -> [Decimal; 24] {
    let (start, end) = range.bounds(now, tz);
    let mut buckets = [Decimal::ZERO; 24];
    for record in history {
        let started = record.session.start_time;
        if (start..=end).contains(&started) {
            let hour = local_hour(started, tz) as usize;
            buckets[hour] += record.settlement.total_bill;
        }
    }
    buckets
}
