//! Availability resolution.
//!
//! Pure functions over an explicit rule set and an explicit "now". No
//! ambient state, so resolving twice with the same inputs yields the same
//! slots.
//!
//! The booking window shows [`BUSINESS_DAYS_SHOWN`] weekdays, found by
//! scanning at most [`CALENDAR_SCAN_CAP`] calendar days forward. The scan
//! cap (rather than a fixed day count) keeps weekends from eating into the
//! window. Each business day carries an 09:00–17:30 grid of 30-minute
//! slots, minus the same-day cutoff and any matching blocked times.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use super::models::{BlockType, BlockedTime, Office};

/// First bookable hour of the day.
pub const OPENING_HOUR: u32 = 9;
/// Hour of the last slot pair (17:00 and 17:30).
pub const LAST_SLOT_HOUR: u32 = 17;
/// Slot grid minutes within each hour.
pub const SLOT_MINUTES: [u32; 2] = [0, 30];
/// Business days offered to the client.
pub const BUSINESS_DAYS_SHOWN: usize = 10;
/// Calendar days scanned before giving up on filling the window.
pub const CALENDAR_SCAN_CAP: usize = 20;

/// One day of the booking window with its surviving slots (possibly none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<NaiveTime>,
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A rule with no office applies everywhere. An office-scoped rule applies
/// to that office and to office-less requests (phone/video), never to the
/// other office.
fn applies_to_office(rule: &BlockedTime, office: Option<Office>) -> bool {
    match (rule.office_location, office) {
        (None, _) => true,
        (Some(_), None) => true,
        (Some(scoped), Some(requested)) => scoped == requested,
    }
}

/// Half-open range check: a slot exactly at `blocked_time_end` survives.
fn blocks_time(rule: &BlockedTime, time: NaiveTime) -> bool {
    match (rule.blocked_time_start, rule.blocked_time_end) {
        (Some(start), Some(end)) => start <= time && time < end,
        _ => false,
    }
}

/// Surviving slots for one date. Slots on the current date at or before the
/// current minute are dropped (strict: an exactly-now slot is gone too).
pub fn day_slots(
    date: NaiveDate,
    office: Option<Office>,
    rules: &[BlockedTime],
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    let day_rules: Vec<&BlockedTime> = rules
        .iter()
        .filter(|r| r.blocked_date == date && applies_to_office(r, office))
        .collect();

    if day_rules.iter().any(|r| r.block_type == BlockType::Date) {
        return Vec::new();
    }

    let cutoff = if date == now.date() {
        NaiveTime::from_hms_opt(now.time().hour(), now.time().minute(), 0)
    } else {
        None
    };

    let mut slots = Vec::new();
    for hour in OPENING_HOUR..=LAST_SLOT_HOUR {
        for minute in SLOT_MINUTES {
            let time = NaiveTime::from_hms_opt(hour, minute, 0)
                .expect("slot grid times are valid");

            if let Some(cutoff) = cutoff {
                if time <= cutoff {
                    continue;
                }
            }
            if day_rules.iter().any(|r| blocks_time(r, time)) {
                continue;
            }
            slots.push(time);
        }
    }
    slots
}

/// Resolve the booking window starting at `window_start`: up to
/// [`BUSINESS_DAYS_SHOWN`] weekdays found within `window_days` scanned
/// calendar days, ascending, each with its surviving slots. A day emptied
/// by the cutoff or a full-day block still occupies its place in the
/// window; an unfillable window yields fewer days, never an error.
pub fn resolve(
    window_start: NaiveDate,
    window_days: usize,
    office: Option<Office>,
    rules: &[BlockedTime],
    now: NaiveDateTime,
) -> Vec<DayAvailability> {
    let mut days = Vec::new();
    let mut scanned = 0usize;

    while days.len() < BUSINESS_DAYS_SHOWN && scanned < window_days {
        let date = window_start + Duration::days(scanned as i64);
        scanned += 1;
        if is_weekend(date) {
            continue;
        }
        days.push(DayAvailability {
            date,
            slots: day_slots(date, office, rules, now),
        });
    }
    days
}

/// Submission-time recheck: is `(date, time)` a member of the window
/// resolved right now? Past dates, weekends, off-grid times and blocked
/// slots all fail here.
pub fn slot_bookable(
    date: NaiveDate,
    time: NaiveTime,
    office: Option<Office>,
    rules: &[BlockedTime],
    now: NaiveDateTime,
) -> bool {
    resolve(now.date(), CALENDAR_SCAN_CAP, office, rules, now)
        .iter()
        .any(|day| day.date == date && day.slots.contains(&time))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, 0).unwrap()
    }

    // 2025-06-02 is a Monday.
    fn monday() -> NaiveDate {
        d(2025, 6, 2)
    }

    fn full_day(date: NaiveDate, office: Option<Office>) -> BlockedTime {
        BlockedTime {
            id: Uuid::new_v4(),
            block_type: BlockType::Date,
            blocked_date: date,
            blocked_time_start: None,
            blocked_time_end: None,
            office_location: office,
            reason: None,
            created_by: "admin".to_string(),
            created_at: Utc::now(),
        }
    }

    fn time_block(
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        office: Option<Office>,
    ) -> BlockedTime {
        BlockedTime {
            id: Uuid::new_v4(),
            block_type: BlockType::TimeSlot,
            blocked_date: date,
            blocked_time_start: Some(start),
            blocked_time_end: Some(end),
            office_location: office,
            reason: None,
            created_by: "admin".to_string(),
            created_at: Utc::now(),
        }
    }

    // A "now" well before the window so no cutoff interferes.
    fn early_now() -> NaiveDateTime {
        at(d(2025, 5, 30), 8, 0)
    }

    #[test]
    fn grid_is_eighteen_slots_between_nine_and_seventeen_thirty() {
        let days = resolve(monday(), CALENDAR_SCAN_CAP, None, &[], early_now());
        assert_eq!(days.len(), BUSINESS_DAYS_SHOWN);

        for day in &days {
            assert_eq!(day.slots.len(), 18);
            assert_eq!(day.slots.first().copied(), Some(t(9, 0)));
            assert_eq!(day.slots.last().copied(), Some(t(17, 30)));
            for slot in &day.slots {
                assert!(slot.hour() >= OPENING_HOUR && slot.hour() <= LAST_SLOT_HOUR);
                assert!(SLOT_MINUTES.contains(&slot.minute()));
            }
        }
    }

    #[test]
    fn window_never_contains_weekends() {
        // Start on a Saturday; the scan should skip straight to Monday.
        let saturday = d(2025, 6, 7);
        let days = resolve(saturday, CALENDAR_SCAN_CAP, None, &[], early_now());

        assert_eq!(days.len(), BUSINESS_DAYS_SHOWN);
        assert_eq!(days[0].date, d(2025, 6, 9));
        for day in &days {
            assert!(!is_weekend(day.date));
        }
    }

    #[test]
    fn days_are_ascending() {
        let days = resolve(monday(), CALENDAR_SCAN_CAP, None, &[], early_now());
        for pair in days.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn same_day_cutoff_drops_equal_minute_slot() {
        // now = 14:32 on a business day: 14:30 is gone, 15:00 survives.
        let now = at(monday(), 14, 32);
        let slots = day_slots(monday(), None, &[], now);

        assert!(!slots.contains(&t(14, 30)));
        assert!(!slots.contains(&t(9, 0)));
        assert!(slots.contains(&t(15, 0)));

        // Exactly on a slot minute drops that slot too.
        let on_the_dot = at(monday(), 14, 30);
        let slots = day_slots(monday(), None, &[], on_the_dot);
        assert!(!slots.contains(&t(14, 30)));
        assert!(slots.contains(&t(15, 0)));
    }

    #[test]
    fn past_closing_today_is_empty_but_scan_continues() {
        let now = at(monday(), 18, 0);
        let days = resolve(monday(), CALENDAR_SCAN_CAP, None, &[], now);

        assert_eq!(days.len(), BUSINESS_DAYS_SHOWN);
        assert_eq!(days[0].date, monday());
        assert!(days[0].slots.is_empty());
        assert_eq!(days[1].slots.len(), 18);
    }

    #[test]
    fn full_day_block_without_office_empties_every_office() {
        let rules = vec![full_day(monday(), None)];

        for office in [None, Some(Office::Cheonan), Some(Office::Pyeongtaek)] {
            assert!(day_slots(monday(), office, &rules, early_now()).is_empty());
        }
    }

    #[test]
    fn office_scoped_range_leaves_other_office_untouched() {
        let rules = vec![time_block(monday(), t(10, 0), t(12, 0), Some(Office::Cheonan))];

        let pyeongtaek = day_slots(monday(), Some(Office::Pyeongtaek), &rules, early_now());
        assert_eq!(pyeongtaek.len(), 18);

        let cheonan = day_slots(monday(), Some(Office::Cheonan), &rules, early_now());
        assert_eq!(cheonan.len(), 14);
        assert!(!cheonan.contains(&t(10, 0)));
        assert!(!cheonan.contains(&t(11, 30)));
        assert!(cheonan.contains(&t(9, 30)));
        // Half-open: the slot at the range end stays bookable.
        assert!(cheonan.contains(&t(12, 0)));
    }

    #[test]
    fn office_scoped_rule_applies_to_officeless_request() {
        let rules = vec![time_block(monday(), t(10, 0), t(11, 0), Some(Office::Cheonan))];
        let slots = day_slots(monday(), None, &rules, early_now());
        assert!(!slots.contains(&t(10, 30)));
    }

    #[test]
    fn overlapping_rules_union_idempotently() {
        let rules = vec![
            time_block(monday(), t(10, 0), t(12, 0), None),
            time_block(monday(), t(11, 0), t(13, 0), None),
            time_block(monday(), t(10, 0), t(12, 0), None),
        ];
        let slots = day_slots(monday(), None, &rules, early_now());

        // [10:00, 13:00) removed as a whole; duplicates change nothing.
        assert_eq!(slots.len(), 12);
        assert!(!slots.contains(&t(12, 30)));
        assert!(slots.contains(&t(13, 0)));
    }

    #[test]
    fn resolution_is_pure() {
        let rules = vec![
            full_day(d(2025, 6, 4), None),
            time_block(monday(), t(9, 0), t(10, 0), Some(Office::Pyeongtaek)),
        ];
        let now = at(monday(), 11, 17);

        let first = resolve(monday(), CALENDAR_SCAN_CAP, Some(Office::Pyeongtaek), &rules, now);
        let second = resolve(monday(), CALENDAR_SCAN_CAP, Some(Office::Pyeongtaek), &rules, now);
        assert_eq!(first, second);
    }

    #[test]
    fn slot_bookable_accepts_open_future_slot() {
        let now = at(monday(), 9, 0);
        assert!(slot_bookable(d(2025, 6, 3), t(10, 30), None, &[], now));
    }

    #[test]
    fn slot_bookable_rejects_past_weekend_offgrid_and_blocked() {
        let now = at(monday(), 14, 32);

        // Earlier today.
        assert!(!slot_bookable(monday(), t(14, 30), None, &[], now));
        // Yesterday (Sunday) and any past date.
        assert!(!slot_bookable(d(2025, 6, 1), t(10, 0), None, &[], now));
        assert!(!slot_bookable(d(2025, 5, 30), t(10, 0), None, &[], now));
        // Next Saturday.
        assert!(!slot_bookable(d(2025, 6, 7), t(10, 0), None, &[], now));
        // Off the 30-minute grid.
        assert!(!slot_bookable(d(2025, 6, 3), t(10, 15), None, &[], now));
        assert!(!slot_bookable(d(2025, 6, 3), t(8, 30), None, &[], now));
        // Blocked by a rule.
        let rules = vec![full_day(d(2025, 6, 3), None)];
        assert!(!slot_bookable(d(2025, 6, 3), t(10, 0), None, &rules, now));
    }

    #[test]
    fn slot_bookable_rejects_dates_beyond_scan_cap() {
        let now = at(monday(), 9, 0);
        // Four weeks out is past the 20-calendar-day window.
        assert!(!slot_bookable(d(2025, 6, 30), t(10, 0), None, &[], now));
    }
}
