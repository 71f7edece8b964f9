//! Time-of-day parsing, the interval overlap predicate, and the free-slot
//! calculator.
//!
//! All intervals are half-open `[start, end)`. Times are wall-clock values
//! within a single day; the calculator never crosses midnight.

use chrono::{NaiveTime, Timelike};

use crate::error::CoreError;

/// Default distance between candidate slot start times, in minutes.
pub const DEFAULT_STEP_MINUTES: u32 = 30;

/// Parse an `"HH:MM"` time-of-day string.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| CoreError::Validation(format!("Invalid time '{value}', expected HH:MM")))
}

/// Render a time-of-day as `"HH:MM"`.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` conflict iff
/// `s1 < e2 && e1 > s2`. Back-to-back intervals do not overlap.
///
/// Generic over the endpoint type so the same predicate serves both
/// `NaiveTime` intervals and the minutes-since-midnight arithmetic of the
/// slot calculator.
pub fn intervals_overlap<T: PartialOrd>(s1: T, e1: T, s2: T, e2: T) -> bool {
    s1 < e2 && e1 > s2
}

/// Add a duration in minutes to a start time, failing if the result would
/// pass midnight. Used to derive an appointment's end time from its
/// services' combined duration.
pub fn add_minutes(start: NaiveTime, minutes: u32) -> Result<NaiveTime, CoreError> {
    let total = minutes_of(start) + minutes;
    if total >= 24 * 60 {
        return Err(CoreError::Validation(
            "Appointment would extend past midnight".to_string(),
        ));
    }
    NaiveTime::from_hms_opt(total / 60, total % 60, 0)
        .ok_or_else(|| CoreError::Internal(format!("Unrepresentable time: {total} minutes")))
}

/// A free bookable interval, rendered as `"HH:MM"` strings in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    start_minutes: u32,
    end_minutes: u32,
}

impl Slot {
    /// Slot start as `"HH:MM"`.
    pub fn start(&self) -> String {
        fmt_minutes(self.start_minutes)
    }

    /// Slot end as `"HH:MM"`.
    pub fn end(&self) -> String {
        fmt_minutes(self.end_minutes)
    }
}

impl serde::Serialize for Slot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Slot", 2)?;
        state.serialize_field("start", &self.start())?;
        state.serialize_field("end", &self.end())?;
        state.end()
    }
}

/// Opening hours for one calendar day, as resolved from the salon's
/// per-weekday schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayHours {
    /// The salon is open between the two times.
    Open { open: NaiveTime, close: NaiveTime },
    /// An opening-hours row exists and marks the day closed.
    Closed,
    /// No opening-hours row exists for this weekday.
    Unspecified,
}

/// Why a day has no bookable slots at all, as opposed to being fully booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedReason {
    SalonClosed,
    NoOpeningHours,
}

impl ClosedReason {
    /// Human-readable explanation for API responses.
    pub fn message(&self) -> &'static str {
        match self {
            ClosedReason::SalonClosed => "The salon is closed on this day",
            ClosedReason::NoOpeningHours => "No opening hours are defined for this day",
        }
    }
}

/// Result of the slot calculation for one day.
///
/// `reason` is `Some` only when the day is closed or has no opening hours;
/// a fully-booked open day yields empty `slots` and `reason: None`.
#[derive(Debug)]
pub struct Availability {
    pub slots: Vec<Slot>,
    pub reason: Option<ClosedReason>,
}

/// Compute the free slots for one day.
///
/// Candidate start times are generated at `step_minutes` increments from
/// `open`; generation stops once `start + duration` would pass `close`
/// (no partial slots past closing). A candidate survives iff it overlaps
/// none of `existing`. Pure and deterministic; output is ordered by start
/// time ascending.
pub fn compute_available_slots(
    open: NaiveTime,
    close: NaiveTime,
    existing: &[(NaiveTime, NaiveTime)],
    duration_minutes: u32,
    step_minutes: u32,
) -> Vec<Slot> {
    let open_m = minutes_of(open);
    let close_m = minutes_of(close);
    let occupied: Vec<(u32, u32)> = existing
        .iter()
        .map(|&(s, e)| (minutes_of(s), minutes_of(e)))
        .collect();

    let step = step_minutes.max(1);
    let mut slots = Vec::new();
    let mut start = open_m;
    while start + duration_minutes <= close_m {
        let end = start + duration_minutes;
        let taken = occupied
            .iter()
            .any(|&(s, e)| intervals_overlap(start, end, s, e));
        if !taken {
            slots.push(Slot {
                start_minutes: start,
                end_minutes: end,
            });
        }
        start += step;
    }
    slots
}

/// Resolve a day's availability from its opening hours.
///
/// Closed days and days without an opening-hours row produce an empty slot
/// list with an explanatory reason, distinct from "fully booked".
pub fn availability_for_day(
    hours: DayHours,
    existing: &[(NaiveTime, NaiveTime)],
    duration_minutes: u32,
    step_minutes: u32,
) -> Availability {
    match hours {
        DayHours::Open { open, close } => Availability {
            slots: compute_available_slots(open, close, existing, duration_minutes, step_minutes),
            reason: None,
        },
        DayHours::Closed => Availability {
            slots: Vec::new(),
            reason: Some(ClosedReason::SalonClosed),
        },
        DayHours::Unspecified => Availability {
            slots: Vec::new(),
            reason: Some(ClosedReason::NoOpeningHours),
        },
    }
}

fn minutes_of(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

fn fmt_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(value: &str) -> NaiveTime {
        parse_hhmm(value).expect("valid test time")
    }

    fn rendered(slots: &[Slot]) -> Vec<(String, String)> {
        slots.iter().map(|s| (s.start(), s.end())).collect()
    }

    // -----------------------------------------------------------------------
    // Parsing and formatting
    // -----------------------------------------------------------------------

    #[test]
    fn parse_and_format_round_trip() {
        assert_eq!(format_hhmm(t("09:05")), "09:05");
        assert_eq!(format_hhmm(t("23:59")), "23:59");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_hhmm("9h30").is_err());
        assert!(parse_hhmm("25:00").is_err());
        assert!(parse_hhmm("").is_err());
    }

    // -----------------------------------------------------------------------
    // Overlap predicate (half-open intervals)
    // -----------------------------------------------------------------------

    #[test]
    fn overlapping_intervals_conflict() {
        assert!(intervals_overlap(t("09:00"), t("10:00"), t("09:30"), t("10:30")));
        assert!(intervals_overlap(t("09:30"), t("10:30"), t("09:00"), t("10:00")));
        assert!(intervals_overlap(t("09:00"), t("12:00"), t("10:00"), t("10:30")));
    }

    #[test]
    fn back_to_back_intervals_do_not_conflict() {
        assert!(!intervals_overlap(t("09:00"), t("09:30"), t("09:30"), t("10:00")));
        assert!(!intervals_overlap(t("09:30"), t("10:00"), t("09:00"), t("09:30")));
    }

    #[test]
    fn disjoint_intervals_do_not_conflict() {
        assert!(!intervals_overlap(t("09:00"), t("09:30"), t("11:00"), t("11:30")));
    }

    #[test]
    fn overlap_predicate_works_on_minutes() {
        // The slot calculator applies the predicate to minutes-since-midnight.
        assert!(intervals_overlap(540u32, 600, 570, 630));
        assert!(!intervals_overlap(540u32, 570, 570, 600));
    }

    // -----------------------------------------------------------------------
    // add_minutes
    // -----------------------------------------------------------------------

    #[test]
    fn add_minutes_computes_end_time() {
        assert_eq!(add_minutes(t("09:00"), 90).unwrap(), t("10:30"));
    }

    #[test]
    fn add_minutes_rejects_past_midnight() {
        assert!(add_minutes(t("23:30"), 45).is_err());
    }

    // -----------------------------------------------------------------------
    // Slot calculation
    // -----------------------------------------------------------------------

    #[test]
    fn empty_calendar_yields_full_grid() {
        let slots = compute_available_slots(t("09:00"), t("10:00"), &[], 30, 30);
        assert_eq!(
            rendered(&slots),
            vec![
                ("09:00".to_string(), "09:30".to_string()),
                ("09:30".to_string(), "10:00".to_string()),
            ]
        );
    }

    #[test]
    fn existing_booking_removes_its_slot() {
        let existing = vec![(t("09:00"), t("09:30"))];
        let slots = compute_available_slots(t("09:00"), t("10:00"), &existing, 30, 30);
        assert_eq!(
            rendered(&slots),
            vec![("09:30".to_string(), "10:00".to_string())]
        );
    }

    #[test]
    fn no_partial_slot_past_closing() {
        // 45-minute service, closing at 10:00: the 09:30 candidate would end
        // at 10:15 and must not be offered.
        let slots = compute_available_slots(t("09:00"), t("10:00"), &[], 45, 30);
        assert_eq!(
            rendered(&slots),
            vec![("09:00".to_string(), "09:45".to_string())]
        );
    }

    #[test]
    fn long_booking_blocks_every_overlapping_candidate() {
        let existing = vec![(t("09:15"), t("10:45"))];
        let slots = compute_available_slots(t("09:00"), t("12:00"), &existing, 30, 30);
        // 09:00 overlaps (ends 09:30 > 09:15); next free candidate is 11:00.
        assert_eq!(
            rendered(&slots),
            vec![
                ("11:00".to_string(), "11:30".to_string()),
                ("11:30".to_string(), "12:00".to_string()),
            ]
        );
    }

    #[test]
    fn slots_are_ordered_ascending() {
        let slots = compute_available_slots(t("08:00"), t("12:00"), &[], 30, 30);
        let starts: Vec<String> = slots.iter().map(|s| s.start()).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn fully_booked_day_is_empty_without_reason() {
        let existing = vec![(t("09:00"), t("10:00"))];
        let availability = availability_for_day(
            DayHours::Open {
                open: t("09:00"),
                close: t("10:00"),
            },
            &existing,
            30,
            30,
        );
        assert!(availability.slots.is_empty());
        assert!(availability.reason.is_none());
    }

    #[test]
    fn closed_day_has_explanatory_reason() {
        let availability = availability_for_day(DayHours::Closed, &[], 30, 30);
        assert!(availability.slots.is_empty());
        assert_eq!(availability.reason, Some(ClosedReason::SalonClosed));
    }

    #[test]
    fn missing_hours_row_has_distinct_reason() {
        let availability = availability_for_day(DayHours::Unspecified, &[], 30, 30);
        assert!(availability.slots.is_empty());
        assert_eq!(availability.reason, Some(ClosedReason::NoOpeningHours));
    }

    #[test]
    fn slot_serializes_as_hhmm_strings() {
        let slots = compute_available_slots(t("09:00"), t("09:30"), &[], 30, 30);
        let json = serde_json::to_value(&slots[0]).unwrap();
        assert_eq!(json["start"], "09:00");
        assert_eq!(json["end"], "09:30");
    }
}
