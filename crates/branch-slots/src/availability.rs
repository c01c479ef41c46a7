//! Open appointment slots for a branch on a date.
//!
//! The engine is a pure function of its inputs: the selected date, the
//! selected branch, the list of booked slots and the operating hours. All
//! reference data is passed in, nothing is read from global state.
//!
//! # Rules
//!
//! 1. No date or no branch selected → no slots.
//! 2. Sunday → no slots (branches are closed).
//! 3. Saturday → the Saturday window; Monday to Friday → the weekday window.
//! 4. Every 30-minute slot in the window is generated in ascending order.
//! 5. A slot is dropped when a booked slot has the same branch id, the same
//!    date string and the same time.
//!
//! The engine applies no range restriction on how far ahead `date` may be;
//! that belongs to the booking form (see [`crate::booking::DateRange`]).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::directory::{BookedSlot, Branch};
use crate::error::{BookingError, Result};
use crate::hours::OperatingHours;
use crate::slot::SlotTime;

/// What a branch can offer on a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "slots", rename_all = "snake_case")]
pub enum DayAvailability {
    /// Date or branch not selected yet.
    Unselected,
    /// No operating window on this weekday.
    Closed,
    /// The window has slots but every one is booked.
    FullyBooked,
    /// Free slots, ascending.
    Open(Vec<SlotTime>),
}

impl DayAvailability {
    pub fn slots(&self) -> &[SlotTime] {
        match self {
            DayAvailability::Open(slots) => slots,
            _ => &[],
        }
    }

    pub fn into_slots(self) -> Vec<SlotTime> {
        match self {
            DayAvailability::Open(slots) => slots,
            _ => Vec::new(),
        }
    }
}

/// Compute the free slots for `branch` on `date`.
///
/// # Arguments
///
/// * `date` — An ISO `YYYY-MM-DD` calendar date, or `None`/`""` if not chosen
/// * `branch` — The selected branch, or `None`
/// * `booked` — Already-reserved slots, for any branch
/// * `hours` — Weekday and Saturday operating windows
///
/// # Returns
///
/// The open slots in ascending order. Empty when nothing is selected, on a
/// Sunday, or when every slot is booked.
///
/// # Errors
///
/// Returns [`BookingError::InvalidDate`] if a non-empty `date` is not a valid
/// zero-padded `YYYY-MM-DD` calendar date.
///
/// # Examples
///
/// ```
/// use branch_slots::{available_slots, Directory, OperatingHours};
///
/// let dir = Directory::seed();
/// let downtown = dir.branch(1);
/// // Thursday 2026-02-05 has 10:00 and 14:00 already booked at Downtown.
/// let slots = available_slots(Some("2026-02-05"), downtown, &dir.booked, &OperatingHours::default())
///     .unwrap();
/// assert_eq!(slots.len(), 14);
/// assert_eq!(slots[0].to_string(), "09:00");
/// assert!(!slots.iter().any(|s| s.to_string() == "10:00"));
/// ```
pub fn available_slots(
    date: Option<&str>,
    branch: Option<&Branch>,
    booked: &[BookedSlot],
    hours: &OperatingHours,
) -> Result<Vec<SlotTime>> {
    day_availability(date, branch, booked, hours).map(DayAvailability::into_slots)
}

/// Like [`available_slots`] but reports why a day has no slots.
pub fn day_availability(
    date: Option<&str>,
    branch: Option<&Branch>,
    booked: &[BookedSlot],
    hours: &OperatingHours,
) -> Result<DayAvailability> {
    let (date, branch) = match (date.filter(|d| !d.is_empty()), branch) {
        (Some(date), Some(branch)) => (date, branch),
        _ => return Ok(DayAvailability::Unselected),
    };

    let day = parse_iso_date(date)?;
    let Some(window) = hours.window_for(day.weekday()).filter(|w| w.slot_count() > 0) else {
        tracing::trace!(branch_id = branch.id, date, "no operating window on this weekday");
        return Ok(DayAvailability::Closed);
    };

    let taken: Vec<SlotTime> = booked
        .iter()
        .filter(|b| b.branch_id == branch.id && b.date == date)
        .map(|b| b.time)
        .collect();

    let open: Vec<SlotTime> = window.slots().filter(|slot| !taken.contains(slot)).collect();

    tracing::debug!(
        branch_id = branch.id,
        date,
        window = window.slot_count(),
        open = open.len(),
        "computed availability"
    );

    if open.is_empty() {
        Ok(DayAvailability::FullyBooked)
    } else {
        Ok(DayAvailability::Open(open))
    }
}

/// Parse a strict, zero-padded `YYYY-MM-DD` date.
///
/// Booked slots are matched by date string, so shorthand forms such as
/// `2026-2-5` are rejected rather than normalized.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    let well_formed = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(BookingError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| BookingError::InvalidDate(format!("{s}: {e}")))
}

/// Day of week with 0 = Sunday through 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Directory;
    use crate::hours::Window;
    use proptest::prelude::*;

    fn slot(s: &str) -> SlotTime {
        SlotTime::parse(s).unwrap()
    }

    fn strings(slots: &[SlotTime]) -> Vec<String> {
        slots.iter().map(|s| s.to_string()).collect()
    }

    fn weekday_window() -> Vec<String> {
        strings(&OperatingHours::default().weekday.slots().collect::<Vec<_>>())
    }

    fn slots_for(dir: &Directory, date: &str, branch_id: u32) -> Vec<String> {
        let slots = available_slots(
            Some(date),
            dir.branch(branch_id),
            &dir.booked,
            &OperatingHours::default(),
        )
        .unwrap();
        strings(&slots)
    }

    // ── day-type rules ──────────────────────────────────────────────────

    #[test]
    fn test_sunday_is_closed() {
        let dir = Directory::seed();
        // 2026-02-08 is a Sunday
        assert!(slots_for(&dir, "2026-02-08", 1).is_empty());
        let day = day_availability(
            Some("2026-02-08"),
            dir.branch(1),
            &dir.booked,
            &OperatingHours::default(),
        )
        .unwrap();
        assert_eq!(day, DayAvailability::Closed);
    }

    #[test]
    fn test_saturday_window() {
        let dir = Directory::seed();
        // 2026-02-07 is a Saturday
        assert_eq!(
            slots_for(&dir, "2026-02-07", 1),
            vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30"]
        );
    }

    #[test]
    fn test_weekday_window_has_sixteen_slots() {
        let dir = Directory::seed();
        // 2026-02-09 is a Monday
        let slots = slots_for(&dir, "2026-02-09", 3);
        assert_eq!(slots.len(), 16);
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("16:30"));
    }

    #[test]
    fn test_saturday_uses_engine_hours_not_branch_display_hours() {
        // Plaza shows "Closed" on Saturdays, but the engine only knows day types.
        let dir = Directory::seed();
        assert_eq!(slots_for(&dir, "2026-02-07", 3).len(), 8);
    }

    #[test]
    fn test_day_of_week_sunday_is_zero() {
        assert_eq!(day_of_week(parse_iso_date("2026-02-08").unwrap()), 0);
        assert_eq!(day_of_week(parse_iso_date("2026-02-05").unwrap()), 4);
        assert_eq!(day_of_week(parse_iso_date("2026-02-07").unwrap()), 6);
    }

    // ── booked-slot exclusion ───────────────────────────────────────────

    #[test]
    fn test_booked_slots_are_excluded() {
        let dir = Directory::seed();
        let slots = slots_for(&dir, "2026-02-05", 1);
        let expected: Vec<String> = weekday_window()
            .into_iter()
            .filter(|s| s != "10:00" && s != "14:00")
            .collect();
        assert_eq!(slots.len(), 14);
        assert_eq!(slots, expected);
    }

    #[test]
    fn test_bookings_do_not_cross_branches() {
        let dir = Directory::seed();
        // Only branch 2 has 11:00 booked on this Friday.
        assert_eq!(slots_for(&dir, "2026-02-06", 1), weekday_window());
        assert!(!slots_for(&dir, "2026-02-06", 2).contains(&"11:00".to_string()));
    }

    #[test]
    fn test_booking_on_branch_one_does_not_affect_branch_two() {
        let mut dir = Directory::seed();
        dir.booked = vec![BookedSlot::new(1, "2026-02-06", slot("11:00"))];
        assert_eq!(slots_for(&dir, "2026-02-06", 2), weekday_window());
        assert_eq!(slots_for(&dir, "2026-02-06", 1).len(), 15);
    }

    #[test]
    fn test_bookings_do_not_cross_dates() {
        let dir = Directory::seed();
        // Same branch, the following Thursday
        assert_eq!(slots_for(&dir, "2026-02-12", 1), weekday_window());
    }

    #[test]
    fn test_branch_without_bookings_gets_full_window() {
        let dir = Directory::seed();
        assert_eq!(slots_for(&dir, "2026-02-05", 4), weekday_window());
    }

    #[test]
    fn test_fully_booked_day_is_empty_but_not_closed() {
        let mut dir = Directory::seed();
        // 2026-02-07 is a Saturday
        dir.booked = OperatingHours::default()
            .saturday
            .slots()
            .map(|t| BookedSlot::new(2, "2026-02-07", t))
            .collect();
        let hours = OperatingHours::default();
        let day = day_availability(Some("2026-02-07"), dir.branch(2), &dir.booked, &hours).unwrap();
        assert_eq!(day, DayAvailability::FullyBooked);
        assert!(day.slots().is_empty());
        assert!(slots_for(&dir, "2026-02-07", 2).is_empty());
        // Other branches still open
        assert_eq!(slots_for(&dir, "2026-02-07", 1).len(), 8);
    }

    // ── empty-input contract ────────────────────────────────────────────

    #[test]
    fn test_missing_date_or_branch_yields_nothing() {
        let dir = Directory::seed();
        let hours = OperatingHours::default();
        let branch = dir.branch(1);
        assert!(available_slots(Some(""), branch, &dir.booked, &hours).unwrap().is_empty());
        assert!(available_slots(None, branch, &dir.booked, &hours).unwrap().is_empty());
        assert!(available_slots(Some("2026-02-05"), None, &dir.booked, &hours)
            .unwrap()
            .is_empty());
        assert_eq!(
            day_availability(None, None, &dir.booked, &hours).unwrap(),
            DayAvailability::Unselected
        );
    }

    #[test]
    fn test_missing_branch_skips_date_parsing() {
        // A garbage date without a branch is still "nothing selected", not an error.
        let hours = OperatingHours::default();
        assert!(available_slots(Some("garbage"), None, &[], &hours).unwrap().is_empty());
    }

    // ── malformed dates ─────────────────────────────────────────────────

    #[test]
    fn test_malformed_date_is_an_error() {
        let dir = Directory::seed();
        let hours = OperatingHours::default();
        for bad in ["2026-02-30", "2026-2-5", "05/02/2026", "tomorrow", "2026-02-05T10:00"] {
            let err = available_slots(Some(bad), dir.branch(1), &dir.booked, &hours).unwrap_err();
            assert!(matches!(err, BookingError::InvalidDate(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn test_far_future_date_is_accepted() {
        let dir = Directory::seed();
        // 2099-01-05 is a Monday; the engine enforces no booking horizon.
        assert_eq!(slots_for(&dir, "2099-01-05", 1).len(), 16);
    }

    // ── configured hours ────────────────────────────────────────────────

    #[test]
    fn test_custom_saturday_window() {
        let dir = Directory::seed();
        let hours = OperatingHours::new(
            OperatingHours::default().weekday,
            Window::new(slot("10:00"), slot("14:00")).unwrap(),
        );
        let slots = available_slots(Some("2026-02-07"), dir.branch(1), &dir.booked, &hours).unwrap();
        assert_eq!(strings(&slots).first().map(String::as_str), Some("10:00"));
        assert_eq!(strings(&slots).last().map(String::as_str), Some("13:30"));
    }

    #[test]
    fn test_zero_width_window_is_closed_not_fully_booked() {
        let dir = Directory::seed();
        let mut hours = OperatingHours::default();
        hours.weekday = Window {
            open: slot("09:00"),
            close: slot("09:00"),
        };
        // 2026-02-09 is a Monday; branch 4 has no bookings
        let day = day_availability(Some("2026-02-09"), dir.branch(4), &dir.booked, &hours).unwrap();
        assert_eq!(day, DayAvailability::Closed);
    }

    #[test]
    fn test_inverted_window_is_closed() {
        let dir = Directory::seed();
        let mut hours = OperatingHours::default();
        hours.saturday = Window {
            open: slot("13:00"),
            close: slot("09:00"),
        };
        // 2026-02-07 is a Saturday
        let day = day_availability(Some("2026-02-07"), dir.branch(1), &dir.booked, &hours).unwrap();
        assert_eq!(day, DayAvailability::Closed);
        assert!(day.slots().is_empty());
    }

    #[test]
    fn test_serialized_day_availability() {
        let open = DayAvailability::Open(vec![slot("09:00")]);
        assert_eq!(
            serde_json::to_string(&open).unwrap(),
            r#"{"status":"open","slots":["09:00"]}"#
        );
        assert_eq!(
            serde_json::to_string(&DayAvailability::Closed).unwrap(),
            r#"{"status":"closed"}"#
        );
    }

    // ── properties ──────────────────────────────────────────────────────

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        // 2000-01-01 plus up to ~60 years
        (0i64..22_000).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(offset)
        })
    }

    proptest! {
        #[test]
        fn prop_sunday_always_empty(weeks in 0i64..3_000, branch_id in 1u32..=4) {
            // 2000-01-02 is a Sunday
            let date = NaiveDate::from_ymd_opt(2000, 1, 2).unwrap() + chrono::Duration::weeks(weeks);
            let dir = Directory::seed();
            let iso = date.format("%Y-%m-%d").to_string();
            prop_assert!(slots_for(&dir, &iso, branch_id).is_empty());
        }

        #[test]
        fn prop_open_days_without_bookings_get_full_window(date in any_date(), branch_id in 1u32..=4) {
            let dir = Directory { booked: Vec::new(), ..Directory::seed() };
            let iso = date.format("%Y-%m-%d").to_string();
            let slots = slots_for(&dir, &iso, branch_id);
            match day_of_week(date) {
                0 => {
                    prop_assert!(slots.is_empty());
                }
                6 => {
                    prop_assert_eq!(slots.len(), 8);
                }
                _ => {
                    prop_assert_eq!(slots.len(), 16);
                }
            }
            prop_assert!(slots.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_idempotent(date in any_date(), branch_id in 1u32..=4) {
            let dir = Directory::seed();
            let iso = date.format("%Y-%m-%d").to_string();
            prop_assert_eq!(slots_for(&dir, &iso, branch_id), slots_for(&dir, &iso, branch_id));
        }

        #[test]
        fn prop_exactly_the_booked_slots_are_removed(
            mask in proptest::collection::vec(any::<bool>(), 16),
        ) {
            // 2026-02-05 is a Thursday
            let window: Vec<SlotTime> = OperatingHours::default().weekday.slots().collect();
            let mut dir = Directory::seed();
            dir.booked = window
                .iter()
                .zip(&mask)
                .filter(|(_, booked)| **booked)
                .map(|(t, _)| BookedSlot::new(1, "2026-02-05", *t))
                .collect();
            let expected: Vec<String> = window
                .iter()
                .zip(&mask)
                .filter(|(_, booked)| !**booked)
                .map(|(t, _)| t.to_string())
                .collect();
            prop_assert_eq!(slots_for(&dir, "2026-02-05", 1), expected);
        }
    }
}
