//! Booking form rules: contact details, phone formatting, the selectable date
//! range, and turning a completed request into a confirmation.
//!
//! Nothing here reads the system clock. Callers supply "today" when they
//! build a [`DateRange`].

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::availability::{available_slots, parse_iso_date};
use crate::directory::{BookedSlot, Directory};
use crate::error::{BookingError, Result};
use crate::hours::OperatingHours;
use crate::slot::SlotTime;

/// Default booking horizon, in days after today.
pub const DEFAULT_MAX_DAYS_AHEAD: u32 = 30;

/// Format the digits of `value` as a US phone number while it is being typed.
///
/// Non-digits are dropped and input past ten digits is ignored.
///
/// ```
/// use branch_slots::format_phone_number;
///
/// assert_eq!(format_phone_number("816"), "816");
/// assert_eq!(format_phone_number("816234"), "(816) 234");
/// assert_eq!(format_phone_number("816-234-2000"), "(816) 234-2000");
/// ```
pub fn format_phone_number(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        n => format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..n.min(10)]
        ),
    }
}

/// Inclusive range of dates a customer may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateRange {
    /// Tomorrow through `today + max_days_ahead`.
    pub fn from_today(today: NaiveDate, max_days_ahead: u32) -> Self {
        Self {
            min: today + Duration::days(1),
            max: today + Duration::days(i64::from(max_days_ahead)),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ContactInfo {
    /// All four fields are required.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(BookingError::MissingField(*name)),
            None => Ok(()),
        }
    }
}

/// A filled-in booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub contact: ContactInfo,
    pub topic_id: u32,
    pub branch_id: u32,
    pub date: String,
    pub time: String,
}

/// Summary shown once an appointment is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub topic: String,
    pub branch_name: String,
    pub branch_address: String,
    pub date: String,
    /// e.g. "Thursday, February 5, 2026"
    pub long_date: String,
    pub time: SlotTime,
}

/// Check a request against the directory and produce its confirmation.
///
/// # Errors
///
/// - [`BookingError::MissingField`] for a blank contact field, date or time
/// - [`BookingError::UnknownTopic`] / [`BookingError::UnknownBranch`]
/// - [`BookingError::BranchDoesNotServeTopic`]
/// - [`BookingError::InvalidDate`] / [`BookingError::InvalidTime`]
/// - [`BookingError::DateOutOfRange`] outside `range`
/// - [`BookingError::SlotUnavailable`] if the time is not an open slot
pub fn confirm(
    request: &AppointmentRequest,
    directory: &Directory,
    hours: &OperatingHours,
    range: &DateRange,
) -> Result<Confirmation> {
    request.contact.validate()?;

    let topic = directory
        .topic(request.topic_id)
        .ok_or(BookingError::UnknownTopic(request.topic_id))?;
    let branch = directory
        .branch(request.branch_id)
        .ok_or(BookingError::UnknownBranch(request.branch_id))?;
    if !branch.serves(topic.id) {
        return Err(BookingError::BranchDoesNotServeTopic {
            branch_id: branch.id,
            topic_id: topic.id,
        });
    }

    if request.date.trim().is_empty() {
        return Err(BookingError::MissingField("date"));
    }
    if request.time.trim().is_empty() {
        return Err(BookingError::MissingField("time"));
    }
    let day = parse_iso_date(&request.date)?;
    if !range.contains(day) {
        return Err(BookingError::DateOutOfRange {
            date: request.date.clone(),
            min: range.min.to_string(),
            max: range.max.to_string(),
        });
    }
    let time = SlotTime::parse(&request.time)?;

    let open = available_slots(Some(&request.date), Some(branch), &directory.booked, hours)?;
    if !open.contains(&time) {
        return Err(BookingError::SlotUnavailable {
            date: request.date.clone(),
            time: time.to_string(),
        });
    }

    Ok(Confirmation {
        first_name: request.contact.first_name.trim().to_string(),
        last_name: request.contact.last_name.trim().to_string(),
        email: request.contact.email.trim().to_string(),
        phone: format_phone_number(&request.contact.phone),
        topic: topic.name.clone(),
        branch_name: branch.name.clone(),
        branch_address: branch.address.clone(),
        date: request.date.clone(),
        long_date: long_date(day),
        time,
    })
}

/// Render a date as "Weekday, Month D, YYYY".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

impl Directory {
    /// Confirm `request` and reserve its slot.
    pub fn book(
        &mut self,
        request: &AppointmentRequest,
        hours: &OperatingHours,
        range: &DateRange,
    ) -> Result<Confirmation> {
        let confirmation = confirm(request, self, hours, range)?;
        self.record_booking(BookedSlot::new(
            request.branch_id,
            confirmation.date.clone(),
            confirmation.time,
        ))?;
        tracing::info!(
            branch = %confirmation.branch_name,
            date = %confirmation.date,
            time = %confirmation.time,
            "appointment booked"
        );
        Ok(confirmation)
    }
}
