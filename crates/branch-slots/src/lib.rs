//! # branch-slots
//!
//! Appointment availability for a bank's branch-visit scheduling.
//!
//! Given a date and a branch, the engine lists the open 30-minute slots
//! after applying the weekday/Saturday/Sunday operating rules and removing
//! slots that are already booked. Reference data (topics, branches, booked
//! slots) is always passed in explicitly.
//!
//! ## Modules
//!
//! - [`slot`] — `HH:MM` slot times on the 30-minute grid
//! - [`hours`] — Operating windows per day type
//! - [`directory`] — Topics, branches and booked slots
//! - [`availability`] — Open slots for a branch on a date
//! - [`booking`] — Booking form rules and confirmations
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod directory;
pub mod error;
pub mod hours;
pub mod slot;

pub use availability::{available_slots, day_availability, parse_iso_date, DayAvailability};
pub use booking::{
    confirm, format_phone_number, AppointmentRequest, Confirmation, ContactInfo, DateRange,
    DEFAULT_MAX_DAYS_AHEAD,
};
pub use directory::{BookedSlot, Branch, BusinessHours, Directory, Topic};
pub use error::BookingError;
pub use hours::{OperatingHours, Window};
pub use slot::SlotTime;
