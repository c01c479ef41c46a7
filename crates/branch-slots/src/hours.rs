//! Operating windows by day type.
//!
//! Branches take appointments inside a half-open window that depends only on
//! the day of the week: one window for Monday through Friday, one for
//! Saturday, none on Sunday. The weekday and Saturday windows are held as
//! separate values even where their bounds coincide.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::slot::SlotTime;

/// A half-open `[open, close)` interval of slot start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub open: SlotTime,
    pub close: SlotTime,
}

impl Window {
    pub fn new(open: SlotTime, close: SlotTime) -> Result<Self, BookingError> {
        if open >= close {
            return Err(BookingError::InvalidHours(format!(
                "window opens at {open} but closes at {close}"
            )));
        }
        Ok(Self { open, close })
    }

    /// Every slot in the window, ascending.
    pub fn slots(&self) -> impl Iterator<Item = SlotTime> {
        SlotTime::grid(self.open, self.close)
    }

    pub fn slot_count(&self) -> usize {
        self.slots().count()
    }
}

/// Appointment windows for each day type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub weekday: Window,
    pub saturday: Window,
}

impl OperatingHours {
    pub fn new(weekday: Window, saturday: Window) -> Self {
        Self { weekday, saturday }
    }

    /// The window for `weekday`, or `None` when branches are closed.
    pub fn window_for(&self, weekday: Weekday) -> Option<Window> {
        match weekday {
            Weekday::Sun => None,
            Weekday::Sat => Some(self.saturday),
            _ => Some(self.weekday),
        }
    }

    /// Re-check both windows, e.g. after deserializing from config.
    pub fn validate(&self) -> Result<(), BookingError> {
        Window::new(self.weekday.open, self.weekday.close)?;
        Window::new(self.saturday.open, self.saturday.close)?;
        Ok(())
    }
}

impl Default for OperatingHours {
    /// Weekdays `[09:00, 17:00)`, Saturdays `[09:00, 13:00)`.
    fn default() -> Self {
        Self {
            weekday: Window {
                open: SlotTime::on_the_hour(9),
                close: SlotTime::on_the_hour(17),
            },
            saturday: Window {
                open: SlotTime::on_the_hour(9),
                close: SlotTime::on_the_hour(13),
            },
        }
    }
}
