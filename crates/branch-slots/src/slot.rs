//! Half-hour appointment slots.
//!
//! A [`SlotTime`] is the start of a 30-minute appointment on the `:00`/`:30`
//! grid. Off-grid values cannot be constructed, so every slot the engine
//! emits or compares against is grid-aligned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// Width of one appointment slot, in minutes.
pub const SLOT_MINUTES: u16 = 30;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A 24-hour `HH:MM` slot start time on the 30-minute grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime {
    minutes: u16,
}

impl SlotTime {
    /// Build a slot from an hour (0-23) and a minute (0 or 30).
    pub fn new(hour: u8, minute: u8) -> Result<Self, BookingError> {
        if hour > 23 {
            return Err(BookingError::InvalidTime(format!(
                "{hour:02}:{minute:02} (hour out of range)"
            )));
        }
        if u16::from(minute) % SLOT_MINUTES != 0 || minute >= 60 {
            return Err(BookingError::InvalidTime(format!(
                "{hour:02}:{minute:02} (not on the 30-minute grid)"
            )));
        }
        Ok(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// The `HH:00` slot. `hour` must be below 24.
    pub(crate) const fn on_the_hour(hour: u8) -> Self {
        assert!(hour < 24);
        Self {
            minutes: hour as u16 * 60,
        }
    }

    /// Parse a strict `HH:MM` string (both fields two digits).
    ///
    /// ```
    /// use branch_slots::SlotTime;
    ///
    /// let slot = SlotTime::parse("09:30").unwrap();
    /// assert_eq!(slot.to_string(), "09:30");
    /// assert!(SlotTime::parse("09:15").is_err());
    /// assert!(SlotTime::parse("9:30").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, BookingError> {
        let invalid = || BookingError::InvalidTime(s.to_string());

        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }

    pub fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// The following slot, or `None` past the last slot of the day.
    pub fn next(self) -> Option<Self> {
        let minutes = self.minutes + SLOT_MINUTES;
        (minutes < MINUTES_PER_DAY).then_some(Self { minutes })
    }

    /// Every slot in the half-open window `[open, close)`, ascending.
    pub fn grid(open: SlotTime, close: SlotTime) -> impl Iterator<Item = SlotTime> {
        std::iter::successors(Some(open), |slot| slot.next()).take_while(move |slot| *slot < close)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for SlotTime {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = BookingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SlotTime> for String {
    fn from(slot: SlotTime) -> Self {
        slot.to_string()
    }
}
