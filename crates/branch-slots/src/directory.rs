//! Reference data: service topics, branches, and already-booked slots.
//!
//! A [`Directory`] is passed explicitly to everything that needs it. The
//! built-in [`Directory::seed`] data can be replaced with a JSON file of the
//! same shape via [`Directory::load`].

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::availability::parse_iso_date;
use crate::error::{BookingError, Result};
use crate::slot::SlotTime;

/// Sentinel used in [`BusinessHours::saturday`] for branches closed on Saturdays.
pub const CLOSED: &str = "Closed";

/// A service a customer can book an appointment about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: u32,
    pub name: String,
    pub description: String,
}

/// Display strings for a branch's opening hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub weekday: String,
    pub saturday: String,
}

impl BusinessHours {
    pub fn saturday_closed(&self) -> bool {
        self.saturday.eq_ignore_ascii_case(CLOSED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub topics: BTreeSet<u32>,
    pub business_hours: BusinessHours,
}

impl Branch {
    pub fn serves(&self, topic_id: u32) -> bool {
        self.topics.contains(&topic_id)
    }
}

/// A reserved `(branch, date, time)` combination.
///
/// `date` is kept as the ISO `YYYY-MM-DD` string it was recorded with and is
/// matched by string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    pub branch_id: u32,
    pub date: String,
    pub time: SlotTime,
}

impl BookedSlot {
    pub fn new(branch_id: u32, date: impl Into<String>, time: SlotTime) -> Self {
        Self {
            branch_id,
            date: date.into(),
            time,
        }
    }

    pub fn matches(&self, branch_id: u32, date: &str, time: SlotTime) -> bool {
        self.branch_id == branch_id && self.date == date && self.time == time
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub topics: Vec<Topic>,
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub booked: Vec<BookedSlot>,
}

impl Directory {
    /// The built-in Kansas City branch network.
    pub fn seed() -> Self {
        let topics = [
            (1, "Checking Account", "Open or manage checking accounts"),
            (2, "Savings Account", "Open or manage savings accounts"),
            (
                3,
                "CDs/Money Market Accounts",
                "Certificates of deposit and money market options",
            ),
            (4, "Student Banking", "Banking solutions for students"),
            (5, "Auto Loans", "Vehicle financing and auto loans"),
            (6, "Home Equity", "Home equity loans and lines of credit"),
            (7, "Mortgage", "Home loans and mortgage services"),
            (8, "Student Loans", "Education financing and student loans"),
            (9, "Saving for Retirement", "Retirement planning and accounts"),
            (
                10,
                "Investment Account",
                "Investment services and brokerage accounts",
            ),
            (11, "Credit Card", "Apply for or manage credit cards"),
            (12, "Other", "General inquiries and other services"),
        ]
        .into_iter()
        .map(|(id, name, description)| Topic {
            id,
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect();

        let branch = |id: u32, name: &str, address: &str, topics: &[u32], weekday: &str, saturday: &str| {
            Branch {
                id,
                name: name.to_string(),
                address: address.to_string(),
                topics: topics.iter().copied().collect(),
                business_hours: BusinessHours {
                    weekday: weekday.to_string(),
                    saturday: saturday.to_string(),
                },
            }
        };

        let branches = vec![
            branch(
                1,
                "Downtown Branch",
                "123 Main St, Kansas City, MO",
                &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
                "9:00 AM - 5:00 PM",
                "9:00 AM - 1:00 PM",
            ),
            branch(
                2,
                "Westside Branch",
                "456 Oak Ave, Kansas City, MO",
                &[1, 2, 3, 4, 11, 12],
                "9:00 AM - 6:00 PM",
                "10:00 AM - 2:00 PM",
            ),
            branch(
                3,
                "Plaza Branch",
                "789 Country Club Plaza, Kansas City, MO",
                &[1, 2, 3, 5, 6, 7, 9, 10, 11, 12],
                "8:00 AM - 5:00 PM",
                CLOSED,
            ),
            branch(
                4,
                "Northland Branch",
                "321 North St, Kansas City, MO",
                &[1, 2, 3, 4, 5, 7, 8, 11, 12],
                "9:00 AM - 5:00 PM",
                "9:00 AM - 12:00 PM",
            ),
        ];

        let booked = [
            (1, "2026-02-05", 10),
            (1, "2026-02-05", 14),
            (2, "2026-02-06", 11),
        ]
        .into_iter()
        .map(|(branch_id, date, hour)| BookedSlot::new(branch_id, date, SlotTime::on_the_hour(hour)))
        .collect();

        Self {
            topics,
            branches,
            booked,
        }
    }

    /// Parse a directory from JSON and check its cross references.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let directory: Directory = serde_json::from_str(json)
            .map_err(|e| BookingError::InvalidDirectory(e.to_string()))?;
        directory.validate()?;
        tracing::debug!(
            topics = directory.topics.len(),
            branches = directory.branches.len(),
            booked = directory.booked.len(),
            "loaded directory"
        );
        Ok(directory)
    }

    /// Read and parse a JSON directory file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            BookingError::InvalidDirectory(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Write the directory as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookingError::InvalidDirectory(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| {
            BookingError::InvalidDirectory(format!("cannot write {}: {e}", path.display()))
        })
    }

    /// Reject duplicate ids and references to unknown topics or branches.
    pub fn validate(&self) -> Result<()> {
        let mut topic_ids = BTreeSet::new();
        for topic in &self.topics {
            if !topic_ids.insert(topic.id) {
                return Err(BookingError::InvalidDirectory(format!(
                    "duplicate topic id {}",
                    topic.id
                )));
            }
        }

        let mut branch_ids = BTreeSet::new();
        for branch in &self.branches {
            if !branch_ids.insert(branch.id) {
                return Err(BookingError::InvalidDirectory(format!(
                    "duplicate branch id {}",
                    branch.id
                )));
            }
            if let Some(unknown) = branch.topics.iter().find(|t| !topic_ids.contains(t)) {
                return Err(BookingError::InvalidDirectory(format!(
                    "branch {} lists unknown topic {unknown}",
                    branch.id
                )));
            }
        }

        for slot in &self.booked {
            if !branch_ids.contains(&slot.branch_id) {
                return Err(BookingError::InvalidDirectory(format!(
                    "booked slot {} {} refers to unknown branch {}",
                    slot.date, slot.time, slot.branch_id
                )));
            }
            parse_iso_date(&slot.date).map_err(|e| {
                BookingError::InvalidDirectory(format!("booked slot for branch {}: {e}", slot.branch_id))
            })?;
        }
        Ok(())
    }

    pub fn topic(&self, id: u32) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn branch(&self, id: u32) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    /// Branches that offer `topic_id`, in directory order.
    pub fn branches_for_topic(&self, topic_id: u32) -> Vec<&Branch> {
        self.branches.iter().filter(|b| b.serves(topic_id)).collect()
    }

    pub fn is_booked(&self, branch_id: u32, date: &str, time: SlotTime) -> bool {
        self.booked.iter().any(|b| b.matches(branch_id, date, time))
    }

    /// Add a reservation. The branch must exist and the slot must be free.
    pub fn record_booking(&mut self, slot: BookedSlot) -> Result<()> {
        if self.branch(slot.branch_id).is_none() {
            return Err(BookingError::UnknownBranch(slot.branch_id));
        }
        parse_iso_date(&slot.date)?;
        if self.is_booked(slot.branch_id, &slot.date, slot.time) {
            return Err(BookingError::SlotTaken {
                branch_id: slot.branch_id,
                date: slot.date,
                time: slot.time.to_string(),
            });
        }
        tracing::debug!(
            branch_id = slot.branch_id,
            date = %slot.date,
            time = %slot.time,
            "recorded booking"
        );
        self.booked.push(slot);
        Ok(())
    }
}
