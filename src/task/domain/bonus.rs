//! Bonus dating: which payroll month a completed task is credited to.
//!
//! Two rules live here and they deliberately disagree in direction.
//! [`stamp_bonus_approval`] runs once, when a task becomes fully approved,
//! and rolls forward past the mid-month cutoff. [`bonus_month`] runs at
//! report time and rolls backward from the stamped month when the work was
//! done in a different month. Keep them separate.

use super::TaskDomainError;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar (year, month) bucket, written `MM-YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BonusMonth {
    year: i32,
    month: u32,
}

impl BonusMonth {
    /// Creates a validated month.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidBonusMonth`] when `month` is outside
    /// `1..=12`.
    pub const fn new(year: i32, month: u32) -> Result<Self, TaskDomainError> {
        if month == 0 || month > 12 {
            return Err(TaskDomainError::InvalidBonusMonth { year, month });
        }
        Ok(Self { year, month })
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns the month number, 1 to 12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Returns the preceding month, wrapping January into December.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Returns the following month, wrapping December into January.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns whether `date` falls in this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }

    /// Parses a stored stamp, accepting the legacy `YYYY-MM-DD` form.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MalformedBonusStamp`] when the text matches
    /// neither format.
    pub fn parse_stamp(raw: &str) -> Result<Self, TaskDomainError> {
        let malformed = || TaskDomainError::MalformedBonusStamp(raw.to_owned());
        let text = raw.trim();
        let parts: Vec<&str> = text.split('-').collect();
        let (year_text, month_text) = match parts.as_slice() {
            [month, year] if month.len() == 2 && year.len() == 4 => (*year, *month),
            [year, month, day] if year.len() == 4 && month.len() == 2 && day.len() == 2 => {
                if !day.chars().all(|ch| ch.is_ascii_digit()) {
                    return Err(malformed());
                }
                (*year, *month)
            }
            _ => return Err(malformed()),
        };
        if !year_text.chars().chain(month_text.chars()).all(|ch| ch.is_ascii_digit()) {
            return Err(malformed());
        }
        let year = year_text.parse::<i32>().map_err(|_| malformed())?;
        let month = month_text.parse::<u32>().map_err(|_| malformed())?;
        Self::new(year, month).map_err(|_| malformed())
    }
}

impl fmt::Display for BonusMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

impl From<BonusMonth> for String {
    fn from(value: BonusMonth) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for BonusMonth {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_stamp(&value)
    }
}

/// A stored bonus approval stamp, possibly left malformed by legacy data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BonusStamp {
    /// A recognised stamp, normalized to `MM-YYYY`.
    Month(BonusMonth),
    /// Text that matches no known stamp format, kept verbatim.
    Unrecognised(String),
}

impl BonusStamp {
    /// Interprets stored stamp text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        BonusMonth::parse_stamp(raw)
            .map_or_else(|_| Self::Unrecognised(raw.to_owned()), Self::Month)
    }

    /// Returns the stamped month.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MalformedBonusStamp`] for unrecognised text.
    pub fn month(&self) -> Result<BonusMonth, TaskDomainError> {
        match self {
            Self::Month(month) => Ok(*month),
            Self::Unrecognised(raw) => Err(TaskDomainError::MalformedBonusStamp(raw.clone())),
        }
    }
}

impl fmt::Display for BonusStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month(month) => month.fmt(f),
            Self::Unrecognised(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for BonusStamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BonusStamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Returns the payroll month a completed task's bonus belongs to.
///
/// Paperwork cleared within the work month credits that month; otherwise
/// the month before the stamped month is credited.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tasksettle::task::domain::{BonusMonth, bonus_month};
///
/// let work_date = NaiveDate::from_ymd_opt(2024, 3, 12).expect("valid date");
/// let stamp = BonusMonth::new(2024, 5).expect("valid month");
/// assert_eq!(bonus_month(work_date, stamp), BonusMonth::new(2024, 4).expect("valid month"));
/// ```
#[must_use]
pub fn bonus_month(work_date: NaiveDate, stamp: BonusMonth) -> BonusMonth {
    if stamp.contains(work_date) {
        stamp
    } else {
        stamp.previous()
    }
}

/// Returns the stamp written when a task first becomes fully approved.
///
/// From `cutoff_day` onwards, approving work done in another month stamps
/// the next calendar month; otherwise the current month is stamped.
#[must_use]
pub fn stamp_bonus_approval(work_date: NaiveDate, today: NaiveDate, cutoff_day: u32) -> BonusMonth {
    let current = BonusMonth::of(today);
    if today.day() >= cutoff_day && !current.contains(work_date) {
        current.next()
    } else {
        current
    }
}

/// Moves a settled task's work date into a recognisable reporting bucket.
///
/// Dates in the current month are kept; anything else becomes the same day
/// one month before `today`, clamped to the end of a shorter month.
#[must_use]
pub fn normalize_work_date(work_date: NaiveDate, today: NaiveDate) -> NaiveDate {
    if BonusMonth::of(today).contains(work_date) {
        work_date
    } else {
        today.checked_sub_months(Months::new(1)).unwrap_or(today)
    }
}
