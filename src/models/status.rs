//! Domain enums for roles, availability status and schedule types.
//!
//! The database stores these as plain strings (matching the persisted
//! schema); parsing happens once at the service boundary so everything
//! downstream works with typed values.

use std::fmt;

/// Account role. Students browse the directory; instructors manage
/// their own availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Instructor,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Instructor => "instructor",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Self::Student),
            "instructor" => Some(Self::Instructor),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An instructor's availability. Any status may transition to any other
/// status, including to itself; transitions are recorded in the activity
/// log rather than restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    In,
    Out,
    OnLeave,
    OnTravel,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
            Self::OnLeave => "On Leave",
            Self::OnTravel => "On Travel",
        }
    }

    /// Parses the exact persisted representation. Anything else is
    /// rejected by the caller as an invalid status.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "In" => Some(Self::In),
            "Out" => Some(Self::Out),
            "On Leave" => Some(Self::OnLeave),
            "On Travel" => Some(Self::OnTravel),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Planned absence kind. Creating a schedule of either kind overwrites
/// the instructor's status with the derived value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleType {
    Leave,
    Travel,
}

impl ScheduleType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leave => "leave",
            Self::Travel => "travel",
        }
    }

    /// Capitalized form used in activity-log details ("Leave", "Travel").
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Leave => "Leave",
            Self::Travel => "Travel",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "leave" => Some(Self::Leave),
            "travel" => Some(Self::Travel),
            _ => None,
        }
    }

    /// Status written when a schedule of this type is created.
    #[must_use]
    pub const fn derived_status(self) -> Status {
        match self {
            Self::Leave => Status::OnLeave,
            Self::Travel => Status::OnTravel,
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
