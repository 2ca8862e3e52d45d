//! Support Department Directory.
//!
//! A closed set of support departments, each with a static contact card and
//! an hours-of-operation string. The directory is built once at startup;
//! rows are immutable afterwards.
//!
//! The department set is an enumeration on purpose: triage output outside
//! this set is a hard error ([`UnknownDepartmentLabel`]), never a default.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::schedule::HoursSpec;

/// Identifier for a support department. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepartmentId {
    /// Clinical PACS workstation support on hospital reading rooms. 24/7.
    HospitalReadingRooms,
    /// Zoom-based helpdesk for in-hospital desktop, login and certificate issues.
    VirtualHelpDesk,
    /// Remote/home issues: VPN, Outlook, EPIC, email sync, workstation setup.
    WcinypIt,
    /// QA/discrepancy tickets raised through Radiqal inside PACS.
    Radiqal,
}

impl DepartmentId {
    /// All departments, in directory iteration order.
    ///
    /// This order is the fallback-search order, so it is part of the
    /// availability contract, not a presentation detail.
    pub const ALL: [DepartmentId; 4] = [
        DepartmentId::HospitalReadingRooms,
        DepartmentId::VirtualHelpDesk,
        DepartmentId::WcinypIt,
        DepartmentId::Radiqal,
    ];

    /// The human-facing label used in prompts and classifier output.
    pub fn label(&self) -> &'static str {
        match self {
            DepartmentId::HospitalReadingRooms => "Hospital Reading Rooms",
            DepartmentId::VirtualHelpDesk => "Virtual HelpDesk",
            DepartmentId::WcinypIt => "WCINYP IT",
            DepartmentId::Radiqal => "Radiqal",
        }
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A label that is not a member of the department enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown department label: {label:?}")]
pub struct UnknownDepartmentLabel {
    /// The offending label, verbatim.
    pub label: String,
}

impl FromStr for DepartmentId {
    type Err = UnknownDepartmentLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DepartmentId::ALL
            .into_iter()
            .find(|d| d.label() == trimmed)
            .ok_or_else(|| UnknownDepartmentLabel {
                label: trimmed.to_string(),
            })
    }
}

/// A directory row: contact card plus hours of operation.
#[derive(Debug, Clone)]
pub struct Department {
    /// Which department this row describes.
    pub id: DepartmentId,
    /// Phone contact, or "N/A".
    pub phone: String,
    /// Email contact; may span multiple lines for tiered inboxes.
    pub email: String,
    /// Other contact channels (Zoom links, tip sheets).
    pub other: String,
    /// One-line description of what the department handles.
    pub note: String,
    /// Raw hours-of-operation string as published.
    pub hours: String,
    /// Parsed form of `hours`, computed at directory construction.
    pub hours_spec: HoursSpec,
}

impl Department {
    fn new(
        id: DepartmentId,
        phone: impl Into<String>,
        email: impl Into<String>,
        other: impl Into<String>,
        note: impl Into<String>,
        hours: impl Into<String>,
    ) -> Self {
        let hours = hours.into();
        let hours_spec = HoursSpec::parse(&hours);
        if matches!(hours_spec, HoursSpec::Unrestricted) {
            tracing::warn!(
                department = %id,
                hours = %hours,
                "hours string does not parse; department treated as unrestricted"
            );
        }
        Self {
            id,
            phone: phone.into(),
            email: email.into(),
            other: other.into(),
            note: note.into(),
            hours,
            hours_spec,
        }
    }
}

/// The static support directory.
///
/// Holds one row per [`DepartmentId`] and iterates in enumeration order.
#[derive(Debug, Clone)]
pub struct Directory {
    rows: Vec<Department>,
}

impl Directory {
    /// Builds the published hospital support directory.
    pub fn hospital_defaults() -> Self {
        Self {
            rows: vec![
                Department::new(
                    DepartmentId::HospitalReadingRooms,
                    "4-HELP (4-4357) or (212) 932-4357",
                    "servicedesk@nyp.org (Subject: RADSUPPORTEASTCRITICAL)",
                    "N/A",
                    "Clinical PACS workstation support",
                    "24/7",
                ),
                Department::new(
                    DepartmentId::VirtualHelpDesk,
                    "(212) 746-4878",
                    "N/A",
                    "Zoom: https://nyph.zoom.us/j/9956909465",
                    "Support via Zoom sessions",
                    "Mon\u{2013}Fri, 9 AM\u{2013}5 PM",
                ),
                Department::new(
                    DepartmentId::WcinypIt,
                    "Phone Support (24/7): 4-HELP (212-746-4357)",
                    "\u{2022} Normal Requests (24/7): nypradtickets@nyp.org\n\
                     \u{2022} On-Call (5 PM\u{2013}8 AM): nypradoncall@nyp.org \n\
                     (Use for high-priority, patient-care-impacting issues)",
                    "Zoom Support (Mon\u{2013}Fri, 9 AM\u{2013}5 PM): https://nyph.zoom.us/j/9956909465",
                    "For support with Vue PACS, Medicalis, Fluency, and Diagnostic Workstations.",
                    "See Above",
                ),
                Department::new(
                    DepartmentId::Radiqal,
                    "N/A",
                    "N/A - use Radiqal within Medicalis/VuePACS",
                    "Use Radiqal Tip Sheet guidance",
                    "QA system support",
                    "Platform dependent",
                ),
            ],
        }
    }

    /// Looks up the row for a department. Always succeeds for members of
    /// the enumeration.
    pub fn get(&self, id: DepartmentId) -> &Department {
        self.rows
            .iter()
            .find(|d| d.id == id)
            .unwrap_or_else(|| unreachable!("directory row missing for {id}"))
    }

    /// Iterates rows in directory (enumeration) order.
    pub fn iter(&self) -> impl Iterator<Item = &Department> {
        self.rows.iter()
    }
}

/// Process-wide default directory.
pub static DIRECTORY: Lazy<Directory> = Lazy::new(Directory::hospital_defaults);
