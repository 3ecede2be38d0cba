//! Hospital record types.
//!
//! A record moves through three shapes:
//!
//! - [`HospitalDraft`]: what the Validator produces from an untyped payload.
//! - [`HospitalDocument`]: what the persistence schema accepts, with free-text fields
//!   trimmed into [`NonEmptyText`].
//! - [`HospitalRecord`]: a stored document with its id and timestamps.

use crate::constants::{HOSPITAL_SIZES, WEEKDAYS};
use api_shared::wire;
use chrono::{DateTime, SecondsFormat, Utc};
use hospital_types::NonEmptyText;
use hospital_uuid::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size category of a hospital.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HospitalSize {
    Small,
    Medium,
    Large,
}

impl HospitalSize {
    pub fn as_str(self) -> &'static str {
        match self {
            HospitalSize::Small => HOSPITAL_SIZES[0],
            HospitalSize::Medium => HOSPITAL_SIZES[1],
            HospitalSize::Large => HOSPITAL_SIZES[2],
        }
    }

    /// Parses the exact wire spelling (`Small`, `Medium`, `Large`); matching is
    /// case-sensitive.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Small" => Some(HospitalSize::Small),
            "Medium" => Some(HospitalSize::Medium),
            "Large" => Some(HospitalSize::Large),
            _ => None,
        }
    }
}

impl fmt::Display for HospitalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week a hospital operates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        WEEKDAYS[self as usize]
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.as_str() == s)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening hours. `from` and `to` are strict 24-hour `HH:MM` strings.
///
/// `days` keeps input order and any repeated entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub from: String,
    pub to: String,
    pub days: Vec<Weekday>,
}

/// A service entry as accepted by the Validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDraft {
    pub name: String,
    pub description: String,
}

/// A service entry as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub name: NonEmptyText,
    pub description: NonEmptyText,
}

/// Validator output: a structurally valid hospital not yet seen by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalDraft {
    pub name: String,
    pub size: HospitalSize,
    pub location: String,
    pub total_beds: u32,
    pub operating_hours: OperatingHours,
    pub services: Vec<ServiceDraft>,
}

/// Persistence-schema output: the normalised document a store writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HospitalDocument {
    pub name: NonEmptyText,
    pub size: HospitalSize,
    pub location: NonEmptyText,
    pub total_beds: u32,
    pub operating_hours: OperatingHours,
    pub services: Vec<ServiceOffering>,
}

/// A stored hospital.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalRecord {
    pub id: RecordId,
    pub name: NonEmptyText,
    pub size: HospitalSize,
    pub location: NonEmptyText,
    pub total_beds: u32,
    pub operating_hours: OperatingHours,
    pub services: Vec<ServiceOffering>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HospitalRecord {
    /// Stamps a schema-approved document with an id and creation time.
    ///
    /// `updated_at` starts equal to `created_at`; nothing in this system modifies a
    /// record after creation.
    pub fn from_document(id: RecordId, document: HospitalDocument, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: document.name,
            size: document.size,
            location: document.location,
            total_beds: document.total_beds,
            operating_hours: document.operating_hours,
            services: document.services,
            created_at: now,
            updated_at: now,
        }
    }

    /// Renders the record as its HTTP wire model.
    pub fn to_wire(&self) -> wire::Hospital {
        wire::Hospital {
            id: self.id.to_string(),
            name: self.name.to_string(),
            size: self.size.to_string(),
            location: self.location.to_string(),
            total_beds: self.total_beds,
            operating_hours: wire::OperatingHours {
                from: self.operating_hours.from.clone(),
                to: self.operating_hours.to.clone(),
                days: self
                    .operating_hours
                    .days
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            },
            services: self
                .services
                .iter()
                .map(|s| wire::Service {
                    name: s.name.to_string(),
                    description: s.description.to_string(),
                })
                .collect(),
            created_at: self
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: self
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn weekday_wire_names_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_wire(day.as_str()), Some(day));
        }
        assert_eq!(Weekday::from_wire("monday"), None);
        assert_eq!(Weekday::from_wire("Funday"), None);
    }

    #[test]
    fn size_parsing_is_case_sensitive() {
        assert_eq!(HospitalSize::from_wire("Small"), Some(HospitalSize::Small));
        assert_eq!(HospitalSize::from_wire("small"), None);
        assert_eq!(HospitalSize::from_wire("Huge"), None);
    }

    #[test]
    fn to_wire_renders_millisecond_utc_timestamps() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let record = HospitalRecord::from_document(
            RecordId::parse("550e8400e29b41d4a716446655440000").unwrap(),
            HospitalDocument {
                name: NonEmptyText::new("Royal Infirmary").unwrap(),
                size: HospitalSize::Large,
                location: NonEmptyText::new("Edinburgh").unwrap(),
                total_beds: 900,
                operating_hours: OperatingHours {
                    from: "00:00".into(),
                    to: "23:59".into(),
                    days: vec![Weekday::Saturday, Weekday::Saturday],
                },
                services: vec![ServiceOffering {
                    name: NonEmptyText::new("Radiology").unwrap(),
                    description: NonEmptyText::new("Imaging").unwrap(),
                }],
            },
            now,
        );

        let wire = record.to_wire();
        assert_eq!(wire.id, "550e8400e29b41d4a716446655440000");
        assert_eq!(wire.size, "Large");
        assert_eq!(wire.created_at, "2026-03-01T09:30:00.000Z");
        assert_eq!(wire.updated_at, wire.created_at);
        assert_eq!(wire.operating_hours.days, ["Saturday", "Saturday"]);
    }
}
