//! Persistence schema for stored hospital documents.
//!
//! Every store runs [`check_document`] on the JSON document it is about to write. The
//! check is deliberately independent of [`crate::validation`]: it re-derives every
//! constraint from the raw document, trims free-text fields, and reports violations
//! keyed by dotted path (`operatingHours.from`, `services.0.name`). It is the layer
//! that actually guarantees stored data is well formed.

use crate::field_errors::FieldErrors;
use crate::model::{HospitalDocument, HospitalSize, OperatingHours, ServiceOffering, Weekday};
use hospital_types::NonEmptyText;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static TIME_OF_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("time-of-day pattern is valid")
});

/// Validates and normalises a document prior to persistence.
///
/// # Errors
///
/// Returns [`FieldErrors`] keyed by dotted path when any constraint fails.
pub fn check_document(doc: &Value) -> Result<HospitalDocument, FieldErrors> {
    let mut errors = FieldErrors::new();
    let empty = Map::new();
    let obj = match doc.as_object() {
        Some(obj) => obj,
        None => {
            errors.push("document", "Document must be an object.");
            &empty
        }
    };

    let name = trimmed_text(obj, "name", "name", "Hospital name is required.", &mut errors);
    let size = size_path(obj.get("size"), &mut errors);
    let location = trimmed_text(
        obj,
        "location",
        "location",
        "Hospital location is required.",
        &mut errors,
    );
    let total_beds = total_beds_path(obj.get("totalBeds"), &mut errors);
    let operating_hours = operating_hours_path(obj.get("operatingHours"), &mut errors);
    let services = services_path(obj.get("services"), &mut errors);

    match (name, size, location, total_beds, operating_hours, services) {
        (
            Some(name),
            Some(size),
            Some(location),
            Some(total_beds),
            Some(operating_hours),
            Some(services),
        ) if errors.is_empty() => Ok(HospitalDocument {
            name,
            size,
            location,
            total_beds,
            operating_hours,
            services,
        }),
        _ => Err(errors),
    }
}

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn cast_failed(path: &str, expected: &str, value: &Value) -> String {
    format!("Cast to {expected} failed for value \"{value}\" at path \"{path}\"")
}

/// Reads a required string, trims it, and requires a non-empty result.
fn trimmed_text(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    required_message: &str,
    errors: &mut FieldErrors,
) -> Option<NonEmptyText> {
    let value = obj.get(key);
    if is_absent(value) {
        errors.push(path, required_message);
        return None;
    }
    match value {
        Some(Value::String(s)) => match NonEmptyText::new(s) {
            Ok(text) => Some(text),
            Err(_) => {
                errors.push(path, required_message);
                None
            }
        },
        Some(other) => {
            errors.push(path, cast_failed(path, "string", other));
            None
        }
        None => None,
    }
}

fn size_path(value: Option<&Value>, errors: &mut FieldErrors) -> Option<HospitalSize> {
    if is_absent(value) {
        errors.push("size", "Hospital size is required.");
        return None;
    }
    let raw = value.map(display_value).unwrap_or_default();
    let size = value.and_then(Value::as_str).and_then(HospitalSize::from_wire);
    if size.is_none() {
        errors.push("size", format!("{raw} is not a supported hospital size."));
    }
    size
}

fn total_beds_path(value: Option<&Value>, errors: &mut FieldErrors) -> Option<u32> {
    const PATH: &str = "totalBeds";

    let n = match value {
        v if is_absent(v) => {
            errors.push(PATH, "Total beds count is required.");
            return None;
        }
        Some(Value::Number(n)) => n,
        Some(other) => {
            errors.push(PATH, cast_failed(PATH, "Number", other));
            return None;
        }
        None => return None,
    };

    match n.as_u64() {
        Some(0) => {
            errors.push(PATH, "Total beds must be at least 1.");
            None
        }
        Some(beds) => match u32::try_from(beds) {
            Ok(beds) => Some(beds),
            Err(_) => {
                errors.push(PATH, "Total beds exceeds the supported maximum.");
                None
            }
        },
        None if n.as_i64().is_some() => {
            errors.push(PATH, "Total beds must be at least 1.");
            None
        }
        None => {
            errors.push(PATH, "Total beds must be a whole number.");
            None
        }
    }
}

fn operating_hours_path(
    value: Option<&Value>,
    errors: &mut FieldErrors,
) -> Option<OperatingHours> {
    const PATH: &str = "operatingHours";

    let hours = match value {
        v if is_absent(v) => {
            errors.push(PATH, "Operating hours are required.");
            return None;
        }
        Some(Value::Object(hours)) => hours,
        Some(other) => {
            errors.push(PATH, cast_failed(PATH, "Embedded", other));
            return None;
        }
        None => return None,
    };

    let from = time_path(hours, "from", errors);
    let to = time_path(hours, "to", errors);
    let days = days_path(hours.get("days"), errors);

    Some(OperatingHours {
        from: from?,
        to: to?,
        days: days?,
    })
}

fn time_path(hours: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Option<String> {
    let path = format!("operatingHours.{key}");
    let value = hours.get(key);
    if is_absent(value) {
        errors.push(
            path,
            format!("Operating hours '{key}' time is required."),
        );
        return None;
    }
    match value {
        Some(Value::String(s)) if TIME_OF_DAY.is_match(s) => Some(s.clone()),
        Some(Value::String(_)) => {
            errors.push(
                path,
                format!("Invalid '{key}' time format. Use HH:MM (e.g., {}).", example_time(key)),
            );
            None
        }
        Some(other) => {
            let message = cast_failed(&path, "string", other);
            errors.push(path, message);
            None
        }
        None => None,
    }
}

fn example_time(key: &str) -> &'static str {
    if key == "to" {
        "17:00"
    } else {
        "09:00"
    }
}

fn days_path(value: Option<&Value>, errors: &mut FieldErrors) -> Option<Vec<Weekday>> {
    const PATH: &str = "operatingHours.days";

    let items = match value {
        v if is_absent(v) => {
            errors.push(PATH, "Operating days are required.");
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            errors.push(PATH, cast_failed(PATH, "[string]", other));
            return None;
        }
        None => return None,
    };

    if items.is_empty() {
        errors.push(PATH, "At least one operating day must be specified.");
        return None;
    }

    let mut days = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item.as_str().and_then(Weekday::from_wire) {
            Some(day) => days.push(day),
            None => errors.push(
                format!("{PATH}.{i}"),
                format!("{} is not a supported day.", display_value(item)),
            ),
        }
    }

    (days.len() == items.len()).then_some(days)
}

fn services_path(value: Option<&Value>, errors: &mut FieldErrors) -> Option<Vec<ServiceOffering>> {
    const PATH: &str = "services";

    let items = match value {
        v if is_absent(v) => {
            errors.push(PATH, "At least one service must be provided.");
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            errors.push(PATH, cast_failed(PATH, "Array", other));
            return None;
        }
        None => return None,
    };

    if items.is_empty() {
        errors.push(
            PATH,
            "Services array cannot be empty. At least one service is required.",
        );
        return None;
    }

    let mut services = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("{PATH}.{i}");
        let Some(entry) = item.as_object() else {
            let message = cast_failed(&path, "Embedded", item);
            errors.push(path, message);
            continue;
        };

        let name = trimmed_text(
            entry,
            "name",
            &format!("{path}.name"),
            "Service name is required.",
            errors,
        );
        let description = trimmed_text(
            entry,
            "description",
            &format!("{path}.description"),
            "Service description is required.",
            errors,
        );
        if let (Some(name), Some(description)) = (name, description) {
            services.push(ServiceOffering { name, description });
        }
    }

    (services.len() == items.len()).then_some(services)
}

/// Renders a value for a message: strings without quotes, anything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
