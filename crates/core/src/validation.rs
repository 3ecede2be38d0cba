//! Application-layer validation of hospital payloads.
//!
//! [`validate_hospital_payload`] turns an untyped JSON payload into a [`HospitalDraft`]
//! or a [`FieldErrors`] listing every violation, keyed by top-level field name
//! (`name`, `size`, `location`, `totalBeds`, `operatingHours`, `services`). Nested
//! problems are reported under their top-level field. Unknown keys are ignored.
//!
//! This check exists to give the caller fast, complete feedback. The store runs its
//! own independent schema check before anything is written (see [`crate::schema`]).

use crate::constants::WEEKDAYS;
use crate::field_errors::FieldErrors;
use crate::model::{HospitalDraft, HospitalSize, OperatingHours, ServiceDraft, Weekday};
use serde_json::{Map, Value};

const REQUIRED: &str = "Required";
const NAME_EMPTY: &str = "Hospital name cannot be empty.";
const SIZE_INVALID: &str = "Size must be Small, Medium, or Large.";
const LOCATION_EMPTY: &str = "Location cannot be empty.";
const BEDS_NOT_POSITIVE: &str = "Total beds must be a positive integer and greater than 0.";
const BEDS_TOO_LARGE: &str = "Total beds is too large.";
const BEDS_NOT_INTEGER: &str = "Expected integer, received float";
const FROM_INVALID: &str = "Invalid time format for 'from'. Use HH:MM (e.g., 09:00)";
const TO_INVALID: &str = "Invalid time format for 'to'. Use HH:MM (e.g., 17:00)";
const DAYS_EMPTY: &str = "At least one operating day is required.";
const SERVICES_EMPTY: &str = "At least one service is required.";
const SERVICE_NAME_EMPTY: &str = "Service name cannot be empty.";
const SERVICE_DESCRIPTION_EMPTY: &str = "Service description cannot be empty.";

/// Key used when the payload itself is not a JSON object.
pub const BODY_FIELD: &str = "body";

/// Validates an untyped payload against the hospital shape.
///
/// Every rule is evaluated; errors are collected rather than short-circuited.
///
/// # Errors
///
/// Returns the collected [`FieldErrors`] if any rule fails.
pub fn validate_hospital_payload(payload: &Value) -> Result<HospitalDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let Some(obj) = payload.as_object() else {
        errors.push(
            BODY_FIELD,
            format!("Expected object, received {}", json_kind(payload)),
        );
        return Err(errors);
    };

    let name = non_empty_string(obj.get("name"), "name", NAME_EMPTY, &mut errors);
    let size = size_field(obj.get("size"), &mut errors);
    let location = non_empty_string(obj.get("location"), "location", LOCATION_EMPTY, &mut errors);
    let total_beds = total_beds_field(obj.get("totalBeds"), &mut errors);
    let operating_hours = operating_hours_field(obj.get("operatingHours"), &mut errors);
    let services = services_field(obj.get("services"), &mut errors);

    match (name, size, location, total_beds, operating_hours, services) {
        (
            Some(name),
            Some(size),
            Some(location),
            Some(total_beds),
            Some(operating_hours),
            Some(services),
        ) if errors.is_empty() => Ok(HospitalDraft {
            name: name.to_owned(),
            size,
            location: location.to_owned(),
            total_beds,
            operating_hours,
            services,
        }),
        _ => Err(errors),
    }
}

/// Returns true for a strict 24-hour `HH:MM` string: hour `00`-`23`, minute `00`-`59`,
/// exactly two digits each.
pub fn is_strict_hh_mm(input: &str) -> bool {
    let b = input.as_bytes();
    if b.len() != 5 || b[2] != b':' {
        return false;
    }
    let hour_ok = match b[0] {
        b'0' | b'1' => b[1].is_ascii_digit(),
        b'2' => matches!(b[1], b'0'..=b'3'),
        _ => false,
    };
    let minute_ok = matches!(b[3], b'0'..=b'5') && b[4].is_ascii_digit();
    hour_ok && minute_ok
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads a string that must be at least one character long. Problems are reported
/// under `report_as`.
fn non_empty_string<'a>(
    value: Option<&'a Value>,
    report_as: &str,
    empty_message: &str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    match value {
        None => {
            errors.push(report_as, REQUIRED);
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(report_as, empty_message);
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            errors.push(
                report_as,
                format!("Expected string, received {}", json_kind(other)),
            );
            None
        }
    }
}

fn size_field(value: Option<&Value>, errors: &mut FieldErrors) -> Option<HospitalSize> {
    let size = value.and_then(Value::as_str).and_then(HospitalSize::from_wire);
    if size.is_none() {
        errors.push("size", SIZE_INVALID);
    }
    size
}

fn total_beds_field(value: Option<&Value>, errors: &mut FieldErrors) -> Option<u32> {
    let n = match value {
        None => {
            errors.push("totalBeds", REQUIRED);
            return None;
        }
        Some(Value::Number(n)) => n,
        Some(other) => {
            errors.push(
                "totalBeds",
                format!("Expected number, received {}", json_kind(other)),
            );
            return None;
        }
    };

    if let Some(i) = n.as_i64() {
        return positive_u32(i as f64, errors);
    }
    if n.as_u64().is_some() {
        errors.push("totalBeds", BEDS_TOO_LARGE);
        return None;
    }

    let f = n.as_f64().unwrap_or(f64::NAN);
    if !f.is_finite() || f.fract() != 0.0 {
        errors.push("totalBeds", BEDS_NOT_INTEGER);
        if f <= 0.0 {
            errors.push("totalBeds", BEDS_NOT_POSITIVE);
        }
        return None;
    }
    positive_u32(f, errors)
}

fn positive_u32(value: f64, errors: &mut FieldErrors) -> Option<u32> {
    if value <= 0.0 {
        errors.push("totalBeds", BEDS_NOT_POSITIVE);
        None
    } else if value > f64::from(u32::MAX) {
        errors.push("totalBeds", BEDS_TOO_LARGE);
        None
    } else {
        Some(value as u32)
    }
}

fn operating_hours_field(
    value: Option<&Value>,
    errors: &mut FieldErrors,
) -> Option<OperatingHours> {
    const FIELD: &str = "operatingHours";

    let hours = match value {
        None => {
            errors.push(FIELD, REQUIRED);
            return None;
        }
        Some(Value::Object(hours)) => hours,
        Some(other) => {
            errors.push(
                FIELD,
                format!("Expected object, received {}", json_kind(other)),
            );
            return None;
        }
    };

    let from = time_field(hours, "from", FROM_INVALID, errors);
    let to = time_field(hours, "to", TO_INVALID, errors);
    let days = days_field(hours.get("days"), errors);

    Some(OperatingHours {
        from: from?.to_owned(),
        to: to?.to_owned(),
        days: days?,
    })
}

fn time_field<'a>(
    hours: &'a Map<String, Value>,
    key: &str,
    invalid_message: &str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    let value = non_empty_string(hours.get(key), "operatingHours", invalid_message, errors)?;
    if is_strict_hh_mm(value) {
        Some(value)
    } else {
        errors.push("operatingHours", invalid_message);
        None
    }
}

fn days_field(value: Option<&Value>, errors: &mut FieldErrors) -> Option<Vec<Weekday>> {
    const FIELD: &str = "operatingHours";

    let items = match value {
        None => {
            errors.push(FIELD, REQUIRED);
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            errors.push(
                FIELD,
                format!("Expected array, received {}", json_kind(other)),
            );
            return None;
        }
    };

    if items.is_empty() {
        errors.push(FIELD, DAYS_EMPTY);
        return None;
    }

    let mut days = Vec::with_capacity(items.len());
    let mut ok = true;
    for item in items {
        match item {
            Value::String(s) => match Weekday::from_wire(s) {
                Some(day) => days.push(day),
                None => {
                    ok = false;
                    errors.push(
                        FIELD,
                        format!(
                            "Invalid enum value. Expected {}, received '{}'",
                            weekday_list(),
                            s
                        ),
                    );
                }
            },
            other => {
                ok = false;
                errors.push(
                    FIELD,
                    format!("Expected {}, received {}", weekday_list(), json_kind(other)),
                );
            }
        }
    }

    ok.then_some(days)
}

fn weekday_list() -> String {
    WEEKDAYS
        .iter()
        .map(|d| format!("'{d}'"))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn services_field(value: Option<&Value>, errors: &mut FieldErrors) -> Option<Vec<ServiceDraft>> {
    const FIELD: &str = "services";

    let items = match value {
        None => {
            errors.push(FIELD, REQUIRED);
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            errors.push(
                FIELD,
                format!("Expected array, received {}", json_kind(other)),
            );
            return None;
        }
    };

    if items.is_empty() {
        errors.push(FIELD, SERVICES_EMPTY);
        return None;
    }

    let mut services = Vec::with_capacity(items.len());
    let mut ok = true;
    for item in items {
        let Value::Object(entry) = item else {
            ok = false;
            errors.push(
                FIELD,
                format!("Expected object, received {}", json_kind(item)),
            );
            continue;
        };

        let name = non_empty_string(entry.get("name"), FIELD, SERVICE_NAME_EMPTY, errors);
        let description = non_empty_string(
            entry.get("description"),
            FIELD,
            SERVICE_DESCRIPTION_EMPTY,
            errors,
        );
        match (name, description) {
            (Some(name), Some(description)) => services.push(ServiceDraft {
                name: name.to_owned(),
                description: description.to_owned(),
            }),
            _ => ok = false,
        }
    }

    ok.then_some(services)
}
