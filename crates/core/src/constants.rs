//! Constants used throughout the hospital core crate.
//!
//! Path and filename constants for the file-backed store, plus the fixed value sets
//! shared by both validation layers.

/// Default directory for hospital data when the file store is selected without an
/// explicit directory.
pub const DEFAULT_HOSPITAL_DATA_DIR: &str = "hospital_data";

/// Directory name under the data directory holding sharded hospital documents.
pub const HOSPITALS_DIR_NAME: &str = "hospitals";

/// Directory name under the data directory holding the unique-name index.
pub const NAME_INDEX_DIR_NAME: &str = "names";

/// Filename of a stored hospital document.
pub const HOSPITAL_JSON_FILENAME: &str = "hospital.json";

/// Accepted values of `size`, in wire spelling.
pub const HOSPITAL_SIZES: [&str; 3] = ["Small", "Medium", "Large"];

/// Accepted values of `operatingHours.days`, in wire spelling.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
