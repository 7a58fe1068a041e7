//! Field names of a stored sensor reading.
//!
//! A reading is a loosely-typed document: the three required keys are only
//! checked for presence, and any extra keys the client sends are kept as-is.

/// Store-assigned identifier (`ObjectId` in MongoDB).
pub const ID_FIELD: &str = "_id";

/// Server-assigned creation time, stored as a BSON datetime.
pub const SERVER_TIME_FIELD: &str = "fecha_servidor";

/// Keys every inserted reading must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["ts", "value", "sensor"];

/// Transport rendering of `SERVER_TIME_FIELD`: local time, second precision.
pub const SERVER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
