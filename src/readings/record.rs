//! Shaping of reading documents on their way into and out of the store.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use mongodb::bson::{self, Bson, Document};
use serde_json::Value;

use super::error::ReadingError;
use crate::db::models::{ID_FIELD, REQUIRED_FIELDS, SERVER_TIME_FIELD, SERVER_TIME_FORMAT};

/// Turn a client payload into a document ready to insert.
///
/// Only key presence is checked: `ts`, `value` and `sensor` may hold any JSON
/// value, `null` included. Client-supplied `_id` and `fecha_servidor` are
/// dropped so those stay store- and server-assigned.
///
/// A value BSON cannot represent (an integer above `i64::MAX`) is a write
/// failure, not a validation one: the keys are all there.
pub fn validate(payload: Option<Value>) -> Result<Document, ReadingError> {
    let mut fields = match payload {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return Err(ReadingError::missing_fields()),
    };

    if !REQUIRED_FIELDS.iter().all(|key| fields.contains_key(*key)) {
        return Err(ReadingError::missing_fields());
    }

    fields.remove(ID_FIELD);
    fields.remove(SERVER_TIME_FIELD);

    bson::to_document(&fields).map_err(|e| ReadingError::StorageWrite(e.into()))
}

/// Attach the server creation time to `record`.
pub fn stamp(record: &mut Document, now: DateTime<Utc>) {
    record.insert(
        SERVER_TIME_FIELD,
        Bson::DateTime(bson::DateTime::from_millis(now.timestamp_millis())),
    );
}

/// Transport form of a stored document, with `fecha_servidor` in server
/// local time.
pub fn to_transport(record: Document) -> Value {
    to_transport_in(record, &Local)
}

/// Transport form of a stored document: `_id` as a string and a stored
/// `fecha_servidor` datetime as `YYYY-MM-DD HH:MM:SS` in `tz`. A missing or
/// non-datetime `fecha_servidor` is passed through untouched.
pub fn to_transport_in<Tz>(mut record: Document, tz: &Tz) -> Value
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Some(id) = record.get(ID_FIELD) {
        let id = id_to_string(id);
        record.insert(ID_FIELD, id);
    }

    if let Some(Bson::DateTime(at)) = record.get(SERVER_TIME_FIELD) {
        let formatted = format_server_time(*at, tz);
        record.insert(SERVER_TIME_FIELD, formatted);
    }

    Bson::Document(record).into_relaxed_extjson()
}

/// Render a store identifier as a plain string (`ObjectId` → 24 hex chars).
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.clone().into_relaxed_extjson().to_string(),
    }
}

pub fn format_server_time<Tz>(at: bson::DateTime, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis()) {
        Some(utc) => utc.with_timezone(tz).format(SERVER_TIME_FORMAT).to_string(),
        None => at.to_string(),
    }
}
