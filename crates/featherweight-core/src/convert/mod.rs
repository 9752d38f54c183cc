//! Converters between local rows and their remote document shapes.
//!
//! Remote documents use camelCase field names, RFC 3339 timestamps and enum
//! symbols as plain strings. Converting from remote never fails: an enum
//! symbol this build does not know falls back to the enum's default and is
//! logged.

mod analysis;
mod exercise;
mod programme;
mod template;
mod tracking;
mod workout;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::util::millis_to_datetime;

pub use analysis::{RemoteParseRequest, RemoteTrainingAnalysis};
pub use exercise::RemoteExercise;
pub use programme::{
    RemoteProgramme, RemoteProgrammeProgress, RemoteProgrammeWeek, RemoteProgrammeWorkout,
};
pub use template::{RemoteTemplateExercise, RemoteTemplateSet, RemoteWorkoutTemplate};
pub use tracking::{
    RemoteExerciseMax, RemoteExercisePerformance, RemoteExerciseSwapHistory, RemoteExerciseUsage,
    RemoteGlobalExerciseProgress, RemoteOneRmHistory, RemotePersonalRecord,
};
pub use workout::{RemoteExerciseLog, RemoteSetLog, RemoteWorkout};

/// Bidirectional mapping between a local row and its remote shape
pub trait RemoteConvert: Sized {
    type Remote: Serialize + DeserializeOwned + Send;

    fn to_remote(&self) -> Self::Remote;

    fn from_remote(remote: Self::Remote) -> Self;
}

/// Symbolic name of a serde-renamed unit enum variant.
pub fn enum_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Parse an enum by symbolic name, falling back to `T::default()`.
pub fn enum_from_name<T: DeserializeOwned + Default>(name: &str, field: &'static str) -> T {
    serde_json::from_value(serde_json::Value::String(name.to_string())).unwrap_or_else(|_| {
        tracing::warn!(
            field,
            value = name,
            "Unrecognized enum name in remote document; using default"
        );
        T::default()
    })
}

pub fn to_timestamp(millis: i64) -> DateTime<Utc> {
    millis_to_datetime(millis)
}

pub fn to_optional_timestamp(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.map(millis_to_datetime)
}

pub fn from_timestamp(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_millis()
}

pub fn from_optional_timestamp(timestamp: Option<DateTime<Utc>>) -> Option<i64> {
    timestamp.map(|timestamp| timestamp.timestamp_millis())
}
