use serde::Serializer;
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339};

/// Serialize `OffsetDateTime` as RFC 3339 (e.g. `2025-01-02T03:04:05+02:00`).
pub mod offset_datetime {
    use super::*;

    pub fn serialize<S>(dt: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(&Rfc3339).map_err(serde::ser::Error::custom)?)
    }
}

/// Serialize a calendar `Date` as `YYYY-MM-DD`.
pub mod iso_date {
    use super::*;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let raw = crate::time_utils::iso_date(*date).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&raw)
    }
}
