//! Serde format for stored timestamps (`%Y-%m-%d %H:%M:%S`, local time)

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time truncated to whole seconds, so stored values round-trip exactly
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
}
