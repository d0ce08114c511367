//! Coarse preparation-time ranges used by the catalog filters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::parse_duration_to_minutes;

/// Error returned when a bucket id is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown duration bucket: {0}")]
pub struct UnknownBucket(pub String);

/// Preparation-time range a recipe falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DurationBucket {
    /// Up to 15 minutes
    #[serde(rename = "ate-15")]
    UpTo15,
    /// 16 to 30 minutes
    #[serde(rename = "15-30")]
    From15To30,
    /// 31 to 60 minutes
    #[serde(rename = "30-60")]
    From30To60,
    /// More than an hour
    #[serde(rename = "mais-60")]
    Over60,
    /// Missing or unreadable duration
    #[serde(rename = "desconhecido")]
    Unknown,
}

impl DurationBucket {
    /// All buckets in display order.
    pub const ALL: [DurationBucket; 5] = [
        DurationBucket::UpTo15,
        DurationBucket::From15To30,
        DurationBucket::From30To60,
        DurationBucket::Over60,
        DurationBucket::Unknown,
    ];

    pub fn from_minutes(minutes: Option<u64>) -> Self {
        match minutes {
            None => DurationBucket::Unknown,
            Some(0..=15) => DurationBucket::UpTo15,
            Some(16..=30) => DurationBucket::From15To30,
            Some(31..=60) => DurationBucket::From30To60,
            Some(_) => DurationBucket::Over60,
        }
    }

    /// Bucket for raw duration text, as authors typed it.
    pub fn from_text(value: Option<&str>) -> Self {
        Self::from_minutes(parse_duration_to_minutes(value))
    }

    pub fn id(&self) -> &'static str {
        match self {
            DurationBucket::UpTo15 => "ate-15",
            DurationBucket::From15To30 => "15-30",
            DurationBucket::From30To60 => "30-60",
            DurationBucket::Over60 => "mais-60",
            DurationBucket::Unknown => "desconhecido",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationBucket::UpTo15 => "Até 15 min",
            DurationBucket::From15To30 => "15 a 30 min",
            DurationBucket::From30To60 => "30 a 60 min",
            DurationBucket::Over60 => "Mais de 1 hora",
            DurationBucket::Unknown => "Tempo não informado",
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DurationBucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.id() == id)
            .ok_or_else(|| UnknownBucket(s.to_string()))
    }
}
