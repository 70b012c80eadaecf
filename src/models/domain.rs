use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_coordinates"))]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

fn validate_coordinates(coords: &Coordinates) -> Result<(), ValidationError> {
    if !coords.latitude.is_finite() || !(-90.0..=90.0).contains(&coords.latitude) {
        return Err(ValidationError::new("latitude_out_of_range"));
    }
    if !coords.longitude.is_finite() || !(-180.0..=180.0).contains(&coords.longitude) {
        return Err(ValidationError::new("longitude_out_of_range"));
    }
    Ok(())
}

/// Window during which an offer can be claimed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_window"))]
pub struct Availability {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

fn validate_window(window: &Availability) -> Result<(), ValidationError> {
    if window.start_date > window.end_date {
        return Err(ValidationError::new("availability_ends_before_start"));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Available,
    Claimed,
    Completed,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeedStatus {
    Open,
    InProgress,
    Fulfilled,
    Expired,
}

/// Ordinal priority tag on a need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
    /// Any level string this build does not know about
    #[serde(other)]
    Unrecognized,
}

impl UrgencyLevel {
    /// Processing priority used when batch matching (higher goes first)
    pub fn priority(self) -> u8 {
        match self {
            UrgencyLevel::Critical => 4,
            UrgencyLevel::High => 3,
            UrgencyLevel::Medium => 2,
            UrgencyLevel::Low => 1,
            UrgencyLevel::Unrecognized => 0,
        }
    }

    pub fn is_urgent(self) -> bool {
        matches!(self, UrgencyLevel::High | UrgencyLevel::Critical)
    }
}

/// Urgency attached to a need. A missing level is stored as `medium`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Urgency {
    #[serde(default = "default_level")]
    pub level: Option<UrgencyLevel>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

impl Default for Urgency {
    fn default() -> Self {
        Self { level: default_level(), deadline: None }
    }
}

fn default_level() -> Option<UrgencyLevel> {
    Some(UrgencyLevel::Medium)
}

/// A posted resource or skill a participant makes available
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[validate(length(min = 1))]
    pub resource: String,
    #[validate(nested)]
    pub location: Coordinates,
    pub created_at: DateTime<Utc>,
    #[validate(nested)]
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub status: OfferStatus,
}

impl Offer {
    /// Whether the availability window closed before `now`
    pub fn window_ended(&self, now: DateTime<Utc>) -> bool {
        self.availability
            .map(|window| window.end_date < now)
            .unwrap_or(false)
    }
}

/// A posted request for a resource or skill
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Need {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[validate(length(min = 1))]
    pub resource: String,
    #[validate(nested)]
    pub location: Coordinates,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub status: NeedStatus,
}

impl Need {
    pub fn urgency_level(&self) -> Option<UrgencyLevel> {
        self.urgency.level
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.urgency.deadline
    }

    /// Whether the deadline is strictly before `now`
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.urgency
            .deadline
            .map(|deadline| deadline < now)
            .unwrap_or(false)
    }

    pub fn is_urgent(&self) -> bool {
        self.urgency.level.map(UrgencyLevel::is_urgent).unwrap_or(false)
    }
}

fn default_true() -> bool { true }

/// Per-factor breakdown of a composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFactors {
    pub resource_match: u32,
    pub location_distance_km: f64,
    pub location_score: u32,
    pub urgency_score: u32,
    pub time_score: u32,
}

impl MatchFactors {
    pub fn total(&self) -> u32 {
        self.resource_match + self.location_score + self.urgency_score + self.time_score
    }
}

/// Coarse classification of a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_score(total_score: u32) -> Self {
        if total_score >= 70 {
            Confidence::High
        } else if total_score >= 50 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Scored offer/need pair
///
/// Built only through [`MatchResult::new`], which derives `total_score` and
/// `confidence` from the factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub offer_id: String,
    pub need_id: String,
    pub resource: String,
    pub factors: MatchFactors,
    pub total_score: u32,
    pub confidence: Confidence,
}

impl MatchResult {
    pub fn new(offer_id: String, need_id: String, resource: String, factors: MatchFactors) -> Self {
        let total_score = factors.total();
        Self {
            offer_id,
            need_id,
            resource,
            factors,
            total_score,
            confidence: Confidence::from_score(total_score),
        }
    }

    /// Deduplication key
    pub fn pair_key(&self) -> (&str, &str) {
        (&self.offer_id, &self.need_id)
    }
}
