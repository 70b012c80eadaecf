use chrono::{DateTime, Utc};

use crate::core::{
    distance::{distance_between, round_km},
    text::text_relevance,
};
use crate::error::MatchError;
use crate::models::{MatchFactors, MatchResult, Need, Offer, UrgencyLevel};

/// Points available for resource/description overlap
pub const RESOURCE_MATCH_POINTS: f64 = 40.0;

/// Distance tiers as (inclusive upper bound in km, points), nearest first
pub const DISTANCE_TIERS: [(f64, u32); 5] = [
    (5.0, 30),
    (15.0, 25),
    (30.0, 20),
    (50.0, 15),
    (100.0, 10),
];

/// Points for anything beyond the last tier
pub const FAR_LOCATION_POINTS: u32 = 5;

pub const TIME_SCORE_BASE: i32 = 10;
pub const TIME_SCORE_MAX: i32 = 10;
pub const STALE_OFFER_DAYS: f64 = 7.0;
pub const STALE_OFFER_PENALTY: i32 = 3;
pub const WAITING_NEED_DAYS: f64 = 3.0;
pub const WAITING_NEED_BONUS: i32 = 2;
pub const DEADLINE_WINDOW_HOURS: f64 = 24.0;
pub const DEADLINE_BONUS: i32 = 3;

const MS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

/// Score how well `offer` serves `need` (0-100)
///
/// Scoring formula:
/// total = resource_match   (0-40, text overlap of resource + description)
///       + location_score   (5-30, tiered by great-circle distance)
///       + urgency_score    (5-20, by the need's urgency level)
///       + time_score       (0-10, offer/need age and deadline proximity)
///
/// Ages are measured against `now`. Fails with `InvalidInput` when the
/// coordinates do not yield a usable distance.
pub fn calculate_match_score(
    offer: &Offer,
    need: &Need,
    now: DateTime<Utc>,
) -> Result<MatchResult, MatchError> {
    let relevance = text_relevance(
        &format!("{} {}", offer.resource, offer.description),
        &format!("{} {}", need.resource, need.description),
    );
    let resource_match = (relevance * RESOURCE_MATCH_POINTS).round() as u32;

    let distance_km = distance_between(&offer.location, &need.location);
    if !distance_km.is_finite() {
        return Err(MatchError::InvalidInput(format!(
            "no distance between offer {} and need {}",
            offer.id, need.id
        )));
    }

    let factors = MatchFactors {
        resource_match,
        location_distance_km: round_km(distance_km),
        location_score: calculate_location_score(distance_km),
        urgency_score: calculate_urgency_score(need.urgency_level()),
        time_score: calculate_time_score(offer, need, now),
    };

    Ok(MatchResult::new(
        offer.id.clone(),
        need.id.clone(),
        offer.resource.clone(),
        factors,
    ))
}

/// Tiered location score, not a continuous decay
#[inline]
pub fn calculate_location_score(distance_km: f64) -> u32 {
    DISTANCE_TIERS
        .iter()
        .find(|(max_km, _)| distance_km <= *max_km)
        .map(|(_, points)| *points)
        .unwrap_or(FAR_LOCATION_POINTS)
}

#[inline]
pub fn calculate_urgency_score(level: Option<UrgencyLevel>) -> u32 {
    match level {
        Some(UrgencyLevel::Critical) => 20,
        Some(UrgencyLevel::High) => 15,
        Some(UrgencyLevel::Medium) => 10,
        Some(UrgencyLevel::Low) | Some(UrgencyLevel::Unrecognized) | None => 5,
    }
}

/// Base 10, minus 3 for an offer older than a week, plus 2 for a need waiting
/// more than three days, plus 3 for a deadline inside 24 hours; clamped to 0-10.
pub fn calculate_time_score(offer: &Offer, need: &Need, now: DateTime<Utc>) -> u32 {
    let offer_age_days = (now - offer.created_at).num_milliseconds() as f64 / MS_PER_DAY;
    let need_age_days = (now - need.created_at).num_milliseconds() as f64 / MS_PER_DAY;

    let mut score = TIME_SCORE_BASE;
    if offer_age_days > STALE_OFFER_DAYS {
        score -= STALE_OFFER_PENALTY;
    }
    if need_age_days > WAITING_NEED_DAYS {
        score += WAITING_NEED_BONUS;
    }
    if let Some(deadline) = need.deadline() {
        let hours_left = (deadline - now).num_milliseconds() as f64 / MS_PER_HOUR;
        if hours_left <= DEADLINE_WINDOW_HOURS {
            score += DEADLINE_BONUS;
        }
    }

    score.clamp(0, TIME_SCORE_MAX) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, NeedStatus, OfferStatus, Urgency};
    use chrono::Duration;

    fn create_test_offer(lon: f64, created_at: DateTime<Utc>) -> Offer {
        Offer {
            id: "offer".to_string(),
            user_id: "giver".to_string(),
            user_name: None,
            title: "Pantry surplus".to_string(),
            description: "rice and beans".to_string(),
            resource: "food".to_string(),
            location: Coordinates::new(0.0, lon),
            created_at,
            availability: None,
            is_active: true,
            status: OfferStatus::Available,
        }
    }

    fn create_test_need(
        lon: f64,
        level: Option<UrgencyLevel>,
        created_at: DateTime<Utc>,
        deadline: Option<DateTime<Utc>>,
    ) -> Need {
        Need {
            id: "need".to_string(),
            user_id: "asker".to_string(),
            user_name: None,
            title: "Groceries".to_string(),
            description: "need rice".to_string(),
            resource: "food".to_string(),
            location: Coordinates::new(0.0, lon),
            created_at,
            urgency: Urgency { level, deadline },
            is_active: true,
            status: NeedStatus::Open,
        }
    }

    #[test]
    fn test_calculate_match_score() {
        let now = Utc::now();
        let offer = create_test_offer(0.0, now);
        let need = create_test_need(0.01, Some(UrgencyLevel::Critical), now, None);

        let result = calculate_match_score(&offer, &need, now).unwrap();

        assert_eq!(result.factors.resource_match, 32);
        assert_eq!(result.factors.location_score, 30);
        assert_eq!(result.factors.urgency_score, 20);
        assert_eq!(result.factors.time_score, 10);
        assert_eq!(result.total_score, 92);
        assert_eq!(result.resource, "food");
    }

    #[test]
    fn test_location_tiers() {
        assert_eq!(calculate_location_score(0.0), 30);
        assert_eq!(calculate_location_score(5.0), 30);
        assert_eq!(calculate_location_score(5.01), 25);
        assert_eq!(calculate_location_score(15.0), 25);
        assert_eq!(calculate_location_score(30.0), 20);
        assert_eq!(calculate_location_score(50.0), 15);
        assert_eq!(calculate_location_score(100.0), 10);
        assert_eq!(calculate_location_score(100.5), 5);
        assert_eq!(calculate_location_score(5000.0), 5);
    }

    #[test]
    fn test_urgency_score() {
        assert_eq!(calculate_urgency_score(Some(UrgencyLevel::Low)), 5);
        assert_eq!(calculate_urgency_score(Some(UrgencyLevel::Medium)), 10);
        assert_eq!(calculate_urgency_score(Some(UrgencyLevel::High)), 15);
        assert_eq!(calculate_urgency_score(Some(UrgencyLevel::Critical)), 20);
        assert_eq!(calculate_urgency_score(Some(UrgencyLevel::Unrecognized)), 5);
        assert_eq!(calculate_urgency_score(None), 5);
    }

    #[test]
    fn test_time_score_stale_offer() {
        let now = Utc::now();
        let offer = create_test_offer(0.0, now - Duration::days(8));
        let need = create_test_need(0.0, None, now, None);
        assert_eq!(calculate_time_score(&offer, &need, now), 7);
    }

    #[test]
    fn test_time_score_waiting_need_on_stale_offer() {
        let now = Utc::now();
        let offer = create_test_offer(0.0, now - Duration::days(8));
        let need = create_test_need(0.0, None, now - Duration::days(4), None);
        assert_eq!(calculate_time_score(&offer, &need, now), 9);
    }

    #[test]
    fn test_time_score_clamped_to_max() {
        let now = Utc::now();
        let offer = create_test_offer(0.0, now);
        let need = create_test_need(
            0.0,
            None,
            now - Duration::days(4),
            Some(now + Duration::hours(2)),
        );
        assert_eq!(calculate_time_score(&offer, &need, now), 10);
    }

    #[test]
    fn test_time_score_deadline_bonus_on_stale_offer() {
        let now = Utc::now();
        let offer = create_test_offer(0.0, now - Duration::days(10));
        let near = create_test_need(0.0, None, now, Some(now + Duration::hours(23)));
        let far = create_test_need(0.0, None, now, Some(now + Duration::hours(48)));

        assert_eq!(calculate_time_score(&offer, &near, now), 10);
        assert_eq!(calculate_time_score(&offer, &far, now), 7);
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let now = Utc::now();
        let mut offer = create_test_offer(0.0, now);
        offer.location.latitude = f64::NAN;
        let need = create_test_need(0.0, None, now, None);

        let err = calculate_match_score(&offer, &need, now).unwrap_err();
        assert!(matches!(err, MatchError::InvalidInput(_)));
    }

    #[test]
    fn test_score_bounds() {
        let now = Utc::now();
        let offer = create_test_offer(0.0, now - Duration::days(30));
        let need = create_test_need(170.0, None, now, None);

        let result = calculate_match_score(&offer, &need, now).unwrap();
        assert!(result.total_score <= 100);
        assert_eq!(result.factors.location_score, FAR_LOCATION_POINTS);
        assert_eq!(result.total_score, result.factors.total());
    }
}
