use tracing::debug;

use crate::core::{filters::mentions_resource, matcher::Matcher};
use crate::error::MatchError;
use crate::models::{
    BatchOptions, Confidence, Coordinates, Need, NeedStatus, Offer, OfferStatus, Recommendation,
};

/// Distance cap when the caller supplies a location
pub const LOCAL_MAX_DISTANCE_KM: f64 = 50.0;
/// Distance cap without a location
pub const WIDE_MAX_DISTANCE_KM: f64 = 100.0;
pub const RECOMMEND_MIN_SCORE: u32 = 25;
/// Matches returned in a recommendation
pub const RECOMMENDATION_LIMIT: usize = 20;

impl Matcher {
    /// Summarise supply, demand and the best pairings for one resource keyword
    ///
    /// Offers must be `available` and needs `open`; either must mention
    /// `resource_type` (case-insensitive) in its resource or description.
    /// Supplying `location` tightens the distance cap to 50km.
    pub fn recommend(
        &self,
        resource_type: &str,
        offers: &[Offer],
        needs: &[Need],
        location: Option<Coordinates>,
    ) -> Result<Recommendation, MatchError> {
        let keyword = resource_type.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(MatchError::InvalidInput("resource type is required".to_string()));
        }

        let relevant_offers: Vec<&Offer> = offers
            .iter()
            .filter(|offer| {
                offer.status == OfferStatus::Available
                    && mentions_resource(&offer.resource, &offer.description, &keyword)
            })
            .collect();

        let relevant_needs: Vec<&Need> = needs
            .iter()
            .filter(|need| {
                need.status == NeedStatus::Open
                    && mentions_resource(&need.resource, &need.description, &keyword)
            })
            .collect();

        let options = BatchOptions {
            max_distance_km: if location.is_some() {
                LOCAL_MAX_DISTANCE_KM
            } else {
                WIDE_MAX_DISTANCE_KM
            },
            min_score: RECOMMEND_MIN_SCORE,
            ..BatchOptions::default()
        };

        let mut matches = self.auto_match(&relevant_needs, &relevant_offers, &options, self.now());
        let total_matches = matches.len();
        let high_confidence_matches = matches
            .iter()
            .filter(|m| m.confidence == Confidence::High)
            .count();
        let urgent_needs = relevant_needs.iter().filter(|need| need.is_urgent()).count();
        matches.truncate(RECOMMENDATION_LIMIT);

        debug!(
            "Recommendation for '{}': {} offers, {} needs, {} matches",
            keyword,
            relevant_offers.len(),
            relevant_needs.len(),
            total_matches
        );

        Ok(Recommendation {
            resource_type: resource_type.to_string(),
            total_offers: relevant_offers.len(),
            total_needs: relevant_needs.len(),
            total_matches,
            high_confidence_matches,
            urgent_needs,
            matches,
            location,
        })
    }
}
