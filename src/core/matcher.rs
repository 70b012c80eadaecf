use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::core::{
    filters::{need_is_eligible, offer_is_eligible},
    scoring::calculate_match_score,
};
use crate::error::MatchError;
use crate::models::{MatchOptions, MatchResult, Need, Offer};

/// Main matching orchestrator
///
/// Holds no state between calls beyond its settings. Every operation reads
/// the clock once and uses that instant for all filtering and scoring in the
/// call.
///
/// # Pipeline Stages
/// 1. Eligibility filter (status, activity, availability window / deadline)
/// 2. Scoring of each remaining candidate
/// 3. Distance and minimum-score cut-off
/// 4. Ranking and truncation
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    parallel: bool,
    reference_time: Option<DateTime<Utc>>,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fan candidate scoring out over the rayon thread pool
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Pin "now" to a fixed instant instead of the wall clock
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.reference_time.unwrap_or_else(Utc::now)
    }

    /// Score a single offer/need pair
    ///
    /// Either side may be absent (e.g. a lookup that found nothing), which is
    /// reported as `InvalidInput` rather than defaulted.
    pub fn score(&self, offer: Option<&Offer>, need: Option<&Need>) -> Result<MatchResult, MatchError> {
        let offer = offer.ok_or_else(|| MatchError::InvalidInput("offer is required".to_string()))?;
        let need = need.ok_or_else(|| MatchError::InvalidInput("need is required".to_string()))?;
        calculate_match_score(offer, need, self.now())
    }

    /// Find the best offers for a need
    ///
    /// # Arguments
    /// * `need` - The need to match
    /// * `offers` - Candidate pool
    /// * `options` - Distance, score and result-count limits
    ///
    /// # Returns
    /// Matches sorted by total score (descending); empty when nothing qualifies
    pub fn find_matches_for_need(
        &self,
        need: &Need,
        offers: &[Offer],
        options: &MatchOptions,
    ) -> Vec<MatchResult> {
        let offers: Vec<&Offer> = offers.iter().collect();
        self.rank_offers_for_need(need, &offers, options, self.now())
    }

    /// Find the best needs an offer could serve
    pub fn find_matches_for_offer(
        &self,
        offer: &Offer,
        needs: &[Need],
        options: &MatchOptions,
    ) -> Vec<MatchResult> {
        let needs: Vec<&Need> = needs.iter().collect();
        self.rank_needs_for_offer(offer, &needs, options, self.now())
    }

    pub(crate) fn rank_offers_for_need(
        &self,
        need: &Need,
        offers: &[&Offer],
        options: &MatchOptions,
        now: DateTime<Utc>,
    ) -> Vec<MatchResult> {
        let eligible: Vec<&Offer> = offers
            .iter()
            .copied()
            .filter(|offer| offer_is_eligible(offer, now))
            .collect();

        debug!(
            "Scoring {} of {} offers for need {}",
            eligible.len(),
            offers.len(),
            need.id
        );

        self.rank(
            &eligible,
            |offer| {
                calculate_match_score(offer, need, now)
                    .map_err(|e| MatchError::candidate(&offer.id, e))
            },
            options,
        )
    }

    pub(crate) fn rank_needs_for_offer(
        &self,
        offer: &Offer,
        needs: &[&Need],
        options: &MatchOptions,
        now: DateTime<Utc>,
    ) -> Vec<MatchResult> {
        let eligible: Vec<&Need> = needs
            .iter()
            .copied()
            .filter(|need| need_is_eligible(need, now))
            .collect();

        debug!(
            "Scoring {} of {} needs for offer {}",
            eligible.len(),
            needs.len(),
            offer.id
        );

        self.rank(
            &eligible,
            |need| {
                calculate_match_score(offer, need, now)
                    .map_err(|e| MatchError::candidate(&need.id, e))
            },
            options,
        )
    }

    /// Score every candidate, drop failures and out-of-bounds results, then
    /// sort and truncate.
    fn rank<C, S>(&self, candidates: &[&C], score: S, options: &MatchOptions) -> Vec<MatchResult>
    where
        C: Sync,
        S: Fn(&C) -> Result<MatchResult, MatchError> + Sync + Send,
    {
        let outcomes: Vec<Result<MatchResult, MatchError>> = if self.parallel {
            candidates.par_iter().map(|candidate| score(candidate)).collect()
        } else {
            candidates.iter().map(|candidate| score(candidate)).collect()
        };

        let mut matches: Vec<MatchResult> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            })
            .filter(|result| result.factors.location_distance_km <= options.max_distance_km)
            .filter(|result| result.total_score >= options.min_score)
            .collect();

        sort_ranked(&mut matches);
        matches.truncate(options.max_results);
        matches
    }
}

/// Sort by score (descending), then distance (ascending), then offer id and
/// need id so equal scores always come back in the same order.
pub fn sort_ranked(matches: &mut [MatchResult]) {
    matches.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| {
                a.factors
                    .location_distance_km
                    .partial_cmp(&b.factors.location_distance_km)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.offer_id.cmp(&b.offer_id))
            .then_with(|| a.need_id.cmp(&b.need_id))
    });
}
