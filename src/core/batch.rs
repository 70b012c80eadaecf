use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::debug;

use crate::core::{
    filters::{need_is_eligible, prioritize_needs},
    matcher::Matcher,
};
use crate::models::{BatchOptions, MatchResult, Need, Offer};

impl Matcher {
    /// Match every open need against every available offer
    ///
    /// Needs are processed most urgent first, each capped at
    /// `max_matches_per_need`. The combined set is deduplicated on
    /// (offer id, need id), keeping the first occurrence, and re-sorted by
    /// total score. Equal scores keep processing order.
    pub fn auto_match_all(
        &self,
        needs: &[Need],
        offers: &[Offer],
        options: &BatchOptions,
    ) -> Vec<MatchResult> {
        let needs: Vec<&Need> = needs.iter().collect();
        let offers: Vec<&Offer> = offers.iter().collect();
        self.auto_match(&needs, &offers, options, self.now())
    }

    /// Order in which [`Matcher::auto_match_all`] visits needs
    pub fn processing_order<'a>(&self, needs: &'a [Need]) -> Vec<&'a Need> {
        let now = self.now();
        prioritize_needs(needs.iter().filter(|need| need_is_eligible(need, now)))
    }

    pub(crate) fn auto_match(
        &self,
        needs: &[&Need],
        offers: &[&Offer],
        options: &BatchOptions,
        now: DateTime<Utc>,
    ) -> Vec<MatchResult> {
        if needs.is_empty() || offers.is_empty() {
            return Vec::new();
        }

        let ordered = prioritize_needs(
            needs.iter().copied().filter(|need| need_is_eligible(need, now)),
        );
        let per_need = options.per_need();

        let batches: Vec<Vec<MatchResult>> = if self.is_parallel() {
            ordered
                .par_iter()
                .map(|need| self.rank_offers_for_need(need, offers, &per_need, now))
                .collect()
        } else {
            ordered
                .iter()
                .map(|need| self.rank_offers_for_need(need, offers, &per_need, now))
                .collect()
        };

        let found: usize = batches.iter().map(Vec::len).sum();
        let unique = dedup_pairs(batches.into_iter().flatten());

        debug!(
            "Auto-matched {} needs: {} matches, {} after dedup",
            ordered.len(),
            found,
            unique.len()
        );

        unique
    }
}

/// Keep the first result per (offer id, need id) and sort by score (descending).
///
/// The sort is stable, so equal scores stay in arrival order.
pub fn dedup_pairs<I>(matches: I) -> Vec<MatchResult>
where
    I: IntoIterator<Item = MatchResult>,
{
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut unique: Vec<MatchResult> = matches
        .into_iter()
        .filter(|m| {
            let (offer_id, need_id) = m.pair_key();
            seen.insert((offer_id.to_owned(), need_id.to_owned()))
        })
        .collect();

    unique.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    unique
}
