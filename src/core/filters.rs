use chrono::{DateTime, Utc};

use crate::models::{Need, NeedStatus, Offer, OfferStatus};

/// Check if an offer can still be matched
///
/// The offer must be active, `available`, and its availability window (if
/// any) must not have ended before `now`.
#[inline]
pub fn offer_is_eligible(offer: &Offer, now: DateTime<Utc>) -> bool {
    offer.is_active && offer.status == OfferStatus::Available && !offer.window_ended(now)
}

/// Check if a need can still be matched
///
/// The need must be active, `open`, and its deadline (if any) must not have
/// passed.
#[inline]
pub fn need_is_eligible(need: &Need, now: DateTime<Utc>) -> bool {
    need.is_active && need.status == NeedStatus::Open && !need.deadline_passed(now)
}

/// Case-insensitive substring match of a keyword against resource or description.
///
/// `keyword` is expected to be lower-cased already.
#[inline]
pub fn mentions_resource(resource: &str, description: &str, keyword: &str) -> bool {
    resource.to_lowercase().contains(keyword) || description.to_lowercase().contains(keyword)
}

/// Order needs so the most urgent are processed first.
///
/// The sort is stable: needs with the same urgency keep their input order.
pub fn prioritize_needs<'a, I>(needs: I) -> Vec<&'a Need>
where
    I: IntoIterator<Item = &'a Need>,
{
    let mut ordered: Vec<&Need> = needs.into_iter().collect();
    ordered.sort_by_key(|need| {
        std::cmp::Reverse(need.urgency_level().map(|level| level.priority()).unwrap_or(0))
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Coordinates, Urgency, UrgencyLevel};
    use chrono::Duration;

    fn create_test_offer(status: OfferStatus) -> Offer {
        Offer {
            id: "o1".to_string(),
            user_id: "u1".to_string(),
            user_name: Some("Sam".to_string()),
            title: "Spare tent".to_string(),
            description: "four person tent".to_string(),
            resource: "Shelter".to_string(),
            location: Coordinates::new(51.5, -0.12),
            created_at: Utc::now(),
            availability: None,
            is_active: true,
            status,
        }
    }

    fn create_test_need(id: &str, level: Option<UrgencyLevel>) -> Need {
        Need {
            id: id.to_string(),
            user_id: "u2".to_string(),
            user_name: None,
            title: "Need a tent".to_string(),
            description: "somewhere to sleep".to_string(),
            resource: "shelter".to_string(),
            location: Coordinates::new(51.5, -0.12),
            created_at: Utc::now(),
            urgency: Urgency { level, deadline: None },
            is_active: true,
            status: NeedStatus::Open,
        }
    }

    #[test]
    fn test_offer_status_filter() {
        let now = Utc::now();
        assert!(offer_is_eligible(&create_test_offer(OfferStatus::Available), now));
        assert!(!offer_is_eligible(&create_test_offer(OfferStatus::Claimed), now));
        assert!(!offer_is_eligible(&create_test_offer(OfferStatus::Completed), now));
        assert!(!offer_is_eligible(&create_test_offer(OfferStatus::Expired), now));
    }

    #[test]
    fn test_offer_window_ended() {
        let now = Utc::now();
        let mut offer = create_test_offer(OfferStatus::Available);
        offer.availability = Some(Availability {
            start_date: now - Duration::days(5),
            end_date: now - Duration::hours(1),
        });
        assert!(!offer_is_eligible(&offer, now));

        offer.availability = Some(Availability {
            start_date: now - Duration::days(5),
            end_date: now + Duration::hours(1),
        });
        assert!(offer_is_eligible(&offer, now));
    }

    #[test]
    fn test_inactive_offer_filtered() {
        let mut offer = create_test_offer(OfferStatus::Available);
        offer.is_active = false;
        assert!(!offer_is_eligible(&offer, Utc::now()));
    }

    #[test]
    fn test_need_filters() {
        let now = Utc::now();
        let mut need = create_test_need("n1", None);
        assert!(need_is_eligible(&need, now));

        need.urgency.deadline = Some(now - Duration::minutes(1));
        assert!(!need_is_eligible(&need, now));

        need.urgency.deadline = None;
        need.status = NeedStatus::Fulfilled;
        assert!(!need_is_eligible(&need, now));
    }

    #[test]
    fn test_mentions_resource() {
        assert!(mentions_resource("Shelter", "", "shelter"));
        assert!(mentions_resource("camping", "Four person TENT", "tent"));
        assert!(!mentions_resource("food", "rice", "tent"));
    }

    #[test]
    fn test_prioritize_needs_stable() {
        let needs = vec![
            create_test_need("low", Some(UrgencyLevel::Low)),
            create_test_need("high-1", Some(UrgencyLevel::High)),
            create_test_need("none", None),
            create_test_need("critical", Some(UrgencyLevel::Critical)),
            create_test_need("high-2", Some(UrgencyLevel::High)),
        ];

        let ids: Vec<&str> = prioritize_needs(&needs).into_iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["critical", "high-1", "high-2", "low", "none"]);
    }
}
