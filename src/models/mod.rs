// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Availability, Confidence, Coordinates, MatchFactors, MatchResult, Need, NeedStatus, Offer,
    OfferStatus, Urgency, UrgencyLevel,
};
pub use requests::{BatchOptions, MatchOptions, RecommendRequest};
pub use responses::{ErrorResponse, MatchesResponse, Recommendation};
