use serde::Serialize;

use crate::dto::offer_dto::{FeedResponse, OfferResponse};

/// Landing payload, shaped by who is asking.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum HomeView {
    Admin { message: String },
    MissingProfile { message: String },
    ChooseRole { message: String },
    Candidate { feed: FeedResponse },
    Employer { offers: Vec<OfferResponse> },
}
