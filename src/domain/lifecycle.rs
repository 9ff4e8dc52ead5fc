//! Permitted deal transitions.
//!
//! Every action a party can take on a deal is listed in [`DealAction`], and
//! [`DealAction::target_status`] is the single table deciding which status an
//! action may be taken from and where it leads.

use super::deal::DealStatus;
use super::pricing::{ContentType, OfferAmount};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Brand,
    Influencer,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Brand => f.write_str("brand"),
            Party::Influencer => f.write_str("influencer"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum DealAction {
    InfluencerAccept,
    InfluencerReject,
    CounterOffer(OfferAmount),
    BrandAccept,
    BrandReject,
    Cancel,
    Pay,
    SubmitContent {
        content_type: ContentType,
        url: String,
    },
    ApproveContent {
        submission_id: Uuid,
    },
    RejectContent {
        submission_id: Uuid,
        comment: String,
    },
    ReleasePayment,
}

impl DealAction {
    /// The party allowed to take this action.
    pub fn party(&self) -> Party {
        match self {
            DealAction::InfluencerAccept
            | DealAction::InfluencerReject
            | DealAction::CounterOffer(_)
            | DealAction::SubmitContent { .. } => Party::Influencer,
            DealAction::BrandAccept
            | DealAction::BrandReject
            | DealAction::Cancel
            | DealAction::Pay
            | DealAction::ApproveContent { .. }
            | DealAction::RejectContent { .. }
            | DealAction::ReleasePayment => Party::Brand,
        }
    }

    /// Short verb used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DealAction::InfluencerAccept | DealAction::BrandAccept => "accept",
            DealAction::InfluencerReject | DealAction::BrandReject => "reject",
            DealAction::CounterOffer(_) => "counter-offer",
            DealAction::Cancel => "cancel",
            DealAction::Pay => "pay for",
            DealAction::SubmitContent { .. } => "submit content for",
            DealAction::ApproveContent { .. } => "approve content for",
            DealAction::RejectContent { .. } => "reject content for",
            DealAction::ReleasePayment => "release payment for",
        }
    }

    /// Returns the status this action leads to from `from`, or `None` when the
    /// action is not permitted in that status.
    ///
    /// `ApproveContent` always reports `ContentApproved`: a deal only accepts
    /// reviews while `Ongoing`, so any approval is the first one.
    pub fn target_status(&self, from: DealStatus) -> Option<DealStatus> {
        use DealStatus::*;

        match (from, self) {
            (Requested, DealAction::InfluencerAccept) => Some(Accepted),
            (Requested, DealAction::InfluencerReject) => Some(Cancelled),
            (Requested, DealAction::CounterOffer(_)) => Some(CounterOffered),
            (CounterOffered, DealAction::BrandAccept) => Some(Accepted),
            (CounterOffered, DealAction::BrandReject) => Some(Cancelled),
            (Requested | CounterOffered | Accepted, DealAction::Cancel) => Some(Cancelled),
            (Accepted, DealAction::Pay) => Some(Ongoing),
            (Ongoing, DealAction::SubmitContent { .. }) => Some(Ongoing),
            (Ongoing, DealAction::ApproveContent { .. }) => Some(ContentApproved),
            (Ongoing, DealAction::RejectContent { .. }) => Some(Ongoing),
            (ContentApproved, DealAction::ReleasePayment) => Some(Completed),
            _ => None,
        }
    }
}
