use super::lifecycle::{DealAction, Party};
use super::pricing::{
    ContentRequirements, ContentType, PricingSelection, PricingStrategy, calculate_total_amount,
};
use crate::error::{DealError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DealStatus {
    #[serde(rename = "requested")]
    Requested,
    #[serde(rename = "counter-offered")]
    CounterOffered,
    #[serde(rename = "accepted")]
    Accepted,
    #[serde(rename = "ongoing")]
    Ongoing,
    #[serde(rename = "content_approved")]
    ContentApproved,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl DealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Requested => "requested",
            DealStatus::CounterOffered => "counter-offered",
            DealStatus::Accepted => "accepted",
            DealStatus::Ongoing => "ongoing",
            DealStatus::ContentApproved => "content_approved",
            DealStatus::Completed => "completed",
            DealStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DealStatus::Completed | DealStatus::Cancelled)
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// An influencer taking part in a deal.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DealParticipant {
    pub influencer_id: String,
    pub status: ParticipantStatus,
    pub offered_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_offer: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A link to published content awaiting (or past) brand review.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContentSubmission {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub url: String,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A brand-to-influencer collaboration agreement.
///
/// All mutation goes through [`Deal::apply`], which checks the transition table
/// and every precondition before touching any field.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,
    pub brand_id: String,
    pub description: String,
    pub status: DealStatus,
    pub payment_status: PaymentStatus,
    pub pricing: PricingStrategy,
    /// The amount computed when the deal was requested. A counter-offer is
    /// recorded on the participant and never overwrites this value.
    pub total_amount: Decimal,
    pub content_requirements: ContentRequirements,
    pub influencers: Vec<DealParticipant>,
    pub submitted_content: Vec<ContentSubmission>,
    pub content_published: bool,
    pub payment_released: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every committed change; stores compare it before writing.
    pub version: u64,
}

/// Everything a brand supplies when asking an influencer to connect.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DealRequest {
    pub influencer_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content_requirements: ContentRequirements,
    #[serde(flatten)]
    pub pricing: PricingSelection,
}

impl Deal {
    /// Builds a new `requested` deal, pricing it from the request.
    pub fn request(brand_id: &str, request: DealRequest, now: DateTime<Utc>) -> Result<Self> {
        let brand_id = brand_id.trim();
        if brand_id.is_empty() {
            return Err(DealError::validation("Brand id is required"));
        }
        let influencer_id = request.influencer_id.trim();
        if influencer_id.is_empty() {
            return Err(DealError::validation("An influencer must be selected"));
        }
        request.content_requirements.validate()?;

        let (pricing, total_amount) =
            calculate_total_amount(&request.pricing, &request.content_requirements)?;

        Ok(Self {
            id: Uuid::new_v4(),
            brand_id: brand_id.to_string(),
            description: request.description.trim().to_string(),
            status: DealStatus::Requested,
            payment_status: PaymentStatus::Unpaid,
            pricing,
            total_amount,
            content_requirements: request.content_requirements,
            influencers: vec![DealParticipant {
                influencer_id: influencer_id.to_string(),
                status: ParticipantStatus::Pending,
                offered_price: total_amount,
                counter_offer: None,
            }],
            submitted_content: Vec::new(),
            content_published: false,
            payment_released: false,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    pub fn influencer_id(&self) -> Option<&str> {
        self.influencers.first().map(|p| p.influencer_id.as_str())
    }

    /// Whether `user_id`, acting as `party`, takes part in this deal.
    pub fn involves(&self, party: Party, user_id: &str) -> bool {
        match party {
            Party::Brand => self.brand_id == user_id,
            Party::Influencer => self.influencers.iter().any(|p| p.influencer_id == user_id),
        }
    }

    pub fn counter_offer(&self) -> Option<Decimal> {
        self.influencers.first().and_then(|p| p.counter_offer)
    }

    /// The amount both sides agreed to: the counter-offer if the brand accepted
    /// one, otherwise the requested total.
    pub fn agreed_amount(&self) -> Decimal {
        match (self.status, self.counter_offer()) {
            (
                DealStatus::Accepted
                | DealStatus::Ongoing
                | DealStatus::ContentApproved
                | DealStatus::Completed,
                Some(counter),
            ) => counter,
            _ => self.total_amount,
        }
    }

    pub fn product_name(&self) -> Option<&str> {
        match &self.pricing {
            PricingStrategy::Barter { product_name, .. } => Some(product_name),
            _ => None,
        }
    }

    pub fn submission(&self, submission_id: Uuid) -> Option<&ContentSubmission> {
        self.submitted_content.iter().find(|s| s.id == submission_id)
    }

    /// Applies `action`, leaving the deal untouched if it is not permitted.
    pub fn apply(&mut self, action: DealAction, now: DateTime<Utc>) -> Result<()> {
        let target = action
            .target_status(self.status)
            .ok_or(DealError::InvalidTransition {
                action: action.name(),
                status: self.status,
            })?;

        match action {
            DealAction::InfluencerAccept | DealAction::BrandAccept => {
                self.participant_mut()?.status = ParticipantStatus::Accepted;
            }
            DealAction::InfluencerReject => {
                self.participant_mut()?.status = ParticipantStatus::Rejected;
            }
            // The participant status records the influencer's own response.
            DealAction::BrandReject => {}
            DealAction::CounterOffer(amount) => {
                self.participant_mut()?.counter_offer = Some(amount.value());
            }
            DealAction::Cancel => {}
            DealAction::Pay => {
                self.payment_status = PaymentStatus::Paid;
            }
            DealAction::SubmitContent { content_type, url } => {
                let url = url.trim();
                if url.is_empty() {
                    return Err(DealError::validation("Content URL is required"));
                }
                self.submitted_content.push(ContentSubmission {
                    id: Uuid::new_v4(),
                    content_type,
                    url: url.to_string(),
                    status: SubmissionStatus::Pending,
                    submitted_at: now,
                    reviewed_at: None,
                    comment: None,
                });
            }
            DealAction::ApproveContent { submission_id } => {
                let index = self.pending_submission(submission_id)?;
                let submission = &mut self.submitted_content[index];
                submission.status = SubmissionStatus::Approved;
                submission.reviewed_at = Some(now);
                self.content_published = true;
            }
            DealAction::RejectContent {
                submission_id,
                comment,
            } => {
                let comment = comment.trim();
                if comment.is_empty() {
                    return Err(DealError::validation(
                        "A comment is required when rejecting content",
                    ));
                }
                let index = self.pending_submission(submission_id)?;
                let submission = &mut self.submitted_content[index];
                submission.status = SubmissionStatus::Rejected;
                submission.reviewed_at = Some(now);
                submission.comment = Some(comment.to_string());
            }
            DealAction::ReleasePayment => {
                if self.payment_status != PaymentStatus::Paid {
                    return Err(DealError::validation(
                        "Payment cannot be released before the deal is paid",
                    ));
                }
                if self.payment_released {
                    return Err(DealError::validation("Payment was already released"));
                }
                self.payment_released = true;
            }
        }

        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    fn participant_mut(&mut self) -> Result<&mut DealParticipant> {
        let id = self.id;
        self.influencers.first_mut().ok_or_else(|| {
            DealError::InternalError(format!("Deal {id} has no influencer").into())
        })
    }

    fn pending_submission(&self, submission_id: Uuid) -> Result<usize> {
        let index = self
            .submitted_content
            .iter()
            .position(|s| s.id == submission_id)
            .ok_or_else(|| {
                DealError::validation(format!("Content submission {submission_id} not found"))
            })?;
        if self.submitted_content[index].status != SubmissionStatus::Pending {
            return Err(DealError::validation(format!(
                "Content submission {submission_id} was already reviewed"
            )));
        }
        Ok(index)
    }
}
