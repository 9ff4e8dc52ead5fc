use crate::domain::deal::{Deal, DealRequest, DealStatus};
use crate::domain::lifecycle::{DealAction, Party};
use crate::domain::ports::{DealQuery, DealStoreBox};
use crate::domain::pricing::{ContentType, OfferAmount};
use crate::error::{DealError, Result};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

/// The user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub party: Party,
}

impl Actor {
    pub fn brand(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            party: Party::Brand,
        }
    }

    pub fn influencer(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            party: Party::Influencer,
        }
    }
}

/// A brand's verdict on a content submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentReview {
    Approve,
    Reject { comment: String },
}

/// Entry point for every deal operation.
///
/// `DealEngine` owns the storage backend. Each transition loads the deal,
/// applies the action to a copy and commits it with a compare-and-swap on the
/// deal version, so two conflicting requests racing on the same deal can never
/// both succeed.
pub struct DealEngine {
    store: DealStoreBox,
}

impl DealEngine {
    pub fn new(store: DealStoreBox) -> Self {
        Self { store }
    }

    /// Creates a deal from a brand's connect request.
    pub async fn create_deal(&self, actor: &Actor, request: DealRequest) -> Result<Deal> {
        if actor.party != Party::Brand {
            return Err(DealError::Forbidden(
                "Only brands can request deals".to_string(),
            ));
        }

        let deal = Deal::request(&actor.user_id, request, Utc::now())?;
        self.store.insert(deal.clone()).await?;
        info!(
            deal_id = %deal.id,
            brand_id = %deal.brand_id,
            mode = deal.pricing.mode(),
            total_amount = %deal.total_amount,
            "deal requested"
        );
        Ok(deal)
    }

    pub async fn get_deal(&self, actor: &Actor, id: Uuid) -> Result<Deal> {
        let deal = self.load(id).await?;
        if !deal.involves(actor.party, &actor.user_id) {
            return Err(DealError::NotFound(id));
        }
        Ok(deal)
    }

    /// Deals the actor takes part in, optionally narrowed to one status.
    pub async fn list_deals(&self, actor: &Actor, status: Option<DealStatus>) -> Result<Vec<Deal>> {
        let query = DealQuery {
            party: actor.party,
            user_id: actor.user_id.clone(),
            status,
        };
        self.store.list(&query).await
    }

    /// Applies `action` to deal `id` on behalf of `actor`.
    pub async fn apply(&self, actor: &Actor, id: Uuid, action: DealAction) -> Result<Deal> {
        let mut deal = self.get_deal(actor, id).await?;
        if action.party() != actor.party {
            return Err(DealError::Forbidden(format!(
                "Only the {} can {} this deal",
                action.party(),
                action.name()
            )));
        }

        let action_name = action.name();
        let from = deal.status;
        let expected_version = deal.version;
        deal.apply(action, Utc::now())?;
        deal.version = expected_version + 1;

        match self.store.compare_and_swap(deal.clone(), expected_version).await {
            Ok(()) => {
                info!(
                    deal_id = %id,
                    actor = %actor.user_id,
                    action = action_name,
                    from = %from,
                    to = %deal.status,
                    "deal transition committed"
                );
                Ok(deal)
            }
            Err(e) => {
                warn!(deal_id = %id, action = action_name, error = %e, "deal transition rejected");
                Err(e)
            }
        }
    }

    /// Accepts the deal from whichever side the actor is on.
    pub async fn accept(&self, actor: &Actor, id: Uuid) -> Result<Deal> {
        let action = match actor.party {
            Party::Influencer => DealAction::InfluencerAccept,
            Party::Brand => DealAction::BrandAccept,
        };
        self.apply(actor, id, action).await
    }

    /// Rejects the deal from whichever side the actor is on.
    pub async fn reject(&self, actor: &Actor, id: Uuid) -> Result<Deal> {
        let action = match actor.party {
            Party::Influencer => DealAction::InfluencerReject,
            Party::Brand => DealAction::BrandReject,
        };
        self.apply(actor, id, action).await
    }

    pub async fn counter_offer(&self, actor: &Actor, id: Uuid, amount: OfferAmount) -> Result<Deal> {
        self.apply(actor, id, DealAction::CounterOffer(amount)).await
    }

    pub async fn cancel(&self, actor: &Actor, id: Uuid) -> Result<Deal> {
        self.apply(actor, id, DealAction::Cancel).await
    }

    pub async fn pay(&self, actor: &Actor, id: Uuid) -> Result<Deal> {
        self.apply(actor, id, DealAction::Pay).await
    }

    pub async fn submit_content(
        &self,
        actor: &Actor,
        id: Uuid,
        content_type: ContentType,
        url: String,
    ) -> Result<Deal> {
        self.apply(actor, id, DealAction::SubmitContent { content_type, url })
            .await
    }

    pub async fn review_content(
        &self,
        actor: &Actor,
        id: Uuid,
        submission_id: Uuid,
        review: ContentReview,
    ) -> Result<Deal> {
        let action = match review {
            ContentReview::Approve => DealAction::ApproveContent { submission_id },
            ContentReview::Reject { comment } => DealAction::RejectContent {
                submission_id,
                comment,
            },
        };
        self.apply(actor, id, action).await
    }

    pub async fn release_payment(&self, actor: &Actor, id: Uuid) -> Result<Deal> {
        self.apply(actor, id, DealAction::ReleasePayment).await
    }

    /// Every stored deal regardless of party, for reporting.
    pub async fn all_deals(&self) -> Result<Vec<Deal>> {
        self.store.all_deals().await
    }

    async fn load(&self, id: Uuid) -> Result<Deal> {
        self.store.get(id).await?.ok_or(DealError::NotFound(id))
    }
}
