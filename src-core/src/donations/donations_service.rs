use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use crate::config::ConfigServiceTrait;
use crate::donations::donations_model::{
    CreateDonationRequest, Donation, DonationUpdate, NewDonation,
};
use crate::donations::donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
use crate::donations::premium_words::{self, PremiumWordStatus, PREMIUM_WORDS};
use crate::errors::{Error, Result};
use crate::stats::{build_stats, DonationStats};

pub struct DonationService {
    repository: Arc<dyn DonationRepositoryTrait>,
    config_service: Arc<dyn ConfigServiceTrait>,
}

impl DonationService {
    pub fn new(
        repository: Arc<dyn DonationRepositoryTrait>,
        config_service: Arc<dyn ConfigServiceTrait>,
    ) -> Self {
        DonationService {
            repository,
            config_service,
        }
    }
}

#[async_trait]
impl DonationServiceTrait for DonationService {
    fn get_all(&self) -> Result<Vec<Donation>> {
        self.repository.list()
    }

    fn get_by_id(&self, donation_id: i32) -> Result<Donation> {
        self.repository
            .find_by_id(donation_id)?
            .ok_or_else(|| Error::NotFound(format!("donation {}", donation_id)))
    }

    async fn create(&self, request: CreateDonationRequest) -> Result<Donation> {
        let input = request.validated()?;
        let word =
            premium_words::resolve_candidate(input.premium_word_id.as_deref(), input.amount);
        let now = Utc::now().naive_utc();

        let created = self
            .repository
            .insert(NewDonation {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                phone: input.phone,
                amount: input.amount,
                reference: input.reference,
                premium_word_id: word,
                created_at: now,
                updated_at: now,
            })
            .await?;

        debug!("Recorded donation {} of {}", created.id, created.amount);
        Ok(created)
    }

    async fn update(&self, donation_id: i32, request: DonationUpdate) -> Result<Donation> {
        let mut changes = request.validated()?;
        if changes.is_empty() {
            return self.get_by_id(donation_id);
        }

        let existing = self.get_by_id(donation_id)?;
        let effective_amount = changes.amount.unwrap_or(existing.amount);

        // The premium word is always re-resolved against the effective
        // amount: an explicit candidate from the patch, otherwise the word
        // the donation already holds when the amount moved tiers.
        changes.premium_word_id = match changes.premium_word_id.take() {
            Some(candidate) => Some(premium_words::resolve_candidate(
                candidate.as_deref(),
                effective_amount,
            )),
            None if changes.amount.is_some() => Some(premium_words::resolve_candidate(
                existing.premium_word_id.as_deref(),
                effective_amount,
            )),
            None => None,
        };

        self.repository.update(donation_id, changes).await
    }

    async fn delete(&self, donation_id: i32) -> Result<Donation> {
        let removed = self.repository.delete(donation_id).await?;
        debug!("Deleted donation {}", donation_id);
        Ok(removed)
    }

    fn get_stats(&self) -> Result<DonationStats> {
        let totals = self.repository.totals()?;
        let config = self.config_service.get()?;
        Ok(build_stats(
            totals.total_amount,
            totals.donation_count,
            config.goal_amount,
            &config.menorah_segments,
        ))
    }

    /// Full catalogue cross-referenced against live donations: per word,
    /// whether it is taken and by whom.
    fn get_premium_words(&self) -> Result<Vec<PremiumWordStatus>> {
        let all_donations = self.repository.list()?;

        Ok(PREMIUM_WORDS
            .iter()
            .map(|word| {
                let holder = all_donations
                    .iter()
                    .find(|d| d.premium_word_id.as_deref() == Some(word.id));
                PremiumWordStatus {
                    id: word.id,
                    word: word.word,
                    tier: word.tier,
                    available: holder.is_none(),
                    donor_name: holder.map(|d| format!("{} {}", d.first_name, d.last_name)),
                }
            })
            .collect())
    }
}
