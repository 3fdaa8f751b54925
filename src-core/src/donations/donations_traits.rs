use crate::donations::donations_model::{
    Donation, DonationChanges, DonationTotals, NewDonation,
};
use crate::donations::premium_words::PremiumWordStatus;
use crate::donations::{CreateDonationRequest, DonationUpdate};
use crate::errors::Result;
use crate::stats::DonationStats;
use async_trait::async_trait;

/// Trait for donation repository operations.
///
/// Mutations run on the single-writer actor; the premium-word uniqueness
/// check happens inside the same transaction as the write.
#[async_trait]
pub trait DonationRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Donation>>;
    fn find_by_id(&self, donation_id: i32) -> Result<Option<Donation>>;
    fn totals(&self) -> Result<DonationTotals>;
    async fn insert(&self, new_donation: NewDonation) -> Result<Donation>;
    async fn update(&self, donation_id: i32, changes: DonationChanges) -> Result<Donation>;
    async fn delete(&self, donation_id: i32) -> Result<Donation>;
}

/// Trait for donation service operations
#[async_trait]
pub trait DonationServiceTrait: Send + Sync {
    fn get_all(&self) -> Result<Vec<Donation>>;
    fn get_by_id(&self, donation_id: i32) -> Result<Donation>;
    async fn create(&self, request: CreateDonationRequest) -> Result<Donation>;
    async fn update(&self, donation_id: i32, request: DonationUpdate) -> Result<Donation>;
    async fn delete(&self, donation_id: i32) -> Result<Donation>;
    fn get_stats(&self) -> Result<DonationStats>;
    fn get_premium_words(&self) -> Result<Vec<PremiumWordStatus>>;
}
