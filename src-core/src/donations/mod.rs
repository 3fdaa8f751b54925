//! Donations module - the authoritative ledger, its validation rules, and
//! the premium-word allocator.

mod donations_model;
mod donations_repository;
mod donations_service;
mod donations_traits;
mod premium_words;

#[cfg(test)]
mod donations_model_tests;


pub use donations_model::{
    CreateDonationRequest, Donation, DonationChanges, DonationTotals, DonationUpdate,
    NewDonation, ValidatedDonation, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PHONE_LEN,
    MAX_REFERENCE_LEN,
};
pub use donations_repository::DonationRepository;
pub use donations_service::DonationService;
pub use donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
pub use premium_words::{
    resolve_candidate, tier_for_amount, word_by_id, PremiumTier, PremiumWord, PremiumWordStatus,
    PREMIUM_TIERS, PREMIUM_WORDS,
};
