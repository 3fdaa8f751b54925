//! Static catalogue of premium naming slots. Immutable reference data: a
//! word is "used" while any live donation references it and becomes free the
//! moment that donation is deleted or re-tiered.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PremiumTier {
    pub tier: u8,
    pub amount: i64,
    pub slots: usize,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PremiumWord {
    pub id: &'static str,
    pub word: &'static str,
    pub tier: u8,
}

/// A catalogue word joined with its live allocation state.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PremiumWordStatus {
    pub id: &'static str,
    pub word: &'static str,
    pub tier: u8,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
}

pub const PREMIUM_TIERS: [PremiumTier; 3] = [
    PremiumTier {
        tier: 1,
        amount: 100_000,
        slots: 7,
    },
    PremiumTier {
        tier: 2,
        amount: 360_000,
        slots: 3,
    },
    PremiumTier {
        tier: 3,
        amount: 1_000_000,
        slots: 1,
    },
];

// Seven branch words, three crown words, one shamash.
pub const PREMIUM_WORDS: [PremiumWord; 11] = [
    PremiumWord { id: "chesed", word: "Chesed", tier: 1 },
    PremiumWord { id: "gevurah", word: "Gevurah", tier: 1 },
    PremiumWord { id: "tiferet", word: "Tiferet", tier: 1 },
    PremiumWord { id: "netzach", word: "Netzach", tier: 1 },
    PremiumWord { id: "hod", word: "Hod", tier: 1 },
    PremiumWord { id: "yesod", word: "Yesod", tier: 1 },
    PremiumWord { id: "malchut", word: "Malchut", tier: 1 },
    PremiumWord { id: "nes", word: "Nes", tier: 2 },
    PremiumWord { id: "gadol", word: "Gadol", tier: 2 },
    PremiumWord { id: "haya", word: "Haya", tier: 2 },
    PremiumWord { id: "shamash", word: "Shamash", tier: 3 },
];

pub fn tier_for_amount(amount: i64) -> Option<&'static PremiumTier> {
    PREMIUM_TIERS.iter().find(|t| t.amount == amount)
}

pub fn word_by_id(word_id: &str) -> Option<&'static PremiumWord> {
    PREMIUM_WORDS.iter().find(|w| w.id == word_id)
}

/// Resolves a candidate word id against the effective donation amount.
///
/// An amount matching no tier cannot carry a premium word, and a word from
/// the wrong tier is treated the same way: the candidate is silently
/// discarded rather than erroring. Empty candidates clear the slot.
pub fn resolve_candidate(candidate: Option<&str>, amount: i64) -> Option<String> {
    let word_id = candidate?.trim();
    if word_id.is_empty() {
        return None;
    }

    let tier = tier_for_amount(amount)?;
    let word = word_by_id(word_id)?;
    if word.tier == tier.tier {
        Some(word.id.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_matches_tier_slot_counts() {
        for tier in PREMIUM_TIERS {
            let words = PREMIUM_WORDS.iter().filter(|w| w.tier == tier.tier).count();
            assert_eq!(words, tier.slots, "tier {} slot count", tier.tier);
        }
    }

    #[test]
    fn exact_tier_amount_accepts_matching_word() {
        assert_eq!(
            resolve_candidate(Some("chesed"), 100_000),
            Some("chesed".to_string())
        );
        assert_eq!(
            resolve_candidate(Some("shamash"), 1_000_000),
            Some("shamash".to_string())
        );
    }

    #[test]
    fn wrong_tier_word_is_treated_as_absent() {
        // tier-1 word on a tier-2 amount
        assert_eq!(resolve_candidate(Some("chesed"), 360_000), None);
        // tier-3 word on a tier-1 amount
        assert_eq!(resolve_candidate(Some("shamash"), 100_000), None);
    }

    #[test]
    fn non_tier_amount_discards_any_word() {
        assert_eq!(resolve_candidate(Some("chesed"), 1_800), None);
    }

    #[test]
    fn unknown_or_empty_candidates_resolve_to_none() {
        assert_eq!(resolve_candidate(Some("no-such-word"), 100_000), None);
        assert_eq!(resolve_candidate(Some("  "), 100_000), None);
        assert_eq!(resolve_candidate(None, 100_000), None);
    }
}
