use crate::donations::donations_model::*;
use crate::errors::Error;

fn create_request(first: &str, last: &str, amount: f64) -> CreateDonationRequest {
    CreateDonationRequest {
        first_name: first.to_string(),
        last_name: last.to_string(),
        amount,
        email: None,
        phone: None,
        reference: None,
        premium_word_id: None,
    }
}

#[test]
fn names_are_trimmed_and_capped() {
    let long = "x".repeat(150);
    let request = create_request(&format!("  {} ", long), "Levi", 1800.0);
    let input = request.validated().unwrap();
    assert_eq!(input.first_name.chars().count(), MAX_NAME_LEN);
    assert_eq!(input.last_name, "Levi");
}

#[test]
fn blank_name_fails_validation() {
    let request = create_request("   ", "Levi", 1800.0);
    assert!(matches!(request.validated(), Err(Error::Validation(_))));
}

#[test]
fn amount_is_floored() {
    let input = create_request("Dina", "Katz", 1800.75).validated().unwrap();
    assert_eq!(input.amount, 1800);
}

#[test]
fn non_positive_amounts_fail() {
    for amount in [0.0, -5.0, 0.9, f64::NAN] {
        let result = create_request("Dina", "Katz", amount).validated();
        assert!(matches!(result, Err(Error::Validation(_))), "{}", amount);
    }
}

#[test]
fn email_shape_is_enforced_when_present() {
    let mut request = create_request("Dina", "Katz", 1800.0);
    request.email = Some("dina@example.org".to_string());
    assert_eq!(
        request.clone().validated().unwrap().email,
        Some("dina@example.org".to_string())
    );

    request.email = Some("not-an-email".to_string());
    assert!(matches!(request.validated(), Err(Error::Validation(_))));
}

#[test]
fn empty_optional_fields_normalize_to_none() {
    let mut request = create_request("Dina", "Katz", 1800.0);
    request.reference = Some("   ".to_string());
    request.email = Some("".to_string());
    let input = request.validated().unwrap();
    assert_eq!(input.reference, None);
    assert_eq!(input.email, None);
}

#[test]
fn update_marks_only_present_fields() {
    let update = DonationUpdate {
        reference: Some("in memory of".to_string()),
        ..Default::default()
    };
    let changes = update.validated().unwrap();
    assert!(changes.first_name.is_none());
    assert!(changes.amount.is_none());
    assert_eq!(changes.reference, Some(Some("in memory of".to_string())));
}

#[test]
fn update_empty_string_clears_optional_field() {
    let update = DonationUpdate {
        reference: Some("".to_string()),
        phone: Some("  ".to_string()),
        ..Default::default()
    };
    let changes = update.validated().unwrap();
    assert_eq!(changes.reference, Some(None));
    assert_eq!(changes.phone, Some(None));
}

#[test]
fn update_rejects_blank_required_name() {
    let update = DonationUpdate {
        first_name: Some("  ".to_string()),
        ..Default::default()
    };
    assert!(matches!(update.validated(), Err(Error::Validation(_))));
}

#[test]
fn empty_update_is_detected() {
    let changes = DonationUpdate::default().validated().unwrap();
    assert!(changes.is_empty());
}
