use serde::{Deserialize, Serialize};

/// A single contribution record as stored by the bookkeeping application.
///
/// Only `id` and `amount` are expected to be present on every record; the
/// remaining fields are optional and each has a documented fallback in the
/// receipt engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Donation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_english: Option<String>,
    #[serde(default)]
    pub amount: f64,
    /// `None` means "not yet tracked", which is distinct from zero received.
    #[serde(default)]
    pub received_amount: Option<f64>,
    #[serde(default)]
    pub category: DonationCategory,
    /// Sponsorship sub-type, or the item/service description for goods and
    /// service donations.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub donation_mode: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationCategory {
    #[default]
    Chanda,
    Sponsorship,
    #[serde(other)]
    Other,
}

impl Donation {
    /// Donor name as printed: English name, then the original-script name,
    /// then the literal "Donor".
    pub fn display_name(&self) -> &str {
        non_blank(&self.name_english)
            .or_else(|| non_blank(&self.name))
            .unwrap_or("Donor")
    }

    /// Item, service or sponsorship sub-type, if any.
    pub fn kind(&self) -> Option<&str> {
        non_blank(&self.kind)
    }

    pub fn is_sponsorship(&self) -> bool {
        self.category == DonationCategory::Sponsorship
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_english() {
        let donation = Donation {
            name: Some("రామ్".to_string()),
            name_english: Some("Ram Kumar".to_string()),
            ..Default::default()
        };
        assert_eq!(donation.display_name(), "Ram Kumar");
    }

    #[test]
    fn display_name_falls_back_through_blank_fields() {
        let donation = Donation {
            name: Some("రామ్".to_string()),
            name_english: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(donation.display_name(), "రామ్");
        assert_eq!(Donation::default().display_name(), "Donor");
    }

    #[test]
    fn deserializes_supabase_row() {
        let json = r#"{
            "id": "3f2a9c1e-0000-4000-8000-000000000000",
            "name": "Sita",
            "amount": 10000,
            "received_amount": null,
            "category": "sponsorship",
            "type": "Idol",
            "payment_method": "upi",
            "created_at": "2024-09-01T10:00:00+00:00",
            "festival_id": "ignored"
        }"#;
        let donation: Donation = serde_json::from_str(json).unwrap();
        assert_eq!(donation.amount, 10000.0);
        assert!(donation.received_amount.is_none());
        assert!(donation.is_sponsorship());
        assert_eq!(donation.kind(), Some("Idol"));
        assert!(donation.donation_mode.is_none());
    }

    #[test]
    fn unknown_category_is_not_sponsorship() {
        let donation: Donation =
            serde_json::from_str(r#"{"id": "x", "amount": 1, "category": "prasadam"}"#).unwrap();
        assert_eq!(donation.category, DonationCategory::Other);
        assert!(!donation.is_sponsorship());
    }
}
