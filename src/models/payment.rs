use serde::Serialize;

use super::Donation;

/// How a donation was made. Decides which ledger row is active and whether a
/// received/due breakdown applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationMode {
    Cash,
    Goods,
    Service,
}

impl DonationMode {
    /// Lowercases the stored mode; absent, blank or unrecognised values are
    /// cash.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("goods") => DonationMode::Goods,
            Some("service") | Some("services") => DonationMode::Service,
            _ => DonationMode::Cash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashBreakdown {
    pub received_amount: f64,
    pub due_amount: f64,
    pub is_paid_in_full: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentState {
    pub mode: DonationMode,
    /// Only computed for cash donations.
    pub cash: Option<CashBreakdown>,
}

/// Status annotation printed on a cash receipt with a non-zero amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentStatus {
    PaidInFull,
    Pending { due: f64 },
}

impl PaymentState {
    pub fn derive(donation: &Donation) -> Self {
        let mode = DonationMode::parse(donation.donation_mode.as_deref());

        let cash = (mode == DonationMode::Cash).then(|| {
            let received_amount = donation.received_amount.unwrap_or(0.0);
            let due_amount = (donation.amount - received_amount).max(0.0);
            CashBreakdown {
                received_amount,
                due_amount,
                is_paid_in_full: due_amount == 0.0 && donation.amount > 0.0,
            }
        });

        tracing::debug!(
            donation_id = %donation.id,
            ?mode,
            due = cash.map(|c| c.due_amount),
            "derived payment state"
        );

        PaymentState { mode, cash }
    }

    pub fn is_paid_in_full(&self) -> bool {
        self.cash.map_or(false, |c| c.is_paid_in_full)
    }

    /// `None` for goods/service donations and for zero-value cash records.
    pub fn status(&self, amount: f64) -> Option<PaymentStatus> {
        let cash = self.cash?;
        if amount <= 0.0 {
            return None;
        }
        if self.is_paid_in_full() {
            Some(PaymentStatus::PaidInFull)
        } else {
            Some(PaymentStatus::Pending { due: cash.due_amount })
        }
    }
}

impl Donation {
    pub fn payment_state(&self) -> PaymentState {
        PaymentState::derive(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cash(amount: f64, received: Option<f64>) -> Donation {
        Donation {
            id: "d1".to_string(),
            amount,
            received_amount: received,
            donation_mode: Some("cash".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn absent_or_blank_mode_is_cash() {
        assert_eq!(DonationMode::parse(None), DonationMode::Cash);
        assert_eq!(DonationMode::parse(Some("")), DonationMode::Cash);
        assert_eq!(DonationMode::parse(Some("  ")), DonationMode::Cash);
        let donation = Donation { amount: 10.0, ..Default::default() };
        assert_eq!(donation.payment_state().mode, DonationMode::Cash);
    }

    #[test]
    fn mode_is_case_insensitive() {
        assert_eq!(DonationMode::parse(Some("GOODS")), DonationMode::Goods);
        assert_eq!(DonationMode::parse(Some("Service")), DonationMode::Service);
        assert_eq!(DonationMode::parse(Some("Cash")), DonationMode::Cash);
    }

    #[test]
    fn untracked_received_amount_counts_as_nothing_received() {
        let state = cash(500.0, None).payment_state();
        let breakdown = state.cash.unwrap();
        assert_eq!(breakdown.received_amount, 0.0);
        assert_eq!(breakdown.due_amount, 500.0);
        assert!(!breakdown.is_paid_in_full);
    }

    #[test]
    fn due_is_clamped_when_overpaid() {
        let breakdown = cash(1000.0, Some(1500.0)).payment_state().cash.unwrap();
        assert_eq!(breakdown.due_amount, 0.0);
        assert!(breakdown.is_paid_in_full);
    }

    #[test]
    fn due_plus_received_reconstructs_amount() {
        for (amount, received) in [(10000.0, 4000.0), (5001.0, 5001.0), (250.0, 0.0)] {
            let breakdown = cash(amount, Some(received)).payment_state().cash.unwrap();
            assert_eq!(breakdown.due_amount, amount - received);
            assert_eq!(breakdown.due_amount + breakdown.received_amount, amount);
        }
    }

    #[test]
    fn zero_amount_is_never_paid_in_full() {
        let state = cash(0.0, Some(0.0)).payment_state();
        assert!(!state.is_paid_in_full());
        assert_eq!(state.status(0.0), None);
    }

    #[test]
    fn status_reports_pending_due() {
        let donation = cash(10000.0, Some(4000.0));
        let state = donation.payment_state();
        assert_eq!(state.status(donation.amount), Some(PaymentStatus::Pending { due: 6000.0 }));
    }

    #[test]
    fn goods_and_service_have_no_breakdown() {
        for mode in ["goods", "service"] {
            let donation = Donation {
                amount: 300.0,
                donation_mode: Some(mode.to_string()),
                ..Default::default()
            };
            let state = donation.payment_state();
            assert!(state.cash.is_none());
            assert!(!state.is_paid_in_full());
            assert_eq!(state.status(donation.amount), None);
        }
    }
}
