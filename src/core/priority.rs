//! Invoice priority scoring.
//!
//! A score is the invoice's baseline priority plus bonuses for urgency, amount
//! and month risk. Scores have no upper bound; they are only compared with
//! each other.

use crate::{core::month_risk::MonthRisk, entities::invoice};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Bonus for how soon the invoice is due. Past-due counts as most urgent.
#[must_use]
pub const fn urgency_bonus(days_until_due: i64) -> i32 {
    match days_until_due {
        i64::MIN..=2 => 5,
        3..=5 => 3,
        6..=10 => 1,
        _ => 0,
    }
}

/// Bonus for large amounts.
#[must_use]
pub fn amount_bonus(amount: Decimal) -> i32 {
    if amount > dec!(1000) {
        3
    } else if amount > dec!(500) {
        2
    } else if amount > dec!(100) {
        1
    } else {
        0
    }
}

/// Bonus for the due month's risk flags. Both flags add up.
#[must_use]
pub const fn risk_bonus(risk: MonthRisk) -> i32 {
    let mut bonus = 0;
    if risk.critical {
        bonus += 3;
    }
    if risk.low_income {
        bonus += 2;
    }
    bonus
}

/// Scores `invoice` as of `today`, given the risk of its due month.
#[must_use]
pub fn score(invoice: &invoice::Model, risk: MonthRisk, today: NaiveDate) -> i32 {
    let days_until_due = (invoice.due_date - today).num_days();

    invoice
        .priority
        .max(0)
        .saturating_add(urgency_bonus(days_until_due))
        .saturating_add(amount_bonus(invoice.amount))
        .saturating_add(risk_bonus(risk))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_urgency_tiers() {
        assert_eq!(urgency_bonus(-30), 5);
        assert_eq!(urgency_bonus(0), 5);
        assert_eq!(urgency_bonus(2), 5);
        assert_eq!(urgency_bonus(3), 3);
        assert_eq!(urgency_bonus(5), 3);
        assert_eq!(urgency_bonus(6), 1);
        assert_eq!(urgency_bonus(10), 1);
        assert_eq!(urgency_bonus(11), 0);
    }

    #[test]
    fn test_amount_tiers() {
        assert_eq!(amount_bonus(dec!(0)), 0);
        assert_eq!(amount_bonus(dec!(100)), 0);
        assert_eq!(amount_bonus(dec!(100.01)), 1);
        assert_eq!(amount_bonus(dec!(500)), 1);
        assert_eq!(amount_bonus(dec!(600)), 2);
        assert_eq!(amount_bonus(dec!(1000)), 2);
        assert_eq!(amount_bonus(dec!(1500)), 3);
    }

    #[test]
    fn test_risk_bonus_is_additive() {
        assert_eq!(risk_bonus(MonthRisk::default()), 0);
        assert_eq!(
            risk_bonus(MonthRisk {
                critical: true,
                low_income: false
            }),
            3
        );
        assert_eq!(
            risk_bonus(MonthRisk {
                critical: false,
                low_income: true
            }),
            2
        );
        assert_eq!(
            risk_bonus(MonthRisk {
                critical: true,
                low_income: true
            }),
            5
        );
    }

    #[test]
    fn test_score_sums_baseline_and_bonuses() {
        let today = date(2024, 3, 4);
        let mut invoice = invoice_model(1, dec!(750), date(2024, 3, 8));
        invoice.priority = 4;

        let risk = MonthRisk {
            critical: true,
            low_income: true,
        };
        // 4 baseline + 3 urgency + 2 amount + 5 risk
        assert_eq!(score(&invoice, risk, today), 14);
    }

    #[test]
    fn test_past_due_is_most_urgent() {
        let today = date(2024, 3, 4);
        let invoice = invoice_model(1, dec!(0), date(2024, 1, 1));
        assert_eq!(score(&invoice, MonthRisk::default(), today), 5);
    }

    #[test]
    fn test_score_is_monotonic_in_due_date() {
        let today = date(2024, 3, 4);
        let mut previous = i32::MAX;
        for offset in -3..40 {
            let due = today + chrono::Duration::days(offset);
            let current = score(&invoice_model(1, dec!(250), due), MonthRisk::default(), today);
            assert!(current <= previous, "score rose at offset {offset}");
            previous = current;
        }
    }

    #[test]
    fn test_large_baseline_saturates() {
        let today = date(2024, 3, 4);
        let mut invoice = invoice_model(1, dec!(5000), today);
        invoice.priority = i32::MAX;
        assert_eq!(score(&invoice, MonthRisk::default(), today), i32::MAX);
    }
}
