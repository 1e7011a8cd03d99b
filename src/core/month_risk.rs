//! Month risk lookup.
//!
//! Turns the list of month settings into a (year, month) keyed map of risk
//! flags. Months without a setting are ordinary. Settings whose (year, month)
//! does not name a calendar month are skipped, reported, and their month is
//! treated as ordinary.

use crate::{core::month_setting::validate_month, entities::month_setting};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// A calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MonthKey {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
}

impl MonthKey {
    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Risk flags for one month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MonthRisk {
    /// Month flagged critical
    pub critical: bool,
    /// Month flagged low income
    pub low_income: bool,
}

/// A month setting that was ignored because its (year, month) is invalid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InvalidMonthSetting {
    /// Id of the offending setting
    pub id: i64,
    /// Stored year
    pub year: i32,
    /// Stored month
    pub month: i32,
}

/// Constant-time lookup of month risk flags.
#[derive(Debug, Default, Clone)]
pub struct MonthRiskIndex {
    risks: HashMap<MonthKey, MonthRisk>,
    invalid: Vec<InvalidMonthSetting>,
}

impl MonthRiskIndex {
    /// Builds the index in one pass. When several settings share a month the
    /// first one wins.
    #[must_use]
    pub fn build(settings: &[month_setting::Model]) -> Self {
        let mut index = Self::default();

        for setting in settings {
            match validate_month(setting.year, setting.month) {
                Ok(first_day) => {
                    index
                        .risks
                        .entry(MonthKey::of(first_day))
                        .or_insert(MonthRisk {
                            critical: setting.critical,
                            low_income: setting.low_income,
                        });
                }
                Err(e) => {
                    warn!("Ignoring month setting {}: {e}", setting.id);
                    index.invalid.push(InvalidMonthSetting {
                        id: setting.id,
                        year: setting.year,
                        month: setting.month,
                    });
                }
            }
        }

        index
    }

    /// Risk flags for `key`; ordinary when no setting exists.
    #[must_use]
    pub fn lookup(&self, key: MonthKey) -> MonthRisk {
        self.risks.get(&key).copied().unwrap_or_default()
    }

    /// Risk flags for the month containing `date`.
    #[must_use]
    pub fn risk_for(&self, date: NaiveDate) -> MonthRisk {
        self.lookup(MonthKey::of(date))
    }

    /// Settings that were skipped during [`MonthRiskIndex::build`].
    #[must_use]
    pub fn invalid_settings(&self) -> &[InvalidMonthSetting] {
        &self.invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_missing_month_is_ordinary() {
        let index = MonthRiskIndex::build(&[]);
        assert_eq!(index.risk_for(date(2024, 5, 3)), MonthRisk::default());
        assert!(index.invalid_settings().is_empty());
    }

    #[test]
    fn test_flags_are_independent() {
        let settings = vec![
            month_setting_model(1, 2024, 3, true, false),
            month_setting_model(2, 2024, 4, false, true),
            month_setting_model(3, 2024, 5, true, true),
        ];
        let index = MonthRiskIndex::build(&settings);

        assert_eq!(
            index.risk_for(date(2024, 3, 31)),
            MonthRisk {
                critical: true,
                low_income: false
            }
        );
        assert_eq!(
            index.risk_for(date(2024, 4, 1)),
            MonthRisk {
                critical: false,
                low_income: true
            }
        );
        assert_eq!(
            index.lookup(MonthKey { year: 2024, month: 5 }),
            MonthRisk {
                critical: true,
                low_income: true
            }
        );
        // Same month, different year
        assert_eq!(index.risk_for(date(2025, 3, 1)), MonthRisk::default());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let settings = vec![
            month_setting_model(1, 2024, 3, true, false),
            month_setting_model(2, 2024, 3, false, true),
        ];
        let index = MonthRiskIndex::build(&settings);

        assert_eq!(
            index.risk_for(date(2024, 3, 10)),
            MonthRisk {
                critical: true,
                low_income: false
            }
        );
    }

    #[test]
    fn test_invalid_settings_are_reported_not_applied() {
        let settings = vec![
            month_setting_model(7, 2024, 13, true, true),
            month_setting_model(8, 2024, 0, true, true),
            month_setting_model(9, 2024, 6, false, true),
        ];
        let index = MonthRiskIndex::build(&settings);

        assert_eq!(
            index.invalid_settings(),
            &[
                InvalidMonthSetting {
                    id: 7,
                    year: 2024,
                    month: 13
                },
                InvalidMonthSetting {
                    id: 8,
                    year: 2024,
                    month: 0
                },
            ]
        );
        assert!(index.risk_for(date(2024, 6, 1)).low_income);
        assert_eq!(index.risk_for(date(2024, 12, 1)), MonthRisk::default());
    }
}
