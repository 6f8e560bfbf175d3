//! Slab-by-slab evaluation of a progressive schedule.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use filer_core::TaxYear;
//! use filer_core::calculations::{annualize_monthly, calculate_tax};
//!
//! let annual = annualize_monthly(dec!(200000));
//! assert_eq!(calculate_tax(TaxYear::Y2025, annual), dec!(230000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{floor_to_unit, max, percent_of};
use crate::models::{TaxSchedule, TaxYear};

/// Tax owed on `annual_income` under the built-in schedule for `year`,
/// truncated to a whole currency unit.
///
/// Income at or below zero owes nothing.
pub fn calculate_tax(year: TaxYear, annual_income: Decimal) -> Decimal {
    TaxSchedule::for_year(year).calculate(annual_income)
}

/// Converts a monthly amount to the annual figure the engine expects.
pub fn annualize_monthly(monthly_income: Decimal) -> Decimal {
    monthly_income * Decimal::from(12)
}

/// Detail of one evaluation, for previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub annual_income: Decimal,
    pub tax: Decimal,
    /// Index of the slab the income falls in.
    pub slab_index: usize,
    pub marginal_rate: Decimal,
    /// `tax / income` as a percentage with two decimals; zero for zero income.
    pub effective_rate: Decimal,
    /// Annual tax spread over twelve months, floored.
    pub monthly_tax: Decimal,
    pub net_income: Decimal,
}

impl TaxSchedule {
    /// Finds the slab containing `income` and applies its base tax and
    /// marginal rate to the portion above the previous bound.
    pub fn calculate(&self, annual_income: Decimal) -> Decimal {
        self.locate(annual_income)
            .map(|(_, tax)| tax)
            .unwrap_or(Decimal::ZERO)
    }

    /// Independent evaluation that integrates each slab's marginal rate over
    /// the part of `annual_income` it covers, ignoring `base_tax`.
    pub fn reference_tax(&self, annual_income: Decimal) -> Decimal {
        let income = max(annual_income, Decimal::ZERO);
        let mut lower = Decimal::ZERO;
        let mut total = Decimal::ZERO;

        for slab in self.slabs() {
            if income <= lower {
                break;
            }
            let upper = slab.upper_bound.map_or(income, |bound| bound.min(income));
            total += percent_of(upper - lower, slab.marginal_rate);
            match slab.upper_bound {
                Some(bound) => lower = bound,
                None => break,
            }
        }

        floor_to_unit(total)
    }

    pub fn breakdown(&self, annual_income: Decimal) -> TaxBreakdown {
        let (slab_index, tax) = self.locate(annual_income).unwrap_or((0, Decimal::ZERO));
        let effective_rate = if annual_income > Decimal::ZERO {
            (tax / annual_income * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ZERO
        };

        TaxBreakdown {
            annual_income,
            tax,
            slab_index,
            marginal_rate: self
                .slabs()
                .get(slab_index)
                .map_or(Decimal::ZERO, |s| s.marginal_rate),
            effective_rate,
            monthly_tax: floor_to_unit(tax / Decimal::from(12)),
            net_income: annual_income - tax,
        }
    }

    fn locate(&self, annual_income: Decimal) -> Option<(usize, Decimal)> {
        if annual_income <= Decimal::ZERO {
            return Some((0, Decimal::ZERO));
        }

        let mut lower = Decimal::ZERO;
        for (index, slab) in self.slabs().iter().enumerate() {
            match slab.upper_bound {
                Some(upper) if annual_income > upper => lower = upper,
                _ => {
                    let tax = slab.base_tax + percent_of(annual_income - lower, slab.marginal_rate);
                    return Some((index, floor_to_unit(tax)));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // calculate_tax
    // =========================================================================

    #[test]
    fn zero_income_owes_nothing_in_every_year() {
        for year in TaxYear::ALL {
            assert_eq!(calculate_tax(year, Decimal::ZERO), Decimal::ZERO, "{year}");
        }
    }

    #[test]
    fn negative_income_owes_nothing() {
        assert_eq!(calculate_tax(TaxYear::Y2025, dec!(-50000)), Decimal::ZERO);
    }

    #[test]
    fn income_in_exempt_slab_owes_nothing() {
        assert_eq!(calculate_tax(TaxYear::Y2025, dec!(600000)), Decimal::ZERO);
    }

    #[test]
    fn monthly_two_hundred_thousand_in_2025() {
        let annual = annualize_monthly(dec!(200000));

        assert_eq!(annual, dec!(2400000));
        assert_eq!(calculate_tax(TaxYear::Y2025, annual), dec!(230000));
    }

    #[test]
    fn bound_itself_belongs_to_the_lower_slab() {
        // 1,200,000 is the top of the 5 % slab: (1,200,000 - 600,000) * 5 %
        assert_eq!(calculate_tax(TaxYear::Y2025, dec!(1200000)), dec!(30000));
    }

    #[test]
    fn top_slab_applies_above_last_bound() {
        // 700,000 + (5,000,000 - 4,100,000) * 35 %
        assert_eq!(calculate_tax(TaxYear::Y2025, dec!(5000000)), dec!(1015000));
    }

    #[test]
    fn fractional_result_is_floored() {
        // 2020: 195,000 + (2,500,001 - 2,500,000) * 17.5 % = 195,000.175
        assert_eq!(calculate_tax(TaxYear::Y2020, dec!(2500001)), dec!(195000));
    }

    #[test]
    fn fractional_income_is_accepted() {
        // 2023: (600,100.50 - 600,000) * 2.5 % = 2.5125
        assert_eq!(calculate_tax(TaxYear::Y2023, dec!(600100.50)), dec!(2));
    }

    #[test]
    fn corrected_2019_middle_slab() {
        // 8,000 + (1,000,000 - 800,000) * 5 %
        assert_eq!(calculate_tax(TaxYear::Y2019, dec!(1000000)), dec!(18000));
    }

    // =========================================================================
    // breakdown
    // =========================================================================

    #[test]
    fn breakdown_reports_slab_and_rates() {
        let schedule = TaxSchedule::for_year(TaxYear::Y2025);

        let breakdown = schedule.breakdown(dec!(2400000));

        assert_eq!(
            breakdown,
            TaxBreakdown {
                annual_income: dec!(2400000),
                tax: dec!(230000),
                slab_index: 3,
                marginal_rate: dec!(25),
                effective_rate: dec!(9.58),
                monthly_tax: dec!(19166),
                net_income: dec!(2170000),
            }
        );
    }

    #[test]
    fn breakdown_of_zero_income() {
        let breakdown = TaxSchedule::for_year(TaxYear::Y2022).breakdown(Decimal::ZERO);

        assert_eq!(breakdown.tax, Decimal::ZERO);
        assert_eq!(breakdown.slab_index, 0);
        assert_eq!(breakdown.effective_rate, Decimal::ZERO);
        assert_eq!(breakdown.monthly_tax, Decimal::ZERO);
        assert_eq!(breakdown.net_income, Decimal::ZERO);
    }

    // =========================================================================
    // properties
    // =========================================================================

    fn any_year() -> impl Strategy<Value = TaxYear> {
        prop::sample::select(TaxYear::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

        #[test]
        fn matches_reference_integration(year in any_year(), income in 0u64..20_000_000u64) {
            let schedule = TaxSchedule::for_year(year);
            let income = Decimal::from(income);

            prop_assert_eq!(schedule.calculate(income), schedule.reference_tax(income));
        }

        #[test]
        fn never_decreases_with_income(
            year in any_year(),
            low in 0u64..15_000_000u64,
            delta in 0u64..5_000_000u64,
        ) {
            let lower = calculate_tax(year, Decimal::from(low));
            let higher = calculate_tax(year, Decimal::from(low + delta));

            prop_assert!(lower <= higher, "{} > {} for {}", lower, higher, year);
        }

        #[test]
        fn matches_reference_with_paisa(year in any_year(), cents in 0i64..2_000_000_000i64) {
            let schedule = TaxSchedule::for_year(year);
            let income = Decimal::new(cents, 2);

            prop_assert_eq!(schedule.calculate(income), schedule.reference_tax(income));
        }
    }
}
