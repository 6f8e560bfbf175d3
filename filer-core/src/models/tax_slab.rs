use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One bracket of a progressive schedule.
///
/// `marginal_rate` is a percentage (`17.5` means 17.5 %). `base_tax` is the
/// tax already owed on all income below the previous slab's upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Upper limit of the bracket; `None` for the top, unbounded bracket.
    pub upper_bound: Option<Decimal>,
    pub base_tax: Decimal,
    pub marginal_rate: Decimal,
}

impl TaxSlab {
    pub fn bounded(upper_bound: Decimal, base_tax: Decimal, marginal_rate: Decimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            base_tax,
            marginal_rate,
        }
    }

    pub fn unbounded(base_tax: Decimal, marginal_rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            base_tax,
            marginal_rate,
        }
    }
}

/// Ways a slab list can break the progressive-schedule invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("schedule has no slabs")]
    Empty,

    #[error("slab {index}: upper bound {bound} does not exceed the previous bound {previous}")]
    NonIncreasingBound {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("slab {0} is unbounded but is not the last slab")]
    UnboundedNotLast(usize),

    #[error("last slab must be unbounded")]
    MissingUnboundedSlab,

    #[error("slab {index}: base tax is {actual}, expected {expected}")]
    InconsistentBaseTax {
        index: usize,
        expected: Decimal,
        actual: Decimal,
    },

    #[error("slab {index}: marginal rate {rate} is outside 0..=100")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// Ordered slab list for a single tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxSchedule {
    slabs: Vec<TaxSlab>,
}

impl TaxSchedule {
    /// Build a schedule, checking every invariant.
    pub fn new(slabs: Vec<TaxSlab>) -> Result<Self, ScheduleError> {
        let schedule = Self { slabs };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Build a schedule from trusted static data without validating it.
    pub(crate) fn from_static(slabs: Vec<TaxSlab>) -> Self {
        Self { slabs }
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }

    /// Checks ordering, the single trailing unbounded slab, rate range, and
    /// that each `base_tax` equals the tax accumulated by the slabs below it.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.slabs.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let hundred = Decimal::ONE_HUNDRED;
        let last = self.slabs.len() - 1;
        let mut previous_bound = Decimal::ZERO;
        let mut expected_base = Decimal::ZERO;

        for (index, slab) in self.slabs.iter().enumerate() {
            if slab.marginal_rate < Decimal::ZERO || slab.marginal_rate > hundred {
                return Err(ScheduleError::RateOutOfRange {
                    index,
                    rate: slab.marginal_rate,
                });
            }

            if slab.base_tax != expected_base {
                return Err(ScheduleError::InconsistentBaseTax {
                    index,
                    expected: expected_base,
                    actual: slab.base_tax,
                });
            }

            match slab.upper_bound {
                Some(bound) => {
                    if bound <= previous_bound {
                        return Err(ScheduleError::NonIncreasingBound {
                            index,
                            bound,
                            previous: previous_bound,
                        });
                    }
                    expected_base += (bound - previous_bound) * slab.marginal_rate / hundred;
                    previous_bound = bound;
                }
                None if index != last => return Err(ScheduleError::UnboundedNotLast(index)),
                None => {}
            }
        }

        if self.slabs[last].upper_bound.is_some() {
            return Err(ScheduleError::MissingUnboundedSlab);
        }

        Ok(())
    }
}
