use std::collections::BTreeMap;
use std::io::Read;

use filer_core::{ScheduleError, TaxSchedule, TaxSlab, TaxYear};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a slab schedule.
#[derive(Debug, Error)]
pub enum SlabLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unsupported tax year '{0}'")]
    UnsupportedYear(String),

    #[error("Invalid schedule for {year}: {source}")]
    Schedule {
        year: TaxYear,
        #[source]
        source: ScheduleError,
    },
}

impl From<csv::Error> for SlabLoaderError {
    fn from(err: csv::Error) -> Self {
        SlabLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a slab CSV file.
///
/// - `tax_year`: fiscal year the slab belongs to (e.g. 2025)
/// - `upper_bound`: top of the slab; empty for the last, unbounded slab
/// - `base_tax`: tax owed on everything below the slab
/// - `rate`: marginal rate as a percentage (e.g. 15 for 15%)
///
/// Amounts may carry thousands separators (`"1,200,000"`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SlabRecord {
    pub tax_year: String,
    #[serde(deserialize_with = "deserialize_optional_amount")]
    pub upper_bound: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub base_tax: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub rate: Decimal,
}

impl From<&SlabRecord> for TaxSlab {
    fn from(record: &SlabRecord) -> Self {
        TaxSlab {
            upper_bound: record.upper_bound,
            base_tax: record.base_tax,
            marginal_rate: record.rate,
        }
    }
}

fn parse_amount(s: &str) -> Result<Decimal, rust_decimal::Error> {
    s.trim().replace(',', "").parse()
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_amount(&s).map_err(serde::de::Error::custom)
}

fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_amount(&s).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Reads custom slab schedules from CSV.
///
/// Rows are grouped by `tax_year` in file order; each group must form a
/// valid [`TaxSchedule`] on its own.
pub struct SlabScheduleLoader;

impl SlabScheduleLoader {
    /// Parse raw records without grouping or validation.
    pub fn parse_records<R: Read>(reader: R) -> Result<Vec<SlabRecord>, SlabLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate every schedule in the file.
    pub fn parse<R: Read>(reader: R) -> Result<BTreeMap<TaxYear, TaxSchedule>, SlabLoaderError> {
        let records = Self::parse_records(reader)?;

        let mut grouped: BTreeMap<TaxYear, Vec<TaxSlab>> = BTreeMap::new();
        for record in &records {
            let year = TaxYear::parse(&record.tax_year)
                .ok_or_else(|| SlabLoaderError::UnsupportedYear(record.tax_year.clone()))?;
            grouped.entry(year).or_default().push(record.into());
        }

        grouped
            .into_iter()
            .map(|(year, slabs)| {
                TaxSchedule::new(slabs)
                    .map(|schedule| (year, schedule))
                    .map_err(|source| SlabLoaderError::Schedule { year, source })
            })
            .collect()
    }
}
