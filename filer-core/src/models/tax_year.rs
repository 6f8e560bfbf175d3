use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fiscal years with a built-in slab schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaxYear {
    Y2019,
    Y2020,
    Y2021,
    Y2022,
    Y2023,
    Y2024,
    Y2025,
    Y2026,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported tax year '{0}' (supported: 2019-2026)")]
pub struct ParseTaxYearError(pub String);

impl TaxYear {
    /// Every supported year, oldest first.
    pub const ALL: [TaxYear; 8] = [
        Self::Y2019,
        Self::Y2020,
        Self::Y2021,
        Self::Y2022,
        Self::Y2023,
        Self::Y2024,
        Self::Y2025,
        Self::Y2026,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Y2019 => "2019",
            Self::Y2020 => "2020",
            Self::Y2021 => "2021",
            Self::Y2022 => "2022",
            Self::Y2023 => "2023",
            Self::Y2024 => "2024",
            Self::Y2025 => "2025",
            Self::Y2026 => "2026",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|year| year.as_str() == s.trim())
    }

    /// Human label for the fiscal year the schedule applies to, e.g. `FY 2024-25`.
    pub fn fiscal_label(&self) -> String {
        let end: u16 = self.as_str().parse().unwrap_or_default();
        format!("FY {}-{:02}", end - 1, end % 100)
    }
}

impl fmt::Display for TaxYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxYear {
    type Err = ParseTaxYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseTaxYearError(s.to_string()))
    }
}

impl TryFrom<String> for TaxYear {
    type Error = ParseTaxYearError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaxYear> for String {
    fn from(year: TaxYear) -> Self {
        year.as_str().to_string()
    }
}
