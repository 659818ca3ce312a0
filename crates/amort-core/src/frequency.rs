use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanError;

/// Number of periods per year a rate, term or fee is quoted in.
///
/// Always passed by value alongside the quantity it scales; never read
/// from ambient configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Yearly,
    HalfYearly,
    Quarterly,
    Monthly,
    Fortnightly,
    Weekly,
    /// Arbitrary periods per year. Zero is representable here and is
    /// rejected at every division site.
    Custom(u32),
}

impl Frequency {
    pub fn per_year(self) -> u32 {
        match self {
            Frequency::Yearly => 1,
            Frequency::HalfYearly => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::Fortnightly => 26,
            Frequency::Weekly => 52,
            Frequency::Custom(n) => n,
        }
    }

    /// Map a periods-per-year count onto the named variant where one exists.
    pub fn from_per_year(n: u32) -> Self {
        match n {
            1 => Frequency::Yearly,
            2 => Frequency::HalfYearly,
            4 => Frequency::Quarterly,
            12 => Frequency::Monthly,
            26 => Frequency::Fortnightly,
            52 => Frequency::Weekly,
            n => Frequency::Custom(n),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Yearly => write!(f, "yearly"),
            Frequency::HalfYearly => write!(f, "half-yearly"),
            Frequency::Quarterly => write!(f, "quarterly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Fortnightly => write!(f, "fortnightly"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Custom(n) => write!(f, "{}/year", n),
        }
    }
}

impl FromStr for Frequency {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yearly" | "annual" | "annually" => Ok(Frequency::Yearly),
            "half-yearly" | "half_yearly" | "semiannual" => Ok(Frequency::HalfYearly),
            "quarterly" => Ok(Frequency::Quarterly),
            "monthly" => Ok(Frequency::Monthly),
            "fortnightly" => Ok(Frequency::Fortnightly),
            "weekly" => Ok(Frequency::Weekly),
            other => other
                .parse::<u32>()
                .map(Frequency::from_per_year)
                .map_err(|_| LoanError::InvalidInput {
                    field: "frequency".into(),
                    reason: format!(
                        "'{}' is not a named frequency or a periods-per-year count",
                        s
                    ),
                }),
        }
    }
}
