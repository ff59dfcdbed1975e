use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the twelve fixed months.
///
/// The wire labels are the Spanish names legacy documents were written with;
/// serde uses them for both values and map keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Month {
    #[serde(rename = "Enero")]
    January,
    #[serde(rename = "Febrero")]
    February,
    #[serde(rename = "Marzo")]
    March,
    #[serde(rename = "Abril")]
    April,
    #[serde(rename = "Mayo")]
    May,
    #[serde(rename = "Junio")]
    June,
    #[serde(rename = "Julio")]
    July,
    #[serde(rename = "Agosto")]
    August,
    #[serde(rename = "Septiembre")]
    September,
    #[serde(rename = "Octubre")]
    October,
    #[serde(rename = "Noviembre")]
    November,
    #[serde(rename = "Diciembre")]
    December,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based position in the calendar sequence.
    pub fn index(self) -> usize {
        Month::ALL
            .iter()
            .position(|month| *month == self)
            .unwrap_or(0)
    }

    /// The following month, or `None` for December. Transfers do not wrap
    /// into the next year.
    pub fn next(self) -> Option<Month> {
        Month::ALL.get(self.index() + 1).copied()
    }

    /// The wire label (Spanish month name).
    pub fn label(self) -> &'static str {
        match self {
            Month::January => "Enero",
            Month::February => "Febrero",
            Month::March => "Marzo",
            Month::April => "Abril",
            Month::May => "Mayo",
            Month::June => "Junio",
            Month::July => "Julio",
            Month::August => "Agosto",
            Month::September => "Septiembre",
            Month::October => "Octubre",
            Month::November => "Noviembre",
            Month::December => "Diciembre",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Month::ALL
            .iter()
            .find(|month| month.label().eq_ignore_ascii_case(needle))
            .copied()
            .ok_or_else(|| format!("unknown month `{}`", value))
    }
}
