//! Column resolution.
//!
//! Input files name the same concept in many ways ("Confirmed",
//! "Total Cases", ...). Each [`LogicalField`] carries an ordered list of
//! aliases which is matched case-insensitively against the actual headers.

use crate::error::{InsightsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// A semantic field of the dataset, independent of its header spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    Country,
    Confirmed,
    Deaths,
    Recovered,
    Active,
    Region,
}

impl LogicalField {
    /// All fields, in resolution order.
    pub const ALL: [LogicalField; 6] = [
        Self::Country,
        Self::Confirmed,
        Self::Deaths,
        Self::Recovered,
        Self::Active,
        Self::Region,
    ];

    /// Candidate header names, most preferred first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Country => &["Country/Region", "Country", "Location", "location", "Country_Name"],
            Self::Confirmed => &["Confirmed", "TotalConfirmed", "Total Cases", "Total_Cases", "Cases"],
            Self::Deaths => &["Deaths", "TotalDeaths", "Total Deaths", "Total_Deaths"],
            Self::Recovered => &["Recovered", "TotalRecovered", "Total Recovered", "Total_Recovered"],
            Self::Active => &["Active", "Active Cases", "Active_Cases"],
            Self::Region => &["WHO Region", "Region"],
        }
    }

    /// Whether the analysis cannot proceed without this field.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Country | Self::Confirmed | Self::Deaths)
    }

    /// Lowercase name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Confirmed => "confirmed",
            Self::Deaths => "deaths",
            Self::Recovered => "recovered",
            Self::Active => "active",
            Self::Region => "region",
        }
    }
}

/// Return the actual header matching the first candidate, ignoring case.
///
/// Candidates are tried in order; the first one present wins. If two headers
/// differ only in case, the later header shadows the earlier one.
pub fn pick_first_matching<S: AsRef<str>>(headers: &[S], candidates: &[&str]) -> Option<String> {
    let lower: HashMap<String, &str> = headers
        .iter()
        .map(|h| (h.as_ref().to_lowercase(), h.as_ref()))
        .collect();

    candidates
        .iter()
        .find_map(|cand| lower.get(&cand.to_lowercase()))
        .map(|h| h.to_string())
}

/// Headers resolved for every logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColumns {
    pub country: String,
    pub confirmed: String,
    pub deaths: String,
    pub recovered: Option<String>,
    pub active: Option<String>,
    pub region: Option<String>,
}

impl ResolvedColumns {
    /// The header backing a logical field, if it resolved.
    pub fn get(&self, field: LogicalField) -> Option<&str> {
        match field {
            LogicalField::Country => Some(&self.country),
            LogicalField::Confirmed => Some(&self.confirmed),
            LogicalField::Deaths => Some(&self.deaths),
            LogicalField::Recovered => self.recovered.as_deref(),
            LogicalField::Active => self.active.as_deref(),
            LogicalField::Region => self.region.as_deref(),
        }
    }

    /// Resolved count columns (confirmed, deaths, then the optional ones).
    pub fn numeric_columns(&self) -> Vec<&str> {
        [
            LogicalField::Confirmed,
            LogicalField::Deaths,
            LogicalField::Recovered,
            LogicalField::Active,
        ]
        .into_iter()
        .filter_map(|field| self.get(field))
        .collect()
    }
}

/// Resolve every logical field against the table headers.
///
/// # Errors
///
/// Returns [`InsightsError::MissingRequiredColumns`] when country, confirmed
/// or deaths has no matching header.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> Result<ResolvedColumns> {
    let pick = |field: LogicalField| {
        let found = pick_first_matching(headers, field.aliases());
        match &found {
            Some(header) => debug!("Resolved {} -> '{}'", field.name(), header),
            None if !field.is_required() => info!("Optional field '{}' not present", field.name()),
            None => {}
        }
        found
    };

    let country = pick(LogicalField::Country);
    let confirmed = pick(LogicalField::Confirmed);
    let deaths = pick(LogicalField::Deaths);
    let recovered = pick(LogicalField::Recovered);
    let active = pick(LogicalField::Active);
    let region = pick(LogicalField::Region);

    match (country, confirmed, deaths) {
        (Some(country), Some(confirmed), Some(deaths)) => Ok(ResolvedColumns {
            country,
            confirmed,
            deaths,
            recovered,
            active,
            region,
        }),
        (country, confirmed, deaths) => Err(InsightsError::MissingRequiredColumns {
            country,
            confirmed,
            deaths,
            available: headers.iter().map(|h| h.as_ref().to_string()).collect(),
        }),
    }
}
