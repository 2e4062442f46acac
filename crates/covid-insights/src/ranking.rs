//! Row rankings and region aggregation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Indices of the `n` largest values, largest first.
///
/// The sort is stable, so rows with equal values keep their original order.
/// Rows without a value are never ranked.
pub fn top_n_by(values: &[Option<f64>], n: usize) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| v.map(|v| (idx, v)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(n).map(|(idx, _)| idx).collect()
}

/// Confirmed and death totals for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotal {
    pub region: String,
    pub confirmed: f64,
    pub deaths: f64,
}

/// Sum confirmed and deaths per region, regions in ascending name order.
///
/// Rows without a region are left out of every group.
pub fn region_totals(regions: &[Option<String>], confirmed: &[f64], deaths: &[f64]) -> Vec<RegionTotal> {
    let mut groups: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for ((region, c), d) in regions.iter().zip(confirmed).zip(deaths) {
        if let Some(region) = region {
            let entry = groups.entry(region.as_str()).or_default();
            entry.0 += c;
            entry.1 += d;
        }
    }

    groups
        .into_iter()
        .map(|(region, (confirmed, deaths))| RegionTotal {
            region: region.to_string(),
            confirmed,
            deaths,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_n_descending() {
        let values = [Some(5.0), Some(50.0), Some(20.0), Some(1.0)];
        assert_eq!(top_n_by(&values, 3), vec![1, 2, 0]);
    }

    #[test]
    fn test_top_n_ties_keep_row_order() {
        let values = [Some(7.0), Some(9.0), Some(7.0), Some(9.0), Some(7.0)];
        assert_eq!(top_n_by(&values, 5), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_top_n_skips_missing() {
        let values = [None, Some(3.0), None, Some(4.0)];
        assert_eq!(top_n_by(&values, 10), vec![3, 1]);
    }

    #[test]
    fn test_top_n_shorter_than_n() {
        assert_eq!(top_n_by(&[Some(1.0)], 10), vec![0]);
        assert!(top_n_by(&[], 10).is_empty());
    }

    #[test]
    fn test_region_totals_sorted_by_name() {
        let regions = [
            Some("Europe".to_string()),
            Some("Africa".to_string()),
            None,
            Some("Europe".to_string()),
        ];
        let totals = region_totals(&regions, &[10.0, 5.0, 99.0, 20.0], &[1.0, 0.0, 9.0, 2.0]);

        assert_eq!(
            totals,
            vec![
                RegionTotal { region: "Africa".to_string(), confirmed: 5.0, deaths: 0.0 },
                RegionTotal { region: "Europe".to_string(), confirmed: 30.0, deaths: 3.0 },
            ]
        );
    }
}
