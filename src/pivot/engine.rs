//! The wide-format pivot.
//!
//! Observations arrive sparse (one tuple per period the upstream service
//! actually reported); the pivot projects them onto the full period axis,
//! one Value/Status row pair per series record and granularity band.

use std::collections::HashMap;

use crate::domain::period::{Granularity, PeriodLabel};
use crate::domain::types::{Attribute, OutputRow, SeriesRecord, WideTable};

/// Pivot `records` onto `axis`.
///
/// Per record and granularity band: the band is emitted only when at least
/// one of its value cells is non-empty, and always as a Value row
/// immediately followed by its Status row. Observations whose period falls
/// outside the axis are dropped. A later observation for the same period
/// overwrites an earlier one. Rows keep input record order, then the
/// Annual/Quarterly/Monthly band order within a record.
pub fn pivot(records: &[SeriesRecord], axis: &[PeriodLabel]) -> Vec<OutputRow> {
    let mut rows = Vec::new();

    for record in records {
        // Seeding every axis column lets map membership double as the
        // in-range test when observations are applied below.
        let mut values: HashMap<PeriodLabel, String> = HashMap::with_capacity(axis.len());
        let mut statuses: HashMap<PeriodLabel, String> = HashMap::with_capacity(axis.len());
        for label in axis {
            values.insert(*label, String::new());
            statuses.insert(*label, String::new());
        }

        for obs in &record.observations {
            if let Some(slot) = values.get_mut(&obs.period) {
                slot.clone_from(&obs.value);
                statuses.insert(obs.period, obs.status.clone());
            }
        }

        for band in Granularity::ALL {
            let band_has_value = axis
                .iter()
                .any(|label| label.granularity() == band && !values[label].is_empty());
            if !band_has_value {
                continue;
            }
            rows.push(project(record, Attribute::Value, band, axis, &values));
            rows.push(project(record, Attribute::Status, band, axis, &statuses));
        }
    }

    rows
}

/// Pivot and bundle the axis with its rows.
pub fn pivot_table(records: &[SeriesRecord], axis: Vec<PeriodLabel>) -> WideTable {
    let rows = pivot(records, &axis);
    WideTable { axis, rows }
}

/// Project one band's cells back onto the full axis; non-band columns stay
/// empty so every row has the same width.
fn project(
    record: &SeriesRecord,
    attribute: Attribute,
    band: Granularity,
    axis: &[PeriodLabel],
    cells: &HashMap<PeriodLabel, String>,
) -> OutputRow {
    OutputRow {
        country_name: record.country_name.clone(),
        country_code: record.country_code.clone(),
        indicator_name: record.indicator_name.clone(),
        indicator_code: record.indicator_code.clone(),
        attribute,
        cells: axis
            .iter()
            .map(|label| {
                if label.granularity() == band {
                    cells[label].clone()
                } else {
                    String::new()
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Observation;
    use crate::pivot::axis::build_axis;

    fn obs(raw: &str, value: &str, status: &str) -> Observation {
        Observation {
            period: PeriodLabel::parse(raw).unwrap(),
            value: value.to_string(),
            status: status.to_string(),
        }
    }

    fn record(observations: Vec<Observation>) -> SeriesRecord {
        SeriesRecord {
            country_name: "United States".to_string(),
            country_code: "US".to_string(),
            indicator_name: "Indicators 1-2".to_string(),
            indicator_code: "NGDP_R+PCPI_IX".to_string(),
            observations,
        }
    }

    fn col(axis: &[PeriodLabel], canonical: &str) -> usize {
        axis.iter()
            .position(|p| p.canonical() == canonical)
            .unwrap()
    }

    #[test]
    fn single_monthly_observation_round_trips() {
        let axis = build_axis(2009, 2009);
        let rows = pivot(&[record(vec![obs("2009M1", "1.5", "A")])], &axis);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].attribute, Attribute::Value);
        assert_eq!(rows[1].attribute, Attribute::Status);

        let m1 = col(&axis, "2009M1");
        assert_eq!(rows[0].cells[m1], "1.5");
        assert_eq!(rows[1].cells[m1], "A");
        for (i, cell) in rows[0].cells.iter().enumerate() {
            if i != m1 {
                assert!(cell.is_empty(), "expected empty cell at {i}");
            }
        }
        assert_eq!(rows[0].cells.len(), 17);
    }

    #[test]
    fn empty_record_emits_no_rows() {
        let axis = build_axis(2009, 2009);
        assert!(pivot(&[record(Vec::new())], &axis).is_empty());
    }

    #[test]
    fn out_of_range_observation_is_dropped() {
        let axis = build_axis(2009, 2009);
        let rows = pivot(&[record(vec![obs("2011M1", "9.9", "A")])], &axis);
        assert!(rows.is_empty());
    }

    #[test]
    fn status_without_value_does_not_emit_a_band() {
        let axis = build_axis(2009, 2009);
        let rows = pivot(&[record(vec![obs("2009Q2", "", "E")])], &axis);
        assert!(rows.is_empty());
    }

    #[test]
    fn later_observation_for_the_same_period_wins() {
        let axis = build_axis(2009, 2009);
        let rows = pivot(
            &[record(vec![obs("2009", "1.0", "A"), obs("2009", "2.0", "B")])],
            &axis,
        );
        let annual = col(&axis, "2009");
        assert_eq!(rows[0].cells[annual], "2.0");
        assert_eq!(rows[1].cells[annual], "B");
    }

    #[test]
    fn bands_emit_in_annual_quarterly_monthly_order() {
        let axis = build_axis(2009, 2009);
        let rows = pivot(
            &[record(vec![
                obs("2009M3", "3.3", "C"),
                obs("2009", "1.1", "A"),
                obs("2009-Q2", "2.2", "B"),
            ])],
            &axis,
        );

        assert_eq!(rows.len(), 6);
        let attributes: Vec<Attribute> = rows.iter().map(|r| r.attribute).collect();
        assert_eq!(
            attributes,
            [
                Attribute::Value,
                Attribute::Status,
                Attribute::Value,
                Attribute::Status,
                Attribute::Value,
                Attribute::Status,
            ]
        );

        // Annual pair first: only the annual column is populated.
        assert_eq!(rows[0].cells[col(&axis, "2009")], "1.1");
        assert!(rows[0].cells[col(&axis, "2009Q2")].is_empty());
        // Quarterly pair second.
        assert_eq!(rows[2].cells[col(&axis, "2009Q2")], "2.2");
        assert!(rows[2].cells[col(&axis, "2009")].is_empty());
        // Monthly pair last.
        assert_eq!(rows[4].cells[col(&axis, "2009M3")], "3.3");
        assert_eq!(rows[5].cells[col(&axis, "2009M3")], "C");
    }

    #[test]
    fn records_keep_input_order() {
        let axis = build_axis(2009, 2009);
        let mut first = record(vec![obs("2009", "1.0", "")]);
        first.country_code = "US".to_string();
        let mut second = record(vec![obs("2009", "2.0", "")]);
        second.country_code = "GB".to_string();

        let rows = pivot(&[first, second], &axis);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].country_code, "US");
        assert_eq!(rows[2].country_code, "GB");
    }

    #[test]
    fn missing_value_and_status_default_to_empty_cells() {
        let axis = build_axis(2009, 2009);
        // A value-less observation plus a real one in the same band: the band
        // is emitted and the value-less period stays empty.
        let rows = pivot(
            &[record(vec![obs("2009M1", "", ""), obs("2009M2", "4.0", "A")])],
            &axis,
        );
        assert_eq!(rows.len(), 2);
        assert!(rows[0].cells[col(&axis, "2009M1")].is_empty());
        assert_eq!(rows[0].cells[col(&axis, "2009M2")], "4.0");
    }
}
