//! CompactData client: series observations for one (area, indicator-chunk).

use serde::Deserialize;
use tracing::{info, warn};

use crate::data::{DEFAULT_BASE_URL, OneOrMany, get_json};
use crate::domain::period::PeriodLabel;
use crate::domain::types::Observation;
use crate::error::ExtractError;

/// Client for the CompactData endpoint.
pub struct DataClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl DataClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch every observation for one series key (dimension codes joined
    /// with `.`, indicators within a dimension joined with `+`).
    ///
    /// All series in the response are flattened into a single list; the
    /// caller keeps the (area, chunk) identity. Observations with an
    /// unrecognized period label are skipped individually.
    pub fn fetch_observations(
        &self,
        dataset: &str,
        series_key: &str,
        start_year: u16,
        end_year: u16,
    ) -> Result<Vec<Observation>, ExtractError> {
        let url = format!(
            "{}/CompactData/{dataset}/{series_key}?startPeriod={start_year}&endPeriod={end_year}",
            self.base_url
        );
        info!(%url, "fetching series");
        let envelope: CompactEnvelope = get_json(&self.client, &url)?;
        Ok(flatten_observations(envelope))
    }
}

impl Default for DataClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct CompactEnvelope {
    #[serde(rename = "CompactData")]
    compact: CompactNode,
}

#[derive(Debug, Deserialize)]
struct CompactNode {
    #[serde(rename = "DataSet", default)]
    data_set: Option<DataSetNode>,
}

#[derive(Debug, Deserialize)]
struct DataSetNode {
    #[serde(rename = "Series", default)]
    series: OneOrMany<SeriesNode>,
}

#[derive(Debug, Deserialize)]
struct SeriesNode {
    #[serde(rename = "Obs", default)]
    observations: OneOrMany<ObsNode>,
}

#[derive(Debug, Deserialize)]
struct ObsNode {
    #[serde(rename = "@TIME_PERIOD", default, deserialize_with = "de_attr")]
    time_period: String,
    #[serde(rename = "@OBS_VALUE", default, deserialize_with = "de_attr")]
    value: String,
    #[serde(rename = "@OBS_STATUS", default, deserialize_with = "de_attr")]
    status: String,
}

/// Attribute values are strings in the XML rendering, but the JSON endpoint
/// turns numeric ones into numbers. Accept both.
fn de_attr<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Attr {
        Text(String),
        Number(f64),
    }

    Ok(match Attr::deserialize(deserializer)? {
        Attr::Text(text) => text,
        Attr::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
        Attr::Number(n) => n.to_string(),
    })
}

fn flatten_observations(envelope: CompactEnvelope) -> Vec<Observation> {
    let mut out = Vec::new();
    let Some(data_set) = envelope.compact.data_set else {
        return out;
    };
    for series in data_set.series.into_vec() {
        for obs in series.observations.into_vec() {
            match PeriodLabel::parse(&obs.time_period) {
                Ok(period) => out.push(Observation {
                    period,
                    value: obs.value,
                    status: obs.status,
                }),
                Err(err) => warn!(%err, "skipping observation"),
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten_str(body: &str) -> Vec<Observation> {
        flatten_observations(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn multiple_series_flatten_into_one_list() {
        let body = r#"{
            "CompactData": {
                "DataSet": {
                    "Series": [
                        {
                            "@FREQ": "A",
                            "Obs": [
                                {"@TIME_PERIOD": "2009", "@OBS_VALUE": "101.3", "@OBS_STATUS": "A"}
                            ]
                        },
                        {
                            "@FREQ": "M",
                            "Obs": [
                                {"@TIME_PERIOD": "2009-05", "@OBS_VALUE": "99.1"},
                                {"@TIME_PERIOD": "2009-11", "@OBS_VALUE": "98.2", "@OBS_STATUS": "E"}
                            ]
                        }
                    ]
                }
            }
        }"#;

        let observations = flatten_str(body);
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].period.canonical(), "2009");
        assert_eq!(observations[0].value, "101.3");
        assert_eq!(observations[0].status, "A");
        // Missing OBS_STATUS defaults to empty.
        assert_eq!(observations[1].period.canonical(), "2009M5");
        assert_eq!(observations[1].status, "");
        assert_eq!(observations[2].period.canonical(), "2009M11");
    }

    #[test]
    fn single_series_and_single_obs_arrive_as_objects() {
        let body = r#"{
            "CompactData": {
                "DataSet": {
                    "Series": {
                        "Obs": {"@TIME_PERIOD": "2009-Q3", "@OBS_VALUE": "7.5", "@OBS_STATUS": "A"}
                    }
                }
            }
        }"#;

        let observations = flatten_str(body);
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].period.canonical(), "2009Q3");
        assert_eq!(observations[0].value, "7.5");
    }

    #[test]
    fn numeric_attribute_values_are_rendered_as_text() {
        let body = r#"{
            "CompactData": {
                "DataSet": {
                    "Series": {
                        "Obs": [
                            {"@TIME_PERIOD": 2009, "@OBS_VALUE": 101.25},
                            {"@TIME_PERIOD": "2009-Q1", "@OBS_VALUE": 42}
                        ]
                    }
                }
            }
        }"#;

        let observations = flatten_str(body);
        assert_eq!(observations[0].period.canonical(), "2009");
        assert_eq!(observations[0].value, "101.25");
        assert_eq!(observations[1].value, "42");
    }

    #[test]
    fn malformed_periods_are_skipped_individually() {
        let body = r#"{
            "CompactData": {
                "DataSet": {
                    "Series": {
                        "Obs": [
                            {"@TIME_PERIOD": "not-a-period", "@OBS_VALUE": "1.0"},
                            {"@TIME_PERIOD": "2009", "@OBS_VALUE": "2.0"}
                        ]
                    }
                }
            }
        }"#;

        let observations = flatten_str(body);
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].value, "2.0");
    }

    #[test]
    fn empty_data_set_yields_no_observations() {
        assert!(flatten_str(r#"{"CompactData": {}}"#).is_empty());
        assert!(flatten_str(r#"{"CompactData": {"DataSet": {}}}"#).is_empty());
    }
}
