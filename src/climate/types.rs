use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Date → precipitation. Keys serialize in ascending date order.
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationSummary {
    #[serde(rename = "Station ID")]
    pub station_id: String,
    #[serde(rename = "Station Name")]
    pub station_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureObservation {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

/// Aggregates over the matched rows; all three are `null` when nothing matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureStats {
    #[serde(rename = "Minimum Temperature")]
    pub minimum: Option<f64>,
    #[serde(rename = "Average Temperature")]
    pub average: Option<f64>,
    #[serde(rename = "Maximum Temperature")]
    pub maximum: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_station_summary_field_names() {
        let station = StationSummary {
            station_id: "USC00519397".to_string(),
            station_name: "WAIKIKI 717.2, HI US".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&station).unwrap(),
            json!({"Station ID": "USC00519397", "Station Name": "WAIKIKI 717.2, HI US"})
        );
    }

    #[test]
    fn test_empty_stats_serialize_as_nulls() {
        assert_eq!(
            serde_json::to_value(TemperatureStats::default()).unwrap(),
            json!({
                "Minimum Temperature": null,
                "Average Temperature": null,
                "Maximum Temperature": null
            })
        );
    }
}
