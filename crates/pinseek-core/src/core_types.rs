//! Data model for the postal lookup API
//!
//! These types mirror the JSON the public `api.postalpincode.in` service
//! returns: a top-level array whose first element carries a status line and
//! an optional `PostOffice` array. The upstream uses PascalCase field names
//! and treats every field as optional, so these structs do too — records are
//! taken as supplied and never normalized beyond deserialization.

use serde::{Deserialize, Serialize};

/// One post office branch entry as returned by the lookup API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct PostOffice {
    pub name: Option<String>,
    pub branch_type: Option<String>,
    pub delivery_status: Option<String>,
    pub circle: Option<String>,
    pub district: Option<String>,
    pub division: Option<String>,
    pub region: Option<String>,
    pub block: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
}

impl PostOffice {
    /// Branch name, or a placeholder when the upstream omitted it.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed branch)")
    }

    /// All eleven fields as label/value pairs, in the order the upstream
    /// documents them. Missing values come back as `None`.
    pub fn field_rows(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Name", self.name.as_deref()),
            ("Branch Type", self.branch_type.as_deref()),
            ("Delivery Status", self.delivery_status.as_deref()),
            ("Circle", self.circle.as_deref()),
            ("District", self.district.as_deref()),
            ("Division", self.division.as_deref()),
            ("Region", self.region.as_deref()),
            ("Block", self.block.as_deref()),
            ("State", self.state.as_deref()),
            ("Country", self.country.as_deref()),
            ("Pincode", self.pincode.as_deref()),
        ]
    }
}

/// One element of the upstream response array. Only the first element is
/// ever consulted; the rest are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct LookupEnvelope {
    pub message: Option<String>,
    pub status: Option<String>,
    pub post_office: Option<Vec<PostOffice>>,
}

/// Outcome of a well-formed lookup response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The first envelope carried a non-empty `PostOffice` array.
    Matches(Vec<PostOffice>),
    /// Missing, null, or empty `PostOffice`, or an empty response array.
    NoMatches,
}

impl LookupOutcome {
    /// Collapse a decoded response array into an outcome. A zero-element
    /// array is treated identically to a missing `PostOffice` field.
    pub fn from_envelopes(envelopes: Vec<LookupEnvelope>) -> LookupOutcome {
        match envelopes.into_iter().next().and_then(|e| e.post_office) {
            Some(records) if !records.is_empty() => LookupOutcome::Matches(records),
            _ => LookupOutcome::NoMatches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_office_deserializes_pascal_case() {
        let value = json!({
            "Name": "Connaught Place",
            "BranchType": "Sub Post Office",
            "DeliveryStatus": "Non-Delivery",
            "Circle": "Delhi",
            "District": "Central Delhi",
            "Division": "New Delhi Central",
            "Region": "Delhi",
            "Block": "New Delhi",
            "State": "Delhi",
            "Country": "India",
            "Pincode": "110001"
        });

        let record: PostOffice = serde_json::from_value(value).unwrap();
        assert_eq!(record.name.as_deref(), Some("Connaught Place"));
        assert_eq!(record.branch_type.as_deref(), Some("Sub Post Office"));
        assert_eq!(record.delivery_status.as_deref(), Some("Non-Delivery"));
        assert_eq!(record.pincode.as_deref(), Some("110001"));
    }

    #[test]
    fn test_post_office_tolerates_missing_fields() {
        let record: PostOffice = serde_json::from_value(json!({"Name": "Baroda House"})).unwrap();
        assert_eq!(record.display_name(), "Baroda House");
        assert!(record.circle.is_none());
        assert!(record.country.is_none());
    }

    #[test]
    fn test_display_name_placeholder() {
        let record = PostOffice::default();
        assert_eq!(record.display_name(), "(unnamed branch)");
    }

    #[test]
    fn test_field_rows_cover_all_upstream_fields() {
        let record = PostOffice::default();
        let rows = record.field_rows();
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0].0, "Name");
        assert_eq!(rows[10].0, "Pincode");
    }

    #[test]
    fn test_outcome_from_populated_envelope() {
        let envelopes: Vec<LookupEnvelope> = serde_json::from_value(json!([
            {
                "Message": "Number of pincode(s) found:1",
                "Status": "Success",
                "PostOffice": [{"Name": "Connaught Place"}]
            }
        ]))
        .unwrap();

        match LookupOutcome::from_envelopes(envelopes) {
            LookupOutcome::Matches(records) => assert_eq!(records.len(), 1),
            LookupOutcome::NoMatches => panic!("expected matches"),
        }
    }

    #[test]
    fn test_outcome_from_null_post_office() {
        let envelopes: Vec<LookupEnvelope> = serde_json::from_value(json!([
            {"Message": "No records found", "Status": "Error", "PostOffice": null}
        ]))
        .unwrap();
        assert_eq!(LookupOutcome::from_envelopes(envelopes), LookupOutcome::NoMatches);
    }

    #[test]
    fn test_outcome_from_empty_array_matches_missing_field() {
        let empty: Vec<LookupEnvelope> = vec![];
        let missing: Vec<LookupEnvelope> = serde_json::from_value(json!([{}])).unwrap();
        assert_eq!(LookupOutcome::from_envelopes(empty), LookupOutcome::NoMatches);
        assert_eq!(LookupOutcome::from_envelopes(missing), LookupOutcome::NoMatches);
    }

    #[test]
    fn test_outcome_from_empty_post_office_array() {
        let envelopes: Vec<LookupEnvelope> =
            serde_json::from_value(json!([{"PostOffice": []}])).unwrap();
        assert_eq!(LookupOutcome::from_envelopes(envelopes), LookupOutcome::NoMatches);
    }

    #[test]
    fn test_only_first_envelope_is_consulted() {
        let envelopes: Vec<LookupEnvelope> = serde_json::from_value(json!([
            {"PostOffice": null},
            {"PostOffice": [{"Name": "Ignored"}]}
        ]))
        .unwrap();
        assert_eq!(LookupOutcome::from_envelopes(envelopes), LookupOutcome::NoMatches);
    }
}
