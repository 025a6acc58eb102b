use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One canned post office branch, spelled with the upstream PascalCase
/// field names so fixture files read like real lookup responses.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct BranchRecord {
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

/// Behavior of the mock for a single pincode.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PincodeEntry {
    /// Records returned on a hit. An empty list answers like an unknown
    /// pincode.
    #[serde(default)]
    pub records: Vec<BranchRecord>,
    /// Respond with HTTP 500 instead of a body.
    #[serde(default)]
    pub fail: bool,
    /// Hold the response for this long before answering.
    #[serde(default)]
    pub delay_ms: u64,
}

/// Map of pincode to canned behavior. Pincodes not in the map answer like
/// the real service answering an unknown pincode.
#[derive(Debug, Clone, Default)]
pub struct PincodeFixture {
    entries: HashMap<String, PincodeEntry>,
}

impl PincodeFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, pincode: String, entry: PincodeEntry) {
        self.entries.insert(pincode, entry);
    }

    pub fn get_entry(&self, pincode: &str) -> Option<&PincodeEntry> {
        self.entries.get(pincode)
    }

    pub fn from_yaml(yaml_content: &str) -> anyhow::Result<Self> {
        let entries: HashMap<String, PincodeEntry> = serde_yaml::from_str(yaml_content)?;
        Ok(Self { entries })
    }

    /// Fixture used when no fixture file is supplied: a couple of real-world
    /// shaped pincodes plus `500500`, which always fails.
    pub fn create_test_fixture() -> Self {
        let mut fixture = Self::new();

        fixture.add_entry(
            "110001".to_string(),
            PincodeEntry {
                records: vec![
                    BranchRecord {
                        name: Some("Connaught Place".to_string()),
                        branch_type: Some("Sub Post Office".to_string()),
                        delivery_status: Some("Non-Delivery".to_string()),
                        circle: Some("Delhi".to_string()),
                        district: Some("Central Delhi".to_string()),
                        division: Some("New Delhi Central".to_string()),
                        region: Some("Delhi".to_string()),
                        block: Some("New Delhi".to_string()),
                        state: Some("Delhi".to_string()),
                        country: Some("India".to_string()),
                        pincode: Some("110001".to_string()),
                    },
                    BranchRecord {
                        name: Some("Baroda House".to_string()),
                        branch_type: Some("Sub Post Office".to_string()),
                        delivery_status: Some("Non-Delivery".to_string()),
                        circle: Some("Delhi".to_string()),
                        district: Some("Central Delhi".to_string()),
                        state: Some("Delhi".to_string()),
                        country: Some("India".to_string()),
                        pincode: Some("110001".to_string()),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
        );

        fixture.add_entry(
            "560001".to_string(),
            PincodeEntry {
                records: vec![BranchRecord {
                    name: Some("Bangalore G.P.O.".to_string()),
                    branch_type: Some("Head Post Office".to_string()),
                    delivery_status: Some("Delivery".to_string()),
                    circle: Some("Karnataka".to_string()),
                    district: Some("Bengaluru".to_string()),
                    state: Some("Karnataka".to_string()),
                    country: Some("India".to_string()),
                    pincode: Some("560001".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            },
        );

        fixture.add_entry(
            "500500".to_string(),
            PincodeEntry {
                fail: true,
                ..Default::default()
            },
        );

        fixture
    }
}
