//! Patient and interaction records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A registered patient, keyed by insurance number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub insurance_no: String,
    pub fname: String,
    pub lname: String,
    #[serde(default)]
    pub addr: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    pub sex: String,
    #[serde(default)]
    pub ph_no: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub related_docs: Option<Vec<String>>,
    #[serde(default)]
    pub habits: Option<String>,
    #[serde(default)]
    pub pre_existing_conditions: Option<String>,
    #[serde(default)]
    pub pre_existing_medications: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    pub insurance_provider: String,
}

/// Follow-up plan recorded with an interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextSteps {
    #[serde(default)]
    pub next_visit: Option<String>,
    #[serde(default)]
    pub prescribed_meds: Option<Vec<String>>,
    #[serde(default)]
    pub prescribed_tests: Option<Vec<String>>,
    #[serde(default)]
    pub prescribed_specialist: Option<String>,
}

/// One doctor/patient interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: i64,
    pub insurance_no: String,
    #[serde(default)]
    pub ailment: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub interaction_date: Option<NaiveDate>,
    /// Recorded measurements such as blood pressure.
    #[serde(default)]
    pub metrics: Option<Value>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub health_status: Option<i64>,
    #[serde(default)]
    pub qa: Option<String>,
    #[serde(default)]
    pub next_steps: Option<NextSteps>,
    #[serde(default)]
    pub label: Option<String>,
}
