use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// Flow direction of a fluid event: intake vs. output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum FluidType {
    In,
    Out,
}

impl fmt::Display for FluidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FluidType::In => "IN",
            FluidType::Out => "OUT",
        };
        f.write_str(label)
    }
}

/// One logged fluid event. Records are immutable after creation; the only
/// lifecycle operations are append and removal by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FluidRecord {
    pub id: String,
    /// Milliseconds since the Unix epoch; may be backdated at creation.
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: FluidType,
    pub category_id: String,
    /// Volume in milliliters.
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FluidRecord {
    pub fn new(kind: FluidType, category_id: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            kind,
            category_id: category_id.into(),
            amount,
            temperature: None,
            note: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp_ms: i64) -> Self {
        self.timestamp = timestamp_ms;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl Identifiable for FluidRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for FluidRecord {
    fn display_label(&self) -> String {
        format!("{} {} mL [{}]", self.kind, self.amount, self.category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_original_field_spelling() {
        let record = FluidRecord::new(FluidType::In, "sys_water", 250.0).with_note("warm");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "IN");
        assert_eq!(json["categoryId"], "sys_water");
        assert_eq!(json["amount"], 250.0);
        assert_eq!(json["note"], "warm");
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn deserializes_backdated_record() {
        let json = r#"{
            "id": "r1",
            "timestamp": 1700000000000,
            "type": "OUT",
            "categoryId": "sys_urine",
            "amount": 300
        }"#;
        let record: FluidRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, FluidType::Out);
        assert_eq!(record.timestamp, 1_700_000_000_000);
        assert_eq!(record.note, None);
    }
}
