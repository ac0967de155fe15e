//! Association records linking employees to territories.

use crate::error::FixtureError;
use bson::Document;
use serde::{Deserialize, Serialize};

/// A three-field link between an employee and a territory code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationRecord {
    #[serde(rename = "_id")]
    pub id: i32,
    #[serde(rename = "employeeId")]
    pub employee_id: i32,
    #[serde(rename = "territoryId")]
    pub territory_id: String,
}

impl AssociationRecord {
    pub fn new(id: i32, employee_id: i32, territory_id: &str) -> Self {
        Self {
            id,
            employee_id,
            territory_id: territory_id.to_string(),
        }
    }

    /// Encode the record as a BSON document.
    pub fn to_document(&self) -> Result<Document, FixtureError> {
        Ok(bson::to_document(self)?)
    }
}

// Territory codes keep their leading zeros, so they stay strings.
const ASSOCIATIONS: [(i32, i32, &str); 7] = [
    (1, 1, "06897"),
    (2, 1, "19713"),
    (3, 2, "01581"),
    (4, 2, "01730"),
    (5, 2, "01833"),
    (6, 2, "02116"),
    (7, 2, "02139"),
];

/// All association records, in identifier order.
pub fn association_records() -> Vec<AssociationRecord> {
    ASSOCIATIONS
        .iter()
        .map(|(id, employee_id, territory_id)| AssociationRecord::new(*id, *employee_id, territory_id))
        .collect()
}

/// All association records encoded as BSON documents.
pub fn association_documents() -> Result<Vec<Document>, FixtureError> {
    association_records()
        .iter()
        .map(AssociationRecord::to_document)
        .collect()
}
