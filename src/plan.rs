//! The fixed sequence of commands that seeds the change-stream fixtures.

use bson::Document;
use fixture_store::{FieldUpdate, Filter};
use fixture_types::names::{
    ASSOCIATION_COLLECTION, ASSOCIATION_DATABASE, LEGACY_TERRITORY_COLLECTION, PROBE_COLLECTION,
    PROBE_DATABASE,
};
use fixture_types::probe::{DELETED_ID, NUMERIC_FIELD, NUMERIC_INITIAL, NUMERIC_UPDATED, UPDATED_ID};
use fixture_types::values::decimal;
use fixture_types::{association_documents, probe_records, FixtureError};
use std::fmt;

/// One command of the seed plan.
///
/// Collection steps apply to the database selected by the most recent
/// [`SeedStep::UseDatabase`].
#[derive(Debug, Clone, PartialEq)]
pub enum SeedStep {
    UseDatabase(String),
    DropCollection(String),
    InsertMany {
        collection: String,
        documents: Vec<Document>,
    },
    EnablePreAndPostImages(String),
    UpdateOne {
        collection: String,
        filter: Filter,
        update: FieldUpdate,
    },
    DeleteOne {
        collection: String,
        filter: Filter,
    },
    DeleteMany {
        collection: String,
        filter: Filter,
    },
}

impl SeedStep {
    /// The collection this step touches, if any.
    pub fn collection(&self) -> Option<&str> {
        match self {
            SeedStep::UseDatabase(_) => None,
            SeedStep::DropCollection(collection)
            | SeedStep::EnablePreAndPostImages(collection)
            | SeedStep::InsertMany { collection, .. }
            | SeedStep::UpdateOne { collection, .. }
            | SeedStep::DeleteOne { collection, .. }
            | SeedStep::DeleteMany { collection, .. } => Some(collection),
        }
    }
}

impl fmt::Display for SeedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedStep::UseDatabase(database) => write!(f, "use {database}"),
            SeedStep::DropCollection(collection) => write!(f, "drop {collection}"),
            SeedStep::InsertMany {
                collection,
                documents,
            } => write!(f, "insert {} documents into {collection}", documents.len()),
            SeedStep::EnablePreAndPostImages(collection) => {
                write!(f, "enable pre/post images on {collection}")
            }
            SeedStep::UpdateOne {
                collection,
                filter,
                update,
            } => write!(f, "update one in {collection} where {filter} with {update}"),
            SeedStep::DeleteOne { collection, filter } => {
                write!(f, "delete one from {collection} where {filter}")
            }
            SeedStep::DeleteMany { collection, filter } => {
                write!(f, "delete many from {collection} where {filter}")
            }
        }
    }
}

/// Build the seed plan.
pub fn seed_plan() -> Result<Vec<SeedStep>, FixtureError> {
    let probe = PROBE_COLLECTION.to_string();
    let association = ASSOCIATION_COLLECTION.to_string();

    Ok(vec![
        SeedStep::UseDatabase(PROBE_DATABASE.to_string()),
        SeedStep::DropCollection(probe.clone()),
        SeedStep::DropCollection(LEGACY_TERRITORY_COLLECTION.to_string()),
        SeedStep::InsertMany {
            collection: probe.clone(),
            documents: probe_records()?,
        },
        SeedStep::EnablePreAndPostImages(probe.clone()),
        SeedStep::UpdateOne {
            collection: probe.clone(),
            filter: Filter::id(UPDATED_ID),
            update: FieldUpdate::set(NUMERIC_FIELD, decimal(NUMERIC_FIELD, NUMERIC_UPDATED)?),
        },
        SeedStep::DeleteOne {
            collection: probe.clone(),
            filter: Filter::id(DELETED_ID),
        },
        SeedStep::DeleteMany {
            collection: probe,
            filter: Filter::field_equals(NUMERIC_FIELD, decimal(NUMERIC_FIELD, NUMERIC_INITIAL)?),
        },
        SeedStep::UseDatabase(ASSOCIATION_DATABASE.to_string()),
        SeedStep::InsertMany {
            collection: association.clone(),
            documents: association_documents()?,
        },
        SeedStep::EnablePreAndPostImages(association.clone()),
        SeedStep::DeleteMany {
            collection: association,
            filter: Filter::All,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_order() {
        let plan = seed_plan().unwrap();
        let descriptions: Vec<String> = plan.iter().map(ToString::to_string).collect();
        assert_eq!(descriptions.len(), 12);

        assert_eq!(descriptions[0], "use kestra");
        assert_eq!(descriptions[1], "drop mongo_types");
        assert_eq!(descriptions[2], "drop second_employee_territory");
        assert_eq!(descriptions[3], "insert 3 documents into mongo_types");
        assert_eq!(descriptions[4], "enable pre/post images on mongo_types");
        assert!(descriptions[5].starts_with("update one in mongo_types where { \"_id\": 2 }"));
        assert_eq!(descriptions[6], "delete one from mongo_types where { \"_id\": 1 }");
        assert!(descriptions[7].starts_with("delete many from mongo_types where { \"numeric_test\""));
        assert_eq!(descriptions[8], "use second");
        assert_eq!(descriptions[9], "insert 7 documents into employeeTerritory");
        assert_eq!(descriptions[10], "enable pre/post images on employeeTerritory");
        assert!(descriptions[11].starts_with("delete many from employeeTerritory where {"));
    }

    #[test]
    fn test_update_and_value_delete_targets() {
        let plan = seed_plan().unwrap();
        match &plan[5] {
            SeedStep::UpdateOne { filter, update, .. } => {
                assert_eq!(*filter, Filter::id(2));
                assert_eq!(
                    *update,
                    FieldUpdate::set("numeric_test", decimal("numeric_test", "6.36").unwrap())
                );
            }
            other => panic!("unexpected step {other:?}"),
        }
        match &plan[7] {
            SeedStep::DeleteMany { filter, .. } => assert_eq!(
                *filter,
                Filter::field_equals("numeric_test", decimal("numeric_test", "5.36").unwrap())
            ),
            other => panic!("unexpected step {other:?}"),
        }
        match &plan[11] {
            SeedStep::DeleteMany { filter, .. } => assert_eq!(*filter, Filter::All),
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_every_collection_step_follows_a_database_selection() {
        let plan = seed_plan().unwrap();
        assert!(matches!(plan[0], SeedStep::UseDatabase(_)));
        assert_eq!(plan[0].collection(), None);
        assert_eq!(plan[1].collection(), Some("mongo_types"));
    }

    #[test]
    fn test_drops_precede_inserts() {
        let plan = seed_plan().unwrap();
        let first_insert = plan
            .iter()
            .position(|s| matches!(s, SeedStep::InsertMany { .. }))
            .unwrap();
        let last_drop = plan
            .iter()
            .rposition(|s| matches!(s, SeedStep::DropCollection(_)))
            .unwrap();
        assert!(last_drop < first_insert);
    }
}
