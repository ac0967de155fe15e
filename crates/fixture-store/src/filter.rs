//! Query filters and field updates understood by every store.

use bson::{doc, Bson, Document};
use std::fmt;

/// Selects the documents an update or delete applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document in the collection (`{}`).
    All,
    /// Documents whose `field` equals `value`.
    FieldEquals { field: String, value: Bson },
}

impl Filter {
    /// Match a document by its `_id`.
    pub fn id(id: i32) -> Self {
        Filter::FieldEquals {
            field: "_id".to_string(),
            value: Bson::Int32(id),
        }
    }

    pub fn field_equals(field: &str, value: Bson) -> Self {
        Filter::FieldEquals {
            field: field.to_string(),
            value,
        }
    }

    /// Render the filter as a MongoDB query document.
    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::FieldEquals { field, value } => {
                let mut query = Document::new();
                query.insert(field.clone(), value.clone());
                query
            }
        }
    }

    /// Whether `document` is selected by this filter.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::FieldEquals { field, value } => document.get(field) == Some(value),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_document())
    }
}

/// A single-field modification applied by an update.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// `$set` one field to a new value.
    Set { field: String, value: Bson },
}

impl FieldUpdate {
    pub fn set(field: &str, value: Bson) -> Self {
        FieldUpdate::Set {
            field: field.to_string(),
            value,
        }
    }

    /// Render the update as a MongoDB update document.
    pub fn to_document(&self) -> Document {
        match self {
            FieldUpdate::Set { field, value } => {
                let mut set = Document::new();
                set.insert(field.clone(), value.clone());
                doc! { "$set": set }
            }
        }
    }

    /// Apply the update in place, returning whether the document changed.
    pub fn apply(&self, document: &mut Document) -> bool {
        match self {
            FieldUpdate::Set { field, value } => {
                if document.get(field) == Some(value) {
                    return false;
                }
                document.insert(field.clone(), value.clone());
                true
            }
        }
    }
}

impl fmt::Display for FieldUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_document())
    }
}

/// Counts reported by an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_documents() {
        assert_eq!(Filter::All.to_document(), doc! {});
        assert_eq!(Filter::id(2).to_document(), doc! { "_id": 2 });
        assert_eq!(
            Filter::field_equals("territoryId", Bson::String("06897".into())).to_document(),
            doc! { "territoryId": "06897" }
        );
    }

    #[test]
    fn test_filter_matches_exact_type() {
        let document = doc! { "_id": 1, "year_type": 2025 };
        assert!(Filter::All.matches(&document));
        assert!(Filter::id(1).matches(&document));
        assert!(!Filter::id(2).matches(&document));
        // Int64 and Int32 are different BSON values.
        assert!(!Filter::field_equals("year_type", Bson::Int64(2025)).matches(&document));
        assert!(!Filter::field_equals("missing", Bson::Null).matches(&document));
    }

    #[test]
    fn test_set_update() {
        let update = FieldUpdate::set("a", Bson::String("five".into()));
        assert_eq!(update.to_document(), doc! { "$set": { "a": "five" } });

        let mut document = doc! { "_id": 1, "a": "four" };
        assert!(update.apply(&mut document));
        assert_eq!(document.get_str("a").unwrap(), "five");
        assert!(!update.apply(&mut document));
    }
}
