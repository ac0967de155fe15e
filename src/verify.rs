//! Verification of the state left behind by a seed run.

use anyhow::Context;
use bson::{Bson, Document};
use fixture_store::{DocumentStore, Namespace};
use fixture_types::names::{
    ASSOCIATION_COLLECTION, ASSOCIATION_DATABASE, PROBE_COLLECTION, PROBE_DATABASE,
};
use fixture_types::probe::{surviving_probe_record, UPDATED_ID};
use tracing::{info, warn};

/// Result of one verification check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub details: Vec<String>,
}

impl CheckResult {
    fn new(name: &str, details: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: details.is_empty(),
            details,
        }
    }
}

/// Report of all verification checks.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    pub checks: Vec<CheckResult>,
}

impl VerificationReport {
    /// Whether every check passed.
    pub fn is_success(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// The checks that failed.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }

    fn push(&mut self, check: CheckResult) {
        if check.passed {
            info!("Check passed: {}", check.name);
        } else {
            for detail in &check.details {
                warn!("Check failed: {}: {}", check.name, detail);
            }
        }
        self.checks.push(check);
    }
}

/// Compare `actual` with `expected` field by field.
///
/// Values must be the same BSON type and value; an Int32 never matches an
/// Int64 and a Decimal128 never matches a Double.
pub fn compare_documents(expected: &Document, actual: &Document) -> Vec<String> {
    let mut mismatches = Vec::new();
    for (field, expected_value) in expected {
        match actual.get(field) {
            Some(actual_value) if actual_value == expected_value => {}
            Some(actual_value) => mismatches.push(format!(
                "field '{field}': expected {expected_value:?}, got {actual_value:?}"
            )),
            None => mismatches.push(format!("field '{field}' is missing")),
        }
    }
    for field in actual.keys() {
        if !expected.contains_key(field) {
            mismatches.push(format!("unexpected field '{field}'"));
        }
    }
    mismatches
}

/// Check the collections against the state a complete seed run leaves behind.
pub async fn verify_seeded_state<S: DocumentStore>(
    store: &S,
) -> anyhow::Result<VerificationReport> {
    let probe_ns = Namespace::new(PROBE_DATABASE, PROBE_COLLECTION);
    let association_ns = Namespace::new(ASSOCIATION_DATABASE, ASSOCIATION_COLLECTION);
    let mut report = VerificationReport::default();

    let probes = store
        .find_all(&probe_ns)
        .await
        .with_context(|| format!("Failed to read {probe_ns}"))?;
    let ids: Vec<&Bson> = probes.iter().filter_map(|d| d.get("_id")).collect();
    let mut details = Vec::new();
    if ids != [&Bson::Int32(UPDATED_ID)] {
        details.push(format!("expected only _id {UPDATED_ID}, found {ids:?}"));
    }
    report.push(CheckResult::new(
        &format!("{probe_ns} holds only the updated record"),
        details,
    ));

    let expected = surviving_probe_record().context("Failed to build expected probe record")?;
    let details = match probes
        .iter()
        .find(|d| d.get("_id") == Some(&Bson::Int32(UPDATED_ID)))
    {
        Some(actual) => compare_documents(&expected, actual),
        None => vec![format!("record {UPDATED_ID} is missing")],
    };
    report.push(CheckResult::new(
        &format!("{probe_ns} record {UPDATED_ID} round-trips every field"),
        details,
    ));

    let associations = store
        .find_all(&association_ns)
        .await
        .with_context(|| format!("Failed to read {association_ns}"))?;
    let details = if associations.is_empty() {
        Vec::new()
    } else {
        vec![format!("expected no records, found {}", associations.len())]
    };
    report.push(CheckResult::new(&format!("{association_ns} is empty"), details));

    for ns in [&probe_ns, &association_ns] {
        let enabled = store
            .pre_and_post_images_enabled(ns)
            .await
            .with_context(|| format!("Failed to read collection options of {ns}"))?;
        let details = if enabled {
            Vec::new()
        } else {
            vec!["changeStreamPreAndPostImages is not enabled".to_string()]
        };
        report.push(CheckResult::new(
            &format!("{ns} captures pre/post images"),
            details,
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use fixture_store::MemoryStore;

    #[test]
    fn test_compare_documents_reports_type_changes() {
        let expected = doc! { "_id": 2, "year_type": 2025, "d": Bson::Null };
        let actual = doc! { "_id": 2, "year_type": 2025_i64, "extra": true };
        let mismatches = compare_documents(&expected, &actual);
        assert_eq!(mismatches.len(), 3);
        assert!(mismatches[0].starts_with("field 'year_type'"));
        assert_eq!(mismatches[1], "field 'd' is missing");
        assert_eq!(mismatches[2], "unexpected field 'extra'");
    }

    #[tokio::test]
    async fn test_unseeded_store_fails_verification() {
        let store = MemoryStore::new();
        let report = verify_seeded_state(&store).await.unwrap();
        assert!(!report.is_success());
        // An absent association collection is empty.
        assert_eq!(report.failures().count(), 4);
    }
}
