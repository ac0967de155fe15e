//! Runs a seed plan against a document store.

use crate::plan::{seed_plan, SeedStep};
use anyhow::Context;
use fixture_store::{DocumentStore, Namespace, StoreError, UpdateOutcome};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Selected,
    Dropped,
    Inserted(u64),
    PreAndPostImagesEnabled,
    Updated(UpdateOutcome),
    Deleted(u64),
}

/// Outcome of one step together with its description.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub description: String,
    pub outcome: StepOutcome,
}

/// Report of a complete seed run.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub steps: Vec<StepReport>,
    pub total_duration: Duration,
}

impl SeedReport {
    /// Documents inserted across all steps.
    pub fn documents_inserted(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| match s.outcome {
                StepOutcome::Inserted(n) => n,
                _ => 0,
            })
            .sum()
    }

    /// Documents deleted across all steps.
    pub fn documents_deleted(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| match s.outcome {
                StepOutcome::Deleted(n) => n,
                _ => 0,
            })
            .sum()
    }

    /// Documents modified across all steps.
    pub fn documents_modified(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| match s.outcome {
                StepOutcome::Updated(outcome) => outcome.modified,
                _ => 0,
            })
            .sum()
    }
}

/// Executes seed steps strictly in order against one store.
///
/// The first failing step aborts the run; earlier steps are not rolled back.
pub struct Seeder<'a, S: DocumentStore> {
    store: &'a S,
    database: Option<String>,
}

impl<'a, S: DocumentStore> Seeder<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            database: None,
        }
    }

    /// Run every step, returning the per-step report.
    pub async fn run(&mut self, steps: Vec<SeedStep>) -> anyhow::Result<SeedReport> {
        let start_time = Instant::now();
        let mut report = SeedReport::default();

        for (index, step) in steps.into_iter().enumerate() {
            let description = step.to_string();
            info!("Step {}: {}", index + 1, description);

            let outcome = self
                .apply(step)
                .await
                .with_context(|| format!("Seed step {} failed: {description}", index + 1))?;
            debug!("Step {} outcome: {:?}", index + 1, outcome);

            report.steps.push(StepReport {
                description,
                outcome,
            });
        }

        report.total_duration = start_time.elapsed();
        info!(
            "Seeding complete: {} steps, {} inserted, {} modified, {} deleted in {:?}",
            report.steps.len(),
            report.documents_inserted(),
            report.documents_modified(),
            report.documents_deleted(),
            report.total_duration
        );
        Ok(report)
    }

    fn namespace(&self, collection: &str) -> anyhow::Result<Namespace> {
        let database = self
            .database
            .as_deref()
            .with_context(|| format!("No database selected before using collection '{collection}'"))?;
        Ok(Namespace::new(database, collection))
    }

    async fn apply(&mut self, step: SeedStep) -> anyhow::Result<StepOutcome> {
        match step {
            SeedStep::UseDatabase(database) => {
                self.database = Some(database);
                Ok(StepOutcome::Selected)
            }
            SeedStep::DropCollection(collection) => {
                let ns = self.namespace(&collection)?;
                self.store.drop_collection(&ns).await?;
                Ok(StepOutcome::Dropped)
            }
            SeedStep::InsertMany {
                collection,
                documents,
            } => {
                let ns = self.namespace(&collection)?;
                let inserted = self.store.insert_many(&ns, documents).await?;
                Ok(StepOutcome::Inserted(inserted))
            }
            SeedStep::EnablePreAndPostImages(collection) => {
                let ns = self.namespace(&collection)?;
                self.store.enable_pre_and_post_images(&ns).await?;
                Ok(StepOutcome::PreAndPostImagesEnabled)
            }
            SeedStep::UpdateOne {
                collection,
                filter,
                update,
            } => {
                let ns = self.namespace(&collection)?;
                let outcome = self.store.update_one(&ns, &filter, &update).await?;
                if outcome.matched == 0 {
                    return Err(StoreError::NotFound {
                        namespace: ns.to_string(),
                        target: filter.to_string(),
                    }
                    .into());
                }
                Ok(StepOutcome::Updated(outcome))
            }
            SeedStep::DeleteOne { collection, filter } => {
                let ns = self.namespace(&collection)?;
                let deleted = self.store.delete_one(&ns, &filter).await?;
                if deleted == 0 {
                    return Err(StoreError::NotFound {
                        namespace: ns.to_string(),
                        target: filter.to_string(),
                    }
                    .into());
                }
                Ok(StepOutcome::Deleted(deleted))
            }
            SeedStep::DeleteMany { collection, filter } => {
                let ns = self.namespace(&collection)?;
                let deleted = self.store.delete_many(&ns, &filter).await?;
                Ok(StepOutcome::Deleted(deleted))
            }
        }
    }
}

/// Build the seed plan and run it against `store`.
pub async fn seed<S: DocumentStore>(store: &S) -> anyhow::Result<SeedReport> {
    let plan = seed_plan().context("Failed to build seed plan")?;
    Seeder::new(store).run(plan).await
}
