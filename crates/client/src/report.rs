//! JSON record of a finished (or abandoned) encounter.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use game_core::{EncounterOutcome, Event, EventLog};
use runtime::Scenario;

/// Enough to audit the fight and to replay it with the same seed.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub seed: u64,
    pub scenario: &'a Scenario,
    /// SHA-256 of the event log, hex encoded.
    pub digest: String,
    /// `None` when the encounter was abandoned.
    pub outcome: Option<EncounterOutcome>,
    pub error: Option<String>,
    pub events: Vec<&'a Event>,
}

impl<'a> Report<'a> {
    pub fn new(
        seed: u64,
        scenario: &'a Scenario,
        log: &'a EventLog,
        outcome: Option<EncounterOutcome>,
    ) -> Result<Self> {
        let digest = log.digest().context("hashing the event log")?;
        Ok(Self {
            seed,
            scenario,
            digest: hex::encode(digest),
            outcome,
            error: None,
            events: log.read_all().collect(),
        })
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("creating report file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("writing report to {}", path.display()))?;
        Ok(())
    }
}
