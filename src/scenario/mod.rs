//! Scenarios: named, persisted snapshots of a cost document plus pricing
//! configuration, and the persistence collaborator boundary.
//!
//! The store is a remote service from the engine's point of view; every
//! call may fail, and on failure the caller leaves local state unchanged
//! and surfaces a notification. [`MemoryStore`] is the in-process
//! reference implementation used by tests and the offline path.

pub mod compare;

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::import::{merge_cost_data, MergeStrategy};
use crate::metrics::pricing::PricingTier;
use crate::model::mutate::remove_item;
use crate::model::value::DocValue;

pub use compare::{compare_scenarios, MetricDelta, MetricDirection, ScenarioComparison};

/// A persisted scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost_data: DocValue,
    #[serde(default)]
    pub pricing_data: Vec<PricingTier>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost_data: DocValue,
    #[serde(default)]
    pub pricing_data: Vec<PricingTier>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cost_data: Option<DocValue>,
    pub pricing_data: Option<Vec<PricingTier>>,
}

/// The persistence collaborator.
pub trait ScenarioStore {
    fn create_scenario(&mut self, new: NewScenario) -> Result<Scenario>;
    fn update_scenario(&mut self, id: &str, patch: ScenarioPatch) -> Result<Scenario>;
    fn get_scenarios(&self) -> Result<Vec<Scenario>>;
    /// Fetch one scenario with any server-side normalized cost rows merged
    /// back into its `cost_data`.
    fn get_scenario_with_cost_data(&self, id: &str) -> Result<Scenario>;
    fn delete_scenario(&mut self, id: &str) -> Result<()>;
    fn remove_cost_item(&mut self, scenario_id: &str, category_key: &str, item_key: &str)
        -> Result<()>;
}

/// In-memory scenario store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scenarios: BTreeMap<String, Scenario>,
    /// Server-side normalized cost rows, staged per scenario and merged on
    /// fetch, mirroring what the backend keeps in its own tables.
    cost_rows: BTreeMap<String, DocValue>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a normalized cost fragment the way the backend would, to be
    /// merged into `cost_data` on the next fetch.
    pub fn stage_cost_rows(&mut self, scenario_id: &str, fragment: DocValue) {
        self.cost_rows.insert(scenario_id.to_string(), fragment);
    }

    fn require(&self, id: &str) -> Result<&Scenario> {
        self.scenarios
            .get(id)
            .ok_or_else(|| anyhow!("scenario '{id}' not found"))
    }
}

impl ScenarioStore for MemoryStore {
    fn create_scenario(&mut self, new: NewScenario) -> Result<Scenario> {
        self.next_id += 1;
        let now = Utc::now();
        let scenario = Scenario {
            id: format!("scn-{}", self.next_id),
            name: new.name,
            description: new.description,
            cost_data: new.cost_data,
            pricing_data: new.pricing_data,
            created_at: now,
            updated_at: now,
        };
        self.scenarios.insert(scenario.id.clone(), scenario.clone());
        Ok(scenario)
    }

    fn update_scenario(&mut self, id: &str, patch: ScenarioPatch) -> Result<Scenario> {
        let scenario = self
            .scenarios
            .get_mut(id)
            .ok_or_else(|| anyhow!("scenario '{id}' not found"))?;
        if let Some(name) = patch.name {
            scenario.name = name;
        }
        if let Some(description) = patch.description {
            scenario.description = description;
        }
        if let Some(cost_data) = patch.cost_data {
            scenario.cost_data = cost_data;
        }
        if let Some(pricing_data) = patch.pricing_data {
            scenario.pricing_data = pricing_data;
        }
        scenario.updated_at = Utc::now();
        Ok(scenario.clone())
    }

    fn get_scenarios(&self) -> Result<Vec<Scenario>> {
        Ok(self.scenarios.values().cloned().collect())
    }

    fn get_scenario_with_cost_data(&self, id: &str) -> Result<Scenario> {
        let mut scenario = self.require(id)?.clone();
        if let Some(rows) = self.cost_rows.get(id) {
            scenario.cost_data = merge_cost_data(&scenario.cost_data, rows, MergeStrategy::DeepMerge);
        }
        Ok(scenario)
    }

    fn delete_scenario(&mut self, id: &str) -> Result<()> {
        self.scenarios
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| anyhow!("scenario '{id}' not found"))?;
        self.cost_rows.remove(id);
        Ok(())
    }

    fn remove_cost_item(
        &mut self,
        scenario_id: &str,
        category_key: &str,
        item_key: &str,
    ) -> Result<()> {
        let scenario = self
            .scenarios
            .get_mut(scenario_id)
            .ok_or_else(|| anyhow!("scenario '{scenario_id}' not found"))?;
        scenario.cost_data = remove_item(&scenario.cost_data, category_key, item_key);
        scenario.updated_at = Utc::now();
        Ok(())
    }
}

/// Last-write-wins debounce for persistence.
///
/// Each edit replaces the pending snapshot and resets the deadline; the
/// write fires once the quiet period elapses, always carrying the latest
/// snapshot. There is no teardown flush: a snapshot still pending when the
/// owner goes away is dropped, which is the accepted at-most-effort
/// persistence policy.
#[derive(Debug)]
pub struct PersistDebouncer {
    quiet: Duration,
    pending: Option<PendingWrite>,
}

#[derive(Debug, Clone)]
struct PendingWrite {
    scenario_id: String,
    snapshot: DocValue,
    due: DateTime<Utc>,
}

impl PersistDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    /// Record an edit: the snapshot supersedes any pending one and the
    /// deadline restarts.
    pub fn note_edit(&mut self, scenario_id: &str, snapshot: &DocValue, now: DateTime<Utc>) {
        self.pending = Some(PendingWrite {
            scenario_id: scenario_id.to_string(),
            snapshot: snapshot.clone(),
            due: now + self.quiet,
        });
    }

    /// Take the pending write if its quiet period has elapsed.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<(String, DocValue)> {
        if self.pending.as_ref().is_some_and(|w| now >= w.due) {
            let write = self.pending.take().expect("checked above");
            debug!("debounced persist firing for scenario {}", write.scenario_id);
            return Some((write.scenario_id, write.snapshot));
        }
        None
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
