//! Phase plan: which declared units run in which pass.
use std::collections::HashSet;

use serde::Serialize;
use tagsel_model::{Phase, UnitId};
use tracing::{info, instrument};

use crate::phase::PhaseFilters;
use crate::registry::UnitRegistry;
use crate::selection::Filter;

/// Partition of a registry's units by phase, in declaration order.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasePlan {
    pub filter: String,
    pub install: Vec<UnitId>,
    pub post_install: Vec<UnitId>,
    pub skipped: Vec<UnitId>,
}

impl PhasePlan {
    /// Evaluate every unit in `registry` against the phase filters derived from `filter`.
    #[instrument(level = "debug", skip(registry, filter), fields(units = registry.len(), filter = %filter))]
    pub fn build(registry: &UnitRegistry, filter: &Filter) -> Self {
        let filters = PhaseFilters::new(filter);
        let mut plan = PhasePlan {
            filter: filter.to_string(),
            ..Default::default()
        };

        for unit in registry.iter() {
            let schedule = filters.schedule(unit.tags());
            if schedule.install {
                plan.install.push(unit.id().to_owned());
            }
            if schedule.post_install {
                plan.post_install.push(unit.id().to_owned());
            }
            if schedule.is_skipped() {
                plan.skipped.push(unit.id().to_owned());
            }
        }

        info!(
            install = plan.install.len(),
            post_install = plan.post_install.len(),
            skipped = plan.skipped.len(),
            selected = plan.selected(),
            "phase plan built"
        );
        plan
    }

    /// Units scheduled for `phase`.
    pub fn units(&self, phase: Phase) -> &[UnitId] {
        match phase {
            Phase::Install => &self.install,
            Phase::PostInstall => &self.post_install,
        }
    }

    /// Number of units that run in at least one phase.
    ///
    /// A unit scheduled for both phases counts once.
    pub fn selected(&self) -> usize {
        self.install
            .iter()
            .chain(&self.post_install)
            .collect::<HashSet<_>>()
            .len()
    }
}
