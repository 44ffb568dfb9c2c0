// ABOUTME: Cross-module conflict detection and resolution by fixed authority hierarchy
// ABOUTME: Higher-ranked module constraints overwrite lower-ranked proposals, always annotated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use crate::decision::{Decision, DecisionAction, DecisionPriority, LoadModifiers};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sibling heuristic modules whose proposals can clash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    /// Veto-bearing safety evaluation
    Safety,
    /// Strategic phase intent
    Strategy,
    /// Fatigue and sustainable-effort ceiling
    Fatigue,
    /// Habit and preference suggestions
    Habit,
}

impl ModuleId {
    /// Fixed authority rank; the higher rank always wins a conflict
    #[must_use]
    pub const fn authority_rank(self) -> u8 {
        match self {
            Self::Safety => 10,
            Self::Strategy => 9,
            Self::Fatigue => 7,
            Self::Habit => 3,
        }
    }

    /// Whether this module outranks another
    #[must_use]
    pub const fn overrules(self, other: Self) -> bool {
        self.authority_rank() > other.authority_rank()
    }
}

/// Session intensity proposed by the strategy module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    /// Easy work only
    Light,
    /// Standard working intensity
    Moderate,
    /// Heavy or near-maximal work
    High,
}

/// Training method categories referenced by vetoes and preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodCategory {
    /// Heavy compound barbell work
    HeavyCompound,
    /// High-intensity intervals
    Hiit,
    /// Tabata-style intervals
    Tabata,
    /// Max-effort singles or doubles
    MaxEffort,
    /// Continuous steady-state work
    SteadyState,
    /// Tempo-controlled lifting
    Tempo,
}

/// Proposal from the strategic-intent module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyProposal {
    /// Proposed session intensity
    pub intensity: IntensityLevel,
    /// Reasoning trail; resolution annotations are appended here
    #[serde(default)]
    pub rationale: Vec<String>,
}

/// Proposal from the fatigue module
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueProposal {
    /// Highest RPE the athlete can sustain today (1-10)
    pub sustainable_rpe: f64,
}

/// Proposal from the safety module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyProposal {
    /// Overall safety risk, 0-1
    pub overall_risk: f64,
    /// Method categories the safety module has vetoed
    #[serde(default)]
    pub vetoed_methods: Vec<MethodCategory>,
    /// Explicit clearance for heavy compound work
    pub cleared_for_heavy: bool,
}

/// Proposal from the habit/preference module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitProposal {
    /// Method categories the athlete tends to respond to
    #[serde(default)]
    pub recommended_methods: Vec<MethodCategory>,
}

/// The sibling-module outputs combined with a weekly decision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleProposals {
    /// Strategic intent, if the strategy module ran
    pub strategy: Option<StrategyProposal>,
    /// Fatigue ceiling, if the fatigue module ran
    pub fatigue: Option<FatigueProposal>,
    /// Safety evaluation, if the safety module ran
    pub safety: Option<SafetyProposal>,
    /// Habit suggestions, if the habit module ran
    pub habit: Option<HabitProposal>,
}

/// Kinds of detected conflicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Strategy wants high intensity but the fatigue ceiling forbids it
    IntensityVsFatigue,
    /// Habit recommends a method the safety module vetoed
    MethodVsSafety,
    /// The arbited decision raises stimulus under high safety risk
    DecisionVsSafety,
}

/// Record of one resolved conflict, for traceability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// Conflict classification
    pub kind: ConflictKind,
    /// The field that was rewritten
    pub field: String,
    /// Module whose constraint won
    pub winner: ModuleId,
    /// Module whose proposal was overwritten
    pub loser: ModuleId,
    /// Human-readable description of the disagreement
    pub description: String,
    /// What the resolution changed
    pub resolution: String,
}

/// Sustainable RPE at or below which high intensity is unsustainable
const FATIGUE_RPE_CEILING: f64 = 6.0;

/// Resolves contradictions between the weekly decision and sibling
/// module proposals. Every resolution is an in-place field rewrite
/// recorded in a `ConflictRecord`; proposals are never silently
/// dropped.
#[derive(Debug, Clone, Copy)]
pub struct ConflictResolver {
    /// Safety risk above which stimulus-raising decisions are vetoed
    safety_veto_risk: f64,
}

impl Default for ConflictResolver {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl ConflictResolver {
    /// Create a resolver with the given safety veto threshold
    #[must_use]
    pub const fn new(safety_veto_risk: f64) -> Self {
        Self { safety_veto_risk }
    }

    /// Detect and resolve all conflicts, rewriting fields in place.
    #[must_use]
    pub fn resolve(
        &self,
        decision: &mut Decision,
        proposals: &mut ModuleProposals,
    ) -> Vec<ConflictRecord> {
        let mut records = Vec::new();

        Self::resolve_intensity_vs_fatigue(proposals, &mut records);
        Self::resolve_method_vs_safety(proposals, &mut records);
        self.resolve_decision_vs_safety(decision, proposals, &mut records);

        for record in &records {
            debug!(kind = ?record.kind, winner = ?record.winner, "conflict resolved");
        }
        records
    }

    /// Strategy proposes high intensity while the fatigue ceiling says
    /// the athlete cannot sustain it. Fatigue outranks strategy here
    /// because the ceiling is a physiological constraint, not intent.
    fn resolve_intensity_vs_fatigue(
        proposals: &mut ModuleProposals,
        records: &mut Vec<ConflictRecord>,
    ) {
        let Some(fatigue) = proposals.fatigue else {
            return;
        };
        let Some(strategy) = proposals.strategy.as_mut() else {
            return;
        };
        if strategy.intensity != IntensityLevel::High
            || fatigue.sustainable_rpe > FATIGUE_RPE_CEILING
        {
            return;
        }

        strategy.intensity = IntensityLevel::Moderate;
        strategy
            .rationale
            .push("Intensity reduced: fatigue ceiling override".to_owned());
        records.push(ConflictRecord {
            kind: ConflictKind::IntensityVsFatigue,
            field: "strategy.intensity".to_owned(),
            winner: ModuleId::Fatigue,
            loser: ModuleId::Strategy,
            description: format!(
                "Strategy wants high intensity but sustainable RPE is {:.1}",
                fatigue.sustainable_rpe
            ),
            resolution: "intensity rewritten to moderate".to_owned(),
        });
    }

    /// Habit suggests a method category the safety module has vetoed.
    /// Safety outranks everything; the category is removed.
    fn resolve_method_vs_safety(proposals: &mut ModuleProposals, records: &mut Vec<ConflictRecord>) {
        let Some(safety) = proposals.safety.as_ref() else {
            return;
        };
        if safety.vetoed_methods.is_empty() {
            return;
        }
        let vetoed = safety.vetoed_methods.clone();
        let Some(habit) = proposals.habit.as_mut() else {
            return;
        };

        let clashing: Vec<MethodCategory> = habit
            .recommended_methods
            .iter()
            .copied()
            .filter(|method| vetoed.contains(method))
            .collect();
        if clashing.is_empty() {
            return;
        }

        debug_assert!(ModuleId::Safety.overrules(ModuleId::Habit));
        habit
            .recommended_methods
            .retain(|method| !vetoed.contains(method));
        records.push(ConflictRecord {
            kind: ConflictKind::MethodVsSafety,
            field: "habit.recommended_methods".to_owned(),
            winner: ModuleId::Safety,
            loser: ModuleId::Habit,
            description: format!("Suggested methods {clashing:?} are vetoed for safety"),
            resolution: "vetoed categories removed from the suggestion list".to_owned(),
        });
    }

    /// The arbited decision raises stimulus while the safety module
    /// reports high risk. Safety outranks the opportunistic actions;
    /// the decision is rewritten to a standard load reduction.
    fn resolve_decision_vs_safety(
        &self,
        decision: &mut Decision,
        proposals: &ModuleProposals,
        records: &mut Vec<ConflictRecord>,
    ) {
        let Some(safety) = proposals.safety.as_ref() else {
            return;
        };
        if safety.overall_risk <= self.safety_veto_risk || !decision.action.increases_stimulus() {
            return;
        }

        let overwritten = decision.action;
        decision.action = DecisionAction::ReduceLoad;
        decision.priority = DecisionPriority::High;
        decision.modifiers = Some(LoadModifiers {
            load: 0.85,
            volume: 0.80,
        });
        decision.factors.push(format!(
            "Safety override: risk {:.2} vetoes {overwritten:?}",
            safety.overall_risk
        ));
        decision.recommendation =
            "Safety risk is elevated; reduce load this week instead of pushing.".to_owned();
        records.push(ConflictRecord {
            kind: ConflictKind::DecisionVsSafety,
            field: "decision.action".to_owned(),
            winner: ModuleId::Safety,
            loser: ModuleId::Strategy,
            description: format!(
                "Decision {overwritten:?} raises stimulus while safety risk is {:.2}",
                safety.overall_risk
            ),
            resolution: "decision rewritten to reduce_load".to_owned(),
        });
    }
}
