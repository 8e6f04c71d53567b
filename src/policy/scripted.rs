//! Scripted decisions for deterministic tables.
//!
//! Each decision kind has its own queue of answers. When a queue runs dry the
//! policy falls back to a fixed answer: first option, gold, no build, no
//! demolition, end turn.

use std::collections::VecDeque;

use crate::cards::{BuildingCard, Role};
use crate::core::{GameState, PlayerId};
use crate::effects::DemolitionTarget;

use super::decision::{DecisionPolicy, IncomeChoice, TurnCommand};

/// Replays queued answers.
///
/// ```
/// use rust_citadels::policy::{IncomeChoice, ScriptedPolicy};
///
/// let policy = ScriptedPolicy::new()
///     .with_roles([2])
///     .with_incomes([IncomeChoice::Cards])
///     .with_builds([Some(0), None]);
/// # let _ = policy;
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedPolicy {
    human: bool,
    roles: VecDeque<usize>,
    final_roles: VecDeque<usize>,
    incomes: VecDeque<IncomeChoice>,
    keeps: VecDeque<usize>,
    builds: VecDeque<Option<usize>>,
    assassinations: VecDeque<usize>,
    thefts: VecDeque<usize>,
    demolitions: VecDeque<Option<usize>>,
    commands: VecDeque<TurnCommand>,
}

impl ScriptedPolicy {
    /// A policy with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report this seat as human.
    #[must_use]
    pub fn as_human(mut self) -> Self {
        self.human = true;
        self
    }

    #[must_use]
    pub fn with_roles(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.roles.extend(picks);
        self
    }

    #[must_use]
    pub fn with_final_roles(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.final_roles.extend(picks);
        self
    }

    #[must_use]
    pub fn with_incomes(mut self, choices: impl IntoIterator<Item = IncomeChoice>) -> Self {
        self.incomes.extend(choices);
        self
    }

    #[must_use]
    pub fn with_keeps(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.keeps.extend(picks);
        self
    }

    /// Queue build answers. `None` ends the build phase for that turn.
    #[must_use]
    pub fn with_builds(mut self, picks: impl IntoIterator<Item = Option<usize>>) -> Self {
        self.builds.extend(picks);
        self
    }

    #[must_use]
    pub fn with_assassinations(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.assassinations.extend(picks);
        self
    }

    #[must_use]
    pub fn with_thefts(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.thefts.extend(picks);
        self
    }

    #[must_use]
    pub fn with_demolitions(mut self, picks: impl IntoIterator<Item = Option<usize>>) -> Self {
        self.demolitions.extend(picks);
        self
    }

    /// Queue command-window commands. Add `EndTurn` to finish each turn;
    /// an empty queue also ends it.
    #[must_use]
    pub fn with_commands(mut self, commands: impl IntoIterator<Item = TurnCommand>) -> Self {
        self.commands.extend(commands);
        self
    }
}

impl DecisionPolicy for ScriptedPolicy {
    fn is_human(&self) -> bool {
        self.human
    }

    fn choose_role(&mut self, _state: &GameState, _me: PlayerId, _pool: &[Role]) -> usize {
        self.roles.pop_front().unwrap_or(0)
    }

    fn choose_final_role(&mut self, _state: &GameState, _me: PlayerId, _offer: &[Role; 2]) -> usize {
        self.final_roles.pop_front().unwrap_or(0)
    }

    fn choose_income(&mut self, _state: &GameState, _me: PlayerId) -> IncomeChoice {
        self.incomes.pop_front().unwrap_or(IncomeChoice::Gold)
    }

    fn choose_card_to_keep(&mut self, _state: &GameState, _me: PlayerId, _drawn: &[BuildingCard; 2]) -> usize {
        self.keeps.pop_front().unwrap_or(0)
    }

    fn choose_build(&mut self, _state: &GameState, _me: PlayerId, _builds_left: usize) -> Option<usize> {
        self.builds.pop_front().flatten()
    }

    fn choose_assassination(&mut self, _state: &GameState, _me: PlayerId, _candidates: &[Role]) -> usize {
        self.assassinations.pop_front().unwrap_or(0)
    }

    fn choose_theft(&mut self, _state: &GameState, _me: PlayerId, _victims: &[PlayerId]) -> usize {
        self.thefts.pop_front().unwrap_or(0)
    }

    fn choose_demolition(
        &mut self,
        _state: &GameState,
        _me: PlayerId,
        _targets: &[DemolitionTarget],
    ) -> Option<usize> {
        self.demolitions.pop_front().flatten()
    }

    fn next_command(&mut self, _state: &GameState, _me: PlayerId) -> TurnCommand {
        self.commands.pop_front().unwrap_or(TurnCommand::EndTurn)
    }
}
