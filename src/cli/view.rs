//! Event rendering for the console.
//!
//! `ConsoleView` is an `EventSink` that turns the event stream into table
//! talk. It knows which seat is the viewer so other players' roles stay
//! hidden until their rank is called.

use std::io::Write;

use crate::cards::Role;
use crate::core::{GameState, PlayerId};
use crate::effects::AbilityOutcome;
use crate::events::{EndReason, EventSink, GameEvent};

/// Prints events as they happen.
pub struct ConsoleView<W> {
    out: W,
    viewer: Option<PlayerId>,
}

impl<W: Write> ConsoleView<W> {
    /// `viewer` is the human seat, if any.
    #[must_use]
    pub fn new(out: W, viewer: Option<PlayerId>) -> Self {
        Self { out, viewer }
    }

    fn is_viewer(&self, player: PlayerId) -> bool {
        self.viewer == Some(player)
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            tracing::warn!(%err, "console write failed");
        }
    }

    fn show_computer_seats(&mut self, state: &GameState) {
        for (id, player) in state.players.iter() {
            if self.is_viewer(id) {
                continue;
            }
            let hand: Vec<&str> = player.hand().iter().map(|card| card.name.as_str()).collect();
            self.line(&format!(
                "[debug] {}: {} gold, hand: {}",
                player.name(),
                player.gold(),
                hand.join(", ")
            ));
        }
    }

    fn describe(&self, event: &GameEvent, state: &GameState) -> Option<String> {
        let name = |id: PlayerId| state.player(id).name().to_string();
        let text = match event {
            GameEvent::RoundStarted { round, crowned } => format!(
                "================================\nROUND {round}\n{} has the crown.",
                name(*crowned)
            ),
            GameEvent::DraftPrepared { face_up, .. } => {
                let mut text = String::from("A mystery character was removed face down.");
                for role in face_up {
                    text.push_str(&format!("\n{role} was removed from the character deck."));
                }
                text
            }
            GameEvent::RoleAssigned { player, role } if self.is_viewer(*player) => {
                format!("You chose the {role}.")
            }
            GameEvent::RoleAssigned { player, .. } => format!("{} chose a character.", name(*player)),
            GameEvent::TurnStarted { player, role } => {
                let marker = if self.is_viewer(*player) { " (you)" } else { "" };
                format!("\n{} ({}): {}{}", role, role.rank(), name(*player), marker)
            }
            GameEvent::TurnSkipped { player, role } => {
                format!("\n{role} ({}): {} was killed and loses the turn.", role.rank(), name(*player))
            }
            GameEvent::GoldTaken { player, amount, fallback } => {
                let note = if *fallback { " (the deck is empty)" } else { "" };
                format!("{} collects {amount} gold{note}.", name(*player))
            }
            GameEvent::CardKept { player, kept, .. } if self.is_viewer(*player) => {
                format!("You keep {kept}.")
            }
            GameEvent::CardKept { player, .. } => format!("{} draws a card.", name(*player)),
            GameEvent::DistrictBuilt { player, card } => format!("{} built {card}.", name(*player)),
            GameEvent::BuildRefused { player, reason } if self.is_viewer(*player) => {
                format!("Cannot build: {reason}.")
            }
            GameEvent::BuildRefused { .. } => return None,
            GameEvent::AbilityResolved { player, role, outcome } => {
                describe_outcome(&name(*player), *role, outcome, &name)
            }
            GameEvent::AbilityRejected { player, role } => {
                format!("{} already used the {role} ability this round.", name(*player))
            }
            GameEvent::CityCompleted { player, first } => {
                let note = if *first { " first" } else { "" };
                format!("{} has{note} completed their city!", name(*player))
            }
            GameEvent::CrownPassed { player } => format!("{} receives the crown.", name(*player)),
            GameEvent::RoundEnded { .. } => return None,
            GameEvent::GameSaved { path } => format!("Game saved to {path}."),
            GameEvent::PersistenceFailed { path, reason } => format!("Could not use {path}: {reason}"),
            GameEvent::RestoreQueued { path } => {
                format!("Loaded {path}. The saved game takes over when this turn ends.")
            }
            GameEvent::GameRestored => "Saved game restored.".to_string(),
            GameEvent::DebugToggled { enabled } => {
                format!("Debug mode {}.", if *enabled { "on" } else { "off" })
            }
            GameEvent::GameEnded { scores, winner, reason } => {
                let mut text = match reason {
                    EndReason::CityCompleted => String::from("\nA city is complete. Final scores:"),
                    EndReason::RoundLimit => String::from("\nRound limit reached. Final scores:"),
                };
                for score in scores {
                    text.push_str(&format!(
                        "\n  {}: {} (districts {}, colors {}, completion {}, special {})",
                        name(score.player),
                        score.total,
                        score.base,
                        score.color_bonus,
                        score.completion_bonus,
                        score.special_bonus
                    ));
                }
                if let Some(winner) = winner {
                    text.push_str(&format!("\n{} wins!", name(*winner)));
                }
                text
            }
        };
        Some(text)
    }
}

fn describe_outcome(actor: &str, role: Role, outcome: &AbilityOutcome, name: &dyn Fn(PlayerId) -> String) -> String {
    match outcome {
        AbilityOutcome::Assassinated { target, .. } => format!("{actor} kills the {target}."),
        AbilityOutcome::Robbed { victim, amount } => {
            format!("{actor} robs {} of {amount} gold.", name(*victim))
        }
        AbilityOutcome::NothingToRob => format!("{actor} finds nobody to rob."),
        AbilityOutcome::HandRefreshed { returned, drawn } => {
            format!("{actor} swaps {returned} cards for {drawn} new ones.")
        }
        AbilityOutcome::Crowned { income } => {
            format!("{actor} collects {income} gold and will take the crown.")
        }
        AbilityOutcome::Sanctified { income } => {
            format!("{actor} collects {income} gold; their city is safe from the Warlord.")
        }
        AbilityOutcome::Traded { income } => format!("{actor} collects {income} gold."),
        AbilityOutcome::ExtraCards { drawn } => format!("{actor} draws {drawn} extra cards."),
        AbilityOutcome::Razed {
            income,
            victim,
            building,
            paid,
        } => format!(
            "{actor} collects {income} gold and destroys {}'s {} for {paid} gold.",
            name(*victim),
            building.name
        ),
        AbilityOutcome::NoTargets { income } => {
            format!("{actor} collects {income} gold; there is nothing the {role} can destroy.")
        }
        AbilityOutcome::Declined { income } => {
            format!("{actor} collects {income} gold and spares every city.")
        }
    }
}

impl<W: Write> EventSink for ConsoleView<W> {
    fn on_event(&mut self, event: &GameEvent, state: &GameState) {
        if let Some(text) = self.describe(event, state) {
            self.line(&text);
        }

        let reveal = match event {
            GameEvent::DebugToggled { enabled } => *enabled,
            GameEvent::RoundStarted { .. } => state.debug,
            _ => false,
        };
        if reveal {
            self.show_computer_seats(state);
        }
    }
}
