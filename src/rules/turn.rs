//! The turn engine.
//!
//! Ranks are walked in order; a rank nobody drafted is skipped silently. A
//! turn is:
//! 1. Skip check (assassinated), then the Assassin's and Thief's abilities
//! 2. Income: two gold, or draw two and keep one
//! 3. Builds, up to the role's cap
//! 4. The ability of every other role
//! 5. The command window, until the seat ends its turn

use std::path::Path;

use crate::cards::{BuildingCard, Role};
use crate::core::PlayerId;
use crate::effects::resolve;
use crate::events::GameEvent;
use crate::persist::Snapshot;
use crate::policy::{ask_index, IncomeChoice, TurnCommand, MAX_ASKS};

use super::round::RoundContext;

/// Gold taken as income.
pub const GOLD_INCOME: u32 = 2;

/// Cards drawn when taking cards as income.
pub const CARDS_DRAWN: usize = 2;

/// Walk ranks 1 through 8 and play each holder's turn.
///
/// Stops early once a saved table is queued to replace this one.
pub fn play_turns(cx: &mut RoundContext<'_>) {
    for role in Role::ALL {
        if cx.round.restore.is_some() {
            tracing::info!("restore queued, ending the round early");
            break;
        }
        if let Some(player) = cx.state.holder_of(role) {
            take_turn(cx, player, role);
        }
    }
}

/// Play one player's turn.
pub fn take_turn(cx: &mut RoundContext<'_>, player: PlayerId, role: Role) {
    if cx.state.player(player).is_incapacitated() {
        tracing::debug!(%player, %role, "assassinated, turn skipped");
        cx.emit(GameEvent::TurnSkipped { player, role });
        return;
    }

    tracing::debug!(%player, %role, "turn started");
    cx.emit(GameEvent::TurnStarted { player, role });
    if cx.state.debug && !cx.seats[player].is_human() {
        log_seat(cx, player);
    }

    if role.acts_before_income() {
        use_ability(cx, player, role);
    }
    collect_income(cx, player);
    build_phase(cx, player, role);
    if !role.acts_before_income() {
        use_ability(cx, player, role);
    }

    cx.note_completion(player);
    command_window(cx, player, role);
}

fn use_ability(cx: &mut RoundContext<'_>, player: PlayerId, role: Role) {
    match resolve(cx, player) {
        Ok(outcome) => cx.emit(GameEvent::AbilityResolved { player, role, outcome }),
        Err(err) => {
            tracing::debug!(%player, %err, "ability refused");
            cx.emit(GameEvent::AbilityRejected { player, role });
        }
    }
}

/// Income phase. An empty catalog forces gold; a single card left is
/// granted without a keep choice.
fn collect_income(cx: &mut RoundContext<'_>, player: PlayerId) {
    if cx.state.catalog.is_empty() {
        cx.state.player_mut(player).add_gold(GOLD_INCOME);
        cx.emit(GameEvent::GoldTaken {
            player,
            amount: GOLD_INCOME,
            fallback: true,
        });
        return;
    }

    match cx.seats[player].choose_income(cx.state, player) {
        IncomeChoice::Gold => {
            cx.state.player_mut(player).add_gold(GOLD_INCOME);
            cx.emit(GameEvent::GoldTaken {
                player,
                amount: GOLD_INCOME,
                fallback: false,
            });
        }
        IncomeChoice::Cards => {
            let drawn = cx.state.catalog.draw_up_to(CARDS_DRAWN);
            let pair = match <[BuildingCard; 2]>::try_from(drawn) {
                Ok(pair) => pair,
                Err(short) => {
                    for kept in short {
                        cx.state.player_mut(player).add_to_hand(kept.clone());
                        cx.emit(GameEvent::CardKept {
                            player,
                            kept,
                            returned: None,
                        });
                    }
                    return;
                }
            };

            let pick = ask_index(pair.len(), "card to keep", || {
                cx.seats[player].choose_card_to_keep(cx.state, player, &pair)
            });
            let [first, second] = pair;
            let (kept, returned) = if pick == 0 { (first, second) } else { (second, first) };
            cx.state.catalog.return_to_bottom(returned.clone());
            cx.state.player_mut(player).add_to_hand(kept.clone());
            cx.emit(GameEvent::CardKept {
                player,
                kept,
                returned: Some(returned),
            });
        }
    }
}

/// Build phase. Refused builds change nothing and are announced.
fn build_phase(cx: &mut RoundContext<'_>, player: PlayerId, role: Role) {
    let cap = role.build_cap();
    let mut built = 0;
    let mut refusals = 0;

    while built < cap && refusals < MAX_ASKS {
        let Some(index) = cx.seats[player].choose_build(cx.state, player, cap - built) else {
            break;
        };
        match cx.state.player_mut(player).build_from_hand(index) {
            Ok(card) => {
                built += 1;
                tracing::debug!(%player, card = %card, "built");
                cx.emit(GameEvent::DistrictBuilt { player, card });
            }
            Err(reason) => {
                refusals += 1;
                tracing::debug!(%player, %reason, "build refused");
                cx.emit(GameEvent::BuildRefused { player, reason });
            }
        }
    }
}

fn command_window(cx: &mut RoundContext<'_>, player: PlayerId, role: Role) {
    loop {
        match cx.seats[player].next_command(cx.state, player) {
            TurnCommand::EndTurn => break,
            TurnCommand::UseAbility => use_ability(cx, player, role),
            TurnCommand::ToggleDebug => {
                cx.state.debug = !cx.state.debug;
                let enabled = cx.state.debug;
                cx.emit(GameEvent::DebugToggled { enabled });
                if enabled {
                    for seat in cx.state.players.player_ids().collect::<Vec<_>>() {
                        if !cx.seats[seat].is_human() {
                            log_seat(cx, seat);
                        }
                    }
                }
            }
            TurnCommand::Save(path) => save(cx, &path),
            TurnCommand::Load(path) => queue_restore(cx, &path),
        }
    }
}

fn save(cx: &mut RoundContext<'_>, path: &Path) {
    let shown = path.display().to_string();
    match Snapshot::capture(cx.state).save(path) {
        Ok(()) => {
            tracing::info!(path = %shown, "game saved");
            cx.emit(GameEvent::GameSaved { path: shown });
        }
        Err(err) => {
            tracing::warn!(path = %shown, %err, "save failed");
            cx.emit(GameEvent::PersistenceFailed {
                path: shown,
                reason: err.to_string(),
            });
        }
    }
}

fn queue_restore(cx: &mut RoundContext<'_>, path: &Path) {
    let shown = path.display().to_string();
    let seated = cx.state.player_count();
    let loaded = Snapshot::load(path).and_then(|snapshot| {
        snapshot.validate_for(seated)?;
        Ok(snapshot)
    });
    match loaded {
        Ok(snapshot) => {
            tracing::info!(path = %shown, "restore queued");
            cx.round.restore = Some(snapshot);
            cx.emit(GameEvent::RestoreQueued { path: shown });
        }
        Err(err) => {
            tracing::warn!(path = %shown, %err, "load failed");
            cx.emit(GameEvent::PersistenceFailed {
                path: shown,
                reason: err.to_string(),
            });
        }
    }
}

/// Diagnostics: a computer seat's hidden information.
fn log_seat(cx: &RoundContext<'_>, seat: PlayerId) {
    let player = cx.state.player(seat);
    let hand: Vec<&str> = player.hand().iter().map(|card| card.name.as_str()).collect();
    tracing::info!(%seat, gold = player.gold(), ?hand, "computer seat");
}
