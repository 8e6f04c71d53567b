//! Ability resolution.
//!
//! `resolve` runs a player's role ability at most once per round:
//! 1. Refuse if the player has no role or already resolved
//! 2. Pay color income for the roles that have it
//! 3. Ask the player's policy for any targets (`plan`)
//! 4. Apply the action (`apply`)
//!
//! Target lists are computed here, so a policy can only pick among legal
//! options.

use crate::cards::Role;
use crate::core::{AbilityError, PlayerId};
use crate::policy::{ask_index, ask_optional};
use crate::rules::RoundContext;

use super::ability::{AbilityAction, AbilityOutcome, DemolitionTarget};

/// Cards the Architect draws.
pub const ARCHITECT_DRAW: usize = 2;

/// Resolve `actor`'s role ability.
pub fn resolve(cx: &mut RoundContext<'_>, actor: PlayerId) -> Result<AbilityOutcome, AbilityError> {
    let role = cx
        .state
        .player(actor)
        .role()
        .ok_or(AbilityError::NoRole { player: actor })?;
    if !cx.round.abilities_used.insert(actor) {
        return Err(AbilityError::AlreadyResolved { role });
    }

    let income = collect_color_income(cx, actor, role);
    let action = plan(cx, actor, role);
    tracing::debug!(%actor, ?action, income, "resolving ability");
    Ok(apply(cx, actor, action, income))
}

/// Gold for matching districts plus the role's flat bonus.
fn collect_color_income(cx: &mut RoundContext<'_>, actor: PlayerId, role: Role) -> u32 {
    let Some(color) = role.income_color() else {
        return 0;
    };
    let player = cx.state.player_mut(actor);
    let income = player.city().count_color(color) as u32 + role.flat_bonus();
    player.add_gold(income);
    income
}

/// Roles the Assassin may name: every other role not discarded face up.
#[must_use]
pub fn assassination_candidates(cx: &RoundContext<'_>) -> Vec<Role> {
    Role::ALL
        .iter()
        .copied()
        .filter(|role| *role != Role::Assassin && !cx.round.face_up.contains(role))
        .collect()
}

/// Players the Thief may rob: role holders other than the Thief and the
/// Assassin's holder, in seating order.
#[must_use]
pub fn theft_victims(cx: &RoundContext<'_>, thief: PlayerId) -> Vec<PlayerId> {
    cx.state
        .players
        .iter()
        .filter(|(id, player)| {
            *id != thief && player.role().is_some() && player.role() != Some(Role::Assassin)
        })
        .map(|(id, _)| id)
        .collect()
}

/// Buildings the Warlord may destroy and afford.
#[must_use]
pub fn demolition_targets(cx: &RoundContext<'_>, warlord: PlayerId) -> Vec<DemolitionTarget> {
    let budget = cx.state.player(warlord).gold();
    let threshold = cx.state.win_threshold;
    let mut targets = Vec::new();

    for (owner, player) in cx.state.players.iter() {
        if owner == warlord
            || player.city().len() >= threshold
            || player.role() == Some(Role::Bishop)
            || cx.round.immune.contains(&owner)
        {
            continue;
        }
        for card in player.city().iter() {
            let price = card.demolition_price();
            if price <= budget {
                targets.push(DemolitionTarget {
                    owner,
                    card: card.id,
                    name: card.name.clone(),
                    price,
                });
            }
        }
    }
    targets
}

/// Collect the choices the ability needs.
fn plan(cx: &mut RoundContext<'_>, actor: PlayerId, role: Role) -> AbilityAction {
    match role {
        Role::Assassin => {
            let candidates = assassination_candidates(cx);
            let pick = ask_index(candidates.len(), "assassination", || {
                cx.seats[actor].choose_assassination(cx.state, actor, &candidates)
            });
            AbilityAction::Assassinate {
                target: candidates[pick],
            }
        }
        Role::Thief => {
            let victims = theft_victims(cx, actor);
            let victim = if victims.is_empty() {
                None
            } else {
                let pick = ask_index(victims.len(), "theft", || {
                    cx.seats[actor].choose_theft(cx.state, actor, &victims)
                });
                Some(victims[pick])
            };
            AbilityAction::Steal { victim }
        }
        Role::Magician => AbilityAction::RefreshHand,
        Role::King => AbilityAction::TakeCrown,
        Role::Bishop => AbilityAction::Sanctify,
        Role::Merchant => AbilityAction::Trade,
        Role::Architect => AbilityAction::DrawExtra,
        Role::Warlord => {
            let targets = demolition_targets(cx, actor);
            let target = if targets.is_empty() {
                None
            } else {
                ask_optional(targets.len(), "demolition", || {
                    cx.seats[actor].choose_demolition(cx.state, actor, &targets)
                })
                .map(|pick| targets[pick].clone())
            };
            AbilityAction::Raze { target }
        }
    }
}

/// Apply a planned action to the table.
fn apply(cx: &mut RoundContext<'_>, actor: PlayerId, action: AbilityAction, income: u32) -> AbilityOutcome {
    match action {
        AbilityAction::Assassinate { target } => {
            cx.round.killed = Some(target);
            let victim = cx.state.holder_of(target);
            if let Some(victim) = victim {
                cx.state.player_mut(victim).incapacitate();
            }
            AbilityOutcome::Assassinated { target, victim }
        }

        AbilityAction::Steal { victim: None } => AbilityOutcome::NothingToRob,
        AbilityAction::Steal { victim: Some(victim) } => {
            let amount = cx.state.player_mut(victim).take_all_gold();
            cx.state.player_mut(actor).add_gold(amount);
            AbilityOutcome::Robbed { victim, amount }
        }

        AbilityAction::RefreshHand => {
            let old_hand = cx.state.player_mut(actor).take_hand();
            let returned = old_hand.len();
            let drawn = cx.state.draw_into_hand(actor, returned);
            for card in old_hand {
                cx.state.catalog.return_to_bottom(card);
            }
            AbilityOutcome::HandRefreshed { returned, drawn }
        }

        AbilityAction::TakeCrown => {
            cx.state.player_mut(actor).grant_crown();
            AbilityOutcome::Crowned { income }
        }

        AbilityAction::Sanctify => {
            cx.round.immune.insert(actor);
            AbilityOutcome::Sanctified { income }
        }

        AbilityAction::Trade => AbilityOutcome::Traded { income },

        AbilityAction::DrawExtra => {
            let drawn = cx.state.draw_into_hand(actor, ARCHITECT_DRAW);
            AbilityOutcome::ExtraCards { drawn }
        }

        AbilityAction::Raze { target: None } => {
            if demolition_targets(cx, actor).is_empty() {
                AbilityOutcome::NoTargets { income }
            } else {
                AbilityOutcome::Declined { income }
            }
        }
        AbilityAction::Raze { target: Some(target) } => raze(cx, actor, target, income),
    }
}

fn raze(cx: &mut RoundContext<'_>, actor: PlayerId, target: DemolitionTarget, income: u32) -> AbilityOutcome {
    // Targets are priced against the current balance, so the spend succeeds.
    if let Err(err) = cx.state.player_mut(actor).spend_gold(target.price) {
        debug_assert!(false, "demolition target was not affordable: {err}");
        return AbilityOutcome::Declined { income };
    }
    let Some(building) = cx.state.player_mut(target.owner).city_mut().remove(target.card) else {
        debug_assert!(false, "demolition target left the city");
        cx.state.player_mut(actor).add_gold(target.price);
        return AbilityOutcome::Declined { income };
    };
    cx.state.catalog.return_to_bottom(building.clone());

    AbilityOutcome::Razed {
        income,
        victim: target.owner,
        building,
        paid: target.price,
    }
}
