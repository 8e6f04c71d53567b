//! Free-form text commands.
//!
//! Inspection commands (`hand`, `gold`, `city`, `info`, `all`, `help`) can be
//! typed at any prompt and never change the table. The others (`debug`,
//! `action`, `save`, `load`, `end`) only mean something in the command window
//! after the ability phase.

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::cards::Role;
use crate::core::{GameState, PlayerId};

pub const HELP: &str = "\
Available commands:
  hand              show your gold and hand
  gold [p]          show gold of player p (default: you)
  city [p]          show the city of player p (also: citadel, list)
  info <name>       show a character's ability or a purple district's text
  all               show every player's gold, hand size and city
  action            use your character ability
  debug             toggle showing computer hands
  save <file>       save the game (.bin for binary, anything else JSON)
  load <file>       load a saved game when this turn ends
  end               end your turn
  help              show this list";

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Hand,
    /// 1-based player number, `None` for yourself.
    Gold(Option<usize>),
    City(Option<usize>),
    Info(String),
    All,
    Help,
    Debug,
    Action,
    Save(PathBuf),
    Load(PathBuf),
    End,
}

impl Command {
    /// Parse a line. Returns `None` for anything unrecognised.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_ascii_lowercase();
        let rest: Vec<&str> = words.collect();
        let player = || rest.first().and_then(|p| p.parse::<usize>().ok());

        let command = match verb.as_str() {
            "hand" => Command::Hand,
            "gold" => Command::Gold(player()),
            "city" | "citadel" | "list" => Command::City(player()),
            "info" if !rest.is_empty() => Command::Info(rest.join(" ")),
            "all" => Command::All,
            "help" | "?" => Command::Help,
            "debug" => Command::Debug,
            "action" => Command::Action,
            "save" if !rest.is_empty() => Command::Save(PathBuf::from(rest.join(" "))),
            "load" if !rest.is_empty() => Command::Load(PathBuf::from(rest.join(" "))),
            "end" => Command::End,
            _ => return None,
        };
        Some(command)
    }

    /// Whether the command only reads the table.
    #[must_use]
    pub fn is_inspection(&self) -> bool {
        matches!(
            self,
            Command::Hand | Command::Gold(_) | Command::City(_) | Command::Info(_) | Command::All | Command::Help
        )
    }
}

/// Text for an inspection command, as seen from seat `me`.
#[must_use]
pub fn render(command: &Command, state: &GameState, me: PlayerId) -> String {
    match command {
        Command::Hand => render_hand(state, me),
        Command::Gold(who) => match seat(state, *who, me) {
            Some(id) => format!("{} has {} gold.", state.player(id).name(), state.player(id).gold()),
            None => no_such_player(state),
        },
        Command::City(who) => match seat(state, *who, me) {
            Some(id) => render_city(state, id),
            None => no_such_player(state),
        },
        Command::Info(name) => render_info(state, me, name),
        Command::All => render_all(state, me),
        Command::Help => HELP.to_string(),
        _ => String::new(),
    }
}

fn seat(state: &GameState, number: Option<usize>, me: PlayerId) -> Option<PlayerId> {
    match number {
        None => Some(me),
        Some(n) if (1..=state.player_count()).contains(&n) => Some(PlayerId::new((n - 1) as u8)),
        Some(_) => None,
    }
}

fn no_such_player(state: &GameState) -> String {
    format!("Players are numbered 1 to {}.", state.player_count())
}

/// Gold and numbered hand.
#[must_use]
pub fn render_hand(state: &GameState, me: PlayerId) -> String {
    let player = state.player(me);
    let mut out = format!("You have {} gold.\nYour hand:", player.gold());
    if player.hand().is_empty() {
        out.push_str(" (empty)");
    }
    for (index, card) in player.hand().iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", index + 1, card);
    }
    out
}

fn render_city(state: &GameState, id: PlayerId) -> String {
    let player = state.player(id);
    if player.city().is_empty() {
        return format!("{} has not built anything yet.", player.name());
    }
    let mut out = format!("{} has built:", player.name());
    for card in player.city().iter() {
        let _ = write!(out, "\n  {card}");
    }
    let _ = write!(out, "\n  ({} of {} districts)", player.city().len(), state.win_threshold);
    out
}

fn render_info(state: &GameState, me: PlayerId, name: &str) -> String {
    if let Ok(role) = name.parse::<Role>() {
        return format!("{} ({}): {}", role, role.rank(), role.ability());
    }
    let player = state.player(me);
    let card = player
        .hand()
        .iter()
        .chain(player.city().iter())
        .find(|card| card.name.eq_ignore_ascii_case(name));
    match card {
        Some(card) if card.is_special() => format!("{}: {}", card.name, card.text),
        Some(card) => format!("{card} has no special ability."),
        None => format!("No character or district in your hand or city is called {name:?}."),
    }
}

fn render_all(state: &GameState, me: PlayerId) -> String {
    let mut out = String::new();
    for (id, player) in state.players.iter() {
        let marker = if id == me { " (you)" } else { "" };
        let built: Vec<String> = player
            .city()
            .iter()
            .map(|card| format!("{} [{}{}]", card.name, card.color, card.cost))
            .collect();
        let _ = writeln!(
            out,
            "{}{}: cards={} gold={} city={}",
            player.name(),
            marker,
            player.hand().len(),
            player.gold(),
            built.join(", ")
        );
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BuildingCard, CardId, Color};
    use crate::core::{GameRng, Player};
    use crate::zones::Catalog;

    fn table() -> GameState {
        let players = (1..=4).map(|i| Player::new(format!("Player {i}"), 2)).collect();
        let mut state = GameState::new(players, Catalog::new(), PlayerId::new(0), 8, GameRng::new(0));
        state.player_mut(PlayerId::new(0)).add_to_hand(BuildingCard::new(
            CardId::new(1),
            "Map Room",
            Color::Purple,
            5,
            "Score one point per card in hand.",
        ));
        state
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("hand"), Some(Command::Hand));
        assert_eq!(Command::parse("gold 3"), Some(Command::Gold(Some(3))));
        assert_eq!(Command::parse("citadel"), Some(Command::City(None)));
        assert_eq!(Command::parse("LIST 2"), Some(Command::City(Some(2))));
        assert_eq!(Command::parse("info map room"), Some(Command::Info("map room".into())));
        assert_eq!(Command::parse("save game.json"), Some(Command::Save("game.json".into())));
        assert_eq!(Command::parse("end"), Some(Command::End));
        assert_eq!(Command::parse("t"), None);
        assert_eq!(Command::parse("save"), None);
        assert_eq!(Command::parse("fly"), None);
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn test_inspection_split() {
        assert!(Command::Hand.is_inspection());
        assert!(Command::All.is_inspection());
        assert!(!Command::Debug.is_inspection());
        assert!(!Command::End.is_inspection());
    }

    #[test]
    fn test_render_gold_and_bad_player() {
        let state = table();
        let me = PlayerId::new(0);
        assert_eq!(render(&Command::Gold(Some(2)), &state, me), "Player 2 has 2 gold.");
        assert_eq!(render(&Command::Gold(Some(9)), &state, me), "Players are numbered 1 to 4.");
    }

    #[test]
    fn test_render_info() {
        let state = table();
        let me = PlayerId::new(0);
        let text = render(&Command::Info("warlord".into()), &state, me);
        assert!(text.starts_with("Warlord (8)"));
        let text = render(&Command::Info("map room".into()), &state, me);
        assert_eq!(text, "Map Room: Score one point per card in hand.");
    }

    #[test]
    fn test_render_hand() {
        let state = table();
        let text = render_hand(&state, PlayerId::new(0));
        assert!(text.contains("You have 2 gold."));
        assert!(text.contains("1. Map Room [purple] [5]"));
    }
}
