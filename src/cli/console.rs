//! The interactive seat.
//!
//! `ConsolePolicy` answers the engine's questions by prompting on a line
//! stream. Inspection commands typed at any prompt are answered in place and
//! the question is asked again. When input runs out every question gets its
//! fallback answer (first option, gold, no build, end turn) so the game can
//! still finish.

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use crate::cards::{BuildingCard, Role};
use crate::core::{GameState, PlayerId};
use crate::effects::DemolitionTarget;
use crate::policy::{DecisionPolicy, IncomeChoice, TurnCommand};

use super::commands::{render, render_hand, Command};

/// Human seat reading from `R` and writing prompts to `W`.
pub struct ConsolePolicy<R, W> {
    input: R,
    output: W,
    exhausted: bool,
}

impl ConsolePolicy<StdinLock<'static>, Stdout> {
    /// Prompt on the process's own terminal.
    #[must_use]
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePolicy<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            exhausted: false,
        }
    }

    /// Give back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{text}").and_then(|()| self.output.flush()) {
            tracing::warn!(%err, "console write failed");
        }
    }

    fn read_line(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                tracing::debug!("console input closed");
                self.exhausted = true;
                None
            }
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                tracing::warn!(%err, "console read failed");
                self.exhausted = true;
                None
            }
        }
    }

    /// Ask a question, answering inspection commands until something else
    /// is typed. `None` once input is exhausted.
    fn prompt(&mut self, state: &GameState, me: PlayerId, question: &str) -> Option<String> {
        loop {
            self.say(&format!("> {question}"));
            let line = self.read_line()?;
            match Command::parse(&line) {
                Some(command) if command.is_inspection() => {
                    let text = render(&command, state, me);
                    self.say(&text);
                }
                _ => return Some(line),
            }
        }
    }

    /// Ask for a 1-based number in `1..=len`, returned 0-based.
    fn prompt_index(&mut self, state: &GameState, me: PlayerId, question: &str, len: usize) -> usize {
        loop {
            let Some(line) = self.prompt(state, me, question) else {
                return 0;
            };
            match line.parse::<usize>() {
                Ok(n) if (1..=len).contains(&n) => return n - 1,
                _ => self.say(&format!("Please enter a number from 1 to {len}.")),
            }
        }
    }

    fn list<T: std::fmt::Display>(&mut self, items: impl IntoIterator<Item = T>) {
        for (index, item) in items.into_iter().enumerate() {
            self.say(&format!("  {}. {}", index + 1, item));
        }
    }
}

impl<R: BufRead, W: Write> DecisionPolicy for ConsolePolicy<R, W> {
    fn is_human(&self) -> bool {
        true
    }

    fn choose_role(&mut self, state: &GameState, me: PlayerId, pool: &[Role]) -> usize {
        self.say("Choose your character. Available characters:");
        self.list(pool.iter().map(|role| format!("{} ({}): {}", role, role.rank(), role.ability())));
        self.prompt_index(state, me, "Your choice:", pool.len())
    }

    fn choose_final_role(&mut self, state: &GameState, me: PlayerId, offer: &[Role; 2]) -> usize {
        self.say("You pick last. Choose between the remaining character and the face-down one:");
        self.list(offer.iter().map(|role| format!("{} ({}): {}", role, role.rank(), role.ability())));
        self.prompt_index(state, me, "Your choice:", offer.len())
    }

    fn choose_income(&mut self, state: &GameState, me: PlayerId) -> IncomeChoice {
        loop {
            let Some(line) = self.prompt(state, me, "Collect 2 gold or draw two cards and keep one [gold/cards]:") else {
                return IncomeChoice::Gold;
            };
            match line.to_ascii_lowercase().as_str() {
                "gold" | "g" | "collect" => return IncomeChoice::Gold,
                "cards" | "c" | "draw" => return IncomeChoice::Cards,
                _ => self.say("Type 'gold' or 'cards'."),
            }
        }
    }

    fn choose_card_to_keep(&mut self, state: &GameState, me: PlayerId, drawn: &[BuildingCard; 2]) -> usize {
        self.say("You drew:");
        self.list(drawn.iter());
        self.prompt_index(state, me, "Which card do you keep?", drawn.len())
    }

    fn choose_build(&mut self, state: &GameState, me: PlayerId, builds_left: usize) -> Option<usize> {
        let hand = render_hand(state, me);
        self.say(&hand);
        let question = format!("Build a district by number ({builds_left} left this turn), or press Enter to skip:");
        loop {
            let line = self.prompt(state, me, &question)?;
            let line = line.to_ascii_lowercase();
            let number = line.strip_prefix("build").unwrap_or(&line).trim();
            if number.is_empty() || matches!(number, "none" | "skip" | "end") {
                return None;
            }
            match number.parse::<usize>() {
                Ok(n) if n >= 1 => return Some(n - 1),
                _ => self.say("Enter a card number from your hand, or press Enter to skip."),
            }
        }
    }

    fn choose_assassination(&mut self, state: &GameState, me: PlayerId, candidates: &[Role]) -> usize {
        self.say("Who do you want to kill?");
        self.list(candidates.iter());
        self.prompt_index(state, me, "Your target:", candidates.len())
    }

    fn choose_theft(&mut self, state: &GameState, me: PlayerId, victims: &[PlayerId]) -> usize {
        self.say("Who do you want to rob?");
        let names: Vec<String> = victims
            .iter()
            .map(|id| format!("{} ({} gold)", state.player(*id).name(), state.player(*id).gold()))
            .collect();
        self.list(names);
        self.prompt_index(state, me, "Your target:", victims.len())
    }

    fn choose_demolition(
        &mut self,
        state: &GameState,
        me: PlayerId,
        targets: &[DemolitionTarget],
    ) -> Option<usize> {
        self.say("You may destroy one of these districts:");
        let rows: Vec<String> = targets
            .iter()
            .map(|t| format!("{}'s {} (costs you {} gold)", state.player(t.owner).name(), t.name, t.price))
            .collect();
        self.list(rows);
        loop {
            let line = self.prompt(state, me, "Destroy which one? Press Enter to spare them all:")?;
            if line.is_empty() || line.eq_ignore_ascii_case("none") {
                return None;
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=targets.len()).contains(&n) => return Some(n - 1),
                _ => self.say(&format!("Please enter a number from 1 to {}.", targets.len())),
            }
        }
    }

    fn next_command(&mut self, state: &GameState, me: PlayerId) -> TurnCommand {
        loop {
            let Some(line) = self.prompt(state, me, "Your turn. Type 'end' to finish, 'help' for commands:") else {
                return TurnCommand::EndTurn;
            };
            match Command::parse(&line) {
                Some(Command::End) => return TurnCommand::EndTurn,
                Some(Command::Action) => return TurnCommand::UseAbility,
                Some(Command::Debug) => return TurnCommand::ToggleDebug,
                Some(Command::Save(path)) => return TurnCommand::Save(path),
                Some(Command::Load(path)) => return TurnCommand::Load(path),
                _ => self.say("Unknown command. Type 'help' for a list."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::cards::{CardId, Color};
    use crate::core::{GameRng, Player};
    use crate::zones::Catalog;

    fn table() -> GameState {
        let players = (1..=4).map(|i| Player::new(format!("Player {i}"), 2)).collect();
        GameState::new(players, Catalog::new(), PlayerId::new(0), 8, GameRng::new(0))
    }

    fn console(input: &str) -> ConsolePolicy<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePolicy::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_role_prompt_reasks_and_answers_inspection() {
        let state = table();
        let mut policy = console("9\nhand\n2\n");
        let pick = policy.choose_role(&state, PlayerId::new(0), &[Role::Thief, Role::King]);
        assert_eq!(pick, 1);

        let output = String::from_utf8(policy.into_output()).unwrap();
        assert!(output.contains("Please enter a number from 1 to 2."));
        assert!(output.contains("You have 2 gold."));
    }

    #[test]
    fn test_income_words() {
        let state = table();
        let mut policy = console("maybe\ncards\n");
        assert_eq!(policy.choose_income(&state, PlayerId::new(0)), IncomeChoice::Cards);
    }

    #[test]
    fn test_build_accepts_number_or_skip() {
        let state = table();
        let me = PlayerId::new(0);
        let mut policy = console("build 2\n\n");
        assert_eq!(policy.choose_build(&state, me, 1), Some(1));
        assert_eq!(policy.choose_build(&state, me, 1), None);
    }

    #[test]
    fn test_command_window() {
        let state = table();
        let me = PlayerId::new(0);
        let mut policy = console("gold\nfly\ndebug\nsave game.json\nend\n");
        assert_eq!(policy.next_command(&state, me), TurnCommand::ToggleDebug);
        assert_eq!(policy.next_command(&state, me), TurnCommand::Save("game.json".into()));
        assert_eq!(policy.next_command(&state, me), TurnCommand::EndTurn);
    }

    #[test]
    fn test_exhausted_input_falls_back() {
        let state = table();
        let me = PlayerId::new(0);
        let mut policy = console("");
        assert_eq!(policy.choose_role(&state, me, &Role::ALL), 0);
        assert_eq!(policy.choose_income(&state, me), IncomeChoice::Gold);
        assert_eq!(policy.choose_build(&state, me, 3), None);
        let drawn = [
            BuildingCard::new(CardId::new(1), "Manor", Color::Yellow, 3, ""),
            BuildingCard::new(CardId::new(2), "Temple", Color::Blue, 1, ""),
        ];
        assert_eq!(policy.choose_card_to_keep(&state, me, &drawn), 0);
        assert_eq!(policy.next_command(&state, me), TurnCommand::EndTurn);
    }
}
