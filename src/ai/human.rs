use std::io::{self, BufRead, Write};

use super::agent::Agent;
use crate::error::{AgentError, InputError};
use crate::game::{Observation, COLS};

/// Where a [`HumanAgent`] reads its answers from, one line at a time.
pub trait LineInput {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

/// Locks stdin only for the duration of each read, so several humans can
/// share the terminal.
impl LineInput for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for io::Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

impl<R: io::Read> LineInput for io::BufReader<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// A player at a terminal. Blocks until a legal column is typed; columns are
/// numbered 1–7 for the person and 0–6 for the game.
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
    name: String,
    /// Glyphs for own and opponent pieces when drawing the observation
    glyphs: [char; 2],
}

impl HumanAgent<io::Stdin, io::Stdout> {
    /// A human reading from stdin and prompting on stdout.
    pub fn stdio(name: impl Into<String>, glyphs: [char; 2]) -> Self {
        HumanAgent::new(io::stdin(), io::stdout(), name, glyphs)
    }
}

impl<R: LineInput, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W, name: impl Into<String>, glyphs: [char; 2]) -> Self {
        HumanAgent {
            input,
            output,
            name: name.into(),
            glyphs,
        }
    }

    fn draw(&mut self, observation: &Observation) -> io::Result<()> {
        let rule = "-".repeat(COLS * 4 + 1);
        writeln!(self.output, "{rule}")?;
        for row in observation {
            let mut line = String::from("|");
            for &cell in row {
                let glyph = match cell {
                    1 => self.glyphs[0],
                    -1 => self.glyphs[1],
                    _ => ' ',
                };
                line.push(' ');
                line.push(glyph);
                line.push_str(" |");
            }
            writeln!(self.output, "{line}")?;
        }
        writeln!(self.output, "{rule}")?;
        let labels: String = (1..=COLS).map(|c| format!("  {c} ")).collect();
        writeln!(self.output, "{}", labels.trim_end())
    }
}

/// Parse a 1-based column typed by a person into a 0-based action.
pub fn parse_column(text: &str) -> Result<usize, InputError> {
    let trimmed = text.trim();
    let number: i64 = trimmed
        .parse()
        .map_err(|_| InputError::Parse(trimmed.to_string()))?;
    if !(1..=COLS as i64).contains(&number) {
        return Err(InputError::OutOfRange(number));
    }
    Ok(number as usize - 1)
}

impl<R: LineInput, W: Write> Agent for HumanAgent<R, W> {
    fn next_move(
        &mut self,
        valid_actions: &[usize],
        observation: &Observation,
    ) -> Result<usize, AgentError> {
        self.draw(observation)?;
        loop {
            write!(self.output, "Player '{}', choose a column (1-7): ", self.glyphs[0])?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(AgentError::InputClosed);
            }

            match parse_column(&line) {
                Ok(action) if valid_actions.contains(&action) => return Ok(action),
                Ok(action) => writeln!(self.output, "Column {} is full. Try again.", action + 1)?,
                Err(e) => writeln!(self.output, "Invalid input: {e}. Try again.")?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Symbol};
    use std::io::Cursor;

    fn human(script: &str) -> HumanAgent<Cursor<Vec<u8>>, Vec<u8>> {
        let input = Cursor::new(script.as_bytes().to_vec());
        HumanAgent::new(input, Vec::new(), "Tester", ['o', 'x'])
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column(" 4\n"), Ok(3));
        assert_eq!(parse_column("1"), Ok(0));
        assert_eq!(parse_column("8"), Err(InputError::OutOfRange(8)));
        assert_eq!(parse_column("0"), Err(InputError::OutOfRange(0)));
        assert_eq!(parse_column("four"), Err(InputError::Parse("four".into())));
    }

    #[test]
    fn test_reprompts_until_valid() {
        let state = GameState::new(Symbol::A);
        let mut agent = human("abc\n9\n5\n");
        let action = agent
            .next_move(&state.valid_actions(), &state.observation(Symbol::A))
            .unwrap();
        assert_eq!(action, 4);

        let transcript = String::from_utf8(agent.output.clone()).unwrap();
        assert_eq!(transcript.matches("choose a column").count(), 3);
        assert!(transcript.contains("'abc' is not a column number"));
        assert!(transcript.contains("column 9 is not between 1 and 7"));
    }

    #[test]
    fn test_full_column_is_refused() {
        let mut agent = human("1\n2\n");
        let action = agent.next_move(&[1, 2, 3], &[[0; COLS]; 6]).unwrap();
        assert_eq!(action, 1);
        let transcript = String::from_utf8(agent.output.clone()).unwrap();
        assert!(transcript.contains("Column 1 is full"));
    }

    #[test]
    fn test_closed_input() {
        let mut agent = human("");
        let result = agent.next_move(&[0], &[[0; COLS]; 6]);
        assert!(matches!(result, Err(AgentError::InputClosed)));
    }

    #[test]
    fn test_draws_observation() {
        let mut state = GameState::new(Symbol::A);
        state.apply_move(0).unwrap();
        let mut agent = human("2\n");
        agent.next_move(&state.valid_actions(), &state.observation(Symbol::B)).unwrap();
        let transcript = String::from_utf8(agent.output.clone()).unwrap();
        // Seen from B, A's piece is the opponent's glyph.
        assert!(transcript.contains("| x |   |"));
    }

    #[test]
    fn test_two_stdio_humans_can_be_seated() {
        // Each constructor returns without waiting on stdin.
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let first = HumanAgent::stdio("Player 1", ['o', 'x']);
            let second = HumanAgent::stdio("Player 2", ['x', 'o']);
            let _ = tx.send((first.name().to_string(), second.name().to_string()));
        });
        let names = rx
            .recv_timeout(std::time::Duration::from_secs(3))
            .expect("second stdio human blocked behind the first");
        assert_eq!(names, ("Player 1".to_string(), "Player 2".to_string()));
    }
}
