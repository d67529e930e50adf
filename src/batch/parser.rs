//! Parsing of protocol lines.

use crate::game::{GameConfig, PlayerId};

/// How the game started by the initial line is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `B`: commands are read line by line and answered on the output.
    Batch,
    /// `I`: the game is played in a full-screen terminal UI.
    Interactive,
}

/// One batch-mode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `m player x y`
    Move {
        /// Moving player.
        player: PlayerId,
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },
    /// `g player x y`
    GoldenMove {
        /// Moving player.
        player: PlayerId,
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },
    /// `b player`
    BusyFields {
        /// Queried player.
        player: PlayerId,
    },
    /// `f player`
    FreeFields {
        /// Queried player.
        player: PlayerId,
    },
    /// `q player`
    GoldenPossible {
        /// Queried player.
        player: PlayerId,
    },
    /// `p`
    Print,
}

/// Whether a line carries no command: a comment or an empty line.
#[must_use]
pub fn is_skippable(line: &str) -> bool {
    line.starts_with('#') || line == "\n"
}

/// Split a line on the protocol's whitespace set.
pub fn split_words(line: &str) -> impl Iterator<Item = &str> {
    line.split([' ', '\t', '\x0b', '\x0c', '\r', '\n'])
        .filter(|word| !word.is_empty())
}

/// Parse an unsigned decimal that fits in `u32`.
///
/// Signs, hex prefixes and any non-digit character are rejected; leading
/// zeros are allowed.
#[must_use]
pub fn parse_number(word: &str) -> Option<u32> {
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    word.parse().ok()
}

fn numbers<const N: usize>(words: &[&str]) -> Option<[u32; N]> {
    if words.len() != N {
        return None;
    }
    let mut out = [0u32; N];
    for (slot, word) in out.iter_mut().zip(words) {
        *slot = parse_number(word)?;
    }
    Some(out)
}

/// Parse the line that starts a game: `B|I width height players areas`.
///
/// Zero parameters are accepted here and refused by board creation.
#[must_use]
pub fn parse_initial(line: &str) -> Option<(Mode, GameConfig)> {
    let words: Vec<&str> = split_words(line).collect();
    let (&keyword, rest) = words.split_first()?;

    let mode = match keyword {
        "B" => Mode::Batch,
        "I" => Mode::Interactive,
        _ => return None,
    };
    if !line.starts_with(keyword) {
        return None;
    }

    let [width, height, players, areas] = numbers::<4>(rest)?;
    Some((mode, GameConfig::new(width, height, players, areas)))
}

/// Parse a batch-mode command line.
#[must_use]
pub fn parse_command(line: &str) -> Option<Command> {
    let words: Vec<&str> = split_words(line).collect();
    let (&keyword, rest) = words.split_first()?;
    if !line.starts_with(keyword) {
        return None;
    }

    let command = match keyword {
        "m" => {
            let [player, x, y] = numbers::<3>(rest)?;
            Command::Move { player, x, y }
        }
        "g" => {
            let [player, x, y] = numbers::<3>(rest)?;
            Command::GoldenMove { player, x, y }
        }
        "b" => {
            let [player] = numbers::<1>(rest)?;
            Command::BusyFields { player }
        }
        "f" => {
            let [player] = numbers::<1>(rest)?;
            Command::FreeFields { player }
        }
        "q" => {
            let [player] = numbers::<1>(rest)?;
            Command::GoldenPossible { player }
        }
        "p" if rest.is_empty() => Command::Print,
        _ => return None,
    };

    Some(command)
}
