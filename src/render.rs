//! Plain-text board snapshots.
//!
//! Rows are printed top to bottom (highest `y` first), each terminated by a
//! newline. With fewer than ten players every cell is one character: `.`
//! for an empty cell or the owner's digit. With ten or more players every
//! cell is a right-aligned field one character wider than the largest
//! player id, so columns stay aligned:
//!
//! ```text
//!   .  3 12
//!  10  .  .
//! ```

use crate::error::GammaResult;
use crate::game::{Coord, EMPTY, Grid, PlayerId};

/// Number of decimal digits of `n`.
#[must_use]
pub const fn digits(mut n: u32) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

/// Width in characters of one cell for a game with `players` players.
#[must_use]
pub const fn cell_width(players: u32) -> usize {
    if players < 10 { 1 } else { digits(players) + 1 }
}

/// Append one cell, right-aligned in `width` characters.
pub fn push_cell(out: &mut String, owner: PlayerId, width: usize) {
    let mut buf = [b' '; 10];
    let text: &[u8] = if owner == EMPTY {
        b"."
    } else {
        let mut n = owner;
        let mut start = buf.len();
        loop {
            start -= 1;
            #[allow(clippy::cast_possible_truncation)]
            let digit = (n % 10) as u8;
            buf[start] = b'0' + digit;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        &buf[start..]
    };

    for _ in text.len()..width {
        out.push(' ');
    }
    for &b in text {
        out.push(char::from(b));
    }
}

/// Render the grid as text.
///
/// # Errors
///
/// Returns [`crate::OutOfMemory`] if the output buffer cannot be allocated.
pub fn render_grid(grid: &Grid, players: u32) -> GammaResult<String> {
    let width = cell_width(players);
    let row_len = grid.width() as usize * width + 1;

    let mut out = String::new();
    out.try_reserve_exact(row_len.saturating_mul(grid.height() as usize))?;

    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            push_cell(&mut out, grid.owner(Coord::new(x, y)), width);
        }
        out.push('\n');
    }

    Ok(out)
}
