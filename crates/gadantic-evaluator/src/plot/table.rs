use std::fmt;

use gadantic_engine::{FIELD_HEIGHT, FIELD_WIDTH, Perk, Position};

use super::{Plot, TileId};

/// Characters per cell column, including the left border.
const CELL_WIDTH: usize = 11;
/// Text lines per cell row, including the top border.
const CELL_HEIGHT: usize = 2;

const TABLE_WIDTH: usize = FIELD_WIDTH * CELL_WIDTH + 1;
const TABLE_HEIGHT: usize = FIELD_HEIGHT * CELL_HEIGHT + 1;

// Arms of a border junction.
const UP: u8 = 0b0001;
const DOWN: u8 = 0b0010;
const LEFT: u8 = 0b0100;
const RIGHT: u8 = 0b1000;

/// Badge shown next to a crop name when the tile fully receives `perk`.
#[must_use]
pub const fn badge(perk: Perk) -> char {
    match perk {
        Perk::Water => '♠',
        Perk::Weed => '☙',
        Perk::Quality => '★',
        Perk::Harvest => '⚘',
    }
}

/// One-line explanation of the badges, e.g. `♠ water | ☙ weed | ...`.
#[must_use]
pub fn legend() -> String {
    Perk::ALL
        .iter()
        .map(|perk| format!("{} {perk}", badge(*perk)))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn junction(arms: u8) -> char {
    match arms {
        0 => ' ',
        UP | DOWN | 0b0011 => '│',
        LEFT | RIGHT | 0b1100 => '─',
        0b1010 => '┌',
        0b0110 => '┐',
        0b1001 => '└',
        0b0101 => '┘',
        0b1011 => '├',
        0b0111 => '┤',
        0b1110 => '┬',
        0b1101 => '┴',
        _ => '┼',
    }
}

/// Draws the plot as a box table.
///
/// Every cell is a column of 11 characters and two lines. Borders are drawn only between
/// different tiles, so a 2×2 or 3×3 crop shows as one large box. Each tile shows its crop
/// name on its first line, followed by a [`badge`] for each perk it fully receives.
impl fmt::Display for Plot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut canvas = [[' '; TABLE_WIDTH]; TABLE_HEIGHT];

        let owner = |x: Option<usize>, y: Option<usize>| -> Option<TileId> {
            let pos = Position::new(x?, y?);
            (pos.x < FIELD_WIDTH && pos.y < FIELD_HEIGHT).then(|| self.owner_at(pos))
        };
        // wall on the left of cell (x, y)
        let vertical_wall =
            |x: usize, y: usize| owner(x.checked_sub(1), Some(y)) != owner(Some(x), Some(y));
        // wall above cell (x, y)
        let horizontal_wall =
            |x: usize, y: usize| owner(Some(x), y.checked_sub(1)) != owner(Some(x), Some(y));

        for vy in 0..=FIELD_HEIGHT {
            let line = &mut canvas[vy * CELL_HEIGHT];
            for vx in 0..=FIELD_WIDTH {
                let mut arms = 0;
                if vy > 0 && vertical_wall(vx, vy - 1) {
                    arms |= UP;
                }
                if vy < FIELD_HEIGHT && vertical_wall(vx, vy) {
                    arms |= DOWN;
                }
                if vx > 0 && horizontal_wall(vx - 1, vy) {
                    arms |= LEFT;
                }
                if vx < FIELD_WIDTH && horizontal_wall(vx, vy) {
                    arms |= RIGHT;
                }
                line[vx * CELL_WIDTH] = junction(arms);
                if arms & RIGHT != 0 {
                    line[vx * CELL_WIDTH + 1..(vx + 1) * CELL_WIDTH].fill('─');
                }
            }
        }

        for y in 0..FIELD_HEIGHT {
            for line in &mut canvas[y * CELL_HEIGHT + 1..(y + 1) * CELL_HEIGHT] {
                for vx in 0..=FIELD_WIDTH {
                    if vertical_wall(vx, y) {
                        line[vx * CELL_WIDTH] = '│';
                    }
                }
            }
        }

        for tile in self.tiles() {
            let origin = tile.origin();
            let badges: String = tile.perks().map(badge).collect();
            let width = tile.edge() * CELL_WIDTH - 1 - badges.chars().count();
            let label = format!("{:<width$.width$}{badges}", tile.crop().name());
            let line = &mut canvas[origin.y * CELL_HEIGHT + 1];
            let start = origin.x * CELL_WIDTH + 1;
            for (slot, ch) in line[start..].iter_mut().zip(label.chars()) {
                *slot = ch;
            }
        }

        for (i, line) in canvas.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&line.iter().collect::<String>())?;
        }
        Ok(())
    }
}
