use crate::canvas::Position;
use crate::color::Color;
use crate::palette::EMPTY_PALETTE;

/// One grid unit. Empty cells always show the checkerboard shade for their position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    color: Color,
    empty: bool,
}

impl Cell {
    pub fn empty_at(position: Position) -> Self {
        Self {
            color: checkerboard(position),
            empty: true,
        }
    }

    pub fn painted(color: Color) -> Self {
        Self {
            color,
            empty: false,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }
}

pub fn checkerboard(position: Position) -> Color {
    EMPTY_PALETTE[((position.x + position.y).rem_euclid(2)) as usize]
}
