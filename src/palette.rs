use crate::color::{Color, ColorError};

/// The two placeholder shades drawn under unpainted cells.
pub const EMPTY_PALETTE: [Color; 2] = [Color::new(0x42, 0x42, 0x42), Color::new(0x54, 0x53, 0x53)];

pub const DEFAULT_PALETTE: [Color; 7] = [
    Color::new(0x00, 0x00, 0x00),
    Color::new(0xdb, 0x0f, 0xb3),
    Color::new(0x99, 0x12, 0xc9),
    Color::new(0x12, 0x18, 0xc9),
    Color::new(0x12, 0xb7, 0xc9),
    Color::new(0xc9, 0xc3, 0x12),
    Color::new(0xc9, 0x3a, 0x12),
];

/// An ordered, non-empty list of selectable colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Returns `None` for an empty list.
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    pub fn parse<'a, I>(hexes: I) -> Result<Vec<Color>, ColorError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        hexes.into_iter().map(|hex| hex.trim().parse()).collect()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn first(&self) -> Color {
        self.colors[0]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }
}
