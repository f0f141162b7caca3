use crate::brush::Brush;
use crate::cell::Cell;
use crate::color::Color;
use crate::export::PixelGrid;
use crate::history::{ActionGroup, ActionStack};
use crate::palette::DEFAULT_PALETTE;
use log::{debug, info};
use std::collections::HashSet;
use std::fmt::{self, Display};

/// A grid coordinate. Signed so that neighbours of edge cells can be represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Changes gathered while a mouse stroke is in progress.
#[derive(Debug, Default)]
struct Stroke {
    group: ActionGroup,
    touched: HashSet<Position>,
}

impl Stroke {
    fn merge(&mut self, group: ActionGroup) {
        for action in group {
            // The first prior state seen for a position is the one undo must restore.
            if self.touched.insert(action.position) {
                self.group.record(action.position, action.prior);
            }
        }
    }
}

/// A fixed-size grid of cells plus the active color, brush and undo history.
#[derive(Debug)]
pub struct Canvas {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    color: Color,
    brush: Brush,
    history: ActionStack,
    stroke: Option<Stroke>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| Cell::empty_at(Position::new(x as i32, y as i32)))
                    .collect()
            })
            .collect();

        Self {
            cells,
            width,
            height,
            color: DEFAULT_PALETTE[0],
            brush: Brush::default(),
            history: ActionStack::new(),
            stroke: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    #[cfg(test)]
    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn history(&self) -> &ActionStack {
        &self.history
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.width
            && (position.y as usize) < self.height
    }

    pub fn cell(&self, position: Position) -> Option<Cell> {
        if self.contains(position) {
            Some(self.cells[position.y as usize][position.x as usize])
        } else {
            None
        }
    }

    /// Row-major iterator over every cell.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, cell)| (Position::new(x as i32, y as i32), *cell))
        })
    }

    /// Overwrites a cell, returning what was there. Out of bounds writes are dropped.
    pub(crate) fn replace(&mut self, position: Position, cell: Cell) -> Option<Cell> {
        if !self.contains(position) {
            return None;
        }
        let slot = &mut self.cells[position.y as usize][position.x as usize];
        Some(std::mem::replace(slot, cell))
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    /// Applies the active brush at `position`. Positions outside the grid are ignored.
    pub fn color_cell(&mut self, position: Position) {
        if !self.contains(position) {
            return;
        }
        let brush = self.brush;
        let group = brush.paint(self, position);
        self.record(group);
    }

    /// Resets every cell to the checkerboard. One undo step restores the whole picture.
    pub fn clear(&mut self) {
        self.between_strokes(Self::wipe);
    }

    fn wipe(&mut self) {
        let mut group = ActionGroup::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let position = Position::new(x as i32, y as i32);
                let cell = self.cells[y][x];
                if !cell.is_empty() {
                    self.cells[y][x] = Cell::empty_at(position);
                    group.record(position, cell);
                }
            }
        }
        info!("Cleared {} painted cells", group.len());
        self.record(group);
    }

    /// Reverts the most recent action group. Does nothing when there is no history.
    pub fn undo(&mut self) {
        self.between_strokes(Self::revert_last);
    }

    fn revert_last(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let Ok(group) = self.history.pop() else {
            return;
        };
        debug!("Undoing {} cell changes", group.len());
        for action in group {
            self.replace(action.position, action.prior);
        }
    }

    /// Starts grouping every following `color_cell` into a single undo step.
    pub fn begin_stroke(&mut self) {
        self.end_stroke();
        self.stroke = Some(Stroke::default());
    }

    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.stroke.take() {
            if !stroke.group.is_empty() {
                debug!("Committing stroke of {} cell changes", stroke.group.len());
                self.history.push(stroke.group);
            }
        }
    }

    fn in_stroke(&self) -> bool {
        self.stroke.is_some()
    }

    /// Commits an open stroke before `edit` and opens a fresh one after it, so a drag that
    /// outlives the edit keeps grouping into one undo step.
    fn between_strokes(&mut self, edit: fn(&mut Self)) {
        let resume = self.in_stroke();
        self.end_stroke();
        edit(self);
        if resume {
            self.stroke = Some(Stroke::default());
        }
    }

    fn record(&mut self, group: ActionGroup) {
        if group.is_empty() {
            return;
        }
        match &mut self.stroke {
            Some(stroke) => stroke.merge(group),
            None => self.history.push(group),
        }
    }

    /// Snapshot of the picture: painted cells carry their color, empty cells are transparent.
    pub fn export(&self) -> PixelGrid {
        let pixels = self
            .cells
            .iter()
            .flatten()
            .map(|cell| (!cell.is_empty()).then(|| cell.color()))
            .collect();
        PixelGrid::new(self.width, self.height, pixels)
    }
}
