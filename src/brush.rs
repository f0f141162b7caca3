use crate::canvas::{Canvas, Position};
use crate::cell::Cell;
use crate::color::Color;
use crate::history::ActionGroup;
use log::debug;
use std::collections::HashSet;
use std::fmt::{self, Display};

/// How a paint gesture decides which cells change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Brush {
    #[default]
    Pen,
    Bucket,
    Eraser,
}

impl Brush {
    /// Menu order.
    pub const ALL: [Brush; 3] = [Brush::Pen, Brush::Bucket, Brush::Eraser];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pen => "Pen",
            Self::Bucket => "Bucket",
            Self::Eraser => "Eraser",
        }
    }

    /// Mutates the canvas starting at `position` and returns the prior state of
    /// every cell that actually changed. The caller guarantees `position` is in bounds.
    pub fn paint(self, canvas: &mut Canvas, position: Position) -> ActionGroup {
        match self {
            Self::Pen => pen(canvas, position),
            Self::Bucket => bucket(canvas, position),
            Self::Eraser => eraser(canvas, position),
        }
    }
}

impl Display for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn pen(canvas: &mut Canvas, position: Position) -> ActionGroup {
    let mut group = ActionGroup::new();
    let target = Cell::painted(canvas.color());
    if let Some(prior) = canvas.cell(position) {
        if prior != target {
            canvas.replace(position, target);
            group.record(position, prior);
        }
    }
    group
}

fn eraser(canvas: &mut Canvas, position: Position) -> ActionGroup {
    let mut group = ActionGroup::new();
    if let Some(prior) = canvas.cell(position) {
        if !prior.is_empty() {
            canvas.replace(position, Cell::empty_at(position));
            group.record(position, prior);
        }
    }
    group
}

/// Which cells belong to the fill region, fixed from the seed before anything is repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Empty,
    Colored(Color),
}

impl Region {
    fn matches(self, cell: Cell) -> bool {
        match self {
            Self::Empty => cell.is_empty(),
            Self::Colored(color) => !cell.is_empty() && cell.color() == color,
        }
    }
}

fn bucket(canvas: &mut Canvas, seed: Position) -> ActionGroup {
    let mut group = ActionGroup::new();
    let Some(seed_cell) = canvas.cell(seed) else {
        return group;
    };
    let region = if seed_cell.is_empty() {
        Region::Empty
    } else {
        Region::Colored(seed_cell.color())
    };
    let fill = Cell::painted(canvas.color());
    if region == Region::Colored(fill.color()) {
        return group;
    }

    let mut visited: HashSet<Position> = HashSet::new();
    let mut stack: Vec<Position> = vec![seed];

    while let Some(position) = stack.pop() {
        let Some(cell) = canvas.cell(position) else {
            continue;
        };
        if !region.matches(cell) || !visited.insert(position) {
            continue;
        }

        canvas.replace(position, fill);
        group.record(position, cell);

        let Position { x, y } = position;
        stack.push(Position::new(x - 1, y));
        stack.push(Position::new(x, y - 1));
        stack.push(Position::new(x + 1, y));
        stack.push(Position::new(x, y + 1));
    }

    debug!("Bucket filled {} cells from {seed}", group.len());
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(0xFF, 0, 0);
    const GREEN: Color = Color::new(0, 0xFF, 0);
    const BLUE: Color = Color::new(0, 0, 0xFF);

    fn canvas_with(color: Color, width: usize, height: usize) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        canvas.set_color(color);
        canvas
    }

    #[test]
    fn pen_records_prior_state() {
        let mut canvas = canvas_with(RED, 3, 3);
        let group = Brush::Pen.paint(&mut canvas, Position::new(1, 2));

        assert_eq!(group.len(), 1);
        assert_eq!(group.actions()[0].prior, Cell::empty_at(Position::new(1, 2)));
        assert_eq!(canvas.cell(Position::new(1, 2)), Some(Cell::painted(RED)));
    }

    #[test]
    fn pen_on_same_color_is_a_no_op() {
        let mut canvas = canvas_with(RED, 3, 3);
        Brush::Pen.paint(&mut canvas, Position::new(0, 0));
        assert!(Brush::Pen.paint(&mut canvas, Position::new(0, 0)).is_empty());
    }

    #[test]
    fn eraser_restores_checkerboard() {
        let mut canvas = canvas_with(RED, 3, 3);
        let position = Position::new(1, 0);
        Brush::Pen.paint(&mut canvas, position);

        let group = Brush::Eraser.paint(&mut canvas, position);
        assert_eq!(group.actions()[0].prior, Cell::painted(RED));
        assert_eq!(canvas.cell(position), Some(Cell::empty_at(position)));

        assert!(Brush::Eraser.paint(&mut canvas, position).is_empty());
    }

    #[test]
    fn bucket_fills_every_empty_cell_regardless_of_shade() {
        let mut canvas = canvas_with(RED, 5, 5);
        let group = Brush::Bucket.paint(&mut canvas, Position::new(2, 2));

        assert_eq!(group.len(), 25);
        let unique: HashSet<Position> = group.actions().iter().map(|a| a.position).collect();
        assert_eq!(unique.len(), 25);
        assert!(canvas.cells().all(|(_, cell)| cell == Cell::painted(RED)));
    }

    #[test]
    fn bucket_stops_at_a_painted_wall() {
        let mut canvas = canvas_with(GREEN, 5, 5);
        for y in 0..5 {
            Brush::Pen.paint(&mut canvas, Position::new(2, y));
        }
        canvas.set_color(RED);

        let group = Brush::Bucket.paint(&mut canvas, Position::new(0, 0));
        assert_eq!(group.len(), 10);

        for y in 0..5 {
            for x in 0..5 {
                let cell = canvas.cell(Position::new(x, y)).unwrap();
                match x {
                    0 | 1 => assert_eq!(cell, Cell::painted(RED)),
                    2 => assert_eq!(cell, Cell::painted(GREEN)),
                    _ => assert!(cell.is_empty()),
                }
            }
        }
    }

    #[test]
    fn bucket_replaces_only_the_seed_color() {
        let mut canvas = canvas_with(GREEN, 4, 1);
        Brush::Pen.paint(&mut canvas, Position::new(0, 0));
        Brush::Pen.paint(&mut canvas, Position::new(1, 0));
        canvas.set_color(BLUE);
        Brush::Pen.paint(&mut canvas, Position::new(2, 0));
        canvas.set_color(GREEN);
        Brush::Pen.paint(&mut canvas, Position::new(3, 0));

        canvas.set_color(RED);
        let group = Brush::Bucket.paint(&mut canvas, Position::new(1, 0));
        assert_eq!(group.len(), 2);
        assert_eq!(canvas.cell(Position::new(0, 0)), Some(Cell::painted(RED)));
        assert_eq!(canvas.cell(Position::new(2, 0)), Some(Cell::painted(BLUE)));
        assert_eq!(canvas.cell(Position::new(3, 0)), Some(Cell::painted(GREEN)));
    }

    #[test]
    fn bucket_with_matching_color_changes_nothing() {
        let mut canvas = canvas_with(RED, 3, 3);
        Brush::Bucket.paint(&mut canvas, Position::new(0, 0));
        assert!(Brush::Bucket.paint(&mut canvas, Position::new(1, 1)).is_empty());
    }

    #[test]
    fn bucket_uses_the_seed_snapshot_not_the_new_color() {
        // (2, 0) already has the fill color but is not empty, so it is outside the region.
        let mut canvas = canvas_with(RED, 3, 1);
        Brush::Pen.paint(&mut canvas, Position::new(2, 0));

        let group = Brush::Bucket.paint(&mut canvas, Position::new(0, 0));
        assert_eq!(group.len(), 2);
        assert!(group.actions().iter().all(|a| a.position.x < 2));
    }

    #[test]
    fn bucket_handles_a_large_grid_without_recursion() {
        let mut canvas = canvas_with(BLUE, 400, 400);
        let group = Brush::Bucket.paint(&mut canvas, Position::new(0, 0));
        assert_eq!(group.len(), 400 * 400);
    }
}
