use crate::canvas::Position;
use crate::cell::Cell;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the action stack is empty")]
pub struct EmptyStack;

/// The state a single cell had before a brush touched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub position: Position,
    pub prior: Cell,
}

/// Every cell change produced by one gesture. Undone as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionGroup {
    actions: Vec<Action>,
}

impl ActionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, position: Position, prior: Cell) {
        self.actions.push(Action { position, prior });
    }

    #[cfg(test)]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl IntoIterator for ActionGroup {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

/// LIFO stack of action groups.
#[derive(Debug, Default)]
pub struct ActionStack {
    groups: Vec<ActionGroup>,
}

impl ActionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: ActionGroup) {
        self.groups.push(group);
    }

    pub fn pop(&mut self) -> Result<ActionGroup, EmptyStack> {
        self.groups.pop().ok_or(EmptyStack)
    }

    #[cfg(test)]
    pub fn peek(&self) -> Option<&ActionGroup> {
        self.groups.last()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
