use std::collections::VecDeque;

use crate::scene::model::SceneDescription;

/// Bounded in-session undo/redo stacks of logical scene snapshots.
#[derive(Debug)]
pub(crate) struct History {
    limit: usize,
    undo: VecDeque<SceneDescription>,
    redo: Vec<SceneDescription>,
}

impl History {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            undo: VecDeque::new(),
            redo: Vec::new(),
        }
    }

    /// Record the state before a mutation. Clears the redo stack.
    pub(crate) fn record(&mut self, before: SceneDescription) {
        if self.limit == 0 {
            return;
        }
        if self.undo.back() == Some(&before) {
            self.redo.clear();
            return;
        }
        if self.undo.len() == self.limit {
            self.undo.pop_front();
        }
        self.undo.push_back(before);
        self.redo.clear();
    }

    pub(crate) fn undo(&mut self, current: SceneDescription) -> Option<SceneDescription> {
        let prev = self.undo.pop_back()?;
        self.redo.push(current);
        Some(prev)
    }

    pub(crate) fn redo(&mut self, current: SceneDescription) -> Option<SceneDescription> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        Some(next)
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/history.rs"]
mod tests;
