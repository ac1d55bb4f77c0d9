//! Symbol table and scope management

use std::collections::HashMap;

/// State of a variable as seen by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarState {
    Declared,
    Initialized,
}

impl VarState {
    fn from_flag(initialized: bool) -> Self {
        if initialized { VarState::Initialized } else { VarState::Declared }
    }
}

/// One lexical scope: variable name -> is-initialized flag
#[derive(Debug, Default)]
struct Frame {
    variables: HashMap<String, bool>,
}

/// Stack of nested scopes; the frame below a frame is its parent.
///
/// The root frame is never popped.
#[derive(Debug)]
pub struct Scope {
    frames: Vec<Frame>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Number of open frames, root included
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a new child scope
    pub fn push_child(&mut self) {
        self.frames.push(Frame::default());
        log::trace!("enter scope (depth {})", self.frames.len());
    }

    /// Drop the innermost scope, returning to its parent.
    ///
    /// Returns false when only the root frame is left.
    pub fn pop_to_parent(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            log::trace!("leave scope (depth {})", self.frames.len());
            true
        } else {
            false
        }
    }

    /// Pop frames until `depth` frames remain
    pub fn truncate(&mut self, depth: usize) {
        self.frames.truncate(depth.max(1));
    }

    /// Declare `name` uninitialized in the innermost scope.
    ///
    /// Returns false if the innermost scope already has it; outer scopes may.
    pub fn declare(&mut self, name: &str) -> bool {
        if self.lookup_local(name).is_some() {
            return false;
        }
        self.innermost_mut().variables.insert(name.to_string(), false);
        true
    }

    /// Mark `name` initialized in the nearest scope that declares it.
    ///
    /// Returns false if no scope declares it.
    pub fn initialize(&mut self, name: &str) -> bool {
        for frame in self.frames.iter_mut().rev() {
            if let Some(initialized) = frame.variables.get_mut(name) {
                *initialized = true;
                return true;
            }
        }
        false
    }

    /// Find the nearest declaration of `name`, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<VarState> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.variables.get(name).copied().map(VarState::from_flag))
    }

    /// Look `name` up in the innermost scope only
    pub fn lookup_local(&self, name: &str) -> Option<VarState> {
        self.frames
            .last()
            .and_then(|frame| frame.variables.get(name).copied().map(VarState::from_flag))
    }

    fn innermost_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
