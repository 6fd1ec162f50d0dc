//! Nested field tracking.
//!
//! Field lines at depth 2 belong directly to an endpoint; deeper lines belong
//! to the nearest open nested field one level up. [`NestingStack`] owns the
//! nested fields that may still receive children and hands each one to its
//! parent once a shallower line closes it.

use apimodel_define::Field;

use crate::errors::{CompileError, Result};

/// Depth of fields attached directly to an endpoint.
pub const FIELD_DEPTH: usize = 2;

#[derive(Debug)]
struct Frame {
    depth: usize,
    field: Field,
}

/// Stack of open nested fields, deepest last.
///
/// Frame depths always increase by exactly one from bottom to top, starting
/// at [`FIELD_DEPTH`].
#[derive(Debug, Default)]
pub struct NestingStack {
    frames: Vec<Frame>,
}

impl NestingStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Depth of the innermost open nested field.
    pub fn open_depth(&self) -> Option<usize> {
        self.frames.last().map(|frame| frame.depth)
    }

    /// Places a parsed field found at `depth`.
    ///
    /// Depth-2 fields close everything open and land in `roots` (once closed,
    /// for nested ones). Deeper fields become children of the open nested
    /// field at `depth - 1`; when there is none the line is a grammar error.
    pub fn place(
        &mut self,
        depth: usize,
        field: Field,
        roots: &mut Vec<Field>,
        raw: &str,
    ) -> Result<()> {
        if depth <= FIELD_DEPTH {
            self.drain_into(roots);
            if field.is_nested {
                self.frames.push(Frame { depth: FIELD_DEPTH, field });
            } else {
                roots.push(field);
            }
            return Ok(());
        }

        while self.open_depth().is_some_and(|open| open >= depth) {
            self.close_innermost(roots);
        }
        if self.open_depth() != Some(depth - 1) {
            return Err(CompileError::grammar(
                field.line,
                raw,
                format!("no nested field open at depth {}", depth - 1),
            ));
        }

        if field.is_nested {
            self.frames.push(Frame { depth, field });
        } else if let Some(parent) = self.frames.last_mut() {
            parent.field.add_child(field);
        }
        Ok(())
    }

    /// Closes every open nested field, attaching the outermost to `roots`.
    pub fn drain_into(&mut self, roots: &mut Vec<Field>) {
        while !self.frames.is_empty() {
            self.close_innermost(roots);
        }
    }

    fn close_innermost(&mut self, roots: &mut Vec<Field>) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        match self.frames.last_mut() {
            Some(parent) => {
                parent.field.add_child(frame.field);
            }
            None => roots.push(frame.field),
        }
    }
}
