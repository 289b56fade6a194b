//! Trace: the stack of `SourceSpan`s used to annotate errors with the
//! chain of imports that led to the failing site.
//!
//! Push/pop is exception-safe via [`TraceGuard`]'s `Drop` impl, so a `?`
//! from inside a nested parse still pops the frame it pushed (see §9
//! "Scoped resources").

use crate::span::SourceSpan;

#[derive(Default, Debug)]
pub struct Trace {
    frames: Vec<SourceSpan>,
}

impl Trace {
    pub fn new() -> Self {
        Trace::default()
    }

    pub fn push(&mut self, span: SourceSpan) {
        self.frames.push(span);
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[SourceSpan] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot the current frames, e.g. to attach to an error at the
    /// moment it is raised.
    pub fn snapshot(&self) -> Vec<SourceSpan> {
        self.frames.clone()
    }
}

/// Scoped push: pops its frame on drop, including on the unwind/early
/// `return` path of a `?`-propagated error.
pub struct TraceGuard<'a> {
    trace: &'a mut Trace,
}

impl<'a> TraceGuard<'a> {
    pub fn enter(trace: &'a mut Trace, span: SourceSpan) -> Self {
        trace.push(span);
        TraceGuard { trace }
    }
}

impl Drop for TraceGuard<'_> {
    fn drop(&mut self) {
        self.trace.pop();
    }
}
