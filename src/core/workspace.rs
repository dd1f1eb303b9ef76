//! Scratch buffers reused across grid calls.

use crate::Float;

/// A set of equally sized scratch vectors owned by a stepper.
///
/// The cache is keyed on shape only: when the requested buffer count or
/// length differs from the previous call, every buffer is reallocated and
/// zeroed, so nothing from a differently sized grid can leak through.
#[derive(Clone, Debug, Default)]
pub struct Workspace {
    len: usize,
    bufs: Vec<Vec<Float>>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the cached buffers.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `count` buffers of length `len`, reallocating on shape change.
    pub fn prepare(&mut self, count: usize, len: usize) -> &mut [Vec<Float>] {
        if self.len != len || self.bufs.len() != count {
            log::trace!(
                "reallocating workspace: {} x {} -> {} x {}",
                self.bufs.len(),
                self.len,
                count,
                len
            );
            self.bufs = vec![vec![0.0; len]; count];
            self.len = len;
        }
        &mut self.bufs
    }
}
