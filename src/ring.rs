/// Three field buffers for the time levels `t - dt`, `t` and `t + dt`.
///
/// Roles move by advancing `head` instead of moving data: slot `head` is
/// the previous level, `head + 1` the current and `head + 2` the next
/// (all modulo 3). All three buffers are allocated once.
#[derive(Debug, Clone)]
pub struct FieldRing {
    buffers: [Vec<f64>; 3],
    head: usize,
}

impl FieldRing {
    /// Start at rest: previous and current both hold `initial`,
    /// next is zeroed.
    pub fn new(initial: Vec<f64>) -> Self {
        let n = initial.len();
        FieldRing {
            buffers: [initial.clone(), initial, vec![0.0; n]],
            head: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % 3
    }

    pub fn prev(&self) -> &[f64] {
        &self.buffers[self.slot(0)]
    }

    pub fn current(&self) -> &[f64] {
        &self.buffers[self.slot(1)]
    }

    pub fn current_mut(&mut self) -> &mut [f64] {
        let s = self.slot(1);
        &mut self.buffers[s]
    }

    #[cfg(test)]
    fn next(&self) -> &[f64] {
        &self.buffers[self.slot(2)]
    }

    /// Borrow `(prev, current, next)` at once, with only `next` writable.
    pub fn split_mut(&mut self) -> (&[f64], &[f64], &mut [f64]) {
        let [a, b, c] = &mut self.buffers;
        match self.head {
            0 => (a.as_slice(), b.as_slice(), c.as_mut_slice()),
            1 => (b.as_slice(), c.as_slice(), a.as_mut_slice()),
            _ => (c.as_slice(), a.as_slice(), b.as_mut_slice()),
        }
    }

    /// Shift roles forward one level. The old previous buffer becomes the
    /// next one and gets overwritten by the following step.
    #[inline]
    pub fn rotate(&mut self) {
        self.head = (self.head + 1) % 3;
    }
}
