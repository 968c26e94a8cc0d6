//! Fixed-capacity rolling average.
//!
//! A ring of the last `N` samples with a running sum, so each push is
//! O(1). Slots that have never been written count as zero: until `N`
//! samples have arrived the average is biased low. Callers that need to
//! know whether the window is full can ask [`RollingAverage::is_warm`].

/// Ring buffer of `N` samples with a running sum.
#[derive(Debug, Clone)]
pub struct RollingAverage<const N: usize> {
    ring: [f32; N],
    sum: f32,
    head: usize,
    count: usize,
}

impl<const N: usize> RollingAverage<N> {
    pub const fn new() -> Self {
        Self {
            ring: [0.0; N],
            sum: 0.0,
            head: 0,
            count: 0,
        }
    }

    /// Overwrite the oldest slot with `sample`.
    pub fn push(&mut self, sample: f32) {
        let evicted = self.ring[self.head];
        self.ring[self.head] = sample;
        self.sum += sample - evicted;
        self.head = (self.head + 1) % N;
        if self.count < N {
            self.count += 1;
        }
        // Resync with the buffer once per lap to bound float drift.
        if self.head == 0 {
            self.sum = self.ring.iter().sum();
        }
    }

    /// Mean over the whole window, unwritten slots included.
    pub fn average(&self) -> f32 {
        self.sum / N as f32
    }

    /// Sum of the current buffer contents.
    pub fn sum(&self) -> f32 {
        self.sum
    }

    /// Number of samples written so far, saturating at `N`.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True once every slot holds a real sample.
    pub fn is_warm(&self) -> bool {
        self.count == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for RollingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}
