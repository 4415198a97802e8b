//! # Edge Detection
//!
//! Change-only filtering for polled channels: a sample is accepted only when
//! it differs from the last accepted one.
//!
//! The detector starts in an "unknown" state, so the first sample of a
//! session is always accepted and records the channel's starting value.

/// Previous-value snapshot for one polled channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDetector<T> {
    previous: Option<T>,
}

impl<T> Default for EdgeDetector<T> {
    fn default() -> Self {
        Self { previous: None }
    }
}

impl<T: PartialEq> EdgeDetector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a new sample
    ///
    /// Returns `true` (and stores the sample) when it differs from the
    /// previous accepted value; `false` means the write should be skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use peripheral_trace::monitor::EdgeDetector;
    ///
    /// let mut edge = EdgeDetector::new();
    /// assert!(edge.observe(true));
    /// assert!(!edge.observe(true));
    /// assert!(edge.observe(false));
    /// ```
    pub fn observe(&mut self, sample: T) -> bool {
        if self.previous.as_ref() == Some(&sample) {
            return false;
        }
        self.previous = Some(sample);
        true
    }

    /// Last accepted sample, `None` before the first one
    pub fn previous(&self) -> Option<&T> {
        self.previous.as_ref()
    }
}
