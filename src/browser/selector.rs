// A fixed-option filter control that cycles back to the first option. The
// control owns its state; the browser reads the current value fresh on
// every recompute.
pub struct Selector<T> {
    // Invariant: non-empty, fixed after construction.
    options: Vec<T>,
    index: usize,
}

impl<T> Selector<T> {
    pub fn new(options: Vec<T>) -> Self {
        debug_assert!(!options.is_empty());
        Selector { options, index: 0 }
    }

    pub fn current(&self) -> &T {
        &self.options[self.index]
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.options.len();
    }
}
