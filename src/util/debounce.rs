//! Trailing-edge debounce for search-style inputs.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::page::Page;

/// Runs only the most recent call once `wait_ms` passes without another.
///
/// Superseded timers still fire but find a newer generation and do nothing.
pub struct Debouncer<P: Page> {
    page: P,
    wait_ms: u32,
    generation: Rc<Cell<u64>>,
}

impl<P: Page> Debouncer<P> {
    pub fn new(page: P, wait_ms: u32) -> Self {
        Self { page, wait_ms, generation: Rc::new(Cell::new(0)) }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        let latest = Rc::clone(&self.generation);
        self.page.schedule(
            self.wait_ms,
            Box::new(move || {
                if latest.get() == generation {
                    f();
                }
            }),
        );
    }
}
