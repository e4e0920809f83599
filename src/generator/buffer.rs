use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::warn;

use crate::grid::Grid;

/// Ring capacity. Must exceed the worker count so every worker always owns
/// at least one slot the consumer has not reached yet.
pub(crate) const BUFFER_CAPACITY: usize = 5000;

const SPINS_BEFORE_YIELD: u32 = 64;

/// One handoff cell. The atomic flag is the actual per-slot semaphore and
/// carries the Acquire/Release edge that publishes the grid; the mutex only
/// exists to move the grid through safe code and is never contended, because
/// each slot has exactly one writer (its owning worker) and one reader (the
/// consumer), alternating via the flag.
struct Slot {
    ready: AtomicBool,
    grid: Mutex<Option<Grid>>,
}

/// Fixed-capacity ring buffer handing grids from the worker threads to the
/// single consumer. Worker `i` of `W` writes only slots `i, i+W, i+2W, ...`
/// (mod capacity), so no two workers ever race on a slot; the consumer
/// drains slots in strict increasing order, which interleaves the workers'
/// outputs round-robin regardless of completion timing.
pub(crate) struct SharedGridBuffer {
    slots: Vec<Slot>,
    stride: usize,
}

impl SharedGridBuffer {
    pub fn new(worker_count: usize) -> Self {
        debug_assert!(worker_count > 0 && worker_count < BUFFER_CAPACITY);
        let slots = (0..BUFFER_CAPACITY)
            .map(|_| Slot {
                ready: AtomicBool::new(false),
                grid: Mutex::new(None),
            })
            .collect();
        Self {
            slots,
            stride: worker_count,
        }
    }

    /// Write cursor over the slots owned by `worker`.
    pub fn producer(&self, worker: usize) -> Producer<'_> {
        Producer {
            buffer: self,
            next: worker,
        }
    }

    /// Read cursor over all slots in ring order. There must be exactly one.
    pub fn consumer(&self) -> Consumer<'_> {
        Consumer {
            buffer: self,
            next: 0,
        }
    }
}

fn spin_until(flag: &AtomicBool, expected: bool) {
    let mut spins = 0u32;
    while flag.load(Ordering::Acquire) != expected {
        if spins < SPINS_BEFORE_YIELD {
            spins += 1;
            std::hint::spin_loop();
        } else {
            std::thread::yield_now();
        }
    }
}

fn lock_slot(slot: &Slot) -> std::sync::MutexGuard<'_, Option<Grid>> {
    // A poisoned slot means some thread panicked mid-run; the grid value
    // itself is still intact, so keep going.
    slot.grid.lock().unwrap_or_else(|e| e.into_inner())
}

pub(crate) struct Producer<'a> {
    buffer: &'a SharedGridBuffer,
    next: usize,
}

impl Producer<'_> {
    /// Deposits a grid into this worker's next owned slot, waiting for the
    /// consumer if the slot still holds an undrained grid. A full slot is
    /// backpressure, not an error.
    pub fn send(&mut self, grid: Grid) {
        let slot = &self.buffer.slots[self.next];
        if slot.ready.load(Ordering::Acquire) {
            warn!(
                slot = self.next,
                "grid buffer slot still full; scoring is falling behind"
            );
            spin_until(&slot.ready, false);
        }

        *lock_slot(slot) = Some(grid);
        slot.ready.store(true, Ordering::Release);
        self.next = (self.next + self.buffer.stride) % BUFFER_CAPACITY;
    }
}

pub(crate) struct Consumer<'a> {
    buffer: &'a SharedGridBuffer,
    next: usize,
}

impl Consumer<'_> {
    /// Takes the grid from the next slot in ring order, waiting until its
    /// producer has filled it.
    pub fn recv(&mut self) -> Grid {
        let slot = &self.buffer.slots[self.next];
        spin_until(&slot.ready, true);

        let grid = lock_slot(slot).take().expect("ready slot holds no grid");
        slot.ready.store(false, Ordering::Release);
        self.next = (self.next + 1) % BUFFER_CAPACITY;
        grid
    }
}
