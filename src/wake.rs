//! Wake latch for `no_std` environments.
//!
//! The motion interrupt only has to break the low-power wait. It does so by
//! latching a pending flag, which the sleeper consumes. The latch is guarded
//! by `critical-section`, so it is safe to share between an interrupt
//! handler and the main loop.
//!
//! Ordering matters: [`WakeSignal::arm`] clears any stale pending flag
//! *before* unmasking, and [`WakeSignal::wait`] checks the latch and enters
//! the low-power wait inside one critical section. The wake interrupt cannot
//! run between the check and the wait; it stays pending, wakes the core and
//! is handled once the critical section ends, after which the latch is
//! checked again. No edge is lost.

use core::cell::Cell;

use critical_section::Mutex;

#[derive(Debug, Clone, Copy, Default)]
struct Latch {
    armed: bool,
    pending: bool,
}

/// Wake trigger shared with the wake interrupt.
pub struct WakeSignal {
    inner: Mutex<Cell<Latch>>,
}

impl Default for WakeSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeSignal {
    /// Create a masked latch with nothing pending.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(Latch {
                armed: false,
                pending: false,
            })),
        }
    }

    /// Raise the wake condition. Call from the wake interrupt.
    ///
    /// Ignored while the trigger is masked.
    pub fn signal(&self) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut latch = cell.get();
            if latch.armed {
                latch.pending = true;
                cell.set(latch);
            }
        });
    }

    /// Clear any pending wake, then unmask the trigger.
    pub fn arm(&self) {
        critical_section::with(|cs| {
            self.inner.borrow(cs).set(Latch {
                armed: true,
                pending: false,
            });
        });
    }

    /// Mask the trigger and drop anything pending.
    pub fn disarm(&self) {
        critical_section::with(|cs| {
            self.inner.borrow(cs).set(Latch::default());
        });
    }

    pub fn is_armed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).get().armed)
    }

    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).get().pending)
    }

    /// Consume the pending wake, if any.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut latch = cell.get();
            let pending = latch.pending;
            latch.pending = false;
            cell.set(latch);
            pending
        })
    }

    /// Block until a wake is latched.
    ///
    /// `idle` is called with interrupts masked whenever nothing is pending.
    /// It must enter the low-power wait in a way that still wakes on a
    /// pending interrupt (`wfi` on Cortex-M, `sei; sleep` on AVR) and return
    /// afterwards. The latch is checked again after every return, so
    /// spurious wakeups are harmless.
    pub fn wait<F: FnMut()>(&self, mut idle: F) {
        loop {
            let woke = critical_section::with(|cs| {
                let cell = self.inner.borrow(cs);
                let mut latch = cell.get();
                if latch.pending {
                    latch.pending = false;
                    cell.set(latch);
                    return true;
                }
                idle();
                false
            });
            if woke {
                return;
            }
        }
    }
}
