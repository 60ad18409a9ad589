//! Software PWM
//!
//! One wrapping 8-bit phase counter is compared against a brightness
//! register per channel on every carrier tick. A channel's line is high
//! while `brightness > phase`, so over a full 256-tick period it is high for
//! exactly `brightness` ticks. All lines are packed into a single output
//! word (bit `i` = channel `i`).
//!
//! The engine is shared between two contexts: the step sequencer writes the
//! registers, the carrier-tick handler reads them. Every register is its own
//! atomic byte, so register updates take no lock and the handler may see a
//! value from just before or just after an update. The enable flag, phase
//! and output word form one short critical section, so once
//! [`PwmEngine::disable`] returns no tick can publish a stale word.

use core::cell::Cell;
use core::sync::atomic::{AtomicU8, Ordering};

use critical_section::{CriticalSection, Mutex};
#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputPort;

/// Number of lines a single output word can carry.
pub const MAX_CHANNELS: usize = 8;

/// Bits of the lines used by `N` channels.
#[allow(clippy::cast_possible_truncation)]
pub const fn channel_mask<const N: usize>() -> u8 {
    const { assert!(N <= MAX_CHANNELS, "too many channels for one output word") };
    ((1u16 << N) - 1) as u8
}

#[derive(Debug, Clone, Copy)]
struct Carrier {
    enabled: bool,
    phase: u8,
    output: u8,
}

/// Comparison based PWM for up to [`MAX_CHANNELS`] lines.
pub struct PwmEngine<const N: usize> {
    registers: [AtomicU8; N],
    carrier: Mutex<Cell<Carrier>>,
}

impl<const N: usize> Default for PwmEngine<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PwmEngine<N> {
    /// Create a disabled engine with all registers at zero.
    pub const fn new() -> Self {
        const { assert!(N <= MAX_CHANNELS, "too many channels for one output word") };
        Self {
            registers: [const { AtomicU8::new(0) }; N],
            carrier: Mutex::new(Cell::new(Carrier {
                enabled: false,
                phase: 0,
                output: 0,
            })),
        }
    }

    /// Start producing waveforms on the next carrier tick.
    pub fn enable(&self) {
        critical_section::with(|cs| {
            let cell = self.carrier.borrow(cs);
            let mut carrier = cell.get();
            carrier.enabled = true;
            cell.set(carrier);
        });

        #[cfg(feature = "esp32-log")]
        println!("flicker: pwm enabled");
    }

    /// Stop producing waveforms.
    ///
    /// Clears every register and the composite output so nothing stale is
    /// left behind. The phase counter keeps its value.
    pub fn disable(&self) {
        critical_section::with(|cs| {
            let cell = self.carrier.borrow(cs);
            let mut carrier = cell.get();
            carrier.enabled = false;
            carrier.output = 0;
            cell.set(carrier);
        });
        for register in &self.registers {
            register.store(0, Ordering::Relaxed);
        }

        #[cfg(feature = "esp32-log")]
        println!("flicker: pwm disabled, outputs cleared");
    }

    pub fn is_enabled(&self) -> bool {
        self.carrier_state().enabled
    }

    /// Set one channel's brightness. Out of range channels are ignored.
    pub fn set_brightness(&self, channel: usize, brightness: u8) {
        if let Some(register) = self.registers.get(channel) {
            register.store(brightness, Ordering::Relaxed);
        }
    }

    /// Set all channels at once (each register individually).
    pub fn set_levels(&self, levels: &[u8; N]) {
        for (register, level) in self.registers.iter().zip(levels) {
            register.store(*level, Ordering::Relaxed);
        }
    }

    /// Current register value, zero for out of range channels.
    pub fn brightness(&self, channel: usize) -> u8 {
        self.registers
            .get(channel)
            .map_or(0, |register| register.load(Ordering::Relaxed))
    }

    /// Snapshot of all registers
    pub fn levels(&self) -> [u8; N] {
        core::array::from_fn(|channel| self.brightness(channel))
    }

    /// Phase the next tick will compare against
    pub fn phase(&self) -> u8 {
        self.carrier_state().phase
    }

    /// Last composite word produced
    pub fn output(&self) -> u8 {
        self.carrier_state().output
    }

    /// Run one carrier tick.
    ///
    /// Returns the output word to put on the port, or `None` while the
    /// engine is disabled. Never blocks.
    pub fn tick(&self) -> Option<u8> {
        critical_section::with(|cs| self.tick_in(cs))
    }

    /// Carrier tick handler body: tick and write the word to `port`.
    ///
    /// The port write happens in the same critical section as the tick, so
    /// it cannot land after a concurrent [`PwmEngine::disable`].
    pub fn on_carrier_tick<P: OutputPort + ?Sized>(&self, port: &mut P) {
        critical_section::with(|cs| {
            if let Some(word) = self.tick_in(cs) {
                port.write(word);
            }
        });
    }

    fn tick_in(&self, cs: CriticalSection<'_>) -> Option<u8> {
        let cell = self.carrier.borrow(cs);
        let mut carrier = cell.get();
        if !carrier.enabled {
            return None;
        }

        let mut word = 0u8;
        for (bit, register) in self.registers.iter().enumerate() {
            if register.load(Ordering::Relaxed) > carrier.phase {
                word |= 1 << bit;
            }
        }
        carrier.output = word;
        carrier.phase = carrier.phase.wrapping_add(1);
        cell.set(carrier);
        Some(word)
    }

    fn carrier_state(&self) -> Carrier {
        critical_section::with(|cs| self.carrier.borrow(cs).get())
    }
}
