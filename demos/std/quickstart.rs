//! # Quickstart Example
//!
//! Minimal walk-through of vtimer:
//! - Bring up a (simulated) tick source
//! - Arm one-shot and periodic timers
//! - Cancel a timer and query remaining ticks
//!
//! This example uses `std` and drives the ticks from a plain loop in place of
//! the hardware interrupt.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use vtimer::core::{time_to_tick_ms, TICK_FREQUENCY_HZ};
use vtimer::queue::{TimerId, TimerQueue};
use vtimer::service::VirtualTimers;
use vtimer::traits::tick_source::TickSource;

const SLOTS: usize = 4;

static TIMERS: VirtualTimers<CriticalSectionRawMutex, &'static str, SLOTS> =
    VirtualTimers::new();

/// Stand-in for a SysTick-like peripheral.
struct SimulatedTick;

impl TickSource for SimulatedTick {
    type Error = ();

    fn init(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
        println!("   tick source programmed at {} Hz", frequency_hz);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enable_isr(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn announce(_queue: &mut TimerQueue<&'static str, SLOTS>, timer: TimerId, label: &'static str) {
    println!("   [timer #{}] {}", timer.index(), label);
}

fn heartbeat(queue: &mut TimerQueue<&'static str, SLOTS>, timer: TimerId, label: &'static str) {
    announce(queue, timer, label);
    // Callbacks run inside the tick context: they use the queue they are handed.
    if let Err(err) = queue.start(timer, time_to_tick_ms(100), heartbeat, label) {
        eprintln!("   heartbeat stopped: {}", err);
    }
}

fn main() {
    println!("=== vtimer Quickstart ===\n");

    // ======================================================================
    // 1. Bring up the tick source
    // ======================================================================
    println!("1. Module init ({} Hz configured)", TICK_FREQUENCY_HZ);
    if let Err(err) = TIMERS.module_init(&mut SimulatedTick) {
        eprintln!("   module init failed: {:?}", err);
        return;
    }

    // ======================================================================
    // 2. Arm timers
    // ======================================================================
    println!("\n2. Arming timers");
    let (Ok(beat), Ok(once), Ok(dropped)) = (TIMERS.init(), TIMERS.init(), TIMERS.init()) else {
        eprintln!("   timer pool exhausted");
        return;
    };

    let armed = TIMERS
        .start(beat, time_to_tick_ms(100), heartbeat, "heartbeat")
        .and_then(|_| TIMERS.start(once, time_to_tick_ms(250), announce, "one-shot"))
        .and_then(|_| TIMERS.start(dropped, time_to_tick_ms(150), announce, "never shown"));
    if let Err(err) = armed {
        eprintln!("   start failed: {}", err);
        return;
    }

    // ======================================================================
    // 3. Cancel and query
    // ======================================================================
    println!("\n3. Cancelling one timer");
    let _ = TIMERS.cancel(dropped);
    println!("   running: {:?}", TIMERS.is_running(dropped));
    println!("   one-shot remaining ticks: {:?}", TIMERS.remaining(once));

    // ======================================================================
    // 4. Simulated tick interrupt
    // ======================================================================
    println!("\n4. Running 350 ms of ticks");
    for _ in 0..time_to_tick_ms(350) {
        let _ = TIMERS.evaluate();
    }

    println!(
        "\n   heartbeat next in {:?} ticks",
        TIMERS.remaining(beat)
    );
    println!("\n=== Done ===");
}
