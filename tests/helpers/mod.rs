/// Test doubles: recording callbacks, a scripted tick source and a channel-driven ticker.
use std::cell::RefCell;

use tokio::sync::mpsc;
use vtimer::queue::{TimerId, TimerQueue};
use vtimer::traits::{tick_source::TickSource, tick_wait::TickWait};

thread_local! {
    static FIRED: RefCell<Vec<u32>> = const { RefCell::new(Vec::new()) };
}

/// Callback appending its argument to the per-thread firing log.
#[allow(dead_code)]
pub fn record<const N: usize>(_queue: &mut TimerQueue<u32, N>, _timer: TimerId, tag: u32) {
    FIRED.with(|fired| fired.borrow_mut().push(tag));
}

/// Drain the firing log.
#[allow(dead_code)]
pub fn take_fired() -> Vec<u32> {
    FIRED.with(|fired| std::mem::take(&mut *fired.borrow_mut()))
}

#[derive(Debug, Default)]
#[allow(dead_code)]
/// Tick peripheral remembering how it was brought up.
pub struct MockTickSource {
    pub frequency_hz: Option<u32>,
    pub enabled: bool,
    pub isr_enabled: bool,
}

impl TickSource for MockTickSource {
    type Error = ();

    fn init(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
        self.frequency_hz = Some(frequency_hz);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.enabled = true;
        Ok(())
    }

    fn enable_isr(&mut self) -> Result<(), Self::Error> {
        self.isr_enabled = true;
        Ok(())
    }
}

#[allow(dead_code)]
/// Ticker releasing one tick per message pushed by the test.
pub struct ChannelTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

#[allow(dead_code)]
impl ChannelTicker {
    /// Build the ticker and the sender used to inject ticks.
    pub fn create() -> (mpsc::UnboundedSender<()>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

impl TickWait for ChannelTicker {
    async fn wait_tick(&mut self) {
        if self.rx.recv().await.is_none() {
            // No more ticks will come: time stands still.
            std::future::pending::<()>().await;
        }
    }
}
