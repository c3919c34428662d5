//! Ordering and delta-sum properties checked against an absolute-expiry oracle.
mod helpers;

use helpers::{record, take_fired};
use vtimer::core::Tick;
use vtimer::error::TimerError;
use vtimer::queue::{TimerId, TimerQueue};

const SLOTS: usize = 16;
type Queue = TimerQueue<u32, SLOTS>;

/// Deterministic xorshift generator, enough to shuffle operation sequences.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Independent model: absolute expiry and arm sequence of every armed timer.
#[derive(Default)]
struct Oracle {
    now: u64,
    arm_seq: u64,
    armed: [Option<(u64, u64)>; SLOTS],
}

impl Oracle {
    fn start(&mut self, slot: usize, ticks: Tick) {
        self.arm_seq += 1;
        self.armed[slot] = Some((self.now + ticks as u64, self.arm_seq));
    }

    fn cancel(&mut self, slot: usize) {
        self.armed[slot] = None;
    }

    /// Advance one tick and return the expired slots in expected firing order.
    fn tick(&mut self) -> Vec<u32> {
        self.now += 1;
        let mut due: Vec<(u64, usize)> = self
            .armed
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| match entry {
                Some((expiry, seq)) if *expiry == self.now => Some((*seq, slot)),
                _ => None,
            })
            .collect();
        due.sort();
        for (_, slot) in &due {
            self.armed[*slot] = None;
        }
        due.into_iter().map(|(_, slot)| slot as u32).collect()
    }

    fn remaining(&self, slot: usize) -> Option<Tick> {
        self.armed[slot].map(|(expiry, _)| (expiry - self.now) as Tick)
    }
}

fn assert_matches_oracle(queue: &Queue, timers: &[TimerId], oracle: &Oracle) {
    for (slot, timer) in timers.iter().enumerate() {
        match oracle.remaining(slot) {
            Some(remaining) => {
                assert!(queue.is_running(*timer), "slot {slot} should be armed");
                assert_eq!(queue.remaining(*timer), remaining, "slot {slot}");
            }
            None => {
                assert!(!queue.is_running(*timer), "slot {slot} should be inert");
                assert_eq!(queue.remaining(*timer), 0);
            }
        }
    }
    let armed = oracle.armed.iter().filter(|entry| entry.is_some()).count();
    assert_eq!(queue.armed(), armed);
    let next = oracle.armed.iter().flatten().map(|(expiry, _)| expiry).min();
    assert_eq!(
        queue.next_expiry(),
        next.map(|expiry| (expiry - oracle.now) as Tick)
    );
}

#[test]
fn random_sequences_keep_delta_sums_and_firing_order() {
    for seed in [0x9E37_79B9_7F4A_7C15u64, 0xDEAD_BEEF, 42, 7, 0x1234_5678_9ABC] {
        let mut rng = XorShift(seed);
        let mut queue = Queue::new();
        let timers: Vec<TimerId> = (0..SLOTS).map(|_| queue.init().unwrap()).collect();
        let mut oracle = Oracle::default();

        for _ in 0..2_000 {
            let slot = rng.below(SLOTS as u64) as usize;
            match rng.below(10) {
                0..=3 => {
                    // Short ranges on purpose: lots of coincident expiries.
                    let ticks = 2 + rng.below(12) as Tick;
                    if oracle.armed[slot].is_none() {
                        queue.start(timers[slot], ticks, record, slot as u32).unwrap();
                        oracle.start(slot, ticks);
                    } else if cfg!(feature = "api-validation") {
                        assert_eq!(
                            queue.start(timers[slot], ticks, record, slot as u32),
                            Err(TimerError::InvalidState)
                        );
                    }
                }
                4..=5 => {
                    queue.cancel(timers[slot]).unwrap();
                    oracle.cancel(slot);
                }
                _ => {
                    let expected = oracle.tick();
                    assert_eq!(queue.evaluate(), expected.len());
                    assert_eq!(take_fired(), expected);
                }
            }
            assert_matches_oracle(&queue, &timers, &oracle);
        }
    }
}

#[test]
fn cancel_of_inert_timer_leaves_queue_unchanged() {
    let mut queue = Queue::new();
    let armed = queue.init().unwrap();
    let idle = queue.init().unwrap();
    let done = queue.init().unwrap();

    queue.start(armed, 9, record, 0).unwrap();
    queue.start(done, 2, record, 2).unwrap();
    queue.evaluate();
    queue.evaluate();
    assert_eq!(take_fired(), [2]);

    for timer in [idle, done, idle, done] {
        queue.cancel(timer).unwrap();
        assert_eq!(queue.armed(), 1);
        assert_eq!(queue.remaining(armed), 7);
        assert_eq!(queue.next_expiry(), Some(7));
    }
}

#[test]
fn start_then_cancel_restores_every_remaining_count() {
    let mut queue = Queue::new();
    let timers: Vec<TimerId> = (0..6).map(|_| queue.init().unwrap()).collect();
    for (index, ticks) in [4, 9, 9, 15, 2].into_iter().enumerate() {
        queue.start(timers[index], ticks, record, index as u32).unwrap();
    }
    let probe = timers[5];
    let before: Vec<Tick> = timers[..5].iter().map(|t| queue.remaining(*t)).collect();

    for ticks in 2..20 {
        queue.start(probe, ticks, record, 5).unwrap();
        queue.cancel(probe).unwrap();
        assert!(!queue.is_running(probe));
        let after: Vec<Tick> = timers[..5].iter().map(|t| queue.remaining(*t)).collect();
        assert_eq!(after, before);
    }
}

type ChainQueue = TimerQueue<(u32, Option<TimerId>), 4>;

thread_local! {
    static CHAIN_LOG: std::cell::RefCell<Vec<u32>> = const { std::cell::RefCell::new(Vec::new()) };
}

fn log_chain(_queue: &mut ChainQueue, _timer: TimerId, (tag, _): (u32, Option<TimerId>)) {
    CHAIN_LOG.with(|log| log.borrow_mut().push(tag));
}

fn arm_follow_up(queue: &mut ChainQueue, timer: TimerId, (tag, follow_up): (u32, Option<TimerId>)) {
    log_chain(queue, timer, (tag, None));
    if let Some(follow_up) = follow_up {
        queue.start(follow_up, 4, log_chain, (tag + 1, None)).unwrap();
    }
}

fn take_chain_log() -> Vec<u32> {
    CHAIN_LOG.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

#[test]
fn timer_armed_from_callback_is_relative_to_post_removal_queue() {
    let mut queue = ChainQueue::new();
    let first = queue.init().unwrap();
    let follow_up = queue.init().unwrap();
    let bystander = queue.init().unwrap();

    queue
        .start(first, 3, arm_follow_up, (0, Some(follow_up)))
        .unwrap();
    queue.start(bystander, 5, log_chain, (9, None)).unwrap();

    for _ in 0..3 {
        queue.evaluate();
    }
    assert_eq!(take_chain_log(), [0]);
    assert_eq!(queue.remaining(follow_up), 4);
    assert_eq!(queue.remaining(bystander), 2);

    for _ in 0..4 {
        queue.evaluate();
    }
    assert_eq!(take_chain_log(), [9, 1]);
    assert_eq!(queue.armed(), 0);
}
