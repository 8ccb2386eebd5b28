#![allow(dead_code)]

use core::cell::Cell;

use log::debug;
use rbtn::{Button, ButtonEvent, ButtonManager, ButtonParams, EventHandler, Time};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub static PARAM_DEFAULT: ButtonParams = ButtonParams::new(20, 0, 20, 300, 200, 500, 10);
pub static PARAM_ONRELEASE_DEBOUNCE: ButtonParams = ButtonParams::new(20, 80, 0, 300, 200, 500, 10);
pub static PARAM_KEEPALIVE_WITH_CLICK: ButtonParams = ButtonParams::new(20, 80, 0, 400, 200, 100, 10);
pub static PARAM_MAX_CLICK_3: ButtonParams = ButtonParams::new(20, 80, 0, 400, 200, 100, 3);
pub static PARAM_CLICK_MULTI_MAX_0: ButtonParams = ButtonParams::new(20, 80, 0, 400, 0, 100, 3);
pub static PARAM_KEEP_ALIVE_0: ButtonParams = ButtonParams::new(20, 80, 0, 400, 200, 0, 3);

/// Tick offsets the scenarios are replayed at, so that the counter wraps at
/// different points of each sequence.
pub const START_TIMES: [Time; 4] = [0, Time::MAX - 40, Time::MAX - 250, Time::MAX / 2];

/// Ticks run after the last step, long enough for every pending click to be reported.
const TAIL_TICKS: u32 = 1000;

/// Expected event, with the click or keep-alive count it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Press,
    Release,
    Click(u16),
    KeepAlive(u16),
}

impl Expect {
    pub fn from_event(button: &Button, event: ButtonEvent) -> Self {
        match event {
            ButtonEvent::Press => Expect::Press,
            ButtonEvent::Release => Expect::Release,
            ButtonEvent::Click => Expect::Click(button.click_count()),
            ButtonEvent::KeepAlive => Expect::KeepAlive(button.keepalive_count()),
        }
    }
}

/// Input level held for `duration` ms.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub active: bool,
    pub duration: u32,
}

pub const fn on(duration: u16) -> Step {
    Step {
        active: true,
        duration: duration as u32,
    }
}

pub const fn off(duration: u16) -> Step {
    Step {
        active: false,
        duration: duration as u32,
    }
}

pub const fn off_long(duration: u32) -> Step {
    Step {
        active: false,
        duration,
    }
}

/// Input level of a scripted sequence at `tick` ms from its start.
///
/// Each step lasts `duration + 1` ticks, steps with zero duration are skipped.
/// After the last step the input is inactive.
pub fn level_at(steps: &[Step], tick: u32) -> bool {
    let mut end = 0;
    for step in steps.iter().filter(|s| s.duration > 0) {
        end += step.duration + 1;
        if tick <= end {
            return step.active;
        }
    }
    false
}

pub fn total_duration(steps: &[Step]) -> u32 {
    steps.iter().filter(|s| s.duration > 0).map(|s| s.duration + 1).sum()
}

/// Records every event with the tick it was emitted at.
pub struct Recorder<'t> {
    tick: &'t Cell<u32>,
    pub events: Vec<(u32, u16, Expect)>,
}

impl<'t> Recorder<'t> {
    pub fn new(tick: &'t Cell<u32>) -> Self {
        Self { tick, events: Vec::new() }
    }

    /// Recorded events of `key_id`, without timing.
    pub fn of(&self, key_id: u16) -> Vec<Expect> {
        self.events
            .iter()
            .filter(|(_, id, _)| *id == key_id)
            .map(|(_, _, e)| *e)
            .collect()
    }
}

impl EventHandler for Recorder<'_> {
    fn on_event(&mut self, button: &Button, event: ButtonEvent) {
        let expect = Expect::from_event(button, event);
        debug!("[{:6}] key {:#06x}: {:?}", self.tick.get(), button.key_id, expect);
        self.events.push((self.tick.get(), button.key_id, expect));
    }
}

/// Replays `steps` on a single button starting at time `start`.
///
/// Returns the events with the tick, relative to `start`, they were emitted at.
/// Once the sequence is over, the button must leave the in-process state.
pub fn run_sequence(params: &ButtonParams, steps: &[Step], start: Time) -> Vec<(u32, Expect)> {
    const KEY_ID: u16 = 1;

    let tick = Cell::new(0u32);
    let mut buttons = [Button::new(KEY_ID, params)];
    let reader = |_: &Button| level_at(steps, tick.get());
    let mut manager: ButtonManager<'_, '_, _, _> =
        ButtonManager::new(&mut buttons, &mut [], reader, Recorder::new(&tick)).unwrap();

    let total = total_duration(steps);
    for i in 0..total + TAIL_TICKS {
        tick.set(i);
        manager.process(start.wrapping_add(i as Time));
    }

    assert!(!manager.is_in_process(), "still in process after the sequence");
    assert!(!manager.is_active(KEY_ID));

    manager
        .handler()
        .events
        .iter()
        .map(|(tick, _, e)| (*tick, *e))
        .collect()
}

/// Replays `steps` at every start time of [`START_TIMES`], and checks that the
/// expected events are emitted at the same ticks each time.
pub fn assert_sequence(params: &ButtonParams, steps: &[Step], expected: &[Expect]) {
    let reference = run_sequence(params, steps, START_TIMES[0]);
    let events: Vec<Expect> = reference.iter().map(|(_, e)| *e).collect();
    assert_eq!(events, expected);

    for start in &START_TIMES[1..] {
        let shifted = run_sequence(params, steps, *start);
        assert_eq!(shifted, reference, "different events when starting at {}", start);
    }
}
