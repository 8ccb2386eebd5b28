use bitflags::bitflags;

use crate::config::ButtonParams;
use crate::event::{ButtonEvent, EventMask};
use crate::input::EventHandler;
use crate::time::{Time, elapsed};

bitflags! {
    /// Internal bookkeeping of a button's state machine.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct ButtonFlags: u8 {
        /// A press has been confirmed and no release has followed yet
        const ONPRESS_SENT = 1 << 0;
        /// The button is somewhere in a press/click sequence
        const IN_PROCESS = 1 << 1;
    }
}

/// Runtime state of one button.
///
/// The same state machine drives plain buttons and combos, see [`crate::Combo`].
/// Timing comes from a shared [`ButtonParams`], a button without params ignores
/// every tick.
///
/// The state machine is:
///
/// - idle: nothing pressed, a click run may still be pending
/// - debouncing press: input is active, press not yet confirmed
/// - pressed: press confirmed, keep-alive events are emitted
/// - debouncing release: input is inactive, release not yet confirmed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button<'p> {
    /// User assigned identifier, unique among registered buttons
    pub key_id: u16,
    flags: ButtonFlags,
    event_mask: EventMask,
    /// Last change of the raw input level
    time_state_change: Time,
    /// Last confirmed press or release
    time_change: Time,
    keepalive_last_time: Time,
    keepalive_count: u16,
    click_last_time: Time,
    click_count: u16,
    params: Option<&'p ButtonParams>,
}

impl<'p> Button<'p> {
    pub const fn new(key_id: u16, params: &'p ButtonParams) -> Self {
        Self {
            key_id,
            flags: ButtonFlags::empty(),
            event_mask: EventMask::ALL,
            time_state_change: 0,
            time_change: 0,
            keepalive_last_time: 0,
            keepalive_count: 0,
            click_last_time: 0,
            click_count: 0,
            params: Some(params),
        }
    }

    /// A button without timing params. It does nothing until [`Button::bind_params`] is called.
    pub const fn unbound(key_id: u16) -> Self {
        Self {
            key_id,
            flags: ButtonFlags::empty(),
            event_mask: EventMask::ALL,
            time_state_change: 0,
            time_change: 0,
            keepalive_last_time: 0,
            keepalive_count: 0,
            click_last_time: 0,
            click_count: 0,
            params: None,
        }
    }

    pub const fn with_event_mask(mut self, event_mask: EventMask) -> Self {
        self.event_mask = event_mask;
        self
    }

    pub fn bind_params(&mut self, params: &'p ButtonParams) {
        self.params = Some(params);
    }

    pub fn params(&self) -> Option<&'p ButtonParams> {
        self.params
    }

    pub fn event_mask(&self) -> EventMask {
        self.event_mask
    }

    pub fn set_event_mask(&mut self, event_mask: EventMask) {
        self.event_mask = event_mask;
    }

    /// Whether a press has been confirmed and not yet released.
    pub fn is_active(&self) -> bool {
        self.flags.contains(ButtonFlags::ONPRESS_SENT)
    }

    /// Whether the button is in the middle of a sequence. While no button is in
    /// process, the ticks may be slowed down or stopped.
    pub fn is_in_process(&self) -> bool {
        self.flags.contains(ButtonFlags::IN_PROCESS)
    }

    /// Length of the current click run. Read it in the handler of a [`ButtonEvent::Click`].
    pub fn click_count(&self) -> u16 {
        self.click_count
    }

    /// Number of keep-alive events since the press was confirmed.
    pub fn keepalive_count(&self) -> u16 {
        self.keepalive_count
    }

    /// Keep-alive period in ms, 0 if disabled or unbound.
    pub fn keepalive_period(&self) -> u16 {
        self.params.map_or(0, |p| p.keepalive_period)
    }

    /// Number of keep-alive events a hold of `ms` milliseconds produces.
    pub fn keepalive_count_for_time(&self, ms: u32) -> u32 {
        self.params.map_or(0, |p| p.keepalive_count_for_time(ms))
    }

    fn emit<H: EventHandler + ?Sized>(&self, handler: &mut H, event: ButtonEvent) {
        if !self.event_mask.contains(event.mask()) {
            return;
        }
        match event {
            ButtonEvent::Click => trace!("Button {} click, count: {}", self.key_id, self.click_count),
            ButtonEvent::KeepAlive => {
                trace!("Button {} keepalive, count: {}", self.key_id, self.keepalive_count)
            }
            _ => trace!("Button {} {:?}", self.key_id, event),
        }
        handler.on_event(self, event);
    }

    /// Reports a pending click run and resets it.
    fn flush_clicks<H: EventHandler + ?Sized>(&mut self, handler: &mut H) {
        self.emit(handler, ButtonEvent::Click);
        self.click_count = 0;
    }

    /// Advances the state machine by one tick.
    ///
    /// `old_active`/`new_active` are the input levels at the previous and at
    /// this tick, `now` is the current wrapping time in ms.
    pub fn process<H: EventHandler + ?Sized>(&mut self, old_active: bool, new_active: bool, now: Time, handler: &mut H) {
        let Some(params) = self.params else {
            return;
        };

        if new_active != old_active {
            self.time_state_change = now;
            if new_active {
                self.flags.insert(ButtonFlags::IN_PROCESS);
            }
        }

        if new_active {
            if !self.is_active() {
                if elapsed(now, self.time_state_change) >= i32::from(params.debounce_press) {
                    // A pending run whose gap has already expired is closed before the new press
                    if self.click_count > 0
                        && elapsed(now, self.click_last_time) >= i32::from(params.multi_click_max_gap)
                    {
                        self.flush_clicks(handler);
                    }

                    self.keepalive_last_time = now;
                    self.keepalive_count = 0;

                    self.flags.insert(ButtonFlags::ONPRESS_SENT);
                    self.emit(handler, ButtonEvent::Press);

                    self.time_change = now;
                }
            } else {
                // Phase locked to the press, catch up if several periods elapsed
                while params.keepalive_period > 0
                    && elapsed(now, self.keepalive_last_time) >= i32::from(params.keepalive_period)
                {
                    self.keepalive_last_time = self.keepalive_last_time.wrapping_add(Time::from(params.keepalive_period));
                    self.keepalive_count = self.keepalive_count.wrapping_add(1);
                    self.emit(handler, ButtonEvent::KeepAlive);
                }

                // A long hold ends the pending run without waiting for the release
                if self.click_count > 0 && elapsed(now, self.time_change) > i32::from(params.click_max) {
                    self.flush_clicks(handler);
                }
            }
        } else if self.is_active() {
            if elapsed(now, self.time_state_change) >= i32::from(params.debounce_release) {
                self.flags.remove(ButtonFlags::ONPRESS_SENT);
                self.emit(handler, ButtonEvent::Release);

                let held = elapsed(now, self.time_change);
                if held >= i32::from(params.click_min) && held <= i32::from(params.click_max) {
                    self.click_count = self.click_count.wrapping_add(1);
                    self.click_last_time = now;
                } else {
                    // Too short: report the previous run. Too long: drop it, it was reported while held.
                    if self.click_count > 0 && held < i32::from(params.click_min) {
                        self.emit(handler, ButtonEvent::Click);
                    }
                    self.click_count = 0;
                }

                if self.click_count > 0 && self.click_count == params.max_consecutive {
                    self.flush_clicks(handler);
                }

                self.time_change = now;
            }
        } else if self.click_count > 0 {
            if elapsed(now, self.click_last_time) >= i32::from(params.multi_click_max_gap) {
                self.flush_clicks(handler);
            }
        } else {
            self.flags.remove(ButtonFlags::IN_PROCESS);
        }
    }
}
