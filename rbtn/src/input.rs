use embedded_hal::digital::InputPin;

use crate::button::Button;
use crate::event::ButtonEvent;

/// Reads the raw level of a button's input.
///
/// Called once per indexed button on every [`crate::ButtonManager::process`] tick.
pub trait StateReader {
    /// Returns `true` when the input of `button` is currently active.
    fn is_active(&mut self, button: &Button) -> bool;
}

/// Receives the events of buttons and combos.
///
/// Called synchronously from inside the tick. The handler must not call back
/// into the manager.
pub trait EventHandler {
    fn on_event(&mut self, button: &Button, event: ButtonEvent);
}

impl<F: FnMut(&Button) -> bool> StateReader for F {
    fn is_active(&mut self, button: &Button) -> bool {
        self(button)
    }
}

impl<F: FnMut(&Button, ButtonEvent)> EventHandler for F {
    fn on_event(&mut self, button: &Button, event: ButtonEvent) {
        self(button, event)
    }
}

/// A [`StateReader`] over `N` input pins, the key id of a button is its pin index.
///
/// Slots without pin, key ids out of range and pin read errors all read as inactive.
pub struct DirectPinReader<In: InputPin, const N: usize> {
    /// Input pins, indexed by key id
    pins: [Option<In>; N],
    /// Pin active level
    low_active: bool,
}

impl<In: InputPin, const N: usize> DirectPinReader<In, N> {
    pub fn new(pins: [Option<In>; N], low_active: bool) -> Self {
        Self { pins, low_active }
    }

    pub fn pins_mut(&mut self) -> &mut [Option<In>; N] {
        &mut self.pins
    }
}

impl<In: InputPin, const N: usize> StateReader for DirectPinReader<In, N> {
    fn is_active(&mut self, button: &Button) -> bool {
        let Some(Some(pin)) = self.pins.get_mut(usize::from(button.key_id)) else {
            return false;
        };
        if self.low_active {
            pin.is_low().ok().unwrap_or_default()
        } else {
            pin.is_high().ok().unwrap_or_default()
        }
    }
}
