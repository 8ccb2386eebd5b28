use crate::MAX_KEY_NUM;
use crate::button::Button;
use crate::config::ButtonParams;
use crate::error::ButtonError;
use crate::input::EventHandler;
use crate::key_state::KeyState;
use crate::time::Time;

/// A virtual button which is active while all the buttons in its mask are active.
///
/// Mask bits are button slots of the [`crate::ButtonManager`]. A combo with an
/// empty mask never fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combo<'p> {
    mask: KeyState,
    button: Button<'p>,
}

impl<'p> Combo<'p> {
    pub const fn new(key_id: u16, params: &'p ButtonParams) -> Self {
        Self::from_button(Button::new(key_id, params))
    }

    pub const fn from_button(button: Button<'p>) -> Self {
        Self {
            mask: KeyState::new(),
            button,
        }
    }

    /// Creates a combo over the given button slots.
    pub fn with_indices<I: IntoIterator<Item = usize>>(key_id: u16, params: &'p ButtonParams, indices: I) -> Self {
        Self {
            mask: KeyState::from_indices(indices),
            button: Button::new(key_id, params),
        }
    }

    pub fn key_id(&self) -> u16 {
        self.button.key_id
    }

    pub fn mask(&self) -> &KeyState {
        &self.mask
    }

    pub fn button(&self) -> &Button<'p> {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut Button<'p> {
        &mut self.button
    }

    /// Adds the button at slot `index` to the combo.
    pub fn add_key_index(&mut self, index: usize) -> Result<(), ButtonError> {
        if index >= MAX_KEY_NUM {
            return Err(ButtonError::CapacityExceeded);
        }
        self.mask.set(index);
        Ok(())
    }

    /// Removes the button at slot `index` from the combo.
    pub fn remove_key_index(&mut self, index: usize) -> Result<(), ButtonError> {
        if index >= MAX_KEY_NUM {
            return Err(ButtonError::CapacityExceeded);
        }
        self.mask.clear(index);
        Ok(())
    }

    /// An empty combo never fires.
    pub fn is_inert(&self) -> bool {
        self.mask.is_empty()
    }

    /// Whether every masked button is active in `state`.
    pub fn evaluate(&self, state: &KeyState) -> bool {
        state.contains_all(&self.mask)
    }

    pub(crate) fn process<H: EventHandler + ?Sized>(
        &mut self,
        old_state: &KeyState,
        new_state: &KeyState,
        now: Time,
        handler: &mut H,
    ) {
        if self.is_inert() {
            return;
        }
        let old_active = self.evaluate(old_state);
        let new_active = self.evaluate(new_state);
        self.button.process(old_active, new_active, now, handler);
    }
}
