use heapless::Vec;

use crate::MAX_KEY_NUM;
use crate::button::Button;
use crate::combo::Combo;
use crate::error::ButtonError;
use crate::input::{EventHandler, StateReader};
use crate::key_state::KeyState;
use crate::time::Time;

/// Owns all buttons and combos, and runs them every tick.
///
/// Buttons are indexed by slot: the static buttons first, in slice order, then
/// the dynamically registered ones in registration order. The slot of a button
/// is its bit in the [`KeyState`] snapshot and in combo masks. Slots are stable,
/// registered buttons are never removed or moved.
///
/// `DYN_BUTTONS`/`DYN_COMBOS` are the capacities of the dynamic storage.
pub struct ButtonManager<
    'b,
    'p,
    R: StateReader,
    H: EventHandler,
    const DYN_BUTTONS: usize = 8,
    const DYN_COMBOS: usize = 8,
> {
    /// Static buttons
    buttons: &'b mut [Button<'p>],
    /// Static combos
    combos: &'b mut [Combo<'p>],
    /// Registered buttons, after the static ones
    dyn_buttons: Vec<Button<'p>, DYN_BUTTONS>,
    /// Registered combos, after the static ones
    dyn_combos: Vec<Combo<'p>, DYN_COMBOS>,
    /// Snapshot of the previous tick
    old_state: KeyState,
    reader: R,
    handler: H,
}

impl<'b, 'p, R: StateReader, H: EventHandler, const DYN_BUTTONS: usize, const DYN_COMBOS: usize>
    ButtonManager<'b, 'p, R, H, DYN_BUTTONS, DYN_COMBOS>
{
    /// Creates a manager over static buttons and combos.
    ///
    /// Fails if there are more than [`MAX_KEY_NUM`] static buttons.
    pub fn new(
        buttons: &'b mut [Button<'p>],
        combos: &'b mut [Combo<'p>],
        reader: R,
        handler: H,
    ) -> Result<Self, ButtonError> {
        if buttons.len() > MAX_KEY_NUM {
            error!("Too many static buttons: {}, max: {}", buttons.len(), MAX_KEY_NUM);
            return Err(ButtonError::CapacityExceeded);
        }
        debug!(
            "Button manager created with {} buttons and {} combos",
            buttons.len(),
            combos.len()
        );
        Ok(Self {
            buttons,
            combos,
            dyn_buttons: Vec::new(),
            dyn_combos: Vec::new(),
            old_state: KeyState::new(),
            reader,
            handler,
        })
    }

    /// Appends a button after all existing ones, returns its slot.
    pub fn register_button(&mut self, button: Button<'p>) -> Result<usize, ButtonError> {
        let index = self.total_button_count();
        if index >= MAX_KEY_NUM {
            warn!("Failed to register button {}: capacity exceeded", button.key_id);
            return Err(ButtonError::CapacityExceeded);
        }
        if self.index_by_key_id(button.key_id).is_some() {
            warn!("Failed to register button {}: key id in use", button.key_id);
            return Err(ButtonError::AlreadyRegistered);
        }

        let key_id = button.key_id;
        if self.dyn_buttons.push(button).is_err() {
            warn!("Failed to register button {}: storage full", key_id);
            return Err(ButtonError::StorageFull);
        }
        debug!("Registered button {} at slot {}", key_id, index);
        Ok(index)
    }

    /// Appends a combo after all existing ones, returns its combo index.
    pub fn register_combo(&mut self, combo: Combo<'p>) -> Result<usize, ButtonError> {
        if self.combo_index_by_key_id(combo.key_id()).is_some() {
            warn!("Failed to register combo {}: key id in use", combo.key_id());
            return Err(ButtonError::AlreadyRegistered);
        }

        let key_id = combo.key_id();
        let index = self.combo_count();
        if self.dyn_combos.push(combo).is_err() {
            warn!("Failed to register combo {}: storage full", key_id);
            return Err(ButtonError::StorageFull);
        }
        debug!("Registered combo {} at index {}", key_id, index);
        Ok(index)
    }

    /// Number of indexed buttons, static and registered.
    pub fn total_button_count(&self) -> usize {
        self.buttons.len() + self.dyn_buttons.len()
    }

    /// Number of combos, static and registered.
    pub fn combo_count(&self) -> usize {
        self.combos.len() + self.dyn_combos.len()
    }

    fn buttons(&self) -> impl Iterator<Item = &Button<'p>> {
        self.buttons.iter().chain(self.dyn_buttons.iter())
    }

    fn combos(&self) -> impl Iterator<Item = &Combo<'p>> {
        self.combos.iter().chain(self.dyn_combos.iter())
    }

    /// Slot of the first button with `key_id`.
    pub fn index_by_key_id(&self, key_id: u16) -> Option<usize> {
        self.buttons().position(|b| b.key_id == key_id)
    }

    /// Slot of `button`, looked up by its key id.
    pub fn index_of(&self, button: &Button) -> Option<usize> {
        self.index_by_key_id(button.key_id)
    }

    pub fn button(&self, index: usize) -> Option<&Button<'p>> {
        if index < self.buttons.len() {
            self.buttons.get(index)
        } else {
            self.dyn_buttons.get(index - self.buttons.len())
        }
    }

    pub fn button_mut(&mut self, index: usize) -> Option<&mut Button<'p>> {
        if index < self.buttons.len() {
            self.buttons.get_mut(index)
        } else {
            self.dyn_buttons.get_mut(index - self.buttons.len())
        }
    }

    pub fn button_by_key_id(&self, key_id: u16) -> Option<&Button<'p>> {
        self.buttons().find(|b| b.key_id == key_id)
    }

    pub fn button_by_key_id_mut(&mut self, key_id: u16) -> Option<&mut Button<'p>> {
        let index = self.index_by_key_id(key_id)?;
        self.button_mut(index)
    }

    /// Index of the first combo with `key_id`.
    pub fn combo_index_by_key_id(&self, key_id: u16) -> Option<usize> {
        self.combos().position(|c| c.key_id() == key_id)
    }

    pub fn combo(&self, index: usize) -> Option<&Combo<'p>> {
        if index < self.combos.len() {
            self.combos.get(index)
        } else {
            self.dyn_combos.get(index - self.combos.len())
        }
    }

    pub fn combo_mut(&mut self, index: usize) -> Option<&mut Combo<'p>> {
        if index < self.combos.len() {
            self.combos.get_mut(index)
        } else {
            self.dyn_combos.get_mut(index - self.combos.len())
        }
    }

    pub fn combo_by_key_id(&self, key_id: u16) -> Option<&Combo<'p>> {
        self.combos().find(|c| c.key_id() == key_id)
    }

    /// Adds the button at slot `key_index` to combo `combo`.
    pub fn combo_add_key_index(&mut self, combo: usize, key_index: usize) -> Result<(), ButtonError> {
        self.combo_mut(combo).ok_or(ButtonError::KeyNotFound)?.add_key_index(key_index)
    }

    /// Removes the button at slot `key_index` from combo `combo`.
    pub fn combo_remove_key_index(&mut self, combo: usize, key_index: usize) -> Result<(), ButtonError> {
        self.combo_mut(combo).ok_or(ButtonError::KeyNotFound)?.remove_key_index(key_index)
    }

    /// Adds the button with `key_id` to combo `combo`.
    pub fn combo_add_key(&mut self, combo: usize, key_id: u16) -> Result<(), ButtonError> {
        let Some(key_index) = self.index_by_key_id(key_id) else {
            warn!("Combo {}: no button with key id {}", combo, key_id);
            return Err(ButtonError::KeyNotFound);
        };
        self.combo_add_key_index(combo, key_index)
    }

    /// Removes the button with `key_id` from combo `combo`.
    pub fn combo_remove_key(&mut self, combo: usize, key_id: u16) -> Result<(), ButtonError> {
        let Some(key_index) = self.index_by_key_id(key_id) else {
            warn!("Combo {}: no button with key id {}", combo, key_id);
            return Err(ButtonError::KeyNotFound);
        };
        self.combo_remove_key_index(combo, key_index)
    }

    /// Whether the button with `key_id` has a confirmed press.
    pub fn is_active(&self, key_id: u16) -> bool {
        self.button_by_key_id(key_id).is_some_and(|b| b.is_active())
    }

    /// Whether any button or combo is in the middle of a sequence.
    ///
    /// When this is `false` no event is pending, and ticking can pause until the
    /// next input change.
    pub fn is_in_process(&self) -> bool {
        self.buttons().any(|b| b.is_in_process()) || self.combos().any(|c| c.button().is_in_process())
    }

    /// Snapshot of the last tick.
    pub fn old_state(&self) -> &KeyState {
        &self.old_state
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Reads every button through the [`StateReader`], then runs one tick.
    pub fn process(&mut self, now: Time) {
        let mut state = KeyState::new();
        for (index, button) in self.buttons.iter().chain(self.dyn_buttons.iter()).enumerate() {
            state.assign(index, self.reader.is_active(button));
        }
        self.process_with_state(&state, now);
    }

    /// Runs one tick on a snapshot read by the caller.
    ///
    /// Bit `i` of `state` is the input level of the button at slot `i`.
    pub fn process_with_state(&mut self, state: &KeyState, now: Time) {
        let old_state = self.old_state;

        for (index, button) in self.buttons.iter_mut().chain(self.dyn_buttons.iter_mut()).enumerate() {
            button.process(old_state.get(index), state.get(index), now, &mut self.handler);
        }

        for combo in self.combos.iter_mut().chain(self.dyn_combos.iter_mut()) {
            combo.process(&old_state, state, now, &mut self.handler);
        }

        self.old_state = *state;
    }

    /// Runs one tick at the current `embassy_time` instant.
    #[cfg(feature = "time")]
    pub fn process_now(&mut self) {
        // Truncation is the wraparound of `Time`
        let now = embassy_time::Instant::now().as_millis() as Time;
        self.process(now);
    }
}
