use core::fmt;

/// Errors of button registration and binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonError {
    /// More indexed buttons than [`crate::MAX_KEY_NUM`], or a slot index past it
    CapacityExceeded,
    /// No free slot left in the dynamic storage
    StorageFull,
    /// The key id is already used by a registered button or combo
    AlreadyRegistered,
    /// No button or combo matches the given key id or index
    KeyNotFound,
}

impl fmt::Display for ButtonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonError::CapacityExceeded => write!(f, "button capacity exceeded"),
            ButtonError::StorageFull => write!(f, "dynamic button storage is full"),
            ButtonError::AlreadyRegistered => write!(f, "key id is already registered"),
            ButtonError::KeyNotFound => write!(f, "key not found"),
        }
    }
}

impl core::error::Error for ButtonError {}
