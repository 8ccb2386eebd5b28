use bitflags::bitflags;

/// Events reported by a button or combo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Press confirmed after debounce
    Press,
    /// Release confirmed after debounce
    Release,
    /// End of a click run, the run length is [`crate::Button::click_count`]
    Click,
    /// Periodic event while held, the running count is [`crate::Button::keepalive_count`]
    KeepAlive,
}

impl ButtonEvent {
    /// The mask bit that enables this event.
    pub const fn mask(self) -> EventMask {
        match self {
            ButtonEvent::Press => EventMask::PRESS,
            ButtonEvent::Release => EventMask::RELEASE,
            ButtonEvent::Click => EventMask::CLICK,
            ButtonEvent::KeepAlive => EventMask::KEEPALIVE,
        }
    }
}

bitflags! {
    /// Selects which events of a button reach the event handler.
    ///
    /// Masked events still drive the button state, they are only not reported.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventMask: u8 {
        const PRESS = 1 << 0;
        const RELEASE = 1 << 1;
        const CLICK = 1 << 2;
        const KEEPALIVE = 1 << 3;
        const ALL = Self::PRESS.bits() | Self::RELEASE.bits() | Self::CLICK.bits() | Self::KEEPALIVE.bits();
    }
}

impl Default for EventMask {
    fn default() -> Self {
        EventMask::ALL
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EventMask {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "EventMask({=u8:#06b})", self.bits());
    }
}
