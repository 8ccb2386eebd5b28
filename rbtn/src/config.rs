/// Timing configuration of a button, in milliseconds.
///
/// One instance is usually shared by many buttons, so it's typically kept in a
/// `static`:
///
/// ```ignore
/// static PARAMS: ButtonParams = ButtonParams::new(20, 0, 20, 300, 200, 500, 10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonParams {
    /// Minimum stable active time before a press is reported
    pub debounce_press: u16,
    /// Minimum stable inactive time before a release is reported
    pub debounce_release: u16,
    /// Shortest press that still counts as a click
    pub click_min: u16,
    /// Longest press that still counts as a click
    pub click_max: u16,
    /// Longest gap between two clicks of the same multi-click run
    pub multi_click_max_gap: u16,
    /// Period of keep-alive events while held, 0 disables them
    pub keepalive_period: u16,
    /// Number of consecutive clicks after which the run is reported immediately
    pub max_consecutive: u16,
}

impl Default for ButtonParams {
    fn default() -> Self {
        Self::new(20, 0, 20, 300, 200, 500, 10)
    }
}

impl ButtonParams {
    pub const fn new(
        debounce_press: u16,
        debounce_release: u16,
        click_min: u16,
        click_max: u16,
        multi_click_max_gap: u16,
        keepalive_period: u16,
        max_consecutive: u16,
    ) -> Self {
        Self {
            debounce_press,
            debounce_release,
            click_min,
            click_max,
            multi_click_max_gap,
            keepalive_period,
            max_consecutive,
        }
    }

    /// Number of keep-alive events a hold of `ms` milliseconds produces.
    pub const fn keepalive_count_for_time(&self, ms: u32) -> u32 {
        if self.keepalive_period == 0 {
            0
        } else {
            ms / self.keepalive_period as u32
        }
    }
}
