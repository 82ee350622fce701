//! Restore the terminal before a panic report is printed.

use super::setup::emergency_restore;
use std::panic;

/// Wrap whichever hook is installed so the terminal is restored first.
///
/// Install after `color_eyre::install` so its report still prints, and
/// before the `TerminalManager` exists.
pub fn setup_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        emergency_restore();
        previous(info);
    }));
}
