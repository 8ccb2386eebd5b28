pub mod common;

use core::cell::Cell;

use common::Expect::{Press, Release};
use common::*;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
use rbtn::{Button, ButtonManager, DirectPinReader, KeyState, StateReader};

fn gets(state: PinState, count: usize) -> Vec<PinTransaction> {
    (0..count).map(|_| PinTransaction::get(state)).collect()
}

#[test]
fn test_low_active_pins() {
    let pin0 = PinMock::new(&gets(PinState::Low, 2));
    let pin1 = PinMock::new(&gets(PinState::High, 2));
    let reader = DirectPinReader::new([Some(pin0), Some(pin1), None], true);

    let tick = Cell::new(0);
    let mut buttons = [
        Button::new(0, &PARAM_DEFAULT),
        Button::new(1, &PARAM_DEFAULT),
        Button::new(2, &PARAM_DEFAULT),
    ];
    let mut manager: ButtonManager<'_, '_, _, _> =
        ButtonManager::new(&mut buttons, &mut [], reader, Recorder::new(&tick)).unwrap();

    manager.process(0);
    manager.process(1);
    assert_eq!(manager.old_state(), &KeyState::from_indices([0]));

    for pin in manager.reader_mut().pins_mut().iter_mut().flatten() {
        pin.done();
    }
}

#[test]
fn test_high_active_press_and_release() {
    let mut transactions = gets(PinState::High, 50);
    transactions.extend(gets(PinState::Low, 50));
    let pin = PinMock::new(&transactions);
    let reader = DirectPinReader::new([Some(pin)], false);

    let tick = Cell::new(0);
    let mut buttons = [Button::new(0, &PARAM_DEFAULT)];
    let mut manager: ButtonManager<'_, '_, _, _> =
        ButtonManager::new(&mut buttons, &mut [], reader, Recorder::new(&tick)).unwrap();

    for i in 0..100 {
        tick.set(i);
        manager.process(i);
    }
    assert_eq!(manager.handler().of(0), [Press, Release]);

    for pin in manager.reader_mut().pins_mut().iter_mut().flatten() {
        pin.done();
    }
}

#[test]
fn test_key_id_without_pin_is_inactive() {
    let mut reader: DirectPinReader<PinMock, 1> = DirectPinReader::new([None], true);
    assert!(!reader.is_active(&Button::new(0, &PARAM_DEFAULT)));
    assert!(!reader.is_active(&Button::new(5, &PARAM_DEFAULT)));
}
