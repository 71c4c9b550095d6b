// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_gate_is_free() {
    let gate = Gate::new();
    assert!(gate.is_free());
    assert!(gate.holder().is_none());
}

#[test]
fn acquire_free_gate_succeeds() {
    let gate = Gate::new();
    let (gate, events) = gate.transition(GateInput::Acquire {
        holder: Initiator::Dispatcher,
    });

    assert!(gate.is_held_by(&Initiator::Dispatcher));
    assert_eq!(
        events,
        vec![Event::GateAcquired {
            holder: Initiator::Dispatcher
        }]
    );
}

#[test]
fn acquire_held_gate_is_denied() {
    let (gate, _) = Gate::new().transition(GateInput::Acquire {
        holder: Initiator::Dispatcher,
    });
    let (gate, events) = gate.transition(GateInput::Acquire {
        holder: Initiator::operator("rto-1"),
    });

    assert!(gate.is_held_by(&Initiator::Dispatcher));
    assert!(matches!(
        events.as_slice(),
        [Event::GateDenied { holder: Initiator::Operator(id), current: Initiator::Dispatcher }]
        if id == "rto-1"
    ));
}

#[test]
fn release_by_holder_frees_gate() {
    let holder = Initiator::operator("rto-1");
    let (gate, _) = Gate::new().transition(GateInput::Acquire {
        holder: holder.clone(),
    });
    let (gate, events) = gate.transition(GateInput::Release {
        holder: holder.clone(),
    });

    assert!(gate.is_free());
    assert_eq!(events, vec![Event::GateReleased { holder }]);
}

#[test]
fn release_by_wrong_holder_is_noop() {
    let (gate, _) = Gate::new().transition(GateInput::Acquire {
        holder: Initiator::Dispatcher,
    });
    let (gate, events) = gate.transition(GateInput::Release {
        holder: Initiator::operator("rto-1"),
    });

    assert!(gate.is_held_by(&Initiator::Dispatcher));
    assert!(events.is_empty());
}

#[test]
fn initiator_display() {
    assert_eq!(Initiator::Dispatcher.to_string(), "automated dispatcher");
    assert_eq!(Initiator::operator("rto-2").to_string(), "operator rto-2");
}
