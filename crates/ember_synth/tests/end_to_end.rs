//! Netlist shapes produced for whole expressions.

use ember_common::{Interner, Logic, LogicVec};
use ember_config::SynthConfig;
use ember_diagnostics::TerminalRenderer;
use ember_ir::{
    ArithOp, BitwiseOp, CompareFlag, CompareOp, Design, DeviceClass, DeviceId, DeviceKind, DivOp,
    Expr, GateKind, LogicalOp, NetId, NetKind, PinOwner, ReduceOp, ScopeId, ShiftOp, Terminal,
};
use ember_source::{SourceDb, Span};
use ember_synth::synthesize;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn declare(design: &mut Design<'_>, scope: ScopeId, name: &str, width: u32) -> (NetId, Expr) {
    let net = design.add_net(scope, name, NetKind::Wire, width, Span::DUMMY);
    (net, Expr::signal(net, width))
}

fn bits(s: &str) -> Expr {
    Expr::constant(LogicVec::from_binary_str(s).unwrap())
}

fn pin(design: &Design<'_>, net: NetId, bit: u32) -> ember_ir::PinId {
    design.net_pin(net, bit).unwrap()
}

fn term(design: &Design<'_>, dev: DeviceId, t: Terminal) -> ember_ir::PinId {
    design.device_pin(dev, t).unwrap()
}

fn only_device(design: &Design<'_>, class: DeviceClass) -> DeviceId {
    let mut found = design.devices().filter(|d| d.kind.class() == class);
    let dev = found.next().expect("no device of class").id;
    assert!(found.next().is_none(), "more than one {class:?}");
    dev
}

#[test]
fn and_with_zero_constant_is_tied_low() {
    init_tracing();
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);

    let out = synthesize(&Expr::bitwise(BitwiseOp::And, a, bits("0000")), &mut design).unwrap();

    assert_eq!(design.net(out).width(), 4);
    assert_eq!(design.count_devices(DeviceClass::Logic), 0);
    assert_eq!(design.count_devices(DeviceClass::Const), 1);
    for bit in 0..4 {
        let p = pin(&design, out, bit);
        assert!(design.drivers_constant(p));
        assert_eq!(design.driven_value(p), Some(Logic::Zero));
    }
    assert_eq!(design.error_count(), 0);
}

#[test]
fn and_with_one_passes_left_bits() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, a) = declare(&mut design, root, "a", 4);

    let out = synthesize(&Expr::bitwise(BitwiseOp::And, a, bits("1111")), &mut design).unwrap();

    assert_eq!(design.count_devices(DeviceClass::Logic), 0);
    for bit in 0..4 {
        assert!(design.connected(pin(&design, out, bit), pin(&design, a_net, bit)));
    }
}

#[test]
fn and_with_unknown_constant_bits_keeps_gates() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, a) = declare(&mut design, root, "a", 4);

    let out = synthesize(&Expr::bitwise(BitwiseOp::And, a, bits("x1z0")), &mut design).unwrap();

    assert_eq!(design.count_gates(GateKind::And), 2);
    assert!(design.connected(pin(&design, out, 2), pin(&design, a_net, 2)));
    assert_eq!(design.driven_value(pin(&design, out, 0)), Some(Logic::Zero));
}

#[test]
fn and_folding_can_be_disabled() {
    let interner = Interner::new();
    let config = SynthConfig {
        fold_constants: false,
        ..SynthConfig::default()
    };
    let mut design = Design::with_config(&interner, "top", config);
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);

    synthesize(&Expr::bitwise(BitwiseOp::And, a, bits("0000")), &mut design).unwrap();

    assert_eq!(design.count_gates(GateKind::And), 4);
}

#[test]
fn bitwise_builds_one_gate_per_bit() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, a) = declare(&mut design, root, "a", 3);
    let (b_net, b) = declare(&mut design, root, "b", 3);

    let out = synthesize(&Expr::bitwise(BitwiseOp::Xnor, a, b), &mut design).unwrap();

    assert_eq!(design.count_gates(GateKind::Xnor), 3);
    for dev in design.devices() {
        assert_eq!(dev.kind.pin_count(), 3);
    }
    let gates: Vec<DeviceId> = design.devices().map(|d| d.id).collect();
    for (bit, &g) in gates.iter().enumerate() {
        let bit = bit as u32;
        assert!(design.connected(term(&design, g, Terminal::Output), pin(&design, out, bit)));
        assert!(design.connected(
            term(&design, g, Terminal::Input(0)),
            pin(&design, a_net, bit)
        ));
        assert!(design.connected(
            term(&design, g, Terminal::Input(1)),
            pin(&design, b_net, bit)
        ));
    }
}

#[test]
fn bitwise_width_mismatch_names_both_operands() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);
    let (_, b) = declare(&mut design, root, "b", 3);

    assert_eq!(
        synthesize(&Expr::bitwise(BitwiseOp::Or, a, b), &mut design),
        None
    );

    assert_eq!(design.error_count(), 1);
    assert_eq!(design.count_devices(DeviceClass::Logic), 0);
    let diags = design.sink().diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code.to_string(), "E302");
    assert_eq!(
        diags[0].notes,
        vec!["width=4: a".to_string(), "width=3: b".to_string()]
    );
}

#[test]
fn equality_with_zero_is_one_nor() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, a) = declare(&mut design, root, "a", 4);

    let out = synthesize(&Expr::compare(CompareOp::Eq, a, bits("0000")), &mut design).unwrap();

    assert_eq!(design.net(out).width(), 1);
    assert_eq!(design.count_devices(DeviceClass::Compare), 0);
    assert_eq!(design.count_devices(DeviceClass::Const), 0);
    let nor = only_device(&design, DeviceClass::Logic);
    assert_eq!(
        design.device(nor).kind,
        DeviceKind::Logic {
            gate: GateKind::Nor,
            pins: 5
        }
    );
    assert!(design.connected(term(&design, nor, Terminal::Output), pin(&design, out, 0)));
    for bit in 0..4 {
        assert!(design.connected(
            term(&design, nor, Terminal::Input(bit)),
            pin(&design, a_net, bit)
        ));
    }
}

#[test]
fn zero_tests_in_either_orientation() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 3);

    synthesize(
        &Expr::compare(CompareOp::Ne, bits("000"), a.clone()),
        &mut design,
    )
    .unwrap();
    synthesize(
        &Expr::compare(CompareOp::Gt, a.clone(), bits("000")),
        &mut design,
    )
    .unwrap();
    synthesize(
        &Expr::compare(CompareOp::Lt, bits("000"), a.clone()),
        &mut design,
    )
    .unwrap();
    synthesize(
        &Expr::compare(CompareOp::CaseEq, a, bits("000")),
        &mut design,
    )
    .unwrap();

    assert_eq!(design.count_gates(GateKind::Or), 3);
    assert_eq!(design.count_gates(GateKind::Nor), 1);
    assert_eq!(design.count_devices(DeviceClass::Compare), 0);
}

#[test]
fn less_than_zero_uses_comparator() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);

    let out = synthesize(&Expr::compare(CompareOp::Lt, a, bits("0000")), &mut design).unwrap();

    let cmp = only_device(&design, DeviceClass::Compare);
    assert_eq!(design.count_devices(DeviceClass::Logic), 0);
    let alb = term(&design, cmp, Terminal::Flag(CompareFlag::Alb));
    assert!(design.connected(alb, pin(&design, out, 0)));
}

#[test]
fn zero_compare_can_be_disabled() {
    let interner = Interner::new();
    let config = SynthConfig {
        zero_compare: false,
        ..SynthConfig::default()
    };
    let mut design = Design::with_config(&interner, "top", config);
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);

    synthesize(&Expr::compare(CompareOp::Eq, a, bits("0000")), &mut design).unwrap();

    assert_eq!(design.count_devices(DeviceClass::Compare), 1);
    assert_eq!(design.count_devices(DeviceClass::Logic), 0);
}

#[test]
fn single_bit_equality_is_xnor_or_xor() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 1);
    let (_, b) = declare(&mut design, root, "b", 1);

    synthesize(
        &Expr::compare(CompareOp::Eq, a.clone(), b.clone()),
        &mut design,
    )
    .unwrap();
    assert_eq!(design.count_gates(GateKind::Xnor), 1);
    synthesize(&Expr::compare(CompareOp::Ne, a, b), &mut design).unwrap();
    assert_eq!(design.count_gates(GateKind::Xor), 1);
    assert_eq!(design.count_devices(DeviceClass::Compare), 0);
}

#[test]
fn comparator_pads_narrow_operand() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, a) = declare(&mut design, root, "a", 4);
    let (b_net, b) = declare(&mut design, root, "b", 2);

    let out = synthesize(&Expr::compare(CompareOp::Ge, a, b), &mut design).unwrap();

    let cmp = only_device(&design, DeviceClass::Compare);
    assert_eq!(design.device(cmp).kind, DeviceKind::Compare { width: 4 });
    assert_eq!(design.count_devices(DeviceClass::Const), 1);
    let ageb = term(&design, cmp, Terminal::Flag(CompareFlag::Ageb));
    assert!(design.connected(ageb, pin(&design, out, 0)));
    assert!(design.connected(
        term(&design, cmp, Terminal::DataA(3)),
        pin(&design, a_net, 3)
    ));
    assert!(design.connected(
        term(&design, cmp, Terminal::DataB(1)),
        pin(&design, b_net, 1)
    ));
    let high = term(&design, cmp, Terminal::DataB(3));
    assert_eq!(design.driven_value(high), Some(Logic::Zero));
}

#[test]
fn concat_places_last_operand_lowest() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (w2, e2) = declare(&mut design, root, "w2", 2);
    let (w3, e3) = declare(&mut design, root, "w3", 3);
    let (w1, e1) = declare(&mut design, root, "w1", 1);

    let out = synthesize(&Expr::concat(vec![e2, e3, e1]), &mut design).unwrap();

    assert_eq!(design.net(out).width(), 6);
    assert!(design.connected(pin(&design, out, 0), pin(&design, w1, 0)));
    for bit in 0..3 {
        assert!(design.connected(pin(&design, out, 1 + bit), pin(&design, w3, bit)));
    }
    assert!(design.connected(pin(&design, out, 4), pin(&design, w2, 0)));
    assert!(design.connected(pin(&design, out, 5), pin(&design, w2, 1)));
    assert_eq!(design.devices().count(), 0);
}

#[test]
fn concat_reclaims_unreferenced_temporaries() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, _) = declare(&mut design, root, "a", 4);
    let (b_net, b) = declare(&mut design, root, "b", 2);

    let out = synthesize(
        &Expr::concat(vec![Expr::part_select(a_net, 1, 0), b]),
        &mut design,
    )
    .unwrap();

    let names: Vec<&str> = design.nets().map(|n| interner.resolve(n.name)).collect();
    assert_eq!(names, vec!["top.a", "top.b", "top._s1"]);
    assert!(design.connected(pin(&design, out, 2), pin(&design, a_net, 0)));
    assert!(design.connected(pin(&design, out, 1), pin(&design, b_net, 1)));
}

#[test]
fn concat_reclaim_can_be_disabled() {
    let interner = Interner::new();
    let config = SynthConfig {
        reclaim_temporaries: false,
        ..SynthConfig::default()
    };
    let mut design = Design::with_config(&interner, "top", config);
    let root = design.root_scope();
    let (a_net, _) = declare(&mut design, root, "a", 4);

    let high = Expr::part_select(a_net, 3, 2);
    let low = Expr::part_select(a_net, 0, 0);
    synthesize(&Expr::concat(vec![high, low]), &mut design).unwrap();

    assert_eq!(design.nets().count(), 4);
}

#[test]
fn full_width_reference_is_the_same_net() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, a) = declare(&mut design, root, "a", 8);

    assert_eq!(synthesize(&a, &mut design), Some(a_net));
    assert_eq!(design.nets().count(), 1);
}

#[test]
fn part_select_is_a_local_wire() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, _) = declare(&mut design, root, "a", 8);

    let out = synthesize(&Expr::part_select(a_net, 5, 3), &mut design).unwrap();

    let net = design.net(out);
    assert_eq!(net.width(), 3);
    assert_eq!(net.kind, NetKind::Wire);
    assert!(net.local);
    assert!(design.connected(pin(&design, out, 0), pin(&design, a_net, 3)));
    assert!(design.connected(pin(&design, out, 2), pin(&design, a_net, 5)));
}

#[test]
fn malformed_part_selects_are_rejected() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, _) = declare(&mut design, root, "a", 4);

    assert_eq!(
        synthesize(&Expr::part_select(a_net, 1, 2), &mut design),
        None
    );
    assert_eq!(design.error_count(), 1);
    assert_eq!(
        synthesize(&Expr::part_select(a_net, 4, 1), &mut design),
        None
    );
    assert_eq!(design.error_count(), 2);
    let codes: Vec<String> = design
        .sink()
        .diagnostics()
        .iter()
        .map(|d| d.code.to_string())
        .collect();
    assert_eq!(codes, vec!["E303", "E303"]);
    assert_eq!(design.nets().count(), 1);
}

#[test]
fn unsynthesizable_constructs_count_once() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);
    let (_, b) = declare(&mut design, root, "b", 4);

    assert_eq!(
        synthesize(&Expr::divide(DivOp::Div, a.clone(), b.clone()), &mut design),
        None
    );
    assert_eq!(design.error_count(), 1);
    assert_eq!(
        synthesize(&Expr::divide(DivOp::Mod, a.clone(), b.clone()), &mut design),
        None
    );
    assert_eq!(design.error_count(), 2);
    assert_eq!(synthesize(&Expr::real(2.5), &mut design), None);
    assert_eq!(design.error_count(), 3);
    let call = Expr::func_call(interner.get_or_intern("$random"), vec![], 32);
    assert_eq!(synthesize(&call, &mut design), None);
    assert_eq!(design.error_count(), 4);
    assert_eq!(design.devices().count(), 0);
    assert!(design
        .sink()
        .diagnostics()
        .iter()
        .all(|d| d.code.to_string() == "E301"));
}

#[test]
fn failed_operand_is_not_counted_again() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);
    let (_, b) = declare(&mut design, root, "b", 4);
    let (_, c) = declare(&mut design, root, "c", 4);

    let quotient = Expr::divide(DivOp::Div, a, b);
    let sum = Expr::arith(ArithOp::Add, quotient, c);
    assert_eq!(synthesize(&sum, &mut design), None);

    assert_eq!(design.error_count(), 1);
    assert_eq!(design.count_devices(DeviceClass::AddSub), 0);
}

#[test]
fn both_operands_are_attempted() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");

    let expr = Expr::bitwise(BitwiseOp::Xor, Expr::real(1.0), Expr::real(2.0));
    assert_eq!(synthesize(&expr, &mut design), None);

    assert_eq!(design.error_count(), 2);
}

#[test]
fn ternary_with_mismatched_branches_builds_no_mux() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, c) = declare(&mut design, root, "c", 1);
    let (_, a) = declare(&mut design, root, "a", 8);
    let (_, b) = declare(&mut design, root, "b", 4);

    assert_eq!(synthesize(&Expr::ternary(c, a, b), &mut design), None);

    assert_eq!(design.error_count(), 1);
    assert_eq!(design.count_devices(DeviceClass::Mux), 0);
}

#[test]
fn ternary_condition_must_be_one_bit() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, c) = declare(&mut design, root, "c", 2);
    let (_, a) = declare(&mut design, root, "a", 4);
    let (_, b) = declare(&mut design, root, "b", 4);

    assert_eq!(synthesize(&Expr::ternary(c, a, b), &mut design), None);
    assert_eq!(design.sink().diagnostics()[0].code.to_string(), "E302");
    assert_eq!(design.count_devices(DeviceClass::Mux), 0);
}

#[test]
fn ternary_routes_true_branch_to_state_one() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (c_net, c) = declare(&mut design, root, "c", 1);
    let (b_net, b) = declare(&mut design, root, "b", 8);
    let (d_net, d) = declare(&mut design, root, "d", 8);

    let out = synthesize(&Expr::ternary(c, b, d), &mut design).unwrap();

    let mux = only_device(&design, DeviceClass::Mux);
    assert_eq!(
        design.device(mux).kind,
        DeviceKind::Mux {
            width: 8,
            size: 2,
            select_width: 1
        }
    );
    for bit in 0..8 {
        let one = term(&design, mux, Terminal::MuxData { state: 1, bit });
        let zero = term(&design, mux, Terminal::MuxData { state: 0, bit });
        assert!(design.connected(one, pin(&design, b_net, bit)));
        assert!(design.connected(zero, pin(&design, d_net, bit)));
        assert!(design.connected(
            term(&design, mux, Terminal::Result(bit)),
            pin(&design, out, bit)
        ));
    }
    assert!(design.connected(
        term(&design, mux, Terminal::Select(0)),
        pin(&design, c_net, 0)
    ));
    let data = term(&design, mux, Terminal::MuxData { state: 1, bit: 4 });
    assert_eq!(design.pin_name(data), "top._d0.Data[1][4]");
}

#[test]
fn add_and_sub_set_direction() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, a) = declare(&mut design, root, "a", 4);
    let (_, b) = declare(&mut design, root, "b", 4);

    let sum = synthesize(
        &Expr::arith(ArithOp::Add, a.clone(), b.clone()),
        &mut design,
    )
    .unwrap();
    synthesize(&Expr::arith(ArithOp::Sub, a, b), &mut design).unwrap();

    let units: Vec<DeviceId> = design
        .devices()
        .filter(|d| d.kind.class() == DeviceClass::AddSub)
        .map(|d| d.id)
        .collect();
    assert_eq!(units.len(), 2);
    assert_eq!(design.attribute(units[0], "LPM_Direction"), Some("ADD"));
    assert_eq!(design.attribute(units[1], "LPM_Direction"), Some("SUB"));
    assert!(design.connected(
        term(&design, units[0], Terminal::Result(3)),
        pin(&design, sum, 3)
    ));
    assert!(design.connected(
        term(&design, units[0], Terminal::DataA(0)),
        pin(&design, a_net, 0)
    ));
}

#[test]
fn arithmetic_width_mismatch_is_reported() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);
    let (_, b) = declare(&mut design, root, "b", 5);

    assert_eq!(
        synthesize(&Expr::arith(ArithOp::Add, a, b), &mut design),
        None
    );
    assert_eq!(design.error_count(), 1);
    assert_eq!(design.count_devices(DeviceClass::AddSub), 0);
}

#[test]
fn declared_width_is_checked_before_building() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);
    let (_, b) = declare(&mut design, root, "b", 4);

    let expr = Expr::Bitwise {
        op: BitwiseOp::Or,
        left: Box::new(a),
        right: Box::new(b),
        width: 5,
        span: Span::DUMMY,
    };
    assert_eq!(synthesize(&expr, &mut design), None);
    assert_eq!(design.sink().diagnostics()[0].code.to_string(), "E305");
    assert_eq!(design.count_devices(DeviceClass::Logic), 0);
}

#[test]
fn shift_registers_direction_constant() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 8);
    let (s_net, s) = declare(&mut design, root, "s", 3);

    synthesize(
        &Expr::shift(ShiftOp::Left, a.clone(), s.clone()),
        &mut design,
    )
    .unwrap();
    synthesize(&Expr::shift(ShiftOp::Right, a, s), &mut design).unwrap();

    let shifters: Vec<DeviceId> = design
        .devices()
        .filter(|d| d.kind.class() == DeviceClass::Shift)
        .map(|d| d.id)
        .collect();
    assert_eq!(shifters.len(), 2);
    assert_eq!(design.count_devices(DeviceClass::Const), 2);
    assert_eq!(
        design.device(shifters[0]).kind,
        DeviceKind::Shift {
            width: 8,
            distance_width: 3
        }
    );
    let left_dir = term(&design, shifters[0], Terminal::Direction);
    let right_dir = term(&design, shifters[1], Terminal::Direction);
    assert_eq!(design.driven_value(left_dir), Some(Logic::Zero));
    assert_eq!(design.driven_value(right_dir), Some(Logic::One));
    assert!(design.connected(
        term(&design, shifters[1], Terminal::Distance(2)),
        pin(&design, s_net, 2)
    ));

    let dir_nets: Vec<NetId> = design
        .nexus_members(left_dir)
        .into_iter()
        .filter_map(|p| match design.pin_owner(p) {
            PinOwner::Net { net, .. } => Some(net),
            PinOwner::Device { .. } => None,
        })
        .collect();
    assert_eq!(dir_nets.len(), 1);
    let dir = design.net(dir_nets[0]);
    assert_eq!(dir.kind, NetKind::Wire);
    assert!(!dir.local);
}

#[test]
fn logical_or_is_one_wide_gate() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 2);
    let (b_net, b) = declare(&mut design, root, "b", 3);

    synthesize(&Expr::logical(LogicalOp::Or, a, b), &mut design).unwrap();

    let or = only_device(&design, DeviceClass::Logic);
    assert_eq!(
        design.device(or).kind,
        DeviceKind::Logic {
            gate: GateKind::Or,
            pins: 6
        }
    );
    assert!(design.connected(
        term(&design, or, Terminal::Input(4)),
        pin(&design, b_net, 2)
    ));
}

#[test]
fn logical_and_uses_distinct_inputs() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (a_net, a) = declare(&mut design, root, "a", 1);
    let (b_net, b) = declare(&mut design, root, "b", 1);

    synthesize(&Expr::logical(LogicalOp::And, a, b), &mut design).unwrap();

    let and = only_device(&design, DeviceClass::Logic);
    let i0 = term(&design, and, Terminal::Input(0));
    let i1 = term(&design, and, Terminal::Input(1));
    assert!(design.connected(i0, pin(&design, a_net, 0)));
    assert!(design.connected(i1, pin(&design, b_net, 0)));
    assert!(!design.connected(i0, i1));
}

#[test]
fn logical_and_reduces_wide_operands() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);
    let (b_net, b) = declare(&mut design, root, "b", 1);

    synthesize(&Expr::logical(LogicalOp::And, a, b), &mut design).unwrap();

    assert_eq!(design.count_gates(GateKind::Or), 1);
    assert_eq!(design.count_gates(GateKind::And), 1);
    let wide_or = DeviceKind::Logic {
        gate: GateKind::Or,
        pins: 5,
    };
    let and3 = DeviceKind::Logic {
        gate: GateKind::And,
        pins: 3,
    };
    let or = design.devices().find(|d| d.kind == wide_or).unwrap().id;
    let and = design.devices().find(|d| d.kind == and3).unwrap().id;
    assert!(design.connected(
        term(&design, and, Terminal::Input(0)),
        term(&design, or, Terminal::Output)
    ));
    assert!(design.connected(
        term(&design, and, Terminal::Input(1)),
        pin(&design, b_net, 0)
    ));
}

#[test]
fn logical_operators_reject_empty_operands() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);
    let empty = Expr::constant(LogicVec::all_zero(0));

    let and = Expr::logical(LogicalOp::And, a.clone(), empty.clone());
    assert_eq!(synthesize(&and, &mut design), None);
    let or = Expr::logical(LogicalOp::Or, empty, a);
    assert_eq!(synthesize(&or, &mut design), None);

    assert_eq!(design.error_count(), 2);
    assert_eq!(design.count_devices(DeviceClass::Logic), 0);
    let messages: Vec<String> = design
        .sink()
        .diagnostics()
        .into_iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], "operand of `&&` has no bits");
    assert_eq!(messages[1], "operand of `||` has no bits");
}

#[test]
fn not_builds_an_inverter_per_bit() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);

    let out = synthesize(&Expr::not(a), &mut design).unwrap();

    assert_eq!(design.net(out).width(), 4);
    assert_eq!(design.count_gates(GateKind::Not), 4);
    assert!(design.devices().all(|d| d.kind.pin_count() == 2));
}

#[test]
fn reductions_pick_gate_kind() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);

    synthesize(&Expr::reduce(ReduceOp::LogicNot, a.clone()), &mut design).unwrap();
    synthesize(&Expr::reduce(ReduceOp::Nor, a.clone()), &mut design).unwrap();
    synthesize(&Expr::reduce(ReduceOp::Nand, a.clone()), &mut design).unwrap();
    let out = synthesize(&Expr::reduce(ReduceOp::Xnor, a), &mut design).unwrap();

    assert_eq!(design.count_gates(GateKind::Nor), 2);
    assert_eq!(design.count_gates(GateKind::Nand), 1);
    assert_eq!(design.count_gates(GateKind::Xnor), 1);
    assert!(design.devices().all(|d| d.kind.pin_count() == 5));
    assert_eq!(design.net(out).width(), 1);
}

#[test]
fn reduction_of_empty_operand_is_rejected() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");

    let empty = Expr::constant(LogicVec::all_zero(0));
    assert_eq!(
        synthesize(&Expr::reduce(ReduceOp::And, empty), &mut design),
        None
    );

    assert_eq!(design.error_count(), 1);
    assert_eq!(design.count_devices(DeviceClass::Logic), 0);
    let diags = design.sink().diagnostics();
    assert_eq!(diags[0].code.to_string(), "E302");
    assert_eq!(diags[0].message, "operand of `&` has no bits");
}

#[test]
fn constants_live_in_the_root_scope() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let alu = design.add_scope(root, "alu");
    let (_, a) = declare(&mut design, alu, "a", 4);
    let (_, b) = declare(&mut design, alu, "b", 4);

    let k = synthesize(&bits("1010"), &mut design).unwrap();
    let x = synthesize(&Expr::bitwise(BitwiseOp::Xor, a, b), &mut design).unwrap();

    assert_eq!(interner.resolve(design.net(k).name), "top._s0");
    assert_eq!(interner.resolve(design.net(x).name), "top.alu._s0");
    assert_eq!(design.constant_value(k), LogicVec::from_binary_str("1010"));
}

#[test]
fn diagnostics_render_with_source_line() {
    let interner = Interner::new();
    let mut sources = SourceDb::new();
    let file = sources.add_source("top.v", "assign y = a / b;\n".to_string());
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 4);
    let (_, b) = declare(&mut design, root, "b", 4);

    let expr = Expr::divide(DivOp::Div, a, b).with_span(Span::new(file, 11, 16));
    assert_eq!(synthesize(&expr, &mut design), None);

    let text = TerminalRenderer::new(false).render_all(&design.sink().take_all(), &sources);
    assert!(text.starts_with("error[E301]: cannot synthesize division\n"));
    assert!(text.contains(" --> top.v:1:12\n"));
    assert!(text.contains("1 | assign y = a / b;\n"));
    assert!(text.contains("^^^^^ division"));
    assert!(text.contains("= note: in `(a / b)`"));
    assert_eq!(design.error_count(), 1);
}

#[test]
fn netlist_serializes_device_kinds() {
    let interner = Interner::new();
    let mut design = Design::new(&interner, "top");
    let root = design.root_scope();
    let (_, a) = declare(&mut design, root, "a", 2);

    synthesize(&Expr::compare(CompareOp::Eq, a, bits("00")), &mut design).unwrap();

    let kinds: Vec<&DeviceKind> = design.devices().map(|d| &d.kind).collect();
    let json = serde_json::to_string(&kinds).unwrap();
    let back: Vec<DeviceKind> = serde_json::from_str(&json).unwrap();
    assert_eq!(
        back,
        vec![DeviceKind::Logic {
            gate: GateKind::Nor,
            pins: 3
        }]
    );
}
