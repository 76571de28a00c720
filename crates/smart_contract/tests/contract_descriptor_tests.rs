//! Tests for native contract descriptors, stub synthesis and the
//! per-hardfork cache.

use neo_core::Hardfork;
use neo_smart_contract::contract_state::create_native_contract_hash;
use neo_smart_contract::interop::names;
use neo_smart_contract::interop::{ContractMD, Event, MethodAndPrice};
use neo_smart_contract::manifest::{
    ContractEvent, ContractMethod, ContractParameter, ContractParameterType,
};
use neo_smart_contract::{Result, StackItem};
use neo_vm::CallFlags;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn noop(
    _ic: &mut neo_smart_contract::interop::Context,
    _args: &[StackItem],
) -> Result<StackItem> {
    Ok(StackItem::Null)
}

fn params(names: &[&str]) -> Vec<ContractParameter> {
    names
        .iter()
        .map(|n| ContractParameter::new(*n, ContractParameterType::Any))
        .collect()
}

fn method(name: &str, param_names: &[&str]) -> MethodAndPrice {
    MethodAndPrice::new(
        noop,
        ContractMethod::new(name, params(param_names), ContractParameterType::Void),
        1 << 10,
        CallFlags::READ_STATES,
    )
}

#[test]
fn test_stub_layout_and_offset_dispatch() {
    // Two methods: foo() and bar(x).
    let mut md = ContractMD::new("Dispatcher", -100, None);
    md.add_method(method("foo", &[]));
    md.add_method(method("bar", &["x"]));

    let hf = md.hf_specific_contract_md(None).unwrap();
    let script = &hf.nef.script;
    assert_eq!(script.len(), 16);

    let foo = hf.get_method("foo", 0).unwrap();
    let bar = hf.get_method("bar", 1).unwrap();
    assert!(foo.syscall_offset == 2 || foo.syscall_offset == 10);
    assert!(bar.syscall_offset == 2 || bar.syscall_offset == 10);
    assert_ne!(foo.syscall_offset, bar.syscall_offset);

    let foo_offset = foo.syscall_offset;
    assert_eq!(
        hf.get_method_by_offset(foo_offset).unwrap().md.name,
        "foo"
    );
    assert!(hf.get_method_by_offset(1).is_none());
}

#[test]
fn test_stub_bytes_per_method() {
    let mut md = ContractMD::new("Stubby", -101, None);
    md.add_method(method("act", &[]));
    let hf = md.hf_specific_contract_md(None).unwrap();

    let m = &hf.methods[0];
    assert_eq!(m.md.offset, m.syscall_offset - 2);

    let script = &hf.nef.script;
    // PUSHINT8 0x00
    assert_eq!(&script[m.md.offset..m.md.offset + 2], &[0x00, 0x00]);
    // SYSCALL System.Contract.CallNative
    let id = names::to_id(names::SYSTEM_CONTRACT_CALL_NATIVE);
    let mut syscall = vec![0x41];
    syscall.extend_from_slice(&id.to_le_bytes());
    assert_eq!(
        &script[m.syscall_offset..m.syscall_offset + 5],
        &syscall[..]
    );
    // RET
    assert_eq!(script[m.syscall_offset + 5], 0x40);
}

#[test]
fn test_hardfork_filtering() {
    let mut md = ContractMD::new("Forked", -102, None);
    md.add_method(method("m1", &[]));
    md.add_method(method("m2", &[]).active_from(Hardfork::Aspidochelone));
    md.add_method(method("m3", &[]).active_from(Hardfork::Basilisk));

    let base = md.hf_specific_contract_md(None).unwrap();
    assert_eq!(base.methods.len(), 1);
    assert_eq!(base.nef.script.len(), 8);

    let at_a = md
        .hf_specific_contract_md(Some(Hardfork::Aspidochelone))
        .unwrap();
    assert_eq!(at_a.methods.len(), 2);
    assert_eq!(at_a.nef.script.len(), 16);

    let at_b = md
        .hf_specific_contract_md(Some(Hardfork::Basilisk))
        .unwrap();
    assert_eq!(at_b.methods.len(), 3);
    assert_eq!(at_b.nef.script.len(), 24);

    // Later hardforks only ever add members.
    for early in base.methods.iter() {
        assert!(at_a
            .methods
            .iter()
            .any(|m| m.md.name == early.md.name));
    }
    for early in at_a.methods.iter() {
        assert!(at_b
            .methods
            .iter()
            .any(|m| m.md.name == early.md.name));
    }

    // The contract reacts to both activation hardforks, which are kept
    // out of the always-active view.
    assert!(md.active_hfs.contains(&Hardfork::Aspidochelone));
    assert!(md.active_hfs.contains(&Hardfork::Basilisk));
    assert_eq!(md.active_hfs.len(), 2);
}

#[test]
fn test_event_filtering_preserves_declaration_order() {
    let mut md = ContractMD::new("Eventful", -103, None);
    md.add_event(Event {
        md: ContractEvent::new("Transfer", vec![]),
        active_from: None,
    });
    md.add_event(Event {
        md: ContractEvent::new("Burn", vec![]),
        active_from: Some(Hardfork::Cockatrice),
    });
    md.add_event(Event {
        md: ContractEvent::new("Mint", vec![]),
        active_from: None,
    });

    let base = md.hf_specific_contract_md(None).unwrap();
    let names: Vec<_> = base.events.iter().map(|e| e.md.name.as_str()).collect();
    assert_eq!(names, ["Transfer", "Mint"]);

    let forked = md
        .hf_specific_contract_md(Some(Hardfork::Cockatrice))
        .unwrap();
    let names: Vec<_> = forked.events.iter().map(|e| e.md.name.as_str()).collect();
    assert_eq!(names, ["Transfer", "Burn", "Mint"]);
    assert_eq!(forked.manifest.abi.events.len(), 3);
}

#[test]
fn test_method_ordering_and_overload_resolution() {
    let mut md = ContractMD::new("Overloaded", -104, None);
    md.add_method(method("copy", &["a", "b"]));
    md.add_method(method("copy", &["a", "b", "c"]));
    md.add_method(method("copy", &["a"]));

    let arities: Vec<_> = md.methods.iter().map(|m| m.md.parameters.len()).collect();
    assert_eq!(arities, [3, 2, 1]);

    let hf = md.hf_specific_contract_md(None).unwrap();
    assert_eq!(hf.get_method("copy", 2).unwrap().md.parameters.len(), 2);
    assert_eq!(hf.get_method("copy", -1).unwrap().md.parameters.len(), 3);
    assert!(hf.get_method("copy", 4).is_none());
    assert!(hf.get_method("paste", -1).is_none());
}

#[test]
fn test_ordering_mixed_names() {
    let mut md = ContractMD::new("Sorted", -105, None);
    md.add_method(method("zeta", &[]));
    md.add_method(method("alpha", &["x"]));
    md.add_method(method("alpha", &[]));
    md.add_method(method("mid", &[]));

    let order: Vec<_> = md
        .methods
        .iter()
        .map(|m| (m.md.name.clone(), m.md.parameters.len()))
        .collect();
    assert_eq!(
        order,
        [
            ("alpha".to_string(), 1),
            ("alpha".to_string(), 0),
            ("mid".to_string(), 0),
            ("zeta".to_string(), 0),
        ]
    );
}

#[test]
fn test_safe_flag_derived_from_required_flags() {
    let mut md = ContractMD::new("Safety", -106, None);
    md.add_method(MethodAndPrice::new(
        noop,
        ContractMethod::new("reader", vec![], ContractParameterType::Void),
        1,
        CallFlags::READ_ONLY,
    ));
    md.add_method(MethodAndPrice::new(
        noop,
        ContractMethod::new("writer", vec![], ContractParameterType::Void),
        1,
        CallFlags::STATES,
    ));

    let hf = md.hf_specific_contract_md(None).unwrap();
    assert!(hf.get_method("reader", 0).unwrap().md.safe);
    assert!(!hf.get_method("writer", 0).unwrap().md.safe);
}

#[test]
fn test_materialisation_is_deterministic() {
    let build = || {
        let mut md = ContractMD::new("Deterministic", -107, None);
        md.add_method(method("first", &[]));
        md.add_method(method("second", &["x", "y"]));
        md.hf_specific_contract_md(Some(Hardfork::Echidna)).unwrap()
    };
    let a = build();
    let b = build();

    assert_eq!(a.nef.to_bytes().unwrap(), b.nef.to_bytes().unwrap());
    assert_eq!(a.nef.checksum, a.nef.calculate_checksum().unwrap());
    for (x, y) in a.methods.iter().zip(b.methods.iter()) {
        assert_eq!(x.syscall_offset, y.syscall_offset);
        assert_eq!(x.md.offset, y.md.offset);
    }
}

#[test]
fn test_syscall_offsets_are_unique() {
    let mut md = ContractMD::new("Unique", -108, None);
    for name in ["a", "b", "c", "d", "e"] {
        md.add_method(method(name, &[]));
    }
    let hf = md.hf_specific_contract_md(None).unwrap();
    let mut offsets: Vec<_> = hf.methods.iter().map(|m| m.syscall_offset).collect();
    offsets.sort_unstable();
    offsets.dedup();
    assert_eq!(offsets.len(), hf.methods.len());
}

#[test]
fn test_declaration_not_mutated_by_materialisation() {
    let mut md = ContractMD::new("Pristine", -109, None);
    md.add_method(method("one", &[]));
    md.add_method(method("two", &[]));

    let _ = md.hf_specific_contract_md(None).unwrap();
    for m in &md.methods {
        assert_eq!(m.md.offset, 0);
    }
}

#[test]
fn test_manifest_finalizer_runs_once_per_key() {
    let calls = Arc::new(AtomicUsize::new(0));
    let captured = Arc::clone(&calls);
    let mut md = ContractMD::new(
        "Finalized",
        -110,
        Some(Box::new(move |manifest| {
            captured.fetch_add(1, Ordering::SeqCst);
            manifest.supported_standards.push("NEP-17".to_string());
        })),
    );
    md.add_method(method("touch", &[]));

    let first = md.hf_specific_contract_md(None).unwrap();
    assert!(first.manifest.supports_standard("NEP-17"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Cache hit: the finalizer must not run again.
    let again = md.hf_specific_contract_md(None).unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // A different key builds (and finalizes) a fresh manifest.
    let _ = md
        .hf_specific_contract_md(Some(Hardfork::Domovoi))
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_zero_key_distinct_from_first_hardfork() {
    let mut md = ContractMD::new("Keyed", -111, None);
    md.add_method(method("base", &[]));
    md.add_method(method("forked", &[]).active_from(Hardfork::Aspidochelone));

    let none = md.hf_specific_contract_md(None).unwrap();
    let first = md
        .hf_specific_contract_md(Some(Hardfork::Aspidochelone))
        .unwrap();
    assert_eq!(none.methods.len(), 1);
    assert_eq!(first.methods.len(), 2);
}

#[test]
fn test_concurrent_materialisation_yields_identical_views() {
    let mut md = ContractMD::new("Raced", -112, None);
    for name in ["alpha", "beta", "gamma"] {
        md.add_method(method(name, &[]));
    }
    let md = Arc::new(md);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let md = Arc::clone(&md);
            std::thread::spawn(move || {
                md.hf_specific_contract_md(Some(Hardfork::Basilisk))
                    .unwrap()
            })
        })
        .collect();

    let views: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let reference = views[0].nef.to_bytes().unwrap();
    for view in &views {
        assert_eq!(view.nef.to_bytes().unwrap(), reference);
        // All racers end up observing the single cached instance.
        assert!(Arc::ptr_eq(view, &views[0]));
    }
}

#[test]
fn test_contract_identity() {
    let md = ContractMD::new("Testify", -113, None);
    assert_eq!(md.hash, create_native_contract_hash("Testify"));
    assert_eq!(
        md.hash.to_string(),
        "0xa86c041f79bd5704bc955de1ac792001df10c1ec"
    );

    let hf = md.hf_specific_contract_md(None).unwrap();
    assert_eq!(hf.id, -113);
    assert_eq!(hf.hash, md.hash);
    assert_eq!(hf.nef.compiler, "neo-core-v3.0");
    assert!(hf.nef.tokens.is_empty());
    assert_eq!(hf.manifest.name, "Testify");
}
