// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn constrained() -> HostRequirementsRecord {
    HostRequirementsRecord { run_on_all_worker_nodes: false, ..HostRequirementsRecord::default() }
}

#[test]
fn run_on_all_workers_has_no_requirements() {
    let record = HostRequirementsRecord {
        cpus: Bounds { min: Some(4.0), max: None },
        ..HostRequirementsRecord::default()
    };
    assert_eq!(HostRequirements::from_record(&record), None);
}

#[test]
fn unconstrained_record_has_no_requirements() {
    assert_eq!(HostRequirements::from_record(&constrained()), None);
}

#[test]
fn amounts_and_attributes_are_translated() {
    let record = HostRequirementsRecord {
        operating_system: Some("Linux".into()),
        cpu_architecture: Some(" ".into()),
        cpus: Bounds { min: Some(8.0), max: Some(32.0) },
        memory_mib: Bounds { min: Some(16384.0), max: None },
        ..constrained()
    };
    let reqs = HostRequirements::from_record(&record).unwrap();

    assert_eq!(
        reqs.amounts,
        vec![
            AmountRequirement { name: AMOUNT_VCPU.into(), min: Some(8.0), max: Some(32.0) },
            AmountRequirement { name: AMOUNT_MEMORY.into(), min: Some(16384.0), max: None },
        ]
    );
    assert_eq!(
        reqs.attributes,
        vec![AttributeRequirement {
            name: ATTR_OS_FAMILY.into(),
            any_of: vec!["linux".into()],
            all_of: vec![],
        }]
    );
}

#[test]
fn serializes_template_keys() {
    let reqs = HostRequirements {
        amounts: vec![],
        attributes: vec![AttributeRequirement {
            name: ATTR_CPU_ARCH.into(),
            any_of: vec!["x86_64".into()],
            all_of: vec![],
        }],
    };
    let json = serde_json::to_value(&reqs).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "attributes": [{ "name": "attr.worker.cpu.arch", "anyOf": ["x86_64"] }] })
    );
}
