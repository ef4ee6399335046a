#![cfg(test)]
use std::collections::BTreeSet;

use mmcollect_common::config::default_uplink_vlans;
use mmcollect_common::network::Outcome;
use mmcollect_core::classifier;
use mmcollect_core::diagnosis::DiagnosisService;
use mmcollect_core::dispatcher::{DispatchPolicy, USER_DELETE_ACTION};
use mmcollect_core::parser::{self, FlowMarker};
use mmcollect_core::registry;

use crate::util::{INTERFACES, ScriptedRemote, device, table};

fn user_delete_service() -> DiagnosisService {
    DiagnosisService::new(default_uplink_vlans(), FlowMarker::next_hop(), DispatchPolicy::user_delete())
}

fn deleted(remote: &ScriptedRemote) -> Vec<String> {
    remote
        .calls()
        .into_iter()
        .filter_map(|call| call.payload.get("ipaddr").cloned())
        .collect()
}

/*************************************************************
                   Registry from interfaces
**************************************************************/

#[test]
fn uplink_addresses_are_owned_but_not_local() {
    let registry = registry::build_registry(INTERFACES, &default_uplink_vlans());

    assert!(registry.owns("192.168.0.2"));
    assert!(!registry.local_prefixes().contains("192.168.0."));
    assert_eq!(
        registry.local_prefixes(),
        &BTreeSet::from(["10.1.1.".to_string(), "172.16.5.".to_string()])
    );
}

#[test]
fn prefix_keeps_the_trailing_dot() {
    let registry = registry::build_registry(&["vlan 10 10.20.30.40 / 255.255.255.0"], &default_uplink_vlans());

    assert_eq!(registry.local_prefixes(), &BTreeSet::from(["10.20.30.".to_string()]));
}

/*************************************************************
                     Full diagnosis rounds
**************************************************************/

#[tokio::test]
async fn local_flow_between_clients_drops_both_users() {
    let sessions = table(&["10.1.1.50 10.1.1.60 6 51234 443 0/0 0 0 1 tunnel 12 nh 0x1b3"]);
    let remote = ScriptedRemote::new();

    let report = user_delete_service()
        .run(&table(INTERFACES), &sessions, &remote, &device("10.0.0.7"))
        .await;

    assert_eq!(deleted(&remote), vec!["10.1.1.50", "10.1.1.60"]);
    assert_eq!(
        report.lines(),
        vec![
            "10.1.1.50 10.1.1.60 6 51234 443 0/0 0 0 1 tunnel 12 nh 0x1b3".to_string(),
            format!("SENT {USER_DELETE_ACTION} FOR 10.1.1.50: {{\"_global_result\":{{\"status\":\"0\",\"status_str\":\"success\"}}}}"),
            format!("SENT {USER_DELETE_ACTION} FOR 10.1.1.60: {{\"_global_result\":{{\"status\":\"0\",\"status_str\":\"success\"}}}}"),
        ]
    );
    assert!(!report.halt);
}

#[tokio::test]
async fn controller_address_is_never_remediated() {
    let sessions = table(&["10.1.1.1 10.1.1.50 17 67 68 0/0 nh 0x2"]);
    let remote = ScriptedRemote::new();

    let report = user_delete_service()
        .run(&table(INTERFACES), &sessions, &remote, &device("10.0.0.7"))
        .await;

    assert_eq!(deleted(&remote), vec!["10.1.1.50"]);
    assert_eq!(report.matched_lines.len(), 1);
}

#[tokio::test]
async fn flow_leaving_the_local_subnets_is_not_reported() {
    let sessions = table(&[
        "10.1.1.50 10.1.2.200 6 40000 22 0/0 nh 0x3",
        "192.168.0.50 192.168.0.60 6 40000 22 0/0 nh 0x4",
    ]);
    let remote = ScriptedRemote::new();

    let report = user_delete_service()
        .run(&table(INTERFACES), &sessions, &remote, &device("10.0.0.7"))
        .await;

    assert!(remote.calls().is_empty());
    assert!(report.lines().is_empty());
    assert_eq!(report.reviewed, 2);
}

#[tokio::test]
async fn addresses_in_many_flows_are_remediated_once_in_order() {
    let sessions = table(&[
        "10.1.1.70 10.1.1.50 6 1 2 0/0 nh 0x5",
        "10.1.1.50 172.16.5.9 6 3 4 0/0 nh 0x6",
        "10.1.1.50 10.1.1.70 6 5 6 0/0 nh 0x7",
        "10.1.1.50 10.1.1.70 6 5 6 0/0 local",
    ]);
    let remote = ScriptedRemote::new();

    let report = user_delete_service()
        .run(&table(INTERFACES), &sessions, &remote, &device("10.0.0.7"))
        .await;

    assert_eq!(deleted(&remote), vec!["10.1.1.50", "10.1.1.70", "172.16.5.9"]);
    assert_eq!(report.matched_lines.len(), 3);
    assert_eq!(report.reviewed, 3);
}

#[tokio::test]
async fn a_rejected_command_does_not_stop_the_others() {
    let sessions = table(&[
        "10.1.1.50 10.1.1.60 6 1 2 0/0 nh 0x1",
        "10.1.1.70 10.1.1.80 6 1 2 0/0 nh 0x2",
    ]);
    let remote = ScriptedRemote::rejecting(&["10.1.1.60"]);

    let report = user_delete_service()
        .run(&table(INTERFACES), &sessions, &remote, &device("10.0.0.7"))
        .await;

    assert_eq!(remote.calls().len(), 4);
    let outcomes: Vec<(&str, bool)> = report
        .results
        .iter()
        .map(|r| (r.address.as_str(), r.outcome.is_success()))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("10.1.1.50", true),
            ("10.1.1.60", false),
            ("10.1.1.70", true),
            ("10.1.1.80", true),
        ]
    );
    assert_eq!(
        report.results[1].outcome,
        Outcome::Failure("controller rejected the command: no entry for 10.1.1.60".to_string())
    );
    assert_eq!(report.failures(), 1);
}

#[tokio::test]
async fn empty_tables_make_an_empty_report() {
    let remote = ScriptedRemote::new();

    let report = user_delete_service()
        .run(&table(&[]), &table(&[]), &remote, &device("10.0.0.7"))
        .await;

    assert!(report.lines().is_empty());
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn unparsable_candidates_are_reported_apart() {
    let service = DiagnosisService::new(default_uplink_vlans(), FlowMarker::Any, DispatchPolicy::ReportOnly);
    let sessions = table(&["10.1.1.50", "10.1.1.50 10.1.1.60 6 1 2"]);

    let report = service
        .run(&table(INTERFACES), &sessions, &ScriptedRemote::new(), &device("10.0.0.7"))
        .await;

    assert_eq!(report.parse_errors.len(), 1);
    assert_eq!(report.parse_errors[0].line_number, 1);
    assert_eq!(report.lines(), vec!["10.1.1.50 10.1.1.60 6 1 2".to_string()]);
}

#[test]
fn classifying_twice_gives_the_same_answer() {
    let registry = registry::build_registry(INTERFACES, &default_uplink_vlans());
    let parsed = parser::parse_flows(
        &[
            "10.1.1.50 10.1.1.60 6 1 2 0/0 nh 0x1",
            "10.1.1.1 10.1.1.50 6 1 2 0/0 nh 0x2",
            "10.1.1.50 10.1.2.200 6 1 2 0/0 nh 0x3",
        ],
        &FlowMarker::next_hop(),
    );

    let first = classifier::classify_all(&parsed.flows, &registry);
    let second = classifier::classify_all(&parsed.flows, &registry);

    assert_eq!(first, second);
}
