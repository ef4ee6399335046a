#![cfg(test)]
use mmcollect_common::config::Config;
use mmcollect_common::ingest::Table;
use mmcollect_common::network::DeviceContext;
use mmcollect_core::dispatcher::TAR_LOGS_ACTION;
use mmcollect_plugins::{Script, ScriptKind, UplinkRedirect, WrongNextHop};
use serde_json::json;

use crate::util::{INTERFACES, ScriptedRemote, device, table};

#[tokio::test]
async fn uplink_redirect_collects_logs_once_and_halts() -> anyhow::Result<()> {
    let outputs = vec![
        json!({ "_data": INTERFACES }),
        json!({ "_data": [
            "10.1.1.50 10.1.1.60 6 1 2 0/0 0 0 1 3",
            "10.1.1.51 10.1.1.61 6 1 2 0/0 0 0 1 3",
            "10.1.1.52 8.8.8.8 17 1 53 0/0 0 0 1 3",
        ] }),
    ];
    let (interfaces, sessions) = UplinkRedirect.tables(outputs)?;
    let remote = ScriptedRemote::new();

    let report = UplinkRedirect
        .service(&Config::default())
        .run(&interfaces, &sessions, &remote, &device("10.0.0.7"))
        .await;

    let calls = remote.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].config_path, "/mm");
    assert_eq!(calls[0].action, TAR_LOGS_ACTION);
    assert_eq!(calls[0].payload.get("tech-support").map(String::as_str), Some("true"));

    assert!(report.halt);
    assert_eq!(report.matched_lines.len(), 2);
    assert_eq!(report.reviewed, 3);
    assert!(report.lines()[2].starts_with(&format!("SENT {TAR_LOGS_ACTION} FOR 10.0.0.7: ")));
    Ok(())
}

#[tokio::test]
async fn uplink_redirect_stays_quiet_without_local_traffic() -> anyhow::Result<()> {
    let outputs = vec![
        json!(INTERFACES),
        json!(["10.1.1.52 8.8.8.8 17 1 53 0/0 0 0 1 3"]),
    ];
    let (interfaces, sessions) = UplinkRedirect.tables(outputs)?;
    let remote = ScriptedRemote::new();

    let report = UplinkRedirect
        .service(&Config::default())
        .run(&interfaces, &sessions, &remote, &device("10.0.0.7"))
        .await;

    assert!(remote.calls().is_empty());
    assert!(!report.halt);
    assert!(report.lines().is_empty());
    Ok(())
}

#[tokio::test]
async fn dry_run_reports_without_sending() -> anyhow::Result<()> {
    let outputs = vec![
        json!({ "_data": INTERFACES }),
        json!({ "_data": ["10.1.1.50 10.1.1.60 6 1 2 0/0 nh 0x1"] }),
    ];
    let (interfaces, sessions) = WrongNextHop.tables(outputs)?;
    let remote = ScriptedRemote::new();
    let cfg = Config {
        dry_run: true,
        ..Default::default()
    };

    let report = WrongNextHop
        .service(&cfg)
        .run(&interfaces, &sessions, &remote, &device("10.0.0.7"))
        .await;

    assert!(remote.calls().is_empty());
    assert_eq!(report.lines(), vec!["10.1.1.50 10.1.1.60 6 1 2 0/0 nh 0x1".to_string()]);
    Ok(())
}

#[tokio::test]
async fn null_outputs_are_empty_tables() -> anyhow::Result<()> {
    let (interfaces, sessions) = WrongNextHop.tables(vec![json!(null), json!({ "_data": null })])?;

    let report = WrongNextHop
        .service(&Config::default())
        .run(&interfaces, &sessions, &ScriptedRemote::new(), &device("10.0.0.7"))
        .await;

    assert_eq!(report.reviewed, 0);
    Ok(())
}

#[test]
fn offline_dump_feeds_both_stages() {
    let dump = format!(
        "{}\n10.1.1.50 10.1.1.60 6 1 2 0/0 nh 0x1\n10.1.1.50 10.2.0.1 6 1 2 0/0 nh 0x2\n",
        INTERFACES.join("\n")
    );
    let table = Table::from_text(&dump);
    let service = ScriptKind::WrongNextHop.script().service(&Config {
        dry_run: true,
        ..Default::default()
    });

    let examination = service.examine(&table, &table);

    assert_eq!(examination.collected.matched_lines.len(), 1);
    assert_eq!(examination.collected.reviewed, 2);
    assert!(examination.registry.owns("10.1.1.1"));
    assert_eq!(DeviceContext::offline("dump").address, "dump");
}
