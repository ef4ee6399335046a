#![cfg(test)]
use std::time::Duration;

use httpmock::prelude::*;
use mmcollect_common::config::{Config, ControllerConfig};
use mmcollect_plugins::{Script, WrongNextHop};
use mmcollect_protocols::Controller;
use serde_json::json;

use crate::util::{INTERFACES, device};

fn config() -> ControllerConfig {
    ControllerConfig {
        username: "admin".to_string(),
        password: "secret".to_string(),
        timeout: Duration::from_secs(5),
        verify_tls: false,
    }
}

/// A whole round against a mocked controller: login, both show commands,
/// user deletes, logout.
#[tokio::test]
async fn wrong_nexthop_round_over_rest() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;

    let login = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/api/login");
            then.status(200)
                .json_body(json!({ "_global_result": { "status": "0", "UIDARUBA": "tok" } }));
        })
        .await;
    let show_interfaces = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/configuration/showcommand")
                .query_param("command", "show ip interface brief");
            then.status(200).json_body(json!({ "_data": INTERFACES }));
        })
        .await;
    let show_sessions = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/configuration/showcommand")
                .query_param("command", "show datapath session table");
            then.status(200).json_body(json!({ "_data": [
                "10.1.1.50 10.1.1.60 6 51234 443 0/0 0 0 1 tunnel 12 nh 0x1b3",
                "10.1.1.50 8.8.8.8 17 5353 53 0/0 0 0 1 tunnel 12 nh 0x1b4",
            ] }));
        })
        .await;
    let user_delete = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/configuration/object/aaa_user_delete")
                .query_param("config_path", "/md");
            then.status(200)
                .json_body(json!({ "_global_result": { "status": "0", "status_str": "Success" } }));
        })
        .await;
    let logout = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/api/logout").query_param("UIDARUBA", "tok");
            then.status(200).json_body(json!({}));
        })
        .await;

    let controller = Controller::with_base_url("10.0.0.7", &server.url("/v1"), &config())?;
    let session = controller.session().await?;

    let mut outputs = Vec::new();
    for command in WrongNextHop.commands() {
        outputs.push(session.show(command).await?);
    }
    let (interfaces, sessions) = WrongNextHop.tables(outputs)?;
    let report = WrongNextHop
        .service(&Config::default())
        .run(&interfaces, &sessions, &session, &device("10.0.0.7"))
        .await;
    session.close().await?;

    login.assert_async().await;
    show_interfaces.assert_async().await;
    show_sessions.assert_async().await;
    user_delete.assert_calls_async(2).await;
    logout.assert_async().await;

    assert_eq!(report.matched_lines.len(), 1);
    assert_eq!(report.failures(), 0);
    assert!(report.lines()[1].starts_with("SENT object/aaa_user_delete FOR 10.1.1.50"));
    Ok(())
}
