//! Integration tests for geckoboard-push
//!
//! These tests start a local push service stand-in and push through the real
//! HTTP transport.

use std::sync::Arc;

use geckoboard_push::testing::TestServer;
use geckoboard_push::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("geckoboard_push=debug")
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Envelope handling
// =============================================================================

#[test]
fn test_push_success_over_http() {
    init_tracing();
    let server = TestServer::start().unwrap();
    let client = server.client("widget-1", "secret").unwrap();

    client.geckometer(5.0, 0.0, 10.0).unwrap();

    let received = server.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].api_version, "v1");
    assert_eq!(received[0].widget_key, "widget-1");
    assert_eq!(
        received[0].body,
        json!({
            "api_key": "secret",
            "data": { "item": 5, "min": { "value": 0 }, "max": { "value": 10 } }
        })
    );
    // whole numbers reach the wire without a fractional part
    assert_eq!(received[0].body["data"]["item"].to_string(), "5");
}

#[test]
fn test_push_rejected_over_http() {
    init_tracing();
    let server = TestServer::with_response(r#"{"success": false, "error": "boom"}"#).unwrap();
    let client = server.client("widget-1", "secret").unwrap();

    let err = client.rag([1.0, 2.0, 3.0], ["r", "a", "g"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "boom");
    assert_eq!(server.received().len(), 1);
}

#[test]
fn test_non_json_response() {
    let server = TestServer::with_response("Service Unavailable").unwrap();
    let client = server.client("widget-1", "secret").unwrap();

    let err = client.pie(vec![PieItem::new(1.0)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);
}

#[test]
fn test_empty_api_key_sends_nothing() {
    let server = TestServer::start().unwrap();
    let client = server.client("widget-1", "").unwrap();

    let err = client.text(vec![TextItem::plain("hello")]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.to_string(), "Configuration error: Api key not configured.");
    assert!(server.received().is_empty());
}

#[test]
fn test_connection_refused_is_transport_error() {
    // Reserve a port, then release it so nothing is listening
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = Configuration::builder("secret")
        .base_url(format!("http://127.0.0.1:{}", port))
        .build();
    let client = PushClient::with_config("widget-1", Arc::new(config)).unwrap();

    let err = client.geckometer(1.0, 0.0, 2.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(err, PushError::Transport(_)));
}

// =============================================================================
// Widget payloads on the wire
// =============================================================================

#[test]
fn test_widget_key_encoded_as_single_segment() {
    let server = TestServer::start().unwrap();
    let client = server.client("team/ops", "secret").unwrap();

    client.geckometer(1.0, 0.0, 2.0).unwrap();
    assert_eq!(server.received()[0].widget_key, "team/ops");
}

#[test]
fn test_custom_api_version() {
    let server = TestServer::start().unwrap();
    let config = Configuration::builder("secret")
        .base_url(server.base_url())
        .api_version("v2")
        .build();
    let client = PushClient::with_config("w", Arc::new(config)).unwrap();

    client.geckometer(1.0, 0.0, 2.0).unwrap();
    assert_eq!(server.received()[0].api_version, "v2");
}

#[test]
fn test_funnel_without_flags_on_wire() {
    let server = TestServer::start().unwrap();
    let client = server.client("funnel", "secret").unwrap();

    client
        .funnel(
            vec![FunnelItem::new(100.0, "Visits"), FunnelItem::new(25.0, "Trials")],
            false,
            false,
        )
        .unwrap();

    let data = &server.received()[0].body["data"];
    let object = data.as_object().unwrap();
    assert!(!object.contains_key("type"));
    assert!(!object.contains_key("percentage"));
    assert_eq!(
        data,
        &json!({
            "item": [
                { "value": 100, "label": "Visits" },
                { "value": 25, "label": "Trials" }
            ]
        })
    );
}

#[test]
fn test_stacked_bar_chart_sent_as_text() {
    let server = TestServer::start().unwrap();
    let client = server.client("bars", "secret").unwrap();

    client
        .highcharts_stacked_bar(&HighchartsStackedBar {
            title: "Open 'P1' tickets".to_string(),
            categories: vec!["Mon".to_string(), "Tue".to_string()],
            series: vec![
                ChartSeries::new("Alice", vec![json!(1), json!(3)]),
                ChartSeries::new("Bob", vec![json!(2), json!(0)]),
            ],
            colors: None,
        })
        .unwrap();

    let data = &server.received()[0].body["data"];
    let chart = data.as_str().unwrap();
    assert!(chart.contains(r"text: 'Open \'P1\' tickets'"));
    assert!(chart.contains(r#"categories: ["Mon","Tue"]"#));
    assert!(chart.contains("#a6c96a"));
}

#[test]
fn test_two_pie_and_custom_charts() {
    let server = TestServer::start().unwrap();
    let client = server.client("charts", "secret").unwrap();

    client
        .highcharts_two_pie(&HighchartsTwoPie {
            title: "Alerts".to_string(),
            series: [
                ChartSeries::new("By severity", vec![json!(["High", 4]), json!(["Low", 1])]),
                ChartSeries::new("By team", vec![json!(["Ops", 3]), json!(["Dev", 2])]),
            ],
        })
        .unwrap();
    client
        .highcharts_custom(json!({ "chart": { "type": "area" } }))
        .unwrap();

    let received = server.received();
    assert_eq!(received.len(), 2);
    assert!(received[0].body["data"]
        .as_str()
        .unwrap()
        .contains("innerSize: '70%'"));
    assert_eq!(
        received[1].body["data"],
        json!(r#"{"chart":{"type":"area"}}"#)
    );
}

#[test]
fn test_push_update_from_yaml() {
    let server = TestServer::start().unwrap();
    let client = server.client("list", "secret").unwrap();

    let update: WidgetUpdate = serde_yaml::from_str(
        r#"
type: text_list
items:
  - text: "Build broken"
    type: alert
  - text: "Release notes published"
    type: info
  - text: "Nothing to see"
"#,
    )
    .unwrap();
    client.push_update(&update).unwrap();

    assert_eq!(
        server.received()[0].body["data"],
        json!({
            "item": [
                { "text": "Build broken", "type": 1 },
                { "text": "Release notes published", "type": 2 },
                { "text": "Nothing to see", "type": 0 }
            ]
        })
    );
}

#[test]
fn test_config_from_yaml_file() {
    let server = TestServer::start().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("push.yaml");
    std::fs::write(
        &path,
        format!("api_key: \"from-file\"\nbase_url: \"{}\"\n", server.base_url()),
    )
    .unwrap();

    let config = Configuration::from_yaml_file(&path).unwrap();
    let client = PushClient::with_config("w", Arc::new(config)).unwrap();
    client.geckometer(1.0, 0.0, 2.0).unwrap();

    assert_eq!(server.received()[0].body["api_key"], json!("from-file"));
}

#[test]
fn test_concurrent_clients() {
    let server = TestServer::start().unwrap();
    let config = Arc::new(server.config("secret"));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = PushClient::with_config(format!("w{}", i), Arc::clone(&config)).unwrap();
            std::thread::spawn(move || client.geckometer(i as f64, 0.0, 10.0))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let mut keys: Vec<String> = server
        .received()
        .into_iter()
        .map(|push| push.widget_key)
        .collect();
    keys.sort();
    assert_eq!(keys, vec!["w0", "w1", "w2", "w3"]);
}
