//! End-to-end tests of the stdio server loop with in-memory streams.

use std::io::Cursor;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use deepl_mcp::{DeeplClient, DeeplConfig, Dispatcher, McpServer, StdioTransport};

async fn serve(endpoint: &str, input: &[Value]) -> Vec<Value> {
    let mut raw = String::new();
    for message in input {
        raw.push_str(&message.to_string());
        raw.push('\n');
    }
    serve_raw(endpoint, raw).await
}

async fn serve_raw(endpoint: &str, raw: String) -> Vec<Value> {
    serve_bytes(endpoint, raw.into_bytes()).await
}

async fn serve_bytes(endpoint: &str, raw: Vec<u8>) -> Vec<Value> {
    let config = DeeplConfig::new("test-key").with_endpoint(endpoint);
    let dispatcher = Dispatcher::new(DeeplClient::new(config).expect("client"));
    let transport = StdioTransport::new(Cursor::new(raw), Vec::new());

    let mut server = McpServer::new(transport, dispatcher);
    server.run().await.expect("run");

    let output = String::from_utf8(server.into_transport().into_writer()).expect("utf8");
    output
        .lines()
        .map(|line| serde_json::from_str(line).expect("response json"))
        .collect()
}

#[tokio::test]
async fn initialize_and_list_tools() {
    let responses = serve(
        "http://127.0.0.1:1",
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test", "version": "0"}
            }}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": "p", "method": "ping"}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 3, "notification must not be answered");

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "deepl-mcp-server");
    assert!(responses[0]["result"]["capabilities"]["tools"].is_object());

    let tools = responses[1]["result"]["tools"].as_array().expect("tools");
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0]["name"], "translate_text");
    assert_eq!(tools[0]["inputSchema"]["type"], "object");
    assert_eq!(tools[1]["name"], "list_languages");

    assert_eq!(responses[2]["id"], "p");
    assert_eq!(responses[2]["result"], json!({}));
}

#[tokio::test]
async fn tools_call_round_trip() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translations": [
                {"detected_source_language": "EN", "text": "Hallo"},
                {"detected_source_language": "EN", "text": "Welt"}
            ]
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let responses = serve(
        &upstream.uri(),
        &[json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": {
            "name": "translate_text",
            "arguments": {"text": ["Hello", "World"], "target_lang": "DE"}
        }})],
    )
    .await;

    let result = &responses[0]["result"];
    assert!(result.get("isError").is_none());
    let block = &result["content"][0];
    assert_eq!(block["type"], "text");
    assert_eq!(block["mimeType"], "application/json");

    let parsed: Vec<Value> = serde_json::from_str(block["text"].as_str().unwrap()).unwrap();
    let texts: Vec<&str> = parsed.iter().map(|t| t["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["Hallo", "Welt"]);
}

#[tokio::test]
async fn tool_failures_stay_inside_the_result() {
    let responses = serve(
        "http://127.0.0.1:1",
        &[json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {
            "name": "nope", "arguments": {}
        }})],
    )
    .await;

    assert!(responses[0].get("error").is_none());
    assert_eq!(responses[0]["result"]["isError"], true);
    assert_eq!(responses[0]["result"]["errorCode"], -32601);
}

#[tokio::test]
async fn protocol_errors() {
    let raw = [
        "not json".to_string(),
        String::new(),
        json!({"jsonrpc": "2.0", "id": 4, "method": "resources/list"}).to_string(),
        json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call"}).to_string(),
        json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {"arguments": {}}})
            .to_string(),
    ]
    .join("\n");

    let responses = serve_raw("http://127.0.0.1:1", raw).await;
    assert_eq!(responses.len(), 4, "blank line is skipped");

    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[0]["error"]["code"], -32700);

    assert_eq!(responses[1]["id"], 4);
    assert_eq!(responses[1]["error"]["code"], -32601);

    assert_eq!(responses[2]["error"]["code"], -32602);
    assert_eq!(responses[3]["error"]["code"], -32602);
}

#[tokio::test]
async fn invalid_utf8_line_is_answered_and_serving_continues() {
    let mut raw = Vec::new();
    raw.extend_from_slice(json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}).to_string().as_bytes());
    raw.push(b'\n');
    raw.extend_from_slice(b"\xff\xfe garbage\n");
    raw.extend_from_slice(json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}).to_string().as_bytes());
    raw.push(b'\n');

    let responses = serve_bytes("http://127.0.0.1:1", raw).await;
    assert_eq!(responses.len(), 3);

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"], json!({}));

    assert_eq!(responses[1]["id"], Value::Null);
    assert_eq!(responses[1]["error"]["code"], -32700);

    assert_eq!(responses[2]["id"], 2);
    assert_eq!(responses[2]["result"], json!({}));
}

#[tokio::test]
async fn malformed_requests_are_invalid_request() {
    let raw = [
        json!({"jsonrpc": "2.0", "id": 9}).to_string(),
        json!({"jsonrpc": "1.0", "id": 10, "method": "ping"}).to_string(),
        json!([1, 2]).to_string(),
        json!({"jsonrpc": "2.0", "id": 11, "method": 42}).to_string(),
        json!({"jsonrpc": "1.0", "method": "notifications/initialized"}).to_string(),
        json!({"jsonrpc": "2.0", "id": 12, "method": "ping"}).to_string(),
    ]
    .join("\n");

    let responses = serve_raw("http://127.0.0.1:1", raw).await;
    assert_eq!(responses.len(), 5, "notifications are never answered");

    assert_eq!(responses[0]["id"], 9);
    assert_eq!(responses[0]["error"]["code"], -32600);

    assert_eq!(responses[1]["id"], 10);
    assert_eq!(responses[1]["error"]["code"], -32600);

    assert_eq!(responses[2]["id"], Value::Null);
    assert_eq!(responses[2]["error"]["code"], -32600);

    assert_eq!(responses[3]["id"], 11);
    assert_eq!(responses[3]["error"]["code"], -32600);

    assert_eq!(responses[4]["id"], 12);
    assert_eq!(responses[4]["result"], json!({}));
}

#[tokio::test]
async fn shutdown_signal_stops_the_loop() {
    let config = DeeplConfig::new("test-key").with_endpoint("http://127.0.0.1:1");
    let dispatcher = Dispatcher::new(DeeplClient::new(config).expect("client"));
    // Reader never yields, so only the shutdown future can end the loop
    let (reader, _keep_open) = tokio::io::duplex(64);
    let mut server = McpServer::new(StdioTransport::new(reader, Vec::new()), dispatcher);

    server.run_until(async {}).await.expect("clean shutdown");

    assert!(server.into_transport().into_writer().is_empty());
}
