use course_search::{
    BodyCourseField, Config, HttpTransport, OutboundRequest, Phase, QueryInput,
    RawTransportResult, RequestBuilder, RequestEncoding, SearchOrchestrator, SubmitOutcome,
    Transport,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// 只应答一次的 HTTP 服务，返回收到的原始请求
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });

    (format!("http://{}/prod/query", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// 测试环境可能设置了代理，这里直连
fn transport() -> HttpTransport {
    HttpTransport::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
}

fn config_for(endpoint: &str) -> Config {
    Config {
        endpoint: endpoint.to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_get_success() {
    let (endpoint, server) = serve_once(
        "200 OK",
        json!({ "response": "Lecture 1 covers ML basics." }).to_string(),
    )
    .await;
    let config = config_for(&endpoint);
    let transport = transport();
    let request = RequestBuilder::new(&config)
        .build(&QueryInput::new("CS 3780", "Summarize lecture 1"));

    let result = transport.send(request).await;

    assert_eq!(
        result,
        RawTransportResult::Success {
            status: 200,
            body: r#"{"response":"Lecture 1 covers ML basics."}"#.to_string()
        }
    );
    let raw_request = server.await.unwrap();
    assert!(raw_request.starts_with(
        "GET /prod/query?query=Summarize%20lecture%201&course=CS%203780 HTTP/1.1"
    ));
}

#[tokio::test]
async fn test_post_body() {
    let (endpoint, server) = serve_once("200 OK", json!({ "response": "ok" }).to_string()).await;
    let config = Config {
        encoding: RequestEncoding::JsonBody {
            course_field: BodyCourseField::CourseName,
        },
        ..config_for(&endpoint)
    };
    let transport = transport();
    let request = RequestBuilder::new(&config).build(&QueryInput::new("CS 3780", "hi"));

    let result = transport.send(request).await;

    assert!(result.is_success());
    let raw_request = server.await.unwrap();
    assert!(raw_request.starts_with("POST /prod/query HTTP/1.1"));
    let body = raw_request.split("\r\n\r\n").nth(1).unwrap();
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(body, json!({ "query": "hi", "course_name": "CS 3780" }));
}

#[tokio::test]
async fn test_server_failure_keeps_body() {
    let (endpoint, server) =
        serve_once("500 Internal Server Error", "Internal error".to_string()).await;
    let transport = transport();

    let result = transport.send(OutboundRequest::Get { url: endpoint }).await;

    assert_eq!(
        result,
        RawTransportResult::ServerFailure {
            status: 500,
            body: Some("Internal error".to_string())
        }
    );
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_network_failure() {
    // 先占用端口再释放，保证没有监听者
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = transport();
    let result = transport
        .send(OutboundRequest::Get {
            url: format!("http://{}/query", addr),
        })
        .await;

    assert!(matches!(result, RawTransportResult::NetworkFailure { .. }));
}

#[tokio::test]
async fn test_invalid_url_is_setup_failure() {
    let transport = transport();

    let result = transport
        .send(OutboundRequest::Get {
            url: "not a url".to_string(),
        })
        .await;

    assert!(matches!(result, RawTransportResult::SetupFailure { .. }));
}

#[tokio::test]
async fn test_orchestrator_over_http() {
    let (endpoint, server) = serve_once(
        "400 Bad Request",
        json!({ "error": "Missing required query parameter 'query'" }).to_string(),
    )
    .await;
    let orchestrator = SearchOrchestrator::new(&config_for(&endpoint), Arc::new(transport()));

    orchestrator.submit("12345", "").await;

    let state = orchestrator.snapshot();
    assert_eq!(
        state.display_text,
        r#"Server Error: 400 - {"error":"Missing required query parameter 'query'"}"#
    );
    assert_eq!(state.phase, Phase::Settled);
    server.await.unwrap();
}

#[test]
fn test_transport_from_config_with_timeout() {
    let config = Config {
        request_timeout_secs: Some(5),
        ..Config::default()
    };
    assert!(HttpTransport::new(&config).is_ok());
}

/// 接受连接后一直不应答，返回端点和服务任务
async fn serve_silently() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(socket);
    });

    (format!("http://{}/prod/query", addr), handle)
}

fn timeout_transport(secs: u64) -> HttpTransport {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(secs))
        .build()
        .unwrap();
    HttpTransport::with_client(client)
}

#[tokio::test]
async fn test_timeout_is_network_failure() {
    let (endpoint, server) = serve_silently().await;
    let transport = timeout_transport(1);

    let result = transport.send(OutboundRequest::Get { url: endpoint }).await;

    assert!(matches!(result, RawTransportResult::NetworkFailure { .. }));
    server.abort();
}

#[tokio::test]
async fn test_orchestrator_timeout_shows_no_response() {
    let (endpoint, server) = serve_silently().await;
    let config = Config {
        request_timeout_secs: Some(1),
        ..config_for(&endpoint)
    };
    let orchestrator = SearchOrchestrator::new(&config, Arc::new(timeout_transport(1)));

    let outcome = orchestrator.submit("CS 3780", "Summarize lecture 1").await;

    assert!(matches!(outcome, SubmitOutcome::Applied { .. }));
    let state = orchestrator.snapshot();
    assert_eq!(
        state.display_text,
        "No response received. Please check your network."
    );
    assert!(!state.is_loading);
    server.abort();
}

#[tokio::test]
async fn test_orchestrator_bad_endpoint_shows_setup_error() {
    let orchestrator = SearchOrchestrator::from_config(&config_for("/query")).unwrap();

    orchestrator.submit("12345", "q").await;

    let state = orchestrator.snapshot();
    assert!(state.display_text.starts_with("Error: "));
    assert!(!state.is_loading);
}
