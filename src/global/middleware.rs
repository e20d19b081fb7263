use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 생성 요청처럼 모델을 호출하는 요청은 오래 걸릴 수 있어 별도로 표시
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(10);

/// 요청 단위 식별자 (request extensions에 저장)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// 클라이언트가 보낸 `x-request-id`를 사용하고, 없으면 UUID v4를 발급
fn resolve_request_id(request: &Request) -> String {
    request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// 요청마다 span을 열고 처리 시간과 상태 코드를 기록
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(&request);
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %path,
    );
    let start = Instant::now();

    async move {
        let mut response = next.run(request).await;
        let elapsed = start.elapsed();
        let duration_ms = elapsed.as_millis() as u64;
        let status = response.status().as_u16();

        if response.status().is_server_error() || elapsed >= SLOW_REQUEST_THRESHOLD {
            warn!(duration_ms, status, "request completed");
        } else {
            info!(duration_ms, status, "request completed");
        }

        let header_value = HeaderValue::from_str(&request_id)
            .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), header_value);
        response
    }
    .instrument(span)
    .await
}
