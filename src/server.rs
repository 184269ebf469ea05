//! HTTP transport for the receipt operations.
//!
//! | Method | Path                    | Response                                   |
//! |--------|-------------------------|--------------------------------------------|
//! | POST   | `/receipts/process`     | `{"id": "..."}`                            |
//! | GET    | `/receipts/{id}/points` | `{"points": 28}`                           |
//! | GET    | `/receipts/{id}`        | the receipt exactly as it was submitted    |
//!
//! Failures are answered with `{"error": "..."}` and a status chosen from the `ErrorType`.

use crate::error::{ErrorType, IntoResult, Res, ServiceError};
use crate::model::ReceiptId;
use crate::service::ReceiptService;
use crate::Result;
use anyhow::{anyhow, Context};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::future::Future;
use std::str::FromStr;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// The response body type used by every handler.
pub type ResponseBody = Full<Bytes>;

/// The largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Accepts connections on `listener` and serves each one on its own task until `shutdown`
/// completes. Connections already in progress are left to finish on their own.
pub async fn serve<F>(listener: TcpListener, service: ReceiptService, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let addr = listener
        .local_addr()
        .context("Unable to read the listener address")?;
    info!("Listening on http://{addr}");
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down the server");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        warn!("Failed to accept a connection: {e}");
                        continue;
                    }
                };
                debug!("Accepted connection from {peer}");
                let service = service.clone();
                tokio::spawn(async move {
                    let handler = service_fn(move |req: Request<Incoming>| {
                        let service = service.clone();
                        async move { Ok::<_, Infallible>(route(&service, req).await) }
                    });
                    if let Err(e) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), handler)
                        .await
                    {
                        debug!("Connection from {peer} ended with an error: {e}");
                    }
                });
            }
        }
    }
}

/// Dispatches one request to its handler and turns the outcome into a response.
pub async fn route<B>(service: &ReceiptService, req: Request<B>) -> Response<ResponseBody>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    debug!("{method} {path}");

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let result = match (segments.as_slice(), &method) {
        (["receipts", "process"], &Method::POST) => process(service, req).await,
        (["receipts", "process"], _) => Ok(method_not_allowed()),
        (["receipts", id, "points"], &Method::GET) => points(service, id).await,
        (["receipts", _, "points"], _) => Ok(method_not_allowed()),
        (["receipts", id], &Method::GET) => receipt(service, id).await,
        (["receipts", _], _) => Ok(method_not_allowed()),
        _ => Ok(json_response(
            StatusCode::NOT_FOUND,
            &json!({"error": "Not found"}),
        )),
    };

    match result {
        Ok(response) => response,
        Err(e) => error_response(&e),
    }
}

async fn process<B>(service: &ReceiptService, req: Request<B>) -> Res<Response<ResponseBody>>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let body = match Limited::new(req.into_body(), MAX_BODY_BYTES).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            return Err(ServiceError::new(
                ErrorType::TooLarge,
                anyhow!("The request body is larger than {MAX_BODY_BYTES} bytes"),
            ));
        }
        Err(e) => {
            return Err(ServiceError::new(
                ErrorType::Request,
                anyhow!("Unable to read the request body: {e}"),
            ));
        }
    };
    let raw: Value = serde_json::from_slice(&body)
        .context("The request body is not valid JSON")
        .pub_result(ErrorType::Request)?;
    let id = service.submit(&raw).await?;
    Ok(json_response(StatusCode::OK, &json!({ "id": id })))
}

async fn points(service: &ReceiptService, id: &str) -> Res<Response<ResponseBody>> {
    let id = parse_id(id)?;
    let points = service.points(&id).await?;
    Ok(json_response(StatusCode::OK, &json!({ "points": points })))
}

async fn receipt(service: &ReceiptService, id: &str) -> Res<Response<ResponseBody>> {
    let id = parse_id(id)?;
    let receipt = service.receipt(&id).await?;
    Ok(json_response(StatusCode::OK, &*receipt))
}

/// An identifier that does not parse can never have been issued, so it is reported as not found.
fn parse_id(id: &str) -> Res<ReceiptId> {
    ReceiptId::from_str(id).map_err(|_| ServiceError::not_found())
}

fn status(error_type: ErrorType) -> StatusCode {
    match error_type {
        ErrorType::Rejected | ErrorType::Request => StatusCode::BAD_REQUEST,
        ErrorType::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorType::NotFound => StatusCode::NOT_FOUND,
        ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(e: &ServiceError) -> Response<ResponseBody> {
    let status = status(e.error_type());
    let message = match e.error_type() {
        ErrorType::Internal => {
            error!("Internal error while handling a request: {e:?}");
            "Internal server error".to_string()
        }
        _ => e.to_string(),
    };
    json_response(status, &json!({ "error": message }))
}

fn method_not_allowed() -> Response<ResponseBody> {
    json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &json!({"error": "Method not allowed"}),
    )
}

fn json_response<T>(status: StatusCode, body: &T) -> Response<ResponseBody>
where
    T: Serialize + ?Sized,
{
    let (status, bytes) = match serde_json::to_vec(body) {
        Ok(bytes) => (status, bytes),
        Err(e) => {
            error!("Unable to serialize a response body: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                br#"{"error":"Internal server error"}"#.to_vec(),
            )
        }
    };
    let mut response = Response::new(Full::new(Bytes::from(bytes)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
