//! Shared HTTP plumbing for the upstream data sources: client construction
//! and exponential backoff.
//!
//! Retried: timeouts, connection failures, 5xx, 408 and 429.
//! Not retried: every other 4xx, request-building errors.
//!
//! A request whose final response is not a success is returned as
//! `NetworkError::ServerError` so callers only ever see 2xx responses.

use reqwest::{RequestBuilder, Response, StatusCode};

use crate::config::{RetryConfig, ServiceConfig};
use crate::error::{NetworkError, ReqwestErrorExt};

/// Build a client carrying the configured timeout and user agent
pub fn build_client(services: &ServiceConfig) -> Result<reqwest::Client, NetworkError> {
    reqwest::Client::builder()
        .timeout(services.timeout())
        .user_agent(services.user_agent.as_str())
        .build()
        .map_err(|e| NetworkError::ClientSetup(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    NoRetry,
}

/// Classify a transport-level failure
pub fn classify_error(error: &reqwest::Error) -> RetryDecision {
    if error.is_timeout() || error.is_connect() {
        return RetryDecision::Retry;
    }
    if error.is_request() || error.is_builder() {
        return RetryDecision::NoRetry;
    }
    match error.status() {
        Some(status) => classify_status(status),
        None => RetryDecision::NoRetry,
    }
}

/// Classify a response status
pub fn classify_status(status: StatusCode) -> RetryDecision {
    if status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
    {
        RetryDecision::Retry
    } else {
        RetryDecision::NoRetry
    }
}

/// Send `request`, retrying transient failures according to `policy`.
///
/// Requests with streaming bodies cannot be cloned and are sent once.
pub async fn send_with_retry(
    policy: &RetryConfig,
    request: RequestBuilder,
) -> Result<Response, NetworkError> {
    let mut attempt: u32 = 0;

    loop {
        let Some(current) = request.try_clone() else {
            tracing::debug!("Request body is not cloneable, sending without retry");
            return into_success(request.send().await.map_err(|e| e.into_network_error())?);
        };

        let can_retry = attempt < policy.max_retries;

        match current.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() || !can_retry || classify_status(status) == RetryDecision::NoRetry {
                    if attempt > 0 && status.is_success() {
                        tracing::info!("Request succeeded after {} retries", attempt);
                    }
                    return into_success(response);
                }
                tracing::warn!(
                    "Upstream returned {}, attempt {} of {}",
                    status,
                    attempt + 1,
                    policy.max_retries + 1
                );
            }
            Err(e) => {
                if !can_retry || classify_error(&e) == RetryDecision::NoRetry {
                    tracing::debug!("Giving up on request: {}", e);
                    return Err(e.into_network_error());
                }
                tracing::warn!(
                    "Retryable error on attempt {} of {}: {}",
                    attempt + 1,
                    policy.max_retries + 1,
                    e
                );
            }
        }

        let delay = policy.delay_for_attempt(attempt);
        attempt += 1;
        tokio::time::sleep(delay).await;
    }
}

fn into_success(response: Response) -> Result<Response, NetworkError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(NetworkError::ServerError {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        })
    }
}
