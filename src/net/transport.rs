//! Browser `fetch` transport.
//!
//! Client-side (`csr`): real HTTP calls via `gloo-net`, raced against a
//! `gloo-timers` timeout that aborts the request.
//! Native builds: every call fails with a network error, since there is no
//! browser to send from.

#![allow(clippy::unused_async)]

use crate::net::http::{ApiRequest, ApiResponse, HttpError, Transport};

#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        #[cfg(feature = "csr")]
        {
            send_with_fetch(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(HttpError::Network("not available outside the browser".to_owned()))
        }
    }
}

#[cfg(feature = "csr")]
async fn send_with_fetch(request: ApiRequest) -> Result<ApiResponse, HttpError> {
    use futures::future::{Either, select};
    use gloo_net::http::{Method as FetchMethod, RequestBuilder};
    use web_sys::{AbortController, RequestCredentials};

    use crate::net::http::Method;

    let controller = AbortController::new().map_err(|e| HttpError::Request(format!("{e:?}")))?;
    let signal = controller.signal();

    let method = match request.method {
        Method::Get => FetchMethod::GET,
        Method::Post => FetchMethod::POST,
    };
    let credentials = if request.with_credentials {
        RequestCredentials::Include
    } else {
        RequestCredentials::SameOrigin
    };
    let mut builder = RequestBuilder::new(&request.url)
        .method(method)
        .credentials(credentials)
        .abort_signal(Some(&signal));
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let outgoing = match &request.body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| HttpError::Request(e.to_string()))?;

    let timeout_ms = u32::try_from(request.timeout.as_millis()).unwrap_or(u32::MAX);
    let send = outgoing.send();
    let timer = gloo_timers::future::TimeoutFuture::new(timeout_ms);
    futures::pin_mut!(send);
    futures::pin_mut!(timer);

    let response = match select(send, timer).await {
        Either::Left((result, _)) => result.map_err(|e| HttpError::Network(e.to_string()))?,
        Either::Right(((), _)) => {
            controller.abort();
            return Err(HttpError::Timeout(request.timeout));
        }
    };

    let status = response.status();
    let url = Some(response.url())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| request.url.clone());
    let text = response
        .text()
        .await
        .map_err(|e| HttpError::Decode(e.to_string()))?;
    let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
    Ok(ApiResponse { url, status, body })
}
