//! HTTP transport behind the probe pipeline.

use crate::http::request::{HttpMethod, RequestSpec};
use crate::http::response::ResponseSnapshot;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, redirect::Policy, Client};
use std::time::{Duration, Instant};

/// Contract between the scan pipeline and the wire. `send` is infallible by
/// contract: network and protocol failures are captured into the snapshot
/// (status -1, error text as body) instead of crossing the boundary.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, spec: &RequestSpec) -> ResponseSnapshot;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(Policy::none())
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    async fn execute(&self, spec: &RequestSpec) -> Result<(u16, String)> {
        let mut request = match spec.method {
            HttpMethod::Get => self.client.get(&spec.url),
            HttpMethod::Post => self.client.post(&spec.url),
        };

        for (name, value) in &spec.headers {
            request = request.header(name, value);
        }

        if spec.method == HttpMethod::Post {
            if let Some(body) = &spec.raw_body {
                request = request
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(body.clone());
            }
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok((status, body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, spec: &RequestSpec) -> ResponseSnapshot {
        let start = Instant::now();

        match self.execute(spec).await {
            Ok((status, body)) => ResponseSnapshot::new(
                i32::from(status),
                Some(body),
                start.elapsed().as_millis(),
            ),
            Err(e) => ResponseSnapshot::new(-1, Some(e.to_string()), start.elapsed().as_millis()),
        }
    }
}
