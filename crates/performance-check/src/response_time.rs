//! `responseTime` fact: HTTP response-latency measurement.
//!
//! Issues a GET against `params.url` and reports elapsed wall-clock
//! milliseconds plus the response status. Any failure (transport
//! error, timeout, non-2xx status, missing url) raises a
//! [`PluginError`] tagged `ResponseTimeError`.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error};

use rulepack_plugin::{Almanac, Fact, FactOutcome, FactParams, PluginError, Success};

/// Name the host resolves this fact under.
pub const FACT_NAME: &str = "responseTime";

/// Response-time measurement fact with a pooled HTTP client.
#[derive(Debug, Clone, Default)]
pub struct ResponseTime {
    client: reqwest::Client,
}

impl ResponseTime {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Fact for ResponseTime {
    fn name(&self) -> &'static str {
        FACT_NAME
    }

    async fn evaluate(
        &self,
        params: &FactParams,
        _almanac: &dyn Almanac,
    ) -> Result<FactOutcome, PluginError> {
        debug!(fact = FACT_NAME, "fact called");

        let url = params
            .url
            .as_deref()
            .ok_or_else(|| check_failed("missing required param: url"))?;

        let start = Instant::now();

        let mut request = self
            .client
            .get(url)
            .timeout(params.timeout_or_default());
        for (key, value) in &params.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| check_failed_from(&e))?;

        let response_time = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        debug!(
            fact = FACT_NAME,
            url,
            response_time,
            status,
            "response time measured"
        );

        Ok(FactOutcome::Success(Success {
            response_time: Some(response_time),
            status: Some(status),
            ..Success::now()
        }))
    }
}

fn check_failed(detail: &str) -> PluginError {
    error!(fact = FACT_NAME, detail, "response time check failed");
    PluginError::operational("Response time check failed", FACT_NAME)
        .with_error_name("ResponseTimeError")
        .with_stack(detail)
}

fn check_failed_from(source: &(dyn std::error::Error + 'static)) -> PluginError {
    error!(fact = FACT_NAME, error = %source, "response time check failed");
    PluginError::operational("Response time check failed", FACT_NAME)
        .with_error_name("ResponseTimeError")
        .with_stack_from(source)
}
