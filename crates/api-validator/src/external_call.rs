//! `externalApiCall` fact: regex extraction plus an outbound HTTP call.
//!
//! Resolves `fileData` from the almanac, extracts the first capture
//! group of `params.regex` from the file content, then calls
//! `params.url` (POST by default), optionally forwarding the extracted
//! value as `{"value": ...}`. Missing data and missing matches are
//! expected negatives; transport and pattern failures raise
//! [`PluginError`].

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use rulepack_plugin::{
    file_content, Almanac, Fact, FactOutcome, FactParams, PluginError, Success,
};

/// Name the host resolves this fact under.
pub const FACT_NAME: &str = "externalApiCall";

/// External API call fact with a pooled HTTP client.
#[derive(Debug, Clone, Default)]
pub struct ExternalApiCall {
    client: reqwest::Client,
}

impl ExternalApiCall {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Fact for ExternalApiCall {
    fn name(&self) -> &'static str {
        FACT_NAME
    }

    async fn evaluate(
        &self,
        params: &FactParams,
        almanac: &dyn Almanac,
    ) -> Result<FactOutcome, PluginError> {
        debug!(fact = FACT_NAME, "fact called");

        let Some(file_data) = almanac.fact_value("fileData").await else {
            warn!(fact = FACT_NAME, "no file data available");
            return Ok(FactOutcome::error("No file data available"));
        };
        let Some(content) = file_content(&file_data) else {
            warn!(fact = FACT_NAME, "fileData carries no fileContent");
            return Ok(FactOutcome::error("No file data available"));
        };
        debug!(
            fact = FACT_NAME,
            content_length = content.len(),
            "file content loaded"
        );

        let pattern = params
            .regex
            .as_deref()
            .ok_or_else(|| call_failed("missing required param: regex"))?;
        let regex = Regex::new(pattern)
            .map_err(|e| call_failed_from(&e))?;

        let Some(extracted) = regex
            .captures(content)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
        else {
            debug!(fact = FACT_NAME, pattern, "no regex match found");
            return Ok(FactOutcome::negative("No match found"));
        };
        debug!(fact = FACT_NAME, extracted_value = %extracted, "value extracted");

        let url = params
            .url
            .as_deref()
            .ok_or_else(|| call_failed("missing required param: url"))?;
        let method = parse_method(params.method.as_deref())?;

        debug!(
            fact = FACT_NAME,
            url,
            %method,
            include_value = params.include_value,
            timeout_ms = params.timeout_or_default().as_millis() as u64,
            "making API call"
        );

        let mut request = self
            .client
            .request(method, url)
            .timeout(params.timeout_or_default());
        for (key, value) in &params.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if params.include_value {
            request = request.json(&json!({ "value": extracted }));
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| call_failed_from(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| call_failed_from(&e))?;
        // Response bodies are JSON when the endpoint says so; anything
        // else is forwarded as a JSON string.
        let api_response = serde_json::from_str(&body).unwrap_or(Value::String(body));

        debug!(fact = FACT_NAME, status = status.as_u16(), "API call successful");

        Ok(FactOutcome::Success(Success {
            extracted_value: Some(extracted),
            api_response: Some(api_response),
            ..Success::now()
        }))
    }
}

/// Resolve the request method: GET/POST/PUT/DELETE, default POST.
fn parse_method(method: Option<&str>) -> Result<reqwest::Method, PluginError> {
    match method {
        None => Ok(reqwest::Method::POST),
        Some(m) => match m.to_uppercase().as_str() {
            "GET" => Ok(reqwest::Method::GET),
            "POST" => Ok(reqwest::Method::POST),
            "PUT" => Ok(reqwest::Method::PUT),
            "DELETE" => Ok(reqwest::Method::DELETE),
            other => Err(call_failed(&format!("unsupported HTTP method: {other}"))),
        },
    }
}

fn call_failed(detail: &str) -> PluginError {
    error!(fact = FACT_NAME, detail, "API call failed");
    PluginError::operational("API call failed", FACT_NAME).with_stack(detail)
}

fn call_failed_from(source: &(dyn std::error::Error + 'static)) -> PluginError {
    error!(fact = FACT_NAME, error = %source, "API call failed");
    PluginError::operational("API call failed", FACT_NAME).with_stack_from(source)
}
