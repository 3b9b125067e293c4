use std::time::Instant;

use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::upstream::{UpstreamClient, UpstreamError, UpstreamRequest};

#[derive(Args, Debug)]
pub struct PingArgs {
    #[arg(long, default_value = "/api/health", help = "Backend path to request")]
    pub path: String,
}

pub async fn handle(args: PingArgs, config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = UpstreamClient::new(std::sync::Arc::new(config))?;
    let started = Instant::now();

    match client.call(UpstreamRequest::get(args.path.clone())).await {
        Ok(_) => output_success(
            output_format,
            &format!("Backend answered {} in {} ms", args.path, started.elapsed().as_millis()),
            Some(json!({ "path": args.path, "elapsed_ms": started.elapsed().as_millis() as u64 })),
        ),
        Err(e) => {
            output_error(output_format, &e.to_string(), Some(error_code(&e)))?;
            Err(e).with_context(|| format!("backend ping to {} failed", args.path))
        }
    }
}

fn error_code(err: &UpstreamError) -> &'static str {
    match err {
        UpstreamError::Configuration(_) => "CONFIGURATION_ERROR",
        UpstreamError::Status { .. } => "UPSTREAM_ERROR",
        UpstreamError::Timeout | UpstreamError::Unreachable(_) => "UPSTREAM_UNREACHABLE",
        UpstreamError::InvalidRequest(_) => "INVALID_REQUEST",
    }
}
