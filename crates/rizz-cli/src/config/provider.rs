//! Upstream service providers.

use anyhow::Context;
use rizz_core::{AnnotationService, CompletionService};
use rizz_reqwest::{OpenAiClient, VisionClient};

use super::Cli;
use crate::TRACING_TARGET_CONFIG;

/// Creates the annotation and completion services from CLI configuration.
///
/// A provider without an API key is left out. The server still starts: a
/// missing annotation service degrades responses and a missing completion
/// service fails requests with `500`.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be initialized.
pub fn create_services(
    cli: &Cli,
) -> anyhow::Result<(Option<AnnotationService>, Option<CompletionService>)> {
    let annotation = match cli.vision.api_key() {
        Some(_) => {
            let client =
                VisionClient::new(cli.vision.clone()).context("failed to create Vision client")?;
            Some(client.into_service())
        }
        None => {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                "GOOGLE_CLOUD_API_KEY is not set, screenshots will not be annotated"
            );
            None
        }
    };

    let completion = match cli.openai.api_key() {
        Some(_) => {
            let client =
                OpenAiClient::new(cli.openai.clone()).context("failed to create OpenAI client")?;
            Some(client.into_service())
        }
        None => {
            tracing::error!(
                target: TRACING_TARGET_CONFIG,
                "OPENAI_API_KEY is not set, suggestion requests will fail"
            );
            None
        }
    };

    Ok((annotation, completion))
}
