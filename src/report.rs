use tracing::{debug, info};

use crate::clients::ai::prompts::{build_report_prompt, REPORT_SYSTEM_PROMPT};
use crate::clients::ai::{AiClient, GeneratedReport};
use crate::formatter::NormalizedView;
use crate::Result;

pub type ReportResult = Result<GeneratedReport>;

/// Builds the prompt for `view` and makes exactly one completion call.
/// Failures are returned as-is; nothing is retried.
pub async fn build_and_dispatch(
    client: &dyn AiClient,
    view: &NormalizedView,
    narrative: Option<&str>,
) -> ReportResult {
    let prompt = build_report_prompt(view, narrative);

    info!(
        "Requesting report for parcel {} from {} ({} prompt chars)",
        view.parcel_id,
        client.provider_name(),
        prompt.len()
    );
    debug!("prompt ------------> {}", prompt);

    let report = client.complete(REPORT_SYSTEM_PROMPT, &prompt).await?;

    info!(
        "Report generated for parcel {} ({} chars, model {})",
        view.parcel_id,
        report.text.len(),
        report.model
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::normalize;
    use crate::property::PropertyRecord;
    use crate::AppError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        seen: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl AiClient for RecordingClient {
        async fn complete(&self, system: &str, prompt: &str) -> Result<GeneratedReport> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            if self.fail {
                return Err(AppError::ExternalApi("connection reset".into()));
            }
            Ok(GeneratedReport {
                text: "<h2>Executive Summary</h2>".into(),
                model: "test-model".into(),
                usage: None,
            })
        }

        fn provider_name(&self) -> &'static str {
            "recording"
        }
    }

    fn sample_view() -> NormalizedView {
        let record: PropertyRecord =
            serde_json::from_value(json!({"For_Sale_Price": 500000, "Land_Area_AC": 20})).unwrap();
        normalize(&record)
    }

    #[tokio::test]
    async fn test_dispatch_sends_system_and_prompt_once() {
        let client = RecordingClient::default();
        let report = build_and_dispatch(&client, &sample_view(), Some("Corner lot."))
            .await
            .unwrap();

        assert_eq!(report.text, "<h2>Executive Summary</h2>");
        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, REPORT_SYSTEM_PROMPT);
        assert!(seen[0].1.contains("$25,000"));
        assert!(seen[0].1.contains("Corner lot."));
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_not_retried() {
        let client = RecordingClient {
            fail: true,
            ..Default::default()
        };
        let err = build_and_dispatch(&client, &sample_view(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ExternalApi(ref m) if m == "connection reset"));
        assert_eq!(client.seen.lock().unwrap().len(), 1);
    }
}
