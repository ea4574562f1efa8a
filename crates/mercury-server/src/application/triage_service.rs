//! Triage Application Service (Use Case)
//!
//! Composes prompt building, the completion call and output parsing
//! into the single `analyze` operation.

use std::sync::Arc;

use mercury::{
    parser, prompt_builder, schema, CompletionOptions, CompletionProvider, TicketComplaint,
    TriageError, TriageRecord,
};

/// Application service for complaint triage
///
/// Stateless per call, so one instance is shared by all requests.
pub struct TriageService<P: CompletionProvider + ?Sized> {
    provider: Arc<P>,
    options: CompletionOptions,
    retry_on_invalid_output: bool,
}

impl<P: CompletionProvider + ?Sized> TriageService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            options: CompletionOptions::default(),
            retry_on_invalid_output: false,
        }
    }

    /// Allow one extra full attempt when the model output is malformed or
    /// breaks the schema
    pub fn with_retry_on_invalid_output(mut self, enabled: bool) -> Self {
        self.retry_on_invalid_output = enabled;
        self
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    /// Analyze one complaint into a validated triage record
    pub async fn analyze(&self, complaint: &str) -> Result<TriageRecord, TriageError> {
        let complaint = TicketComplaint::new(complaint)?;
        let format_instructions = schema::describe();

        match self.attempt(&complaint, &format_instructions).await {
            Err(e) if self.retry_on_invalid_output && e.is_output_error() => {
                tracing::warn!(error_kind = e.kind(), "Retrying triage once after invalid output");
                self.attempt(&complaint, &format_instructions).await
            }
            result => result,
        }
    }

    async fn attempt(
        &self,
        complaint: &TicketComplaint,
        format_instructions: &str,
    ) -> Result<TriageRecord, TriageError> {
        let prompt = prompt_builder::build(complaint, format_instructions);
        tracing::debug!(
            prompt_tokens_estimate = prompt.estimate_tokens(),
            prompt = %prompt.render(),
            "Prompt built"
        );

        let response = self
            .provider
            .complete(&prompt, &self.options)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    provider = self.provider.provider_name(),
                    error = %e,
                    "Completion call failed"
                )
            })?;

        tracing::debug!(raw = %response.content, "Raw model output");

        let record = parser::parse(&response.content).inspect_err(|e| match e {
            TriageError::MalformedOutput { raw } => {
                tracing::warn!(raw = %raw, "Model output is not a JSON object")
            }
            other => tracing::warn!(error = %other, "Model output rejected"),
        })?;

        tracing::info!(
            category = %record.category(),
            urgency = %record.urgency(),
            suggested_action = %record.suggested_action(),
            tokens = response.usage.total_tokens,
            "Complaint triaged"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubProvider;
    use mercury::prompt_builder::BILLING_EXAMPLE;
    use mercury::{Category, SuggestedAction, Urgency};

    #[tokio::test]
    async fn test_billing_example() {
        let stub = StubProvider::returning(BILLING_EXAMPLE.record);
        let service = TriageService::new(stub.clone());

        let record = service.analyze("I was charged twice!").await.unwrap();

        assert_eq!(record.category(), Category::BillingDispute);
        assert_eq!(record.urgency(), Urgency::High);
        assert_eq!(record.suggested_action(), SuggestedAction::Refund);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_and_options_sent_to_model() {
        let stub = StubProvider::returning(BILLING_EXAMPLE.record);
        let service = TriageService::new(stub.clone());

        service.analyze("I was charged twice!").await.unwrap();

        let prompt = stub.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.system().contains("Senior Customer Support"));
        assert!(prompt.user().starts_with("I was charged twice!"));
        assert!(prompt.user().ends_with(&schema::describe()));
        assert_eq!(*stub.last_temperature.lock().unwrap(), Some(0.0));
    }

    #[tokio::test]
    async fn test_empty_complaint_never_calls_model() {
        let stub = StubProvider::returning(BILLING_EXAMPLE.record);
        let service = TriageService::new(stub.clone());

        for complaint in ["", "   ", "\n\t"] {
            let err = service.analyze(complaint).await.unwrap_err();
            assert!(matches!(err, TriageError::InvalidInput(_)));
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_deterministic_model_gives_identical_records() {
        let stub = StubProvider::returning(BILLING_EXAMPLE.record);
        let service = TriageService::new(stub.clone());

        let first = service.analyze("I was charged twice!").await.unwrap();
        let second = service.analyze("I was charged twice!").await.unwrap();

        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_timeout_is_model_unavailable() {
        let stub =
            StubProvider::failing(TriageError::model_unavailable("request timed out after 30s"));
        let service = TriageService::new(stub.clone());

        let err = service.analyze("Where is my order?").await.unwrap_err();

        assert!(matches!(err, TriageError::ModelUnavailable(_)));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_output_is_final_by_default() {
        let stub = StubProvider::new(vec![
            Ok("Sure, here is the analysis: ...".to_string()),
            Ok(BILLING_EXAMPLE.record.to_string()),
        ]);
        let service = TriageService::new(stub.clone());

        let err = service.analyze("I was charged twice!").await.unwrap_err();

        assert_eq!(
            err,
            TriageError::malformed_output("Sure, here is the analysis: ...")
        );
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_schema_violation_surfaces_field() {
        let stub = StubProvider::returning(
            r#"{"category": "Billing_Dispute", "sentiment": "Angry", "urgency": "ASAP", "suggested_action": "REFUND", "draft_response": "Sorry"}"#,
        );
        let service = TriageService::new(stub);

        let err = service.analyze("I was charged twice!").await.unwrap_err();

        assert_eq!(err, TriageError::schema_violation("urgency", "\"ASAP\""));
    }

    #[tokio::test]
    async fn test_retry_recovers_from_invalid_output() {
        let stub = StubProvider::new(vec![
            Ok("not json".to_string()),
            Ok(BILLING_EXAMPLE.record.to_string()),
        ]);
        let service = TriageService::new(stub.clone()).with_retry_on_invalid_output(true);

        let record = service.analyze("I was charged twice!").await.unwrap();

        assert_eq!(record.category(), Category::BillingDispute);
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_retry_is_bounded_to_one() {
        let stub = StubProvider::returning(r#"{"category": "Nope"}"#);
        let service = TriageService::new(stub.clone()).with_retry_on_invalid_output(true);

        let err = service.analyze("I was charged twice!").await.unwrap_err();

        assert!(matches!(err, TriageError::SchemaViolation { .. }));
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_retry_skips_model_unavailable() {
        let stub = StubProvider::failing(TriageError::model_unavailable("rate limited"));
        let service = TriageService::new(stub.clone()).with_retry_on_invalid_output(true);

        let err = service.analyze("I was charged twice!").await.unwrap_err();

        assert!(matches!(err, TriageError::ModelUnavailable(_)));
        assert_eq!(stub.calls(), 1);
    }
}
