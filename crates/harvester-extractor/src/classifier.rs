//! LLM-backed technology classifier

use crate::config::ClassificationConfig;
use crate::parser::parse_label;
use crate::prompt::{build_prompt, truncate_chars, SYSTEM_PROMPT};
use async_trait::async_trait;
use harvester_domain::traits::{ClassifyError, Classifier, LlmProvider};
use harvester_domain::TechLabel;
use tracing::{debug, warn};

/// Classifier that asks an [`LlmProvider`] for one label
///
/// Empty input fails with [`ClassifyError::EmptyInput`] without calling the
/// provider. An out-of-set reply is asked once more after a short pause when
/// `reask_on_invalid` is set; a second bad reply is a failure.
pub struct LlmClassifier<L: LlmProvider> {
    llm: L,
    config: ClassificationConfig,
}

impl<L: LlmProvider> LlmClassifier<L> {
    /// Create a classifier over `llm`
    pub fn new(llm: L, config: ClassificationConfig) -> Self {
        Self { llm, config }
    }

    /// Get the underlying provider
    pub fn provider(&self) -> &L {
        &self.llm
    }

    async fn ask_once(&self, prompt: &str) -> Result<TechLabel, ClassifyError> {
        let reply = tokio::time::timeout(self.config.timeout(), self.llm.generate(SYSTEM_PROMPT, prompt))
            .await
            .map_err(|_| ClassifyError::Timeout)?
            .map_err(|e| ClassifyError::Provider(e.to_string()))?;

        debug!(model = self.llm.model_name(), reply = %reply.trim(), "classifier reply");
        parse_label(&reply)
    }
}

#[async_trait]
impl<L: LlmProvider> Classifier for LlmClassifier<L> {
    async fn classify(&self, text: &str) -> Result<TechLabel, ClassifyError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClassifyError::EmptyInput);
        }

        let prompt = build_prompt(truncate_chars(text, self.config.max_text_chars));

        match self.ask_once(&prompt).await {
            Err(ClassifyError::OutOfSet(reply)) if self.config.reask_on_invalid => {
                warn!("Reply {:?} is not an allowed label, asking again", reply);
                tokio::time::sleep(self.config.reask_delay()).await;
                self.ask_once(&prompt).await
            }
            other => other,
        }
    }
}
