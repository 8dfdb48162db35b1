//! Deterministic generator for tests and offline runs.

use async_trait::async_trait;

use crate::error::{PipelineError, PipelineResult};

use super::TextGenerator;

/// Returns a canned response, or a fixed error when configured to fail.
pub struct MockGenerator {
    response: String,
    fail: bool,
}

impl MockGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, _transcript: &str) -> PipelineResult<String> {
        if self.fail {
            return Err(PipelineError::Generation("mock failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_canned_response() {
        let generator = MockGenerator::new("1. Máy chủ (Trang 2)\n");
        let output = generator.generate("[PAGE 1]\nx\n").await.unwrap();
        assert_eq!(output, "1. Máy chủ (Trang 2)\n");
    }

    #[tokio::test]
    async fn test_failing_variant() {
        let generator = MockGenerator::failing();
        let result = generator.generate("x").await;
        assert!(matches!(result, Err(PipelineError::Generation(_))));
    }
}
