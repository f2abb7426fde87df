//! Pluggable vision-language backend abstraction
//!
//! The reconciliation engine treats the vision model as a black box
//! that turns a receipt image into raw completion text. This module
//! provides the backend-agnostic interface for that one call.
//!
//! # Architecture
//!
//! - `VisionBackend` trait: defines the interface for vision operations
//! - `VisionClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAICompatibleBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `VISION_BACKEND`: Backend to use (openai_compatible, mock). Default: openai_compatible
//! - `VISION_HOST`: Server URL (required for openai_compatible)
//! - `VISION_MODEL`: Model name (default: gpt-4o-mini)
//! - `VISION_API_KEY`: API key if required (optional)

mod mock;
mod openai_compatible;

pub use mock::MockBackend;
pub use openai_compatible::OpenAICompatibleBackend;

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for all vision backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Extract an itemized receipt from an image, returning the raw
    /// completion text (the reconciliation engine parses it downstream)
    async fn extract_receipt(
        &self,
        image_data: &[u8],
        model_override: Option<&str>,
    ) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete vision client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum VisionClient {
    /// OpenAI-compatible backend (OpenAI, vLLM, LocalAI, llama-server, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl VisionClient {
    /// Create a vision client from environment variables
    ///
    /// Checks `VISION_BACKEND` to determine which backend to use:
    /// - `openai_compatible` (default): Uses VISION_HOST and VISION_MODEL
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend =
            std::env::var("VISION_BACKEND").unwrap_or_else(|_| "openai_compatible".to_string());

        match backend.to_lowercase().as_str() {
            "openai_compatible" | "openai" | "vllm" | "localai" | "llamacpp" => {
                OpenAICompatibleBackend::from_env().map(VisionClient::OpenAICompatible)
            }
            "mock" => Some(VisionClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown VISION_BACKEND, falling back to openai_compatible");
                OpenAICompatibleBackend::from_env().map(VisionClient::OpenAICompatible)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        VisionClient::Mock(MockBackend::new())
    }
}

// Implement VisionBackend for VisionClient by delegating to the inner backend
#[async_trait]
impl VisionBackend for VisionClient {
    async fn extract_receipt(
        &self,
        image_data: &[u8],
        model_override: Option<&str>,
    ) -> Result<String> {
        match self {
            VisionClient::OpenAICompatible(b) => b.extract_receipt(image_data, model_override).await,
            VisionClient::Mock(b) => b.extract_receipt(image_data, model_override).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            VisionClient::OpenAICompatible(b) => b.health_check().await,
            VisionClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            VisionClient::OpenAICompatible(b) => b.model(),
            VisionClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            VisionClient::OpenAICompatible(b) => b.host(),
            VisionClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vision_client_mock() {
        let client = VisionClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = VisionClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_extraction_reconciles_end_to_end() {
        let client = VisionClient::mock();
        let raw = client.extract_receipt(b"fake image", None).await.unwrap();
        let analysis = crate::receipt::analyze_response(&raw);
        assert_ne!(analysis.store_name, "N/A");
        assert!(!analysis.items.is_empty());
    }
}
