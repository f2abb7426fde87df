//! Mock vision backend for testing

use async_trait::async_trait;

use crate::error::Result;

use super::VisionBackend;

/// Canned completion the mock returns for every image.
///
/// Deliberately wrapped in commentary so tests exercise the brace-match
/// extraction path, and internally consistent so reconciliation passes
/// without flagging review.
const MOCK_COMPLETION: &str = r#"Here is the extracted receipt:
{
  "store_name": "Mock Diner",
  "date": "2025-06-14",
  "items": [
    {"name": "Cheeseburger", "price": "7.70", "quantity": "2"},
    {"name": "Fries", "price": "3.85", "quantity": "1"}
  ],
  "subtotal": "11.55",
  "tax_amount": "1.14",
  "tax_rate": "9.875%",
  "gratuity": "0.00",
  "gratuity_rate": "N/A",
  "total_amount": "12.69"
}
Let me know if you need anything else."#;

/// Mock backend returning a fixed, well-formed completion
#[derive(Clone)]
pub struct MockBackend {
    healthy: bool,
}

impl MockBackend {
    /// Create a healthy mock backend
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create a mock backend whose health check fails
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionBackend for MockBackend {
    async fn extract_receipt(
        &self,
        _image_data: &[u8],
        _model_override: Option<&str>,
    ) -> Result<String> {
        Ok(MOCK_COMPLETION.to_string())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
