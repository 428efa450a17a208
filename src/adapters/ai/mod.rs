//! AI adapters - implementations of the AIProvider port.

mod mistral_provider;
mod mock_provider;

pub use mistral_provider::{MistralConfig, MistralProvider};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
