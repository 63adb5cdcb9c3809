use std::sync::Arc;

use super::{
    base::Provider, configs::ProviderConfig, gemini::GeminiProvider, offline::OfflineProvider,
    openai::OpenAiProvider,
};
use anyhow::Result;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(EnumIter, EnumString, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ProviderType {
    Gemini,
    OpenAi,
    Offline,
}

/// Build a shared provider; every agent in an app holds a clone of the same one.
pub fn get_provider(config: ProviderConfig) -> Result<Arc<dyn Provider>> {
    match config {
        ProviderConfig::OpenAi(openai_config) => Ok(Arc::new(OpenAiProvider::new(openai_config)?)),
        ProviderConfig::Gemini(gemini_config) => Ok(Arc::new(GeminiProvider::new(gemini_config)?)),
        ProviderConfig::Offline => Ok(Arc::new(OfflineProvider::new())),
    }
}
