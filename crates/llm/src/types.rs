//! Provider and model catalogue.

/// Gemini models offered for selection, with display labels.
pub const GEMINI_MODELS: &[(&str, &str)] = &[
    ("gemini-2.0-flash", "Gemini 2.0 Flash (Latest & Most Accurate)"),
    ("gemini-1.5-flash", "Gemini 1.5 Flash (Balanced & Reliable)"),
    ("gemini-1.5-pro", "Gemini 1.5 Pro (High Quality)"),
];

/// Whether `model` is one of the catalogued Gemini models.
pub fn is_known_gemini_model(model: &str) -> bool {
    GEMINI_MODELS.iter().any(|(id, _)| *id == model)
}

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    Gemini,
    Ollama,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(ProviderType::parse("gemini"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::parse("Google"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::parse("ollama"), Some(ProviderType::Ollama));
        assert_eq!(ProviderType::parse("openai"), None);
        assert_eq!(ProviderType::Gemini.as_str(), "gemini");
    }

    #[test]
    fn test_known_models() {
        assert!(is_known_gemini_model("gemini-2.0-flash"));
        assert!(is_known_gemini_model("gemini-1.5-pro"));
        assert!(!is_known_gemini_model("gemini-ultra-9"));
    }
}
