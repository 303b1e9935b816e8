use crate::model::DEFAULT_DEPTH_LIMIT;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub enable_let_polymorphism: bool,
    #[serde(deserialize_with = "at_least_one")]
    pub max_unification_depth: usize,
    pub enable_occurs_check: bool,
    /// Reserved. Accepted and carried but has no effect.
    pub enable_type_classes: bool,
    pub verbose_mode: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            enable_let_polymorphism: true,
            max_unification_depth: DEFAULT_DEPTH_LIMIT,
            enable_occurs_check: true,
            enable_type_classes: false,
            verbose_mode: false,
        }
    }
}

fn at_least_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    usize::deserialize(deserializer).map(|n| n.max(1))
}

impl InferenceConfig {
    pub fn with_let_polymorphism(mut self, enabled: bool) -> Self {
        self.enable_let_polymorphism = enabled;
        self
    }

    pub fn with_max_unification_depth(mut self, depth: usize) -> Self {
        self.max_unification_depth = depth.max(1);
        self
    }

    pub fn with_occurs_check(mut self, enabled: bool) -> Self {
        self.enable_occurs_check = enabled;
        self
    }

    pub fn with_type_classes(mut self, enabled: bool) -> Self {
        self.enable_type_classes = enabled;
        self
    }

    pub fn with_verbose_mode(mut self, enabled: bool) -> Self {
        self.verbose_mode = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::InferenceConfig;

    #[test]
    fn defaults_are_sound() {
        let config = InferenceConfig::default();
        assert!(config.enable_let_polymorphism);
        assert!(config.enable_occurs_check);
        assert!(!config.enable_type_classes);
        assert!(!config.verbose_mode);
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let config: InferenceConfig =
            serde_json::from_str(r#"{"enable_let_polymorphism": false, "max_unification_depth": 64}"#)
                .expect("config should parse");
        assert_eq!(
            config,
            InferenceConfig::default()
                .with_let_polymorphism(false)
                .with_max_unification_depth(64)
        );
    }

    #[test]
    fn depth_is_never_zero() {
        assert_eq!(InferenceConfig::default().with_max_unification_depth(0).max_unification_depth, 1);
        let config: InferenceConfig = serde_json::from_str(r#"{"max_unification_depth": 0}"#).unwrap();
        assert_eq!(config.max_unification_depth, 1);
    }
}
