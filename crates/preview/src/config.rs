//! Tunables for the preview layer, loadable from TOML.
//!
//! Every section has defaults matching the live admin site, so an empty file (or no file)
//! is a valid config.

use crate::error::ConfigError;
use core_types::PageKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    pub weight: WeightConfig,
    pub carousel: CarouselSettings,
    pub annotator: AnnotatorConfig,
    /// Keyed by page name (`"hero"`, `"image-upload"`, ...).
    pub pages: HashMap<String, PageOverrides>,
}

impl PreviewConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Whether the binding rendering into `target` is switched off for `kind`.
    pub fn is_disabled(&self, kind: PageKind, target: &str) -> bool {
        self.pages
            .get(kind.as_str())
            .is_some_and(|p| p.disabled_bindings.iter().any(|t| t == target))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeightConfig {
    pub kg_to_lbs: f64,
    /// Decimals shown for the pound figure.
    pub decimals: usize,
    pub unavailable_text: String,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            kg_to_lbs: 2.20462,
            decimals: 1,
            unavailable_text: "Weight: N/A".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarouselSettings {
    pub interval_ms: u64,
    pub pause_on_hover: bool,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            pause_on_hover: true,
        }
    }
}

impl CarouselSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Element whose text is the JSON record array.
    pub payload_element: String,
    pub select: String,
    /// Record field matched against option values.
    pub key_field: String,
    pub fields: Vec<FieldMapping>,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            payload_element: "litter-data-for-js".to_string(),
            select: "featured_puppy".to_string(),
            key_field: "id".to_string(),
            fields: vec![
                FieldMapping::new("mom_name", "data-mom-name"),
                FieldMapping::new("dad_name", "data-dad-name"),
                FieldMapping::new("birth_date", "data-birth-date"),
            ],
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FieldMapping {
    pub field: String,
    pub attribute: String,
}

impl FieldMapping {
    pub fn new(field: &str, attribute: &str) -> Self {
        Self {
            field: field.to_string(),
            attribute: attribute.to_string(),
        }
    }

    /// The `{field}` token this mapping fills in templates.
    pub fn token(&self) -> String {
        format!("{{{}}}", self.field)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageOverrides {
    /// Target element ids whose bindings are not installed.
    pub disabled_bindings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_site_defaults() {
        let cfg = PreviewConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, PreviewConfig::default());
        assert_eq!(cfg.weight.kg_to_lbs, 2.20462);
        assert_eq!(cfg.carousel.interval(), Duration::from_secs(5));
        assert_eq!(cfg.annotator.fields[0].token(), "{mom_name}");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = PreviewConfig::from_toml_str(
            r#"
            [weight]
            decimals = 2

            [pages.review]
            disabled_bindings = ["preview-author-name"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.weight.decimals, 2);
        assert_eq!(cfg.weight.unavailable_text, "Weight: N/A");
        assert!(cfg.is_disabled(PageKind::Review, "preview-author-name"));
        assert!(!cfg.is_disabled(PageKind::Hero, "preview-author-name"));
    }

    #[test]
    fn rejects_wrong_types() {
        let err = PreviewConfig::from_toml_str("[carousel]\ninterval_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
