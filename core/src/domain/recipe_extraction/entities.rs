use std::{str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::common::entities::app_errors::CoreError;

/// Models the extraction utility can target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionModel {
    #[default]
    Flash,
    Lite,
    Gemini20Flash,
}

impl ExtractionModel {
    pub const CHOICES: [&'static str; 3] = ["flash", "lite", "2.0"];

    pub fn model_name(&self) -> &'static str {
        match self {
            ExtractionModel::Flash => "gemini-2.5-flash",
            ExtractionModel::Lite => "gemini-2.5-flash-lite",
            ExtractionModel::Gemini20Flash => "gemini-2.0-flash",
        }
    }

    /// Only the 2.5 series accepts a thinking budget.
    pub fn supports_thinking_config(&self) -> bool {
        !matches!(self, ExtractionModel::Gemini20Flash)
    }
}

impl FromStr for ExtractionModel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flash" => Ok(ExtractionModel::Flash),
            "lite" => Ok(ExtractionModel::Lite),
            "2.0" => Ok(ExtractionModel::Gemini20Flash),
            other => Err(CoreError::Invalid(format!(
                "unknown model '{}', expected one of: {}",
                other,
                Self::CHOICES.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageOptions {
    pub max_width: u32,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            max_width: 1600,
            quality: 80,
        }
    }
}

/// Result of preprocessing. Both variants are usable images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizedImage {
    Optimized { bytes: Vec<u8>, mime_type: String },
    PassThrough { bytes: Vec<u8>, mime_type: String },
}

impl OptimizedImage {
    pub fn bytes(&self) -> &[u8] {
        match self {
            OptimizedImage::Optimized { bytes, .. } | OptimizedImage::PassThrough { bytes, .. } => {
                bytes
            }
        }
    }

    pub fn mime_type(&self) -> &str {
        match self {
            OptimizedImage::Optimized { mime_type, .. }
            | OptimizedImage::PassThrough { mime_type, .. } => mime_type,
        }
    }

    pub fn is_optimized(&self) -> bool {
        matches!(self, OptimizedImage::Optimized { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageStats {
    pub original_size: usize,
    pub optimized_size: usize,
    pub mime_type: String,
    pub optimized: bool,
}

impl ImageStats {
    pub fn new(original_size: usize, image: &OptimizedImage) -> Self {
        Self {
            original_size,
            optimized_size: image.bytes().len(),
            mime_type: image.mime_type().to_string(),
            optimized: image.is_optimized(),
        }
    }

    /// Size reduction in percent; negative when the output grew.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.optimized_size as f64 / self.original_size as f64) * 100.0
    }
}

/// Recipe object exactly as the model produced it. Accessors are lenient
/// and only used for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedRecipe(pub Value);

impl ExtractedRecipe {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn title(&self) -> Option<&str> {
        self.0
            .get("title")
            .and_then(Value::as_str)
            .filter(|title| !title.is_empty())
    }

    pub fn ingredient_count(&self) -> usize {
        self.array_len("ingredients")
    }

    pub fn step_count(&self) -> usize {
        self.array_len("steps")
    }

    pub fn confidence(&self) -> Option<&str> {
        self.0
            .get("confidence")
            .and_then(Value::as_str)
            .filter(|confidence| !confidence.is_empty())
    }

    pub fn issues(&self) -> Vec<String> {
        self.0
            .get("issues")
            .and_then(Value::as_array)
            .map(|issues| {
                issues
                    .iter()
                    .map(|issue| match issue {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn array_len(&self, key: &str) -> usize {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub image: ImageStats,
    /// Time spent waiting on the model.
    pub elapsed: Duration,
    pub raw_text: String,
    /// `None` when the response held no parsable JSON; `raw_text` then has the answer.
    pub recipe: Option<ExtractedRecipe>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }

    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|method| method == "generateContent")
    }
}
