use std::{path::Path, sync::LazyLock};

use regex::Regex;

use crate::domain::recipe_extraction::entities::ExtractedRecipe;

pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

pub const RECIPE_EXTRACTION_PROMPT: &str = r#"
This image shows a cooking recipe (a cookbook page, a handwritten note, a printed recipe card, or similar).
Extract the recipe from the image and output it in the following JSON format.

{
  "title": "dish name",
  "servings": "number of servings (if known)",
  "prepTime": "preparation time (if known)",
  "cookTime": "cooking time (if known)",
  "ingredients": [
    {
      "name": "ingredient name",
      "amount": "quantity",
      "unit": "unit",
      "note": "remark (if any)"
    }
  ],
  "steps": [
    {
      "order": 1,
      "instruction": "what to do",
      "tip": "hint or key point (if any)"
    }
  ],
  "notes": "other notes or warnings",
  "confidence": "how confident the extraction is (high/medium/low)",
  "issues": ["parts that were hard to read or unclear"]
}

Rules:
- Write [unreadable] for characters you cannot read
- For handwriting with ambiguous readings, list the candidates
- Output only the JSON, with no other explanation
"#;

static FENCED_BLOCK: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)```"));

/// Contents of the first fenced code block, trimmed, or the whole text when
/// there is none.
pub fn extract_json_block(text: &str) -> &str {
    let captured = FENCED_BLOCK
        .as_ref()
        .ok()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1));

    match captured {
        Some(block) => block.as_str().trim(),
        None => text,
    }
}

/// Parses the model answer. Any JSON value is accepted as-is.
pub fn parse_extracted_recipe(text: &str) -> Option<ExtractedRecipe> {
    serde_json::from_str(extract_json_block(text))
        .ok()
        .map(ExtractedRecipe)
}

/// MIME type guessed from the file extension.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => DEFAULT_MIME_TYPE,
    }
}

/// Container formats the image codec cannot decode; they are sent untouched.
pub fn is_passthrough_mime_type(mime_type: &str) -> bool {
    matches!(mime_type, "image/heic" | "image/heif")
}
