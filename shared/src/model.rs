use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::timestamp::Timestamp;

/// Letter bucket summarizing defect severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    Display, EnumString, EnumIter, AsRefStr,
)]
pub enum Grade {
    S,
    A,
    B,
    F,
}

/// Human reviewer's judgment of which model was right for a task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Verdict {
    GeminiCorrect,
    CustomCorrect,
    BothCorrect,
    BothWrong,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::GeminiCorrect => "Gemini",
            Verdict::CustomCorrect => "Custom model",
            Verdict::BothCorrect => "Both",
            Verdict::BothWrong => "Neither",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Verdict::GeminiCorrect => "Gemini was correct",
            Verdict::CustomCorrect => "The custom model was correct",
            Verdict::BothCorrect => "Both models were correct",
            Verdict::BothWrong => "Both models were wrong",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Verdict::GeminiCorrect => "Gemini correct",
            Verdict::CustomCorrect => "Custom model correct",
            Verdict::BothCorrect => "Both correct",
            Verdict::BothWrong => "Both wrong",
        }
    }

    /// Whether this verdict credits the hosted model.
    pub fn credits_hosted(&self) -> bool {
        matches!(self, Verdict::GeminiCorrect | Verdict::BothCorrect)
    }

    /// Whether this verdict credits the custom detector pipeline.
    pub fn credits_custom(&self) -> bool {
        matches!(self, Verdict::CustomCorrect | Verdict::BothCorrect)
    }
}

/// Logical tag of the inspection image a detection was made on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceImage {
    Front,
    Back,
    Side,
    /// Any tag this client does not know. Never matches a displayed image.
    Other,
}

impl SourceImage {
    /// Inspection images are uploaded front, back, then any number of side shots.
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => SourceImage::Front,
            1 => SourceImage::Back,
            _ => SourceImage::Side,
        }
    }
}

/// Detection box `[x1, y1, x2, y2]` in pixels of the original-resolution image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox(pub [f64; 4]);

impl BoundingBox {
    pub fn x1(&self) -> f64 {
        self.0[0]
    }

    pub fn y1(&self) -> f64 {
        self.0[1]
    }

    pub fn x2(&self) -> f64 {
        self.0[2]
    }

    pub fn y2(&self) -> f64 {
        self.0[3]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x1, y1, x2, y2] = self.0;
        write!(f, "[{}, {}, {}, {}]", x1, y1, x2, y2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    pub confidence: f64,
    pub bbox: BoundingBox,
    #[serde(default, deserialize_with = "tag_or_other")]
    pub source_image: Option<SourceImage>,
}

impl Detection {
    /// `none` is the detector's explicit "nothing found" marker.
    pub fn is_defect(&self) -> bool {
        self.class_name != "none"
    }

    /// Whole percent, halves rounded up.
    pub fn confidence_percent(&self) -> String {
        format!("{}%", (self.confidence * 100.0).round())
    }

    /// A detection without a source tag applies to every image.
    pub fn applies_to(&self, image: SourceImage) -> bool {
        self.source_image.is_none_or(|tag| tag == image)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionDetailItem {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionDetails {
    #[serde(default)]
    pub items: Vec<InspectionDetailItem>,
    #[serde(default)]
    pub summary: String,
}

/// Outcome fields shared by both models.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelResult {
    #[serde(default)]
    pub grade: Option<Grade>,
    #[serde(default)]
    pub grade_reason: Option<String>,
    #[serde(default)]
    pub result_price: Option<f64>,
    #[serde(default)]
    pub total_score: Option<u32>,
    #[serde(default)]
    pub details: Option<InspectionDetails>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub detections: Vec<Detection>,
    #[serde(default)]
    pub inference_time_ms: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ModelResult {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn defects(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter().filter(|d| d.is_defect())
    }
}

/// Result of the hosted vision model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeminiResult {
    #[serde(flatten)]
    pub result: ModelResult,
    #[serde(default)]
    pub gemini_time_ms: Option<f64>,
}

/// Result of the locally built detector + validator pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomResult {
    #[serde(flatten)]
    pub result: ModelResult,
    #[serde(default)]
    pub origin_comparison: Option<OriginComparison>,
    #[serde(default)]
    pub rtdetr_time_ms: Option<f64>,
    #[serde(default)]
    pub qwen_time_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyOriginCheck {
    #[serde(default)]
    pub same_product: Option<bool>,
    #[serde(default)]
    pub defect_in_origin: Option<bool>,
    #[serde(default)]
    pub is_design: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginValidation {
    pub is_valid: bool,
    #[serde(default)]
    pub validation_reason: Option<String>,
}

/// Check of whether a detected defect already existed in the pre-sale images.
///
/// The wire carries two untagged shapes; the newer one is recognized by its
/// `is_valid` key.
#[derive(Debug, Clone, PartialEq)]
pub enum OriginComparison {
    Legacy(LegacyOriginCheck),
    Validation(OriginValidation),
}

impl<'de> Deserialize<'de> for OriginComparison {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_validation = value
            .as_object()
            .map(|fields| fields.contains_key("is_valid"))
            .ok_or_else(|| de::Error::custom("origin comparison must be an object"))?;

        if is_validation {
            serde_json::from_value(value)
                .map(OriginComparison::Validation)
                .map_err(de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(OriginComparison::Legacy)
                .map_err(de::Error::custom)
        }
    }
}

impl Serialize for OriginComparison {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OriginComparison::Legacy(check) => check.serialize(serializer),
            OriginComparison::Validation(validation) => validation.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub task_id: String,
    pub verdict: Verdict,
    pub reviewed_by: String,
    pub reviewed_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSubmitRequest {
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub reviewed_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDetail {
    pub task_id: String,
    pub inspection_id: i64,
    #[serde(default)]
    pub product_id: Option<i64>,
    pub product_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub claim_reason: Option<String>,
    #[serde(default)]
    pub return_reason: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub inspection_image_keys: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub original_image_keys: Vec<String>,
    #[serde(default)]
    pub gemini: GeminiResult,
    #[serde(default)]
    pub custom: CustomResult,
    /// Detector output before the validator stage ran.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub raw_detections: Vec<Detection>,
    #[serde(default)]
    pub grade_match: Option<bool>,
    #[serde(default)]
    pub price_diff: Option<f64>,
    #[serde(default)]
    pub reviewed: bool,
    #[serde(default)]
    pub review: Option<Review>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewListItem {
    pub task_id: String,
    pub inspection_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub gemini_grade: Option<Grade>,
    #[serde(default)]
    pub custom_grade: Option<Grade>,
    #[serde(default)]
    pub grade_match: Option<bool>,
    #[serde(default)]
    pub reviewed: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewListResponse {
    pub items: Vec<ReviewListItem>,
    pub total: u64,
    pub pending_count: u64,
    pub reviewed_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewerStat {
    pub reviewer: String,
    pub total: u64,
    #[serde(default)]
    pub gemini_correct: u64,
    #[serde(default)]
    pub custom_correct: u64,
    #[serde(default)]
    pub both_correct: u64,
    #[serde(default)]
    pub both_wrong: u64,
}

impl ReviewerStat {
    pub fn count(&self, verdict: Verdict) -> u64 {
        match verdict {
            Verdict::GeminiCorrect => self.gemini_correct,
            Verdict::CustomCorrect => self.custom_correct,
            Verdict::BothCorrect => self.both_correct,
            Verdict::BothWrong => self.both_wrong,
        }
    }
}

/// Aggregates computed by the review backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: u64,
    pub reviewed: u64,
    pub pending: u64,
    pub grade_match_count: u64,
    pub grade_match_rate: f64,
    #[serde(default)]
    pub verdict_distribution: HashMap<String, u64>,
    #[serde(default)]
    pub gemini_grade_distribution: HashMap<String, u64>,
    #[serde(default)]
    pub custom_grade_distribution: HashMap<String, u64>,
    #[serde(default)]
    pub reviewer_stats: Vec<ReviewerStat>,
}

fn tag_or_other<'de, D>(deserializer: D) -> Result<Option<SourceImage>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.map(|tag| tag.parse().unwrap_or(SourceImage::Other)))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
