use strum_macros::{Display, EnumIter};

use crate::model::{Detection, ReviewDetail, SourceImage};

/// Which image sequence is shown and whose detections are overlaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum InspectionTab {
    #[default]
    Original,
    RawDetector,
    Hosted,
    Custom,
}

impl InspectionTab {
    pub fn label(&self) -> &'static str {
        match self {
            InspectionTab::Original => "Original",
            InspectionTab::RawDetector => "RT-DETR raw",
            InspectionTab::Hosted => "Gemini",
            InspectionTab::Custom => "Custom model",
        }
    }

    pub fn shows_original(&self) -> bool {
        matches!(self, InspectionTab::Original)
    }

    /// Detections overlaid on this tab. The original product shots carry none.
    pub fn detections<'a>(&self, detail: &'a ReviewDetail) -> &'a [Detection] {
        match self {
            InspectionTab::Original => &[],
            InspectionTab::RawDetector => &detail.raw_detections,
            InspectionTab::Hosted => &detail.gemini.result.detections,
            InspectionTab::Custom => &detail.custom.result.detections,
        }
    }

    pub fn image_keys<'a>(&self, detail: &'a ReviewDetail) -> &'a [String] {
        if self.shows_original() {
            &detail.original_image_keys
        } else {
            &detail.inspection_image_keys
        }
    }
}

/// Tabbed image viewer state.
///
/// The original and inspection sequences keep their own selected index across
/// tab switches. Indices are stored raw and wrapped against the sequence length
/// when read, so a shorter sequence never yields an out-of-range key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageViewerState {
    tab: InspectionTab,
    original_index: usize,
    inspection_index: usize,
}

impl ImageViewerState {
    pub fn tab(&self) -> InspectionTab {
        self.tab
    }

    pub fn with_tab(self, tab: InspectionTab) -> Self {
        Self { tab, ..self }
    }

    /// Selects image `index` of the sequence shown on the active tab.
    pub fn select(self, index: usize) -> Self {
        if self.tab.shows_original() {
            Self {
                original_index: index,
                ..self
            }
        } else {
            Self {
                inspection_index: index,
                ..self
            }
        }
    }

    fn raw_index(&self) -> usize {
        if self.tab.shows_original() {
            self.original_index
        } else {
            self.inspection_index
        }
    }

    /// Selected index wrapped into `0..len`; `None` for an empty sequence.
    pub fn index(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.raw_index() % len)
    }

    pub fn current_key<'a>(&self, detail: &'a ReviewDetail) -> Option<&'a str> {
        let keys = self.tab.image_keys(detail);
        self.index(keys.len()).map(|i| keys[i].as_str())
    }

    /// Logical tag of the displayed inspection image.
    pub fn source_image(&self, detail: &ReviewDetail) -> SourceImage {
        let len = self.tab.image_keys(detail).len();
        SourceImage::for_index(self.index(len).unwrap_or(0))
    }

    pub fn detections<'a>(&self, detail: &'a ReviewDetail) -> &'a [Detection] {
        self.tab.detections(detail)
    }
}

/// Thumbnail caption for image `index` of a sequence.
pub fn image_label(key: &str, index: usize) -> String {
    let lower = key.to_lowercase();
    if lower.contains("front") {
        "Front".to_string()
    } else if lower.contains("back") {
        "Back".to_string()
    } else {
        (index + 1).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, CustomResult, GeminiResult, ModelResult};
    use crate::timestamp::Timestamp;

    fn detection(class_name: &str) -> Detection {
        Detection {
            class_name: class_name.into(),
            confidence: 0.9,
            bbox: BoundingBox([0.0, 0.0, 10.0, 10.0]),
            source_image: None,
        }
    }

    fn model(detections: Vec<Detection>) -> ModelResult {
        ModelResult {
            grade: None,
            grade_reason: None,
            result_price: None,
            total_score: None,
            details: None,
            detections,
            inference_time_ms: None,
            error: None,
        }
    }

    fn detail() -> ReviewDetail {
        ReviewDetail {
            task_id: "t-1".into(),
            inspection_id: 7,
            product_id: None,
            product_name: "Coat".into(),
            category: "outer".into(),
            original_price: None,
            claim_reason: None,
            return_reason: None,
            inspection_image_keys: vec!["i/front.jpg".into(), "i/back.jpg".into(), "i/3.jpg".into()],
            original_image_keys: vec!["o/1.jpg".into(), "o/2.jpg".into()],
            gemini: GeminiResult {
                result: model(vec![detection("stain")]),
                gemini_time_ms: None,
            },
            custom: CustomResult {
                result: model(vec![detection("hole"), detection("tear")]),
                origin_comparison: None,
                rtdetr_time_ms: None,
                qwen_time_ms: None,
            },
            raw_detections: vec![detection("pilling")],
            grade_match: None,
            price_diff: None,
            reviewed: false,
            review: None,
            created_at: Timestamp::parse("2025-01-02T03:04:05").unwrap(),
        }
    }

    #[test]
    fn tabs_pick_detection_sets() {
        let detail = detail();
        let classes = |tab: InspectionTab| {
            tab.detections(&detail)
                .iter()
                .map(|d| d.class_name.clone())
                .collect::<Vec<_>>()
        };
        assert!(classes(InspectionTab::Original).is_empty());
        assert_eq!(classes(InspectionTab::RawDetector), vec!["pilling"]);
        assert_eq!(classes(InspectionTab::Hosted), vec!["stain"]);
        assert_eq!(classes(InspectionTab::Custom), vec!["hole", "tear"]);
    }

    #[test]
    fn index_wraps_when_switching_to_shorter_sequence() {
        let detail = detail();
        let state = ImageViewerState::default()
            .with_tab(InspectionTab::Hosted)
            .select(2);
        assert_eq!(state.current_key(&detail), Some("i/3.jpg"));
        assert_eq!(state.source_image(&detail), SourceImage::Side);

        // the original sequence keeps its own selection
        let original = state.with_tab(InspectionTab::Original);
        assert_eq!(original.current_key(&detail), Some("o/1.jpg"));

        let wrapped = original.select(2);
        assert_eq!(wrapped.current_key(&detail), Some("o/1.jpg"));
        assert_eq!(wrapped.index(2), Some(0));
    }

    #[test]
    fn selection_is_shared_by_inspection_tabs() {
        let detail = detail();
        let state = ImageViewerState::default()
            .with_tab(InspectionTab::Custom)
            .select(1);
        assert_eq!(state.source_image(&detail), SourceImage::Back);
        let raw = state.with_tab(InspectionTab::RawDetector);
        assert_eq!(raw.current_key(&detail), Some("i/back.jpg"));
    }

    #[test]
    fn empty_sequence_has_no_key() {
        let mut detail = detail();
        detail.original_image_keys.clear();
        let state = ImageViewerState::default().select(4);
        assert_eq!(state.current_key(&detail), None);
        assert_eq!(state.index(0), None);
    }

    #[test]
    fn labels_prefer_side_names() {
        assert_eq!(image_label("x/FRONT_1.jpg", 0), "Front");
        assert_eq!(image_label("x/back.png", 1), "Back");
        assert_eq!(image_label("x/detail.png", 2), "3");
    }
}
