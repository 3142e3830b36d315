//! Projection of detection boxes onto a rendered image.
//!
//! Boxes are in pixels of the image's natural resolution. The image is drawn
//! `object-fit: contain` inside a container with the same aspect ratio, so a
//! box expressed as percentages of the natural size lands on the same pixels
//! at any display size.

use crate::model::{BoundingBox, Detection, SourceImage};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    /// `None` until the image has decoded and reports a real size.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        (width > 0.0 && height > 0.0).then_some(Self { width, height })
    }
}

/// Rectangle in percent of the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl OverlayRect {
    pub fn project(bbox: &BoundingBox, size: ImageSize) -> Self {
        Self {
            left: 100.0 * bbox.x1() / size.width,
            top: 100.0 * bbox.y1() / size.height,
            width: 100.0 * (bbox.x2() - bbox.x1()) / size.width,
            height: 100.0 * (bbox.y2() - bbox.y1()) / size.height,
        }
    }

    pub fn to_style(&self) -> String {
        format!(
            "left: {}%; top: {}%; width: {}%; height: {}%;",
            self.left, self.top, self.width, self.height
        )
    }
}

/// One box ready to be positioned over the displayed image.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    pub rect: OverlayRect,
    pub class_name: String,
    pub label: String,
    pub tone: &'static str,
}

/// CSS modifier for a defect class.
pub fn class_tone(class_name: &str) -> &'static str {
    match class_name {
        "hole" | "damage" => "tone-rose",
        "tear" => "tone-red",
        "stain" | "pollution" => "tone-orange",
        "pilling" | "attach" => "tone-amber",
        "none" => "tone-zinc",
        _ => "tone-neutral",
    }
}

/// Detections that belong on the image tagged `current`.
pub fn visible_detections(
    detections: &[Detection],
    current: SourceImage,
) -> impl Iterator<Item = &Detection> {
    detections.iter().filter(move |d| d.applies_to(current))
}

/// Overlay for the displayed image. Empty while its natural size is unknown.
pub fn project_detections(
    detections: &[Detection],
    current: SourceImage,
    natural_size: Option<ImageSize>,
) -> Vec<OverlayBox> {
    let Some(size) = natural_size else {
        return Vec::new();
    };

    visible_detections(detections, current)
        .map(|d| OverlayBox {
            rect: OverlayRect::project(&d.bbox, size),
            class_name: d.class_name.clone(),
            label: format!("{} {}", d.class_name, d.confidence_percent()),
            tone: class_tone(&d.class_name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(class_name: &str, source_image: Option<SourceImage>) -> Detection {
        Detection {
            class_name: class_name.into(),
            confidence: 0.874,
            bbox: BoundingBox([100.0, 50.0, 300.0, 150.0]),
            source_image,
        }
    }

    #[test]
    fn projects_pixels_to_percentages() {
        let size = ImageSize::new(1000.0, 500.0).unwrap();
        let rect = OverlayRect::project(&BoundingBox([100.0, 50.0, 300.0, 150.0]), size);
        assert_eq!(
            rect,
            OverlayRect {
                left: 10.0,
                top: 10.0,
                width: 20.0,
                height: 20.0
            }
        );
        assert_eq!(rect.to_style(), "left: 10%; top: 10%; width: 20%; height: 20%;");
    }

    #[test]
    fn unknown_size_defers_projection() {
        assert!(ImageSize::new(0.0, 480.0).is_none());
        let detections = vec![detection("hole", None)];
        assert!(project_detections(&detections, SourceImage::Front, None).is_empty());
    }

    #[test]
    fn filters_by_source_image() {
        let detections = vec![
            detection("stain", Some(SourceImage::Back)),
            detection("hole", None),
            detection("tear", Some(SourceImage::Front)),
        ];
        let size = ImageSize::new(1000.0, 500.0);

        let front = project_detections(&detections, SourceImage::Front, size);
        let classes: Vec<_> = front.iter().map(|b| b.class_name.as_str()).collect();
        assert_eq!(classes, vec!["hole", "tear"]);

        let side = project_detections(&detections, SourceImage::Side, size);
        assert_eq!(side.len(), 1);
        assert_eq!(side[0].label, "hole 87%");
        assert_eq!(side[0].tone, "tone-rose");
    }

    #[test]
    fn unknown_classes_get_neutral_tone() {
        assert_eq!(class_tone("attach"), "tone-amber");
        assert_eq!(class_tone("crease"), "tone-neutral");
    }
}
