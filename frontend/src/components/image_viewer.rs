use gloo_events::EventListener;
use shared::IntoEnumIterator;
use shared::overlay::{ImageSize, project_detections};
use shared::views::viewer::image_label;
use shared::views::{ImageViewerState, InspectionTab};
use shared::{AppConfig, Detection, ReviewDetail, SourceImage};
use web_sys::HtmlImageElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DetectionImageProps {
    pub src: AttrValue,
    pub detections: Vec<Detection>,
    pub source_image: SourceImage,
}

/// Loads `src` off-screen to learn its natural size, then overlays the
/// detections that belong to `source_image`.
///
/// Nothing is overlaid until the size is known. Changing `src` drops the
/// pending probe, so a late load of the previous image cannot resize the
/// overlay of the current one.
#[function_component(DetectionImage)]
pub fn detection_image(props: &DetectionImageProps) -> Html {
    let natural_size = use_state(|| None::<ImageSize>);

    {
        let natural_size = natural_size.clone();
        use_effect_with(props.src.clone(), move |src| {
            natural_size.set(None);
            let listener = probe_natural_size(src, natural_size);
            move || drop(listener)
        });
    }

    let boxes = project_detections(&props.detections, props.source_image, *natural_size);
    let frame_style = (*natural_size).map(|size| format!("aspect-ratio: {} / {};", size.width, size.height));

    html! {
        <div class="image-frame" style={frame_style}>
            <img class="inspection-image" src={props.src.clone()} alt="inspection" />
            { for boxes.iter().map(|b| html! {
                <div class={classes!("bbox", b.tone)} style={b.rect.to_style()}>
                    <span class="bbox-label">{ &b.label }</span>
                </div>
            })}
        </div>
    }
}

fn probe_natural_size(
    src: &str,
    natural_size: UseStateHandle<Option<ImageSize>>,
) -> Option<EventListener> {
    let image = match HtmlImageElement::new() {
        Ok(image) => image,
        Err(e) => {
            log::error!("could not create image probe: {:?}", e);
            return None;
        }
    };

    let probe = image.clone();
    let listener = EventListener::new(&image, "load", move |_| {
        let size = ImageSize::new(f64::from(probe.natural_width()), f64::from(probe.natural_height()));
        if size.is_none() {
            log::warn!("image {} reported no size", probe.src());
        }
        natural_size.set(size);
    });
    image.set_src(src);
    Some(listener)
}

pub fn render_image_viewer(
    detail: &ReviewDetail,
    viewer: ImageViewerState,
    config: &AppConfig,
    on_tab: &Callback<InspectionTab>,
    on_select: &Callback<usize>,
) -> Html {
    let active = viewer.tab();
    let keys = active.image_keys(detail);
    let selected = viewer.index(keys.len());

    let tabs = InspectionTab::iter().map(|tab| {
        let label = if tab.shows_original() {
            tab.label().to_string()
        } else {
            format!("{} ({})", tab.label(), tab.detections(detail).len())
        };
        let on_tab = on_tab.clone();
        html! {
            <button
                class={classes!("tab", (tab == active).then_some("active"))}
                onclick={move |_| on_tab.emit(tab)}
            >
                { label }
            </button>
        }
    });

    let main_image = match viewer.current_key(detail) {
        Some(key) => html! {
            <DetectionImage
                src={config.image_url(key)}
                detections={viewer.detections(detail).to_vec()}
                source_image={viewer.source_image(detail)}
            />
        },
        None => html! { <p class="no-images">{"No images"}</p> },
    };

    let thumbnails = keys.iter().enumerate().map(|(i, key)| {
        let on_select = on_select.clone();
        html! {
            <button
                class={classes!("thumbnail", (Some(i) == selected).then_some("selected"))}
                onclick={move |_| on_select.emit(i)}
            >
                <img src={config.image_url(key)} alt={image_label(key, i)} />
                <span>{ image_label(key, i) }</span>
            </button>
        }
    });

    html! {
        <section class="card image-viewer">
            <div class="tabs">{ for tabs }</div>
            { main_image }
            <div class="thumbnails">{ for thumbnails }</div>
        </section>
    }
}
