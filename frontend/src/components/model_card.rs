use shared::format::{self, or_absent};
use shared::grading::{GRADE_LEGEND, grade_detections};
use shared::{
    Detection, LegacyOriginCheck, ModelResult, OriginComparison, OriginValidation, ReviewDetail,
};
use yew::prelude::*;

use super::badges::render_grade_badge;

pub fn render_product_card(detail: &ReviewDetail) -> Html {
    let row = |label: &str, value: String| {
        html! {
            <div class="info-row">
                <span class="info-label">{ label }</span>
                <span class="info-value">{ value }</span>
            </div>
        }
    };

    html! {
        <section class="card product-card">
            <h2>{ &detail.product_name }</h2>
            { row("Inspection", format!("#{}", detail.inspection_id)) }
            { row("Price", format::price(detail.original_price)) }
            { row("Category", or_absent(Some(detail.category.as_str())).to_string()) }
            { row("Claim reason", or_absent(detail.claim_reason.as_deref()).to_string()) }
            { row("Return reason", or_absent(detail.return_reason.as_deref()).to_string()) }
            { row("Created", detail.created_at.date_time()) }
        </section>
    }
}

fn render_defect_chips(result: &ModelResult) -> Html {
    let defects: Vec<&Detection> = result.defects().collect();
    if defects.is_empty() {
        return html! { <p class="no-defects">{"No defects"}</p> };
    }
    html! {
        <div class="chips">
            { for defects.iter().map(|d| html! {
                <span class={classes!("chip", shared::overlay::class_tone(&d.class_name))}>
                    { format!("{} {}", d.class_name, d.confidence_percent()) }
                </span>
            })}
        </div>
    }
}

/// One model's outcome. A model that failed on this task shows only its
/// error; the rest of the page stays usable.
pub fn render_model_card(
    title: &str,
    result: &ModelResult,
    timings: &[(&str, Option<f64>)],
    extra: Html,
) -> Html {
    if let Some(error) = &result.error {
        return html! {
            <section class="card model-card model-failed">
                <h3>{ title }</h3>
                <div class="error-message">
                    <i class="fa-solid fa-triangle-exclamation"></i>
                    <p>{ error }</p>
                </div>
            </section>
        };
    }

    html! {
        <section class="card model-card">
            <div class="model-card-header">
                <h3>{ title }</h3>
                { render_grade_badge(result.grade) }
            </div>
            <div class="info-row">
                <span class="info-label">{"Result price"}</span>
                <span class="info-value">{ format::price(result.result_price) }</span>
            </div>
            if let Some(reason) = &result.grade_reason {
                <p class="grade-reason">{ reason }</p>
            }
            <div class="score-panel">
                <span class="score">
                    { result.total_score.map(|s| s.to_string()).unwrap_or_else(|| format::ABSENT.to_string()) }
                </span>
                <span class="legend">{ GRADE_LEGEND }</span>
            </div>
            { render_defect_chips(result) }
            if let Some(details) = &result.details {
                <div class="inspection-details">
                    { for details.items.iter().map(|item| html! {
                        <div class="detail-item">
                            <strong>{ &item.title }</strong>
                            <p>{ &item.content }</p>
                        </div>
                    })}
                    if !details.summary.is_empty() {
                        <p class="detail-summary">{ &details.summary }</p>
                    }
                </div>
            }
            { extra }
            <div class="timings">
                { for timings.iter().map(|(label, ms)| html! {
                    <span class="timing">{ format!("{}: {}", label, format::seconds(*ms)) }</span>
                })}
            </div>
        </section>
    }
}

fn tri_state(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => format::ABSENT,
    }
}

pub fn render_origin_comparison(comparison: Option<&OriginComparison>) -> Html {
    match comparison {
        None => html! {},
        Some(OriginComparison::Validation(OriginValidation {
            is_valid,
            validation_reason,
        })) => html! {
            <div class={classes!("origin-check", if *is_valid { "valid" } else { "invalid" })}>
                <h4>{"Origin validation"}</h4>
                <p>{ if *is_valid { "Defect is new" } else { "Defect already present in original" } }</p>
                if let Some(reason) = validation_reason {
                    <p class="reason">{ reason }</p>
                }
            </div>
        },
        Some(OriginComparison::Legacy(LegacyOriginCheck {
            same_product,
            defect_in_origin,
            is_design,
            reason,
        })) => html! {
            <div class="origin-check legacy">
                <h4>{"Origin comparison"}</h4>
                <div class="info-row">
                    <span class="info-label">{"Same product"}</span>
                    <span class="info-value">{ tri_state(*same_product) }</span>
                </div>
                <div class="info-row">
                    <span class="info-label">{"Defect in original"}</span>
                    <span class="info-value">{ tri_state(*defect_in_origin) }</span>
                </div>
                <div class="info-row">
                    <span class="info-label">{"Design feature"}</span>
                    <span class="info-value">{ tri_state(*is_design) }</span>
                </div>
                if let Some(reason) = reason {
                    <p class="reason">{ reason }</p>
                }
            </div>
        },
    }
}

pub fn render_raw_detections(detections: &[Detection]) -> Html {
    html! {
        <section class="card raw-detections">
            <h3>{ format!("RT-DETR raw detections ({})", detections.len()) }</h3>
            if detections.is_empty() {
                <p class="no-defects">{"No detections"}</p>
            } else {
                <table>
                    <thead>
                        <tr><th>{"Class"}</th><th>{"Confidence"}</th><th>{"Box"}</th><th>{"Image"}</th></tr>
                    </thead>
                    <tbody>
                        { for detections.iter().map(|d| html! {
                            <tr>
                                <td>{ &d.class_name }</td>
                                <td>{ d.confidence_percent() }</td>
                                <td class="mono">{ d.bbox.to_string() }</td>
                                <td>{ d.source_image.map(|s| s.to_string()).unwrap_or_else(|| "all".to_string()) }</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            }
        </section>
    }
}

/// Raw detector grade (scored here) next to both model grades.
pub fn render_grade_comparison(detail: &ReviewDetail) -> Html {
    let raw = grade_detections(&detail.raw_detections);
    html! {
        <section class="card grade-comparison">
            <div class="grade-cell">
                <span class="grade-title">{"RT-DETR raw"}</span>
                { render_grade_badge(Some(raw.grade)) }
                <span class="score">{ format!("{} pts", raw.total_score) }</span>
            </div>
            <div class="grade-cell">
                <span class="grade-title">{"Gemini"}</span>
                { render_grade_badge(detail.gemini.result.grade) }
            </div>
            <div class="grade-cell">
                <span class="grade-title">{"Custom model"}</span>
                { render_grade_badge(detail.custom.result.grade) }
            </div>
            if let Some(diff) = detail.price_diff {
                <div class="grade-cell">
                    <span class="grade-title">{"Price gap"}</span>
                    <span>{ format::price_diff(Some(diff)) }</span>
                </div>
            }
        </section>
    }
}
