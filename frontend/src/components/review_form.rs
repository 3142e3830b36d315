use shared::form::ReviewForm;
use shared::{IntoEnumIterator, Review, Verdict};
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::utils::render_error_message;
use crate::pages::review_detail::{Msg, ReviewDetailPage};

pub fn render_review_form(form: &ReviewForm, link: &Scope<ReviewDetailPage>) -> Html {
    let options = Verdict::iter().map(|verdict| {
        html! {
            <label class={classes!("verdict-option", (form.verdict == Some(verdict)).then_some("selected"))}>
                <input
                    type="radio"
                    name="verdict"
                    value={verdict.as_ref().to_string()}
                    checked={form.verdict == Some(verdict)}
                    disabled={form.submitting()}
                    onchange={link.callback(move |_| Msg::SetVerdict(verdict))}
                />
                <span class="radio-label-text">{ verdict.label() }</span>
                <span class="verdict-description">{ verdict.description() }</span>
            </label>
        }
    });

    let on_comment = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetComment(input.value())
    });
    let on_reviewer = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetReviewer(input.value())
    });

    html! {
        <section class="card review-form">
            <h3>{"Which model was correct?"}</h3>
            <div class="verdict-options">{ for options }</div>
            <label class="field">
                <span>{"Comment (optional)"}</span>
                <input
                    type="text"
                    value={form.comment.clone()}
                    disabled={form.submitting()}
                    oninput={on_comment}
                />
            </label>
            <label class="field">
                <span>{"Reviewer"}</span>
                <input
                    type="text"
                    placeholder="Your name"
                    value={form.reviewer_name.clone()}
                    disabled={form.submitting()}
                    oninput={on_reviewer}
                />
            </label>
            { render_error_message(form.error()) }
            <div class="button-container">
                <button class="btn btn-secondary" onclick={link.callback(|_| Msg::Skip)}>
                    {"Skip"}
                </button>
                <button
                    class="btn btn-primary"
                    disabled={!form.can_submit()}
                    onclick={link.callback(|_| Msg::Submit)}
                >
                    if form.submitting() {
                        <><i class="fa-solid fa-spinner fa-spin"></i>{" Submitting..."}</>
                    } else {
                        {"Submit review"}
                    }
                </button>
            </div>
        </section>
    }
}

/// Read-only verdict of a reviewed task.
pub fn render_review_summary(review: &Review) -> Html {
    html! {
        <section class="card review-summary">
            <h3>{"Review"}</h3>
            <p class="verdict">{ review.verdict.summary() }</p>
            if let Some(comment) = &review.comment {
                <p class="comment">{ comment }</p>
            }
            <p class="reviewer">
                { format!("{} · {}", review.reviewed_by, review.reviewed_at.date_time()) }
            </p>
        </section>
    }
}
