use std::rc::Rc;

use shared::form::ReviewForm;
use shared::views::{ImageViewerState, InspectionTab};
use shared::{ApiError, Review, ReviewDetail, Route, Verdict};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::Services;
use crate::components::image_viewer::render_image_viewer;
use crate::components::model_card::{
    render_grade_comparison, render_model_card, render_origin_comparison, render_product_card,
    render_raw_detections,
};
use crate::components::review_form::{render_review_form, render_review_summary};
use crate::components::utils::{render_error_message, render_loading};

#[derive(Properties, PartialEq)]
pub struct ReviewDetailProps {
    pub services: Services,
    pub task_id: String,
    pub on_navigate: Callback<Route>,
}

pub enum Msg {
    Loaded(String, Result<Rc<ReviewDetail>, ApiError>),
    SelectTab(InspectionTab),
    SelectImage(usize),
    SetVerdict(Verdict),
    SetComment(String),
    SetReviewer(String),
    Submit,
    Submitted(String, Result<Review, ApiError>),
    Skip,
}

pub struct ReviewDetailPage {
    detail: Option<Rc<ReviewDetail>>,
    error: Option<String>,
    viewer: ImageViewerState,
    form: ReviewForm,
}

impl Component for ReviewDetailPage {
    type Message = Msg;
    type Properties = ReviewDetailProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut page = Self {
            detail: None,
            error: None,
            viewer: ImageViewerState::default(),
            form: ReviewForm::default(),
        };
        page.fetch(ctx);
        page
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().task_id != old_props.task_id {
            self.viewer = ImageViewerState::default();
            self.form = ReviewForm::default();
            self.error = None;
            self.fetch(ctx);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let task_id = &ctx.props().task_id;
        match msg {
            Msg::Loaded(for_task, result) => {
                if &for_task != task_id {
                    log::debug!("discarding detail of {} while showing {}", for_task, task_id);
                    return false;
                }
                match result {
                    Ok(detail) => {
                        self.detail = Some(detail);
                        self.error = None;
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
                true
            }
            Msg::SelectTab(tab) => {
                self.viewer = self.viewer.with_tab(tab);
                true
            }
            Msg::SelectImage(index) => {
                self.viewer = self.viewer.select(index);
                true
            }
            Msg::SetVerdict(verdict) => {
                self.form.verdict = Some(verdict);
                true
            }
            Msg::SetComment(comment) => {
                self.form.comment = comment;
                true
            }
            Msg::SetReviewer(name) => {
                self.form.reviewer_name = name;
                true
            }
            Msg::Submit => self.submit(ctx),
            Msg::Submitted(for_task, result) => {
                if &for_task != task_id {
                    return false;
                }
                match result {
                    Ok(_) => {
                        self.form.succeed();
                        ctx.props().on_navigate.emit(Route::Reviews);
                    }
                    Err(e) => self.form.fail(e.to_string()),
                }
                true
            }
            Msg::Skip => {
                ctx.props().on_navigate.emit(Route::Reviews);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(detail) = &self.detail else {
            return match &self.error {
                Some(error) => render_error_message(Some(error.as_str())),
                None => render_loading("Loading inspection..."),
            };
        };

        let link = ctx.link();
        let services = &ctx.props().services;

        html! {
            <div class="review-detail">
                <div class="detail-header">
                    <button class="btn btn-secondary" onclick={link.callback(|_| Msg::Skip)}>
                        <i class="fa-solid fa-arrow-left"></i>{" Back"}
                    </button>
                    <h2 class="page-title">{ format!("Inspection #{}", detail.inspection_id) }</h2>
                </div>
                { render_error_message(self.error.as_deref()) }
                <div class="detail-grid">
                    <div class="detail-main">
                        { render_image_viewer(
                            detail,
                            self.viewer,
                            &services.config,
                            &link.callback(Msg::SelectTab),
                            &link.callback(Msg::SelectImage),
                        ) }
                        { render_grade_comparison(detail) }
                        { render_raw_detections(&detail.raw_detections) }
                    </div>
                    <div class="detail-side">
                        { render_product_card(detail) }
                        { render_model_card(
                            "Gemini",
                            &detail.gemini.result,
                            &[
                                ("Total", detail.gemini.result.inference_time_ms),
                                ("Gemini", detail.gemini.gemini_time_ms),
                            ],
                            html! {},
                        ) }
                        { render_model_card(
                            "Custom model",
                            &detail.custom.result,
                            &[
                                ("Total", detail.custom.result.inference_time_ms),
                                ("RT-DETR", detail.custom.rtdetr_time_ms),
                                ("Qwen", detail.custom.qwen_time_ms),
                            ],
                            render_origin_comparison(detail.custom.origin_comparison.as_ref()),
                        ) }
                        { self.render_review(ctx, detail) }
                    </div>
                </div>
            </div>
        }
    }
}

impl ReviewDetailPage {
    fn fetch(&mut self, ctx: &Context<Self>) {
        let task_id = ctx.props().task_id.clone();
        let store = ctx.props().services.store.clone();

        self.detail = store.cached_review(&task_id);

        let link = ctx.link().clone();
        spawn_local(async move {
            let result = store.review(&task_id).await;
            link.send_message(Msg::Loaded(task_id, result));
        });
    }

    fn submit(&mut self, ctx: &Context<Self>) -> bool {
        let reviewed = self.detail.as_ref().is_some_and(|d| d.reviewed);
        let request = match self.form.begin_submit(reviewed) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("review not submitted: {}", e);
                return false;
            }
        };

        let task_id = ctx.props().task_id.clone();
        let store = ctx.props().services.store.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = store.submit_review(&task_id, &request).await;
            link.send_message(Msg::Submitted(task_id, result));
        });
        true
    }

    fn render_review(&self, ctx: &Context<Self>, detail: &ReviewDetail) -> Html {
        match (&detail.review, detail.reviewed) {
            (Some(review), _) => render_review_summary(review),
            (None, true) => html! {
                <section class="card review-summary">
                    <p>{"This task has already been reviewed."}</p>
                </section>
            },
            (None, false) => render_review_form(&self.form, ctx.link()),
        }
    }
}
