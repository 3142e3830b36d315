use std::rc::Rc;

use shared::format;
use shared::views::list::{page_button_count, progress_percent};
use shared::views::{ListState, PAGE_SIZE, ReviewFilter};
use shared::{ApiError, IntoEnumIterator, ReviewListItem, ReviewListResponse, Route};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::Services;
use crate::components::badges::{
    render_grade_badge, render_match_badge, render_stat_box, render_status_badge,
};
use crate::components::utils::{nav_click, render_error_message, render_loading};

#[derive(Properties, PartialEq)]
pub struct ReviewsPageProps {
    pub services: Services,
    pub on_navigate: Callback<Route>,
}

pub enum Msg {
    SetFilter(ReviewFilter),
    SetPage(u32),
    Loaded(ListState, Result<Rc<ReviewListResponse>, ApiError>),
}

pub struct ReviewsPage {
    list: ListState,
    data: Option<Rc<ReviewListResponse>>,
    loading: bool,
    error: Option<String>,
}

impl Component for ReviewsPage {
    type Message = Msg;
    type Properties = ReviewsPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut page = Self {
            list: ListState::default(),
            data: None,
            loading: false,
            error: None,
        };
        page.fetch(ctx);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetFilter(filter) => {
                if filter == self.list.filter() {
                    return false;
                }
                self.list = self.list.with_filter(filter);
                self.fetch(ctx);
                true
            }
            Msg::SetPage(page) => {
                if page == self.list.page() {
                    return false;
                }
                self.list = self.list.with_page(page);
                self.fetch(ctx);
                true
            }
            Msg::Loaded(list, result) => {
                if list != self.list {
                    log::debug!("discarding list response for {:?}", list);
                    return false;
                }
                self.loading = false;
                match result {
                    Ok(data) => {
                        self.data = Some(data);
                        self.error = None;
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="reviews-page">
                <h2 class="page-title">{"Reviews"}</h2>
                { self.render_stats() }
                { self.render_filter_tabs(ctx) }
                { render_error_message(self.error.as_deref()) }
                { self.render_table(ctx) }
                { self.render_pagination(ctx) }
            </div>
        }
    }
}

impl ReviewsPage {
    fn fetch(&mut self, ctx: &Context<Self>) {
        let list = self.list;
        let query = list.query();
        let store = ctx.props().services.store.clone();

        // show whatever is cached while the request runs
        self.data = store.cached_reviews(&query);
        self.loading = true;

        let link = ctx.link().clone();
        spawn_local(async move {
            let result = store.reviews(&query).await;
            link.send_message(Msg::Loaded(list, result));
        });
    }

    fn render_stats(&self) -> Html {
        let Some(data) = &self.data else {
            return html! {};
        };
        html! {
            <div class="stat-grid">
                { render_stat_box("Total", data.total.to_string(), "tone-neutral") }
                { render_stat_box("Pending", data.pending_count.to_string(), "tone-amber") }
                { render_stat_box("Reviewed", data.reviewed_count.to_string(), "tone-green") }
                { render_stat_box("Progress", format!("{}%", progress_percent(data)), "tone-blue") }
            </div>
        }
    }

    fn render_filter_tabs(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="tabs">
                { for ReviewFilter::iter().map(|filter| html! {
                    <button
                        class={classes!("tab", (filter == self.list.filter()).then_some("active"))}
                        onclick={ctx.link().callback(move |_| Msg::SetFilter(filter))}
                    >
                        { filter.label() }
                    </button>
                })}
            </div>
        }
    }

    fn render_row(&self, ctx: &Context<Self>, item: &ReviewListItem) -> Html {
        let target = Route::ReviewDetail(item.task_id.clone());
        html! {
            <tr>
                <td>{ format!("#{}", item.inspection_id) }</td>
                <td>
                    <a href={target.to_path()} onclick={nav_click(&ctx.props().on_navigate, target.clone())}>
                        { &item.product_name }
                    </a>
                </td>
                <td>{ format::price(item.original_price) }</td>
                <td>{ render_grade_badge(item.gemini_grade) }</td>
                <td>{ render_grade_badge(item.custom_grade) }</td>
                <td>{ render_match_badge(item.grade_match) }</td>
                <td>{ render_status_badge(item.reviewed) }</td>
                <td class="created-at">
                    <span>{ item.created_at.date() }</span>
                    <span class="time">{ item.created_at.time() }</span>
                </td>
            </tr>
        }
    }

    fn render_table(&self, ctx: &Context<Self>) -> Html {
        let Some(data) = &self.data else {
            return if self.loading && self.error.is_none() {
                render_loading("Loading reviews...")
            } else {
                html! {}
            };
        };

        html! {
            <table class="review-table">
                <thead>
                    <tr>
                        <th>{"Inspection"}</th>
                        <th>{"Product"}</th>
                        <th>{"Price"}</th>
                        <th>{"Gemini"}</th>
                        <th>{"Custom"}</th>
                        <th>{"Grade match"}</th>
                        <th>{"Status"}</th>
                        <th>{"Created"}</th>
                    </tr>
                </thead>
                <tbody>
                    if data.items.is_empty() {
                        <tr><td colspan="8" class="empty-state">{"No reviews to show"}</td></tr>
                    } else {
                        { for data.items.iter().map(|item| self.render_row(ctx, item)) }
                    }
                </tbody>
            </table>
        }
    }

    fn render_pagination(&self, ctx: &Context<Self>) -> Html {
        let Some(data) = &self.data else {
            return html! {};
        };
        let total = data.total;
        let page = self.list.page();
        let link = ctx.link();

        html! {
            <div class="pagination">
                <span class="showing">
                    { format!("Showing {} of {}", data.items.len(), total) }
                </span>
                <button
                    class="btn"
                    disabled={!self.list.has_previous()}
                    onclick={link.callback(move |_| Msg::SetPage(page.saturating_sub(1)))}
                >
                    {"Previous"}
                </button>
                { for (0..page_button_count(total) as u32).map(|n| html! {
                    <button
                        class={classes!("btn", "page", (n == page).then_some("active"))}
                        onclick={link.callback(move |_| Msg::SetPage(n))}
                    >
                        { (n + 1).to_string() }
                    </button>
                })}
                <button
                    class="btn"
                    disabled={!self.list.has_next(total)}
                    onclick={link.callback(move |_| Msg::SetPage(page + 1))}
                >
                    {"Next"}
                </button>
                <span class="page-size">{ format!("{} per page", PAGE_SIZE) }</span>
            </div>
        }
    }
}
