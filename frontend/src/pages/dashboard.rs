use std::rc::Rc;

use shared::format::percent;
use shared::{ApiError, Grade, IntoEnumIterator, StatsSummary, Verdict};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::Services;
use crate::components::badges::{render_grade_badge, render_stat_box};
use crate::components::utils::{render_error_message, render_loading};

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub services: Services,
}

pub enum Msg {
    Loaded(Result<Rc<StatsSummary>, ApiError>),
}

pub struct DashboardPage {
    stats: Option<Rc<StatsSummary>>,
    error: Option<String>,
}

impl Component for DashboardPage {
    type Message = Msg;
    type Properties = DashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let store = ctx.props().services.store.clone();
        let link = ctx.link().clone();
        let stats = store.cached_stats();
        spawn_local(async move {
            link.send_message(Msg::Loaded(store.stats().await));
        });

        Self { stats, error: None }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(stats)) => {
                self.stats = Some(stats);
                self.error = None;
            }
            Msg::Loaded(Err(e)) => self.error = Some(e.to_string()),
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let Some(stats) = &self.stats else {
            return match &self.error {
                Some(error) => render_error_message(Some(error.as_str())),
                None => render_loading("Loading statistics..."),
            };
        };
        let accuracy = stats.accuracy();

        html! {
            <div class="dashboard">
                <h2 class="page-title">{"Dashboard"}</h2>
                { render_error_message(self.error.as_deref()) }
                <div class="stat-grid">
                    { render_stat_box("Total", stats.total.to_string(), "tone-neutral") }
                    { render_stat_box(
                        "Grade match",
                        format!("{}% ({} matched)", stats.grade_match_rate, stats.grade_match_count),
                        "tone-blue",
                    ) }
                    { render_stat_box("Gemini accuracy", percent(accuracy.hosted), "tone-green") }
                    { render_stat_box("Custom accuracy", percent(accuracy.custom), "tone-amber") }
                </div>
                { render_verdicts(stats) }
                <div class="grade-distributions">
                    { render_grade_distribution("Gemini grades", &stats.hosted_grades()) }
                    { render_grade_distribution("Custom model grades", &stats.custom_grades()) }
                </div>
                { render_reviewers(stats) }
            </div>
        }
    }
}

fn render_verdicts(stats: &StatsSummary) -> Html {
    html! {
        <section class="card verdicts">
            <h3>{ format!("Verdicts ({} reviewed)", stats.reviewed) }</h3>
            { for Verdict::iter().map(|verdict| {
                let share = stats.verdict_share(verdict);
                html! {
                    <div class="result-item">
                        <div class="result-label">{ verdict.summary() }</div>
                        <div class="result-bar-container">
                            <div class="result-bar" style={format!("width: {}%", share)}></div>
                        </div>
                        <div class="result-value">
                            { format!("{} ({})", stats.verdict_count(verdict), percent(share)) }
                        </div>
                    </div>
                }
            })}
        </section>
    }
}

fn render_grade_distribution(title: &str, rows: &[(Grade, u64)]) -> Html {
    html! {
        <section class="card grade-distribution">
            <h3>{ title }</h3>
            { for rows.iter().map(|(grade, count)| html! {
                <div class="info-row">
                    { render_grade_badge(Some(*grade)) }
                    <span class="info-value">{ count.to_string() }</span>
                </div>
            })}
        </section>
    }
}

fn render_reviewers(stats: &StatsSummary) -> Html {
    html! {
        <section class="card reviewers">
            <h3>{"Reviewers"}</h3>
            if stats.reviewer_stats.is_empty() {
                <p class="empty-state">{"No reviews yet"}</p>
            } else {
                <table>
                    <thead>
                        <tr>
                            <th>{"Reviewer"}</th>
                            <th>{"Total"}</th>
                            { for Verdict::iter().map(|v| html! { <th>{ v.label() }</th> }) }
                        </tr>
                    </thead>
                    <tbody>
                        { for stats.reviewer_stats.iter().map(|reviewer| html! {
                            <tr>
                                <td>{ &reviewer.reviewer }</td>
                                <td>{ reviewer.total.to_string() }</td>
                                { for Verdict::iter().map(|v| html! {
                                    <td>{ reviewer.count(v).to_string() }</td>
                                })}
                            </tr>
                        })}
                    </tbody>
                </table>
            }
        </section>
    }
}
