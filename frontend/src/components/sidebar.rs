use shared::Route;
use yew::prelude::*;

use super::utils::nav_click;

/// Renders the navigation sidebar
pub fn render_sidebar(route: &Route, on_navigate: &Callback<Route>) -> Html {
    let link = |target: Route, icon: &'static str, label: &'static str| {
        let active = match (&target, route) {
            (Route::Reviews, Route::ReviewDetail(_)) => true,
            (target, route) => target == route,
        };
        html! {
            <a
                href={target.to_path()}
                class={classes!("nav-link", active.then_some("active"))}
                onclick={nav_click(on_navigate, target.clone())}
            >
                <i class={classes!("fa-solid", icon)}></i>
                <span>{ label }</span>
            </a>
        }
    };

    html! {
        <aside class="sidebar">
            <header class="app-header">
                <h1>{"Inspection Review"}</h1>
                <p class="subtitle">{"Gemini vs. custom model"}</p>
            </header>
            <nav>
                { link(Route::Reviews, "fa-list-check", "Reviews") }
                { link(Route::Dashboard, "fa-chart-column", "Dashboard") }
            </nav>
        </aside>
    }
}
