mod api;
mod components;
mod config;
mod pages;

use std::rc::Rc;

use gloo_events::EventListener;
use shared::{AppConfig, QueryCache, ReviewStore, Route};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use api::ApiClient;
use components::sidebar::render_sidebar;
use components::utils::render_loading;
use pages::{DashboardPage, ReviewDetailPage, ReviewsPage};

/// Everything a page needs to reach the review API and the image host.
/// Created once at start-up; clones share the cache.
#[derive(Clone)]
pub struct Services {
    pub store: Rc<ReviewStore<ApiClient>>,
    pub config: Rc<AppConfig>,
}

impl Services {
    fn new(config: AppConfig) -> Self {
        let config = Rc::new(config);
        let api = ApiClient::new(config.clone());
        Self {
            store: Rc::new(ReviewStore::new(api, QueryCache::default())),
            config,
        }
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && Rc::ptr_eq(&self.config, &other.config)
    }
}

pub enum Msg {
    ConfigLoaded(AppConfig),
    Navigate(Route),
    RouteChanged(Route),
}

pub struct Model {
    route: Route,
    services: Option<Services>,
    popstate_listener: Option<EventListener>,
}

fn current_route() -> Route {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .map(|path| Route::parse(&path))
        .unwrap_or(Route::Reviews)
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ConfigLoaded(config::load_config().await));
        });

        let popstate_listener = web_sys::window().map(|window| {
            let link = ctx.link().clone();
            EventListener::new(&window, "popstate", move |_| {
                link.send_message(Msg::RouteChanged(current_route()));
            })
        });

        Self {
            route: current_route(),
            services: None,
            popstate_listener,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ConfigLoaded(config) => {
                self.services = Some(Services::new(config));
                true
            }
            Msg::Navigate(route) => {
                if route == self.route {
                    return false;
                }
                if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                    let path = route.to_path();
                    if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path)) {
                        log::warn!("could not push {}: {:?}", path, e);
                    }
                }
                self.route = route;
                true
            }
            Msg::RouteChanged(route) => {
                let changed = route != self.route;
                self.route = route;
                changed
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_navigate = ctx.link().callback(Msg::Navigate);

        html! {
            <div class="layout">
                { render_sidebar(&self.route, &on_navigate) }
                <main class="main-content">
                    { self.render_page(on_navigate.clone()) }
                </main>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.popstate_listener.take();
    }
}

impl Model {
    fn render_page(&self, on_navigate: Callback<Route>) -> Html {
        let Some(services) = self.services.clone() else {
            return render_loading("Loading settings...");
        };

        match &self.route {
            Route::Reviews => html! {
                <ReviewsPage {services} {on_navigate} />
            },
            Route::ReviewDetail(task_id) => html! {
                <ReviewDetailPage {services} task_id={task_id.clone()} {on_navigate} />
            },
            Route::Dashboard => html! {
                <DashboardPage {services} />
            },
            Route::NotFound => html! {
                <div class="not-found">
                    <h2>{"Page not found"}</h2>
                    <button class="btn" onclick={move |_| on_navigate.emit(Route::Reviews)}>
                        {"Back to reviews"}
                    </button>
                </div>
            },
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Review dashboard starting...");
    yew::Renderer::<Model>::new().render();
}
