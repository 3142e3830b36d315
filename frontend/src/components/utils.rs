use yew::prelude::*;

pub fn render_error_message(error: Option<&str>) -> Html {
    if let Some(error_msg) = error {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}

pub fn render_loading(label: &str) -> Html {
    html! {
        <div class="loading">
            <i class="fa-solid fa-spinner fa-spin"></i>
            <p>{ label }</p>
        </div>
    }
}

/// Anchor that navigates without a page load.
pub fn nav_click<T: Clone + 'static>(on_navigate: &Callback<T>, target: T) -> Callback<MouseEvent> {
    let on_navigate = on_navigate.clone();
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        on_navigate.emit(target.clone());
    })
}
