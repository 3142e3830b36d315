use shared::Grade;
use yew::prelude::*;

pub fn render_grade_badge(grade: Option<Grade>) -> Html {
    match grade {
        Some(grade) => html! {
            <span class={classes!("grade-badge", format!("grade-{}", grade.as_ref().to_lowercase()))}>
                { grade.to_string() }
            </span>
        },
        None => html! { <span class="grade-badge grade-none">{"-"}</span> },
    }
}

pub fn render_match_badge(grade_match: Option<bool>) -> Html {
    let (class, label) = match grade_match {
        None => ("badge-muted", "Pending"),
        Some(true) => ("badge-success", "Match"),
        Some(false) => ("badge-danger", "Mismatch"),
    };
    html! { <span class={classes!("badge", class)}>{ label }</span> }
}

pub fn render_status_badge(reviewed: bool) -> Html {
    if reviewed {
        html! { <span class="badge badge-success">{"Reviewed"}</span> }
    } else {
        html! { <span class="badge badge-warning">{"Pending"}</span> }
    }
}

pub fn render_stat_box(label: &str, value: String, tone: &'static str) -> Html {
    html! {
        <div class={classes!("stat-box", tone)}>
            <div class="stat-label">{ label }</div>
            <div class="stat-value">{ value }</div>
        </div>
    }
}
