use crate::{
    dashboard::load_counts,
    maud_conveniences::{subtitle, title},
    routes::sse::event_name_for,
    screen::EntityScreen,
    screens::{Courses, Enrollments, Students, Teachers},
    state::RegistrarState,
};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RegistrarState>) -> Markup {
    let triggers = [
        Students::SLUG,
        Teachers::SLUG,
        Courses::SLUG,
        Enrollments::SLUG,
    ]
    .into_iter()
    .fold("load".to_string(), |acc, slug| {
        format!("{acc}, sse:{}", event_name_for(slug))
    });

    state.render(
        "/",
        html! {
            div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-5xl w-full flex flex-col space-y-4" {
                (title("Dashboard"))
                div sse-connect="/sse_feed" {
                    div id="dashboard" hx-get="/internal/dashboard" hx-trigger=(triggers) {}
                }
            }
        },
    )
}

pub async fn internal_get_dashboard(State(state): State<RegistrarState>) -> Markup {
    let counts = load_counts(&state).await;

    html! {
        div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-4 gap-4" {
            @for (label, href, count) in counts.tiles() {
                a href=(href) class="flex flex-col items-center rounded-lg shadow-md p-4 bg-gray-700 hover:bg-gray-600" {
                    (subtitle(label))
                    @match count {
                        Ok(count) => {
                            p class="text-4xl font-bold" data-count=(label) {(count)}
                        },
                        Err(e) => {
                            p class="text-4xl font-bold text-gray-500" title=(e.to_string()) {"-"}
                            p class="text-sm italic text-gray-400" {"unavailable"}
                        },
                    }
                }
            }
        }
    }
}
