use crate::{
    data::{RecordId, Resource},
    error::{InvalidSubmissionTokenSnafu, RegistrarError, RegistrarResult},
    maud_conveniences::{
        error_alert, form_element, form_submit_button, simple_form_element, success_alert, table,
        title,
    },
    routes::sse::{SseEvent, event_name_for},
    screen::{Choices, EntityScreen, Field, FieldKind, FormValues, ScreenMode},
    state::RegistrarState,
    submissions::SubmissionTicket,
};
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::ResultExt;
use uuid::Uuid;

pub const SUBMISSION_FIELD: &str = "submission";
pub const ID_FIELD: &str = "id";

const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";

pub fn crud_routes<S: EntityScreen>() -> Router<RegistrarState> {
    Router::new()
        .route(
            &format!("/{}", S::SLUG),
            get(get_screen::<S>)
                .put(put_record::<S>)
                .delete(delete_record::<S>),
        )
        .route(
            &format!("/internal/{}/rows", S::SLUG),
            get(internal_get_rows::<S>),
        )
        .route(
            &format!("/internal/{}/form", S::SLUG),
            get(internal_get_form::<S>),
        )
}

pub async fn get_screen<S: EntityScreen>(State(state): State<RegistrarState>) -> Markup {
    let slug = S::SLUG;

    state.render(
        &format!("/{slug}"),
        html! {
            div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-5xl w-full flex flex-col space-y-4" {
                div class="flex flex-row items-center justify-between" {
                    (title(S::PLURAL))
                    button class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" hx-get={"/internal/" (slug) "/form"} hx-target="#in_focus" {
                        "Add " (S::SINGULAR)
                    }
                }
                div id="flash" {}
                div sse-connect="/sse_feed" {
                    div id="rows" hx-get={"/internal/" (slug) "/rows"} hx-trigger={"load, sse:" (event_name_for(slug))} {}
                }
                div id="in_focus" {}
            }
        },
    )
}

pub async fn internal_get_rows<S: EntityScreen>(
    State(state): State<RegistrarState>,
) -> RegistrarResult<Markup> {
    render_rows::<S>(&state).await
}

async fn render_rows<S: EntityScreen>(state: &RegistrarState) -> RegistrarResult<Markup> {
    let rows = S::load_rows(state).await?;
    let slug = S::SLUG;

    let mut titles = vec!["ID"];
    titles.extend_from_slice(S::COLUMNS);
    titles.push("Actions");

    let rows = rows
        .iter()
        .map(|row| {
            let id = S::row_id(row);
            let mut cells = vec![html! {(id)}];
            cells.extend(S::row_cells(row));
            cells.push(html! {
                div class="flex flex-row space-x-2" {
                    button class="bg-slate-600 hover:bg-slate-800 font-bold py-1 px-3 rounded" hx-get={"/internal/" (slug) "/form"} hx-vals={"{\"id\": " (id) "}"} hx-target="#in_focus" {
                        "Edit"
                    }
                    button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" hx-delete={"/" (slug)} hx-vals={"{\"id\": " (id) "}"} hx-target="#in_focus" {
                        "Delete"
                    }
                }
            });
            cells
        })
        .collect();

    Ok(table(html! {}, &titles, rows))
}

#[derive(Deserialize)]
pub struct FormQuery {
    pub id: Option<RecordId>,
}

/// Opens the form: blank for "Add", or filled from the record's current values.
pub async fn internal_get_form<S: EntityScreen>(
    State(state): State<RegistrarState>,
    Query(FormQuery { id }): Query<FormQuery>,
) -> RegistrarResult<Markup> {
    let mode = ScreenMode::from_selected(id);

    let (choices, values) = match mode {
        ScreenMode::Creating => (S::load_choices(&state).await?, S::blank_values(&state)),
        ScreenMode::Editing(id) => {
            let client = state.records::<S::Resource>();
            let (choices, record) = tokio::join!(S::load_choices(&state), client.get(id));
            (choices?, S::values_of(&record?))
        }
    };

    Ok(render_form::<S>(mode, &values, &choices))
}

pub fn render_form<S: EntityScreen>(
    mode: ScreenMode,
    values: &FormValues,
    choices: &Choices,
) -> Markup {
    let (heading, submit) = match mode {
        ScreenMode::Creating => (format!("Add {}", S::SINGULAR), "Create"),
        ScreenMode::Editing(_) => (format!("Edit {}", S::SINGULAR), "Update"),
    };
    let token = Uuid::new_v4();

    html! {
        div class="fixed inset-0 bg-black/60 flex items-center justify-center z-10" {
            div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
                (title(heading))
                form hx-put={"/" (S::SLUG)} hx-target="#in_focus" hx-disabled-elt="find button[type='submit']" class="p-4" {
                    div id="form_error" {}
                    @if let Some(id) = mode.selected() {
                        input type="hidden" name=(ID_FIELD) value=(id);
                    }
                    input type="hidden" name=(SUBMISSION_FIELD) value=(token.to_string());

                    @for field in S::FIELDS {
                        (render_field(field, values, choices))
                    }

                    div class="flex items-center justify-between" {
                        button type="button" class="bg-gray-700 hover:bg-gray-600 font-bold py-2 px-4 rounded" hx-get="/internal/dismiss" hx-target="#in_focus" {
                            "Cancel"
                        }
                        (form_submit_button(Some(submit)))
                    }
                }
            }
        }
    }
}

fn render_field(field: &Field, values: &FormValues, choices: &Choices) -> Markup {
    let value = values.get(field.name);

    match field.kind {
        FieldKind::Text => {
            simple_form_element(field.name, field.label, field.required, None, Some(value))
        }
        FieldKind::Email => simple_form_element(
            field.name,
            field.label,
            field.required,
            Some("email"),
            Some(value),
        ),
        FieldKind::Date => simple_form_element(
            field.name,
            field.label,
            field.required,
            Some("date"),
            Some(value),
        ),
        FieldKind::TextArea => form_element(
            field.name,
            field.label,
            html! {
                textarea id=(field.name) name=(field.name) rows="4" required[field.required] class="w-full bg-gray-700 text-gray-100 rounded px-4 py-2 border border-gray-600 focus:outline-none focus:ring focus:ring-blue-500 resize-y" {(value)}
            },
        ),
        FieldKind::Select { placeholder } => {
            let options = choices.get(field.name).map_or(&[][..], Vec::as_slice);
            form_element(
                field.name,
                field.label,
                html! {
                    select id=(field.name) name=(field.name) required[field.required] class=(INPUT_CLASSES) {
                        option value="" {(placeholder)}
                        @for option in options {
                            @let selected = option.value.to_string() == value.trim();
                            option value=(option.value) selected[selected] {(option.label)}
                        }
                    }
                },
            )
        }
    }
}

/// Submits the form: validates locally, then creates or replaces the record.
pub async fn put_record<S: EntityScreen>(
    State(state): State<RegistrarState>,
    Form(mut values): Form<FormValues>,
) -> Response {
    let _ticket = match begin_submission(&state, &mut values) {
        Ok(ticket) => ticket,
        Err(e) => return form_failure(&e),
    };
    let selected = match values.record_id(ID_FIELD, "ID") {
        Ok(selected) => selected,
        Err(e) => return form_failure(&e),
    };
    values.take(ID_FIELD);
    let mode = ScreenMode::from_selected(selected);

    match save::<S>(&state, mode, &values).await {
        Ok(()) => {
            state.send_sse_event(SseEvent::RecordsChanged { slug: S::SLUG });
            after_mutation::<S>(&state, &S::saved_message(mode)).await
        }
        Err(e) => form_failure(&e),
    }
}

/// Every rendered form carries a token; a submission without one is refused.
fn begin_submission(
    state: &RegistrarState,
    values: &mut FormValues,
) -> RegistrarResult<SubmissionTicket> {
    let original = values.take(SUBMISSION_FIELD).unwrap_or_default();
    let token = Uuid::try_parse(original.trim()).context(InvalidSubmissionTokenSnafu {
        original: original.as_str(),
    })?;

    state.submissions().begin(token)
}

async fn save<S: EntityScreen>(
    state: &RegistrarState,
    mode: ScreenMode,
    values: &FormValues,
) -> RegistrarResult<()> {
    S::validate(values)?;
    let draft = S::prepare_draft(state, values).await?;

    let client = state.records::<S::Resource>();
    match mode {
        ScreenMode::Creating => {
            let created = client.create(&draft).await?;
            info!(kind = S::SLUG, id = created.id(), "record created");
        }
        ScreenMode::Editing(id) => {
            client.update(id, &draft).await?;
            info!(kind = S::SLUG, id, "record updated");
        }
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    pub id: RecordId,
    #[serde(default)]
    pub confirmed: bool,
}

/// Without `confirmed=true` this only asks; nothing is sent to the backend.
pub async fn delete_record<S: EntityScreen>(
    State(state): State<RegistrarState>,
    Query(DeleteQuery { id, confirmed }): Query<DeleteQuery>,
) -> RegistrarResult<Response> {
    if !confirmed {
        return Ok(confirm_delete::<S>(id).into_response());
    }

    state.records::<S::Resource>().delete(id).await?;
    info!(kind = S::SLUG, id, "record deleted");
    state.send_sse_event(SseEvent::RecordsChanged { slug: S::SLUG });

    Ok(after_mutation::<S>(&state, &format!("{} deleted", S::SINGULAR)).await)
}

fn confirm_delete<S: EntityScreen>(id: RecordId) -> Markup {
    let noun = S::SINGULAR.to_lowercase();

    html! {
        div class="fixed inset-0 bg-black/60 flex items-center justify-center z-10" {
            div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" role="alertdialog" {
                p class="mb-6" {"Are you sure you want to delete this " (noun) "?"}
                div class="flex items-center justify-between" {
                    button type="button" class="bg-gray-700 hover:bg-gray-600 font-bold py-2 px-4 rounded" hx-get="/internal/dismiss" hx-target="#in_focus" {
                        "Cancel"
                    }
                    button type="button" class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" hx-delete={"/" (S::SLUG)} hx-vals={"{\"id\": " (id) ", \"confirmed\": true}"} hx-target="#in_focus" hx-disabled-elt="this" {
                        "Delete"
                    }
                }
            }
        }
    }
}

/// Closes the form and reloads the whole list, whichever mutation ran.
async fn after_mutation<S: EntityScreen>(state: &RegistrarState, message: &str) -> Response {
    let rows = match render_rows::<S>(state).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(?e, kind = S::SLUG, "reloading rows after a mutation");
            error_alert(e.to_string())
        }
    };

    html! {
        div id="flash" hx-swap-oob="true" {(success_alert(message))}
        div id="rows" hx-swap-oob="innerHTML" {(rows)}
    }
    .into_response()
}

pub async fn internal_dismiss() -> Markup {
    html! {}
}

/// Shows the error inside the still-open form; the entered values stay put.
fn form_failure(e: &RegistrarError) -> Response {
    if e.is_local() {
        warn!(?e, "form rejected");
    } else {
        error!(?e, "saving record");
    }

    (
        e.status_code(),
        [("HX-Retarget", "#form_error"), ("HX-Reswap", "innerHTML")],
        error_alert(e.to_string()),
    )
        .into_response()
}
