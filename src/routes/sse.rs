use crate::state::RegistrarState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

/// Broadcast after every successful mutation so open list views and the
/// dashboard reload themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseEvent {
    RecordsChanged { slug: &'static str },
}

impl SseEvent {
    pub fn name(self) -> String {
        match self {
            Self::RecordsChanged { slug } => event_name_for(slug),
        }
    }
}

pub fn event_name_for(slug: &str) -> String {
    format!("crud_{slug}")
}

pub async fn sse_feed(
    State(state): State<RegistrarState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // a lagging receiver just misses events; the next one reloads everything anyway
    let stream = BroadcastStream::new(state.subscribe_to_sse_feed())
        .filter_map(Result::ok)
        .map(|event| Ok(Event::default().event(event.name()).data("")));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
