use crate::{
    client::RecordsApi,
    config::RuntimeConfiguration,
    error::RegistrarResult,
    maud_conveniences::render_nav,
    routes::sse::SseEvent,
    submissions::InFlightSubmissions,
};
use jiff::civil::Date;
use maud::{DOCTYPE, Markup, html};
use std::ops::Deref;
use tokio::sync::broadcast::{Receiver, Sender, channel};

/// Lets htmx swap error fragments in as well as successes.
const HTMX_CONFIG: &str = r#"{"responseHandling":[{"code":"204","swap":false},{"code":".*","swap":true}]}"#;

#[derive(Clone, Debug)]
pub struct RegistrarState {
    api: RecordsApi,
    config: RuntimeConfiguration,
    sse_events_sender: Sender<SseEvent>,
    submissions: InFlightSubmissions,
}

impl RegistrarState {
    pub fn new(config: RuntimeConfiguration) -> RegistrarResult<Self> {
        let api = RecordsApi::new(config.api_config())?;
        let (tx, _rx) = channel(16);

        Ok(Self {
            api,
            config,
            sse_events_sender: tx,
            submissions: InFlightSubmissions::default(),
        })
    }

    /// Wraps a screen in the page shell, highlighting `current` in the nav bar.
    #[allow(clippy::unused_self)]
    pub fn render(&self, current: &str, markup: Markup) -> Markup {
        let nav = render_nav(current);

        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    meta name="htmx-config" content=(HTMX_CONFIG) {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "University Records" }
                }
                body hx-ext="sse" class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    (nav)
                    (markup)
                }
            }
        }
    }

    pub fn today(&self) -> Date {
        self.config.today()
    }

    pub const fn submissions(&self) -> &InFlightSubmissions {
        &self.submissions
    }

    pub fn subscribe_to_sse_feed(&self) -> Receiver<SseEvent> {
        self.sse_events_sender.subscribe()
    }

    pub fn send_sse_event(&self, event: SseEvent) {
        let _ = self.sse_events_sender.send(event);
    }
}

impl Deref for RegistrarState {
    type Target = RecordsApi;

    fn deref(&self) -> &Self::Target {
        &self.api
    }
}
