use std::{thread, time::Duration};

use {reqwest::blocking::Client, serde::Serialize};

use crate::{catalog::Tour, config};

const EVENT_NAME: &str = "book_now_click";
const EVENT_CATEGORY: &str = "tour_engagement";
const CURRENCY: &str = "USD";

// The payload posted when a booking call-to-action is activated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BookingEvent {
    pub event: &'static str,
    pub category: &'static str,
    pub label: String,
    pub tour_id: String,
    pub value: f64,
    pub currency: &'static str,
}

impl From<&Tour> for BookingEvent {
    fn from(tour: &Tour) -> Self {
        BookingEvent {
            event: EVENT_NAME,
            category: EVENT_CATEGORY,
            label: tour.name.clone(),
            tour_id: tour.id.clone(),
            value: tour.price.unwrap_or(0.0),
            currency: CURRENCY,
        }
    }
}

// A fire-and-forget reporter for booking clicks. Without a configured
// endpoint every call is a silent no-op; with one, events are posted from a
// detached thread and the result is discarded.
pub struct Analytics {
    endpoint: Option<String>,
}

impl Analytics {
    pub fn new(endpoint: Option<String>) -> Self {
        Analytics { endpoint }
    }

    pub fn book_click(&self, tour: &Tour) {
        let Some(endpoint) = self.endpoint.clone() else {
            return;
        };
        let event = BookingEvent::from(tour);

        thread::spawn(move || {
            let Ok(client) = Client::builder()
                .user_agent(config::USER_AGENT)
                .timeout(Duration::from_secs(5))
                .build()
            else {
                return;
            };

            _ = client.post(&endpoint).json(&event).send();
        });
    }
}
