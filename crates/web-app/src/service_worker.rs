use std::collections::HashMap;

use chrono::NaiveDateTime;
use fitme_domain::{REMINDER_LEAD_TIME, Reminder};
use wasm_bindgen::JsValue;

pub const REMINDER_TITLE: &str = "Workout Reminder";

#[derive(serde::Serialize, Debug, PartialEq)]
#[serde(tag = "task", content = "content")]
pub enum Message {
    UpdateCache,
    ShowNotification {
        title: String,
        options: HashMap<String, String>,
    },
    CloseNotifications,
}

impl From<&Reminder> for Message {
    fn from(reminder: &Reminder) -> Self {
        Message::ShowNotification {
            title: REMINDER_TITLE.to_string(),
            options: HashMap::from([
                (
                    "body".to_string(),
                    format!(
                        "Your workout \"{}\" is in {} minutes!",
                        reminder.name,
                        REMINDER_LEAD_TIME.num_minutes()
                    ),
                ),
                ("tag".to_string(), reminder.instance_id.to_string()),
            ]),
        }
    }
}

/// Show a notification for every reminder that is due at `now`.
///
/// Returns the number of posted reminders.
#[allow(clippy::missing_errors_doc)]
pub fn notify_due_reminders(reminders: &[Reminder], now: NaiveDateTime) -> Result<usize, String> {
    let due = reminders.iter().filter(|r| r.at <= now).collect::<Vec<_>>();
    for reminder in &due {
        post(&Message::from(*reminder))?;
    }
    Ok(due.len())
}

fn to_js(message: &Message) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(message)
        .map_err(|err| format!("failed to prepare message for service worker: {err}"))
}

#[allow(clippy::missing_errors_doc)]
pub fn post(message: &Message) -> Result<(), String> {
    let Some(window) = web_sys::window() else {
        return Err("failed to get window".to_string());
    };
    let Some(service_worker) = window.navigator().service_worker().controller() else {
        return Err("failed to get service worker".to_string());
    };
    service_worker
        .post_message(&to_js(message)?)
        .map_err(|err| format!("failed to post message to service worker: {err:?}"))
}
