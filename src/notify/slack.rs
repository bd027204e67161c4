//! Slack delivery via `chat.postMessage`.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::events::StatusChangeEvent;
use crate::health::state::ConfirmedState;
use crate::notify::sink::{Sink, SinkError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub fallback: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    pub mrkdwn_in: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMessage {
    pub channel: String,
    pub username: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Build the message for one event: `name (url) *STATE*`, coloured by state.
pub fn format_message(channel: &str, bot_name: &str, event: &StatusChangeEvent) -> PostMessage {
    let text = format!(
        "{} ({}) *{}*",
        event.name,
        event.url,
        event.to.as_str().to_uppercase()
    );
    let color = match event.to {
        ConfirmedState::Ok => Some("good"),
        ConfirmedState::Alarm => Some("danger"),
        ConfirmedState::Unknown => None,
    };

    PostMessage {
        channel: channel.to_string(),
        username: bot_name.to_string(),
        text: String::new(),
        attachments: vec![Attachment {
            fallback: text.clone(),
            text,
            color,
            mrkdwn_in: vec!["text"],
        }],
    }
}

/// Posts alerts to a Slack channel.
#[derive(Debug, Clone)]
pub struct SlackSink {
    client: Client,
    endpoint: String,
    token: String,
    channel: String,
    bot_name: String,
}

impl SlackSink {
    pub fn new(
        api_url: &str,
        token: &str,
        channel: &str,
        bot_name: &str,
        timeout: Duration,
    ) -> Result<Self, SinkError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat.postMessage", api_url.trim_end_matches('/')),
            token: token.to_string(),
            channel: channel.to_string(),
            bot_name: bot_name.to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, SinkError> {
        Self::new(
            &config.notifier.api_url,
            &config.slack_token,
            &config.slack_channel,
            &config.bot_name,
            Duration::from_millis(config.notifier.timeout_ms),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Sink for SlackSink {
    async fn deliver(&self, event: &StatusChangeEvent) -> Result<(), SinkError> {
        let message = format_message(&self.channel, &self.bot_name, event);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Status(status.as_u16()));
        }

        let body: ApiResponse = response.json().await?;
        if !body.ok {
            return Err(SinkError::Rejected(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        tracing::debug!(channel = %self.channel, target_name = %event.name, "Alert posted");
        Ok(())
    }
}
