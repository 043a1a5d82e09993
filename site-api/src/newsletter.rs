/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Mailing list subscriptions via Resend audiences.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::NewsletterConfig;

#[derive(Debug, Error)]
pub enum MailingListError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider rejected the contact.
    #[error("Mailing list error ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Adds contacts to a mailing list.
#[async_trait]
pub trait MailingList: Send + Sync {
    async fn subscribe(&self, email: &str) -> Result<(), MailingListError>;
}

#[derive(Debug, Serialize)]
struct CreateContact<'a> {
    email: &'a str,
    unsubscribed: bool,
}

pub struct ResendClient {
    config: NewsletterConfig,
    http: reqwest::Client,
}

impl ResendClient {
    pub fn new(config: NewsletterConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// `POST` target for new contacts in the configured audience.
    pub fn contacts_url(&self) -> String {
        format!(
            "{}/audiences/{}/contacts",
            self.config.api_url.trim_end_matches('/'),
            self.config.audience_id
        )
    }
}

#[async_trait]
impl MailingList for ResendClient {
    async fn subscribe(&self, email: &str) -> Result<(), MailingListError> {
        let resp = self
            .http
            .post(self.contacts_url())
            .bearer_auth(&self.config.api_key)
            .json(&CreateContact {
                email,
                unsubscribed: false,
            })
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(MailingListError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contacts_url_joins_audience() {
        let client = ResendClient::new(NewsletterConfig {
            api_key: "re_123".to_string(),
            audience_id: "aud_9".to_string(),
            api_url: "https://api.resend.com/".to_string(),
        });
        assert_eq!(
            client.contacts_url(),
            "https://api.resend.com/audiences/aud_9/contacts"
        );
    }

    #[test]
    fn contact_body_is_subscribed() {
        let body = serde_json::to_value(CreateContact {
            email: "ada@example.com",
            unsubscribed: false,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "email": "ada@example.com", "unsubscribed": false })
        );
    }
}
