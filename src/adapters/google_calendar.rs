//! Google Calendar v3 client with service-account authentication.
//!
//! Auth: OAuth2 JWT-bearer exchange using a service-account key file.
//! Endpoint: POST /calendars/{calendarId}/events

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::{CreatedEvent, EventSpec};

use super::CalendarApi;

const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";
const API_BASE: &str = "https://www.googleapis.com/calendar/v3";
const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Relevant fields of a Google service-account key file
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: String,
}

/// JWT claims for the token exchange
#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Response from the token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Wire form of an event, matching the events.insert request body
#[derive(Debug, Clone, Serialize)]
pub struct EventPayload {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
}

/// Wire form of an event boundary
#[derive(Debug, Clone, Serialize)]
pub struct EventTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

impl EventPayload {
    /// Serialize an event spec into the calendar API's shape
    pub fn from_spec(spec: &EventSpec) -> Self {
        Self {
            summary: spec.name.clone(),
            start: EventTime {
                date_time: spec.start.to_rfc3339(),
                time_zone: spec.timezone_id().to_string(),
            },
            end: EventTime {
                date_time: spec.end.to_rfc3339(),
                time_zone: spec.timezone_id().to_string(),
            },
        }
    }
}

/// Response from events.insert
#[derive(Debug, Deserialize)]
struct InsertResponse {
    id: String,
    #[serde(rename = "htmlLink")]
    html_link: Option<String>,
}

/// Google Calendar API client
pub struct GoogleCalendarClient {
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    http: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleCalendarClient {
    /// Load a service-account key file and perform the initial token
    /// exchange.
    ///
    /// A missing or invalid key file, or a rejected exchange, errors
    /// here — callers treat that as startup-fatal rather than deferring
    /// the failure to the first submission.
    pub async fn connect(credentials_path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(credentials_path)
            .await
            .with_context(|| {
                format!("Failed to read credentials file: {}", credentials_path.display())
            })?;

        let key: ServiceAccountKey =
            serde_json::from_str(&raw).context("Credentials file is not a service-account key")?;

        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .context("Invalid private key in credentials file")?;

        let client = Self {
            key,
            signing_key,
            http: reqwest::Client::new(),
            token: Mutex::new(None),
        };

        client
            .refresh_token()
            .await
            .context("Initial token exchange failed")?;

        Ok(client)
    }

    /// Exchange a signed JWT assertion for a fresh access token
    async fn refresh_token(&self) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: CALENDAR_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
            .context("Failed to sign token request")?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await
            .context("Token request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Token endpoint error ({}): {}", status, body);
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        let access_token = token.access_token.clone();
        *self.token.lock().await = Some(CachedToken {
            token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        });

        Ok(access_token)
    }

    /// Current access token, refreshed when within a minute of expiry
    async fn access_token(&self) -> Result<String> {
        if let Some(cached) = self.token.lock().await.as_ref() {
            if cached.expires_at > Utc::now() + Duration::seconds(60) {
                return Ok(cached.token.clone());
            }
        }
        self.refresh_token().await
    }
}

#[async_trait]
impl CalendarApi for GoogleCalendarClient {
    async fn insert_event(&self, calendar_id: &str, event: &EventSpec) -> Result<CreatedEvent> {
        let token = self.access_token().await?;
        let url = format!("{}/calendars/{}/events", API_BASE, calendar_id);
        let payload = EventPayload::from_spec(event);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .context("Calendar request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Calendar API error ({}): {}", status, body);
        }

        let inserted: InsertResponse = response
            .json()
            .await
            .context("Failed to parse calendar response")?;

        Ok(CreatedEvent {
            id: inserted.id,
            html_link: inserted.html_link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Karachi;

    fn spec() -> EventSpec {
        let start = Karachi.with_ymd_and_hms(2024, 1, 16, 17, 0, 0).unwrap();
        EventSpec {
            name: "Team sync".to_string(),
            start,
            end: start + Duration::hours(1),
            timezone: Karachi,
        }
    }

    #[test]
    fn test_payload_shape() {
        let payload = EventPayload::from_spec(&spec());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["summary"], "Team sync");
        assert_eq!(json["start"]["dateTime"], "2024-01-16T17:00:00+05:00");
        assert_eq!(json["start"]["timeZone"], "Asia/Karachi");
        assert_eq!(json["end"]["dateTime"], "2024-01-16T18:00:00+05:00");
        assert_eq!(json["end"]["timeZone"], "Asia/Karachi");
    }

    #[test]
    fn test_insert_response_parsing() {
        let inserted: InsertResponse = serde_json::from_str(
            r#"{"id": "abc123", "htmlLink": "https://www.google.com/calendar/event?eid=abc123", "status": "confirmed"}"#,
        )
        .unwrap();
        assert_eq!(inserted.id, "abc123");
        assert!(inserted.html_link.unwrap().contains("eid=abc123"));
    }
}
