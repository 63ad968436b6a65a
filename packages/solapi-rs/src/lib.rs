// https://developers.solapi.com/references/messages/sendManyDetail

use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

const SEND_URL: &str = "https://api.solapi.com/messages/v4/send";

#[derive(Debug, Clone)]
pub struct SolapiOptions {
    pub api_key: String,
    pub api_secret: String,
    /// Registered sender number, digits only.
    pub from_number: String,
}

#[derive(Debug, Clone)]
pub struct SolapiService {
    options: SolapiOptions,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    message: MessagePayload<'a>,
}

#[derive(Serialize)]
struct MessagePayload<'a> {
    to: String,
    from: String,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    #[serde(rename = "messageId")]
    pub message_id: Option<String>,
    #[serde(rename = "statusCode")]
    pub status_code: Option<String>,
    #[serde(rename = "statusMessage")]
    pub status_message: Option<String>,
}

impl SolapiService {
    pub fn new(options: SolapiOptions) -> Self {
        Self { options }
    }

    /// Short text message (under 90 bytes on the Korean carriers).
    pub async fn send_sms(&self, to: &str, text: &str) -> Result<SendResponse, &'static str> {
        self.send(to, text, None).await
    }

    /// Long message with a subject line (LMS).
    pub async fn send_lms(
        &self,
        to: &str,
        text: &str,
        subject: &str,
    ) -> Result<SendResponse, &'static str> {
        self.send(to, text, Some(subject)).await
    }

    async fn send(
        &self,
        to: &str,
        text: &str,
        subject: Option<&str>,
    ) -> Result<SendResponse, &'static str> {
        let body = SendRequest {
            message: MessagePayload {
                to: to.replace('-', ""),
                from: self.options.from_number.replace('-', ""),
                text,
                subject,
            },
        };

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            self.auth_header()
                .parse()
                .expect("Header value should parse correctly"),
        );

        let client = Client::new();
        let res = client
            .post(SEND_URL)
            .headers(headers)
            .json(&body)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Solapi error ({}): {}", status, error_body);
                    return Err("Solapi returned an error");
                }

                match response.json::<SendResponse>().await {
                    Ok(data) => Ok(data),
                    Err(e) => {
                        eprintln!("Failed to parse Solapi response: {}", e);
                        Err("Error parsing send response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Solapi failed: {}", e);
                Err("Error sending SMS")
            }
        }
    }

    /// HMAC-SHA256 request signature per the Solapi auth scheme:
    /// sign(date + salt) with the API secret.
    fn auth_header(&self) -> String {
        let date = Utc::now().to_rfc3339();
        let salt = uuid::Uuid::new_v4().simple().to_string();

        let mut mac = Hmac::<Sha256>::new_from_slice(self.options.api_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(date.as_bytes());
        mac.update(salt.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        format!(
            "HMAC-SHA256 apiKey={}, date={}, salt={}, signature={}",
            self.options.api_key, date, salt, signature
        )
    }
}
