// https://resend.com/docs/api-reference/emails/send-email

use reqwest::Client;
use serde::{Deserialize, Serialize};

const SEND_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone)]
pub struct ResendService {
    api_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    #[serde(rename = "reply_to", skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailResponse {
    pub id: String,
}

impl ResendService {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<SendEmailResponse, &'static str> {
        let client = Client::new();
        let res = client
            .post(SEND_URL)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Resend error ({}): {}", status, error_body);
                    return Err("Resend returned an error");
                }

                match response.json::<SendEmailResponse>().await {
                    Ok(data) => Ok(data),
                    Err(e) => {
                        eprintln!("Failed to parse Resend response: {}", e);
                        Err("Error parsing send response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Resend failed: {}", e);
                Err("Error sending email")
            }
        }
    }
}
