//! EmailJS REST mailer.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, instrument};
use wayfarer_error::{HttpError, UpstreamError, WayfarerResult};
use wayfarer_interface::Mailer;

const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

// The template historically read the recipient under several names; all
// three are populated.
#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    to_email: &'a str,
    to: &'a str,
    user_email: &'a str,
    image_url: &'a str,
}

/// EmailJS mailer sending the summary image URL to the visitor.
#[derive(Debug, Clone)]
pub struct EmailJsMailer {
    client: Client,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsMailer {
    /// Creates a new mailer for the given EmailJS service/template/key.
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
        }
    }
}

#[async_trait]
impl Mailer for EmailJsMailer {
    #[instrument(skip(self, image_url), fields(service = %self.service_id))]
    async fn send_image(&self, to: &str, image_url: &str) -> WayfarerResult<()> {
        let body = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: TemplateParams {
                to_email: to,
                to,
                user_email: to,
                image_url,
            },
        };

        let response = self
            .client
            .post(EMAILJS_SEND_URL)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send email request");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "EmailJS returned error");
            return Err(UpstreamError::new(status, body).into());
        }

        debug!("Email dispatched");
        Ok(())
    }
}
