//! Twilio WhatsApp delivery of verification pins.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use super::{ensure_success, network_error};
use crate::domain::foundation::DomainError;
use crate::domain::verification::PinCode;
use crate::ports::MessagingChannel;

const SERVICE: &str = "twilio";
const DEFAULT_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: SecretString,
    /// Sender number in E.164 form, without the `whatsapp:` prefix.
    pub from_number: String,
}

pub struct TwilioWhatsAppChannel {
    config: TwilioConfig,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl TwilioWhatsAppChannel {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            config,
            api_base_url: DEFAULT_API_BASE.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Points the client at a different API host.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

fn whatsapp_address(number: &str) -> String {
    format!("whatsapp:{}", number.trim())
}

fn pin_message(pin: &PinCode) -> String {
    format!(
        "Thanks for signing up for FiuFit! 💪\nYour verification pin is *{}*\nEnter this code in our app to activate your account and start training!",
        pin
    )
}

#[async_trait]
impl MessagingChannel for TwilioWhatsAppChannel {
    async fn send_pin(&self, phone_number: &str, pin: &PinCode) -> Result<(), DomainError> {
        let params = [
            ("To", whatsapp_address(phone_number)),
            ("From", whatsapp_address(&self.config.from_number)),
            ("Body", pin_message(pin)),
        ];

        let response = self
            .http_client
            .post(self.messages_url())
            .basic_auth(
                &self.config.account_sid,
                Some(self.config.auth_token.expose_secret()),
            )
            .form(&params)
            .send()
            .await
            .map_err(|e| network_error(SERVICE, e))?;

        ensure_success(SERVICE, response).await?;
        tracing::debug!("Verification pin handed to Twilio");
        Ok(())
    }
}
