use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::error::{BuildError, Result, TranslateError};
use crate::model::config::TranslatorSettings;

pub const GOOGLE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Translates one string. Implementations must be usable from several
/// language units at once.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError>;
}

pub fn from_settings(settings: &TranslatorSettings) -> Result<Box<dyn Translator>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .user_agent(settings.user_agent.clone())
        .build()
        .map_err(|e| BuildError::Config(format!("failed to build http client: {e}")))?;

    match settings.provider.as_str() {
        "google" => Ok(Box::new(GoogleTranslator::new(client))),
        provider => {
            let endpoint = endpoint_for(provider)
                .map_err(|e| BuildError::Config(e.to_string()))?;
            Ok(Box::new(ChatTranslator {
                client,
                endpoint,
                api_key: settings.api_key.clone(),
                model: settings.model.clone(),
            }))
        }
    }
}

pub fn endpoint_for(provider: &str) -> Result<&'static str, TranslateError> {
    match provider {
        "openai" => Ok("https://api.openai.com/v1/chat/completions"),
        "deepseek" => Ok("https://api.deepseek.com/v1/chat/completions"),
        _ => Err(TranslateError::UnsupportedProvider(provider.to_string())),
    }
}

/// The keyless web endpoint used by browser translate widgets.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: Client) -> Self {
        GoogleTranslator {
            client,
            endpoint: GOOGLE_ENDPOINT.to_string(),
        }
    }
}

impl Translator for GoogleTranslator {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("dt", "t"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("q", text),
            ])
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }

        parse_google_response(&body)
    }
}

/// `[[["<translated>", "<original>", ...], ...], ...]` -> joined segments.
pub fn parse_google_response(body: &str) -> Result<String, TranslateError> {
    let v: Value = serde_json::from_str(body)
        .map_err(|_| TranslateError::InvalidResponse("invalid JSON from translate endpoint".into()))?;

    let segments = v
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| TranslateError::InvalidResponse("missing sentence list".into()))?;

    let mut out = String::new();
    for seg in segments {
        if let Some(t) = seg.get(0).and_then(|t| t.as_str()) {
            out.push_str(t);
        }
    }

    Ok(out)
}

/// Chat-completions providers (OpenAI, DeepSeek).
pub struct ChatTranslator {
    client: Client,
    endpoint: &'static str,
    api_key: String,
    model: String,
}

impl Translator for ChatTranslator {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": "You are a professional translator of software license summaries. Reply with the translation only." },
                { "role": "user", "content": build_prompt(text, source_lang, target_lang) }
            ],
            "temperature": 0.3
        });

        let resp = self
            .client
            .post(self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = resp.status();
        // Read as text first so an error body is not lost on a JSON failure.
        let text = resp.text()?;

        if !status.is_success() {
            return Err(http_error(status, &text));
        }

        parse_chat_response(&text)
    }
}

pub fn parse_chat_response(body: &str) -> Result<String, TranslateError> {
    let v: Value = serde_json::from_str(body)
        .map_err(|_| TranslateError::InvalidResponse("invalid JSON from AI".into()))?;

    v.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|t| t.trim().to_string())
        .ok_or_else(|| {
            TranslateError::InvalidResponse("missing choices[0].message.content".into())
        })
}

fn http_error(status: StatusCode, body: &str) -> TranslateError {
    TranslateError::Status {
        status,
        message: extract_error_message(body),
    }
}

/// `{ "error": { "message": .. } }` or `{ "message": .. }`, else a body snippet.
fn extract_error_message(body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    match trimmed.char_indices().nth(400) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

fn build_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    let mut p = String::new();

    p.push_str(&format!("Translate from {source_lang} to {target_lang}.\n"));
    p.push_str("Text:\n");
    p.push_str(text.trim());

    p
}
