use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

/// Client for the public MyMemory `/get` endpoint
#[derive(Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
    email: Option<String>,
}

impl MyMemoryTranslator {
    pub fn new(
        api_url: String,
        email: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url,
            email,
        })
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::EmptyText);
        }

        let langpair = format!("{from}|{to}");
        let mut params = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = self.email.as_deref() {
            params.push(("de", email));
        }

        tracing::debug!("MyMemory request {langpair}, {} chars", text.len());

        let response = self.client.get(&self.api_url).query(&params).send().await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: MyMemoryResponse = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let text = body.into_text()?;

        Ok(Translation {
            text,
            from,
            to,
            provider: "mymemory".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "MyMemory".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: Option<ResponseData>,
    #[serde(default)]
    response_status: Value,
    #[serde(default)]
    response_details: Value,
    /// Array of memory matches, an empty string on some error responses
    #[serde(default)]
    matches: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

/// A match with the numeric id `0` is the provider's own pick. String ids
/// such as `"0"` belong to translation memory entries.
fn is_primary(id: &Value) -> bool {
    id.as_u64() == Some(0)
}

impl MyMemoryResponse {
    /// The translated text. Each id-0 match overrides `translatedText`, so
    /// the last one wins.
    fn into_text(self) -> Result<String, TranslateError> {
        let status = match &self.response_status {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };

        if status.is_some_and(|s| s != 200) {
            let details = match self.response_details {
                Value::String(s) if !s.is_empty() => s,
                Value::Null => format!("status {}", self.response_status),
                other => other.to_string(),
            };
            return Err(TranslateError::ApiError(details));
        }

        let primary = self
            .matches
            .as_array()
            .into_iter()
            .flatten()
            .filter(|m| m.get("id").is_some_and(is_primary))
            .filter_map(|m| m.get("translation").and_then(Value::as_str))
            .last()
            .map(str::to_string);

        primary
            .or_else(|| self.response_data.and_then(|d| d.translated_text))
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn parse(json: &str) -> Result<String, TranslateError> {
        serde_json::from_str::<MyMemoryResponse>(json)
            .unwrap()
            .into_text()
    }

    #[test]
    fn plain_response_uses_translated_text() {
        let text = parse(
            r#"{"responseData":{"translatedText":"Hola","match":1},"responseStatus":200,"matches":[]}"#,
        )
        .unwrap();
        assert_eq!(text, "Hola");
    }

    #[test]
    fn last_primary_match_wins() {
        let text = parse(
            r#"{
                "responseData": {"translatedText": "machine"},
                "responseStatus": 200,
                "matches": [
                    {"id": 0, "translation": "first"},
                    {"id": 812, "translation": "memory"},
                    {"id": 0, "translation": "second"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(text, "second");
    }

    #[test]
    fn string_zero_id_is_not_the_primary_match() {
        let text = parse(
            r#"{
                "responseData": {"translatedText": "machine"},
                "responseStatus": 200,
                "matches": [{"id": "0", "translation": "memory"}]
            }"#,
        )
        .unwrap();
        assert_eq!(text, "machine");
    }

    #[test]
    fn error_status_surfaces_details() {
        let err = parse(
            r#"{"responseData":{"translatedText":"INVALID LANGUAGE PAIR"},"responseStatus":"403","responseDetails":"'XX' IS AN INVALID TARGET LANGUAGE"}"#,
        )
        .unwrap_err();
        match err {
            TranslateError::ApiError(details) => assert!(details.contains("INVALID TARGET")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn string_matches_field_is_tolerated() {
        let text = parse(
            r#"{"responseData":{"translatedText":"Bonjour"},"responseStatus":200,"matches":""}"#,
        )
        .unwrap();
        assert_eq!(text, "Bonjour");
    }

    #[test]
    fn missing_text_is_an_error() {
        let err = parse(r#"{"responseData":null,"responseStatus":200}"#).unwrap_err();
        assert!(matches!(err, TranslateError::ApiError(_)));
    }

    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/get", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut request = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (url, handle)
    }

    #[tokio::test]
    async fn request_carries_encoded_query_and_email() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"responseData":{"translatedText":"Buenos días"},"responseStatus":200,"matches":[]}"#,
        )
        .await;

        let translator = MyMemoryTranslator::new(
            url,
            Some("me@example.com".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();

        let translation = translator
            .translate("good morning & more", "en-GB".into(), "es-ES".into())
            .await
            .unwrap();
        assert_eq!(translation.text, "Buenos días");
        assert_eq!(translation.from, "en-GB");
        assert_eq!(translation.provider, "mymemory");

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap().to_string();
        assert!(request_line.starts_with("GET /get?"));
        assert!(request_line.contains("q=good+morning+%26+more"));
        assert!(request_line.contains("langpair=en-GB%7Ces-ES"));
        assert!(request_line.contains("de=me%40example.com"));
    }

    #[tokio::test]
    async fn http_429_maps_to_rate_limit() {
        let (url, _server) = serve_once("HTTP/1.1 429 Too Many Requests", "{}").await;
        let translator = MyMemoryTranslator::new(url, None, Duration::from_secs(5)).unwrap();

        let err = translator
            .translate("hi", "en-GB".into(), "es-ES".into())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn blank_text_never_hits_the_network() {
        let translator = MyMemoryTranslator::new(
            "http://127.0.0.1:9/get".to_string(),
            None,
            Duration::from_secs(1),
        )
        .unwrap();

        let err = translator
            .translate("   ", "en-GB".into(), "es-ES".into())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::EmptyText));
    }
}
