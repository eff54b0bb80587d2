//! JSON bodies for the three API endpoints (`newConversation`, `mendableChat`, `ingestData`).

use serde::{Deserialize, Deserializer, Serialize};

/// Arbitrary JSON object returned by `newConversation` and `ingestData`.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Client → server: open a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct NewConversationRequest<'a> {
    pub api_key: &'a str,
}

/// Client → server: one question in a conversation.
///
/// `history` is always sent empty and `shouldStream` always `false`; the
/// server keeps the history itself, keyed by `conversation_id`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub api_key: &'a str,
    pub question: &'a str,
    pub history: Vec<serde_json::Value>,
    pub conversation_id: &'a serde_json::Value,
    #[serde(rename = "shouldStream")]
    pub should_stream: bool,
}

impl<'a> ChatRequest<'a> {
    pub fn new(api_key: &'a str, question: &'a str, conversation_id: &'a serde_json::Value) -> Self {
        Self {
            api_key,
            question,
            history: Vec::new(),
            conversation_id,
            should_stream: false,
        }
    }
}

/// Client → server: submit a data source for indexing.
#[derive(Debug, Clone, Serialize)]
pub struct IngestRequest<'a> {
    pub api_key: &'a str,
    pub url: &'a str,
    #[serde(rename = "type")]
    pub typ: &'a str,
}

/// Server → client: answer to a [`ChatRequest`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: Answer,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<Source>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Answer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// One cited passage. Order is preserved as received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default)]
    pub date: Option<LooseValue>,
    #[serde(default)]
    pub source_name: Option<LooseValue>,
}

/// Missing and `null` both decode to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Metadata whose JSON type the server does not fix. `null` maps to `None`
/// on the enclosing `Option`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_disables_streaming_and_sends_empty_history() {
        let id = json!("conv-1");
        let body = serde_json::to_value(ChatRequest::new("k", "What is X?", &id)).unwrap();
        assert_eq!(
            body,
            json!({
                "api_key": "k",
                "question": "What is X?",
                "history": [],
                "conversation_id": "conv-1",
                "shouldStream": false,
            })
        );
    }

    #[test]
    fn ingest_request_uses_type_key() {
        let body = serde_json::to_value(IngestRequest {
            api_key: "k",
            url: "https://docs.example.com",
            typ: "url",
        })
        .unwrap();
        assert_eq!(body["type"], "url");
        assert_eq!(body["url"], "https://docs.example.com");
    }

    #[test]
    fn chat_response_keeps_source_order_and_loose_metadata() {
        let raw = r#"{
            "answer": {"text": "X is Y"},
            "sources": [
                {"id": 2, "link": "http://b", "content": "b", "date": "2023-05-01", "source_name": null},
                {"id": 1, "link": "http://a", "content": "a", "date": 1683000000, "source_name": "docs"}
            ],
            "message_id": 7
        }"#;
        let resp: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.answer.text, "X is Y");
        assert_eq!(resp.message_id, 7);
        let links: Vec<&str> = resp.sources.iter().map(|s| s.link.as_str()).collect();
        assert_eq!(links, ["http://b", "http://a"]);
        assert_eq!(resp.sources[0].date, Some(LooseValue::Text("2023-05-01".into())));
        assert_eq!(resp.sources[0].source_name, None);
        assert!(matches!(resp.sources[1].date, Some(LooseValue::Number(_))));
    }

    #[test]
    fn chat_response_treats_null_strings_as_empty() {
        let raw = r#"{
            "answer": {"text": "X is Y"},
            "sources": [{"link": "http://a", "content": null, "text": null, "id": null}],
            "message_id": null
        }"#;
        let resp: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.answer.text, "X is Y");
        assert_eq!(resp.sources[0].link, "http://a");
        assert_eq!(resp.sources[0].content, "");
        assert_eq!(resp.sources[0].id, 0);

        let resp: ChatResponse =
            serde_json::from_str(r#"{"answer": {"text": null}, "sources": null}"#).unwrap();
        assert_eq!(resp.answer.text, "");
        assert!(resp.sources.is_empty());
    }

    #[test]
    fn chat_response_tolerates_missing_fields() {
        let resp: ChatResponse = serde_json::from_str(r#"{"answer":{"text":"hi"}}"#).unwrap();
        assert_eq!(resp.answer.text, "hi");
        assert!(resp.sources.is_empty());
        assert_eq!(resp.message_id, 0);
    }
}
