//! @acp:module "Answer Transforms"
//! @acp:summary "Normalization applied to answers before validation"
//! @acp:domain engine
//! @acp:layer logic
//!
//! Transforms are idempotent: replaying an already finalized answer set
//! yields the same values.

use futures::future::BoxFuture;

use crate::answers::AnswerValue;
use crate::error::Result;
use crate::graph::ready;

/// Trim text answers; other shapes pass through
pub fn trim<'a>(value: &'a AnswerValue) -> BoxFuture<'a, Result<AnswerValue>> {
    ready(Ok(match value {
        AnswerValue::Text(s) => AnswerValue::Text(s.trim().to_string()),
        other => other.clone(),
    }))
}

pub fn adapter_name<'a>(value: &'a AnswerValue) -> BoxFuture<'a, Result<AnswerValue>> {
    ready(Ok(match value {
        AnswerValue::Text(s) => AnswerValue::Text(s.trim().to_lowercase()),
        other => other.clone(),
    }))
}

/// Split a comma separated answer into a list of trimmed, non-empty entries
pub fn comma_list<'a>(value: &'a AnswerValue) -> BoxFuture<'a, Result<AnswerValue>> {
    ready(Ok(match value {
        AnswerValue::Text(s) => split_list(s),
        other => other.clone(),
    }))
}

fn split_list(text: &str) -> AnswerValue {
    let mut items: Vec<&str> = Vec::new();
    for item in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.contains(&item) {
            items.push(item);
        }
    }
    AnswerValue::texts(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trim() {
        assert_eq!(trim(&"  Weather ".into()).await.unwrap(), AnswerValue::from("Weather"));
        assert_eq!(trim(&true.into()).await.unwrap(), AnswerValue::Bool(true));
    }

    #[tokio::test]
    async fn test_adapter_name_lowercases() {
        assert_eq!(
            adapter_name(&" Weather-Station ".into()).await.unwrap(),
            AnswerValue::from("weather-station")
        );
    }

    #[tokio::test]
    async fn test_comma_list() {
        let list = comma_list(&"weather, forecast,,  rain ,weather".into()).await.unwrap();
        assert_eq!(list, AnswerValue::from(vec!["weather", "forecast", "rain"]));

        let again = comma_list(&list).await.unwrap();
        assert_eq!(again, list);

        assert_eq!(comma_list(&"".into()).await.unwrap(), AnswerValue::List(vec![]));
    }
}
