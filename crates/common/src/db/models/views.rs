//! Shapes returned to and accepted from API callers

use serde::{de, Deserialize, Deserializer, Serialize};

/// Article joined with its journalist's name and category names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub journalist_id: Option<i64>,
    /// Journalist display name; absent when the journalist row is missing
    pub journalist: Option<String>,
    pub categories: Vec<String>,
}

/// Article joined with full journalist detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleWithJournalist {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub journalist_id: i64,
    pub journalist_name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
}

/// Article annotated with its journalist's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalistArticle {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub journalist_id: i64,
    pub journalist_name: String,
}

/// Body of create and update requests.
///
/// Every field is optional on the wire. Whatever is missing is written as
/// NULL; updates never merge with the stored row. Only one category can be
/// supplied even though reads report many.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub journalist_id: Option<i64>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<i64>,
}

/// Result of a create or update: the id merged with the caller's fields.
/// Names are echoed as supplied, never re-read from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedArticle {
    pub id: i64,
    #[serde(flatten)]
    pub fields: ArticleInput,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i64),
    Text(String),
}

/// Form posts send ids as strings; accept `1`, `"1"`, `""` and `null`.
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdRepr::Number(id)) => Ok(Some(id)),
        Some(IdRepr::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(IdRepr::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid id: {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_accepts_numeric_strings() {
        let input: ArticleInput = serde_json::from_value(json!({
            "title": "A",
            "journalistId": "3",
            "categoryId": 2
        }))
        .unwrap();

        assert_eq!(input.journalist_id, Some(3));
        assert_eq!(input.category_id, Some(2));
        assert_eq!(input.content, None);
    }

    #[test]
    fn test_input_rejects_garbage_ids() {
        let result = serde_json::from_value::<ArticleInput>(json!({ "journalistId": "abc" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_saved_article_echoes_only_supplied_fields() {
        let saved = SavedArticle {
            id: 7,
            fields: ArticleInput {
                title: Some("A".into()),
                ..Default::default()
            },
        };

        assert_eq!(serde_json::to_value(&saved).unwrap(), json!({ "id": 7, "title": "A" }));
    }
}
