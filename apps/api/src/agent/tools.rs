//! The `search_jobs` function tool exposed to the model.

use serde_json::json;

use crate::jobs::models::SearchQuery;
use crate::llm_client::{ToolCall, ToolDefinition};

pub const SEARCH_JOBS: &str = "search_jobs";

const SEARCH_JOBS_DESCRIPTION: &str = "美容クリニックの求人を検索します。\
    ユーザーの希望条件に基づいて最適な美容クリニックの求人を検索できます。";

/// JSON Schema contract mirroring `SearchQuery`.
pub fn search_jobs_tool() -> ToolDefinition {
    ToolDefinition::function(
        SEARCH_JOBS,
        SEARCH_JOBS_DESCRIPTION,
        json!({
            "type": "object",
            "properties": {
                "q": {
                    "type": "string",
                    "description": "検索キーワード（例：受付、カウンセラー、看護師、コンシェルジュ）"
                },
                "location": {
                    "type": "string",
                    "description": "勤務地（例：東京、六本木、新宿、大阪）"
                },
                "skills": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "スキル（例：接客、カウンセリング、看護、美容知識）"
                },
                "seniority": {
                    "type": "string",
                    "enum": ["junior", "mid", "senior"],
                    "description": "経験レベル"
                }
            }
        }),
    )
}

/// Decodes the model-supplied arguments of a `search_jobs` call.
/// An empty argument string is treated as `{}`.
pub fn parse_search_args(call: &ToolCall) -> Result<SearchQuery, serde_json::Error> {
    let raw = call.function.arguments.trim();
    if raw.is_empty() {
        return Ok(SearchQuery::default());
    }
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::models::Seniority;
    use crate::llm_client::FunctionCall;

    fn call_with(arguments: &str) -> ToolCall {
        ToolCall {
            id: "call_1".to_string(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: SEARCH_JOBS.to_string(),
                arguments: arguments.to_string(),
            },
        }
    }

    #[test]
    fn test_tool_schema_lists_all_query_fields() {
        let value = serde_json::to_value(search_jobs_tool()).unwrap();
        let props = &value["function"]["parameters"]["properties"];
        for field in ["q", "location", "skills", "seniority"] {
            assert!(props.get(field).is_some(), "missing {field}");
        }
        assert_eq!(props["seniority"]["enum"], json!(["junior", "mid", "senior"]));
        assert_eq!(value["function"]["name"], SEARCH_JOBS);
    }

    #[test]
    fn test_parse_full_arguments() {
        let query = parse_search_args(&call_with(
            r#"{"q":"受付","location":"東京","skills":["接客"],"seniority":"junior"}"#,
        ))
        .unwrap();
        assert_eq!(query.q.as_deref(), Some("受付"));
        assert_eq!(query.location.as_deref(), Some("東京"));
        assert_eq!(query.skills, Some(vec!["接客".to_string()]));
        assert_eq!(query.seniority, Some(Seniority::Junior));
    }

    #[test]
    fn test_parse_empty_arguments_is_empty_query() {
        assert_eq!(parse_search_args(&call_with("")).unwrap(), SearchQuery::default());
        assert_eq!(parse_search_args(&call_with("{}")).unwrap(), SearchQuery::default());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let query = parse_search_args(&call_with(r#"{"q":"看護師","salary":"400"}"#)).unwrap();
        assert_eq!(query.q.as_deref(), Some("看護師"));
    }

    #[test]
    fn test_parse_rejects_bad_seniority() {
        assert!(parse_search_args(&call_with(r#"{"seniority":"lead"}"#)).is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        assert!(parse_search_args(&call_with(r#"{"skills":"接客"}"#)).is_err());
    }
}
