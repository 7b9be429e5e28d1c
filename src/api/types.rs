//! Request and response bodies for the labnote AI backend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub response: String,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendResponse {
    pub recommended_workflow_id: String,
    pub recommended_unit_operation_ids: Vec<String>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct StructuredNoteRequest<'a> {
    pub query: &'a str,
    pub workflow_id: &'a str,
    pub unit_operation_ids: &'a [String],
    pub experimenter: &'a str,
}

/// `/create_scaffold` returns a map of relative file names to contents.
#[derive(Debug, Deserialize)]
pub struct ScaffoldResponse {
    pub files: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct PopulateRequest<'a> {
    pub file_content: &'a str,
    pub uo_id: &'a str,
    pub section: &'a str,
    pub query: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PopulateResponse {
    pub uo_id: String,
    pub section: String,
    pub options: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PreferenceRequest<'a> {
    pub uo_id: &'a str,
    pub section: &'a str,
    pub chosen: &'a str,
    pub rejected: &'a [String],
    pub query: &'a str,
    pub file_content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ConstantsResponse {
    #[serde(rename = "ALL_WORKFLOWS")]
    pub all_workflows: BTreeMap<String, String>,
    #[serde(rename = "ALL_UOS")]
    pub all_uos: BTreeMap<String, String>,
}
