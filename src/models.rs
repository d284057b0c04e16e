use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One water entry as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterLog {
    pub id: String,
    /// ISO 8601 timestamp, kept exactly as the backend sent it.
    pub date: String,
    pub mugs: u32,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub group_name: String,
    pub total_members: u64,
    pub total_mugs: u64,
    pub average_mugs_per_member: f64,
    pub top_contributors: Vec<Contributor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    pub mugs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitWaterLog {
    pub mugs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionData {
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct LogForm {
    #[serde(default)]
    pub mugs: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    /// Kept as text so a hand-edited URL still renders the page.
    pub mugs: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub total_mugs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub logs: Vec<WaterLog>,
    pub total_mugs: u64,
    pub days_logged: usize,
    pub average_per_day: u64,
}
