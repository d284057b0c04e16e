//! Server-rendered pages.
//!
//! Page structs hold display-ready values only; the handlers fetch from the
//! backend and the builders here shape the results for the templates.

use crate::config::DayBoundary;
use crate::models::{GroupStats, NoticeQuery, WaterLog};
use crate::stats::{log_local, HistorySummary};
use askama::Template;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    /// `ok` or `error`; empty when there is nothing to show.
    pub kind: &'static str,
    pub message: String,
}

impl Notice {
    pub fn none() -> Self {
        Self::default()
    }

    fn ok(message: impl Into<String>) -> Self {
        Self {
            kind: "ok",
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }

    /// Maps the post/redirect/get query back into a banner.
    pub fn from_query(query: &NoticeQuery) -> Self {
        match query.notice.as_deref() {
            Some("added") => match query
                .mugs
                .as_deref()
                .and_then(|mugs| mugs.trim().parse::<u32>().ok())
            {
                Some(mugs) => Self::ok(format!("Added {mugs} mugs to your log")),
                None => Self::ok("Added to your log"),
            },
            Some("invalid") => Self::error("Please enter a valid number of mugs"),
            Some("failed") => Self::error("Failed to submit water log"),
            Some("empty-token") => Self::error("Please paste a session token"),
            _ => Self::none(),
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub notice: Notice,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub date: String,
    pub today_total: u64,
    pub notice: Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub day_label: String,
    pub time_label: String,
    pub mugs: u32,
}

#[derive(Template)]
#[template(path = "history.html")]
pub struct HistoryPage {
    pub summary: HistorySummary,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedContributor {
    pub rank: usize,
    pub name: String,
    pub mugs: u64,
    pub tier: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupOverview {
    pub group_name: String,
    pub total_mugs: u64,
    pub total_members: u64,
    pub average: String,
    pub contributors: Vec<RankedContributor>,
}

#[derive(Template)]
#[template(path = "group_stats.html")]
pub struct GroupStatsPage {
    pub available: bool,
    pub overview: GroupOverview,
}

impl GroupStatsPage {
    /// `None` renders the "no group data" placeholder.
    pub fn new(overview: Option<GroupOverview>) -> Self {
        Self {
            available: overview.is_some(),
            overview: overview.unwrap_or_default(),
        }
    }
}

/// Entries must already be in display order.
pub fn history_entries(logs: &[WaterLog], boundary: DayBoundary) -> Vec<HistoryEntry> {
    logs.iter()
        .map(|log| match log_local(&log.date, boundary) {
            Some(local) => HistoryEntry {
                day_label: local.format("%A, %B %-d, %Y").to_string(),
                time_label: local.format("%I:%M %p").to_string(),
                mugs: log.mugs,
            },
            None => HistoryEntry {
                day_label: log.date.clone(),
                time_label: String::new(),
                mugs: log.mugs,
            },
        })
        .collect()
}

pub fn group_overview(stats: &GroupStats) -> GroupOverview {
    let contributors = stats
        .top_contributors
        .iter()
        .enumerate()
        .map(|(index, contributor)| RankedContributor {
            rank: index + 1,
            name: contributor.name.clone(),
            mugs: contributor.mugs,
            tier: rank_tier(index),
        })
        .collect();

    GroupOverview {
        group_name: stats.group_name.clone(),
        total_mugs: stats.total_mugs,
        total_members: stats.total_members,
        average: stats.average_mugs_per_member.to_string(),
        contributors,
    }
}

/// CSS tier for a zero-based position in the backend's contributor order.
pub fn rank_tier(index: usize) -> &'static str {
    match index {
        0 => "gold",
        1 => "silver",
        2 => "bronze",
        _ => "standard",
    }
}
