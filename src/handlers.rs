use crate::errors::AppError;
use crate::models::{HistoryResponse, LogForm, LoginForm, NoticeQuery, TodayResponse};
use crate::state::AppState;
use crate::stats::{sort_newest_first, summarize, today_total};
use crate::ui::{
    group_overview, history_entries, DashboardPage, GroupStatsPage, HistoryPage, LoginPage,
    Notice,
};
use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::{error, info};

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn login_page(Query(query): Query<NoticeQuery>) -> Result<Html<String>, AppError> {
    let page = LoginPage {
        notice: Notice::from_query(&query),
    };
    Ok(Html(page.render()?))
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let token = form.token.trim();
    if token.is_empty() {
        return Ok(Redirect::to("/login?notice=empty-token"));
    }

    state.sign_in(token).await?;
    info!("session token stored");
    Ok(Redirect::to("/dashboard"))
}

pub async fn logout(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.sign_out().await?;
    info!("session token cleared");
    Ok(Redirect::to("/login"))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, AppError> {
    if !state.is_signed_in().await {
        return Ok(Redirect::to("/login").into_response());
    }

    let today = state.day_boundary.today();
    let total = match state.client().await.list_user_logs().await {
        Ok(logs) => today_total(&logs, today, state.day_boundary),
        Err(err) => {
            error!("error fetching today total: {err}");
            0
        }
    };

    let page = DashboardPage {
        date: today.to_string(),
        today_total: total,
        notice: Notice::from_query(&query),
    };
    Ok(Html(page.render()?).into_response())
}

pub async fn submit_log(
    State(state): State<AppState>,
    Form(form): Form<LogForm>,
) -> Result<Redirect, AppError> {
    if !state.is_signed_in().await {
        return Ok(Redirect::to("/login"));
    }

    let mugs = match parse_mugs(&form.mugs) {
        Some(mugs) => mugs,
        None => return Ok(Redirect::to("/dashboard?notice=invalid")),
    };

    match state.client().await.submit_water_log(mugs).await {
        Ok(log) => {
            info!(id = %log.id, mugs = log.mugs, "water log submitted");
            Ok(Redirect::to(&format!("/dashboard?notice=added&mugs={mugs}")))
        }
        Err(err) => {
            error!("error submitting water log: {err}");
            Ok(Redirect::to("/dashboard?notice=failed"))
        }
    }
}

pub async fn history(State(state): State<AppState>) -> Result<Response, AppError> {
    if !state.is_signed_in().await {
        return Ok(Redirect::to("/login").into_response());
    }

    let mut logs = match state.client().await.list_user_logs().await {
        Ok(logs) => logs,
        Err(err) => {
            error!("error fetching logs: {err}");
            Vec::new()
        }
    };
    sort_newest_first(&mut logs, state.day_boundary);

    let page = HistoryPage {
        summary: summarize(&logs),
        entries: history_entries(&logs, state.day_boundary),
    };
    Ok(Html(page.render()?).into_response())
}

pub async fn group_stats(State(state): State<AppState>) -> Result<Response, AppError> {
    if !state.is_signed_in().await {
        return Ok(Redirect::to("/login").into_response());
    }

    let overview = match state.client().await.get_group_stats().await {
        Ok(stats) => Some(group_overview(&stats)),
        Err(err) => {
            error!("error fetching group stats: {err}");
            None
        }
    };

    let page = GroupStatsPage::new(overview);
    Ok(Html(page.render()?).into_response())
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let logs = state.client().await.list_user_logs().await?;
    let today = state.day_boundary.today();

    Ok(Json(TodayResponse {
        date: today.to_string(),
        total_mugs: today_total(&logs, today, state.day_boundary),
    }))
}

pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    let mut logs = state.client().await.list_user_logs().await?;
    sort_newest_first(&mut logs, state.day_boundary);
    let summary = summarize(&logs);

    Ok(Json(HistoryResponse {
        logs,
        total_mugs: summary.total_mugs,
        days_logged: summary.days_logged,
        average_per_day: summary.average_per_day,
    }))
}

/// Only positive whole numbers are accepted; decimals and trailing text are
/// rejected rather than truncated.
fn parse_mugs(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|mugs| *mugs > 0)
}
