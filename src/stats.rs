use crate::backend::Backend;
use crate::countdown::CountdownDisplay;
use crate::models::StatsResponse;
use crate::page::{self, Page};
use crate::state::LandingState;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Superseded,
    Failed,
}

pub async fn refresh_stats<P: Page, B: Backend>(state: &LandingState<P, B>) -> RefreshOutcome {
    let seq = state.display_sync().begin_stats();
    let result = state.backend.fetch_stats().await;

    // Page first, then the sync record, so two resolving responses cannot
    // interleave between the staleness check and the write.
    let mut page = state.page.lock().await;
    let apply = state.display_sync().finish_stats(seq, result.is_ok());

    match result {
        Ok(stats) if apply => {
            apply_stats(&mut *page, &stats);
            debug!(seq, total = stats.total_contributions, "stats applied");
            RefreshOutcome::Applied
        }
        Ok(_) => {
            debug!(seq, "stats response superseded");
            RefreshOutcome::Superseded
        }
        Err(err) => {
            warn!(seq, error = %err, "error updating stats");
            RefreshOutcome::Failed
        }
    }
}

pub fn apply_stats<P: Page + ?Sized>(page: &mut P, stats: &StatsResponse) {
    page.set_text(
        page::TOTAL_RAISED,
        &format!("Ksh. {}", format_amount(stats.total_contributions)),
    );
    page.set_text(page::DAYS_LEFT, &stats.countdown.days.to_string());
    page.set_progress_width(progress_width(stats.percentage_raised));
    write_countdown(page, &CountdownDisplay::from(stats.countdown));
}

pub fn write_countdown<P: Page + ?Sized>(page: &mut P, display: &CountdownDisplay) {
    page.set_text(page::DAYS, &display.days);
    page.set_text(page::HOURS, &display.hours);
    page.set_text(page::MINUTES, &display.minutes);
    page.set_text(page::SECONDS, &display.seconds);
}

pub fn progress_width(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scaled = (value.abs() * 1000.0).round() as u128;
    let whole = (scaled / 1000).to_string();
    let fraction = scaled % 1000;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 5);
    if value < 0.0 && scaled > 0 {
        grouped.push('-');
    }
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if fraction > 0 {
        let digits = format!("{fraction:03}");
        grouped.push('.');
        grouped.push_str(digits.trim_end_matches('0'));
    }
    grouped
}
