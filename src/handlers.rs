use crate::backend::Backend;
use crate::errors::ValidationError;
use crate::models::ContributionRequest;
use crate::page::{Dialog, Field, Page};
use crate::reveal::RegionBounds;
use crate::state::LandingState;
use crate::stats::refresh_stats;
use tracing::{error, info, warn};

pub const MIN_AMOUNT: f64 = 1.0;
pub const PAYMENT_FAILED_MESSAGE: &str = "Payment failed. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(ValidationError),
    Declined(String),
    TransportFailed,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorOutcome {
    NotIntercepted,
    Scrolled,
    MissingTarget,
}

pub async fn submit<P: Page, B: Backend>(state: &LandingState<P, B>) -> SubmitOutcome {
    let Some(_in_flight) = state.begin_submission() else {
        return SubmitOutcome::Busy;
    };

    let request = {
        let mut page = state.page.lock().await;
        match read_form(&*page) {
            Ok(request) => {
                page.show_dialog(Dialog::Loading);
                page.set_submit_enabled(false);
                request
            }
            Err(reason) => {
                info!(%reason, "contribution rejected before sending");
                show_error(&mut *page, &reason.to_string());
                return SubmitOutcome::Rejected(reason);
            }
        }
    };

    let result = state.backend.submit(&request).await;

    let mut page = state.page.lock().await;
    page.close_dialog(Dialog::Loading);

    match result {
        Ok(response) if response.success => {
            info!(
                contribution_id = ?response.contribution_id,
                checkout_request_id = ?response.checkout_request_id,
                amount = request.amount,
                "contribution accepted"
            );
            page.show_dialog(Dialog::Success);
            page.reset_form();
            page.clear_amount_highlights();
            page.set_submit_enabled(true);
            drop(page);
            schedule_refresh(state);
            SubmitOutcome::Accepted
        }
        Ok(response) => {
            let message = response
                .message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| PAYMENT_FAILED_MESSAGE.to_string());
            warn!(%message, "contribution declined");
            restore_submit(&mut *page);
            show_error(&mut *page, &message);
            SubmitOutcome::Declined(message)
        }
        Err(err) => {
            error!(error = %err, "contribution request failed");
            restore_submit(&mut *page);
            show_error(&mut *page, NETWORK_ERROR_MESSAGE);
            SubmitOutcome::TransportFailed
        }
    }
}

fn schedule_refresh<P: Page, B: Backend>(state: &LandingState<P, B>) {
    let delay = state.config.refresh_delay;
    let owned = state.clone();
    state.spawn_owned(async move {
        tokio::time::sleep(delay).await;
        refresh_stats(&owned).await;
    });
}

// The amount may have been edited while the request was out.
fn restore_submit<P: Page + ?Sized>(page: &mut P) {
    let amount = parse_amount(&page.field_value(Field::Amount));
    page.set_submit_enabled(amount.is_some_and(|amount| amount >= MIN_AMOUNT));
}

fn show_error<P: Page + ?Sized>(page: &mut P, message: &str) {
    page.set_error_message(message);
    page.show_dialog(Dialog::Error);
}

pub fn read_form<P: Page + ?Sized>(page: &P) -> Result<ContributionRequest, ValidationError> {
    validate(
        &page.field_value(Field::FullName),
        &page.field_value(Field::PhoneNumber),
        &page.field_value(Field::Amount),
    )
}

pub fn validate(
    full_name: &str,
    phone_number: &str,
    amount: &str,
) -> Result<ContributionRequest, ValidationError> {
    let full_name = full_name.trim();
    let phone_number = phone_number.trim();
    let amount = parse_amount(amount).filter(|amount| *amount != 0.0);

    let Some(amount) = amount.filter(|_| !full_name.is_empty() && !phone_number.is_empty()) else {
        return Err(ValidationError::MissingFields);
    };
    if amount < MIN_AMOUNT {
        return Err(ValidationError::AmountBelowMinimum);
    }
    if !is_kenyan_phone(phone_number) {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(ContributionRequest {
        full_name: full_name.to_string(),
        phone_number: phone_number.to_string(),
        amount,
    })
}

pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn is_kenyan_phone(number: &str) -> bool {
    let rest = number
        .strip_prefix("+254")
        .or_else(|| number.strip_prefix("254"))
        .or_else(|| number.strip_prefix('0'));
    let Some(rest) = rest else {
        return false;
    };

    rest.len() == 9
        && rest.starts_with(|c: char| c == '1' || c == '7')
        && rest.chars().all(|c| c.is_ascii_digit())
}

pub async fn select_preset<P: Page, B: Backend>(state: &LandingState<P, B>, value: &str) {
    let mut page = state.page.lock().await;
    page.set_field_value(Field::Amount, value);
    page.clear_amount_highlights();
    page.highlight_amount_button(value);
    if !state.is_submitting() {
        page.set_submit_enabled(parse_amount(value).is_some_and(|amount| amount >= MIN_AMOUNT));
    }
}

pub async fn amount_input<P: Page, B: Backend>(state: &LandingState<P, B>, raw: &str) -> bool {
    let mut page = state.page.lock().await;
    page.set_field_value(Field::Amount, raw);
    let enabled = !state.is_submitting()
        && parse_amount(raw).is_some_and(|amount| amount >= MIN_AMOUNT);
    page.set_submit_enabled(enabled);
    enabled
}

pub async fn follow_anchor<P: Page, B: Backend>(
    state: &LandingState<P, B>,
    href: &str,
) -> AnchorOutcome {
    let Some(target) = href.strip_prefix('#') else {
        return AnchorOutcome::NotIntercepted;
    };
    if target.is_empty() {
        return AnchorOutcome::MissingTarget;
    }

    let mut page = state.page.lock().await;
    if page.scroll_into_view(target) {
        AnchorOutcome::Scrolled
    } else {
        AnchorOutcome::MissingTarget
    }
}

pub async fn viewport_changed<P: Page, B: Backend>(
    state: &LandingState<P, B>,
    viewport_height: f64,
    regions: &[RegionBounds],
) -> Vec<String> {
    let newly = state.reveal.lock().await.observe(viewport_height, regions);
    if !newly.is_empty() {
        let mut page = state.page.lock().await;
        for id in &newly {
            page.mark_revealed(id);
        }
    }
    newly
}
