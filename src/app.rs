use crate::backend::Backend;
use crate::config::Config;
use crate::countdown::{Clock, SystemClock, remaining};
use crate::handlers::{self, AnchorOutcome, SubmitOutcome};
use crate::page::Page;
use crate::reveal::RegionBounds;
use crate::state::LandingState;
use crate::stats::{refresh_stats, write_countdown};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Submit,
    AmountPreset(String),
    AmountInput(String),
    AnchorClick(String),
    Viewport {
        height: f64,
        regions: Vec<RegionBounds>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Submitted(SubmitOutcome),
    PresetSelected,
    AmountChecked { submit_enabled: bool },
    Anchor(AnchorOutcome),
    Revealed(Vec<String>),
}

pub async fn dispatch<P: Page, B: Backend>(
    state: &LandingState<P, B>,
    event: PageEvent,
) -> EventOutcome {
    match event {
        PageEvent::Submit => EventOutcome::Submitted(handlers::submit(state).await),
        PageEvent::AmountPreset(value) => {
            handlers::select_preset(state, &value).await;
            EventOutcome::PresetSelected
        }
        PageEvent::AmountInput(raw) => EventOutcome::AmountChecked {
            submit_enabled: handlers::amount_input(state, &raw).await,
        },
        PageEvent::AnchorClick(href) => {
            EventOutcome::Anchor(handlers::follow_anchor(state, &href).await)
        }
        PageEvent::Viewport { height, regions } => {
            EventOutcome::Revealed(handlers::viewport_changed(state, height, &regions).await)
        }
    }
}

pub async fn tick_countdown<P: Page, B: Backend>(state: &LandingState<P, B>) -> bool {
    let left = remaining(state.clock.now(), state.config.event_date);
    let mut page = state.page.lock().await;
    if !state.display_sync().local_tick_allowed() {
        debug!("countdown tick skipped, stats pending");
        return false;
    }
    write_countdown(&mut *page, &left.display());
    true
}

async fn run_ticker<P: Page, B: Backend>(state: LandingState<P, B>) {
    let mut interval = time::interval(state.config.tick_period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        tick_countdown(&state).await;
    }
}

// The page arrives server-rendered, so the first poll waits a full period.
async fn run_poller<P: Page, B: Backend>(state: LandingState<P, B>) {
    let period = state.config.stats_period;
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        refresh_stats(&state).await;
    }
}

pub struct Landing<P: Page, B: Backend> {
    state: LandingState<P, B>,
    ticker: JoinHandle<()>,
    poller: JoinHandle<()>,
}

impl<P: Page, B: Backend> Landing<P, B> {
    pub fn mount(page: P, backend: B, config: Config) -> Self {
        Self::mount_with_clock(page, backend, config, Arc::new(SystemClock))
    }

    pub fn mount_with_clock(mut page: P, backend: B, config: Config, clock: Arc<dyn Clock>) -> Self {
        let rendered_width = page.progress_width();
        page.set_progress_width(0.0);

        let state = LandingState::new(page, backend, config, clock);
        let intro = state.clone();
        state.spawn_owned(async move {
            time::sleep(intro.config.intro_delay).await;
            intro.page.lock().await.set_progress_width(rendered_width);
        });

        let ticker = tokio::spawn(run_ticker(state.clone()));
        let poller = tokio::spawn(run_poller(state.clone()));
        info!(
            event_date = %state.config.event_date,
            stats_every = ?state.config.stats_period,
            "landing mounted"
        );

        Self {
            state,
            ticker,
            poller,
        }
    }

    pub fn state(&self) -> &LandingState<P, B> {
        &self.state
    }

    pub fn page(&self) -> &Arc<Mutex<P>> {
        &self.state.page
    }

    pub async fn dispatch(&self, event: PageEvent) -> EventOutcome {
        dispatch(&self.state, event).await
    }

    pub fn spawn_event(&self, event: PageEvent) {
        let state = self.state.clone();
        self.state.spawn_owned(async move {
            let outcome = dispatch(&state, event).await;
            debug!(?outcome, "page event handled");
        });
    }

    pub fn unmount(self) {}
}

impl<P: Page, B: Backend> Drop for Landing<P, B> {
    fn drop(&mut self) {
        self.ticker.abort();
        self.poller.abort();
        self.state.abort_owned();
        info!("landing unmounted");
    }
}
