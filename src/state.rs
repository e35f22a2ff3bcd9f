use crate::backend::Backend;
use crate::config::Config;
use crate::countdown::Clock;
use crate::page::Page;
use crate::reveal::RevealObserver;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, MutexGuard, PoisonError};
use tokio::sync::Mutex;
use tokio::task::JoinSet;

#[derive(Debug, Default)]
pub struct DisplaySync {
    issued: u64,
    applied: u64,
    in_flight: usize,
}

impl DisplaySync {
    pub fn begin_stats(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight += 1;
        self.issued
    }

    pub fn finish_stats(&mut self, seq: u64, ok: bool) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        if ok && seq > self.applied {
            self.applied = seq;
            return true;
        }
        false
    }

    pub fn local_tick_allowed(&self) -> bool {
        self.in_flight == 0
    }
}

pub struct LandingState<P, B> {
    pub page: Arc<Mutex<P>>,
    pub backend: Arc<B>,
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
    pub reveal: Arc<Mutex<RevealObserver>>,
    sync: Arc<std::sync::Mutex<DisplaySync>>,
    submitting: Arc<AtomicBool>,
    pending: Arc<std::sync::Mutex<JoinSet<()>>>,
}

impl<P, B> Clone for LandingState<P, B> {
    fn clone(&self) -> Self {
        Self {
            page: Arc::clone(&self.page),
            backend: Arc::clone(&self.backend),
            config: Arc::clone(&self.config),
            clock: Arc::clone(&self.clock),
            reveal: Arc::clone(&self.reveal),
            sync: Arc::clone(&self.sync),
            submitting: Arc::clone(&self.submitting),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<P: Page, B: Backend> LandingState<P, B> {
    pub fn new(page: P, backend: B, config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            page: Arc::new(Mutex::new(page)),
            backend: Arc::new(backend),
            config: Arc::new(config),
            clock,
            reveal: Arc::new(Mutex::new(RevealObserver::default())),
            sync: Arc::new(std::sync::Mutex::new(DisplaySync::default())),
            submitting: Arc::new(AtomicBool::new(false)),
            pending: Arc::new(std::sync::Mutex::new(JoinSet::new())),
        }
    }

    pub fn display_sync(&self) -> MutexGuard<'_, DisplaySync> {
        self.sync.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn begin_submission(&self) -> Option<InFlight> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(InFlight {
            flag: Arc::clone(&self.submitting),
        })
    }

    pub fn spawn_owned<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        while pending.try_join_next().is_some() {}
        pending.spawn(task);
    }

    pub fn abort_owned(&self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .abort_all();
    }
}

/// Releases the submission slot when dropped, including on cancellation.
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
