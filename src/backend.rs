use crate::errors::ClientError;
use crate::models::{ContributionRequest, StatsResponse, SubmitResponse};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

pub const CONTRIBUTE_PATH: &str = "contribute/";
pub const STATS_PATH: &str = "api/stats/";
pub const CSRF_HEADER: &str = "X-CSRFToken";

pub trait Backend: Send + Sync + 'static {
    fn submit(
        &self,
        request: &ContributionRequest,
    ) -> impl Future<Output = Result<SubmitResponse, ClientError>> + Send;

    fn fetch_stats(&self) -> impl Future<Output = Result<StatsResponse, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    contribute_url: String,
    stats_url: String,
    csrf_token: String,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        csrf_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, csrf_token))
    }

    pub fn with_client(client: Client, base_url: &str, csrf_token: impl Into<String>) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            client,
            contribute_url: format!("{base}/{CONTRIBUTE_PATH}"),
            stats_url: format!("{base}/{STATS_PATH}"),
            csrf_token: csrf_token.into(),
        }
    }

    pub fn contribute_url(&self) -> &str {
        &self.contribute_url
    }

    pub fn stats_url(&self) -> &str {
        &self.stats_url
    }
}

impl Backend for HttpBackend {
    async fn submit(&self, request: &ContributionRequest) -> Result<SubmitResponse, ClientError> {
        let response = self
            .client
            .post(&self.contribute_url)
            .header(CSRF_HEADER, &self.csrf_token)
            .json(request)
            .send()
            .await?;

        // Rejections come back as 4xx/5xx with a JSON body that still carries the message.
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "contribution response");
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_stats(&self) -> Result<StatsResponse, ClientError> {
        let response = self.client.get(&self.stats_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use crate::models::CountdownFields;
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub enum Reply<T> {
        Ok(T),
        Fail,
    }

    struct Queued<T> {
        delay: Duration,
        reply: Reply<T>,
    }

    #[derive(Default)]
    pub struct FakeBackend {
        submits: Mutex<VecDeque<Queued<SubmitResponse>>>,
        stats: Mutex<VecDeque<Queued<StatsResponse>>>,
        received: Mutex<Vec<ContributionRequest>>,
        submit_calls: AtomicUsize,
        stats_calls: AtomicUsize,
    }

    pub fn stats(total: f64, percent: f64, days: u64) -> StatsResponse {
        StatsResponse {
            total_contributions: total,
            target_amount: Some(2_300_000.0),
            percentage_raised: percent,
            countdown: CountdownFields {
                days,
                hours: 1,
                minutes: 2,
                seconds: 3,
            },
        }
    }

    impl FakeBackend {
        pub fn push_submit(&self, delay: Duration, reply: Reply<SubmitResponse>) {
            self.submits.lock().unwrap().push_back(Queued { delay, reply });
        }

        pub fn push_stats(&self, delay: Duration, reply: Reply<StatsResponse>) {
            self.stats.lock().unwrap().push_back(Queued { delay, reply });
        }

        pub fn submit_calls(&self) -> usize {
            self.submit_calls.load(Ordering::SeqCst)
        }

        pub fn stats_calls(&self) -> usize {
            self.stats_calls.load(Ordering::SeqCst)
        }

        pub fn received(&self) -> Vec<ContributionRequest> {
            self.received.lock().unwrap().clone()
        }
    }

    async fn resolve<T>(queued: Option<Queued<T>>) -> Result<T, ClientError> {
        let Some(queued) = queued else {
            return Err(ClientError::status(StatusCode::NOT_FOUND));
        };
        tokio::time::sleep(queued.delay).await;
        match queued.reply {
            Reply::Ok(value) => Ok(value),
            Reply::Fail => Err(ClientError::status(StatusCode::SERVICE_UNAVAILABLE)),
        }
    }

    impl Backend for FakeBackend {
        async fn submit(&self, request: &ContributionRequest) -> Result<SubmitResponse, ClientError> {
            self.submit_calls.fetch_add(1, Ordering::SeqCst);
            self.received.lock().unwrap().push(request.clone());
            let queued = self.submits.lock().unwrap().pop_front();
            resolve(queued).await
        }

        async fn fetch_stats(&self) -> Result<StatsResponse, ClientError> {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            let queued = self.stats.lock().unwrap().pop_front();
            resolve(queued).await
        }
    }
}
