//! Per-IP sliding-window limits on the auth routes.
//!
//! Sign-in and sign-up share one small budget; token refresh has its own,
//! larger one since clients call it on every access-token expiry.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::{HashMap, VecDeque},
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::AppState;

const WINDOW: Duration = Duration::from_secs(60);
const CREDENTIAL_ATTEMPTS: u32 = 5;
const REFRESH_ATTEMPTS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthBucket {
    Credentials,
    Refresh,
}

impl AuthBucket {
    pub fn for_path(path: &str) -> Self {
        if path.ends_with("/refresh") {
            AuthBucket::Refresh
        } else {
            AuthBucket::Credentials
        }
    }

    fn budget(self) -> u32 {
        match self {
            AuthBucket::Credentials => CREDENTIAL_ATTEMPTS,
            AuthBucket::Refresh => REFRESH_ATTEMPTS,
        }
    }
}

/// Attempt timestamps per (ip, bucket). Counts are per process.
#[derive(Clone, Default)]
pub struct RateLimitState {
    attempts: Arc<Mutex<HashMap<(IpAddr, AuthBucket), VecDeque<Instant>>>>,
}

impl RateLimitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ok(remaining) if the attempt fits the budget, else Err(wait until a slot frees).
    pub async fn record(&self, ip: IpAddr, bucket: AuthBucket) -> Result<u32, Duration> {
        self.record_at(ip, bucket, Instant::now()).await
    }

    async fn record_at(&self, ip: IpAddr, bucket: AuthBucket, now: Instant) -> Result<u32, Duration> {
        let mut attempts = self.attempts.lock().await;
        let log = attempts.entry((ip, bucket)).or_default();

        while log
            .front()
            .is_some_and(|t| now.duration_since(*t) >= WINDOW)
        {
            log.pop_front();
        }

        let budget = bucket.budget();
        if log.len() as u32 >= budget {
            let wait = log
                .front()
                .map(|oldest| WINDOW.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(WINDOW);
            return Err(wait);
        }

        log.push_back(now);
        Ok(budget - log.len() as u32)
    }

    pub async fn prune(&self) {
        self.prune_at(Instant::now()).await
    }

    /// Drops keys whose newest attempt has left the window.
    async fn prune_at(&self, now: Instant) {
        let mut attempts = self.attempts.lock().await;
        attempts.retain(|_, log| log.back().is_some_and(|t| now.duration_since(*t) < WINDOW));
    }

    #[cfg(test)]
    async fn tracked_keys(&self) -> usize {
        self.attempts.lock().await.len()
    }
}

pub fn spawn_cleanup_worker(limiter: RateLimitState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(WINDOW * 5);
        loop {
            interval.tick().await;
            limiter.prune().await;
            tracing::debug!("Auth rate limiter pruned");
        }
    });
}

pub async fn rate_limit_auth(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = addr.ip();
    let bucket = AuthBucket::for_path(req.uri().path());

    match state.rate_limiter.record(ip, bucket).await {
        Ok(remaining) => {
            tracing::debug!(ip = %ip, bucket = ?bucket, remaining, "Auth attempt allowed");
            Ok(next.run(req).await)
        }
        Err(wait) => {
            // round up so clients never retry a second early
            let retry_after_secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
            tracing::warn!(ip = %ip, bucket = ?bucket, retry_after_secs, "Auth attempts exhausted");
            Err(AppError::RateLimited { retry_after_secs })
        }
    }
}
