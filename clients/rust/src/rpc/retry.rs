//! Retry logic with exponential backoff.
//!
//! Only errors that [`JsonClientError::is_retryable`] accepts are retried.
//! Program errors fail on the first attempt.

use crate::config::RetryConfig;
use crate::errors::JsonClientError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Clone, Debug)]
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn default_executor() -> Self {
        Self::new(RetryConfig::default())
    }

    /// Executor that gives up after the first failure.
    pub fn no_retry() -> Self {
        Self::new(RetryConfig {
            max_retries: 0,
            initial_delay_ms: 0,
            max_delay_ms: 0,
            backoff_multiplier: 1.0,
        })
    }

    /// Runs `operation`, retrying up to `max_retries` times on retryable errors.
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T, JsonClientError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, JsonClientError>>,
    {
        let mut attempts = 0;
        let mut delay = self.config.initial_delay_ms;

        loop {
            attempts += 1;

            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !e.is_retryable() || attempts > self.config.max_retries {
                        tracing::warn!(
                            attempts = attempts,
                            category = %e.category(),
                            error = %e,
                            "Operation failed"
                        );
                        return Err(e);
                    }

                    if let Some(hint) = e.retry_hint_ms() {
                        delay = delay.max(hint);
                    }
                    let wait_time = delay + self.jitter(delay);

                    tracing::debug!(
                        attempts = attempts,
                        delay_ms = wait_time,
                        error = %e,
                        "Retrying after error"
                    );

                    sleep(Duration::from_millis(wait_time)).await;

                    delay = ((delay as f64) * self.config.backoff_multiplier) as u64;
                    delay = delay.min(self.config.max_delay_ms);
                }
            }
        }
    }

    /// 0-25% of `delay`.
    fn jitter(&self, delay: u64) -> u64 {
        let max_jitter = delay / 4;
        if max_jitter == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..max_jitter)
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }
}

pub struct RetryExecutorBuilder {
    config: RetryConfig,
}

impl RetryExecutorBuilder {
    pub fn new() -> Self {
        Self {
            config: RetryConfig::default(),
        }
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    pub fn initial_delay_ms(mut self, delay: u64) -> Self {
        self.config.initial_delay_ms = delay;
        self
    }

    pub fn max_delay_ms(mut self, delay: u64) -> Self {
        self.config.max_delay_ms = delay;
        self
    }

    pub fn backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.config.backoff_multiplier = multiplier;
        self
    }

    pub fn build(self) -> RetryExecutor {
        RetryExecutor::new(self.config)
    }
}

impl Default for RetryExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
