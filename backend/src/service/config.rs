use std::time::Duration;

use anyhow::{ensure, Result};
use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::entities::Portfolio;

pub const DEFAULT_PROJECT_DEMO_URL: &str = "https://aabhijeetsingh.github.io/cryptofix-trading/";
pub const DEFAULT_PROJECT_SOURCE_URL: &str = "https://github.com/aabhijeetsingh/cryptofix-trading";

/// Tunables of the presentation layer.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    /// Scroll offset above which the back-to-top control shows.
    pub back_to_top_threshold: f64,
    /// Gap kept between the fixed navbar and an anchor target.
    pub anchor_margin: f64,
    pub reply_delay_ms: u64,
    /// Every project card links here, whatever the project's own link says.
    pub project_demo_url: String,
    pub project_source_url: String,
    /// Chat bubbles kept per visitor.
    pub chat_history_limit: u32,
    /// Visitors silent for longer than this lose their transient state.
    pub idle_session_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            back_to_top_threshold: 300.0,
            anchor_margin: 20.0,
            reply_delay_ms: 500,
            project_demo_url: DEFAULT_PROJECT_DEMO_URL.to_string(),
            project_source_url: DEFAULT_PROJECT_SOURCE_URL.to_string(),
            chat_history_limit: 100,
            idle_session_secs: 30 * 60,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.back_to_top_threshold.is_finite() && self.back_to_top_threshold >= 0.0,
            "back_to_top_threshold must be a non-negative number, got {}",
            self.back_to_top_threshold
        );
        ensure!(
            self.anchor_margin.is_finite(),
            "anchor_margin must be finite, got {}",
            self.anchor_margin
        );
        ensure!(
            self.reply_delay_ms <= 60_000,
            "reply_delay_ms must not exceed one minute, got {}",
            self.reply_delay_ms
        );
        ensure!(
            self.chat_history_limit > 0,
            "chat_history_limit must keep at least one message"
        );
        ensure!(
            self.idle_session_secs > 0,
            "idle_session_secs must be positive"
        );
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_session_secs)
    }
}

/// Canister install/upgrade argument.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, Default)]
pub struct InitArgs {
    pub portfolio: Option<Portfolio>,
    pub settings: Option<Settings>,
}
