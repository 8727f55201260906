//! Windowed cooldowns: N invocations per window, per command and scope.

use crate::framework::{Context, Error};
use dashmap::DashMap;
use emojibot_config::CooldownConfig;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during cooldown operations.
#[derive(Error, Debug)]
pub enum CooldownError {
    /// The bucket is full.
    #[error("`{command}` is on cooldown here, try again in {}s.", whole_seconds(.remaining))]
    OnCooldown {
        /// Qualified command name.
        command: String,
        /// Time until the oldest invocation leaves the window.
        remaining: Duration,
    },
}

/// Seconds left, rounded up and never zero.
const fn whole_seconds(remaining: &Duration) -> u64 {
    let secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 || secs == 0 {
        secs + 1
    } else {
        secs
    }
}

/// What a cooldown bucket is keyed on besides the command.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CooldownScope {
    /// One bucket per channel.
    Channel(u64),
    /// One bucket per guild.
    Guild(u64),
}

/// Tracks recent invocations of every (command, scope) bucket.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    windows: DashMap<(String, CooldownScope), VecDeque<Instant>>,
}

impl CooldownTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an invocation now, or fails if the bucket is full.
    pub fn hit(
        &self,
        command: &str,
        scope: CooldownScope,
        config: CooldownConfig,
    ) -> Result<(), CooldownError> {
        self.hit_at(command, scope, config, Instant::now())
    }

    /// Records an invocation at `now`, or fails if the bucket is full.
    ///
    /// Rejected invocations do not count towards the window.
    pub fn hit_at(
        &self,
        command: &str,
        scope: CooldownScope,
        config: CooldownConfig,
        now: Instant,
    ) -> Result<(), CooldownError> {
        let window = config.window();
        let mut hits = self
            .windows
            .entry((command.to_string(), scope))
            .or_default();

        while hits
            .front()
            .is_some_and(|&oldest| now.duration_since(oldest) >= window)
        {
            hits.pop_front();
        }

        if hits.len() >= config.uses as usize {
            let oldest = hits.front().copied().unwrap_or(now);
            let remaining = window.saturating_sub(now.duration_since(oldest));
            debug!(command, ?scope, ?remaining, "Cooldown bucket full");
            return Err(CooldownError::OnCooldown {
                command: command.to_string(),
                remaining,
            });
        }

        hits.push_back(now);
        Ok(())
    }

    /// Drops buckets whose last invocation is older than `idle`.
    pub fn prune(&self, now: Instant, idle: Duration) {
        self.windows
            .retain(|_, hits| hits.back().is_some_and(|&last| now.duration_since(last) < idle));
    }

    /// Number of live buckets.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no bucket is tracked.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// Check for read-only commands: bucketed per channel.
pub async fn channel_cooldown(ctx: Context<'_>) -> Result<bool, Error> {
    let config = ctx.data().config.get().cooldowns.lookup;
    ctx.data().cooldowns.hit(
        &ctx.command().qualified_name,
        CooldownScope::Channel(ctx.channel_id().get()),
        config,
    )?;
    Ok(true)
}

/// Check for commands that change the guild: bucketed per guild.
pub async fn guild_cooldown(ctx: Context<'_>) -> Result<bool, Error> {
    let config = ctx.data().config.get().cooldowns.mutation;
    let scope = ctx.guild_id().map_or_else(
        || CooldownScope::Channel(ctx.channel_id().get()),
        |guild_id| CooldownScope::Guild(guild_id.get()),
    );
    ctx.data()
        .cooldowns
        .hit(&ctx.command().qualified_name, scope, config)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_PER_EIGHT: CooldownConfig = CooldownConfig {
        uses: 3,
        per_seconds: 8,
    };

    #[test]
    fn test_allows_uses_then_blocks() {
        let tracker = CooldownTracker::new();
        let start = Instant::now();
        let scope = CooldownScope::Guild(1);

        for i in 0..3 {
            let at = start + Duration::from_secs(i);
            assert!(tracker.hit_at("steal", scope, THREE_PER_EIGHT, at).is_ok());
        }

        let err = tracker
            .hit_at("steal", scope, THREE_PER_EIGHT, start + Duration::from_secs(3))
            .unwrap_err();
        let CooldownError::OnCooldown { remaining, .. } = err;
        assert_eq!(remaining, Duration::from_secs(5));
    }

    #[test]
    fn test_window_slides() {
        let tracker = CooldownTracker::new();
        let start = Instant::now();
        let scope = CooldownScope::Channel(9);

        for _ in 0..3 {
            tracker.hit_at("emoji", scope, THREE_PER_EIGHT, start).unwrap();
        }
        assert!(tracker
            .hit_at("emoji", scope, THREE_PER_EIGHT, start + Duration::from_secs(7))
            .is_err());
        assert!(tracker
            .hit_at("emoji", scope, THREE_PER_EIGHT, start + Duration::from_secs(8))
            .is_ok());
    }

    #[test]
    fn test_buckets_are_independent() {
        let tracker = CooldownTracker::new();
        let now = Instant::now();

        for _ in 0..3 {
            tracker
                .hit_at("steal", CooldownScope::Guild(1), THREE_PER_EIGHT, now)
                .unwrap();
        }

        assert!(tracker
            .hit_at("steal", CooldownScope::Guild(2), THREE_PER_EIGHT, now)
            .is_ok());
        assert!(tracker
            .hit_at("emojilock add", CooldownScope::Guild(1), THREE_PER_EIGHT, now)
            .is_ok());
        assert!(tracker
            .hit_at("steal", CooldownScope::Channel(1), THREE_PER_EIGHT, now)
            .is_ok());
    }

    #[test]
    fn test_prune_drops_idle_buckets() {
        let tracker = CooldownTracker::new();
        let start = Instant::now();

        tracker
            .hit_at("emoji", CooldownScope::Channel(1), THREE_PER_EIGHT, start)
            .unwrap();
        tracker
            .hit_at(
                "emoji",
                CooldownScope::Channel(2),
                THREE_PER_EIGHT,
                start + Duration::from_secs(30),
            )
            .unwrap();
        assert_eq!(tracker.len(), 2);

        tracker.prune(start + Duration::from_secs(40), Duration::from_secs(20));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_error_message_rounds_up_to_a_second() {
        let err = CooldownError::OnCooldown {
            command: "steal".into(),
            remaining: Duration::from_millis(200),
        };
        assert_eq!(err.to_string(), "`steal` is on cooldown here, try again in 1s.");
    }

    #[test]
    fn test_error_message_rounds_partial_seconds_up() {
        let err = CooldownError::OnCooldown {
            command: "emoji".into(),
            remaining: Duration::from_millis(5_900),
        };
        assert_eq!(err.to_string(), "`emoji` is on cooldown here, try again in 6s.");

        assert_eq!(whole_seconds(&Duration::from_secs(5)), 5);
        assert_eq!(whole_seconds(&Duration::ZERO), 1);
    }
}
