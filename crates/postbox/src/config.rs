//! Mailbox configuration.
//!
//! A [`MailboxConfig`] can be built in code through [`MailboxConfigBuilder`] or
//! deserialized from any `serde` format. Missing fields fall back to
//! [`MailboxConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::{MailboxError, MailboxResult};

/// Default number of messages a mailbox can hold.
pub const DEFAULT_CAPACITY: usize = 64;

/// Default label attached to a mailbox's tracing events.
pub const DEFAULT_NAME: &str = "mailbox";

/// How many waiters a successful `post` or `fetch` wakes.
///
/// Both policies are correct because every waiter re-validates its condition
/// after waking. `One` wakes the minimum; `All` drains large crowds of blocked
/// threads faster at the cost of extra context switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WakePolicy {
    /// Signal a single waiter per insert or remove.
    #[default]
    One,
    /// Broadcast to every waiter per insert or remove.
    All,
}

/// Mailbox configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailboxConfig {
    /// Maximum number of messages held at once.
    pub capacity: usize,
    /// Label used in tracing events.
    pub name: String,
    /// Waiter wake-up policy.
    pub wake_policy: WakePolicy,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            name: DEFAULT_NAME.to_string(),
            wake_policy: WakePolicy::One,
        }
    }
}

impl MailboxConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is 0 or the name is blank.
    pub fn validate(&self) -> MailboxResult<()> {
        if self.capacity == 0 {
            return Err(MailboxError::InvalidCapacity(self.capacity));
        }
        if self.name.trim().is_empty() {
            return Err(MailboxError::invalid_configuration(
                "name must not be empty",
            ));
        }
        Ok(())
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> MailboxConfigBuilder {
        MailboxConfigBuilder::default()
    }
}

/// Builder for `MailboxConfig`.
#[derive(Debug, Default)]
pub struct MailboxConfigBuilder {
    config: MailboxConfig,
}

impl MailboxConfigBuilder {
    /// Set the capacity.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the tracing label.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the wake policy.
    #[must_use]
    pub fn wake_policy(mut self, policy: WakePolicy) -> Self {
        self.config.wake_policy = policy;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> MailboxResult<MailboxConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
