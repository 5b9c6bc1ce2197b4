//! Topic descriptor types consumed by the metrics facade.

use crate::error::{CommonError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between group and topic in a qualified topic name.
pub const GROUP_SEPARATOR: char = '.';

/// Fully qualified topic name: the owning group plus the topic's own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TopicName {
    group_name: String,
    name: String,
}

impl TopicName {
    /// Create a topic name from its group and topic parts.
    #[must_use]
    pub fn new(group_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            name: name.into(),
        }
    }

    /// Parse a `group.topic` qualified name.
    ///
    /// The split happens on the last separator, so groups may themselves
    /// contain dots (`pl.allegro.orders` is group `pl.allegro`, topic
    /// `orders`).
    ///
    /// # Errors
    ///
    /// Returns `CommonError::InvalidTopicName` if there is no separator or
    /// either side of it is empty.
    pub fn from_qualified_name(qualified_name: &str) -> Result<Self> {
        match qualified_name.rsplit_once(GROUP_SEPARATOR) {
            Some((group, name)) if !group.is_empty() && !name.is_empty() => {
                Ok(Self::new(group, name))
            }
            _ => Err(CommonError::InvalidTopicName(qualified_name.to_string())),
        }
    }

    /// Group the topic belongs to.
    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Topic name without its group.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `group.topic` form used in logs and lookups.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}{GROUP_SEPARATOR}{}", self.group_name, self.name)
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{GROUP_SEPARATOR}{}", self.group_name, self.name)
    }
}

/// Broker acknowledgment mode requested by a topic's publishers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ack {
    /// Fire and forget.
    None,
    /// Wait for the partition leader only.
    #[default]
    Leader,
    /// Wait for all in-sync replicas.
    All,
}

impl Ack {
    /// Returns the ack mode as a string for logs and labels.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Ack::None => "none",
            Ack::Leader => "leader",
            Ack::All => "all",
        }
    }

    /// Whether publishing waits for every in-sync replica.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Ack::All)
    }
}

/// Topic descriptor. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    name: TopicName,
    #[serde(default)]
    ack: Ack,
}

impl Topic {
    /// Create a topic descriptor.
    #[must_use]
    pub fn new(name: TopicName, ack: Ack) -> Self {
        Self { name, ack }
    }

    /// Qualified name of the topic.
    #[must_use]
    pub fn name(&self) -> &TopicName {
        &self.name
    }

    /// Acknowledgment mode of the topic.
    #[must_use]
    pub fn ack(&self) -> Ack {
        self.ack
    }
}
