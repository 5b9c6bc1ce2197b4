//! Pre-configured topics for tests.

use common::types::{Ack, Topic, TopicName};

/// Group used by every fixture topic.
pub const TEST_GROUP: &str = "pl.allegro.test";

/// Topic name used by every fixture topic.
pub const TEST_TOPIC: &str = "orders";

/// Labels attached to per-topic series of the fixture topics.
pub const TEST_TOPIC_LABELS: [(&str, &str); 2] = [("group", TEST_GROUP), ("topic", TEST_TOPIC)];

#[must_use]
pub fn test_topic_name() -> TopicName {
    TopicName::new(TEST_GROUP, TEST_TOPIC)
}

#[must_use]
pub fn topic_with_ack(ack: Ack) -> Topic {
    Topic::new(test_topic_name(), ack)
}

#[must_use]
pub fn ack_all_topic() -> Topic {
    topic_with_ack(Ack::All)
}

#[must_use]
pub fn ack_leader_topic() -> Topic {
    topic_with_ack(Ack::Leader)
}
