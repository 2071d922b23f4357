//! Reconciler pattern: ensure a topic exists with the desired shape, the
//! way an operator would on every reconcile tick.
//!
//! Uses the conservative classification stance — a reconciler runs again
//! soon anyway, so only near-certainly transient faults are worth waiting
//! on. Expects the usual CONFLUENT_* environment variables plus a cluster
//! ID and topic name as positional arguments.

use anyhow::{Context, Result};
use confluent_client::resources::TopicManager;
use confluent_client::{Client, ClientConfig, ClientError};
use confluent_core::retry::{ConservativePolicy, RetryExecutorBuilder, RetryPolicy, TracingObserver};
use confluent_core::types::Topic;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let cluster_id = args.next().context("usage: reconcile_topic <cluster-id> <topic-name>")?;
    let topic_name = args.next().context("usage: reconcile_topic <cluster-id> <topic-name>")?;

    let client = Client::new(ClientConfig::from_env()?)?;
    let topics = TopicManager::new(client);

    let executor = RetryExecutorBuilder::new()
        .with_policy(
            RetryPolicy::default()
                .with_max_attempts(3)
                .with_initial_backoff(std::time::Duration::from_millis(500)),
        )
        .with_predicate(ConservativePolicy)
        .with_observer(TracingObserver::new("reconcile-topic"))
        .build();

    let existing = executor
        .execute(|| topics.get(&cluster_id, &topic_name))
        .await;

    match existing {
        Ok(topic) => {
            println!(
                "topic {} already exists with {} partitions, nothing to do",
                topic.name, topic.partition_count
            );
        }
        Err(err) if is_not_found(&err) => {
            println!("topic {topic_name} missing, creating it");
            let desired = Topic {
                name: topic_name.clone(),
                partition_count: 6,
                replication_factor: 3,
                config: [("cleanup.policy".to_string(), "delete".to_string())]
                    .into_iter()
                    .collect(),
            };
            executor
                .execute(|| topics.create(&cluster_id, &desired))
                .await?;
            println!("created topic {topic_name}");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn is_not_found(err: &confluent_core::retry::RetryError<ClientError>) -> bool {
    matches!(
        err.source_ref(),
        Some(ClientError::Api(api)) if api.is_not_found()
    )
}
