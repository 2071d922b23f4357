//! Walks the control plane: environments, clusters, and topics, with every
//! call wrapped in the retry engine.
//!
//! Expects `CONFLUENT_BASE_URL`, `CONFLUENT_API_KEY`, and
//! `CONFLUENT_API_SECRET` in the environment, plus an environment ID and a
//! cluster ID as positional arguments.

use anyhow::{Context, Result};
use confluent_client::resources::{ClusterManager, EnvironmentManager, TopicManager};
use confluent_client::{Client, ClientConfig};
use confluent_core::retry::{RetryExecutorBuilder, RetryPolicy, TracingObserver};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let environment_id = args.next().context("usage: manage_resources <environment-id> <cluster-id>")?;
    let cluster_id = args.next().context("usage: manage_resources <environment-id> <cluster-id>")?;

    let client = Client::new(ClientConfig::from_env()?)?;
    let policy = RetryPolicy::default().with_max_attempts(4);

    let environments = EnvironmentManager::new(client.clone());
    let executor = RetryExecutorBuilder::new()
        .with_policy(policy.clone())
        .with_observer(TracingObserver::new("list-environments"))
        .build();
    let all = executor.execute(|| environments.list()).await?;

    println!("=== Environments ===");
    for environment in &all {
        println!("{} ({})", environment.display_name, environment.id);
    }

    let clusters = ClusterManager::new(client.clone());
    let executor = RetryExecutorBuilder::new()
        .with_policy(policy.clone())
        .with_observer(TracingObserver::new("list-clusters"))
        .build();
    let all = executor.execute(|| clusters.list(&environment_id)).await?;

    println!("\n=== Clusters in {environment_id} ===");
    for cluster in &all {
        println!("{} ({}) status={}", cluster.name, cluster.id, cluster.status);
    }

    let topics = TopicManager::new(client);
    let executor = RetryExecutorBuilder::new()
        .with_policy(policy)
        .with_observer(TracingObserver::new("list-topics"))
        .build();
    let all = executor.execute(|| topics.list(&cluster_id)).await?;

    println!("\n=== Topics in {cluster_id} ===");
    for topic in &all {
        println!("{} partitions={}", topic.name, topic.partition_count);
    }

    Ok(())
}
