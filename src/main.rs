use anyhow::anyhow;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use issue_steward::actions::ActionEngine;
use issue_steward::config::{ActionContext, load_policy};
use issue_steward::github::OctocrabClient;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "issue_steward=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let context = ActionContext::parse();

    if let Err(e) = run(context).await {
        tracing::error!("unable to execute action: {}", e);
        std::process::exit(1);
    }
}

async fn run(context: ActionContext) -> anyhow::Result<()> {
    // Only the outermost message is printed, so causes go into the message.
    let payload = context.read_payload().await.map_err(|e| {
        anyhow!(
            "cannot read event payload {}: {}",
            context.event_path.display(),
            e
        )
    })?;

    let github = OctocrabClient::from_token(context.token.clone(), context.repository.clone())
        .map_err(|e| anyhow!("cannot create GitHub client: {}", e))?;

    let policy = load_policy(
        &github,
        &context.repository,
        &context.config_path,
        &context.sha,
    )
    .await?;

    tracing::info!(
        repo = %context.repository,
        sha = %context.sha,
        event = %context.event_name,
        "running action"
    );

    let engine = ActionEngine::new(policy, context.repository.clone(), github);
    engine.dispatch(&context.event_name, &payload).await?;

    Ok(())
}
