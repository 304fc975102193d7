//! S3 Actions
//!
//! Command-line front end for the bucket actions: create a bucket, upload an
//! object, list objects one page at a time.

mod cli;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use futures::TryStreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use s3_actions::s3::{
    credentials, AwsCredentials, Continuation, HttpFetcher, RequestSigner, S3Client, SigV4Signer,
    Unsigned,
};
use s3_actions::settings::{Settings, DEFAULT_REGION};

use crate::cli::{BucketArgs, Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for JSON output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    tracing::debug!("Starting S3 Actions v{}", env!("CARGO_PKG_VERSION"));

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    if let Command::Configure { region, show } = &cli.command {
        return configure(&cli, settings, region.clone(), *show);
    }

    settings.merge(cli.overrides());

    let (signer, profile_region) = build_signer(&cli, &settings).await?;
    let fetcher = HttpFetcher::new(signer, settings.request_timeout())
        .context("Failed to create HTTP client")?;
    let client = S3Client::new(fetcher)
        .with_endpoint(settings.endpoint()?)
        .with_page_size(settings.page_size);

    let region_for = |target: &BucketArgs| -> String {
        target
            .region
            .clone()
            .or_else(|| settings.region.clone())
            .or_else(|| profile_region.clone())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    };

    match cli.command {
        Command::CreateBucket(target) => {
            let region = region_for(&target);
            client
                .create_bucket(&target.bucket, &region)
                .await
                .with_context(|| format!("Failed to create bucket '{}'", target.bucket))?;
        }
        Command::PutObject {
            target,
            key,
            contents,
            file,
        } => {
            let region = region_for(&target);
            let body = match (contents, file) {
                (Some(contents), _) => contents.into_bytes(),
                (None, Some(path)) => std::fs::read(&path)
                    .with_context(|| format!("Failed to read {:?}", path))?,
                (None, None) => anyhow::bail!("either --contents or --file is required"),
            };
            client
                .put_object(&target.bucket, &region, &key, body)
                .await
                .with_context(|| format!("Failed to upload '{}' to '{}'", key, target.bucket))?;
        }
        Command::ListObjects {
            target,
            continuation_token,
            all,
        } => {
            let region = region_for(&target);
            let cursor = continuation_token.map(Continuation::new);
            let mut stdout = std::io::stdout().lock();

            if all {
                let lister = client.lister();
                let records = lister.records(&target.bucket, &region, cursor);
                futures::pin_mut!(records);
                while let Some(record) = records
                    .try_next()
                    .await
                    .with_context(|| format!("Failed to list objects in '{}'", target.bucket))?
                {
                    writeln!(stdout, "{}", serde_json::to_string(&record)?)?;
                }
            } else {
                let page = client
                    .list_objects(&target.bucket, &region, cursor.as_ref())
                    .await
                    .with_context(|| format!("Failed to list objects in '{}'", target.bucket))?;
                writeln!(stdout, "{}", serde_json::to_string_pretty(&page)?)?;
            }
        }
        // Handled before credentials are resolved
        Command::Configure { .. } => {}
    }

    Ok(())
}

/// Pick the request signer: anonymous, explicit keys, or the AWS credential chain
///
/// Also returns the region configured for the resolved profile, if any.
async fn build_signer(
    cli: &Cli,
    settings: &Settings,
) -> Result<(Arc<dyn RequestSigner>, Option<String>)> {
    if cli.no_sign_request {
        let signer: Arc<dyn RequestSigner> = Arc::new(Unsigned);
        return Ok((signer, None));
    }

    if let (Some(access_key), Some(secret_key)) = (&cli.access_key, &cli.secret_key) {
        let credentials = AwsCredentials::new(access_key, secret_key, cli.session_token.clone());
        let signer: Arc<dyn RequestSigner> = Arc::new(SigV4Signer::new(credentials));
        return Ok((signer, None));
    }

    let resolved = credentials::resolve(settings.profile.as_deref())
        .await
        .context("Failed to resolve AWS credentials")?;
    let signer: Arc<dyn RequestSigner> = Arc::new(SigV4Signer::new(resolved.credentials));
    Ok((signer, resolved.region))
}

fn configure(cli: &Cli, mut settings: Settings, region: Option<String>, show: bool) -> Result<()> {
    if !show {
        let mut overrides = cli.overrides();
        overrides.region = region;
        settings.merge(overrides);

        let path = match &cli.config {
            Some(path) => {
                settings.save_to(path)?;
                path.clone()
            }
            None => settings.save()?,
        };
        tracing::info!("Saved settings to {:?}", path);
    }

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
