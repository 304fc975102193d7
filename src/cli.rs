//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use s3_actions::settings::Settings;

/// Create S3 buckets, list their objects page by page and upload objects.
///
/// Listing prints one page as `{"result": [...], "continuation": {...}}`.
/// Pass the printed `continuationToken` back with `--continuation-token` to
/// get the next page, or use `--all` to walk every page.
///
/// ## Examples
///
///   s3-actions create-bucket -b my-bucket -r eu-west-1
///   s3-actions put-object -b my-bucket -r eu-west-1 --key a/b.txt --contents hello
///   s3-actions list-objects -b my-bucket -r eu-west-1 --all
#[derive(Parser, Debug)]
#[command(name = "s3-actions")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// AWS profile to resolve credentials from
    #[arg(long, env = "AWS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// AWS access key ID (overrides the credential chain)
    #[arg(long, global = true, requires = "secret_key")]
    pub access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, global = true, requires = "access_key")]
    pub secret_key: Option<String>,

    /// Session token for temporary credentials
    #[arg(long, global = true, requires = "access_key")]
    pub session_token: Option<String>,

    /// Send anonymous requests (public buckets)
    #[arg(long, global = true, conflicts_with = "access_key")]
    pub no_sign_request: bool,

    /// Custom S3-compatible endpoint URL (MinIO, LocalStack)
    #[arg(long, env = "S3_ENDPOINT_URL", global = true)]
    pub endpoint_url: Option<String>,

    /// Use path-style addressing with a custom endpoint
    #[arg(long, global = true)]
    pub path_style: bool,

    /// Use virtual-hosted addressing even if path style is saved
    #[arg(long, global = true, conflicts_with = "path_style")]
    pub no_path_style: bool,

    /// Maximum keys per listing page
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Settings file (defaults to the platform config folder)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a bucket
    CreateBucket(BucketArgs),

    /// Upload an object
    PutObject {
        #[command(flatten)]
        target: BucketArgs,

        /// Object key
        #[arg(short, long)]
        key: String,

        /// Object contents
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        contents: Option<String>,

        /// Read object contents from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List a bucket's objects
    ListObjects {
        #[command(flatten)]
        target: BucketArgs,

        /// Continue a previous listing
        #[arg(long)]
        continuation_token: Option<String>,

        /// Walk every page and print one record per line
        #[arg(long)]
        all: bool,
    },

    /// Save the given global options and region as defaults
    Configure {
        /// Default region
        #[arg(short, long)]
        region: Option<String>,

        /// Print the stored settings instead of changing them
        #[arg(long)]
        show: bool,
    },
}

/// Bucket and region a command operates on
#[derive(Args, Debug)]
pub struct BucketArgs {
    /// Bucket name
    #[arg(short, long)]
    pub bucket: String,

    /// Region the bucket lives in (e.g. us-east-1)
    #[arg(short, long, env = "AWS_REGION")]
    pub region: Option<String>,
}

impl Cli {
    /// Settings given on the command line, for overlaying onto stored ones
    pub fn overrides(&self) -> Settings {
        Settings {
            profile: self.profile.clone(),
            region: None,
            endpoint_url: self.endpoint_url.clone(),
            force_path_style: match (self.path_style, self.no_path_style) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            page_size: self.page_size,
            request_timeout_secs: self.timeout_secs,
        }
    }
}
