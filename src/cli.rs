use std::path::PathBuf;

use clap::Parser;

use crate::sync::SyncMode;

#[derive(Parser, Debug)]
#[command(
    name = "riptide",
    about = "Synchronize a local directory subtree with an S3 bucket",
    version,
)]
pub struct Cli {
    /// Bucket name
    pub bucket_name: String,

    /// Local storage synchronization object path
    pub object_path: PathBuf,

    /// Local storage root path that corresponds to the bucket root;
    /// defaults to the object path (directory) or its parent (file)
    #[arg(short, long)]
    pub root_path: Option<PathBuf>,

    /// Path to a .csv file with access keys, resolved against the root
    /// path when relative
    #[arg(short, long, default_value = "accessKeys.csv")]
    pub credentials_path: PathBuf,

    /// Synchronization type: 0 - bidirectional, 1 - local storage
    /// replication, 2 - bucket replication
    #[arg(short = 't', long = "type", default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub sync_type: u8,

    /// Delete objects absent from the source side in one-way modes
    #[arg(short, long)]
    pub delete: bool,

    /// Bucket region
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// Custom endpoint for S3-compatible stores (MinIO, Spaces, R2)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Compute and print the action plan without transferring anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// The sync mode for this invocation. The range check on `--type` keeps
    /// the flag within the mapped values.
    pub fn mode(&self) -> SyncMode {
        SyncMode::from_type_flag(self.sync_type).unwrap_or(SyncMode::Bidirectional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positionals_and_defaults() {
        let cli = Cli::try_parse_from(["riptide", "my-bucket", "photos"]).unwrap();
        assert_eq!(cli.bucket_name, "my-bucket");
        assert_eq!(cli.object_path, PathBuf::from("photos"));
        assert_eq!(cli.credentials_path, PathBuf::from("accessKeys.csv"));
        assert_eq!(cli.sync_type, 0);
        assert_eq!(cli.mode(), SyncMode::Bidirectional);
        assert!(!cli.delete);
        assert!(!cli.dry_run);
        assert_eq!(cli.region, "us-east-1");
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn parses_mode_and_delete_flags() {
        let cli =
            Cli::try_parse_from(["riptide", "b", "p", "--type", "1", "--delete"]).unwrap();
        assert_eq!(cli.mode(), SyncMode::LocalReplica);
        assert!(cli.delete);

        let cli = Cli::try_parse_from(["riptide", "b", "p", "-t", "2"]).unwrap();
        assert_eq!(cli.mode(), SyncMode::BucketReplica);
    }

    #[test]
    fn rejects_out_of_range_type() {
        assert!(Cli::try_parse_from(["riptide", "b", "p", "--type", "3"]).is_err());
    }

    #[test]
    fn parses_root_and_credentials_paths() {
        let cli = Cli::try_parse_from([
            "riptide",
            "b",
            "p",
            "-r",
            "/srv/mirror",
            "-c",
            "/etc/keys.csv",
        ])
        .unwrap();
        assert_eq!(cli.root_path, Some(PathBuf::from("/srv/mirror")));
        assert_eq!(cli.credentials_path, PathBuf::from("/etc/keys.csv"));
    }

    #[test]
    fn parses_endpoint_and_output_options() {
        let cli = Cli::try_parse_from([
            "riptide",
            "b",
            "p",
            "--endpoint",
            "http://localhost:9000",
            "--dry-run",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(cli.dry_run);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
