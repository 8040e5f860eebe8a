use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use riptide::cli::{Cli, OutputFormat};
use riptide::context::SyncContext;
use riptide::credentials::Credentials;
use riptide::snapshot;
use riptide::store::{ObjectStore, S3Store};
use riptide::sync::{reconcile, ActionPlan, ExecutionStats, Executor};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "riptide=debug"
    } else {
        "riptide=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = SyncContext::resolve(&cli.object_path, cli.root_path.as_deref())?;
    let credentials = Credentials::load(&cli.credentials_path, ctx.root_path())?;
    let store = S3Store::new(
        &cli.bucket_name,
        &cli.region,
        &credentials,
        cli.endpoint.as_deref(),
    )?;

    let local_tree = snapshot::local::build(&ctx)?;
    let objects = store.list_all_objects().await?;
    let bucket_tree = snapshot::bucket::build(&objects);

    let scope = ctx.relative_scope()?;
    let plan = reconcile(&scope, &local_tree, &bucket_tree, cli.mode());

    if cli.dry_run {
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
            OutputFormat::Text => print_plan(&plan),
        }
        return Ok(());
    }

    let executor = Executor::new(&ctx, &store);
    let stats = executor.apply(&plan, cli.delete).await?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => print_summary(&stats),
    }
    Ok(())
}

fn print_plan(plan: &ActionPlan) {
    let sections = [
        ("Bucket add", &plan.bucket_add),
        ("Bucket update", &plan.bucket_update),
        ("Local add", &plan.local_add),
        ("Local update", &plan.local_update),
        ("Local delete", &plan.local_delete),
        ("Bucket delete", &plan.bucket_delete),
    ];
    for (label, paths) in sections {
        if paths.is_empty() {
            continue;
        }
        println!("{label}:");
        for path in paths {
            println!("  {path}");
        }
    }
    if plan.is_empty() {
        println!("Nothing to synchronize");
    }
}

fn print_summary(stats: &ExecutionStats) {
    println!(
        "Uploaded: {}, downloaded: {}, deleted locally: {}, deleted in bucket: {}, failed: {}",
        stats.uploaded, stats.downloaded, stats.deleted_local, stats.deleted_bucket, stats.failed
    );
}
