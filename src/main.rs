use anyhow::Result;
use bundle_ops::admin::GitUsage;
use bundle_ops::commands::validators;
use bundle_ops::commands::*;
use bundle_ops::config::Config;
use bundle_ops::constants;
use bundle_ops::git::Logger;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bundle-ops")]
#[command(about = "Manage the Git lifecycle of the repositories behind one application")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
    config: String,

    /// Restrict the operation to these repositories (comma separated)
    #[arg(short, long, global = true, value_delimiter = ',')]
    repos: Option<Vec<String>>,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the repositories of a new project
    Init {
        /// Branch the local clones work on
        #[arg(long, default_value_t = constants::project::DEFAULT_WORK_BRANCH.to_string())]
        work_branch: String,

        /// Create the repositories in the local root only
        #[arg(long)]
        local_only: bool,

        /// Only write the files, without creating Git repositories
        #[arg(long, conflicts_with = "local_only")]
        no_git: bool,
    },

    /// Show branch, pending changes and last commit of every repository
    Status {
        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,

        /// Skip the remote repositories
        #[arg(long)]
        local_only: bool,
    },

    /// Show the commit history of one repository
    Log {
        /// Repository name, e.g. cash.svc
        repo: String,

        /// Read the remote instead of the working copy
        #[arg(long)]
        remote: bool,
    },

    /// Write the full status and history report as JSON
    Report {
        /// Publications folder; the report goes under "Operator Reports/DevOps"
        publications: PathBuf,

        /// Mask timestamps, hashes and authors
        #[arg(long)]
        mask: bool,

        /// Skip the remote repositories
        #[arg(long)]
        local_only: bool,
    },

    /// Work on a feature branch across all repositories
    Feature {
        #[command(subcommand)]
        action: FeatureCli,
    },

    /// Merge integration into master in the remote
    Promote,

    /// Publish the remote master to operate
    Release,

    /// Carry a hot fix from operate to master and integration
    Hotfix,

    /// Switch every repository to the same branch
    Checkout {
        branch: String,

        /// Switch the remote repositories instead of the working copies
        #[arg(long)]
        remote: bool,
    },
}

#[derive(Subcommand)]
enum FeatureCli {
    /// Create (or switch to) a feature branch
    Start { name: String },

    /// Commit all pending work on the feature branch and push it
    Commit {
        name: String,

        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// Merge the feature branch into integration and push integration
    Finish {
        name: String,

        /// Delete the feature branch afterwards
        #[arg(long)]
        remove: bool,
    },

    /// Delete a feature branch that was merged into integration
    Remove { name: String },

    /// Merge the latest integration into the feature branch
    Refresh { name: String },

    /// Pull the feature branch from the remote
    Pull { name: String },
}

impl From<FeatureCli> for FeatureAction {
    fn from(cli: FeatureCli) -> Self {
        match cli {
            FeatureCli::Start { name } => FeatureAction::Start { name },
            FeatureCli::Commit { name, message } => FeatureAction::Commit { name, message },
            FeatureCli::Finish { name, remove } => FeatureAction::Finish { name, remove },
            FeatureCli::Remove { name } => FeatureAction::Remove { name },
            FeatureCli::Refresh { name } => FeatureAction::Refresh { name },
            FeatureCli::Pull { name } => FeatureAction::Pull { name },
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let logger = if cli.quiet {
        Logger::quiet()
    } else {
        Logger::new()
    };

    if let Err(e) = run(cli, logger).await {
        logger.error("bundle-ops", &format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, logger: Logger) -> Result<()> {
    validators::validate_repository_names(&cli.repos)?;

    let config = Config::load(&cli.config)?;
    let context = CommandContext {
        config,
        repos: cli.repos,
        logger,
    };

    // Execute the appropriate command
    match cli.command {
        Commands::Init {
            work_branch,
            local_only,
            no_git,
        } => {
            validators::validate_branch_name(&work_branch)?;
            let usage = if no_git {
                GitUsage::NoGit
            } else if local_only {
                GitUsage::LocalOnly
            } else {
                GitUsage::LocalAndRemote
            };
            InitCommand { work_branch, usage }.execute(&context).await?;
        }
        Commands::Status { json, local_only } => {
            let usage = if local_only {
                GitUsage::LocalOnly
            } else {
                GitUsage::LocalAndRemote
            };
            StatusCommand { json, usage }.execute(&context).await?;
        }
        Commands::Log { repo, remote } => {
            validators::validate_repository_names(&Some(vec![repo.clone()]))?;
            LogCommand { repo, remote }.execute(&context).await?;
        }
        Commands::Report {
            publications,
            mask,
            local_only,
        } => {
            validators::validate_publications_folder(&publications)?;
            ReportCommand {
                publications_folder: publications,
                mask,
                local_only,
            }
            .execute(&context)
            .await?;
        }
        Commands::Feature { action } => {
            if let FeatureCli::Commit { message, .. } = &action {
                validators::validate_commit_message(message)?;
            }
            FeatureCommand {
                action: action.into(),
            }
            .execute(&context)
            .await?;
        }
        Commands::Promote => {
            ReleaseCommand {
                step: ReleaseStep::Promote,
            }
            .execute(&context)
            .await?;
        }
        Commands::Release => {
            ReleaseCommand {
                step: ReleaseStep::Release,
            }
            .execute(&context)
            .await?;
        }
        Commands::Hotfix => {
            ReleaseCommand {
                step: ReleaseStep::Hotfix,
            }
            .execute(&context)
            .await?;
        }
        Commands::Checkout { branch, remote } => {
            validators::validate_branch_name(&branch)?;
            CheckoutCommand { branch, remote }.execute(&context).await?;
        }
    }

    Ok(())
}
