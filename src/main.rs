//! deploy-notify CLI - keep a Slack message in sync with a deployment
//!
//! Usage: deploy-notify <COMMAND>
//!
//! Commands:
//!   create  Post the deployment message and remember it under an id
//!   update  Set the state of one step
//!   finish  Rewrite the banner once the deployment is over
//!   show    Print the stored handle for an id
//!   check   Verify the Slack token

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use deploy_notify::application::DEFAULT_FINISHED_BANNER;
use deploy_notify::config::{self, Config};
use deploy_notify::domain::services::DEFAULT_INITIAL_STATE;
use deploy_notify::{
    CreateOptions, DeploymentController, DeploymentId, FsBackend, MessageStore, NotifyError,
    SlackClient,
};

/// deploy-notify - post and update a deployment status message in Slack
#[derive(Parser, Debug)]
#[command(name = "deploy-notify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log failures as warnings and exit 0
    #[arg(long, global = true)]
    ignore_errors: bool,

    /// Config file (default: <user config dir>/deploy-notify/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Channel to post in (overrides SLACK_CHANNEL)
    #[arg(long, global = true, value_name = "ID")]
    channel: Option<String>,

    /// Directory holding message handles (overrides DEPLOY_NOTIFY_STATE_DIR)
    #[arg(long, global = true, value_name = "PATH")]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Post the deployment message and remember it under an id
    Create {
        /// Unique id for the deployment, used by later updates
        id: String,

        /// Steps of the deployment, in display order
        #[arg(required = true, value_name = "STEP")]
        steps: Vec<String>,

        /// State shown for every step until updated
        #[arg(short, long, default_value = DEFAULT_INITIAL_STATE)]
        initial_state: String,

        /// Banner text replacing the default one
        #[arg(short = 'e', long)]
        header: Option<String>,

        /// Environment scope; repeat to list every step once per environment
        #[arg(short = 'E', long = "environment", value_name = "NAME")]
        environments: Vec<String>,
    },

    /// Set the state of one step
    Update {
        /// Id given to `create`
        id: String,

        /// Step to update
        step: String,

        /// New state text
        state: String,

        /// Environment the step belongs to
        #[arg(short = 'E', long, value_name = "NAME")]
        environment: Option<String>,
    },

    /// Rewrite the banner once the deployment is over
    Finish {
        /// Id given to `create`
        id: String,

        /// Banner text
        #[arg(default_value = DEFAULT_FINISHED_BANNER)]
        text: String,
    },

    /// Print the stored handle for an id (no Slack call)
    Show {
        /// Id given to `create`
        id: String,
    },

    /// Verify the Slack token with auth.test
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Read before loading config so a broken config can still be ignored
    let ignore_from_env = std::env::var(config::ENV_IGNORE_ERRORS)
        .is_ok_and(|value| config::is_truthy(&value));

    let config = resolve_config(&cli);
    let ignore_errors = cli.ignore_errors
        || ignore_from_env
        || config
            .as_ref()
            .is_ok_and(|config| config.behavior.ignore_errors);

    let result = config.and_then(|config| run(cli.command, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err.downcast_ref::<NotifyError>().map(NotifyError::kind);
            if ignore_errors {
                tracing::warn!(kind = kind.unwrap_or("other"), "ignoring failure: {err:#}");
                ExitCode::SUCCESS
            } else {
                tracing::debug!(kind = kind.unwrap_or("other"), "command failed");
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,deploy_notify={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = config::load(cli.config.as_deref())?;

    if let Some(channel) = &cli.channel {
        config.slack.channel = Some(channel.clone());
    }
    if let Some(dir) = &cli.state_dir {
        config.state.dir = Some(dir.clone());
    }

    Ok(config)
}

fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Create {
            id,
            steps,
            initial_state,
            header,
            environments,
        } => cmd_create(config, &id, steps, initial_state, header, environments),
        Commands::Update {
            id,
            step,
            state,
            environment,
        } => cmd_update(config, &id, environment.as_deref(), &step, &state),
        Commands::Finish { id, text } => cmd_finish(config, &id, &text),
        Commands::Show { id } => cmd_show(config, &id),
        Commands::Check => cmd_check(config),
    }
}

fn message_store(config: &Config) -> MessageStore<FsBackend> {
    let dir = config.state_dir();
    tracing::debug!(state_dir = %dir.display(), "using state directory");
    MessageStore::new(FsBackend::new(dir))
}

fn slack_client(config: &Config) -> Result<SlackClient> {
    let token = config::slack_token(|key| std::env::var(key).ok())?;
    Ok(SlackClient::new(
        token,
        config.slack.api_url.clone(),
        config.timeout(),
    ))
}

fn controller(config: &Config) -> Result<DeploymentController<FsBackend, SlackClient>> {
    Ok(DeploymentController::new(
        message_store(config),
        slack_client(config)?,
    ))
}

fn cmd_create(
    config: &Config,
    id: &str,
    steps: Vec<String>,
    initial_state: String,
    header: Option<String>,
    environments: Vec<String>,
) -> Result<()> {
    let id: DeploymentId = id.parse()?;
    let channel = config.require_channel()?;
    let options = CreateOptions::new(channel, steps)
        .with_banner(header)
        .with_environments(environments)
        .with_initial_state(initial_state);

    let handle = controller(config)?.create(&id, &options)?;
    println!(
        "Posted deployment '{}' to {} (ts {})",
        id,
        handle.channel(),
        handle.remote_message_id()
    );
    Ok(())
}

fn cmd_update(
    config: &Config,
    id: &str,
    environment: Option<&str>,
    step: &str,
    state: &str,
) -> Result<()> {
    let id: DeploymentId = id.parse()?;
    controller(config)?.update(&id, environment, step, state)?;
    Ok(())
}

fn cmd_finish(config: &Config, id: &str, text: &str) -> Result<()> {
    let id: DeploymentId = id.parse()?;
    controller(config)?.set_banner(&id, text)?;
    Ok(())
}

fn cmd_show(config: &Config, id: &str) -> Result<()> {
    let id: DeploymentId = id.parse()?;
    let handle = message_store(config).load(&id)?;

    let output = serde_json::json!({
        "deployment_id": handle.deployment_id().as_str(),
        "remote_message_id": handle.remote_message_id(),
        "channel": handle.channel(),
        "document": handle.document(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_check(config: &Config) -> Result<()> {
    let client = slack_client(config)?;
    let identity = client.auth_test()?;
    println!(
        "Authenticated as {} on {} ({})",
        identity.user.as_deref().unwrap_or("unknown user"),
        identity.team.as_deref().unwrap_or("unknown team"),
        client.api_url()
    );
    Ok(())
}
