//! CLI entrypoint for confluence
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use confluence_application::{
    AskGroupInput, AskGroupOutcome, AskGroupUseCase, NoProgress, ProgressNotifier,
    SetRequiredRoleUseCase,
};
use confluence_domain::{ConsensusRequest, GroupId, Invoker, RoleId};
use confluence_infrastructure::{
    ConfigLoader, JsonFileRoleStore, JsonlBatchLogger, OpenAiChatOracle,
    RosterDirectory,
};
use confluence_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
    TerminalPromptChannel,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type StdinLines = Lines<BufReader<Stdin>>;

type TerminalAskGroup =
    AskGroupUseCase<RosterDirectory, TerminalPromptChannel, OpenAiChatOracle, JsonFileRoleStore>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        let messages: Vec<String> = issues.iter().map(|issue| issue.to_string()).collect();
        bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }

    ConsoleFormatter::set_color(config.output.color);
    info!("Starting confluence");

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // === Dependency Injection ===
    let directory = Arc::new(RosterDirectory::from_config(&config.groups));
    let role_store = Arc::new(
        JsonFileRoleStore::open(&config.roles.store_path)
            .await
            .context("Failed to open the role store")?,
    );

    match command {
        Command::AskGroup {
            question,
            group,
            invoker,
            target,
            timeout,
        } => {
            let group = GroupId::new(group);
            let invoker = find_invoker(&directory, &group, &invoker)?;

            let mut input = AskGroupInput::new(group, invoker, question);
            if let Some(target) = target.as_deref() {
                input = input.with_target(target);
            }
            if let Some(minutes) = timeout {
                input = input.with_timeout_minutes(minutes);
            }

            let oracle = Arc::new(OpenAiChatOracle::from_config(&config.oracle)?);
            let channel = Arc::new(TerminalPromptChannel::new(directory.unreachable()));

            let mut use_case = AskGroupUseCase::new(
                directory,
                Arc::clone(&channel),
                oracle,
                role_store,
                config.behavior_config(),
            );
            if let Some(path) = &config.logging.batch_log {
                match JsonlBatchLogger::new(path) {
                    Some(logger) => use_case = use_case.with_logger(Arc::new(logger)),
                    None => warn!("Batch events will not be logged"),
                }
            }

            let progress: Box<dyn ProgressNotifier> = if cli.quiet {
                Box::new(NoProgress)
            } else if std::io::stderr().is_terminal() {
                Box::new(ProgressReporter::new())
            } else {
                Box::new(SimpleProgress)
            };

            let formatter = ConsoleFormatter::new(config.ask.chunk_size);
            let mut lines = BufReader::new(tokio::io::stdin()).lines();

            let outcome = run_batch(&use_case, input, progress.as_ref(), &channel, &mut lines)
                .await?;
            print_blocks(formatter.format_outcome(&outcome, cli.output));

            if let AskGroupOutcome::Consensus { request, .. } = &outcome
                && cli.output != OutputFormat::Json
            {
                offer_redo(&use_case, request, &formatter, &mut lines).await?;
            }
            Ok(())
        }
        Command::SetRequiredRole {
            role,
            group,
            invoker,
        } => {
            let group = GroupId::new(group);
            let invoker = find_invoker(&directory, &group, &invoker)?;
            let role = RoleId::new(role);

            SetRequiredRoleUseCase::new(role_store)
                .execute(&group, &invoker, role.clone())
                .await?;

            println!("Members of {} now need the {} role to ask the group.", group, role);
            Ok(())
        }
    }
}

fn find_invoker(directory: &RosterDirectory, group: &GroupId, who: &str) -> Result<Invoker> {
    if !directory.has_group(group) {
        bail!("Unknown group '{}'. Add it under [groups.{}] in the config.", group, group);
    }
    directory
        .invoker(group, who)
        .ok_or_else(|| anyhow!("'{}' is not a member of {}", who, group))
}

/// Run the batch while routing stdin lines to open prompts
async fn run_batch(
    use_case: &TerminalAskGroup,
    input: AskGroupInput,
    progress: &dyn ProgressNotifier,
    channel: &TerminalPromptChannel,
    lines: &mut StdinLines,
) -> Result<AskGroupOutcome> {
    let ask = use_case.execute_with_progress(input, progress);
    tokio::pin!(ask);

    let mut stdin_open = true;
    loop {
        tokio::select! {
            outcome = &mut ask => return Ok(outcome?),
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match channel.route_line(&line) {
                    Ok(receipt) => println!("{}", ConsoleFormatter::format_receipt(&receipt)),
                    Err(e) => eprintln!("{}", e),
                },
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!("Stopped reading answers: {}", e);
                    stdin_open = false;
                }
            },
        }
    }
}

/// Let the invoker regenerate the consensus from the same answers
async fn offer_redo(
    use_case: &TerminalAskGroup,
    request: &ConsensusRequest,
    formatter: &ConsoleFormatter,
    lines: &mut StdinLines,
) -> Result<()> {
    loop {
        println!("\nRedo the summary? [y/N]");
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        if !matches!(line.trim(), "y" | "Y" | "yes") {
            return Ok(());
        }

        match use_case.summarizer().redo(request).await {
            Ok(result) => print_blocks(formatter.format_redo(&result)),
            Err(e) => eprintln!("Consensus summary failed: {}", e),
        }
    }
}

fn print_blocks(blocks: Vec<String>) {
    for block in blocks {
        println!("{}", block);
    }
}
