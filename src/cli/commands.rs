use std::fmt::Display;
use std::io;
use std::str::FromStr;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::arena::TwoThreeTree;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{RenderSettings, RenderStyle, Settings, ValueKind};
use crate::tree_traits::TreeDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Print,
    Check,
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Commands::Completion { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = effective_settings(cli)?;
    debug!(?settings, "effective settings");

    match &cli.command {
        Commands::Insert { values } => _values(&settings, values, Action::Print),
        Commands::Bfs { values } => {
            let mut settings = settings;
            settings.render.style = RenderStyle::Bfs;
            _values(&settings, values, Action::Print)
        }
        Commands::Check { values } => _values(&settings, values, Action::Check),
        Commands::Config { command } => _config(&settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Loads the layered settings and applies command-line overrides on top.
pub fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(kind) = cli.kind {
        settings.value_kind = kind;
    }
    if let Some(style) = cli.style {
        settings.render.style = style;
    }
    if cli.heights {
        settings.render.show_height = true;
    }
    Ok(settings)
}

#[instrument(skip(settings))]
fn _values(settings: &Settings, values: &[String], action: Action) -> CliResult<()> {
    match settings.value_kind {
        ValueKind::Int => {
            let parsed = parse_values::<i64>(values)?;
            _run(settings, parsed, action)
        }
        ValueKind::Str => _run(settings, values.to_vec(), action),
    }
}

fn _run<T: Ord + Display>(settings: &Settings, values: Vec<T>, action: Action) -> CliResult<()> {
    let tree = build_tree(values, action == Action::Check)?;
    match action {
        Action::Print => output::info(&format_tree(&tree, &settings.render)),
        Action::Check => {
            output::success(&format!(
                "{} values, height {}, {} levels",
                tree.len(),
                tree.height(),
                tree.depth()
            ));
            output::detail(&format!("leaves: {}", tree.leaf_nodes().len()));
        }
    }
    Ok(())
}

fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

pub fn parse_values<T>(values: &[String]) -> CliResult<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    values
        .iter()
        .map(|v| {
            v.parse::<T>().map_err(|e| CliError::InvalidValue {
                value: v.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Seeds a tree with the first value and inserts the rest in order.
///
/// With `check_each`, invariants are verified after every insertion.
pub fn build_tree<T: Ord>(values: Vec<T>, check_each: bool) -> CliResult<TwoThreeTree<T>> {
    let mut values = values.into_iter();
    let first = values
        .next()
        .ok_or_else(|| CliError::InvalidArgs("at least one value is required".to_string()))?;

    let mut tree = TwoThreeTree::new(first);
    for value in values {
        tree.insert(value)?;
        if check_each {
            tree.check_invariants()?;
        }
    }
    Ok(tree)
}

pub fn format_tree<T: Display, C>(tree: &TwoThreeTree<T, C>, render: &RenderSettings) -> String {
    match render.style {
        RenderStyle::Tree if render.show_height => tree.render(true).to_string(),
        RenderStyle::Tree => tree.to_tree_string().to_string(),
        RenderStyle::Levels => tree
            .levels()
            .iter()
            .map(|level| {
                level
                    .iter()
                    .map(|data| format!("({})", data.iter().join(", ")))
                    .join(" ")
            })
            .join("\n"),
        RenderStyle::Bfs => tree.values_breadth_first().iter().join(" "),
    }
}
