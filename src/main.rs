//! tabline - Load posts into a timeline tab and print it
#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tabline::{Config, Post, SortMode, SortOrder, TabConfig, TabType};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    match parse_args(&args)? {
        Command::Show {
            posts,
            tab,
            sort,
            descending,
            config,
        } => show(
            &posts,
            tab.as_deref(),
            sort,
            descending,
            config.as_deref(),
        ),
        Command::Tabs { config } => list_tabs(config.as_deref()),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Show {
        posts: PathBuf,
        tab: Option<String>,
        sort: Option<SortMode>,
        descending: bool,
        config: Option<PathBuf>,
    },
    Tabs {
        config: Option<PathBuf>,
    },
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<Command> {
    if args.len() == 1 {
        return Ok(Command::Help);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "show" => {
            let posts = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing posts file (JSON array of posts)"))?
                .into();

            let mut tab = None;
            let mut sort = None;
            let mut descending = false;
            let mut config = None;
            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "--tab" | "-t" => {
                        let name = args
                            .get(i + 1)
                            .ok_or_else(|| anyhow::anyhow!("Missing tab name"))?;
                        tab = Some(name.clone());
                        i += 2;
                    }
                    "--sort" | "-s" => {
                        let name = args
                            .get(i + 1)
                            .ok_or_else(|| anyhow::anyhow!("Missing sort mode"))?;
                        let mode = SortMode::from_str(name)
                            .ok_or_else(|| tabline::Error::UnknownSortMode(name.clone()))?;
                        sort = Some(mode);
                        i += 2;
                    }
                    "--desc" | "-d" => {
                        descending = true;
                        i += 1;
                    }
                    "--config" | "-c" => {
                        config = Some(config_arg(args, i)?);
                        i += 2;
                    }
                    other => {
                        return Err(anyhow::anyhow!("Unknown option: {other}"));
                    }
                }
            }

            Ok(Command::Show {
                posts,
                tab,
                sort,
                descending,
                config,
            })
        }

        "tabs" => {
            let config = args
                .iter()
                .position(|a| a == "--config" || a == "-c")
                .map(|i| config_arg(args, i))
                .transpose()?;
            Ok(Command::Tabs { config })
        }

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'tabline --help' for usage"
        )),
    }
}

fn config_arg(args: &[String], i: usize) -> Result<PathBuf> {
    args.get(i + 1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("Missing config path"))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"tabline - timeline tab store

USAGE:
    tabline [COMMAND]

COMMANDS:
    show <posts.json> [OPTIONS]        Load posts into a tab and print it
      Options:
        -t, --tab <name>               Configured tab to use (default: first)
        -s, --sort <mode>              id, data, name, nickname, source
        -d, --desc                     Sort descending
        -c, --config <path>            Config file to use
      Examples:
        tabline show posts.json
        tabline show posts.json --tab Search --sort name --desc
        tabline show demos/posts.json --config demos/config.toml

    tabs [--config <path>]             List configured tabs

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

CONFIG:
    {}
"#,
        config_path
    );
}

fn print_version() {
    println!("tabline {}", tabline::VERSION);
}

fn show(
    posts_path: &Path,
    tab_name: Option<&str>,
    sort: Option<SortMode>,
    descending: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;

    let fallback = TabConfig::new("Recent", TabType::Home);
    let tab_config = match tab_name {
        Some(name) => config
            .find_tab(name)
            .ok_or_else(|| anyhow::anyhow!("No tab named '{}' in config", name))?,
        None => config.tabs.first().unwrap_or(&fallback),
    };

    let mut tab = config.build_tab(tab_config);
    if let Some(mode) = sort {
        tab.set_sort_mode(mode);
    }
    if descending {
        tab.set_sort_order(SortOrder::Descending);
    }

    let posts = Post::load_all(posts_path)
        .with_context(|| format!("Failed to load posts from {}", posts_path.display()))?;

    let filtered = !tab.filters().is_empty();
    let mut skipped = 0;
    for post in posts {
        // Tabs with filters only take what the filters pull in
        if filtered && !tab.evaluate_filters(&post).is_match() {
            skipped += 1;
            continue;
        }
        tab.stage(post);
    }

    let added = tab.submit();
    if !tab.is_sorted_by_id() {
        tab.sort();
    }
    tracing::debug!("Added {} posts, skipped {}", added, skipped);

    println!(
        "\n{} ({}) · {} posts · sorted by {} {}",
        tab.name(),
        tab.tab_type(),
        tab.all_count(),
        tab.sort_mode(),
        match tab.sort_order() {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    );
    if tab.unread_manage() {
        println!("Unread: {}", tab.unread_count());
    }
    println!("{}", "─".repeat(60));

    let oldest_unread = tab.oldest_unread_id();
    for post in tab.posts() {
        let marker = if !tab.unread_manage() || post.is_read {
            ' '
        } else if Some(post.id) == oldest_unread {
            '▶'
        } else {
            '●'
        };
        println!(
            "{} {:>20}  @{} · {} · via {}",
            marker,
            post.id,
            post.screen_name,
            post.relative_time(),
            post.source
        );
        println!("  {}", post.preview(72));
    }

    if skipped > 0 {
        println!("\n({} posts did not match this tab's filters)", skipped);
    }

    Ok(())
}

fn list_tabs(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    if config.tabs.is_empty() {
        println!("No tabs configured.");
        return Ok(());
    }

    println!("Configured tabs:\n");

    for tab in &config.tabs {
        let sort_mode = tab.sort_mode.unwrap_or(config.sort_mode);
        let sort_order = tab.sort_order.unwrap_or(config.sort_order);
        let unread = tab.unread_manage.unwrap_or(config.unread_manage);
        println!(
            "  {} [{}]{}\n    Sort: {} {:?} · Unread: {} · Filters: {}",
            tab.name,
            tab.tab_type,
            if tab.tab_type.is_default() { " (default)" } else { "" },
            sort_mode,
            sort_order,
            if unread { "on" } else { "off" },
            tab.filters.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("tabline")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_show_options() {
        let command = parse_args(&args(&["show", "posts.json", "-t", "Search", "-s", "name", "-d"]));
        match command.unwrap() {
            Command::Show {
                tab,
                sort,
                descending,
                config,
                ..
            } => {
                assert_eq!(tab.as_deref(), Some("Search"));
                assert_eq!(sort, Some(SortMode::Name));
                assert!(descending);
                assert!(config.is_none());
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_options_require_values() {
        assert!(parse_args(&args(&["show", "posts.json", "--tab"])).is_err());
        assert!(parse_args(&args(&["show", "posts.json", "--sort"])).is_err());
        assert!(parse_args(&args(&["show", "posts.json", "--config"])).is_err());
        assert!(parse_args(&args(&["tabs", "--config"])).is_err());
    }
}
