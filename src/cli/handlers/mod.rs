use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::host::{HostBridge, LocalHost};
use crate::model::{AppConfig, Location, Project};
use crate::ops::search::{SortDirection, SortState, filter_and_sort};
use crate::util::unicode::display_width;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(
    cli: Cli,
    config: &AppConfig,
    data_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let mut host = LocalHost::new(data_dir, &config.host);
    tracing::debug!(library = %host.library_path().display(), "cli");

    match cli.command {
        None => Ok(()),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(&mut host, args, json),
            Commands::Tags => cmd_tags(&mut host, json),
            Commands::Add(args) => cmd_add(&mut host, args),
            Commands::Link(args) => cmd_link(&mut host, args),
            Commands::Open(args) => cmd_open(&mut host, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    host: &mut impl HostBridge,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let projects = host.fetch_projects()?;
    let sort = SortState {
        key: args.sort.into(),
        direction: if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        },
    };
    let shown = filter_and_sort(&projects, args.search.as_deref().unwrap_or(""), sort);

    if json {
        let out: Vec<ProjectJson> = shown.iter().map(|p| project_to_json(p)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if shown.is_empty() {
        println!("no projects");
    } else {
        let name_width = shown
            .iter()
            .map(|p| display_width(&p.name))
            .max()
            .unwrap_or(0);
        for project in shown {
            println!("{}", format_project_line(project, name_width));
        }
    }
    Ok(())
}

fn cmd_tags(host: &mut impl HostBridge, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut tags = host.fetch_tags()?;
    tags.sort_by_key(|t| t.id);
    if json {
        let out: Vec<TagJson> = tags.iter().map(tag_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for tag in &tags {
            println!("{}", format_tag_line(tag));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(host: &mut impl HostBridge, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = match args.path {
        Some(p) => p,
        None => std::env::current_dir()?,
    };
    let abs = std::fs::canonicalize(&path)
        .map_err(|e| format!("cannot resolve '{}': {}", path.display(), e))?;
    let abs = abs.to_string_lossy();
    host.log(&format!("Adding project: {}", abs));
    host.add_project(&abs)?;
    println!("added {}", abs);
    Ok(())
}

fn cmd_link(host: &mut impl HostBridge, args: LinkArgs) -> Result<(), Box<dyn std::error::Error>> {
    let url = args.url.trim();
    host.add_project_link(url)?;
    println!("added {}", url);
    Ok(())
}

fn cmd_open(host: &mut impl HostBridge, args: OpenArgs) -> Result<(), Box<dyn std::error::Error>> {
    let projects = host.fetch_projects()?;
    let project = find_project(&projects, &args.project)?;
    match project.location() {
        Some(Location::Folder(path)) => host.open_folder(path)?,
        Some(Location::Link(url)) => host.open_url(url)?,
        None => return Err(format!("project '{}' has no location", project.name).into()),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a project by id, else by exact case-insensitive name.
fn find_project<'a>(projects: &'a [Project], query: &str) -> Result<&'a Project, String> {
    if let Ok(id) = query.parse::<i64>()
        && let Some(p) = projects.iter().find(|p| p.id == id)
    {
        return Ok(p);
    }
    let needle = query.to_lowercase();
    let mut matches = projects.iter().filter(|p| p.name.to_lowercase() == needle);
    match (matches.next(), matches.next()) {
        (Some(p), None) => Ok(p),
        (Some(_), Some(_)) => Err(format!("'{}' matches more than one project; use its id", query)),
        (None, _) => Err(format!("no project '{}'", query)),
    }
}
