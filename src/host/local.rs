use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::io::library_io::{Library, library_path, read_library, write_library};
use crate::model::config::HostConfig;
use crate::model::{Project, Tag};
use crate::ops::reorder::{OrderSwap, swap_by_index};
use crate::ops::tag_ops::reconcile_tags;

use super::{BridgeError, HostBridge};

/// File-backed host: a JSON library in the data directory plus the
/// platform's opener and folder picker.
#[derive(Debug, Clone)]
pub struct LocalHost {
    library: PathBuf,
    open_command: Vec<String>,
    folder_picker: Vec<String>,
}

impl LocalHost {
    pub fn new(data_dir: &Path, config: &HostConfig) -> Self {
        LocalHost {
            library: library_path(data_dir),
            open_command: config
                .open_command
                .clone()
                .unwrap_or_else(default_open_command),
            folder_picker: config
                .folder_picker
                .clone()
                .unwrap_or_else(default_folder_picker),
        }
    }

    pub fn library_path(&self) -> &Path {
        &self.library
    }

    fn load(&self) -> Result<Library, BridgeError> {
        Ok(read_library(&self.library)?)
    }

    fn store(&self, library: &Library) -> Result<(), BridgeError> {
        Ok(write_library(&self.library, library)?)
    }

    /// Append a project at the end of the order with the next id.
    fn push_project(
        &self,
        library: &mut Library,
        build: impl FnOnce(i64, i64) -> Project,
    ) -> Result<(), BridgeError> {
        let id = library.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let order_idx = library.projects.len() as i64;
        let project = build(id, order_idx);
        tracing::info!(id, name = %project.name, "project added");
        library.projects.push(project);
        self.store(library)
    }

    fn open(&self, target: &str) -> Result<(), BridgeError> {
        let (program, args) = split_command(&self.open_command)?;
        Command::new(program)
            .args(args)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BridgeError::Command {
                program: program.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}

impl HostBridge for LocalHost {
    fn fetch_projects(&mut self) -> Result<Vec<Project>, BridgeError> {
        Ok(self.load()?.projects)
    }

    fn fetch_tags(&mut self) -> Result<Vec<Tag>, BridgeError> {
        Ok(self.load()?.tags)
    }

    fn add_project(&mut self, path: &str) -> Result<(), BridgeError> {
        let path = path.trim();
        if path.is_empty() || !Path::new(path).is_dir() {
            return Err(BridgeError::NotADirectory(path.to_string()));
        }
        let mut library = self.load()?;
        if library.projects.iter().any(|p| p.path.as_deref() == Some(path)) {
            return Err(BridgeError::Duplicate(path.to_string()));
        }
        let name = folder_name(path);
        self.push_project(&mut library, |id, idx| Project::local(id, name, path, idx))
    }

    fn add_project_link(&mut self, url: &str) -> Result<(), BridgeError> {
        let url = url.trim();
        if url.is_empty() || url.chars().any(char::is_whitespace) {
            return Err(BridgeError::InvalidLink(url.to_string()));
        }
        let mut library = self.load()?;
        if library.projects.iter().any(|p| p.url.as_deref() == Some(url)) {
            return Err(BridgeError::Duplicate(url.to_string()));
        }
        let name = link_name(url);
        self.push_project(&mut library, |id, idx| Project::link(id, name, url, idx))
    }

    fn update_project(&mut self, project: &Project) -> Result<(), BridgeError> {
        let mut library = self.load()?;
        let slot = library
            .projects
            .iter()
            .position(|p| p.id == project.id)
            .ok_or(BridgeError::ProjectNotFound(project.id))?;
        let tags = reconcile_tags(&mut library.tags, &project.tags);
        library.projects[slot] = Project {
            tags,
            ..project.clone()
        };
        self.store(&library)
    }

    fn swap_order(&mut self, swap: OrderSwap) -> Result<(), BridgeError> {
        let mut library = self.load()?;
        if !swap_by_index(&mut library.projects, swap) {
            let missing = if library.projects.iter().any(|p| p.order_idx == swap.from) {
                swap.to
            } else {
                swap.from
            };
            return Err(BridgeError::IndexNotFound(missing));
        }
        if swap.from == swap.to {
            return Ok(());
        }
        self.store(&library)
    }

    fn pick_folder(&mut self) -> Result<Option<String>, BridgeError> {
        let (program, args) = split_command(&self.folder_picker)?;
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| BridgeError::Command {
                program: program.clone(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            return Ok(None);
        }
        let picked = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if picked.is_empty() { None } else { Some(picked) })
    }

    fn open_folder(&mut self, path: &str) -> Result<(), BridgeError> {
        self.open(path)
    }

    fn open_url(&mut self, url: &str) -> Result<(), BridgeError> {
        self.open(url)
    }

    fn minimize(&mut self) -> Result<(), BridgeError> {
        tracing::debug!("minimize requested");
        Ok(())
    }

    fn trigger_close(&mut self) -> Result<(), BridgeError> {
        tracing::debug!("close requested");
        Ok(())
    }

    fn quit(&mut self) -> Result<(), BridgeError> {
        tracing::debug!("quit requested");
        Ok(())
    }

    fn log(&mut self, message: &str) {
        tracing::info!(target: "ztouch::host", "{}", message);
    }
}

fn split_command(command: &[String]) -> Result<(&String, &[String]), BridgeError> {
    command.split_first().ok_or_else(|| BridgeError::Command {
        program: String::new(),
        message: "no command configured".into(),
    })
}

fn default_open_command() -> Vec<String> {
    let parts: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(target_os = "windows") {
        &["cmd", "/c", "start", ""]
    } else {
        &["xdg-open"]
    };
    parts.iter().map(|s| s.to_string()).collect()
}

fn default_folder_picker() -> Vec<String> {
    let parts: &[&str] = if cfg!(target_os = "macos") {
        &["osascript", "-e", "POSIX path of (choose folder)"]
    } else if cfg!(target_os = "windows") {
        &[
            "powershell",
            "-NoProfile",
            "-Command",
            "(New-Object -ComObject Shell.Application).BrowseForFolder(0, 'Select a project folder', 0).Self.Path",
        ]
    } else {
        &["zenity", "--file-selection", "--directory"]
    };
    parts.iter().map(|s| s.to_string()).collect()
}

/// Final component of a folder path
fn folder_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Last non-empty path segment of a URL, else its host, else the URL itself
fn link_name(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, r)| r);
    let rest = rest.split(['?', '#']).next().unwrap_or(rest);
    let mut segments = rest.split('/');
    let host = segments.next().unwrap_or("");
    let name = segments.filter(|s| !s.is_empty()).last().unwrap_or(host);
    if name.is_empty() {
        url.to_string()
    } else {
        name.to_string()
    }
}
