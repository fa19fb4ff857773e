//! The host bridge: every side effect the UI needs from the outside world.
//!
//! The UI never calls a bridge directly. It sends [`HostRequest`]s through a
//! [`HostHandle`] and receives [`HostReply`]s from the [`HostWorker`] on its
//! next tick, so a slow host never blocks input handling.

pub mod local;
pub mod worker;

pub use local::LocalHost;
pub use worker::{HostHandle, HostWorker};

use crate::io::library_io::LibraryError;
use crate::model::{Project, Tag};
use crate::ops::reorder::OrderSwap;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error("no project with id {0}")]
    ProjectNotFound(i64),
    #[error("no project at order index {0}")]
    IndexNotFound(i64),
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("already in the library: {0}")]
    Duplicate(String),
    #[error("invalid link: {0:?}")]
    InvalidLink(String),
    #[error("{program}: {message}")]
    Command { program: String, message: String },
}

/// Capabilities the launcher needs from its host.
///
/// Calls are made from the worker thread, one at a time.
pub trait HostBridge: Send {
    fn fetch_projects(&mut self) -> Result<Vec<Project>, BridgeError>;
    fn fetch_tags(&mut self) -> Result<Vec<Tag>, BridgeError>;
    fn add_project(&mut self, path: &str) -> Result<(), BridgeError>;
    fn add_project_link(&mut self, url: &str) -> Result<(), BridgeError>;
    /// Persist a project, merging any new tags into the catalog.
    fn update_project(&mut self, project: &Project) -> Result<(), BridgeError>;
    /// Exchange the projects holding `swap.from` and `swap.to`.
    fn swap_order(&mut self, swap: OrderSwap) -> Result<(), BridgeError>;
    /// Ask the user for a folder. `Ok(None)` when they cancel.
    fn pick_folder(&mut self) -> Result<Option<String>, BridgeError>;
    fn open_folder(&mut self, path: &str) -> Result<(), BridgeError>;
    fn open_url(&mut self, url: &str) -> Result<(), BridgeError>;
    fn minimize(&mut self) -> Result<(), BridgeError>;
    /// Called before the UI closes its window.
    fn trigger_close(&mut self) -> Result<(), BridgeError>;
    /// Called before the UI exits.
    fn quit(&mut self) -> Result<(), BridgeError>;
    fn log(&mut self, message: &str);
}

/// A request queued for the host. Close and quit are carried out by the UI
/// once the host acknowledges them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    FetchProjects,
    FetchTags,
    AddProject(String),
    AddProjectLink(String),
    UpdateProject(Project),
    SwapOrder(OrderSwap),
    PickFolder,
    OpenFolder(String),
    OpenUrl(String),
    Minimize,
    Close,
    Quit,
    Log(String),
}

impl HostRequest {
    pub fn label(&self) -> &'static str {
        match self {
            HostRequest::FetchProjects => "fetch_projects",
            HostRequest::FetchTags => "fetch_tags",
            HostRequest::AddProject(_) => "add_project",
            HostRequest::AddProjectLink(_) => "add_project_link",
            HostRequest::UpdateProject(_) => "update_project",
            HostRequest::SwapOrder(_) => "swap_order",
            HostRequest::PickFolder => "pick_folder",
            HostRequest::OpenFolder(_) => "open_folder",
            HostRequest::OpenUrl(_) => "open_url",
            HostRequest::Minimize => "minimize",
            HostRequest::Close => "close",
            HostRequest::Quit => "quit",
            HostRequest::Log(_) => "log",
        }
    }

    /// Does this request change the library?
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            HostRequest::AddProject(_)
                | HostRequest::AddProjectLink(_)
                | HostRequest::UpdateProject(_)
                | HostRequest::SwapOrder(_)
        )
    }
}

/// Result of a request, delivered back to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostReply {
    Projects(Vec<Project>),
    Tags(Vec<Tag>),
    /// A mutation landed; the UI re-fetches what it shows.
    Added,
    FolderPicked(Option<String>),
    /// The UI iconifies its own terminal; only the UI thread writes to it.
    Minimized,
    CloseRequested,
    QuitRequested,
    Failed { request: HostRequest, error: String },
}

/// Run one request against a bridge. Requests with nothing to report
/// (opening, logging, swaps and updates that succeeded) yield None.
pub fn execute<B: HostBridge + ?Sized>(bridge: &mut B, request: HostRequest) -> Option<HostReply> {
    let result = match &request {
        HostRequest::FetchProjects => bridge.fetch_projects().map(|p| Some(HostReply::Projects(p))),
        HostRequest::FetchTags => bridge.fetch_tags().map(|t| Some(HostReply::Tags(t))),
        HostRequest::AddProject(path) => bridge.add_project(path).map(|_| Some(HostReply::Added)),
        HostRequest::AddProjectLink(url) => {
            bridge.add_project_link(url).map(|_| Some(HostReply::Added))
        }
        HostRequest::UpdateProject(project) => bridge.update_project(project).map(|_| None),
        HostRequest::SwapOrder(swap) => bridge.swap_order(*swap).map(|_| None),
        HostRequest::PickFolder => bridge.pick_folder().map(|p| Some(HostReply::FolderPicked(p))),
        HostRequest::OpenFolder(path) => bridge.open_folder(path).map(|_| None),
        HostRequest::OpenUrl(url) => bridge.open_url(url).map(|_| None),
        HostRequest::Minimize => bridge.minimize().map(|_| Some(HostReply::Minimized)),
        HostRequest::Close => bridge.trigger_close().map(|_| Some(HostReply::CloseRequested)),
        HostRequest::Quit => bridge.quit().map(|_| Some(HostReply::QuitRequested)),
        HostRequest::Log(message) => {
            bridge.log(message);
            Ok(None)
        }
    };

    match result {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(request = request.label(), error = %e, "host request failed");
            bridge.log(&format!("{} failed: {}", request.label(), e));
            Some(HostReply::Failed {
                request,
                error: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ops::reorder::swap_by_index;
    use crate::ops::tag_ops::reconcile_tags;

    /// In-memory bridge that records what it was asked to do.
    #[derive(Default)]
    pub struct MemoryHost {
        pub projects: Vec<Project>,
        pub tags: Vec<Tag>,
        pub opened: Vec<String>,
        pub logs: Vec<String>,
        pub picked: Option<String>,
        pub fail_swaps: bool,
    }

    impl HostBridge for MemoryHost {
        fn fetch_projects(&mut self) -> Result<Vec<Project>, BridgeError> {
            Ok(self.projects.clone())
        }

        fn fetch_tags(&mut self) -> Result<Vec<Tag>, BridgeError> {
            Ok(self.tags.clone())
        }

        fn add_project(&mut self, path: &str) -> Result<(), BridgeError> {
            let id = self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            let idx = self.projects.len() as i64;
            self.projects.push(Project::local(id, path, path, idx));
            Ok(())
        }

        fn add_project_link(&mut self, url: &str) -> Result<(), BridgeError> {
            if url.is_empty() {
                return Err(BridgeError::InvalidLink(url.into()));
            }
            let id = self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            let idx = self.projects.len() as i64;
            self.projects.push(Project::link(id, url, url, idx));
            Ok(())
        }

        fn update_project(&mut self, project: &Project) -> Result<(), BridgeError> {
            let tags = reconcile_tags(&mut self.tags, &project.tags);
            let slot = self
                .projects
                .iter_mut()
                .find(|p| p.id == project.id)
                .ok_or(BridgeError::ProjectNotFound(project.id))?;
            *slot = Project {
                tags,
                ..project.clone()
            };
            Ok(())
        }

        fn swap_order(&mut self, swap: OrderSwap) -> Result<(), BridgeError> {
            if self.fail_swaps || !swap_by_index(&mut self.projects, swap) {
                return Err(BridgeError::IndexNotFound(swap.from));
            }
            Ok(())
        }

        fn pick_folder(&mut self) -> Result<Option<String>, BridgeError> {
            Ok(self.picked.clone())
        }

        fn open_folder(&mut self, path: &str) -> Result<(), BridgeError> {
            self.opened.push(path.to_string());
            Ok(())
        }

        fn open_url(&mut self, url: &str) -> Result<(), BridgeError> {
            self.opened.push(url.to_string());
            Ok(())
        }

        fn minimize(&mut self) -> Result<(), BridgeError> {
            Ok(())
        }

        fn trigger_close(&mut self) -> Result<(), BridgeError> {
            Ok(())
        }

        fn quit(&mut self) -> Result<(), BridgeError> {
            Ok(())
        }

        fn log(&mut self, message: &str) {
            self.logs.push(message.to_string());
        }
    }

    #[test]
    fn fetches_reply_with_data() {
        let mut host = MemoryHost {
            projects: vec![Project::local(1, "a", "/a", 0)],
            ..Default::default()
        };
        assert_eq!(
            execute(&mut host, HostRequest::FetchProjects),
            Some(HostReply::Projects(vec![Project::local(1, "a", "/a", 0)]))
        );
        assert_eq!(
            execute(&mut host, HostRequest::FetchTags),
            Some(HostReply::Tags(vec![]))
        );
    }

    #[test]
    fn fire_and_forget_requests_are_silent() {
        let mut host = MemoryHost::default();
        assert_eq!(execute(&mut host, HostRequest::OpenFolder("/x".into())), None);
        assert_eq!(execute(&mut host, HostRequest::Log("hello".into())), None);
        assert_eq!(host.opened, vec!["/x"]);
        assert_eq!(host.logs, vec!["hello"]);
    }

    #[test]
    fn failures_are_logged_and_reported() {
        let mut host = MemoryHost {
            fail_swaps: true,
            ..Default::default()
        };
        let request = HostRequest::SwapOrder(OrderSwap { to: 1, from: 0 });
        let reply = execute(&mut host, request.clone());
        match reply {
            Some(HostReply::Failed { request: r, error }) => {
                assert_eq!(r, request);
                assert!(error.contains("order index 0"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(host.logs.len(), 1);
        assert!(host.logs[0].starts_with("swap_order failed"));
    }

    #[test]
    fn window_requests_are_acknowledged() {
        let mut host = MemoryHost::default();
        assert_eq!(execute(&mut host, HostRequest::Minimize), Some(HostReply::Minimized));
        assert_eq!(execute(&mut host, HostRequest::Close), Some(HostReply::CloseRequested));
        assert_eq!(execute(&mut host, HostRequest::Quit), Some(HostReply::QuitRequested));
    }

    #[test]
    fn mutating_requests() {
        assert!(HostRequest::AddProject("/a".into()).is_mutating());
        assert!(HostRequest::SwapOrder(OrderSwap { to: 0, from: 1 }).is_mutating());
        assert!(!HostRequest::FetchProjects.is_mutating());
        assert!(!HostRequest::OpenUrl("u".into()).is_mutating());
    }
}
