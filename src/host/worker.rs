use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::{HostBridge, HostReply, HostRequest, execute};

/// Cheap, cloneable sender of host requests. This is the only host
/// capability the UI holds.
#[derive(Debug, Clone)]
pub struct HostHandle {
    tx: mpsc::Sender<HostRequest>,
}

impl HostHandle {
    pub fn new(tx: mpsc::Sender<HostRequest>) -> Self {
        HostHandle { tx }
    }

    /// A handle with no worker behind it. Requests queue on the returned
    /// receiver, which tests inspect directly.
    pub fn detached() -> (HostHandle, mpsc::Receiver<HostRequest>) {
        let (tx, rx) = mpsc::channel();
        (HostHandle { tx }, rx)
    }

    /// Queue a request. Never blocks.
    pub fn send(&self, request: HostRequest) {
        if let Err(mpsc::SendError(request)) = self.tx.send(request) {
            tracing::warn!(request = request.label(), "host worker is gone, request dropped");
        }
    }

    /// Forward a message to the host's diagnostic sink.
    pub fn log(&self, message: impl Into<String>) {
        self.send(HostRequest::Log(message.into()));
    }
}

/// Owns a bridge on a background thread and runs requests in FIFO order.
pub struct HostWorker {
    rx: mpsc::Receiver<HostReply>,
    _thread: thread::JoinHandle<()>,
}

impl HostWorker {
    /// Move `bridge` onto a worker thread. The thread exits when every
    /// handle has been dropped.
    pub fn spawn<B: HostBridge + 'static>(mut bridge: B) -> std::io::Result<(HostHandle, HostWorker)> {
        let (req_tx, req_rx) = mpsc::channel::<HostRequest>();
        let (reply_tx, reply_rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name("zt-host".into())
            .spawn(move || {
                for request in req_rx {
                    tracing::debug!(request = request.label(), "host request");
                    if let Some(reply) = execute(&mut bridge, request)
                        && reply_tx.send(reply).is_err()
                    {
                        break;
                    }
                }
            })?;

        Ok((
            HostHandle::new(req_tx),
            HostWorker {
                rx: reply_rx,
                _thread: thread,
            },
        ))
    }

    /// Non-blocking poll. Returns all replies that have arrived since the
    /// last call, in order.
    pub fn poll(&self) -> Vec<HostReply> {
        let mut replies = Vec::new();
        while let Ok(reply) = self.rx.try_recv() {
            replies.push(reply);
        }
        replies
    }

    /// Wait for the next reply, up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<HostReply> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::tests::MemoryHost;
    use crate::model::Project;
    use crate::ops::reorder::OrderSwap;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn detached_handle_queues_requests() {
        let (handle, rx) = HostHandle::detached();
        handle.send(HostRequest::FetchTags);
        handle.log("hi");
        assert_eq!(rx.try_recv().unwrap(), HostRequest::FetchTags);
        assert_eq!(rx.try_recv().unwrap(), HostRequest::Log("hi".into()));
    }

    #[test]
    fn send_to_dropped_worker_does_not_panic() {
        let (handle, rx) = HostHandle::detached();
        drop(rx);
        handle.send(HostRequest::FetchProjects);
    }

    #[test]
    fn worker_runs_requests_in_order() {
        let host = MemoryHost {
            projects: vec![Project::local(1, "a", "/a", 0), Project::local(2, "b", "/b", 1)],
            ..Default::default()
        };
        let (handle, worker) = HostWorker::spawn(host).unwrap();
        handle.send(HostRequest::SwapOrder(OrderSwap { to: 1, from: 0 }));
        handle.send(HostRequest::FetchProjects);

        match worker.recv_timeout(WAIT) {
            Some(HostReply::Projects(projects)) => {
                assert_eq!(projects[0].order_idx, 1);
                assert_eq!(projects[1].order_idx, 0);
            }
            other => panic!("expected projects, got {:?}", other),
        }
    }

    #[test]
    fn worker_reports_failures() {
        let host = MemoryHost {
            fail_swaps: true,
            ..Default::default()
        };
        let (handle, worker) = HostWorker::spawn(host).unwrap();
        handle.send(HostRequest::SwapOrder(OrderSwap { to: 1, from: 0 }));
        assert!(matches!(
            worker.recv_timeout(WAIT),
            Some(HostReply::Failed { .. })
        ));
        assert!(worker.poll().is_empty());
    }
}
