// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background split worker.
//
// A split runs on tokio's blocking pool so the caller stays responsive. The
// worker talks back over an unbounded channel; the caller stops it through a
// shared flag that the splitter checks before each part. Once the flag is
// raised the worker stays silent: no `Finished` and no `Failed`.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use scanflow_core::error::ScanflowError;
use scanflow_core::human_errors::{self, GENERIC_FAILURE, Notification};
use scanflow_core::types::{JobId, SplitRequest};
use scanflow_document::{SplitOptions, SplitterService};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Messages from the worker to whoever holds the [`SplitHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// Percentage of parts written so far.
    Progress(u8),
    /// All parts written, in request order.
    Finished(Vec<PathBuf>),
    Failed(Notification),
}

/// Runs one split job off the async runtime.
pub struct SplitWorker;

impl SplitWorker {
    /// Start `request` on the blocking pool.
    pub fn spawn(service: SplitterService, request: SplitRequest) -> SplitHandle {
        Self::spawn_with_flag(service, request, Arc::new(AtomicBool::new(false)))
    }

    /// Like [`SplitWorker::spawn`] but observing an existing cancel flag.
    pub fn spawn_with_flag(
        service: SplitterService,
        request: SplitRequest,
        cancel: Arc<AtomicBool>,
    ) -> SplitHandle {
        let job_id = JobId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let flag = Arc::clone(&cancel);

        let task = tokio::task::spawn_blocking(move || {
            let is_cancelled = || flag.load(Ordering::SeqCst);
            let progress = |percent: u8| {
                if !is_cancelled() {
                    let _ = tx.send(WorkerEvent::Progress(percent));
                }
            };
            let options = SplitOptions {
                progress: Some(&progress),
                cancel: Some(&*flag),
                ..SplitOptions::default()
            };

            let event = match service.run(job_id, &request, options) {
                Ok(report) => {
                    info!(
                        %job_id,
                        files = report.files.len(),
                        elapsed_ms = report.elapsed().num_milliseconds(),
                        "Split job finished"
                    );
                    WorkerEvent::Finished(report.files)
                }
                Err(ScanflowError::Cancelled) => return,
                Err(e) => {
                    if e.is_validation() {
                        warn!(%job_id, error = %e, "Split request rejected");
                    } else {
                        error!(%job_id, error = %e, "Split job failed");
                    }
                    WorkerEvent::Failed(human_errors::notify(&e))
                }
            };

            if !is_cancelled() {
                let _ = tx.send(event);
            }
        });

        SplitHandle {
            job_id,
            cancel,
            events: rx,
            task: Some(task),
        }
    }
}

/// Caller side of a running split.
pub struct SplitHandle {
    job_id: JobId,
    cancel: Arc<AtomicBool>,
    events: mpsc::UnboundedReceiver<WorkerEvent>,
    task: Option<JoinHandle<()>>,
}

impl SplitHandle {
    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Ask the worker to stop before its next part.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Next event, or `None` once the worker is gone.
    ///
    /// A worker that panicked is reported once as the generic failure, unless
    /// the job was cancelled.
    pub async fn next_event(&mut self) -> Option<WorkerEvent> {
        if let Some(event) = self.events.recv().await {
            return Some(event);
        }

        let task = self.task.take()?;
        match task.await {
            Ok(()) => None,
            Err(e) => {
                error!(job_id = %self.job_id, error = %e, "Split worker crashed");
                if self.is_cancelled() {
                    None
                } else {
                    Some(WorkerEvent::Failed(Notification::error(GENERIC_FAILURE)))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Dictionary, Document, Object, ObjectId};
    use scanflow_core::human_errors::NotificationLevel;
    use scanflow_core::types::{PageRange, SplitMode};
    use std::path::Path;

    fn blank_pdf(dir: &Path, pages: u32) -> PathBuf {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let kids: Vec<ObjectId> = (0..pages)
            .map(|_| {
                doc.add_object(Dictionary::from_iter(vec![
                    ("Type", Object::Name(b"Page".to_vec())),
                    ("Parent", Object::Reference(pages_id)),
                ]))
            })
            .collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Count", Object::Integer(i64::from(pages))),
                (
                    "Kids",
                    Object::Array(kids.into_iter().map(Object::Reference).collect()),
                ),
            ])),
        );
        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let path = dir.join("scan.pdf");
        doc.save(&path).unwrap();
        path
    }

    fn fixed_request(source: PathBuf, output_dir: &Path, pages_per_file: u32) -> SplitRequest {
        SplitRequest {
            source,
            output_dir: output_dir.to_path_buf(),
            mode: SplitMode::Fixed { pages_per_file },
            base_filename: None,
        }
    }

    async fn drain(handle: &mut SplitHandle) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        while let Some(event) = handle.next_event().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn reports_progress_then_files() {
        let tmp = tempfile::tempdir().unwrap();
        let source = blank_pdf(tmp.path(), 4);
        let out = tmp.path().join("out");
        std::fs::create_dir(&out).unwrap();

        let mut handle =
            SplitWorker::spawn(SplitterService::new(), fixed_request(source, &out, 2));
        let events = drain(&mut handle).await;

        assert_eq!(
            events,
            vec![
                WorkerEvent::Progress(50),
                WorkerEvent::Progress(100),
                WorkerEvent::Finished(vec![
                    out.join("scan_sivut_1-2.pdf"),
                    out.join("scan_sivut_3-4.pdf"),
                ]),
            ]
        );
    }

    #[tokio::test]
    async fn invalid_range_fails_with_notification() {
        let tmp = tempfile::tempdir().unwrap();
        let source = blank_pdf(tmp.path(), 3);
        let request = SplitRequest {
            mode: SplitMode::Custom {
                ranges: vec![PageRange::new(2, 7)],
            },
            ..fixed_request(source, tmp.path(), 1)
        };

        let mut handle = SplitWorker::spawn(SplitterService::new(), request);
        let events = drain(&mut handle).await;

        assert_eq!(events.len(), 1);
        match &events[0] {
            WorkerEvent::Failed(n) => {
                assert_eq!(n.level, NotificationLevel::Error);
                assert!(n.message.contains("2-7"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancelled_job_is_silent() {
        let tmp = tempfile::tempdir().unwrap();
        let source = blank_pdf(tmp.path(), 6);
        let out = tmp.path().join("out");
        std::fs::create_dir(&out).unwrap();

        let flag = Arc::new(AtomicBool::new(true));
        let mut handle = SplitWorker::spawn_with_flag(
            SplitterService::new(),
            fixed_request(source, &out, 1),
            flag,
        );

        assert!(handle.is_cancelled());
        assert!(drain(&mut handle).await.is_empty());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }
}
