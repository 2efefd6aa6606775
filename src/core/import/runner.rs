//! Bulk import runner

use super::pacer::{Pacer, TokioPacer};
use super::types::{
    ImportError, ImportEvent, ImportJob, ImportRequest, JobContext, JobPhase, JobResult,
    TargetIdentifier,
};
use crate::core::resolver::{PrerequisiteLookup, RecordResolver};
use crate::core::webhooks::RemoteActionInvoker;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// Runs one bulk import at a time
///
/// Cloning is cheap; clones share the same job state and reservation, so an
/// observer can hold a clone while another task drives the run.
#[derive(Clone)]
pub struct BulkImportRunner {
    lookup: Arc<dyn PrerequisiteLookup>,
    resolver: Arc<dyn RecordResolver>,
    invoker: Arc<dyn RemoteActionInvoker>,
    pacer: Arc<dyn Pacer>,
    delay: Duration,
    reserved: Arc<AtomicBool>,
    state: Arc<watch::Sender<ImportJob>>,
    events: broadcast::Sender<ImportEvent>,
}

/// Targets resolved and ready to run
///
/// The runner that produced the plan stays reserved while it is alive and is
/// the only one it can run on. Dropping the plan without executing it
/// declines the job and frees the runner.
pub struct ImportPlan {
    runner: BulkImportRunner,
    context: JobContext,
    targets: Vec<TargetIdentifier>,
    delay: Duration,
    reservation: Reservation,
}

impl ImportPlan {
    pub fn total(&self) -> usize {
        self.targets.len()
    }

    pub fn context(&self) -> &JobContext {
        &self.context
    }

    /// Shown on the confirmation prompt: one delay per item
    pub fn estimated_duration(&self) -> Duration {
        self.delay.saturating_mul(self.targets.len() as u32)
    }

    /// Process every target in order, one at a time
    pub async fn execute(self) -> JobResult {
        let ImportPlan {
            runner,
            context,
            targets,
            reservation,
            ..
        } = self;
        runner.process(context, targets, reservation).await
    }
}

impl std::fmt::Debug for ImportPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportPlan")
            .field("context", &self.context)
            .field("total", &self.targets.len())
            .field("delay", &self.delay)
            .finish()
    }
}

/// Held from the start of resolution until the job ends or is declined
struct Reservation {
    flag: Arc<AtomicBool>,
    state: Arc<watch::Sender<ImportJob>>,
}

impl Drop for Reservation {
    fn drop(&mut self) {
        self.state.send_modify(|job| {
            job.phase = JobPhase::Idle;
            job.active = false;
        });
        self.flag.store(false, Ordering::Release);
    }
}

impl BulkImportRunner {
    /// Create a runner with the default pacing (tokio sleep, 3 s between items)
    pub fn new(
        lookup: Arc<dyn PrerequisiteLookup>,
        resolver: Arc<dyn RecordResolver>,
        invoker: Arc<dyn RemoteActionInvoker>,
    ) -> Self {
        let (state, _) = watch::channel(ImportJob::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            lookup,
            resolver,
            invoker,
            pacer: Arc::new(TokioPacer),
            delay: Duration::from_millis(crate::config::default_delay_ms()),
            reserved: Arc::new(AtomicBool::new(false)),
            state: Arc::new(state),
            events,
        }
    }

    /// Set the pause between two consecutive items
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replace the suspension mechanism
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Current job state
    pub fn snapshot(&self) -> ImportJob {
        self.state.borrow().clone()
    }

    /// Watch job state changes
    pub fn subscribe(&self) -> watch::Receiver<ImportJob> {
        self.state.subscribe()
    }

    /// Receive lifecycle events, including the final [`JobResult`]
    pub fn events(&self) -> broadcast::Receiver<ImportEvent> {
        self.events.subscribe()
    }

    /// Whether a job is resolving, awaiting confirmation or running
    pub fn is_busy(&self) -> bool {
        self.reserved.load(Ordering::Acquire)
    }

    /// Resolve and run in one go
    pub async fn run(&self, request: &ImportRequest) -> Result<JobResult, ImportError> {
        let plan = self.plan(request).await?;
        Ok(plan.execute().await)
    }

    /// Resolve the job context and targets without starting the job
    pub async fn plan(&self, request: &ImportRequest) -> Result<ImportPlan, ImportError> {
        let reservation = self.reserve()?;
        // Counters of the previous job are cleared once a new one is underway
        self.state.send_replace(ImportJob {
            phase: JobPhase::Resolving,
            ..ImportJob::default()
        });

        let context = match self.lookup.job_context(&request.tenant).await {
            Ok(Some(context)) => context,
            Ok(None) => {
                warn!("Tenant {} has no connected account", request.tenant);
                return Err(ImportError::PrerequisiteMissing {
                    tenant: request.tenant.clone(),
                });
            }
            Err(e) => {
                error!(
                    "Failed to look up connected account for tenant {}: {}",
                    request.tenant, e
                );
                return Err(ImportError::PrerequisiteMissing {
                    tenant: request.tenant.clone(),
                });
            }
        };

        let selection = &request.selection;
        let targets = self.resolver.resolve(selection).await.map_err(|e| {
            error!("Failed to resolve targets for scope {}: {}", selection.scope, e);
            ImportError::UnexpectedResolverError(e.to_string())
        })?;

        if targets.is_empty() {
            info!("Nothing to process in scope {}", selection.scope);
            return Err(ImportError::NothingToProcess {
                scope: selection.scope.clone(),
            });
        }

        if !selection.is_all() && targets.len() != selection.references.len() {
            warn!(
                "Selected {} references in scope {} but resolved {}",
                selection.references.len(),
                selection.scope,
                targets.len()
            );
        }

        info!(
            "{} targets found in scope {} for account {}",
            targets.len(),
            selection.scope,
            context.account_id
        );

        Ok(ImportPlan {
            runner: self.clone(),
            context,
            targets,
            delay: self.delay,
            reservation,
        })
    }

    async fn process(
        &self,
        context: JobContext,
        targets: Vec<TargetIdentifier>,
        reservation: Reservation,
    ) -> JobResult {
        let total = targets.len();
        let job_id = Uuid::new_v4();
        let started = Instant::now();

        self.state.send_replace(ImportJob {
            job_id: Some(job_id),
            phase: JobPhase::Running,
            active: true,
            total,
            current: 0,
            failures: 0,
            current_label: String::new(),
            started_at: Some(chrono::Utc::now()),
        });
        self.emit(ImportEvent::Started { job_id, total });
        info!(%job_id, total, "Starting bulk import");

        let mut failures = 0usize;

        for (index, target) in targets.iter().enumerate() {
            let position = index + 1;
            self.state.send_modify(|job| {
                job.current = position;
                job.current_label = target.label.clone();
            });
            self.emit(ImportEvent::ItemStarted {
                index: position,
                target: target.clone(),
            });

            debug!(%job_id, "Sending request for {} ({}/{})", target.id, position, total);
            if let Err(e) = self.invoker.invoke(target, &context).await {
                failures += 1;
                warn!(
                    %job_id,
                    category = ?e.category(),
                    "Failed to process {} (id: {}): {}",
                    target.label, target.id, e
                );
                self.state.send_modify(|job| job.failures += 1);
                self.emit(ImportEvent::ItemFailed {
                    index: position,
                    target: target.clone(),
                    error: e.to_string(),
                });
            }

            if position < total {
                debug!(%job_id, "Waiting {:?} before next request", self.delay);
                self.pacer.pause(self.delay).await;
            }
        }

        let result = JobResult {
            processed_count: total,
            success_count: total - failures,
            failure_count: failures,
            elapsed: started.elapsed(),
        };

        drop(reservation);
        info!(%job_id, "Bulk import finished: {}", result);
        self.emit(ImportEvent::Finished(result.clone()));

        result
    }

    fn reserve(&self) -> Result<Reservation, ImportError> {
        self.reserved
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ImportError::AlreadyRunning)?;

        Ok(Reservation {
            flag: self.reserved.clone(),
            state: self.state.clone(),
        })
    }

    fn emit(&self, event: ImportEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}
