//! Message-passing front end for the engine.
//!
//! A [`Session`] runs each engine operation as its own task and delivers an
//! immutable [`Outcome`] on a channel. Presentation code keeps one slot per
//! outcome kind ([`ResultSlots`]) and replaces it wholesale on every message.
//! Dropping the session aborts any operation still in flight.

use chrono::Utc;
use dohscope_client::DohClient;
use dohscope_core::{
    AnswerSet, CertificateStatus, ChainResult, DohError, Domain, RecordType, Staleness,
};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Outcomes buffered before senders wait for the receiver
const CHANNEL_CAPACITY: usize = 32;

/// Engine operation that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Resolution with chain following
    Resolve,
    /// Certificate probe
    Certificate,
}

/// Message emitted by a [`Session`]
#[derive(Debug)]
pub enum Outcome {
    /// A resolution finished
    Resolved {
        /// Queried domain
        domain: Domain,
        /// Queried type
        record_type: RecordType,
        /// Initial and chained answers
        result: ChainResult,
    },
    /// A certificate probe finished
    Certificate {
        /// Probed domain
        domain: Domain,
        /// Classification
        status: CertificateStatus,
    },
    /// A staleness estimate was computed
    Staleness {
        /// Domain the answer belonged to
        domain: Domain,
        /// Estimate or `Unavailable`
        staleness: Staleness,
    },
    /// An operation failed
    Failed {
        /// Domain the operation was for
        domain: Domain,
        /// Which operation failed
        operation: Operation,
        /// Cause
        error: DohError,
    },
}

/// Runs engine operations concurrently and reports their outcomes
pub struct Session {
    client: DohClient,
    tx: mpsc::Sender<Outcome>,
    tasks: JoinSet<()>,
}

impl Session {
    /// Create a session and the receiver its outcomes arrive on
    #[must_use]
    pub fn new(client: DohClient) -> (Self, mpsc::Receiver<Outcome>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let session = Self {
            client,
            tx,
            tasks: JoinSet::new(),
        };
        (session, rx)
    }

    /// Start a resolution with one-hop CNAME following
    pub fn resolve(&mut self, domain: Domain, record_type: RecordType) {
        self.reap_finished();
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.tasks.spawn(async move {
            let outcome = match client.dns().resolve_with_chain(&domain, &record_type).await {
                Ok(result) => Outcome::Resolved {
                    domain,
                    record_type,
                    result,
                },
                Err(error) => Outcome::Failed {
                    domain,
                    operation: Operation::Resolve,
                    error,
                },
            };
            deliver(&tx, outcome).await;
        });
    }

    /// Start a certificate probe
    pub fn check_certificate(&mut self, domain: Domain) {
        self.reap_finished();
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.tasks.spawn(async move {
            let status = client.certificates().check(&domain).await;
            deliver(&tx, Outcome::Certificate { domain, status }).await;
        });
    }

    /// Estimate staleness from an answer obtained earlier
    ///
    /// The estimate is taken at the moment of the call and is tied to this
    /// answer; call again after every new resolution.
    pub async fn estimate(&self, domain: Domain, answers: &AnswerSet) {
        let staleness = Staleness::from_answers(answers, Utc::now());
        deliver(&self.tx, Outcome::Staleness { domain, staleness }).await;
    }

    /// Number of operations still running
    pub fn in_flight(&mut self) -> usize {
        self.reap_finished();
        self.tasks.len()
    }

    /// Drop finished tasks from the set, logging any that panicked
    fn reap_finished(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined {
                if e.is_panic() {
                    warn!(error = %e, "session operation panicked");
                }
            }
        }
    }

    /// Abort every operation still running
    pub fn cancel_all(&mut self) {
        debug!(in_flight = self.tasks.len(), "cancelling session operations");
        self.tasks.abort_all();
    }

    /// Wait for every running operation to deliver its outcome
    pub async fn join(&mut self) {
        while self.tasks.join_next().await.is_some() {}
    }
}

async fn deliver(tx: &mpsc::Sender<Outcome>, outcome: Outcome) {
    if tx.send(outcome).await.is_err() {
        debug!("outcome receiver dropped");
    }
}

/// Latest outcome of each kind, as held by a presentation layer
#[derive(Debug, Default)]
pub struct ResultSlots {
    /// Latest resolution
    pub resolved: Option<(Domain, RecordType, ChainResult)>,
    /// Latest certificate classification
    pub certificate: Option<(Domain, CertificateStatus)>,
    /// Latest staleness estimate
    pub staleness: Option<(Domain, Staleness)>,
    /// Latest failure
    pub failure: Option<(Domain, Operation, DohError)>,
}

impl ResultSlots {
    /// Replace the slot matching `outcome`
    ///
    /// A new resolution clears the staleness slot, since an estimate belongs
    /// to the answer it was computed from.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Resolved {
                domain,
                record_type,
                result,
            } => {
                self.staleness = None;
                self.resolved = Some((domain, record_type, result));
            }
            Outcome::Certificate { domain, status } => {
                self.certificate = Some((domain, status));
            }
            Outcome::Staleness { domain, staleness } => {
                self.staleness = Some((domain, staleness));
            }
            Outcome::Failed {
                domain,
                operation,
                error,
            } => {
                self.failure = Some((domain, operation, error));
            }
        }
    }

    /// Initial answer of the latest resolution
    #[must_use]
    pub fn answers(&self) -> Option<&AnswerSet> {
        self.resolved.as_ref().map(|(_, _, result)| result.initial())
    }
}
