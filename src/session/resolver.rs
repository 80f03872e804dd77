// SPDX-License-Identifier: MPL-2.0
//! Reactive merge of identity events and profile lookups into a single
//! published [`SessionState`].
//!
//! The resolver owns one task; that task is the only writer of the state.
//! Profile lookups settle out of order, so every lookup is tagged with the
//! generation of the identity event that issued it and a completed lookup is
//! applied only while its generation is still current. Superseded results
//! are discarded, never merged.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::providers::{IdentityProvider, ProfileStore};
use super::{AuthUser, Identity, ProfileRecord, SessionState};

/// Settled profile lookup, tagged with the generation it was issued under
/// and the identity it belongs to.
struct LookupOutcome {
    generation: u64,
    identity: Identity,
    record: Option<ProfileRecord>,
}

/// Handle to the session pipeline.
///
/// Construction subscribes to the identity provider and spawns the owning
/// task; dropping the handle (or calling [`SessionResolver::shutdown`])
/// releases the subscription and guarantees no in-flight lookup mutates the
/// published state afterward.
pub struct SessionResolver {
    state_rx: watch::Receiver<SessionState>,
    task: JoinHandle<()>,
}

impl SessionResolver {
    /// Subscribes to `provider` and starts resolving against `profiles`.
    ///
    /// Must be called from within a tokio runtime. The published state
    /// starts as [`SessionState::default`] (loading) until the provider
    /// delivers its first event.
    pub fn spawn<I, P>(provider: &mut I, profiles: P) -> Self
    where
        I: IdentityProvider,
        P: ProfileStore + Send + Sync + 'static,
    {
        let identity_rx = provider.subscribe();
        let (state_tx, state_rx) = watch::channel(SessionState::default());
        let task = tokio::spawn(run(identity_rx, Arc::new(profiles), state_tx));
        Self { state_rx, task }
    }

    /// Snapshot of the current session state.
    pub fn state(&self) -> SessionState {
        self.state_rx.borrow().clone()
    }

    /// A receiver observing every published state transition. Stays valid
    /// after shutdown, holding the last published state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    /// Stops the pipeline. The identity subscription is released and any
    /// lookup still in flight settles into a closed channel.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for SessionResolver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<P>(
    mut identity_rx: mpsc::UnboundedReceiver<Option<Identity>>,
    profiles: Arc<P>,
    state_tx: watch::Sender<SessionState>,
) where
    P: ProfileStore + Send + Sync + 'static,
{
    let (lookup_tx, mut lookup_rx) = mpsc::unbounded_channel::<LookupOutcome>();
    let mut generation: u64 = 0;

    loop {
        tokio::select! {
            // Pending identity transitions drain ahead of settled lookups,
            // so a queued sign-out is never shadowed by a lookup result
            // that is about to become stale.
            biased;

            event = identity_rx.recv() => {
                let Some(event) = event else {
                    // Provider gone: subscription is over, state stays as
                    // last published.
                    break;
                };
                generation += 1;
                match event {
                    None => {
                        let _ = state_tx.send(SessionState::signed_out());
                    }
                    Some(identity) => {
                        // Previous user stays visible as stale-but-available
                        // while the lookup is in flight.
                        state_tx.send_modify(|state| state.loading = true);
                        spawn_lookup(generation, identity, &profiles, &lookup_tx);
                    }
                }
            }

            outcome = lookup_rx.recv() => {
                let Some(outcome) = outcome else { break };
                if outcome.generation != generation {
                    tracing::debug!(
                        issued = outcome.generation,
                        current = generation,
                        "discarding superseded profile lookup"
                    );
                    continue;
                }
                let user = AuthUser::merge(outcome.identity, outcome.record);
                let _ = state_tx.send(SessionState {
                    user: Some(user),
                    loading: false,
                });
            }
        }
    }
}

/// Issues one profile lookup on its own task. A lookup failure is logged
/// and treated as an absent record; the outcome always comes back over
/// `lookup_tx` unless the pipeline has already shut down.
fn spawn_lookup<P>(
    generation: u64,
    identity: Identity,
    profiles: &Arc<P>,
    lookup_tx: &mpsc::UnboundedSender<LookupOutcome>,
) where
    P: ProfileStore + Send + Sync + 'static,
{
    let profiles = Arc::clone(profiles);
    let lookup_tx = lookup_tx.clone();
    tokio::spawn(async move {
        let record = match profiles.profile(&identity.uid).await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(uid = %identity.uid, %err, "treating profile as absent");
                None
            }
        };
        let _ = lookup_tx.send(LookupOutcome {
            generation,
            identity,
            record,
        });
    });
}
