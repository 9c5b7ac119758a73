// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Two-device ledger synchronization: a two-phase snapshot exchange over an
//! external reliable, ordered, message-based channel.
//!
//! The joiner opens by sending its full snapshot; the host merges it and
//! answers with its post-merge snapshot; the joiner merges that and confirms.
//! After the exchange both devices hold the union of all records that existed
//! on either side. Merges already applied when a channel dies are kept, not
//! rolled back.

use crate::error::LedgerError;
use crate::models::Snapshot;
use crate::store;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Wire messages. Exactly three kinds; the payload is always a full snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SyncMessage {
    #[serde(rename = "SYNC_DATA")]
    Data { payload: Snapshot },
    #[serde(rename = "SYNC_DATA_FINAL")]
    DataFinal { payload: Snapshot },
    #[serde(rename = "SYNC_COMPLETE")]
    Complete,
}

impl SyncMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Data { .. } => "SYNC_DATA",
            Self::DataFinal { .. } => "SYNC_DATA_FINAL",
            Self::Complete => "SYNC_COMPLETE",
        }
    }
}

/// The external point-to-point channel. Delivery and ordering are the
/// channel's responsibility; the session never retransmits. Tests inject a
/// fake; `net::TcpChannel` is the real one.
pub trait SyncChannel {
    fn send(&mut self, msg: &SyncMessage) -> Result<(), LedgerError>;
    fn close(&mut self);
}

/// Exactly one side per session. The host waits for a peer; the joiner
/// connects to the host's published address. Fixed for the session lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncRole {
    Host,
    Joiner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Hosting,
    Joining,
    Connecting,
    Syncing,
    Completed,
    Error(String),
}

/// Channel-driven inputs to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A peer was found (incoming connection accepted / dial succeeded).
    PeerFound,
    /// The channel is open and ready to carry messages.
    Opened,
    Message(SyncMessage),
    /// The channel closed. An error before `Completed`, ignored after.
    Closed,
    Failed(String),
}

/// The session state machine. All transitions go through `handle_event`;
/// `reset` is the only user-triggered escape and is destructive.
#[derive(Debug)]
pub struct SyncSession {
    pub state: SyncState,
    pub role: SyncRole,
}

impl SyncSession {
    pub fn host() -> Self {
        Self {
            state: SyncState::Hosting,
            role: SyncRole::Host,
        }
    }

    pub fn join() -> Self {
        Self {
            state: SyncState::Joining,
            role: SyncRole::Joiner,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == SyncState::Completed
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, SyncState::Completed | SyncState::Error(_))
    }

    /// Advances the machine on one channel event. Store or channel failures
    /// move the session to `Error` and also propagate, so drivers can stop
    /// pumping; whatever was merged before the failure stays merged.
    pub fn handle_event(
        &mut self,
        conn: &Connection,
        chan: &mut dyn SyncChannel,
        event: SyncEvent,
    ) -> Result<(), LedgerError> {
        match self.step(conn, chan, event) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state = SyncState::Error(e.to_string());
                Err(e)
            }
        }
    }

    fn step(
        &mut self,
        conn: &Connection,
        chan: &mut dyn SyncChannel,
        event: SyncEvent,
    ) -> Result<(), LedgerError> {
        match (self.state.clone(), event) {
            (SyncState::Hosting | SyncState::Joining, SyncEvent::PeerFound) => {
                self.state = SyncState::Connecting;
                Ok(())
            }
            (SyncState::Connecting, SyncEvent::Opened) => {
                self.state = SyncState::Syncing;
                // The joiner starts the cycle by offering its local snapshot.
                if self.role == SyncRole::Joiner {
                    let payload = store::snapshot(conn)?;
                    chan.send(&SyncMessage::Data { payload })?;
                }
                Ok(())
            }
            (SyncState::Syncing, SyncEvent::Message(SyncMessage::Data { payload }))
                if self.role == SyncRole::Host =>
            {
                // Merge the joiner's data, then answer with the consolidated
                // post-merge snapshot so the joiner ends up with the union.
                store::merge_snapshot(conn, &payload)?;
                let consolidated = store::snapshot(conn)?;
                chan.send(&SyncMessage::DataFinal {
                    payload: consolidated,
                })?;
                Ok(())
            }
            (SyncState::Syncing, SyncEvent::Message(SyncMessage::DataFinal { payload }))
                if self.role == SyncRole::Joiner =>
            {
                store::merge_snapshot(conn, &payload)?;
                chan.send(&SyncMessage::Complete)?;
                self.state = SyncState::Completed;
                Ok(())
            }
            (SyncState::Syncing, SyncEvent::Message(SyncMessage::Complete))
                if self.role == SyncRole::Host =>
            {
                self.state = SyncState::Completed;
                Ok(())
            }
            (SyncState::Completed, SyncEvent::Closed) => Ok(()),
            (_, SyncEvent::Closed) => Err(LedgerError::Channel(
                "channel closed before the sync completed".into(),
            )),
            (_, SyncEvent::Failed(msg)) => Err(LedgerError::Channel(msg)),
            (state, SyncEvent::Message(msg)) => Err(LedgerError::Channel(format!(
                "unexpected {} in state {:?}",
                msg.kind(),
                state
            ))),
            (state, event) => Err(LedgerError::Channel(format!(
                "unexpected {:?} in state {:?}",
                event, state
            ))),
        }
    }

    /// Forcibly tears down the channel and returns to `Idle`. Partial merges
    /// are not compensated.
    pub fn reset(&mut self, chan: &mut dyn SyncChannel) {
        chan.close();
        self.state = SyncState::Idle;
    }
}
