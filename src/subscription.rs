// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Live update channel ownership.
//!
//! One channel per `(project, representation)` key, open only while the
//! session is READY. A key mismatch always forces a close-and-reopen; a
//! channel is never reused across ids. There is no reconnection: a terminal
//! signal leaves the session COMPLETE until the user switches representation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::model::{ProjectId, RepresentationId};
use crate::remote::{DiagramTransport, StreamEvent, SubscriptionInput};
use crate::session::Action;

/// Key of the live update channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelKey {
    pub project_id: ProjectId,
    pub representation_id: RepresentationId,
}

pub struct SubscriptionManager {
    transport: Arc<dyn DiagramTransport>,
    actions: mpsc::UnboundedSender<Action>,
    key: Option<ChannelKey>,
    task: Option<JoinHandle<()>>,
}

impl SubscriptionManager {
    pub fn new(
        transport: Arc<dyn DiagramTransport>,
        actions: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            transport,
            actions,
            key: None,
            task: None,
        }
    }

    pub fn is_open_for(&self, key: &ChannelKey) -> bool {
        self.key.as_ref() == Some(key) && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Opens the channel for `key`, closing any channel with a different key
    /// first. Idempotent for an already-open matching key.
    pub fn open(&mut self, key: ChannelKey) {
        if self.is_open_for(&key) {
            return;
        }
        self.close();
        debug!(
            project_id = %key.project_id,
            representation_id = %key.representation_id,
            "opening live channel"
        );
        let task = tokio::spawn(forward(
            Arc::clone(&self.transport),
            key.clone(),
            self.actions.clone(),
        ));
        self.key = Some(key);
        self.task = Some(task);
    }

    /// Closes the channel, if open. Events already queued for delivery still
    /// reach the reducer, which discards them by representation id.
    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("closing live channel");
            task.abort();
        }
        self.key = None;
    }
}

impl Drop for SubscriptionManager {
    fn drop(&mut self) {
        self.close();
    }
}

/// Routes stream events into session actions until a terminal signal arrives.
/// A sender dropped without an explicit `Complete` counts as a lost
/// connection.
async fn forward(
    transport: Arc<dyn DiagramTransport>,
    key: ChannelKey,
    actions: mpsc::UnboundedSender<Action>,
) {
    let representation_id = key.representation_id;
    let input = SubscriptionInput {
        project_id: key.project_id.as_str().to_owned(),
        diagram_id: representation_id.as_str().to_owned(),
    };

    let mut events = match transport.subscribe(input).await {
        Ok(events) => events,
        Err(err) => {
            let _ = actions.send(Action::HandleError {
                representation_id,
                message: err.to_string(),
            });
            return;
        }
    };

    loop {
        match events.recv().await {
            Some(StreamEvent::Data(data)) => {
                let _ = actions.send(Action::HandleData {
                    representation_id: representation_id.clone(),
                    diagram: data.diagram,
                    subscribers: data.subscribers,
                });
            }
            Some(StreamEvent::Complete) => {
                let _ = actions.send(Action::HandleComplete { representation_id });
                return;
            }
            Some(StreamEvent::Error { reason }) => {
                let _ = actions.send(Action::HandleError {
                    representation_id,
                    message: reason,
                });
                return;
            }
            None => {
                let _ = actions.send(Action::HandleError {
                    representation_id,
                    message: "the server closed the connection".to_owned(),
                });
                return;
            }
        }
    }
}
