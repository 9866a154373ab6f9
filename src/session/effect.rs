// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The effect-scheduling pass.
//!
//! Effects are re-derived from the current state after every action instead of
//! being issued inside transitions. Each effect is idempotent and guarded by
//! the same precondition as its triggering transition; the tracker remembers
//! what has already been requested (channel key, pushed model revision,
//! announced selection) so a pass only emits what actually changed.

use crate::model::{DiagramSnapshot, RepresentationId, Selection, Subscriber};

use super::{SessionState, ViewState};

/// Work the runtime performs after a state update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Close the live channel; it no longer matches the session.
    CloseSubscription,
    /// Open the live channel for the displayed representation.
    OpenSubscription {
        representation_id: RepresentationId,
    },
    /// Discard the disposable inner container, if any.
    ReleaseSurface,
    /// Build a fresh inner container and engine for the displayed
    /// representation, if the mount is ready.
    InitializeEngine {
        representation_id: RepresentationId,
    },
    /// Fetch the tool catalog for the displayed representation.
    FetchToolSections {
        representation_id: RepresentationId,
    },
    /// Push the latest snapshot to the engine.
    PushModel { diagram: DiagramSnapshot },
    /// Push the externally-requested selection to the engine.
    PushSelection { selection: Selection },
    /// Echo the engine-reported selection to the surrounding UI.
    AnnounceSelection { selection: Selection },
    /// Report the subscriber set to the surrounding UI.
    AnnounceSubscribers { subscribers: Vec<Subscriber> },
}

#[derive(Debug, Default)]
pub struct EffectTracker {
    subscribed_to: Option<RepresentationId>,
    fetch_requested_for: Option<RepresentationId>,
    pushed_model_revision: u64,
    pushed_selection: Option<Selection>,
    announced_selection: Option<Selection>,
    announced_subscribers: Option<Vec<Subscriber>>,
}

impl EffectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one scheduling pass against the current state.
    pub fn derive(&mut self, state: &SessionState) -> Vec<Effect> {
        let mut effects = Vec::new();
        let displayed = state.displayed_representation_id().cloned();

        // The channel key is (project, representation); the project id is
        // fixed per runtime, so the representation id alone decides reopens.
        // A channel is only legal while READY.
        let desired = match state.view_state() {
            ViewState::Ready => displayed.clone(),
            _ => None,
        };
        if self.subscribed_to != desired {
            if self.subscribed_to.is_some() {
                effects.push(Effect::CloseSubscription);
            }
            if let Some(representation_id) = desired.clone() {
                effects.push(Effect::OpenSubscription { representation_id });
            }
            self.subscribed_to = desired;
        }

        match state.view_state() {
            ViewState::Loading => {
                if state.engine().is_none() {
                    if let Some(representation_id) = displayed.clone() {
                        effects.push(Effect::InitializeEngine { representation_id });
                    }
                }
            }
            ViewState::Empty | ViewState::Complete => {
                effects.push(Effect::ReleaseSurface);
            }
            ViewState::Ready => {}
        }

        // One catalog fetch per representation id, independent of the view
        // state; the loader applies the result only once READY.
        if displayed.is_some() && self.fetch_requested_for != displayed {
            if let Some(representation_id) = displayed.clone() {
                effects.push(Effect::FetchToolSections { representation_id });
            }
            self.fetch_requested_for = displayed;
        }

        if state.view_state() == ViewState::Ready
            && state.engine().is_some()
            && state.model_revision() != self.pushed_model_revision
        {
            if let Some(diagram) = state.diagram() {
                effects.push(Effect::PushModel {
                    diagram: diagram.clone(),
                });
            }
            self.pushed_model_revision = state.model_revision();
        }

        if state.selection() != self.pushed_selection.as_ref() {
            self.pushed_selection = state.selection().cloned();
            if state.view_state() == ViewState::Ready {
                if let Some(selection) = state.selection() {
                    effects.push(Effect::PushSelection {
                        selection: selection.clone(),
                    });
                }
            }
        }

        if state.new_selection() != self.announced_selection.as_ref() {
            self.announced_selection = state.new_selection().cloned();
            if let Some(selection) = state.new_selection() {
                effects.push(Effect::AnnounceSelection {
                    selection: selection.clone(),
                });
            }
        }

        if self.announced_subscribers.as_deref() != Some(state.subscribers()) {
            self.announced_subscribers = Some(state.subscribers().to_vec());
            effects.push(Effect::AnnounceSubscribers {
                subscribers: state.subscribers().to_vec(),
            });
        }

        effects
    }
}
