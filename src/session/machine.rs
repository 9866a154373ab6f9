// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The session lifecycle reducer.
//!
//! `reduce` is total: every action has a defined outcome in every view state,
//! possibly "ignored". Actions are applied one at a time to completion, so the
//! state invariants hold at every observable point between actions.
//!
//! Terminal stream signals (complete, stream error) funnel through one
//! teardown routine; non-fatal errors funnel through the single dismissible
//! banner field.

use tracing::debug;

use crate::model::DiagramSnapshot;

use super::{Action, Effect, EffectTracker, SessionState, ViewState};

/// Shown in COMPLETE. The server cannot distinguish a deleted diagram from
/// one that never existed, so neither does this message.
const DIAGRAM_GONE_MESSAGE: &str = "The diagram does not exist";

pub fn reduce(state: &mut SessionState, action: Action) {
    match action {
        Action::SwitchRepresentation { representation_id } => {
            if state.displays(&representation_id) {
                return;
            }
            debug!(
                representation_id = %representation_id,
                from = ?state.view_state,
                "switching representation"
            );
            state.engine = None;
            state.diagram = None;
            state.tool_sections.clear();
            state.contextual_palette = None;
            state.contextual_menu = None;
            state.selection = None;
            state.new_selection = None;
            state.default_tool = None;
            state.active_tool = None;
            state.source_element = None;
            state.current_root = None;
            state.subscribers.clear();
            state.message = None;
            // zoom_level is deliberately retained across switches.
            state.displayed_representation_id = Some(representation_id);
            state.view_state = ViewState::Loading;
        }
        Action::Initialize { instance } => {
            if state.view_state != ViewState::Loading
                || !state.displays(instance.representation_id())
            {
                debug!(
                    representation_id = %instance.representation_id(),
                    "discarding stale engine initialization"
                );
                return;
            }
            state.diagram = Some(DiagramSnapshot::empty(instance.representation_id()));
            state.engine = Some(instance);
            state.view_state = ViewState::Ready;
        }
        Action::HandleData {
            representation_id,
            diagram,
            subscribers,
        } => {
            // Completion wins over pending data: once COMPLETE, the id check
            // below fails only on a switch, so the view-state check is what
            // discards late pushes for a finished session.
            if state.view_state != ViewState::Ready || !state.displays(&representation_id) {
                debug!(representation_id = %representation_id, "discarding stale stream data");
                return;
            }
            state.diagram = Some(diagram);
            state.model_revision += 1;
            state.subscribers = subscribers;
        }
        Action::HandleComplete { representation_id } => {
            if !state.displays(&representation_id)
                || !matches!(state.view_state, ViewState::Loading | ViewState::Ready)
            {
                return;
            }
            complete(state, DIAGRAM_GONE_MESSAGE.to_owned());
        }
        Action::HandleError {
            representation_id,
            message,
        } => {
            if !state.displays(&representation_id) || state.view_state == ViewState::Complete {
                return;
            }
            complete(state, message);
        }
        Action::HandleErrorMessage { message } => {
            state.error_message = message;
        }
        Action::MutationFinished {
            representation_id,
            outcome,
        } => {
            if !state.displays(&representation_id) {
                debug!(representation_id = %representation_id, "discarding stale mutation result");
                return;
            }
            if let crate::remote::MutationOutcome::Error(payload) = outcome {
                state.error_message = Some(payload.message);
            }
        }
        // Handled by the tool catalog loader, which re-enters through
        // SetToolSections or HandleErrorMessage once the session is ready.
        Action::CatalogFetched { .. } => {}
        Action::Selection { selection } => {
            if state.view_state == ViewState::Ready {
                state.selection = selection;
            }
        }
        Action::SelectedElement { selection } => {
            if state.view_state == ViewState::Ready {
                state.new_selection = Some(selection);
            }
        }
        Action::SetContextualPalette { palette } => {
            state.contextual_palette = palette;
        }
        Action::SetContextualMenu { menu } => {
            state.contextual_menu = menu;
        }
        Action::SetDefaultTool { tool } => {
            state.default_tool = Some(tool);
        }
        Action::SetActiveTool { tool } => {
            state.active_tool = tool;
        }
        Action::SetSourceElement { source } => {
            state.source_element = source;
        }
        Action::SetCurrentRoot { root } => {
            state.current_root = root;
        }
        Action::SetToolSections {
            representation_id,
            sections,
        } => {
            if state.view_state == ViewState::Ready && state.displays(&representation_id) {
                state.tool_sections = sections;
            }
        }
        Action::SelectZoomLevel { level } => {
            state.zoom_level = level;
        }
    }
}

/// The single teardown routine for terminal stream signals. Detaches the
/// engine reference before anything else so no further model pushes can
/// reach it.
fn complete(state: &mut SessionState, message: String) {
    debug!(message = %message, "session complete");
    state.engine = None;
    state.diagram = None;
    state.tool_sections.clear();
    state.contextual_palette = None;
    state.contextual_menu = None;
    state.new_selection = None;
    state.active_tool = None;
    state.source_element = None;
    state.subscribers.clear();
    state.message = Some(message);
    state.view_state = ViewState::Complete;
}

/// Couples the reducer with the effect pass: every applied action yields the
/// effects re-derived from the resulting state.
#[derive(Debug, Default)]
pub struct SessionMachine {
    state: SessionState,
    tracker: EffectTracker,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn engine_mut(&mut self) -> Option<&mut crate::surface::EngineInstance> {
        self.state.engine_mut()
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        reduce(&mut self.state, action);
        self.tracker.derive(&self.state)
    }

    /// Re-runs the effect pass without applying an action, for external
    /// triggers that change no session state (e.g. the mount becoming ready).
    pub fn poll_effects(&mut self) -> Vec<Effect> {
        self.tracker.derive(&self.state)
    }
}
