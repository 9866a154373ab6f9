// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session lifecycle state.
//!
//! One `SessionState` instance backs one open diagram tab. It is the single
//! source of truth for lifecycle and UI state; every change goes through the
//! reducer in [`machine`], and downstream effects are re-derived from the new
//! state by the [`effect`] tracker rather than issued inside transitions.

mod action;
mod effect;
mod machine;

pub use action::Action;
pub use effect::{Effect, EffectTracker};
pub use machine::{reduce, SessionMachine};

use crate::model::{
    ContextualMenu, ContextualPalette, DiagramSnapshot, RepresentationId, Selection,
    SourceElement, Subscriber, Tool, ToolSection,
};
use crate::surface::EngineInstance;

/// Lifecycle phase of the session. Governs which effects are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Blank, not bound to any representation. Initial and transient.
    Empty,
    /// Bound to a representation id, waiting for the engine initialization.
    Loading,
    /// Engine running, live channel open, diagram on screen.
    Ready,
    /// The server asserted that no further updates will ever arrive. Only a
    /// representation switch leaves this state.
    Complete,
}

#[derive(Debug)]
pub struct SessionState {
    view_state: ViewState,
    displayed_representation_id: Option<RepresentationId>,
    engine: Option<EngineInstance>,
    diagram: Option<DiagramSnapshot>,
    model_revision: u64,
    tool_sections: Vec<ToolSection>,
    contextual_palette: Option<ContextualPalette>,
    contextual_menu: Option<ContextualMenu>,
    selection: Option<Selection>,
    new_selection: Option<Selection>,
    default_tool: Option<Tool>,
    active_tool: Option<Tool>,
    source_element: Option<SourceElement>,
    current_root: Option<String>,
    zoom_level: f64,
    subscribers: Vec<Subscriber>,
    message: Option<String>,
    error_message: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            view_state: ViewState::Empty,
            displayed_representation_id: None,
            engine: None,
            diagram: None,
            model_revision: 0,
            tool_sections: Vec::new(),
            contextual_palette: None,
            contextual_menu: None,
            selection: None,
            new_selection: None,
            default_tool: None,
            active_tool: None,
            source_element: None,
            current_root: None,
            zoom_level: 1.0,
            subscribers: Vec::new(),
            message: None,
            error_message: None,
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    pub fn displayed_representation_id(&self) -> Option<&RepresentationId> {
        self.displayed_representation_id.as_ref()
    }

    /// True when `representation_id` is the one currently bound to the
    /// session. Every asynchronously-arrived result is checked through this
    /// before being applied.
    pub fn displays(&self, representation_id: &RepresentationId) -> bool {
        self.displayed_representation_id.as_ref() == Some(representation_id)
    }

    pub fn engine(&self) -> Option<&EngineInstance> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut EngineInstance> {
        self.engine.as_mut()
    }

    pub fn diagram(&self) -> Option<&DiagramSnapshot> {
        self.diagram.as_ref()
    }

    /// Monotonic counter bumped on every server push; lets the effect pass
    /// detect that the engine needs a new model without comparing snapshots.
    pub fn model_revision(&self) -> u64 {
        self.model_revision
    }

    pub fn tool_sections(&self) -> &[ToolSection] {
        &self.tool_sections
    }

    pub fn contextual_palette(&self) -> Option<&ContextualPalette> {
        self.contextual_palette.as_ref()
    }

    pub fn contextual_menu(&self) -> Option<&ContextualMenu> {
        self.contextual_menu.as_ref()
    }

    /// Selection requested by the surrounding UI; pushed to the engine.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Selection echoed back by the engine; announced to the surrounding UI.
    pub fn new_selection(&self) -> Option<&Selection> {
        self.new_selection.as_ref()
    }

    pub fn default_tool(&self) -> Option<&Tool> {
        self.default_tool.as_ref()
    }

    pub fn active_tool(&self) -> Option<&Tool> {
        self.active_tool.as_ref()
    }

    pub fn source_element(&self) -> Option<&SourceElement> {
        self.source_element.as_ref()
    }

    pub fn current_root(&self) -> Option<&str> {
        self.current_root.as_deref()
    }

    /// Retained across representation switches for UX continuity.
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    /// Human-readable explanation shown while COMPLETE.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Dismissible error banner, independent of the view state.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
