// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{
    ContextualMenu, ContextualPalette, DiagramSnapshot, RepresentationId, Selection,
    SourceElement, Subscriber, Tool, ToolSection,
};
use crate::remote::MutationOutcome;
use crate::surface::EngineInstance;

/// Everything that can happen to a session, from any of its triggers: mount
/// readiness, stream events, mutation results, the tool-catalog fetch and
/// direct user interaction.
///
/// Stream and completion actions carry the representation id they were issued
/// for; the reducer discards them when that id no longer matches the session.
#[derive(Debug)]
pub enum Action {
    /// Bind the session to a different representation. Routes through LOADING
    /// from every state.
    SwitchRepresentation {
        representation_id: RepresentationId,
    },
    /// The mount is ready and a fresh engine has been constructed for the
    /// currently displayed representation.
    Initialize { instance: EngineInstance },
    /// A model push arrived on the live channel.
    HandleData {
        representation_id: RepresentationId,
        diagram: DiagramSnapshot,
        subscribers: Vec<Subscriber>,
    },
    /// The server asserted that no further updates will ever arrive.
    HandleComplete {
        representation_id: RepresentationId,
    },
    /// The live channel failed at the transport level.
    HandleError {
        representation_id: RepresentationId,
        message: String,
    },
    /// Set or dismiss the non-fatal error banner.
    HandleErrorMessage { message: Option<String> },
    /// A fire-and-forget mutation finished.
    MutationFinished {
        representation_id: RepresentationId,
        outcome: MutationOutcome,
    },
    /// The tool-catalog fetch finished. Routed to the catalog loader; a no-op
    /// for the reducer itself.
    CatalogFetched {
        representation_id: RepresentationId,
        result: Result<Vec<ToolSection>, String>,
    },
    /// Selection requested by the surrounding UI.
    Selection { selection: Option<Selection> },
    /// Selection echoed back by the engine.
    SelectedElement { selection: Selection },
    SetContextualPalette {
        palette: Option<ContextualPalette>,
    },
    SetContextualMenu { menu: Option<ContextualMenu> },
    SetDefaultTool { tool: Tool },
    SetActiveTool { tool: Option<Tool> },
    SetSourceElement {
        source: Option<SourceElement>,
    },
    SetCurrentRoot { root: Option<String> },
    SetToolSections {
        representation_id: RepresentationId,
        sections: Vec<ToolSection>,
    },
    SelectZoomLevel { level: f64 },
}
