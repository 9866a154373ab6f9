// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Data model shared by the session state machine and the remote interfaces.

mod ids;
mod snapshot;
mod tool;

pub use ids::{Id, IdError, ProjectId, RepresentationId, ToolId};
pub use snapshot::{
    CanvasElement, DiagramEdge, DiagramNode, DiagramSnapshot, Selection, Subscriber,
};
pub use tool::{ContextualMenu, ContextualPalette, SourceElement, Tool, ToolSection};

/// Identifies the project a session belongs to and whether the current user
/// may edit its diagrams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    project_id: ProjectId,
    can_edit: bool,
}

impl ProjectContext {
    pub fn new(project_id: ProjectId, can_edit: bool) -> Self {
        Self {
            project_id,
            can_edit,
        }
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn can_edit(&self) -> bool {
        self.can_edit
    }
}
