// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The diagram model as pushed by the server.
//!
//! A snapshot is replaced wholesale on every stream message; the client never
//! merges partial updates into it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::RepresentationId;

/// One complete revision of the diagram, as streamed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiagramSnapshot {
    pub id: String,
    pub kind: String,
    pub target_object_id: String,
    pub label: String,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

impl DiagramSnapshot {
    /// An empty snapshot bound to a representation id, used between the moment
    /// a session becomes ready and the first server push.
    pub fn empty(representation_id: &RepresentationId) -> Self {
        Self {
            id: representation_id.as_str().to_owned(),
            kind: String::new(),
            target_object_id: String::new(),
            label: String::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiagramNode {
    pub id: String,
    pub kind: String,
    pub label: String,
    pub target_object_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiagramEdge {
    pub id: String,
    pub kind: String,
    pub label: Option<String>,
    pub source_id: String,
    pub target_id: String,
}

/// Another session currently viewing or editing the same diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Subscriber {
    pub username: String,
}

/// A semantic selection, as exchanged with the surrounding UI (tree view,
/// tabs). Selections reference the semantic target object, not the graphical
/// element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: String,
    pub label: String,
    pub kind: String,
}

/// A graphical element as reported by the rendering engine on canvas clicks.
///
/// Selecting the diagram background reports the root element itself; selecting
/// anything else reports the element together with its semantic target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasElement {
    pub id: String,
    pub label: String,
    pub kind: String,
    pub root_id: String,
    pub target_object_id: String,
    pub target_object_label: String,
    pub target_object_kind: String,
}

impl CanvasElement {
    /// Normalizes a canvas pick into the selection announced to the
    /// surrounding UI: the root maps to itself, every other element maps to
    /// its semantic target object.
    pub fn to_selection(&self) -> Selection {
        if self.root_id == self.id {
            Selection {
                id: self.id.clone(),
                label: self.label.clone(),
                kind: self.kind.clone(),
            }
        } else {
            Selection {
                id: self.target_object_id.clone(),
                label: self.target_object_label.clone(),
                kind: self.target_object_kind.clone(),
            }
        }
    }
}
