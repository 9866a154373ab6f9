// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tools and transient contextual UI state.
//!
//! A tool has exactly two shapes: node tools apply to a single element, edge
//! tools connect a source element to a target element. The kind is resolved
//! once, at command-issue time.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A tool offered by the server for the active diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tool {
    Node {
        id: String,
        label: String,
        image_url: Option<String>,
    },
    Edge {
        id: String,
        label: String,
        image_url: Option<String>,
    },
}

impl Tool {
    pub fn id(&self) -> &str {
        match self {
            Self::Node { id, .. } | Self::Edge { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Node { label, .. } | Self::Edge { label, .. } => label,
        }
    }

    pub fn is_edge_tool(&self) -> bool {
        matches!(self, Self::Edge { .. })
    }
}

/// An ordered group of tools, as returned by the tool-sections query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolSection {
    pub id: String,
    pub label: String,
    pub tools: Vec<Tool>,
}

/// The transient palette opened next to a selected element.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextualPalette {
    pub element_id: String,
    pub x: f64,
    pub y: f64,
}

/// The transient menu opened between the two endpoints of an edge being
/// created.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextualMenu {
    pub source_element_id: String,
    pub target_element_id: String,
    pub x: f64,
    pub y: f64,
}

/// The element an in-progress edge creation starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceElement {
    pub element_id: String,
    pub x: f64,
    pub y: f64,
}
