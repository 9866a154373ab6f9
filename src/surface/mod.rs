// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Render surface lifecycle.
//!
//! The rendering engine is foreign code: once it is handed a container, it may
//! destroy and recreate anything inside it as part of its own rendering. The
//! lifecycle therefore owns two tiers: a stable outer mount that the engine
//! never sees, and a disposable inner container that is handed to the engine
//! and only ever discarded as an opaque subtree. Selective removal of
//! engine-owned nodes is never attempted.

use std::fmt;

use crate::model::{DiagramSnapshot, RepresentationId, Selection, Tool};

/// A node in the mount tree. The engine may rewrite any part of the subtree it
/// was handed, including replacing nodes the client created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceNode {
    pub id: String,
    pub children: Vec<SurfaceNode>,
}

impl SurfaceNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }
}

/// The stable outer mount provided by the caller. Never handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub id: String,
}

impl MountPoint {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The disposable container handed to the engine.
///
/// One container serves exactly one engine instance; on teardown it is dropped
/// as a whole, whatever the engine left inside it.
#[derive(Debug)]
pub struct InnerContainer {
    generation: u64,
    root: SurfaceNode,
}

impl InnerContainer {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn root(&self) -> &SurfaceNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut SurfaceNode {
        &mut self.root
    }
}

/// Owns the outer mount and the current disposable inner container.
#[derive(Debug)]
pub struct RenderSurface {
    mount: MountPoint,
    inner: Option<InnerContainer>,
    next_generation: u64,
}

impl RenderSurface {
    pub fn new(mount: MountPoint) -> Self {
        Self {
            mount,
            inner: None,
            next_generation: 0,
        }
    }

    pub fn mount(&self) -> &MountPoint {
        &self.mount
    }

    /// Creates a fresh inner container, discarding any previous one first.
    /// Containers are never reused across representation ids or across a
    /// complete/loading cycle.
    pub fn prepare_inner(&mut self) -> &mut InnerContainer {
        self.discard_inner();
        let generation = self.next_generation;
        self.next_generation += 1;
        self.inner = Some(InnerContainer {
            generation,
            root: SurfaceNode::new("diagram-wrapper"),
        });
        self.inner.as_mut().expect("inner container just created")
    }

    pub fn inner(&self) -> Option<&InnerContainer> {
        self.inner.as_ref()
    }

    pub fn inner_mut(&mut self) -> Option<&mut InnerContainer> {
        self.inner.as_mut()
    }

    /// Drops the inner container as an opaque unit. The engine may have
    /// replaced its content entirely; nothing in it is inspected or removed
    /// selectively.
    pub fn discard_inner(&mut self) {
        self.inner = None;
    }
}

/// Commands pushed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineAction {
    ReplaceModel { diagram: DiagramSnapshot },
    SetSelection { selection: Selection },
    ZoomIn,
    ZoomOut,
    ZoomTo { level: f64 },
    FitToScreen,
    EditLabel { label_id: String },
    InvokeContextualTool {
        tool: Tool,
        element_id: String,
        x: f64,
        y: f64,
    },
    ClearCreationFeedback,
}

/// Events reported by the engine back to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineNotification {
    ElementSelected {
        element: crate::model::CanvasElement,
    },
    ToolInvoked {
        tool: Tool,
        source_element_id: String,
        target_element_id: Option<String>,
    },
    LabelEdited {
        label_id: String,
        new_text: String,
    },
}

/// The foreign rendering engine. Implementations receive the inner container
/// on every dispatch and may mutate it arbitrarily.
pub trait RenderingEngine: Send {
    fn dispatch(&mut self, mount: &mut InnerContainer, action: EngineAction);
}

/// Creates one engine per LOADING to READY transition.
pub trait EngineFactory {
    fn create(&self, representation_id: &RepresentationId) -> Box<dyn RenderingEngine>;
}

/// An engine bound to the representation id it was created for.
///
/// Owned exclusively by the session state; created once per transition into
/// READY and destroyed on any transition away from it.
pub struct EngineInstance {
    representation_id: RepresentationId,
    engine: Box<dyn RenderingEngine>,
}

impl EngineInstance {
    pub fn new(representation_id: RepresentationId, engine: Box<dyn RenderingEngine>) -> Self {
        Self {
            representation_id,
            engine,
        }
    }

    pub fn representation_id(&self) -> &RepresentationId {
        &self.representation_id
    }

    pub fn dispatch(&mut self, mount: &mut InnerContainer, action: EngineAction) {
        self.engine.dispatch(mount, action);
    }
}

impl fmt::Debug for EngineInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineInstance")
            .field("representation_id", &self.representation_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
