// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::RepresentationId;

use super::{
    EngineAction, EngineInstance, InnerContainer, MountPoint, RenderSurface, RenderingEngine,
    SurfaceNode,
};

/// An engine that, like the real foreign engine, throws away the content it
/// was handed and replaces it with its own tree.
struct ReplacingEngine;

impl RenderingEngine for ReplacingEngine {
    fn dispatch(&mut self, mount: &mut InnerContainer, _action: EngineAction) {
        let mut root = SurfaceNode::new("engine-root");
        root.children.push(SurfaceNode::new("engine-canvas"));
        *mount.root_mut() = root;
    }
}

fn surface() -> RenderSurface {
    RenderSurface::new(MountPoint::new("diagram-container"))
}

#[test]
fn prepare_inner_creates_a_fresh_wrapper() {
    let mut surface = surface();
    let inner = surface.prepare_inner();
    assert_eq!(inner.root().id, "diagram-wrapper");
    assert!(inner.root().children.is_empty());
}

#[test]
fn containers_are_never_reused_across_entries() {
    let mut surface = surface();
    let first = surface.prepare_inner().generation();
    surface.discard_inner();
    let second = surface.prepare_inner().generation();
    assert_ne!(first, second);
}

#[test]
fn discard_drops_engine_rewritten_content_wholesale() {
    let mut surface = surface();
    let representation_id = RepresentationId::new("d1").expect("id");
    let mut instance =
        EngineInstance::new(representation_id, Box::new(ReplacingEngine));

    let inner = surface.prepare_inner();
    instance.dispatch(inner, EngineAction::FitToScreen);
    // The engine replaced the wrapper subtree with its own nodes.
    assert_eq!(surface.inner().expect("inner").root().id, "engine-root");

    // Detach the engine first, then drop the container as an opaque unit.
    drop(instance);
    surface.discard_inner();
    assert!(surface.inner().is_none());
    assert_eq!(surface.mount().id, "diagram-container");
}

#[test]
fn prepare_inner_discards_any_previous_container() {
    let mut surface = surface();
    surface.prepare_inner();
    let second = surface.prepare_inner();
    assert_eq!(second.generation(), 1);
    assert_eq!(second.root().id, "diagram-wrapper");
}
