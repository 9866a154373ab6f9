// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The session runtime: one logical actor per open diagram tab.
//!
//! Every trigger (user interaction, mount readiness, stream events, mutation
//! results, the catalog fetch) becomes an [`Action`] on one queue. Actions are
//! applied to completion, one at a time; the effects derived from the new
//! state run before the next action is taken. There is no concurrent mutation
//! of session state, so no locks: the only discipline asynchronous results
//! must follow is "check the current representation id and view state before
//! applying".
//!
//! Spawning of transport work requires an ambient Tokio runtime; a
//! current-thread runtime is sufficient.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::catalog::ToolCatalogLoader;
use crate::gateway::{MutationGateway, ToolTargets};
use crate::model::{
    ContextualMenu, ContextualPalette, ProjectContext, RepresentationId, Selection,
    SourceElement, Subscriber, Tool,
};
use crate::remote::DiagramTransport;
use crate::session::{Action, Effect, SessionMachine, SessionState, ViewState};
use crate::subscription::{ChannelKey, SubscriptionManager};
use crate::surface::{
    EngineAction, EngineFactory, EngineInstance, EngineNotification, MountPoint, RenderSurface,
};

/// Receives what the session announces to the surrounding UI.
pub trait SessionObserver {
    fn selection_changed(&mut self, _selection: &Selection) {}

    fn subscribers_changed(&mut self, _subscribers: &[Subscriber]) {}
}

pub struct SessionRuntime {
    context: ProjectContext,
    machine: SessionMachine,
    surface: Option<RenderSurface>,
    engines: Box<dyn EngineFactory>,
    observer: Box<dyn SessionObserver>,
    subscription: SubscriptionManager,
    gateway: MutationGateway,
    catalog: ToolCatalogLoader,
    actions_tx: mpsc::UnboundedSender<Action>,
    actions_rx: mpsc::UnboundedReceiver<Action>,
}

impl SessionRuntime {
    pub fn new(
        context: ProjectContext,
        transport: Arc<dyn DiagramTransport>,
        engines: Box<dyn EngineFactory>,
        observer: Box<dyn SessionObserver>,
    ) -> Self {
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        let subscription = SubscriptionManager::new(Arc::clone(&transport), actions_tx.clone());
        let gateway = MutationGateway::new(Arc::clone(&transport), actions_tx.clone());
        let catalog = ToolCatalogLoader::new(transport, actions_tx.clone());
        Self {
            context,
            machine: SessionMachine::new(),
            surface: None,
            engines,
            observer,
            subscription,
            gateway,
            catalog,
            actions_tx,
            actions_rx,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.machine.state()
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    /// Binds the caller-provided mount. Engine initialization can only happen
    /// once a mount is attached.
    pub fn attach_mount(&mut self, mount: MountPoint) {
        self.surface = Some(RenderSurface::new(mount));
        self.sync();
    }

    /// Shows another diagram. A no-op when `representation_id` is already
    /// displayed; otherwise everything is torn down and rebuilt through
    /// LOADING.
    pub fn display(&mut self, representation_id: RepresentationId) {
        if self.machine.state().displays(&representation_id) {
            return;
        }
        self.dispatch(Action::SwitchRepresentation { representation_id });
    }

    /// Selection requested by the surrounding UI (tree view, tabs).
    pub fn select(&mut self, selection: Option<Selection>) {
        self.dispatch(Action::Selection { selection });
    }

    pub fn report_error(&mut self, message: impl Into<String>) {
        self.dispatch(Action::HandleErrorMessage {
            message: Some(message.into()),
        });
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(Action::HandleErrorMessage { message: None });
    }

    pub fn zoom_in(&mut self) {
        self.engine_dispatch(EngineAction::ZoomIn);
    }

    pub fn zoom_out(&mut self) {
        self.engine_dispatch(EngineAction::ZoomOut);
    }

    pub fn fit_to_screen(&mut self) {
        self.engine_dispatch(EngineAction::FitToScreen);
    }

    pub fn set_zoom_level(&mut self, level: f64) {
        self.engine_dispatch(EngineAction::ZoomTo { level });
        self.dispatch(Action::SelectZoomLevel { level });
    }

    /// Opens the engine's inline label editor for an element.
    pub fn invoke_label_edit(&mut self, element_id: &str) {
        self.engine_dispatch(EngineAction::EditLabel {
            label_id: format!("{element_id}_label"),
        });
    }

    /// Hands a palette tool to the engine for invocation at a canvas
    /// position.
    pub fn invoke_contextual_tool(&mut self, tool: Tool, element_id: String, x: f64, y: f64) {
        self.engine_dispatch(EngineAction::InvokeContextualTool {
            tool,
            element_id,
            x,
            y,
        });
    }

    /// Contextual palette and menu require edit permission; without it the
    /// request is dropped.
    pub fn set_contextual_palette(&mut self, palette: Option<ContextualPalette>) {
        if !self.context.can_edit() {
            return;
        }
        self.dispatch(Action::SetContextualPalette { palette });
    }

    pub fn set_contextual_menu(&mut self, menu: Option<ContextualMenu>) {
        if !self.context.can_edit() {
            return;
        }
        self.dispatch(Action::SetContextualMenu { menu });
    }

    pub fn close_contextual_palette(&mut self) {
        self.set_contextual_palette(None);
    }

    /// Closing the menu abandons any in-progress edge creation: the source
    /// element and active tool are cleared and the engine drops its creation
    /// feedback.
    pub fn close_contextual_menu(&mut self) {
        self.set_contextual_menu(None);
        self.dispatch(Action::SetSourceElement { source: None });
        self.dispatch(Action::SetActiveTool { tool: None });
        self.engine_dispatch(EngineAction::ClearCreationFeedback);
    }

    pub fn set_default_tool(&mut self, tool: Tool) {
        self.dispatch(Action::SetDefaultTool { tool });
    }

    pub fn set_active_tool(&mut self, tool: Option<Tool>) {
        self.dispatch(Action::SetActiveTool { tool });
    }

    pub fn set_source_element(&mut self, source: Option<SourceElement>) {
        self.dispatch(Action::SetSourceElement { source });
    }

    pub fn set_current_root(&mut self, root: Option<String>) {
        self.dispatch(Action::SetCurrentRoot { root });
    }

    /// Deletes elements, clearing the contextual palette optimistically. A
    /// returned error payload surfaces as the dismissible banner; the view
    /// state never changes.
    pub fn delete_elements(&mut self, node_ids: Vec<String>, edge_ids: Vec<String>) {
        let Some(representation_id) = self.displayed() else {
            return;
        };
        if self
            .gateway
            .delete_elements(&self.context, &representation_id, node_ids, edge_ids)
        {
            self.dispatch(Action::SetContextualPalette { palette: None });
        }
    }

    /// Invokes a tool. Edge tools take two endpoints and reset the engine's
    /// creation feedback; node tools take one element. The active tool and
    /// contextual palette are cleared after issuing, regardless of the
    /// server's answer. Without edit permission nothing happens at all.
    pub fn invoke_tool(&mut self, tool: &Tool, targets: ToolTargets) {
        if !self.context.can_edit() {
            return;
        }
        let Some(representation_id) = self.displayed() else {
            return;
        };
        let issued = self
            .gateway
            .invoke_tool(&self.context, &representation_id, tool, targets);
        if issued && tool.is_edge_tool() {
            self.engine_dispatch(EngineAction::ClearCreationFeedback);
        }
        self.dispatch(Action::SetActiveTool { tool: None });
        self.dispatch(Action::SetContextualPalette { palette: None });
    }

    pub fn edit_label(&mut self, label_id: String, new_text: String) {
        let Some(representation_id) = self.displayed() else {
            return;
        };
        self.gateway
            .edit_label(&self.context, &representation_id, label_id, new_text);
        self.pump();
    }

    /// Entry point for everything the engine reports back from the canvas.
    pub fn handle_engine_notification(&mut self, notification: EngineNotification) {
        match notification {
            EngineNotification::ElementSelected { element } => {
                let selection = element.to_selection();
                self.dispatch(Action::SelectedElement { selection });
            }
            EngineNotification::ToolInvoked {
                tool,
                source_element_id,
                target_element_id,
            } => {
                let targets = match target_element_id {
                    Some(target_element_id) => ToolTargets::Endpoints {
                        source_element_id,
                        target_element_id,
                    },
                    None => ToolTargets::Element {
                        element_id: source_element_id,
                    },
                };
                self.invoke_tool(&tool, targets);
            }
            EngineNotification::LabelEdited { label_id, new_text } => {
                self.edit_label(label_id, new_text);
            }
        }
    }

    /// Applies every queued action. Asynchronously-completed work (stream
    /// events, mutation results, the catalog fetch) re-enters through the
    /// queue and is picked up here.
    pub fn pump(&mut self) {
        while let Ok(action) = self.actions_rx.try_recv() {
            self.apply(action);
        }
    }

    /// Drives the session until the runtime is dropped. Intended for hosts
    /// that deliver nothing through the synchronous entry points.
    pub async fn run(&mut self) {
        while let Some(action) = self.actions_rx.recv().await {
            self.apply(action);
            self.pump();
        }
    }

    fn displayed(&self) -> Option<RepresentationId> {
        self.machine.state().displayed_representation_id().cloned()
    }

    fn dispatch(&mut self, action: Action) {
        let _ = self.actions_tx.send(action);
        self.pump();
    }

    /// Re-runs the effect pass without an action, for triggers that change no
    /// session state (the mount becoming ready).
    fn sync(&mut self) {
        for effect in self.machine.poll_effects() {
            self.perform(effect);
        }
        self.pump();
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::CatalogFetched {
                representation_id,
                result,
            } => {
                self.catalog.record(representation_id, result);
            }
            action => {
                for effect in self.machine.apply(action) {
                    self.perform(effect);
                }
            }
        }
        if let Some(follow_up) = self.catalog.take_applicable(self.machine.state()) {
            let _ = self.actions_tx.send(follow_up);
        }
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::CloseSubscription => self.subscription.close(),
            Effect::OpenSubscription { representation_id } => {
                self.subscription.open(ChannelKey {
                    project_id: self.context.project_id().clone(),
                    representation_id,
                });
            }
            // The reducer has already detached the engine reference at this
            // point; the container goes as an opaque subtree.
            Effect::ReleaseSurface => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.discard_inner();
                }
            }
            Effect::InitializeEngine { representation_id } => {
                if self.machine.state().view_state() != ViewState::Loading
                    || !self.machine.state().displays(&representation_id)
                {
                    return;
                }
                let Some(surface) = self.surface.as_mut() else {
                    return;
                };
                surface.prepare_inner();
                let engine = self.engines.create(&representation_id);
                let instance = EngineInstance::new(representation_id, engine);
                let _ = self.actions_tx.send(Action::Initialize { instance });
            }
            Effect::FetchToolSections { representation_id } => {
                self.catalog.request(representation_id);
            }
            Effect::PushModel { diagram } => {
                self.engine_dispatch(EngineAction::ReplaceModel { diagram });
            }
            Effect::PushSelection { selection } => {
                self.engine_dispatch(EngineAction::SetSelection { selection });
            }
            Effect::AnnounceSelection { selection } => {
                self.observer.selection_changed(&selection);
            }
            Effect::AnnounceSubscribers { subscribers } => {
                self.observer.subscribers_changed(&subscribers);
            }
        }
    }

    fn engine_dispatch(&mut self, action: EngineAction) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(inner) = surface.inner_mut() else {
            return;
        };
        let Some(engine) = self.machine.engine_mut() else {
            return;
        };
        engine.dispatch(inner, action);
    }
}
