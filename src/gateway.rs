// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation commands.
//!
//! All commands require edit permission and are silently dropped without it:
//! not queued, not reported. Issued commands are fire-and-forget; their
//! results come back asynchronously as `MutationFinished` actions carrying the
//! representation id they were issued for, so the reducer can discard results
//! that outlived a representation switch.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::model::{ProjectContext, RepresentationId, Tool};
use crate::remote::{
    DeleteFromDiagramInput, DiagramTransport, EditLabelInput, ErrorPayload, InvokeEdgeToolInput,
    InvokeNodeToolInput, MutationOutcome, TransportError,
};
use crate::session::Action;

/// The elements a tool is applied to. Node tools take one element, edge tools
/// take the two endpoints of the edge being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolTargets {
    Element {
        element_id: String,
    },
    Endpoints {
        source_element_id: String,
        target_element_id: String,
    },
}

pub struct MutationGateway {
    transport: Arc<dyn DiagramTransport>,
    actions: mpsc::UnboundedSender<Action>,
}

impl MutationGateway {
    pub fn new(
        transport: Arc<dyn DiagramTransport>,
        actions: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self { transport, actions }
    }

    /// Returns whether the command was actually issued.
    pub fn delete_elements(
        &self,
        context: &ProjectContext,
        representation_id: &RepresentationId,
        node_ids: Vec<String>,
        edge_ids: Vec<String>,
    ) -> bool {
        if !context.can_edit() {
            warn!("dropping delete command without edit permission");
            return false;
        }
        let input = DeleteFromDiagramInput {
            project_id: context.project_id().as_str().to_owned(),
            representation_id: representation_id.as_str().to_owned(),
            node_ids,
            edge_ids,
        };
        let transport = Arc::clone(&self.transport);
        self.submit(representation_id.clone(), async move {
            transport.delete_from_diagram(input).await
        });
        true
    }

    /// Dispatches on the tool kind, resolved once here: edge tools need both
    /// endpoints, node tools exactly one element.
    pub fn invoke_tool(
        &self,
        context: &ProjectContext,
        representation_id: &RepresentationId,
        tool: &Tool,
        targets: ToolTargets,
    ) -> bool {
        if !context.can_edit() {
            warn!(tool_id = tool.id(), "dropping tool invocation without edit permission");
            return false;
        }
        match (tool, targets) {
            (
                Tool::Edge { id, .. },
                ToolTargets::Endpoints {
                    source_element_id,
                    target_element_id,
                },
            ) => {
                let input = InvokeEdgeToolInput {
                    project_id: context.project_id().as_str().to_owned(),
                    representation_id: representation_id.as_str().to_owned(),
                    diagram_source_element_id: source_element_id,
                    diagram_target_element_id: target_element_id,
                    tool_id: id.clone(),
                };
                let transport = Arc::clone(&self.transport);
                self.submit(representation_id.clone(), async move {
                    transport.invoke_edge_tool(input).await
                });
                true
            }
            (Tool::Node { id, .. }, ToolTargets::Element { element_id }) => {
                let input = InvokeNodeToolInput {
                    project_id: context.project_id().as_str().to_owned(),
                    representation_id: representation_id.as_str().to_owned(),
                    diagram_element_id: element_id,
                    tool_id: id.clone(),
                };
                let transport = Arc::clone(&self.transport);
                self.submit(representation_id.clone(), async move {
                    transport.invoke_node_tool(input).await
                });
                true
            }
            (tool, targets) => {
                warn!(
                    tool_id = tool.id(),
                    ?targets,
                    "tool kind does not match its targets"
                );
                false
            }
        }
    }

    pub fn edit_label(
        &self,
        context: &ProjectContext,
        representation_id: &RepresentationId,
        label_id: String,
        new_text: String,
    ) -> bool {
        if !context.can_edit() {
            warn!("dropping label edit without edit permission");
            return false;
        }
        let input = EditLabelInput {
            project_id: context.project_id().as_str().to_owned(),
            representation_id: representation_id.as_str().to_owned(),
            label_id,
            new_text,
        };
        let transport = Arc::clone(&self.transport);
        self.submit(representation_id.clone(), async move {
            transport.edit_label(input).await
        });
        true
    }

    /// A transport failure on a command is non-fatal: it surfaces like any
    /// other mutation error and never changes the view state.
    fn submit<F>(&self, representation_id: RepresentationId, command: F)
    where
        F: std::future::Future<Output = Result<MutationOutcome, TransportError>> + Send + 'static,
    {
        let actions = self.actions.clone();
        tokio::spawn(async move {
            let outcome = match command.await {
                Ok(outcome) => outcome,
                Err(err) => MutationOutcome::Error(ErrorPayload {
                    message: err.to_string(),
                }),
            };
            let _ = actions.send(Action::MutationFinished {
                representation_id,
                outcome,
            });
        });
    }
}
