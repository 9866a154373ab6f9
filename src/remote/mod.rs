// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote interface of a diagram session.
//!
//! The concrete transport (GraphQL, websocket, in-process fake) is out of
//! scope; this module pins down the wire payloads and the `DiagramTransport`
//! trait the runtime drives. Payload ids are plain strings: they are echoed
//! back to the server verbatim and only promoted to typed ids inside the
//! session layer.

use std::fmt;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::model::{DiagramSnapshot, Subscriber, ToolSection};

/// Key of the live update channel. A channel is only valid for exactly this
/// pair; any change to either field requires a new channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubscriptionInput {
    pub project_id: String,
    pub diagram_id: String,
}

/// One message on the live update channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubscriptionData {
    pub diagram: DiagramSnapshot,
    pub subscribers: Vec<Subscriber>,
}

/// Events delivered over the live update channel.
///
/// `Complete` asserts that no further updates will ever be sent for this
/// diagram id. The server uses it both for deleted diagrams and for ids that
/// never existed; the two cases are indistinguishable by design.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Data(SubscriptionData),
    Complete,
    Error { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeleteFromDiagramInput {
    pub project_id: String,
    pub representation_id: String,
    pub node_ids: Vec<String>,
    pub edge_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InvokeNodeToolInput {
    pub project_id: String,
    pub representation_id: String,
    pub diagram_element_id: String,
    pub tool_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InvokeEdgeToolInput {
    pub project_id: String,
    pub representation_id: String,
    pub diagram_source_element_id: String,
    pub diagram_target_element_id: String,
    pub tool_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EditLabelInput {
    pub project_id: String,
    pub representation_id: String,
    pub label_id: String,
    pub new_text: String,
}

/// Error payload a mutation may return instead of its success payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorPayload {
    pub message: String,
}

/// Result of a mutation command, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MutationOutcome {
    Success,
    Error(ErrorPayload),
}

/// Transport-level failure: the command or query never reached the server, or
/// the channel could not be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    Connection { reason: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection { reason } => write!(f, "connection failure: {reason}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Executes the session's queries, mutations and the live subscription.
///
/// `subscribe` hands back the receiving end of the channel; the transport owns
/// the sending side and must eventually deliver `Complete` or `Error` (or drop
/// the sender, which the subscription manager treats as a lost connection).
#[async_trait]
pub trait DiagramTransport: Send + Sync {
    async fn subscribe(
        &self,
        input: SubscriptionInput,
    ) -> Result<mpsc::Receiver<StreamEvent>, TransportError>;

    async fn delete_from_diagram(
        &self,
        input: DeleteFromDiagramInput,
    ) -> Result<MutationOutcome, TransportError>;

    async fn invoke_node_tool(
        &self,
        input: InvokeNodeToolInput,
    ) -> Result<MutationOutcome, TransportError>;

    async fn invoke_edge_tool(
        &self,
        input: InvokeEdgeToolInput,
    ) -> Result<MutationOutcome, TransportError>;

    async fn edit_label(&self, input: EditLabelInput) -> Result<MutationOutcome, TransportError>;

    async fn tool_sections(&self, diagram_id: String)
        -> Result<Vec<ToolSection>, TransportError>;
}
