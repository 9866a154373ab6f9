// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tool catalog loading.
//!
//! One query per representation id, to avoid flooding the server; the tools
//! returned must therefore carry everything needed to filter them in context.
//! The fetch runs independently of the view state, but its result is applied
//! only once the session is READY. A failed or empty catalog while READY is
//! surfaced as a user-visible error instead of leaving a stale catalog in
//! place.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::model::{RepresentationId, ToolSection};
use crate::remote::DiagramTransport;
use crate::session::{Action, SessionState, ViewState};

const CATALOG_ERROR_MESSAGE: &str = "Error: Cannot get tools from the server";

pub struct ToolCatalogLoader {
    transport: Arc<dyn DiagramTransport>,
    actions: mpsc::UnboundedSender<Action>,
    outcome: Option<FetchOutcome>,
}

struct FetchOutcome {
    representation_id: RepresentationId,
    result: Result<Vec<ToolSection>, String>,
    applied: bool,
}

impl ToolCatalogLoader {
    pub fn new(
        transport: Arc<dyn DiagramTransport>,
        actions: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            transport,
            actions,
            outcome: None,
        }
    }

    /// Starts a fetch for `representation_id`, invalidating any previous
    /// outcome. Completion arrives as a `CatalogFetched` action.
    pub fn request(&mut self, representation_id: RepresentationId) {
        debug!(representation_id = %representation_id, "fetching tool sections");
        self.outcome = None;
        let transport = Arc::clone(&self.transport);
        let actions = self.actions.clone();
        tokio::spawn(async move {
            let result = transport
                .tool_sections(representation_id.as_str().to_owned())
                .await
                .map_err(|err| err.to_string());
            let _ = actions.send(Action::CatalogFetched {
                representation_id,
                result,
            });
        });
    }

    pub fn record(
        &mut self,
        representation_id: RepresentationId,
        result: Result<Vec<ToolSection>, String>,
    ) {
        self.outcome = Some(FetchOutcome {
            representation_id,
            result,
            applied: false,
        });
    }

    /// Returns the action to apply for the recorded outcome, at most once,
    /// and only while the session is READY for the same representation.
    /// Outcomes for other representations are dropped as stale.
    pub fn take_applicable(&mut self, state: &SessionState) -> Option<Action> {
        let current = match &self.outcome {
            None => return None,
            Some(outcome) => state.displays(&outcome.representation_id),
        };
        if !current {
            if let Some(outcome) = self.outcome.take() {
                debug!(
                    representation_id = %outcome.representation_id,
                    "dropping stale tool sections"
                );
            }
            return None;
        }
        let outcome = self.outcome.as_mut()?;
        if state.view_state() != ViewState::Ready || outcome.applied {
            return None;
        }
        outcome.applied = true;
        match &outcome.result {
            Ok(sections) if !sections.is_empty() => Some(Action::SetToolSections {
                representation_id: outcome.representation_id.clone(),
                sections: sections.clone(),
            }),
            Ok(_) => {
                warn!("tool sections query returned no sections");
                Some(Action::HandleErrorMessage {
                    message: Some(CATALOG_ERROR_MESSAGE.to_owned()),
                })
            }
            Err(reason) => {
                warn!(reason = %reason, "tool sections query failed");
                Some(Action::HandleErrorMessage {
                    message: Some(CATALOG_ERROR_MESSAGE.to_owned()),
                })
            }
        }
    }
}
