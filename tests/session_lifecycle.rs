// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end lifecycle runs against a scripted transport and a recording
//! engine, driving the runtime the way a host UI would.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use murex::gateway::ToolTargets;
use murex::model::{
    ContextualMenu, DiagramEdge, DiagramNode, DiagramSnapshot, ProjectContext, ProjectId,
    RepresentationId, Selection, SourceElement, Subscriber, Tool, ToolSection,
};
use murex::remote::{
    DeleteFromDiagramInput, DiagramTransport, EditLabelInput, ErrorPayload, InvokeEdgeToolInput,
    InvokeNodeToolInput, MutationOutcome, StreamEvent, SubscriptionData, SubscriptionInput,
    TransportError,
};
use murex::runtime::{SessionObserver, SessionRuntime};
use murex::session::ViewState;
use murex::surface::{
    EngineAction, EngineFactory, InnerContainer, MountPoint, RenderingEngine,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Issued {
    Delete(DeleteFromDiagramInput),
    NodeTool(InvokeNodeToolInput),
    EdgeTool(InvokeEdgeToolInput),
    EditLabel(EditLabelInput),
}

/// Transport the tests steer by hand: every subscribe call hands back a
/// channel whose sender stays with the test, mutations answer with a scripted
/// outcome, and the tool catalog is fixed up front.
struct ScriptedTransport {
    senders: Mutex<Vec<mpsc::Sender<StreamEvent>>>,
    issued: Mutex<Vec<Issued>>,
    mutation_outcome: MutationOutcome,
    sections: Vec<ToolSection>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self::with_outcome(MutationOutcome::Success)
    }

    fn with_outcome(mutation_outcome: MutationOutcome) -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
            issued: Mutex::new(Vec::new()),
            mutation_outcome,
            sections: vec![ToolSection {
                id: "section-1".to_owned(),
                label: "Creation".to_owned(),
                tools: vec![node_tool()],
            }],
        }
    }

    fn latest_sender(&self) -> mpsc::Sender<StreamEvent> {
        self.senders
            .lock()
            .expect("senders lock")
            .last()
            .expect("an open subscription")
            .clone()
    }

    fn subscribe_count(&self) -> usize {
        self.senders.lock().expect("senders lock").len()
    }

    fn issued(&self) -> Vec<Issued> {
        self.issued.lock().expect("issued lock").clone()
    }
}

#[async_trait]
impl DiagramTransport for ScriptedTransport {
    async fn subscribe(
        &self,
        _input: SubscriptionInput,
    ) -> Result<mpsc::Receiver<StreamEvent>, TransportError> {
        let (tx, rx) = mpsc::channel(16);
        self.senders.lock().expect("senders lock").push(tx);
        Ok(rx)
    }

    async fn delete_from_diagram(
        &self,
        input: DeleteFromDiagramInput,
    ) -> Result<MutationOutcome, TransportError> {
        self.issued.lock().expect("issued lock").push(Issued::Delete(input));
        Ok(self.mutation_outcome.clone())
    }

    async fn invoke_node_tool(
        &self,
        input: InvokeNodeToolInput,
    ) -> Result<MutationOutcome, TransportError> {
        self.issued
            .lock()
            .expect("issued lock")
            .push(Issued::NodeTool(input));
        Ok(self.mutation_outcome.clone())
    }

    async fn invoke_edge_tool(
        &self,
        input: InvokeEdgeToolInput,
    ) -> Result<MutationOutcome, TransportError> {
        self.issued
            .lock()
            .expect("issued lock")
            .push(Issued::EdgeTool(input));
        Ok(self.mutation_outcome.clone())
    }

    async fn edit_label(
        &self,
        input: EditLabelInput,
    ) -> Result<MutationOutcome, TransportError> {
        self.issued
            .lock()
            .expect("issued lock")
            .push(Issued::EditLabel(input));
        Ok(self.mutation_outcome.clone())
    }

    async fn tool_sections(
        &self,
        _diagram_id: String,
    ) -> Result<Vec<ToolSection>, TransportError> {
        Ok(self.sections.clone())
    }
}

/// Logs every dispatched action into a shared journal.
struct RecordingEngine {
    log: Arc<Mutex<Vec<EngineAction>>>,
}

impl RenderingEngine for RecordingEngine {
    fn dispatch(&mut self, _mount: &mut InnerContainer, action: EngineAction) {
        self.log.lock().expect("log lock").push(action);
    }
}

struct RecordingFactory {
    log: Arc<Mutex<Vec<EngineAction>>>,
}

impl EngineFactory for RecordingFactory {
    fn create(&self, _representation_id: &RepresentationId) -> Box<dyn RenderingEngine> {
        Box::new(RecordingEngine {
            log: Arc::clone(&self.log),
        })
    }
}

#[derive(Default)]
struct RecordingObserver {
    selections: Arc<Mutex<Vec<Selection>>>,
    subscribers: Arc<Mutex<Vec<Vec<Subscriber>>>>,
}

impl SessionObserver for RecordingObserver {
    fn selection_changed(&mut self, selection: &Selection) {
        self.selections
            .lock()
            .expect("selections lock")
            .push(selection.clone());
    }

    fn subscribers_changed(&mut self, subscribers: &[Subscriber]) {
        self.subscribers
            .lock()
            .expect("subscribers lock")
            .push(subscribers.to_vec());
    }
}

struct Harness {
    runtime: SessionRuntime,
    transport: Arc<ScriptedTransport>,
    engine_log: Arc<Mutex<Vec<EngineAction>>>,
    subscribers_seen: Arc<Mutex<Vec<Vec<Subscriber>>>>,
}

impl Harness {
    fn new(can_edit: bool, transport: ScriptedTransport) -> Self {
        let transport = Arc::new(transport);
        let engine_log = Arc::new(Mutex::new(Vec::new()));
        let observer = RecordingObserver::default();
        let subscribers_seen = Arc::clone(&observer.subscribers);
        let context = ProjectContext::new(ProjectId::new("p1").expect("project id"), can_edit);
        let mut runtime = SessionRuntime::new(
            context,
            Arc::clone(&transport) as Arc<dyn DiagramTransport>,
            Box::new(RecordingFactory {
                log: Arc::clone(&engine_log),
            }),
            Box::new(observer),
        );
        runtime.attach_mount(MountPoint::new("diagram-mount"));
        Self {
            runtime,
            transport,
            engine_log,
            subscribers_seen,
        }
    }

    /// Lets spawned transport tasks run and drains the action queue after
    /// each step, until the runtime has nothing left to do.
    async fn settle(&mut self) {
        for _ in 0..8 {
            tokio::task::yield_now().await;
            self.runtime.pump();
        }
    }

    async fn send(&mut self, event: StreamEvent) {
        self.transport
            .latest_sender()
            .send(event)
            .await
            .expect("send stream event");
        self.settle().await;
    }

    fn engine_actions(&self) -> Vec<EngineAction> {
        self.engine_log.lock().expect("log lock").clone()
    }
}

fn rep(id: &str) -> RepresentationId {
    RepresentationId::new(id).expect("representation id")
}

fn node_tool() -> Tool {
    Tool::Node {
        id: "t-node".to_owned(),
        label: "Create node".to_owned(),
        image_url: None,
    }
}

fn edge_tool() -> Tool {
    Tool::Edge {
        id: "t-edge".to_owned(),
        label: "Create edge".to_owned(),
        image_url: None,
    }
}

fn snapshot(id: &str) -> DiagramSnapshot {
    DiagramSnapshot {
        id: id.to_owned(),
        kind: "diagram".to_owned(),
        target_object_id: "obj-1".to_owned(),
        label: format!("Diagram {id}"),
        nodes: vec![DiagramNode {
            id: "node-1".to_owned(),
            kind: "node:rectangle".to_owned(),
            label: "A node".to_owned(),
            target_object_id: "obj-2".to_owned(),
        }],
        edges: Vec::<DiagramEdge>::new(),
    }
}

fn data(id: &str, subscribers: Vec<Subscriber>) -> StreamEvent {
    StreamEvent::Data(SubscriptionData {
        diagram: snapshot(id),
        subscribers,
    })
}

#[tokio::test]
async fn display_reaches_ready_and_pushes_server_data_to_the_engine() {
    let mut harness = Harness::new(true, ScriptedTransport::new());

    harness.runtime.display(rep("d1"));
    harness.settle().await;

    let state = harness.runtime.state();
    assert_eq!(state.view_state(), ViewState::Ready);
    assert!(state.displays(&rep("d1")));
    assert!(state.engine().is_some());
    assert!(state.diagram().is_some());
    assert_eq!(harness.transport.subscribe_count(), 1);
    let inner = harness.runtime.surface().expect("surface").inner();
    assert!(inner.is_some());

    harness
        .send(data(
            "d1",
            vec![Subscriber {
                username: "ada".to_owned(),
            }],
        ))
        .await;

    let state = harness.runtime.state();
    assert_eq!(state.diagram().expect("diagram").label, "Diagram d1");
    assert_eq!(state.subscribers().len(), 1);
    assert!(harness
        .engine_actions()
        .iter()
        .any(|action| matches!(action, EngineAction::ReplaceModel { diagram } if diagram.id == "d1")));
    assert_eq!(
        harness.subscribers_seen.lock().expect("lock").last().map(Vec::len),
        Some(1)
    );
    // The catalog fetch landed once READY.
    assert_eq!(harness.runtime.state().tool_sections().len(), 1);
}

#[tokio::test]
async fn switching_discards_data_from_the_previous_representation() {
    let mut harness = Harness::new(true, ScriptedTransport::new());

    harness.runtime.display(rep("d1"));
    harness.settle().await;
    let stale_sender = harness.transport.latest_sender();

    harness.runtime.display(rep("d2"));
    harness.settle().await;

    assert_eq!(harness.transport.subscribe_count(), 2);
    assert!(harness.runtime.state().displays(&rep("d2")));
    assert_eq!(harness.runtime.state().view_state(), ViewState::Ready);

    // Events already queued on the old channel must not leak into d2.
    let _ = stale_sender.try_send(data("d1", Vec::new()));
    harness.settle().await;

    let diagram = harness.runtime.state().diagram().expect("diagram");
    assert_ne!(diagram.id, "d1");
    assert!(!harness
        .engine_actions()
        .iter()
        .any(|action| matches!(action, EngineAction::ReplaceModel { diagram } if diagram.id == "d1")));
}

#[tokio::test]
async fn a_complete_signal_tears_the_session_down_terminally() {
    let mut harness = Harness::new(true, ScriptedTransport::new());

    harness.runtime.display(rep("d1"));
    harness.settle().await;
    let sender = harness.transport.latest_sender();
    harness.send(data("d1", Vec::new())).await;

    harness.send(StreamEvent::Complete).await;

    let state = harness.runtime.state();
    assert_eq!(state.view_state(), ViewState::Complete);
    assert_eq!(state.message(), Some("The diagram does not exist"));
    assert!(state.engine().is_none());
    assert!(state.diagram().is_none());
    assert!(harness.runtime.surface().expect("surface").inner().is_none());

    // Late events on the dead channel change nothing.
    let _ = sender.try_send(data("d1", Vec::new()));
    harness.settle().await;
    assert_eq!(harness.runtime.state().view_state(), ViewState::Complete);
}

#[tokio::test]
async fn switching_away_from_complete_starts_a_fresh_session() {
    let mut harness = Harness::new(true, ScriptedTransport::new());

    harness.runtime.display(rep("d1"));
    harness.settle().await;
    harness.send(StreamEvent::Complete).await;
    assert_eq!(harness.runtime.state().view_state(), ViewState::Complete);

    harness.runtime.display(rep("d3"));
    harness.settle().await;

    let state = harness.runtime.state();
    assert_eq!(state.view_state(), ViewState::Ready);
    assert!(state.displays(&rep("d3")));
    assert!(state.message().is_none());
    assert_eq!(harness.transport.subscribe_count(), 2);
}

#[tokio::test]
async fn read_only_sessions_issue_no_mutations() {
    let mut harness = Harness::new(false, ScriptedTransport::new());

    harness.runtime.display(rep("d1"));
    harness.settle().await;
    assert_eq!(harness.runtime.state().view_state(), ViewState::Ready);

    harness.runtime.invoke_tool(
        &node_tool(),
        ToolTargets::Element {
            element_id: "node-1".to_owned(),
        },
    );
    harness.runtime.delete_elements(vec!["node-1".to_owned()], Vec::new());
    harness
        .runtime
        .edit_label("label-1".to_owned(), "text".to_owned());
    harness.settle().await;

    assert!(harness.transport.issued().is_empty());
    assert!(harness.runtime.state().error_message().is_none());
}

#[tokio::test]
async fn mutation_errors_surface_as_a_dismissible_banner() {
    let transport = ScriptedTransport::with_outcome(MutationOutcome::Error(ErrorPayload {
        message: "X".to_owned(),
    }));
    let mut harness = Harness::new(true, transport);

    harness.runtime.display(rep("d1"));
    harness.settle().await;

    harness
        .runtime
        .delete_elements(vec!["node-1".to_owned()], Vec::new());
    harness.settle().await;

    let state = harness.runtime.state();
    assert_eq!(state.error_message(), Some("X"));
    // The banner never disturbs the lifecycle.
    assert_eq!(state.view_state(), ViewState::Ready);
    assert!(state.engine().is_some());

    harness.runtime.dismiss_error();
    assert!(harness.runtime.state().error_message().is_none());
}

#[tokio::test]
async fn toolbar_commands_reach_the_engine() {
    let mut harness = Harness::new(true, ScriptedTransport::new());

    harness.runtime.display(rep("d1"));
    harness.settle().await;

    harness.runtime.zoom_in();
    harness.runtime.zoom_out();
    harness.runtime.fit_to_screen();
    harness.runtime.set_zoom_level(0.5);
    harness.runtime.invoke_label_edit("node-1");
    harness
        .runtime
        .invoke_contextual_tool(node_tool(), "node-1".to_owned(), 10.0, 20.0);

    let actions = harness.engine_actions();
    assert!(actions.contains(&EngineAction::ZoomIn));
    assert!(actions.contains(&EngineAction::ZoomOut));
    assert!(actions.contains(&EngineAction::FitToScreen));
    assert!(actions.contains(&EngineAction::ZoomTo { level: 0.5 }));
    assert!(actions.contains(&EngineAction::EditLabel {
        label_id: "node-1_label".to_owned()
    }));
    assert!(actions.iter().any(|action| matches!(
        action,
        EngineAction::InvokeContextualTool { element_id, .. } if element_id == "node-1"
    )));
    // The selected level is also kept in session state.
    assert_eq!(harness.runtime.state().zoom_level(), 0.5);
}

#[tokio::test]
async fn toolbar_commands_without_a_live_engine_do_nothing() {
    let mut harness = Harness::new(true, ScriptedTransport::new());

    // No representation displayed yet, so no engine exists.
    harness.runtime.zoom_in();
    harness.runtime.invoke_label_edit("node-1");
    assert!(harness.engine_actions().is_empty());

    harness.runtime.display(rep("d1"));
    harness.settle().await;
    harness.send(StreamEvent::Complete).await;
    assert_eq!(harness.runtime.state().view_state(), ViewState::Complete);

    // After teardown the engine and inner container are gone.
    let recorded = harness.engine_actions().len();
    harness.runtime.zoom_in();
    harness.runtime.fit_to_screen();
    harness.runtime.set_zoom_level(2.0);
    assert_eq!(harness.engine_actions().len(), recorded);
}

#[tokio::test]
async fn closing_the_contextual_menu_abandons_edge_creation() {
    let mut harness = Harness::new(true, ScriptedTransport::new());

    harness.runtime.display(rep("d1"));
    harness.settle().await;

    harness.runtime.set_active_tool(Some(edge_tool()));
    harness.runtime.set_source_element(Some(SourceElement {
        element_id: "node-1".to_owned(),
        x: 1.0,
        y: 2.0,
    }));
    harness.runtime.set_contextual_menu(Some(ContextualMenu {
        source_element_id: "node-1".to_owned(),
        target_element_id: "node-2".to_owned(),
        x: 5.0,
        y: 6.0,
    }));
    assert!(harness.runtime.state().contextual_menu().is_some());
    assert!(harness.runtime.state().source_element().is_some());

    harness.runtime.close_contextual_menu();

    let state = harness.runtime.state();
    assert!(state.contextual_menu().is_none());
    assert!(state.source_element().is_none());
    assert!(state.active_tool().is_none());
    assert!(harness
        .engine_actions()
        .contains(&EngineAction::ClearCreationFeedback));
}

#[tokio::test]
async fn edge_tool_invocation_resets_creation_feedback() {
    let mut harness = Harness::new(true, ScriptedTransport::new());

    harness.runtime.display(rep("d1"));
    harness.settle().await;

    harness.runtime.invoke_tool(
        &edge_tool(),
        ToolTargets::Endpoints {
            source_element_id: "node-1".to_owned(),
            target_element_id: "node-2".to_owned(),
        },
    );
    harness.settle().await;

    let issued = harness.transport.issued();
    assert!(matches!(issued.as_slice(), [Issued::EdgeTool(_)]));
    assert!(harness
        .engine_actions()
        .contains(&EngineAction::ClearCreationFeedback));
}

#[tokio::test]
async fn tool_invocation_resets_the_palette_and_active_tool() {
    let mut harness = Harness::new(true, ScriptedTransport::new());

    harness.runtime.display(rep("d1"));
    harness.settle().await;

    harness.runtime.set_active_tool(Some(node_tool()));
    assert!(harness.runtime.state().active_tool().is_some());

    harness.runtime.invoke_tool(
        &node_tool(),
        ToolTargets::Element {
            element_id: "node-1".to_owned(),
        },
    );
    harness.settle().await;

    let issued = harness.transport.issued();
    assert!(matches!(issued.as_slice(), [Issued::NodeTool(_)]));
    assert!(harness.runtime.state().active_tool().is_none());
    assert!(harness.runtime.state().contextual_palette().is_none());
}
