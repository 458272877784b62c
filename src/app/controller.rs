//! Der EditorController: übersetzt Intents in Store-Mutationen.
//!
//! Besitzt Store, History, Drag-Arena und Extender; Host-Kollaborateure
//! (Routing, Rendering, Höhen, Meldungen) kommen pro Aufruf als
//! [`EditorIo`] herein. Nach jeder Verarbeitung werden fehlende Höhen
//! nachgetragen und die Darstellung synchronisiert, falls sich der
//! Store geändert hat.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use crate::app::command_log::IntentLog;
use crate::app::drag::DragReconciler;
use crate::app::events::EditorIntent;
use crate::app::history::{CommandHistory, HistoryUiSink};
use crate::app::routing::{PathResponse, RequestId, RequestPurpose};
use crate::app::services::EditorIo;
use crate::app::use_cases::extend::RouteExtender;
use crate::app::use_cases::{elevation, insert, toggle};
use crate::core::RouteStore;
use crate::shared::EditorOptions;

/// Zentrale Vermittlung zwischen Gesten und Edit-Kern.
pub struct EditorController {
    store: RouteStore,
    history: CommandHistory,
    drag: DragReconciler,
    extender: RouteExtender,
    intent_log: IntentLog,
    options: EditorOptions,
    straight_line_mode: bool,
    /// Nach einem Drag-Release oder Long-Press unterdrückt der nächste
    /// Klick-Intent sich selbst (synthetischer Click nach Pointer-Up)
    suppress_click: bool,
    /// Vom Store-Listener gesetzt, von `sync` konsumiert
    dirty: Rc<Cell<bool>>,
}

impl EditorController {
    /// Erstellt einen Controller mit leerem Store.
    pub fn new(options: EditorOptions) -> Self {
        Self::from_store(RouteStore::new(), options)
    }

    /// Erstellt einen Controller über einem vorhandenen Store
    /// (z.B. nach GPX-Import durch einen externen Kollaborateur).
    pub fn from_store(mut store: RouteStore, options: EditorOptions) -> Self {
        let dirty = Rc::new(Cell::new(false));
        {
            let dirty = dirty.clone();
            store.subscribe(move |_| dirty.set(true));
        }
        Self {
            store,
            history: CommandHistory::new(),
            drag: DragReconciler::new(),
            extender: RouteExtender::new(),
            intent_log: IntentLog::new(),
            options,
            straight_line_mode: false,
            suppress_click: false,
            dirty,
        }
    }

    /// Read-only Zugriff auf den Store.
    pub fn store(&self) -> &RouteStore {
        &self.store
    }

    /// Zugriff auf die History (z.B. für `can_undo`-Abfragen).
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Registriert den UI-Sink der History.
    pub fn set_history_ui_sink(&mut self, sink: impl HistoryUiSink + 'static) {
        self.history.set_ui_sink(sink);
    }

    /// Ist der Linienmodus aktiv?
    pub fn straight_line_mode(&self) -> bool {
        self.straight_line_mode
    }

    /// Läuft gerade eine Drag-Geste?
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Bisher verarbeitete Intents (Diagnose).
    pub fn intent_log(&self) -> &IntentLog {
        &self.intent_log
    }

    /// Verarbeitet einen Intent vollständig.
    pub fn handle_intent(&mut self, io: &mut EditorIo<'_>, intent: EditorIntent) -> Result<()> {
        self.intent_log.record(&intent);
        log::trace!("Intent: {intent:?}");

        match intent {
            EditorIntent::MapClicked { location } => {
                if self.take_click_suppression() {
                    return self.sync(io);
                }
                self.extender.click(
                    &mut self.store,
                    &mut self.history,
                    io.routing,
                    &self.options,
                    self.straight_line_mode,
                    location,
                )?;
            }
            EditorIntent::ControlPointClicked { route, point } => {
                if self.take_click_suppression() {
                    return self.sync(io);
                }
                toggle::toggle_control_point_off(&mut self.store, &mut self.history, route, point)?;
            }
            EditorIntent::MapLongPressed { location, zoom } => {
                insert::long_press_insert(
                    &mut self.store,
                    &mut self.history,
                    &self.options,
                    location,
                    zoom,
                )?;
                // Pointer-Up nach dem Long-Press feuert noch einen
                // synthetischen Klick
                self.suppress_click = true;
            }
            EditorIntent::DragStarted { route, point } => {
                self.drag.begin_drag(&self.store, io.render, route, point);
            }
            EditorIntent::DragMoved { location, now_ms } => {
                self.drag.drag_move(
                    &self.store,
                    io.routing,
                    io.render,
                    &self.options,
                    location,
                    now_ms,
                );
            }
            EditorIntent::DragEnded => {
                if self
                    .drag
                    .end_drag(&mut self.store, &mut self.history, io.render)?
                {
                    self.suppress_click = true;
                }
            }
            EditorIntent::UndoRequested => self.history.undo(&mut self.store),
            EditorIntent::RedoRequested => self.history.redo(&mut self.store),
            EditorIntent::StraightLineModeSet { enabled } => {
                self.straight_line_mode = enabled;
                log::debug!("Linienmodus: {enabled}");
            }
            EditorIntent::RouteSelected { index } => self.store.set_current_route(index),
        }
        self.sync(io)
    }

    /// Verarbeitet eine eingetroffene Routing-Antwort.
    pub fn on_path_resolved(&mut self, io: &mut EditorIo<'_>, response: PathResponse) -> Result<()> {
        match response.id.purpose {
            RequestPurpose::Reshape { .. } => self.drag.on_path_resolved(
                &mut self.store,
                &mut self.history,
                io.render,
                response.id,
                &response.polyline,
            )?,
            RequestPurpose::Extend { .. } => self.extender.on_path_resolved(
                &mut self.store,
                &mut self.history,
                io.alerts,
                response.id,
                &response.polyline,
            )?,
        }
        self.sync(io)
    }

    /// Verarbeitet einen gescheiterten Routing-Aufruf.
    pub fn on_path_failed(&mut self, io: &mut EditorIo<'_>, id: RequestId) -> Result<()> {
        match id.purpose {
            RequestPurpose::Reshape { .. } => self.drag.on_path_failed(io.render, id),
            RequestPurpose::Extend { .. } => self.extender.on_path_failed(io.alerts, id),
        }
        self.sync(io)
    }

    fn take_click_suppression(&mut self) -> bool {
        let suppressed = self.suppress_click;
        self.suppress_click = false;
        if suppressed {
            log::debug!("Klick nach Drag-Release unterdrückt");
        }
        suppressed
    }

    /// Höhen nachtragen und Darstellung synchronisieren, falls der
    /// Store-Listener seit dem letzten Sync eine Mutation gemeldet hat.
    fn sync(&mut self, io: &mut EditorIo<'_>) -> Result<()> {
        if self.dirty.get() {
            elevation::backfill_current_route(&mut self.store, io.elevation);
            io.render.set_route_data(self.store.routes());
            self.dirty.set(false);
        }
        Ok(())
    }
}
