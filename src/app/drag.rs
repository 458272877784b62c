//! Drag-Abgleich für Kontrollpunkte.
//!
//! Pro Kontrollpunkt lebt eine [`DragSession`] in einer Arena; sie
//! überlebt das Drag-Ende, damit ihr Sequenzzähler auch Antworten aus
//! früheren Drags desselben Punkts entwerten kann. Garantie: pro
//! abgeschlossenem Drag entsteht genau ein History-Command.
//!
//! Zeit kommt als `now_ms`-Parameter herein (testbar, kein Uhr-Zugriff).

use anyhow::Result;
use indexmap::IndexMap;

use crate::app::history::{CommandHistory, EditCommand};
use crate::app::routing::{
    PathAnchors, PathRequest, PathVertex, RequestId, RequestPurpose, RoutingService,
};
use crate::app::services::RenderSink;
use crate::core::{closest_vertex_index, Coordinate, RoutePoint, RouteStore};
use crate::shared::EditorOptions;

/// Schlüssel einer Session: (Routen-Index, Punkt-Index).
pub type SessionKey = (usize, usize);

/// Nachbar-Konstellation des gezogenen Punkts, festgehalten beim
/// Absetzen der Anfrage (die Route mutiert während des Drags nicht).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragBranch {
    /// Nur ein Kontrollpunkt davor: Route endet am gezogenen Punkt
    TailReshape { prev: usize },
    /// Nur ein Kontrollpunkt danach: Route beginnt am gezogenen Punkt
    HeadReshape { next: usize },
    /// Kontrollpunkte auf beiden Seiten: Drei-Anker-Routing
    InnerReshape { prev: usize, next: usize },
}

/// Noch nicht eingereichte Mutation aus einer aufgelösten Antwort.
///
/// `snapshot` ist die komplette Punktfolge vor Drag-Beginn; das
/// Undo stellt sie verbatim wieder her.
#[derive(Debug, Clone)]
struct PendingEdit {
    splice_start: usize,
    delete_count: usize,
    insert: Vec<RoutePoint>,
    snapshot: Vec<RoutePoint>,
}

/// Transienter Zustand eines Kontrollpunkt-Drags.
#[derive(Debug, Default)]
struct DragSession {
    /// Monoton wachsender Anfragen-Zähler; einziger Mechanismus gegen
    /// veraltete Antworten
    seq: u64,
    /// Gesetzt wenn das Drag endete während eine Anfrage offen war:
    /// die Antwort mit genau dieser Sequenz committet selbst
    apply_on_resolve: Option<u64>,
    /// Vorbereitetes Command der zuletzt akzeptierten Antwort
    pending: Option<PendingEdit>,
    /// Zeitstempel der letzten abgesetzten Anfrage (Throttle)
    last_request_ms: Option<u64>,
    /// Cursor-Position des letzten Move-Events (auch gedrosselter)
    last_cursor: Option<Coordinate>,
    /// Nachbar-Konstellation der zuletzt abgesetzten Anfrage
    branch: Option<DragBranch>,
    /// Punktfolge vor Drag-Beginn
    snapshot: Vec<RoutePoint>,
    /// Anfrage abgesetzt und noch unbeantwortet?
    awaiting: bool,
}

/// Arena aller Drag-Sessions plus der aktuell aktiven Geste.
#[derive(Default)]
pub struct DragReconciler {
    sessions: IndexMap<SessionKey, DragSession>,
    active: Option<SessionKey>,
}

impl DragReconciler {
    /// Erstellt eine leere Arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Läuft gerade eine Drag-Geste?
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Drag-Beginn: entwertet offene Antworten dieses Punkts, räumt
    /// Pending und Vorschau ab und friert den Routen-Snapshot ein.
    pub fn begin_drag(
        &mut self,
        store: &RouteStore,
        render: &mut dyn RenderSink,
        route: usize,
        point: usize,
    ) {
        let Some(r) = store.route(route) else {
            log::warn!("Drag-Beginn: Route {route} existiert nicht");
            return;
        };
        if r.point(point).is_none() {
            log::warn!("Drag-Beginn: Punkt {point} existiert nicht in Route {route}");
            return;
        }
        let snapshot = r.snapshot();
        let session = self.sessions.entry((route, point)).or_default();
        session.seq += 1;
        session.apply_on_resolve = None;
        session.pending = None;
        session.last_request_ms = None;
        session.last_cursor = None;
        session.branch = None;
        session.snapshot = snapshot;
        session.awaiting = false;
        self.active = Some((route, point));
        render.set_preview_data(None);
        log::debug!("Drag-Beginn: Route {route}, Punkt {point}, seq {}", session.seq);
    }

    /// Drag-Move: gedrosselt neu rechnen.
    ///
    /// Ohne Kontrollpunkt-Nachbarn wird jede Bewegung verarbeitet
    /// (reine Verschiebung, kein Netzwerk); mit Nachbarn drosselt
    /// `options.drag_throttle_ms` das Anfrage-Volumen.
    pub fn drag_move(
        &mut self,
        store: &RouteStore,
        routing: &mut dyn RoutingService,
        render: &mut dyn RenderSink,
        options: &EditorOptions,
        cursor: Coordinate,
        now_ms: u64,
    ) {
        let Some((route, point)) = self.active else {
            return;
        };
        let Some(r) = store.route(route) else {
            return;
        };
        let Some(session) = self.sessions.get_mut(&(route, point)) else {
            return;
        };
        session.last_cursor = Some(cursor);

        let prev = r.prev_control_before(point);
        let next = r.next_control_after(point);

        // Kein Nachbar: reine Verschiebung, kein Netzwerk, keine Drossel
        if prev.is_none() && next.is_none() {
            let mut moved = match r.point(point) {
                Some(p) => *p,
                None => return,
            };
            moved.lon = cursor.lon;
            moved.lat = cursor.lat;
            moved.elevation = None;
            moved.is_control_point = true;
            session.pending = Some(PendingEdit {
                splice_start: point,
                delete_count: 1,
                insert: vec![moved],
                snapshot: session.snapshot.clone(),
            });
            render.set_preview_data(Some(&[moved]));
            return;
        }

        let throttle = options.drag_throttle_ms;
        if let Some(last) = session.last_request_ms {
            if now_ms.saturating_sub(last) < throttle {
                return;
            }
        }
        session.last_request_ms = Some(now_ms);
        session.seq += 1;
        session.awaiting = true;

        let points = r.points();
        let (branch, anchors) = match (prev, next) {
            (Some(p), None) => (
                DragBranch::TailReshape { prev: p },
                PathAnchors::pair(points[p].coordinate(), cursor),
            ),
            (None, Some(n)) => (
                DragBranch::HeadReshape { next: n },
                PathAnchors::pair(cursor, points[n].coordinate()),
            ),
            (Some(p), Some(n)) => (
                DragBranch::InnerReshape { prev: p, next: n },
                PathAnchors::via(points[p].coordinate(), cursor, points[n].coordinate()),
            ),
            (None, None) => unreachable!("oben behandelt"),
        };
        session.branch = Some(branch);

        routing.request_path(PathRequest {
            id: RequestId {
                purpose: RequestPurpose::Reshape { route, point },
                seq: session.seq,
            },
            anchors,
        });
    }

    /// Drag-Ende: liegt ein Pending vor, sofort committen; wartet noch
    /// eine Anfrage, den Selbst-Commit auf ihre Sequenz vormerken.
    ///
    /// Gibt `true` zurück wenn eine Geste lief (der Aufrufer
    /// unterdrückt damit den synthetischen Click nach Pointer-Up).
    pub fn end_drag(
        &mut self,
        store: &mut RouteStore,
        history: &mut CommandHistory,
        render: &mut dyn RenderSink,
    ) -> Result<bool> {
        let Some(key) = self.active.take() else {
            return Ok(false);
        };
        let Some(session) = self.sessions.get_mut(&key) else {
            return Ok(false);
        };

        if session.pending.is_some() {
            // Offene Anfrage entwerten: das Command steht bereits fest
            session.seq += 1;
            session.awaiting = false;
            session.apply_on_resolve = None;
            self.commit_pending(key, store, history, render)?;
            return Ok(true);
        }
        if session.awaiting {
            session.apply_on_resolve = Some(session.seq);
            log::debug!(
                "Drag-Ende: warte auf Antwort seq {} für {key:?}",
                session.seq
            );
            return Ok(true);
        }
        // Kein verarbeiteter Move: nichts zu committen
        render.set_preview_data(None);
        Ok(true)
    }

    /// Verarbeitet eine Routing-Antwort für einen Drag.
    ///
    /// Veraltete Sequenzen werden komplett verworfen (keine Vorschau,
    /// kein Pending). Bei passendem `apply_on_resolve` committet die
    /// Antwort das Drag selbst.
    pub fn on_path_resolved(
        &mut self,
        store: &mut RouteStore,
        history: &mut CommandHistory,
        render: &mut dyn RenderSink,
        id: RequestId,
        polyline: &[PathVertex],
    ) -> Result<()> {
        let RequestPurpose::Reshape { route, point } = id.purpose else {
            log::debug!("Drag-Antwort mit fremdem Zweck ignoriert: {:?}", id.purpose);
            return Ok(());
        };
        let key = (route, point);
        let Some(session) = self.sessions.get_mut(&key) else {
            log::debug!("Drag-Antwort ohne Session verworfen: {key:?}");
            return Ok(());
        };
        if id.seq != session.seq {
            log::debug!(
                "Veraltete Drag-Antwort verworfen: seq {} (aktuell {})",
                id.seq,
                session.seq
            );
            return Ok(());
        }
        session.awaiting = false;

        let self_commit = session.apply_on_resolve == Some(id.seq);

        if polyline.is_empty() {
            log::warn!("Routing lieferte keinen Pfad für {key:?}");
            if self_commit {
                session.apply_on_resolve = None;
                render.set_preview_data(None);
            }
            return Ok(());
        }
        let Some(branch) = session.branch else {
            return Ok(());
        };
        let Some(r) = store.route(route) else {
            return Ok(());
        };
        let route_len = r.len();
        let cursor = session.last_cursor;

        let mut insert: Vec<RoutePoint> = polyline
            .iter()
            .map(|v| {
                let mut p = RoutePoint::new(v.lon, v.lat);
                p.elevation = v.elevation;
                p
            })
            .collect();

        let (splice_start, delete_count) = match branch {
            DragBranch::TailReshape { prev } => {
                // Service wiederholt den Start-Anker: Duplikat fällt weg
                if !insert.is_empty() {
                    insert.remove(0);
                }
                if let Some(last) = insert.last_mut() {
                    last.is_control_point = true;
                }
                (prev + 1, route_len.saturating_sub(prev + 1))
            }
            DragBranch::HeadReshape { next } => {
                if let Some(first) = insert.first_mut() {
                    first.is_control_point = true;
                }
                (0, next)
            }
            DragBranch::InnerReshape { prev, next } => {
                if !insert.is_empty() {
                    insert.remove(0);
                }
                if let Some(c) = cursor {
                    if let Some(i) = closest_vertex_index(&insert, c) {
                        insert[i].is_control_point = true;
                    }
                }
                (prev + 1, next.saturating_sub(prev + 1))
            }
        };
        if insert.is_empty() {
            log::warn!("Drag-Antwort nach Duplikat-Entfernung leer: {key:?}");
            return Ok(());
        }

        render.set_preview_data(Some(&insert));
        session.pending = Some(PendingEdit {
            splice_start,
            delete_count,
            insert,
            snapshot: session.snapshot.clone(),
        });

        if self_commit {
            let session = self
                .sessions
                .get_mut(&key)
                .ok_or_else(|| anyhow::anyhow!("Session {key:?} verschwunden"))?;
            session.apply_on_resolve = None;
            session.seq += 1;
            self.commit_pending(key, store, history, render)?;
        }
        Ok(())
    }

    /// Verarbeitet einen Routing-Fehler für einen Drag: loggen, kein
    /// Pending. Wartete das beendete Drag auf genau diese Antwort,
    /// bleibt nichts zu committen und die Vorschau verschwindet.
    pub fn on_path_failed(&mut self, render: &mut dyn RenderSink, id: RequestId) {
        let RequestPurpose::Reshape { route, point } = id.purpose else {
            return;
        };
        let Some(session) = self.sessions.get_mut(&(route, point)) else {
            return;
        };
        if id.seq != session.seq {
            return;
        }
        session.awaiting = false;
        log::warn!("Routing-Fehler beim Drag von ({route}, {point})");
        if session.apply_on_resolve == Some(id.seq) {
            session.apply_on_resolve = None;
            render.set_preview_data(None);
        }
    }

    fn commit_pending(
        &mut self,
        key: SessionKey,
        store: &mut RouteStore,
        history: &mut CommandHistory,
        render: &mut dyn RenderSink,
    ) -> Result<()> {
        let Some(session) = self.sessions.get_mut(&key) else {
            return Ok(());
        };
        let Some(edit) = session.pending.take() else {
            return Ok(());
        };
        let (route, _) = key;
        let PendingEdit {
            splice_start,
            delete_count,
            insert,
            snapshot,
        } = edit;
        let command = EditCommand::new(
            "kontrollpunkt-drag",
            move |store| store.replace_route(route, snapshot.clone()),
            move |store| store.splice_segment(route, splice_start, delete_count, &insert),
        );
        history.submit(store, command)?;
        render.set_preview_data(None);
        Ok(())
    }
}
