//! Click-to-extend: Route per Klick verlängern.
//!
//! Leere Route: der Klick setzt einen einzelnen Kontrollpunkt. Sonst
//! wird ein Pfad vom letzten Routenpunkt zum Klick angefragt (oder im
//! Linienmodus eine verdichtete Gerade ohne Netzwerk angehängt).

use anyhow::Result;

use crate::app::history::{CommandHistory, EditCommand};
use crate::app::routing::{
    PathAnchors, PathRequest, PathVertex, RequestId, RequestPurpose, RoutingService,
};
use crate::app::services::AlertSink;
use crate::core::{densify_line, Coordinate, RoutePoint, RouteStore};
use crate::shared::EditorOptions;

/// Verlängert die aktuell editierte Route per Klick.
///
/// Hält den Sequenzzähler der Extend-Anfragen: nur die Antwort auf den
/// jeweils letzten Klick wird angewendet.
#[derive(Debug, Default)]
pub struct RouteExtender {
    seq: u64,
}

impl RouteExtender {
    /// Erstellt einen Extender ohne offene Anfragen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verarbeitet einen Karten-Klick.
    pub fn click(
        &mut self,
        store: &mut RouteStore,
        history: &mut CommandHistory,
        routing: &mut dyn RoutingService,
        options: &EditorOptions,
        straight_line: bool,
        target: Coordinate,
    ) -> Result<()> {
        if !target.is_valid() {
            log::warn!("Klick mit ungültiger Koordinate ignoriert: {target:?}");
            return Ok(());
        }
        let route = store.current_index();
        let (last, snapshot) = {
            let r = store.current_route();
            (r.last().map(|p| p.coordinate()), r.snapshot())
        };

        let Some(last) = last else {
            // Leere Route: erster Punkt wird direkt gesetzt
            let point = RoutePoint::control(target.lon, target.lat);
            let command = EditCommand::new(
                "punkt-anfuegen",
                move |store| {
                    store.remove_last_point(route);
                },
                move |store| store.append_point(route, point),
            );
            history.submit(store, command)?;
            return Ok(());
        };

        if straight_line {
            let line = densify_line(last, target, options.straight_line_spacing_m);
            if line.len() < 2 {
                log::debug!("Linienmodus: Klick auf den letzten Punkt, nichts anzufügen");
                return Ok(());
            }
            // Erster Verdichtungs-Punkt dupliziert den letzten Routenpunkt
            let mut insert: Vec<RoutePoint> = line[1..]
                .iter()
                .map(|c| RoutePoint::new(c.lon, c.lat))
                .collect();
            if let Some(p) = insert.last_mut() {
                p.is_control_point = true;
            }
            let at = snapshot.len();
            let command = EditCommand::new(
                "linie-anfuegen",
                move |store| store.replace_route(route, snapshot.clone()),
                move |store| store.splice_segment(route, at, 0, &insert),
            );
            history.submit(store, command)?;
            return Ok(());
        }

        self.seq += 1;
        routing.request_path(PathRequest {
            id: RequestId {
                purpose: RequestPurpose::Extend { route },
                seq: self.seq,
            },
            anchors: PathAnchors::pair(last, target),
        });
        Ok(())
    }

    /// Verarbeitet eine Routing-Antwort für einen Extend-Klick.
    pub fn on_path_resolved(
        &mut self,
        store: &mut RouteStore,
        history: &mut CommandHistory,
        alerts: &mut dyn AlertSink,
        id: RequestId,
        polyline: &[PathVertex],
    ) -> Result<()> {
        let RequestPurpose::Extend { route } = id.purpose else {
            return Ok(());
        };
        if id.seq != self.seq {
            log::debug!(
                "Veraltete Extend-Antwort verworfen: seq {} (aktuell {})",
                id.seq,
                self.seq
            );
            return Ok(());
        }
        if polyline.is_empty() {
            log::warn!("Routing lieferte keinen Pfad zum Klickziel");
            alerts.alert("Kein Pfad zum Klickziel gefunden");
            return Ok(());
        }
        let Some(snapshot) = store.route(route).map(|r| r.snapshot()) else {
            return Ok(());
        };

        let mut insert: Vec<RoutePoint> = polyline
            .iter()
            .map(|v| {
                let mut p = RoutePoint::new(v.lon, v.lat);
                p.elevation = v.elevation;
                p
            })
            .collect();
        if !snapshot.is_empty() {
            // Service wiederholt den Start-Anker: Duplikat fällt weg
            insert.remove(0);
        }
        if insert.is_empty() {
            return Ok(());
        }
        if let Some(p) = insert.last_mut() {
            p.is_control_point = true;
        }

        let at = snapshot.len();
        let command = EditCommand::new(
            "pfad-anfuegen",
            move |store| store.replace_route(route, snapshot.clone()),
            move |store| store.splice_segment(route, at, 0, &insert),
        );
        history.submit(store, command)?;
        Ok(())
    }

    /// Verarbeitet einen Routing-Fehler für einen Extend-Klick:
    /// Meldung an den Nutzer, keine Mutation.
    pub fn on_path_failed(&mut self, alerts: &mut dyn AlertSink, id: RequestId) {
        let RequestPurpose::Extend { .. } = id.purpose else {
            return;
        };
        if id.seq != self.seq {
            return;
        }
        log::warn!("Routing-Anfrage für Klick fehlgeschlagen");
        alerts.alert("Routing-Anfrage fehlgeschlagen");
    }
}
