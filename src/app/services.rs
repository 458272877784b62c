//! Host-Kollaborateure des Editors: Rendering, Höhenabfrage, Meldungen.
//!
//! Alles hinter Traits, damit Tests mit Attrappen arbeiten können und
//! der Kern keine UI- oder Netzwerk-Abhängigkeit trägt.

use crate::core::{Route, RoutePoint};

/// Darstellungs-Ebene der Karte.
pub trait RenderSink {
    /// Ersetzt die dargestellten Routen (Commit-Ebene).
    fn set_route_data(&mut self, routes: &[Route]);

    /// Setzt oder löscht die Vorschau-Polyline eines laufenden Drags.
    /// `None` entfernt die Vorschau.
    fn set_preview_data(&mut self, preview: Option<&[RoutePoint]>);
}

/// Höhenabfrage für Punkte ohne Elevation-Wert.
pub trait ElevationQuery {
    /// Höhe in Metern an der gegebenen Koordinate, falls bekannt.
    fn elevation_at(&self, lon: f64, lat: f64) -> Option<f64>;
}

/// Nutzer-sichtbare Meldungen (z.B. "kein Pfad gefunden").
pub trait AlertSink {
    /// Zeigt eine Meldung an.
    fn alert(&mut self, message: &str);
}

/// Gebündelte Host-Kollaborateure für einen Controller-Aufruf.
///
/// Geborgt statt besessen: der Host hält die konkreten Implementierungen
/// und reicht sie pro Intent-Verarbeitung herein.
pub struct EditorIo<'a> {
    /// Routing-Service für Pfad-Anfragen
    pub routing: &'a mut dyn crate::app::routing::RoutingService,
    /// Karten-Darstellung
    pub render: &'a mut dyn RenderSink,
    /// Höhenabfrage
    pub elevation: &'a dyn ElevationQuery,
    /// Meldungs-Ausgabe
    pub alerts: &'a mut dyn AlertSink,
}
