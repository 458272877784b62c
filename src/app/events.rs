//! Editor-Intents: Eingaben aus UI/System ohne direkte Mutationslogik.

use crate::core::Coordinate;

/// Vom Host gemeldete Geste oder Steuer-Eingabe.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorIntent {
    /// Klick auf die Karte (Verlängern der aktuellen Route)
    MapClicked {
        /// Geo-Position des Klicks
        location: Coordinate,
    },
    /// Klick direkt auf einen Kontrollpunkt (Flag abschalten)
    ControlPointClicked {
        /// Routen-Index
        route: usize,
        /// Punkt-Index
        point: usize,
    },
    /// Long-Press auf die Karte (Kontrollpunkt einfügen)
    MapLongPressed {
        /// Geo-Position des Long-Press
        location: Coordinate,
        /// Aktive Zoomstufe (für den Distanz-Schwellwert)
        zoom: f64,
    },
    /// Drag-Lifecycle Start: Kontrollpunkt wird gegriffen
    DragStarted {
        /// Routen-Index
        route: usize,
        /// Punkt-Index des gegriffenen Kontrollpunkts
        point: usize,
    },
    /// Drag-Lifecycle Update: Cursor bewegt sich
    DragMoved {
        /// Aktuelle Cursor-Position
        location: Coordinate,
        /// Monotone Zeit in Millisekunden (Throttle)
        now_ms: u64,
    },
    /// Drag-Lifecycle Ende: Pointer losgelassen
    DragEnded,
    /// Letzte Mutation rückgängig machen
    UndoRequested,
    /// Rückgängig gemachte Mutation wiederholen
    RedoRequested,
    /// Linienmodus ein- oder ausschalten
    StraightLineModeSet {
        /// Gerade Segmente statt Routing-Anfragen?
        enabled: bool,
    },
    /// Aktuell editierte Route wechseln
    RouteSelected {
        /// Routen-Index
        index: usize,
    },
}
