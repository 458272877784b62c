//! Schnittstelle zum externen Routing-Service.
//!
//! Der Service ist fire-and-forget: Anfragen werden abgesetzt, Antworten
//! liefert der Host später über den Controller zurück
//! ([`crate::app::EditorController::on_path_resolved`]). Laufende
//! Anfragen werden nie transportseitig abgebrochen; veraltete Antworten
//! verwirft der Empfänger anhand der Sequenznummer.

use crate::core::Coordinate;

/// Zweck einer Routing-Anfrage; bestimmt, wohin die Antwort geroutet wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPurpose {
    /// Drag-Reshape eines Kontrollpunkts (Route, Punkt-Index)
    Reshape {
        /// Routen-Index im Store
        route: usize,
        /// Index des gezogenen Kontrollpunkts
        point: usize,
    },
    /// Click-to-extend ans Ende einer Route
    Extend {
        /// Routen-Index im Store
        route: usize,
    },
}

/// Eindeutige Kennung einer Routing-Anfrage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId {
    /// Zweck (Drag vs. Extend) samt Ziel-Identität
    pub purpose: RequestPurpose,
    /// Monoton wachsende Sequenznummer; veraltete Antworten werden
    /// daran erkannt und verworfen
    pub seq: u64,
}

/// Anker einer Pfad-Anfrage: zwei Punkte, optional ein Zwischenpunkt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathAnchors {
    /// Startpunkt
    pub start: Coordinate,
    /// Optionaler Zwischen-Anker (Drei-Anker-Anfrage beim Drag mit
    /// beiden Nachbarn)
    pub via: Option<Coordinate>,
    /// Endpunkt
    pub end: Coordinate,
}

impl PathAnchors {
    /// Zwei-Anker-Anfrage.
    pub fn pair(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            via: None,
            end,
        }
    }

    /// Drei-Anker-Anfrage.
    pub fn via(start: Coordinate, via: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            via: Some(via),
            end,
        }
    }
}

/// Anfrage an den Routing-Service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathRequest {
    /// Kennung, die die spätere Antwort tragen muss
    pub id: RequestId,
    /// Anker der Anfrage
    pub anchors: PathAnchors,
}

/// Ein Polyline-Punkt aus der Service-Antwort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathVertex {
    /// Längengrad in Grad
    pub lon: f64,
    /// Breitengrad in Grad
    pub lat: f64,
    /// Höhe in Metern, falls der Service sie mitliefert
    pub elevation: Option<f64>,
}

impl PathVertex {
    /// Erstellt einen Polyline-Punkt ohne Höhe.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            elevation: None,
        }
    }

    /// Geo-Koordinate dieses Punkts.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }
}

/// Antwort des Routing-Service. Leere Polyline bedeutet "kein Pfad
/// gefunden", nie ein Fehler.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResponse {
    /// Kennung der zugehörigen Anfrage
    pub id: RequestId,
    /// Geordnete Pfad-Punkte zwischen den Ankern
    pub polyline: Vec<PathVertex>,
}

/// Asynchroner Pfad-Berechner (externer Kollaborateur).
pub trait RoutingService {
    /// Setzt eine Anfrage ab. Die Antwort kommt später (oder nie) über
    /// den Host zurück; Latenz ist unbeschränkt, Antworten dürfen sich
    /// überholen.
    fn request_path(&mut self, request: PathRequest);
}
