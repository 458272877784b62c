//! Punkt-Typen: Routenpunkte und rohe Geo-Koordinaten.

use glam::DVec2;

/// Rohe Geo-Koordinate (Längengrad/Breitengrad), z.B. Cursor-Position
/// oder Anker für eine Routing-Anfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Längengrad in Grad (-180..180)
    pub lon: f64,
    /// Breitengrad in Grad (-90..90)
    pub lat: f64,
}

impl Coordinate {
    /// Erstellt eine Koordinate aus Längen- und Breitengrad.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Planare Sicht für Vektor-Mathematik (x = lon, y = lat).
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.lon, self.lat)
    }

    /// Prüft ob beide Komponenten endlich und im gültigen Gradbereich sind.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

/// Einzelner Punkt einer Route.
///
/// `is_control_point` unterscheidet vom Nutzer gesetzte Wegpunkte von
/// Interpolations-Punkten aus dem Routing-Service. Interpolations-Punkte
/// werden nie einzeln editiert, nur segmentweise ersetzt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePoint {
    /// Längengrad in Grad
    pub lon: f64,
    /// Breitengrad in Grad
    pub lat: f64,
    /// Höhe in Metern; `None` bis eine Elevation-Abfrage sie nachträgt
    pub elevation: Option<f64>,
    /// Vom Nutzer verankerter Wegpunkt?
    pub is_control_point: bool,
}

impl RoutePoint {
    /// Erstellt einen Interpolations-Punkt ohne Höhe.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            elevation: None,
            is_control_point: false,
        }
    }

    /// Erstellt einen Kontrollpunkt ohne Höhe.
    pub fn control(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            elevation: None,
            is_control_point: true,
        }
    }

    /// Geo-Koordinate dieses Punkts.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }

    /// Planare Sicht für Vektor-Mathematik (x = lon, y = lat).
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.lon, self.lat)
    }

    /// Prüft ob beide Koordinaten endlich sind.
    pub fn has_finite_coords(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_validity() {
        assert!(Coordinate::new(11.5, 47.3).is_valid());
        assert!(!Coordinate::new(f64::NAN, 47.3).is_valid());
        assert!(!Coordinate::new(181.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -90.5).is_valid());
    }

    #[test]
    fn control_point_flag() {
        let p = RoutePoint::control(1.0, 2.0);
        assert!(p.is_control_point);
        assert!(p.elevation.is_none());
        let q = RoutePoint::new(1.0, 2.0);
        assert!(!q.is_control_point);
    }
}
