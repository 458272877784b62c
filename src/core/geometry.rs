//! Geometrie-Berechnungen: Segment-Projektion, Haversine-Distanz,
//! Zoom-Schwellwert und Geraden-Verdichtung.

use super::{Coordinate, RoutePoint};
use glam::DVec2;

/// Erdradius in Metern (Haversine).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meter pro Pixel am Äquator bei Zoom 0 (256er-Kacheln, Web-Mercator).
const EQUATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;

/// Treffer der Nächster-Punkt-Suche auf einer Route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestMatch {
    /// Index des unteren Segment-Endpunkts (Segment `i` → `i+1`)
    pub segment_index: usize,
    /// Klemm-Parameter entlang des Segments (0..=1)
    pub t: f64,
    /// Fußpunkt der Projektion
    pub foot: Coordinate,
    /// Quadratische planare Distanz (Grad²) zum Fußpunkt
    pub dist_sq: f64,
}

/// Projiziert `p` auf das Segment `a`→`b` (geklemmt auf die Endpunkte).
///
/// Gibt `(t, Fußpunkt)` zurück. Degenerierte Eingaben (nicht-endliche
/// Koordinaten, Null-Länge) liefern `None` statt zu rechnen.
pub fn project_onto_segment(p: DVec2, a: DVec2, b: DVec2) -> Option<(f64, DVec2)> {
    if !p.is_finite() || !a.is_finite() || !b.is_finite() {
        return None;
    }
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= 0.0 {
        return None;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    Some((t, a + ab * t))
}

/// Findet den Fußpunkt mit global minimaler quadratischer Distanz zu
/// `target` über alle aufeinanderfolgenden Segment-Paare der Route.
///
/// Gleichstand wird zugunsten des niedrigsten Segment-Index aufgelöst
/// (strikter `<`-Vergleich, first-match-wins).
pub fn nearest_point_on_route(points: &[RoutePoint], target: Coordinate) -> Option<NearestMatch> {
    if points.len() < 2 {
        return None;
    }
    let p = target.as_dvec2();
    let mut best: Option<NearestMatch> = None;

    for i in 0..points.len() - 1 {
        let a = &points[i];
        let b = &points[i + 1];
        if !a.has_finite_coords() || !b.has_finite_coords() {
            continue;
        }
        let Some((t, foot)) = project_onto_segment(p, a.as_dvec2(), b.as_dvec2()) else {
            continue;
        };
        let dist_sq = foot.distance_squared(p);
        let better = match &best {
            Some(m) => dist_sq < m.dist_sq,
            None => true,
        };
        if better {
            best = Some(NearestMatch {
                segment_index: i,
                t,
                foot: Coordinate::new(foot.x, foot.y),
                dist_sq,
            });
        }
    }
    best
}

/// Index des Punkts mit minimaler quadratischer planarer Distanz zu
/// `target` (für die Kontrollpunkt-Wahl nach einem Drei-Anker-Routing).
pub fn closest_vertex_index(points: &[RoutePoint], target: Coordinate) -> Option<usize> {
    let p = target.as_dvec2();
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in points.iter().enumerate() {
        if !point.has_finite_coords() {
            continue;
        }
        let d = point.as_dvec2().distance_squared(p);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Geographische Distanz zwischen zwei Koordinaten in Metern (Haversine).
pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let sin_phi = (d_phi / 2.0).sin();
    let sin_lambda = (d_lambda / 2.0).sin();

    let h = sin_phi * sin_phi + phi1.cos() * phi2.cos() * sin_lambda * sin_lambda;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Meter pro Bildschirm-Pixel bei gegebener Breite und Zoomstufe
/// (Web-Mercator, 256er-Kacheln).
pub fn meters_per_pixel(lat_deg: f64, zoom: f64) -> f64 {
    EQUATOR_METERS_PER_PIXEL * lat_deg.to_radians().cos() / 2f64.powf(zoom)
}

/// Akzeptanz-Schwellwert für das Einfügen eines Kontrollpunkts:
/// Pixel-Radius auf Meter umgerechnet, geklemmt auf `[min_m, max_m]`.
pub fn insertion_threshold_m(
    lat_deg: f64,
    zoom: f64,
    pixel_radius: f64,
    min_m: f64,
    max_m: f64,
) -> f64 {
    (meters_per_pixel(lat_deg, zoom) * pixel_radius).clamp(min_m, max_m)
}

/// Verdichtet die Gerade `start`→`end` auf Punkte im Abstand von maximal
/// `spacing_m` Metern (inklusive Start und Ende).
///
/// Bei verschwindender Distanz wird nur `[start]` zurückgegeben.
pub fn densify_line(start: Coordinate, end: Coordinate, spacing_m: f64) -> Vec<Coordinate> {
    let distance = haversine_distance_m(start, end);
    if distance <= f64::EPSILON || spacing_m <= 0.0 {
        return vec![start];
    }
    let segment_count = (distance / spacing_m).ceil().max(1.0) as usize;
    let a = start.as_dvec2();
    let b = end.as_dvec2();
    (0..=segment_count)
        .map(|i| {
            let q = a.lerp(b, i as f64 / segment_count as f64);
            Coordinate::new(q.x, q.y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plain(lon: f64, lat: f64) -> RoutePoint {
        RoutePoint::new(lon, lat)
    }

    #[test]
    fn projection_on_horizontal_segment() {
        // Segment (0,0)→(10,0), Anfrage (5,1): t=0.5, Fußpunkt (5,0), Distanz 1
        let (t, foot) = project_onto_segment(
            DVec2::new(5.0, 1.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
        )
        .expect("Projektion erwartet");
        assert_relative_eq!(t, 0.5);
        assert_relative_eq!(foot.x, 5.0);
        assert_relative_eq!(foot.y, 0.0);
        assert_relative_eq!(foot.distance(DVec2::new(5.0, 1.0)), 1.0);
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let (t, foot) = project_onto_segment(
            DVec2::new(-3.0, 2.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(t, 0.0);
        assert_relative_eq!(foot.x, 0.0);
    }

    #[test]
    fn projection_rejects_degenerate_input() {
        let a = DVec2::new(1.0, 1.0);
        assert!(project_onto_segment(DVec2::new(0.0, 0.0), a, a).is_none());
        assert!(project_onto_segment(DVec2::new(f64::NAN, 0.0), a, DVec2::new(2.0, 2.0)).is_none());
    }

    #[test]
    fn nearest_point_tie_prefers_lowest_segment() {
        // Zwei symmetrische Segmente, Anfrage exakt in der Mitte:
        // beide Fußpunkte gleich weit entfernt → Segment 0 gewinnt
        let pts = vec![
            plain(0.0, 1.0),
            plain(2.0, 1.0),
            plain(2.0, -1.0),
            plain(0.0, -1.0),
        ];
        let m = nearest_point_on_route(&pts, Coordinate::new(1.0, 0.0)).unwrap();
        assert_eq!(m.segment_index, 0);
    }

    #[test]
    fn nearest_point_skips_non_finite() {
        let pts = vec![plain(f64::NAN, 0.0), plain(1.0, 0.0), plain(2.0, 0.0)];
        let m = nearest_point_on_route(&pts, Coordinate::new(1.5, 1.0)).unwrap();
        assert_eq!(m.segment_index, 1);
    }

    #[test]
    fn nearest_point_needs_two_points() {
        assert!(nearest_point_on_route(&[plain(0.0, 0.0)], Coordinate::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn haversine_matches_known_distance() {
        // 1 Breitengrad ≈ 111.19 km
        let d = haversine_distance_m(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert_relative_eq!(d, 111_195.0, max_relative = 1e-3);
    }

    #[test]
    fn threshold_clamps_to_bounds() {
        // Sehr hoher Zoom → Rohwert unter 8 m → exakt 8 m
        let low = insertion_threshold_m(47.0, 22.0, 26.0, 8.0, 30.0);
        assert_relative_eq!(low, 8.0);
        // Sehr niedriger Zoom → Rohwert über 30 m → exakt 30 m
        let high = insertion_threshold_m(47.0, 5.0, 26.0, 8.0, 30.0);
        assert_relative_eq!(high, 30.0);
    }

    #[test]
    fn threshold_scales_between_bounds() {
        let a = insertion_threshold_m(0.0, 17.0, 26.0, 8.0, 30.0);
        let b = insertion_threshold_m(0.0, 18.0, 26.0, 8.0, 30.0);
        assert!(a > b, "höherer Zoom muss kleineren Schwellwert ergeben");
        assert!(a > 8.0 && a < 30.0);
    }

    #[test]
    fn densify_respects_spacing() {
        let start = Coordinate::new(0.0, 0.0);
        let end = Coordinate::new(0.0, 0.001); // ≈ 111 m
        let pts = densify_line(start, end, 10.0);
        // ceil(111.19/10) = 12 Segmente → 13 Punkte
        assert_eq!(pts.len(), 13);
        assert_eq!(pts[0], start);
        assert_relative_eq!(pts.last().unwrap().lat, end.lat);
    }

    #[test]
    fn densify_zero_distance_returns_start() {
        let c = Coordinate::new(5.0, 5.0);
        assert_eq!(densify_line(c, c, 10.0), vec![c]);
    }

    #[test]
    fn closest_vertex_picks_planar_minimum() {
        let pts = vec![plain(0.0, 0.0), plain(5.0, 0.0), plain(10.0, 0.0)];
        assert_eq!(closest_vertex_index(&pts, Coordinate::new(4.4, 0.1)), Some(1));
    }
}
