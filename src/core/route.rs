//! Die Route als geordnete Punktfolge mit Splice-Operationen.

use super::RoutePoint;

/// Eine Route: geordnete Folge von [`RoutePoint`]s.
///
/// Mutationen laufen ausschließlich über Ganz-Ersetzung oder
/// Splice-Operationen; einzelne Interpolations-Punkte werden nie
/// in-place editiert (nur das Kontrollpunkt-Flag darf kippen).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    points: Vec<RoutePoint>,
}

impl Route {
    /// Erstellt eine leere Route.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Erstellt eine Route aus einer Punktfolge.
    pub fn from_points(points: Vec<RoutePoint>) -> Self {
        Self { points }
    }

    /// Anzahl der Punkte.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Ist die Route leer?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Read-only Sicht auf alle Punkte.
    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    /// Punkt an `index`, falls vorhanden.
    pub fn point(&self, index: usize) -> Option<&RoutePoint> {
        self.points.get(index)
    }

    /// Letzter Punkt, falls vorhanden.
    pub fn last(&self) -> Option<&RoutePoint> {
        self.points.last()
    }

    /// Kopie der gesamten Punktfolge (Snapshot für Undo-Closures).
    pub fn snapshot(&self) -> Vec<RoutePoint> {
        self.points.clone()
    }

    /// Hängt einen Punkt an.
    pub(crate) fn push(&mut self, point: RoutePoint) {
        self.points.push(point);
    }

    /// Entfernt den letzten Punkt.
    pub(crate) fn pop(&mut self) -> Option<RoutePoint> {
        self.points.pop()
    }

    /// Splice: entfernt ab `start` bis zu `delete_count` Punkte und fügt
    /// `insert` an derselben Stelle ein. Indizes werden defensiv auf die
    /// gültige Länge geklemmt.
    pub(crate) fn splice(&mut self, start: usize, delete_count: usize, insert: &[RoutePoint]) {
        let start = start.min(self.points.len());
        let end = start.saturating_add(delete_count).min(self.points.len());
        self.points.splice(start..end, insert.iter().copied());
    }

    /// Ersetzt die komplette Punktfolge.
    pub(crate) fn replace(&mut self, points: Vec<RoutePoint>) {
        self.points = points;
    }

    /// Setzt das Kontrollpunkt-Flag eines Punkts.
    pub(crate) fn set_control_flag(&mut self, index: usize, on: bool) -> bool {
        match self.points.get_mut(index) {
            Some(p) => {
                p.is_control_point = on;
                true
            }
            None => false,
        }
    }

    /// Nächster Kontrollpunkt *vor* `index` (rückwärts gescannt,
    /// `index` selbst ausgeschlossen).
    pub fn prev_control_before(&self, index: usize) -> Option<usize> {
        let upper = index.min(self.points.len());
        (0..upper).rev().find(|&i| self.points[i].is_control_point)
    }

    /// Nächster Kontrollpunkt *nach* `index` (vorwärts gescannt,
    /// `index` selbst ausgeschlossen).
    pub fn next_control_after(&self, index: usize) -> Option<usize> {
        ((index + 1)..self.points.len()).find(|&i| self.points[i].is_control_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_with_controls() -> Route {
        // Kontrollpunkte bei 0, 3, 6; dazwischen Interpolation
        let mut pts = Vec::new();
        for i in 0..7 {
            let mut p = RoutePoint::new(i as f64, 0.0);
            p.is_control_point = i % 3 == 0;
            pts.push(p);
        }
        Route::from_points(pts)
    }

    #[test]
    fn neighbor_scans_exclude_self() {
        let route = route_with_controls();
        assert_eq!(route.prev_control_before(3), Some(0));
        assert_eq!(route.next_control_after(3), Some(6));
        // Randpunkte: kein Nachbar auf der offenen Seite
        assert_eq!(route.prev_control_before(0), None);
        assert_eq!(route.next_control_after(6), None);
    }

    #[test]
    fn neighbor_scan_skips_plain_points() {
        let route = route_with_controls();
        assert_eq!(route.prev_control_before(5), Some(3));
        assert_eq!(route.next_control_after(1), Some(3));
    }

    #[test]
    fn splice_replaces_middle_segment() {
        let mut route = route_with_controls();
        let insert = [RoutePoint::new(100.0, 0.0), RoutePoint::new(101.0, 0.0)];
        route.splice(1, 2, &insert);
        assert_eq!(route.len(), 7);
        assert_eq!(route.point(1).unwrap().lon, 100.0);
        assert_eq!(route.point(2).unwrap().lon, 101.0);
        assert_eq!(route.point(3).unwrap().lon, 3.0);
    }

    #[test]
    fn splice_clamps_out_of_range() {
        let mut route = Route::from_points(vec![RoutePoint::new(0.0, 0.0)]);
        route.splice(5, 10, &[RoutePoint::new(9.0, 9.0)]);
        assert_eq!(route.len(), 2);
        assert_eq!(route.point(1).unwrap().lon, 9.0);
    }

    #[test]
    fn set_control_flag_out_of_range_is_false() {
        let mut route = Route::new();
        assert!(!route.set_control_flag(0, true));
    }
}
