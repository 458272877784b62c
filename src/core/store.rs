//! Der RouteStore: alleiniger Besitzer der Routen-Daten.
//!
//! Jede mutierende Operation benachrichtigt registrierte Listener genau
//! einmal ("mutate then notify"). Andere Komponenten halten nie eigene
//! Routen-Referenzen, sondern greifen per Index auf den Store zu.

use super::{Route, RoutePoint};

/// Listener für Routen-Änderungen; wird synchron nach jeder Mutation
/// aufgerufen.
pub type RouteListener = Box<dyn FnMut(&[Route])>;

/// In-Memory-Container für alle Routen plus Index der aktuell
/// editierten Route.
#[derive(Default)]
pub struct RouteStore {
    routes: Vec<Route>,
    current: usize,
    listeners: Vec<RouteListener>,
    revision: u64,
}

impl RouteStore {
    /// Erstellt einen Store mit einer einzelnen leeren Route.
    pub fn new() -> Self {
        Self {
            routes: vec![Route::new()],
            current: 0,
            listeners: Vec::new(),
            revision: 0,
        }
    }

    /// Erstellt einen Store aus vorhandenen Routen (z.B. GPX-Import
    /// durch einen externen Kollaborateur).
    pub fn from_routes(routes: Vec<Route>) -> Self {
        let routes = if routes.is_empty() {
            vec![Route::new()]
        } else {
            routes
        };
        Self {
            routes,
            current: 0,
            listeners: Vec::new(),
            revision: 0,
        }
    }

    /// Registriert einen Listener für Routen-Änderungen.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Route]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Monoton wachsender Änderungszähler.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Read-only Sicht auf alle Routen.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route an `index`, falls vorhanden.
    pub fn route(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    /// Index der aktuell editierten Route.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Die aktuell editierte Route.
    pub fn current_route(&self) -> &Route {
        &self.routes[self.current]
    }

    /// Wechselt die aktuell editierte Route.
    pub fn set_current_route(&mut self, index: usize) {
        if index < self.routes.len() {
            self.current = index;
        } else {
            log::warn!(
                "set_current_route: Index {index} außerhalb ({} Routen)",
                self.routes.len()
            );
        }
    }

    /// Ersetzt die komplette Punktfolge einer Route.
    pub fn replace_route(&mut self, index: usize, points: Vec<RoutePoint>) {
        let Some(route) = self.routes.get_mut(index) else {
            log::warn!("replace_route: Route {index} existiert nicht");
            return;
        };
        route.replace(points);
        self.notify();
    }

    /// Hängt einen Punkt an eine Route an.
    pub fn append_point(&mut self, index: usize, point: RoutePoint) {
        let Some(route) = self.routes.get_mut(index) else {
            log::warn!("append_point: Route {index} existiert nicht");
            return;
        };
        route.push(point);
        self.notify();
    }

    /// Entfernt den letzten Punkt einer Route.
    pub fn remove_last_point(&mut self, index: usize) -> Option<RoutePoint> {
        let route = self.routes.get_mut(index)?;
        let removed = route.pop();
        if removed.is_some() {
            self.notify();
        }
        removed
    }

    /// Splice auf einer Route: entfernt ab `start` bis zu `delete_count`
    /// Punkte und fügt `points` dort ein. Eine logische Mutation, eine
    /// Notification.
    pub fn splice_segment(
        &mut self,
        index: usize,
        start: usize,
        delete_count: usize,
        points: &[RoutePoint],
    ) {
        let Some(route) = self.routes.get_mut(index) else {
            log::warn!("splice_segment: Route {index} existiert nicht");
            return;
        };
        route.splice(start, delete_count, points);
        self.notify();
    }

    /// Setzt das Kontrollpunkt-Flag eines Punkts.
    pub fn set_control_point(&mut self, index: usize, point_index: usize, on: bool) {
        let Some(route) = self.routes.get_mut(index) else {
            log::warn!("set_control_point: Route {index} existiert nicht");
            return;
        };
        if route.set_control_flag(point_index, on) {
            self.notify();
        } else {
            log::warn!("set_control_point: Punkt {point_index} existiert nicht in Route {index}");
        }
    }

    /// Trägt fehlende Höhenwerte einer Route nach (in-place, eine
    /// Notification falls sich etwas geändert hat).
    pub fn backfill_elevation(
        &mut self,
        index: usize,
        mut query: impl FnMut(f64, f64) -> Option<f64>,
    ) {
        let Some(route) = self.routes.get_mut(index) else {
            return;
        };
        let mut patched = route.snapshot();
        let mut changed = false;
        for p in patched.iter_mut() {
            if p.elevation.is_none() {
                if let Some(e) = query(p.lon, p.lat) {
                    p.elevation = Some(e);
                    changed = true;
                }
            }
        }
        if changed {
            route.replace(patched);
            self.notify();
        }
    }

    fn notify(&mut self) {
        self.revision += 1;
        // Listener temporär herausnehmen, um Routen read-only zu reichen
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener(&self.routes);
        }
        self.listeners = listeners;
    }
}
