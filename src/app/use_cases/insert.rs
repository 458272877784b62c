//! Kontrollpunkt-Einfügung per Long-Press.
//!
//! Projiziert das Ziel auf alle Routen-Segmente und fügt am nächsten
//! Fußpunkt einen Kontrollpunkt ein, sofern die geographische Distanz
//! unter dem zoomabhängigen Schwellwert liegt. Außerhalb des
//! Schwellwerts passiert still nichts.

use anyhow::Result;

use crate::app::history::{CommandHistory, EditCommand};
use crate::core::{
    haversine_distance_m, insertion_threshold_m, nearest_point_on_route, Coordinate, RoutePoint,
    RouteStore,
};
use crate::shared::EditorOptions;

/// Behandelt einen Long-Press auf die Karte.
///
/// Gibt `true` zurück wenn ein Kontrollpunkt eingefügt wurde.
pub fn long_press_insert(
    store: &mut RouteStore,
    history: &mut CommandHistory,
    options: &EditorOptions,
    target: Coordinate,
    zoom: f64,
) -> Result<bool> {
    if !target.is_valid() {
        log::warn!("Long-Press mit ungültiger Koordinate ignoriert: {target:?}");
        return Ok(false);
    }
    let route = store.current_index();
    let nearest = nearest_point_on_route(store.current_route().points(), target);
    let Some(nearest) = nearest else {
        log::debug!("Long-Press: Route hat weniger als zwei Punkte");
        return Ok(false);
    };

    let threshold = insertion_threshold_m(
        nearest.foot.lat,
        zoom,
        options.insert_pixel_radius,
        options.insert_min_m,
        options.insert_max_m,
    );
    let distance = haversine_distance_m(target, nearest.foot);
    if distance > threshold {
        log::debug!(
            "Long-Press abgelehnt: {distance:.1} m > Schwellwert {threshold:.1} m"
        );
        return Ok(false);
    }

    let at = nearest.segment_index + 1;
    let point = RoutePoint::control(nearest.foot.lon, nearest.foot.lat);
    let command = EditCommand::new(
        "punkt-einfuegen",
        move |store| store.splice_segment(route, at, 1, &[]),
        move |store| store.splice_segment(route, at, 0, &[point]),
    );
    history.submit(store, command)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Route;

    fn equator_route() -> RouteStore {
        // Zwei Kontrollpunkte am Äquator, ≈ 111 m auseinander
        RouteStore::from_routes(vec![Route::from_points(vec![
            RoutePoint::control(0.0, 0.0),
            RoutePoint::control(0.001, 0.0),
        ])])
    }

    #[test]
    fn press_near_segment_inserts_control_point() {
        let mut store = equator_route();
        let mut history = CommandHistory::new();
        let options = EditorOptions::default();

        // ≈ 5,6 m neben der Segmentmitte; Schwellwert bei Zoom 18 ≈ 15,5 m
        let inserted = long_press_insert(
            &mut store,
            &mut history,
            &options,
            Coordinate::new(0.0005, 0.00005),
            18.0,
        )
        .unwrap();

        assert!(inserted);
        let pts = store.current_route().points();
        assert_eq!(pts.len(), 3);
        assert!(pts[1].is_control_point);
        assert_eq!(pts[1].lat, 0.0, "Fußpunkt liegt auf dem Segment");

        history.undo(&mut store);
        assert_eq!(store.current_route().len(), 2);
    }

    #[test]
    fn press_outside_threshold_is_silent_noop() {
        let mut store = equator_route();
        let mut history = CommandHistory::new();
        let options = EditorOptions::default();

        // ≈ 111 m neben dem Segment, weit über der 30-m-Obergrenze
        let inserted = long_press_insert(
            &mut store,
            &mut history,
            &options,
            Coordinate::new(0.0005, 0.001),
            18.0,
        )
        .unwrap();

        assert!(!inserted);
        assert_eq!(store.current_route().len(), 2);
        assert_eq!(history.undo_depth(), 0);
    }

    #[test]
    fn short_route_is_rejected() {
        let mut store = RouteStore::new();
        store.append_point(0, RoutePoint::control(0.0, 0.0));
        let mut history = CommandHistory::new();
        let options = EditorOptions::default();

        let inserted =
            long_press_insert(&mut store, &mut history, &options, Coordinate::new(0.0, 0.0), 18.0)
                .unwrap();
        assert!(!inserted);
    }

    #[test]
    fn redo_after_undo_reinserts_same_point() {
        let mut store = equator_route();
        let mut history = CommandHistory::new();
        let options = EditorOptions::default();

        long_press_insert(
            &mut store,
            &mut history,
            &options,
            Coordinate::new(0.0005, 0.00005),
            18.0,
        )
        .unwrap();
        let after_insert = store.current_route().snapshot();

        history.undo(&mut store);
        history.redo(&mut store);
        assert_eq!(store.current_route().snapshot(), after_insert);
    }
}
