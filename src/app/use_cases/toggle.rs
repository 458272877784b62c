//! Kontrollpunkt-Flag per Klick abschalten.
//!
//! Der Punkt bleibt in der Route; er verliert nur seinen Anker-Status
//! und kann später über die Long-Press-Einfügung wieder einen erhalten.
//! Der Klick nach einem Drag-Release desselben Punkts wird vom
//! Controller unterdrückt und landet nie hier.

use anyhow::Result;

use crate::app::history::{CommandHistory, EditCommand};
use crate::core::RouteStore;

/// Schaltet das Kontrollpunkt-Flag eines Punkts als Command ab.
/// No-op wenn der Punkt fehlt oder kein Kontrollpunkt ist.
pub fn toggle_control_point_off(
    store: &mut RouteStore,
    history: &mut CommandHistory,
    route: usize,
    point: usize,
) -> Result<()> {
    let is_control = store
        .route(route)
        .and_then(|r| r.point(point))
        .map(|p| p.is_control_point);
    if is_control != Some(true) {
        log::debug!("Toggle ignoriert: ({route}, {point}) ist kein Kontrollpunkt");
        return Ok(());
    }
    let command = EditCommand::new(
        "kontrollpunkt-abschalten",
        move |store| store.set_control_point(route, point, true),
        move |store| store.set_control_point(route, point, false),
    );
    history.submit(store, command)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Route, RoutePoint};

    #[test]
    fn toggle_clears_flag_and_undo_restores_it() {
        let mut store = RouteStore::from_routes(vec![Route::from_points(vec![
            RoutePoint::control(0.0, 0.0),
            RoutePoint::control(1.0, 0.0),
        ])]);
        let mut history = CommandHistory::new();

        toggle_control_point_off(&mut store, &mut history, 0, 1).unwrap();
        assert!(!store.current_route().points()[1].is_control_point);
        assert_eq!(history.undo_depth(), 1);

        history.undo(&mut store);
        assert!(store.current_route().points()[1].is_control_point);
    }

    #[test]
    fn plain_point_is_noop() {
        let mut store = RouteStore::from_routes(vec![Route::from_points(vec![
            RoutePoint::control(0.0, 0.0),
            RoutePoint::new(1.0, 0.0),
        ])]);
        let mut history = CommandHistory::new();

        toggle_control_point_off(&mut store, &mut history, 0, 1).unwrap();
        toggle_control_point_off(&mut store, &mut history, 0, 7).unwrap();
        assert_eq!(history.undo_depth(), 0);
    }
}
