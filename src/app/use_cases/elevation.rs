//! Höhen-Nachtrag für Punkte ohne Elevation-Wert.

use crate::app::services::ElevationQuery;
use crate::core::RouteStore;

/// Trägt fehlende Höhen der aktuell editierten Route nach.
/// Vorhandene Werte bleiben unangetastet.
pub fn backfill_current_route(store: &mut RouteStore, query: &dyn ElevationQuery) {
    let index = store.current_index();
    store.backfill_elevation(index, |lon, lat| query.elevation_at(lon, lat));
}
