//! Core-Domänentypen: Punkte, Routen, Store und Geometrie.

pub mod geometry;
pub mod point;
pub mod route;
pub mod store;

pub use geometry::{
    closest_vertex_index, densify_line, haversine_distance_m, insertion_threshold_m,
    meters_per_pixel, nearest_point_on_route, project_onto_segment, NearestMatch,
};
pub use point::{Coordinate, RoutePoint};
pub use route::Route;
pub use store::{RouteListener, RouteStore};
