//! Trail Route Editor Library.
//! Interaktiver Edit-Kern für geographische Routen: Command-basiertes
//! Undo/Redo, Drag-Abgleich mit asynchronem Routing und geometrische
//! Kontrollpunkt-Einfügung. Rendering, Persistenz und Netzwerk bleiben
//! beim Host hinter schmalen Trait-Schnittstellen.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    CommandHistory, EditCommand, EditorController, EditorIntent, EditorIo, HistoryUiSink,
};
pub use app::{
    AlertSink, ElevationQuery, PathRequest, PathResponse, PathVertex, RenderSink, RequestId,
    RequestPurpose, RoutingService,
};
pub use core::{Coordinate, Route, RoutePoint, RouteStore};
pub use shared::EditorOptions;
