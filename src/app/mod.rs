//! Application-Layer: Controller, History, Drag-Abgleich und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod drag;
pub mod events;
pub mod history;
pub mod routing;
pub mod services;
pub mod use_cases;

pub use command_log::IntentLog;
pub use controller::EditorController;
pub use drag::DragReconciler;
pub use events::EditorIntent;
pub use history::{CommandHistory, EditAction, EditCommand, HistoryError, HistoryUiSink};
pub use routing::{
    PathAnchors, PathRequest, PathResponse, PathVertex, RequestId, RequestPurpose, RoutingService,
};
pub use services::{AlertSink, EditorIo, ElevationQuery, RenderSink};
pub use use_cases::extend::RouteExtender;
