//! Use-Cases: je Geste eine in sich geschlossene Operation über Store
//! und History.

pub mod elevation;
pub mod extend;
pub mod insert;
pub mod toggle;
