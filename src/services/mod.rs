pub mod render_service;
pub mod snapshot_service;
