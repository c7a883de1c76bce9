pub mod diagram;
mod results_panel;
mod status;

pub use results_panel::ResultsPanel;
pub use status::StatusBanner;
