mod sources_panel;

pub use sources_panel::SourcesPanel;
