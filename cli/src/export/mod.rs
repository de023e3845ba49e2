pub mod kml;
pub mod model;

pub use kml::KmlExporter;
pub use model::VisualizationModel;
