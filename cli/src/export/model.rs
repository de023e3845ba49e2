use geoshiftcore::RecordStore;
use serde::{Deserialize, Serialize};

/// One placemark: an image at its final position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationPoint {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualizationModel {
    pub points: Vec<VisualizationPoint>,
}

impl VisualizationModel {
    /// Georeferenced records only.
    pub fn from_store(store: &RecordStore) -> Self {
        let points = store
            .georeferenced()
            .filter_map(|record| {
                let position = record.position()?;
                Some(VisualizationPoint {
                    name: record.name().to_string(),
                    lon: position.lon,
                    lat: position.lat,
                    altitude: record.altitude(),
                })
            })
            .collect();
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoshiftcore::{GeoRecord, GeoSample};

    #[test]
    fn model_skips_unreferenced_records() {
        let store: RecordStore = vec![
            GeoRecord::from_sample("a", "a.jpg", GeoSample::new(10.0, 20.0, Some(5.0))).unwrap(),
            GeoRecord::unreferenced("b", "b.png"),
        ]
        .into_iter()
        .collect();
        let model = VisualizationModel::from_store(&store);
        assert_eq!(
            model.points,
            vec![VisualizationPoint {
                name: "a.jpg".into(),
                lon: 20.0,
                lat: 10.0,
                altitude: 5.0,
            }]
        );
    }
}
