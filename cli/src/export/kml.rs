use crate::export::model::VisualizationModel;
use anyhow::Context;
use log::info;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
const PLACEMARK_DESCRIPTION: &str = "randomly moved file";

/// Renders a point-per-image KML document.
pub struct KmlExporter {
    document_name: String,
}

impl KmlExporter {
    pub fn new(document_name: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
        }
    }

    pub fn render(&self, model: &VisualizationModel) -> anyhow::Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)]),
        ))?;
        writer.write_event(Event::Start(BytesStart::new("Document")))?;
        text_element(&mut writer, "name", &self.document_name)?;

        for point in &model.points {
            writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
            text_element(&mut writer, "name", &point.name)?;
            text_element(&mut writer, "description", PLACEMARK_DESCRIPTION)?;
            writer.write_event(Event::Start(BytesStart::new("Point")))?;
            text_element(
                &mut writer,
                "coordinates",
                &format!("{},{},{}", point.lon, point.lat, point.altitude),
            )?;
            writer.write_event(Event::End(BytesEnd::new("Point")))?;
            writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("Document")))?;
        writer.write_event(Event::End(BytesEnd::new("kml")))?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).context("KML output is not UTF-8")
    }

    pub fn write(&self, model: &VisualizationModel, path: &Path) -> anyhow::Result<()> {
        let document = self.render(model)?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut file =
            fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
        file.write_all(document.as_bytes())?;
        file.write_all(b"\n")?;
        info!(
            "wrote {} placemark(s) to {}",
            model.points.len(),
            path.display()
        );
        Ok(())
    }
}

fn text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
