//! Zip assembly of the presentation package.

use crate::error::Result;
use crate::slide::SlideLayout;
use crate::template;
use slide_common::Deck;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

struct PackageWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PackageWriter {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    fn part(&mut self, name: &str, body: &str) -> Result<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(body.as_bytes())?;
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}

/// Serialize `deck` into PPTX bytes.
pub fn write_package(deck: &Deck) -> Result<Vec<u8>> {
    let count = deck.slide_count();
    let mut pkg = PackageWriter::new();

    // Content types go first.
    pkg.part("[Content_Types].xml", &template::content_types_xml(count)?)?;
    pkg.part("_rels/.rels", template::PACKAGE_RELS)?;
    pkg.part("docProps/core.xml", &template::core_props_xml(&deck.title)?)?;

    pkg.part("ppt/presentation.xml", &template::presentation_xml(count)?)?;
    pkg.part(
        "ppt/_rels/presentation.xml.rels",
        &template::presentation_rels_xml(count)?,
    )?;
    pkg.part("ppt/slideMasters/slideMaster1.xml", template::SLIDE_MASTER)?;
    pkg.part(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        template::SLIDE_MASTER_RELS,
    )?;
    pkg.part("ppt/slideLayouts/slideLayout1.xml", template::SLIDE_LAYOUT)?;
    pkg.part(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        template::SLIDE_LAYOUT_RELS,
    )?;
    pkg.part("ppt/theme/theme1.xml", template::THEME)?;
    pkg.part("ppt/presProps.xml", template::PRES_PROPS)?;
    pkg.part("ppt/viewProps.xml", template::VIEW_PROPS)?;
    pkg.part("ppt/tableStyles.xml", template::TABLE_STYLES)?;

    for (index, slide) in deck.slides.iter().enumerate() {
        let layout = SlideLayout::for_slide(index, slide);
        pkg.part(&template::slide_part_name(index), &layout.to_xml()?)?;
        pkg.part(&template::slide_rels_part_name(index), &layout.rels_xml()?)?;
    }

    pkg.finish()
}
