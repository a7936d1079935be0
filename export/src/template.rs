//! Package-level parts.
//!
//! Parts that never vary are kept as XML resources; the rest depend only on
//! the slide count or the deck title.

use crate::error::Result;
use std::fmt::Write as FmtWrite;

pub const PACKAGE_RELS: &str = include_str!("../resources/rels.xml");
pub const SLIDE_MASTER: &str = include_str!("../resources/slideMaster1.xml");
pub const SLIDE_MASTER_RELS: &str = include_str!("../resources/slideMaster1.xml.rels");
pub const SLIDE_LAYOUT: &str = include_str!("../resources/slideLayout1.xml");
pub const SLIDE_LAYOUT_RELS: &str = include_str!("../resources/slideLayout1.xml.rels");
pub const THEME: &str = include_str!("../resources/theme1.xml");
pub const PRES_PROPS: &str = include_str!("../resources/presProps.xml");
pub const VIEW_PROPS: &str = include_str!("../resources/viewProps.xml");
pub const TABLE_STYLES: &str = include_str!("../resources/tableStyles.xml");

/// EMUs per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// 16:9, 10in x 5.625in.
pub const SLIDE_WIDTH: i64 = 9_144_000;
pub const SLIDE_HEIGHT: i64 = 5_143_500;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Relationship ids in `presentation.xml.rels` before the first slide.
const FIXED_PRESENTATION_RELS: usize = 5;
const FIRST_SLIDE_ID: usize = 256;

/// Escape XML special characters.
///
/// Control characters XML 1.0 cannot carry are dropped; vertical tab and
/// form feed become spaces.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\u{b}' | '\u{c}' => out.push(' '),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < '\u{20}' => {}
            c => out.push(c),
        }
    }
    out
}

pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Relationship id of slide `index` (0-based) inside `presentation.xml.rels`.
pub fn slide_rel_id(index: usize) -> String {
    format!("rId{}", FIXED_PRESENTATION_RELS + 1 + index)
}

pub fn slide_part_name(index: usize) -> String {
    format!("ppt/slides/slide{}.xml", index + 1)
}

pub fn slide_rels_part_name(index: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", index + 1)
}

pub fn content_types_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(2048 + slide_count * 160);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let overrides = [
        ("/ppt/presentation.xml", "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"),
        ("/ppt/slideMasters/slideMaster1.xml", "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"),
        ("/ppt/slideLayouts/slideLayout1.xml", "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"),
        ("/ppt/theme/theme1.xml", "application/vnd.openxmlformats-officedocument.theme+xml"),
        ("/ppt/presProps.xml", "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"),
        ("/ppt/viewProps.xml", "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml"),
        ("/ppt/tableStyles.xml", "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml"),
        ("/docProps/core.xml", "application/vnd.openxmlformats-package.core-properties+xml"),
    ];
    for (part, content_type) in overrides {
        write!(
            xml,
            r#"<Override PartName="{part}" ContentType="{content_type}"/>"#
        )?;
    }
    for index in 0..slide_count {
        write!(
            xml,
            r#"<Override PartName="/{}" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            slide_part_name(index)
        )?;
    }
    xml.push_str("</Types>");
    Ok(xml)
}

/// Core properties. Only the title is recorded so output is reproducible.
pub fn core_props_xml(title: &str) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
    xml.push_str("<cp:revision>1</cp:revision>");
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

pub fn presentation_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 48);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="{REL_NS}" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#
    )?;

    xml.push_str("<p:sldMasterIdLst>");
    xml.push_str(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#);
    xml.push_str("</p:sldMasterIdLst>");

    // An empty sldIdLst is invalid; omit it for empty decks.
    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for index in 0..slide_count {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + index,
                slide_rel_id(index)
            )?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(
        xml,
        r#"<p:sldSz cx="{SLIDE_WIDTH}" cy="{SLIDE_HEIGHT}"/>"#
    )?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

pub fn presentation_rels_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 160);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    let fixed = [
        ("slideMaster", "slideMasters/slideMaster1.xml"),
        ("theme", "theme/theme1.xml"),
        ("presProps", "presProps.xml"),
        ("viewProps", "viewProps.xml"),
        ("tableStyles", "tableStyles.xml"),
    ];
    for (i, (kind, target)) in fixed.iter().enumerate() {
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{REL_NS}/{kind}" Target="{target}"/>"#,
            i + 1
        )?;
    }
    for index in 0..slide_count {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{REL_NS}/slide" Target="slides/slide{}.xml"/>"#,
            slide_rel_id(index),
            index + 1
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_drops_characters_xml_cannot_carry() {
        assert_eq!(escape_xml("a < b & 'c'"), "a &lt; b &amp; &apos;c&apos;");
        assert_eq!(escape_xml("Line\u{b}break"), "Line break");
        assert_eq!(escape_xml("bell\u{7}\u{0}"), "bell");
        assert_eq!(escape_xml("tab\tnew\nline"), "tab\tnew\nline");
    }

    #[test]
    fn slide_size_is_sixteen_by_nine() {
        assert_eq!(emu(10.0), SLIDE_WIDTH);
        assert_eq!(emu(5.625), SLIDE_HEIGHT);
    }

    #[test]
    fn empty_deck_has_no_slide_id_list() {
        let xml = presentation_xml(0).unwrap();
        assert!(!xml.contains("sldIdLst"));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));
    }

    #[test]
    fn slide_ids_and_rels_line_up() {
        let pres = presentation_xml(2).unwrap();
        let rels = presentation_rels_xml(2).unwrap();
        assert!(pres.contains(r#"<p:sldId id="256" r:id="rId6"/>"#));
        assert!(pres.contains(r#"<p:sldId id="257" r:id="rId7"/>"#));
        assert!(rels.contains(r#"Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml""#));
    }

    #[test]
    fn content_types_list_every_slide() {
        let xml = content_types_xml(3).unwrap();
        assert_eq!(xml.matches("presentationml.slide+xml").count(), 3);
        assert!(xml.contains(r#"PartName="/ppt/slides/slide3.xml""#));
    }

    #[test]
    fn title_is_escaped_in_core_props() {
        let xml = core_props_xml("R&D <2025>").unwrap();
        assert!(xml.contains("<dc:title>R&amp;D &lt;2025&gt;</dc:title>"));
    }
}
