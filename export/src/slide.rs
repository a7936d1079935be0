//! Per-slide layout and XML.

use crate::error::Result;
use crate::template::{emu, escape_xml};
use slide_common::{Layout, Slide};
use std::fmt::Write as FmtWrite;

const HEADING_COLOR: &str = "363636";
const SUBTITLE_COLOR: &str = "666666";
const BULLET_CHAR: &str = "\u{2022}";
/// Relationship id of the slide layout in every slide's rels.
const LAYOUT_REL_ID: &str = "rId1";
const IMAGE_REL_ID: &str = "rId2";

/// Position and size in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    /// Frame from inches.
    pub fn inches(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x: emu(x),
            y: emu(y),
            cx: emu(w),
            cy: emu(h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size_pt: u32,
    pub bold: bool,
    pub color: &'static str,
    pub centered: bool,
    pub bullets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Text {
        frame: Frame,
        paragraphs: Vec<String>,
        style: TextStyle,
    },
    /// Picture linked to an external URL; the image is never embedded.
    LinkedPicture { frame: Frame, url: String },
}

/// A slide reduced to its background and positioned shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLayout {
    pub background: String,
    pub shapes: Vec<Shape>,
}

impl SlideLayout {
    /// Choose the template for the slide at `index` and place its content.
    /// The first slide always uses the title template.
    pub fn for_slide(index: usize, slide: &Slide) -> Self {
        let shapes = if index == 0 || slide.layout == Layout::Title {
            title_shapes(slide)
        } else if slide.layout == Layout::ImageContent {
            image_content_shapes(slide)
        } else {
            content_shapes(slide)
        };
        Self {
            background: slide.background_hex().to_string(),
            shapes,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.shapes.iter().find_map(|s| match s {
            Shape::LinkedPicture { url, .. } => Some(url.as_str()),
            Shape::Text { .. } => None,
        })
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);
        xml.push_str("<p:cSld>");

        write!(
            xml,
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
            self.background
        )?;

        xml.push_str("<p:spTree>");
        xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
        xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);

        // Shape ids start at 2; 1 is the group.
        for (i, shape) in self.shapes.iter().enumerate() {
            let id = i + 2;
            match shape {
                Shape::Text {
                    frame,
                    paragraphs,
                    style,
                } => write_text_box(&mut xml, id, frame, paragraphs, style)?,
                Shape::LinkedPicture { frame, url } => write_picture(&mut xml, id, frame, url)?,
            }
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");
        Ok(xml)
    }

    pub fn rels_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        write!(
            xml,
            r#"<Relationship Id="{LAYOUT_REL_ID}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#
        )?;
        if let Some(url) = self.image_url() {
            write!(
                xml,
                r#"<Relationship Id="{IMAGE_REL_ID}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="{}" TargetMode="External"/>"#,
                escape_xml(url)
            )?;
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

fn heading(slide: &Slide) -> Shape {
    Shape::Text {
        frame: Frame::inches(0.5, 0.5, 9.0, 0.8),
        paragraphs: vec![slide.title.clone()],
        style: TextStyle {
            size_pt: 32,
            bold: true,
            color: HEADING_COLOR,
            centered: false,
            bullets: false,
        },
    }
}

fn bullets(slide: &Slide, frame: Frame, size_pt: u32) -> Shape {
    let paragraphs = slide
        .content
        .iter()
        .flat_map(|line| line.split('\n'))
        .map(str::to_string)
        .collect();
    Shape::Text {
        frame,
        paragraphs,
        style: TextStyle {
            size_pt,
            bold: false,
            color: HEADING_COLOR,
            centered: false,
            bullets: true,
        },
    }
}

fn title_shapes(slide: &Slide) -> Vec<Shape> {
    let mut shapes = vec![Shape::Text {
        frame: Frame::inches(0.5, 2.5, 9.0, 1.5),
        paragraphs: vec![slide.title.clone()],
        style: TextStyle {
            size_pt: 44,
            bold: true,
            color: HEADING_COLOR,
            centered: true,
            bullets: false,
        },
    }];
    if let Some(subtitle) = slide.subtitle() {
        shapes.push(Shape::Text {
            frame: Frame::inches(0.5, 4.5, 9.0, 0.8),
            paragraphs: vec![subtitle.to_string()],
            style: TextStyle {
                size_pt: 20,
                bold: false,
                color: SUBTITLE_COLOR,
                centered: true,
                bullets: false,
            },
        });
    }
    shapes
}

fn image_content_shapes(slide: &Slide) -> Vec<Shape> {
    let mut shapes = vec![heading(slide)];
    if let Some(url) = slide.image_url.as_deref().filter(|u| !u.trim().is_empty()) {
        shapes.push(Shape::LinkedPicture {
            frame: Frame::inches(0.5, 1.5, 4.0, 3.0),
            url: url.to_string(),
        });
    }
    shapes.push(bullets(slide, Frame::inches(5.0, 1.5, 4.5, 3.0), 16));
    shapes
}

fn content_shapes(slide: &Slide) -> Vec<Shape> {
    vec![
        heading(slide),
        bullets(slide, Frame::inches(0.5, 1.5, 9.0, 4.0), 18),
    ]
}

fn write_xfrm(xml: &mut String, frame: &Frame) -> Result<()> {
    write!(
        xml,
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        frame.x, frame.y, frame.cx, frame.cy
    )?;
    Ok(())
}

fn write_text_box(
    xml: &mut String,
    id: usize,
    frame: &Frame,
    paragraphs: &[String],
    style: &TextStyle,
) -> Result<()> {
    xml.push_str("<p:sp>");
    write!(
        xml,
        r#"<p:nvSpPr><p:cNvPr id="{id}" name="TextBox {}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
        id - 1
    )?;
    xml.push_str("<p:spPr>");
    write_xfrm(xml, frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0" anchor="t"><a:normAutofit/></a:bodyPr>"#);
    xml.push_str("<a:lstStyle/>");

    if paragraphs.is_empty() {
        xml.push_str(r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#);
    }
    for text in paragraphs {
        xml.push_str("<a:p>");
        if style.bullets {
            write!(
                xml,
                r#"<a:pPr marL="285750" indent="-285750"><a:buFont typeface="Arial"/><a:buChar char="{BULLET_CHAR}"/></a:pPr>"#
            )?;
        } else if style.centered {
            xml.push_str(r#"<a:pPr algn="ctr"/>"#);
        }
        xml.push_str("<a:r>");
        write!(xml, r#"<a:rPr lang="en-US" sz="{}""#, style.size_pt * 100)?;
        if style.bold {
            xml.push_str(r#" b="1""#);
        }
        xml.push_str(" dirty=\"0\">");
        write!(
            xml,
            r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
            style.color
        )?;
        xml.push_str("</a:rPr>");
        write!(xml, "<a:t>{}</a:t>", escape_xml(text))?;
        xml.push_str("</a:r>");
        xml.push_str("</a:p>");
    }

    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");
    Ok(())
}

fn write_picture(xml: &mut String, id: usize, frame: &Frame, url: &str) -> Result<()> {
    xml.push_str("<p:pic>");
    write!(
        xml,
        r#"<p:nvPicPr><p:cNvPr id="{id}" name="Picture {}" descr="{}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
        id - 1,
        escape_xml(url)
    )?;
    write!(
        xml,
        r#"<p:blipFill><a:blip r:link="{IMAGE_REL_ID}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#
    )?;
    xml.push_str("<p:spPr>");
    write_xfrm(xml, frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr>");
    xml.push_str("</p:pic>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(shape: &Shape) -> (&Frame, &[String], &TextStyle) {
        match shape {
            Shape::Text {
                frame,
                paragraphs,
                style,
            } => (frame, paragraphs, style),
            Shape::LinkedPicture { .. } => panic!("expected text shape"),
        }
    }

    #[test]
    fn first_slide_uses_title_template_regardless_of_layout() {
        let slide = Slide::new("s1", "Solar Energy", Layout::Content)
            .with_content(["Powering tomorrow", "ignored"]);
        let layout = SlideLayout::for_slide(0, &slide);
        assert_eq!(layout.shapes.len(), 2);

        let (frame, paras, style) = text_of(&layout.shapes[0]);
        assert_eq!(*frame, Frame::inches(0.5, 2.5, 9.0, 1.5));
        assert_eq!(paras, ["Solar Energy".to_string()]);
        assert_eq!(style.size_pt, 44);
        assert!(style.bold && style.centered);

        let (frame, paras, style) = text_of(&layout.shapes[1]);
        assert_eq!(*frame, Frame::inches(0.5, 4.5, 9.0, 0.8));
        assert_eq!(paras, ["Powering tomorrow".to_string()]);
        assert_eq!(style.color, SUBTITLE_COLOR);
    }

    #[test]
    fn title_slide_without_content_has_no_subtitle() {
        let slide = Slide::new("s2", "Section", Layout::Title);
        assert_eq!(SlideLayout::for_slide(3, &slide).shapes.len(), 1);
    }

    #[test]
    fn image_content_places_picture_left_and_bullets_right() {
        let slide = Slide::new("s2", "Panels", Layout::ImageContent)
            .with_content(["Silicon", "Thin film"])
            .with_image("https://example.com/panel.png?a=1&b=2");
        let layout = SlideLayout::for_slide(1, &slide);
        assert_eq!(layout.shapes.len(), 3);
        assert_eq!(
            layout.shapes[1],
            Shape::LinkedPicture {
                frame: Frame::inches(0.5, 1.5, 4.0, 3.0),
                url: "https://example.com/panel.png?a=1&b=2".into(),
            }
        );
        let (frame, paras, style) = text_of(&layout.shapes[2]);
        assert_eq!(*frame, Frame::inches(5.0, 1.5, 4.5, 3.0));
        assert_eq!(paras.len(), 2);
        assert_eq!(style.size_pt, 16);

        let rels = layout.rels_xml().unwrap();
        assert!(rels.contains(r#"Target="https://example.com/panel.png?a=1&amp;b=2" TargetMode="External""#));
        assert!(layout.to_xml().unwrap().contains(r#"<a:blip r:link="rId2"/>"#));
    }

    #[test]
    fn image_content_without_url_has_no_picture() {
        let slide = Slide::new("s2", "Panels", Layout::ImageContent).with_content(["a"]);
        let layout = SlideLayout::for_slide(1, &slide);
        assert_eq!(layout.image_url(), None);
        assert!(!layout.rels_xml().unwrap().contains("TargetMode"));
    }

    #[test]
    fn two_column_renders_like_content() {
        let slide = Slide::new("s3", "Compare", Layout::TwoColumn).with_content(["a", "b"]);
        let layout = SlideLayout::for_slide(2, &slide);
        let (frame, _, style) = text_of(&layout.shapes[1]);
        assert_eq!(*frame, Frame::inches(0.5, 1.5, 9.0, 4.0));
        assert_eq!(style.size_pt, 18);
        assert!(style.bullets);
    }

    #[test]
    fn empty_content_gives_an_empty_text_region() {
        let slide = Slide::new("s4", "Nothing here", Layout::Content);
        let xml = SlideLayout::for_slide(1, &slide).to_xml().unwrap();
        assert!(xml.contains(r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#));
    }

    #[test]
    fn background_and_escaping() {
        let slide = Slide::new("s5", "Tom & Jerry", Layout::Content)
            .with_content(["a < b"])
            .with_background("#1e293b");
        let xml = SlideLayout::for_slide(1, &slide).to_xml().unwrap();
        assert!(xml.contains(r#"<a:srgbClr val="1e293b"/></a:solidFill><a:effectLst/>"#));
        assert!(xml.contains("<a:t>Tom &amp; Jerry</a:t>"));
        assert!(xml.contains("<a:t>a &lt; b</a:t>"));
        assert!(xml.contains(r#"<a:buChar char="•"/>"#));
    }
}
