// ABOUTME: PPTX generation module for the script-deck application
// ABOUTME: Writes the render model as a PowerPoint package with text boxes and letterboxed images

use crate::deck::{Frame, RenderModel, SlideLayout, SLIDE_HEIGHT_IN, SLIDE_WIDTH_IN, TITLE_FRAME};
use crate::errors::{DeckError, Result};
use crate::media::extension_for_mime_type;
use image::{DynamicImage, ImageFormat};
use log::{debug, info, warn};
use quick_xml::escape::escape;
use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::{write::FileOptions, ZipWriter};

const EMU_PER_INCH: f64 = 914_400.0;
const TITLE_COLOR: &str = "00529B";
const TITLE_FONT_SIZE: u32 = 24;

// Relationship ids inside each slide's rels part.
const SLIDE_LAYOUT_REL: &str = "rId1";
const SLIDE_IMAGE_REL: &str = "rId2";

// Slide master and layout ids share a space that starts at 2^31.
const SLIDE_MASTER_ID: u32 = 2_147_483_648;
const SLIDE_LAYOUT_ID: u32 = 2_147_483_649;

// Image formats declared as defaults in [Content_Types].xml.
const PACKAGED_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::WebP,
];

/// Configuration for PPTX generation
pub struct PptxConfig {
    pub title: String,
}

impl Default for PptxConfig {
    fn default() -> Self {
        Self {
            title: "AI Presentation".to_string(),
        }
    }
}

/// A slide picture that made it into the package.
struct Picture {
    media_name: String,
    bytes: Vec<u8>,
    frame: Frame,
}

struct PreparedSlide {
    layout: SlideLayout,
    picture: Option<Picture>,
}

/// Generate a PPTX presentation file from a render model
pub fn generate_pptx(model: &RenderModel, output_file: &Path, config: &PptxConfig) -> Result<()> {
    info!("Generating PPTX with {} slides at {:?}", model.len(), output_file);

    if model.is_empty() {
        return Err(DeckError::PptxError("No slides to export".to_string()));
    }

    crate::utils::ensure_parent_directory_exists(output_file)?;

    let file = fs::File::create(output_file).map_err(DeckError::FileReadError)?;
    write_pptx(model, file, config)?;

    info!("PPTX file created at {:?}", output_file);
    Ok(())
}

/// Write the PPTX package to any seekable writer
pub fn write_pptx<W: Write + Seek>(model: &RenderModel, writer: W, config: &PptxConfig) -> Result<()> {
    let prepared = prepare_slides(model);
    let slide_count = prepared.len();
    let mut zip = ZipWriter::new(writer);

    let (cx, cy) = (emu(SLIDE_WIDTH_IN), emu(SLIDE_HEIGHT_IN));

    // Add [Content_Types].xml
    info!("Creating PPTX structure: [Content_Types].xml");
    zip.start_file("[Content_Types].xml", FileOptions::default())?;
    let content_types = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="jpeg" ContentType="image/jpeg"/>
    <Default Extension="jpg" ContentType="image/jpeg"/>
    <Default Extension="png" ContentType="image/png"/>
    <Default Extension="gif" ContentType="image/gif"/>
    <Default Extension="bmp" ContentType="image/bmp"/>
    <Default Extension="webp" ContentType="image/webp"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
    <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
    <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
    <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
    {slides}
</Types>"#,
        slides = (1..=slide_count)
            .map(|n| {
                format!(
                    r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                    n
                )
            })
            .collect::<Vec<String>>()
            .join("\n    ")
    );
    zip.write_all(content_types.as_bytes())?;

    // Add _rels/.rels
    info!("Creating PPTX structure: _rels/.rels");
    zip.start_file("_rels/.rels", FileOptions::default())?;
    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;
    zip.write_all(rels.as_bytes())?;

    // Add docProps/app.xml
    info!("Creating PPTX structure: docProps/app.xml");
    zip.start_file("docProps/app.xml", FileOptions::default())?;
    let app_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>script-deck</Application>
    <Slides>{}</Slides>
</Properties>"#,
        slide_count
    );
    zip.write_all(app_xml.as_bytes())?;

    // Add docProps/core.xml
    info!("Creating PPTX structure: docProps/core.xml");
    zip.start_file("docProps/core.xml", FileOptions::default())?;
    let core_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:title>{}</dc:title>
    <dc:creator>script-deck</dc:creator>
    <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
    <cp:revision>1</cp:revision>
</cp:coreProperties>"#,
        escape(config.title.as_str()),
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );
    zip.write_all(core_xml.as_bytes())?;

    // Add ppt/_rels/presentation.xml.rels
    info!("Creating PPTX structure: ppt/_rels/presentation.xml.rels");
    zip.start_file("ppt/_rels/presentation.xml.rels", FileOptions::default())?;
    let mut pres_rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for n in 1..=slide_count {
        pres_rels.push_str(&format!(
            r#"    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            n, n
        ));
        pres_rels.push('\n');
    }
    let master_rel = slide_count + 1;
    let theme_rel = slide_count + 2;
    pres_rels.push_str(&format!(
        r#"    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#,
        master_rel, theme_rel
    ));
    pres_rels.push_str("</Relationships>");
    zip.write_all(pres_rels.as_bytes())?;

    write_master_parts(&mut zip)?;

    // Add ppt/presentation.xml
    info!("Creating PPTX structure: ppt/presentation.xml");
    zip.start_file("ppt/presentation.xml", FileOptions::default())?;
    let presentation_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:sldMasterIdLst>
        <p:sldMasterId id="{master_id}" r:id="rId{master_rel}"/>
    </p:sldMasterIdLst>
    <p:sldIdLst>
{slide_ids}
    </p:sldIdLst>
    <p:sldSz cx="{cx}" cy="{cy}" type="screen16x9"/>
    <p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#,
        slide_ids = (0..slide_count)
            .map(|i| format!(r#"        <p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 1))
            .collect::<Vec<String>>()
            .join("\n"),
        master_id = SLIDE_MASTER_ID,
        master_rel = master_rel,
        cx = cx,
        cy = cy
    );
    zip.write_all(presentation_xml.as_bytes())?;

    // Process each slide
    for (slide, prepared) in model.iter().zip(prepared.iter()) {
        let slide_num = slide.index + 1;
        info!("Processing slide {}: {}", slide_num, slide.entry.title);

        zip.start_file(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
            FileOptions::default(),
        )?;
        let mut slide_rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
        );
        slide_rels.push_str(&format!(
            r#"    <Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
            SLIDE_LAYOUT_REL
        ));
        slide_rels.push('\n');

        if let Some(picture) = &prepared.picture {
            info!("Adding image to PPTX: ppt/media/{}", picture.media_name);
            slide_rels.push_str(&format!(
                r#"    <Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/{}"/>"#,
                SLIDE_IMAGE_REL, picture.media_name
            ));
            slide_rels.push('\n');
        }
        slide_rels.push_str("</Relationships>");
        zip.write_all(slide_rels.as_bytes())?;

        if let Some(picture) = &prepared.picture {
            zip.start_file(
                format!("ppt/media/{}", picture.media_name),
                FileOptions::default(),
            )?;
            zip.write_all(&picture.bytes)?;
        }

        info!("Creating slide XML: ppt/slides/slide{}.xml", slide_num);
        zip.start_file(
            format!("ppt/slides/slide{}.xml", slide_num),
            FileOptions::default(),
        )?;
        let slide_xml = slide_xml(
            &slide.entry.title,
            &slide.entry.content,
            prepared.layout,
            prepared.picture.as_ref().map(|p| p.frame),
        );
        zip.write_all(slide_xml.as_bytes())?;
    }

    info!("Finalizing PPTX file");
    zip.finish()?;
    Ok(())
}

// An image whose payload cannot be decoded is dropped and the slide falls
// back to the text-only layout.
fn prepare_slides(model: &RenderModel) -> Vec<PreparedSlide> {
    model
        .iter()
        .map(|slide| {
            let picture = slide.image.and_then(|image| {
                let frame = slide.image_frame()?;
                match image.decode_payload().and_then(|(mime, bytes)| packageable(&mime, bytes)) {
                    Ok((extension, bytes)) => Some(Picture {
                        media_name: format!("image{}.{}", slide.index + 1, extension),
                        bytes,
                        frame,
                    }),
                    Err(e) => {
                        warn!("Skipping image for slide {}: {}", slide.index + 1, e);
                        None
                    }
                }
            });
            let layout = if picture.is_some() {
                slide.layout
            } else {
                SlideLayout::TextOnly
            };
            PreparedSlide { layout, picture }
        })
        .collect()
}

/// Media bytes and extension for a format the package declares. Anything
/// else is re-encoded as PNG.
fn packageable(mime_type: &str, bytes: Vec<u8>) -> Result<(&'static str, Vec<u8>)> {
    let declared = ImageFormat::from_mime_type(mime_type)
        .map(|format| PACKAGED_FORMATS.contains(&format))
        .unwrap_or(false);
    if declared {
        return Ok((extension_for_mime_type(mime_type), bytes));
    }

    debug!("Re-encoding {} image as PNG", mime_type);
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| DeckError::ImageError(format!("Failed to decode {}: {}", mime_type, e)))?;
    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(decoded.to_rgba8())
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| DeckError::ImageError(format!("Failed to encode PNG: {}", e)))?;
    Ok(("png", png.into_inner()))
}

fn write_master_parts<W: Write + Seek>(zip: &mut ZipWriter<W>) -> Result<()> {
    info!("Creating PPTX structure: slide master, layout and theme");

    zip.start_file("ppt/slideMasters/slideMaster1.xml", FileOptions::default())?;
    zip.write_all(slide_master_xml().as_bytes())?;

    zip.start_file(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        FileOptions::default(),
    )?;
    zip.write_all(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#
            .as_bytes(),
    )?;

    zip.start_file("ppt/slideLayouts/slideLayout1.xml", FileOptions::default())?;
    zip.write_all(SLIDE_LAYOUT_XML.as_bytes())?;

    zip.start_file(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        FileOptions::default(),
    )?;
    zip.write_all(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#
            .as_bytes(),
    )?;

    zip.start_file("ppt/theme/theme1.xml", FileOptions::default())?;
    zip.write_all(THEME_XML.as_bytes())?;
    Ok(())
}

const EMPTY_GROUP_XML: &str = r#"            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr>
                <a:xfrm>
                    <a:off x="0" y="0"/>
                    <a:ext cx="0" cy="0"/>
                    <a:chOff x="0" y="0"/>
                    <a:chExt cx="0" cy="0"/>
                </a:xfrm>
            </p:grpSpPr>
"#;

fn slide_master_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld>
        <p:bg>
            <p:bgRef idx="1001">
                <a:schemeClr val="bg1"/>
            </p:bgRef>
        </p:bg>
        <p:spTree>
{group}        </p:spTree>
    </p:cSld>
    <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
    <p:sldLayoutIdLst>
        <p:sldLayoutId id="{layout_id}" r:id="rId1"/>
    </p:sldLayoutIdLst>
</p:sldMaster>"#,
        group = EMPTY_GROUP_XML,
        layout_id = SLIDE_LAYOUT_ID,
    )
}

const SLIDE_LAYOUT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
    <p:cSld name="Blank">
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr/>
        </p:spTree>
    </p:cSld>
    <p:clrMapOvr>
        <a:masterClrMapping/>
    </p:clrMapOvr>
</p:sldLayout>"#;

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="script-deck">
    <a:themeElements>
        <a:clrScheme name="script-deck">
            <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
            <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
            <a:dk2><a:srgbClr val="1F2A44"/></a:dk2>
            <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
            <a:accent1><a:srgbClr val="00529B"/></a:accent1>
            <a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
            <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
            <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
            <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
            <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
            <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
            <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
        </a:clrScheme>
        <a:fontScheme name="script-deck">
            <a:majorFont>
                <a:latin typeface="Calibri Light"/>
                <a:ea typeface=""/>
                <a:cs typeface=""/>
            </a:majorFont>
            <a:minorFont>
                <a:latin typeface="Calibri"/>
                <a:ea typeface=""/>
                <a:cs typeface=""/>
            </a:minorFont>
        </a:fontScheme>
        <a:fmtScheme name="script-deck">
            <a:fillStyleLst>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
            </a:fillStyleLst>
            <a:lnStyleLst>
                <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
                <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
                <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
            </a:lnStyleLst>
            <a:effectStyleLst>
                <a:effectStyle><a:effectLst/></a:effectStyle>
                <a:effectStyle><a:effectLst/></a:effectStyle>
                <a:effectStyle><a:effectLst/></a:effectStyle>
            </a:effectStyleLst>
            <a:bgFillStyleLst>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
            </a:bgFillStyleLst>
        </a:fmtScheme>
    </a:themeElements>
    <a:objectDefaults/>
    <a:extraClrSchemeLst/>
</a:theme>"#;

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

fn slide_xml(title: &str, content: &[String], layout: SlideLayout, picture: Option<Frame>) -> String {
    let title_shape = text_shape(
        2,
        "Title",
        TITLE_FRAME,
        &[title.to_string()],
        TITLE_FONT_SIZE,
        true,
        Some(TITLE_COLOR),
    );
    let body_shape = text_shape(
        3,
        "Content",
        layout.body_frame(),
        content,
        layout.body_font_size(),
        false,
        None,
    );
    let picture_shape = picture.map(picture_shape).unwrap_or_default();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld>
        <p:spTree>
{group}{title_shape}{body_shape}{picture_shape}        </p:spTree>
    </p:cSld>
    <p:clrMapOvr>
        <a:masterClrMapping/>
    </p:clrMapOvr>
</p:sld>"#,
        group = EMPTY_GROUP_XML,
    )
}

fn text_shape(
    id: u32,
    name: &str,
    frame: Frame,
    paragraphs: &[String],
    size_pt: u32,
    bold: bool,
    color: Option<&str>,
) -> String {
    let fill = color
        .map(|c| format!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, c))
        .unwrap_or_default();
    let bold_attr = if bold { r#" b="1""# } else { "" };

    let body = if paragraphs.is_empty() {
        r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#.to_string()
    } else {
        paragraphs
            .iter()
            .map(|text| {
                format!(
                    r#"<a:p><a:pPr><a:spcAft><a:spcPts val="1200"/></a:spcAft></a:pPr><a:r><a:rPr lang="en-US" sz="{sz}"{bold_attr} dirty="0">{fill}</a:rPr><a:t>{text}</a:t></a:r></a:p>"#,
                    sz = size_pt * 100,
                    text = escape(text.as_str()),
                )
            })
            .collect::<Vec<String>>()
            .join("")
    };

    format!(
        r#"            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="{id}" name="{name}"/>
                    <p:cNvSpPr txBox="1"/>
                    <p:nvPr/>
                </p:nvSpPr>
                <p:spPr>
                    <a:xfrm>
                        <a:off x="{x}" y="{y}"/>
                        <a:ext cx="{cx}" cy="{cy}"/>
                    </a:xfrm>
                    <a:prstGeom prst="rect">
                        <a:avLst/>
                    </a:prstGeom>
                    <a:noFill/>
                </p:spPr>
                <p:txBody>
                    <a:bodyPr wrap="square" rtlCol="0" anchor="t"/>
                    <a:lstStyle/>
                    {body}
                </p:txBody>
            </p:sp>
"#,
        x = emu(frame.x),
        y = emu(frame.y),
        cx = emu(frame.w),
        cy = emu(frame.h),
    )
}

fn picture_shape(frame: Frame) -> String {
    format!(
        r#"            <p:pic>
                <p:nvPicPr>
                    <p:cNvPr id="4" name="Image"/>
                    <p:cNvPicPr>
                        <a:picLocks noChangeAspect="1"/>
                    </p:cNvPicPr>
                    <p:nvPr/>
                </p:nvPicPr>
                <p:blipFill>
                    <a:blip r:embed="{rel}"/>
                    <a:stretch>
                        <a:fillRect/>
                    </a:stretch>
                </p:blipFill>
                <p:spPr>
                    <a:xfrm>
                        <a:off x="{x}" y="{y}"/>
                        <a:ext cx="{cx}" cy="{cy}"/>
                    </a:xfrm>
                    <a:prstGeom prst="rect">
                        <a:avLst/>
                    </a:prstGeom>
                </p:spPr>
            </p:pic>
"#,
        rel = SLIDE_IMAGE_REL,
        x = emu(frame.x),
        y = emu(frame.y),
        cx = emu(frame.w),
        cy = emu(frame.h),
    )
}
