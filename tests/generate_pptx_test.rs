use image::{ImageBuffer, ImageFormat, Rgb};
use script_deck::{
    generate_pptx, ImageChoice, NormalizedImage, PptxConfig, RenderModel, SlidePlanEntry,
};
use std::fs;
use std::io::{Cursor, Read};
use tempfile::TempDir;
use zip::ZipArchive;

fn png_image(width: u32, height: u32) -> NormalizedImage {
    let img = ImageBuffer::from_fn(width, height, |_, _| Rgb([255u8, 0u8, 0u8]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("Failed to encode image");
    NormalizedImage::from_bytes("image/png", &buf.into_inner()).expect("Failed to normalize")
}

fn entry(title: &str, content: &[&str]) -> SlidePlanEntry {
    SlidePlanEntry {
        title: title.to_string(),
        content: content.iter().map(|s| s.to_string()).collect(),
        image: ImageChoice::Generate {
            prompt: format!("image for {}", title),
        },
    }
}

fn read_entry(archive: &mut ZipArchive<fs::File>, name: &str) -> String {
    let mut file = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("Missing {} in archive", name));
    let mut content = String::new();
    file.read_to_string(&mut content)
        .expect("Failed to read archive entry");
    content
}

#[test]
fn test_generate_pptx_layouts_and_media() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("nested").join("AI_Presentation.pptx");

    let model = RenderModel::new(
        vec![
            entry("Intro & Goals", &["First point", "Second <point>"]),
            entry("Body", &["Details"]),
            entry("Conclusion", &["Wrap up"]),
        ],
        vec![Some(png_image(100, 100)), Some(png_image(100, 100)), None],
    )
    .expect("Failed to build model");

    generate_pptx(
        &model,
        &output_path,
        &PptxConfig {
            title: "Test Presentation".to_string(),
        },
    )
    .expect("Failed to generate PPTX");

    assert!(output_path.exists(), "PPTX file was not created");

    let file = fs::File::open(&output_path).expect("Failed to open PPTX file");
    let mut archive = ZipArchive::new(file).expect("Failed to read PPTX as ZIP");
    let names: Vec<String> = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .collect();

    let slide_files: Vec<&String> = names
        .iter()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .collect();
    assert_eq!(slide_files.len(), 3, "Expected exactly three slide XML files");

    let media: Vec<&String> = names
        .iter()
        .filter(|name| name.starts_with("ppt/media/"))
        .collect();
    assert_eq!(media.len(), 2, "Only slides with images carry media");
    assert!(names.contains(&"ppt/media/image1.png".to_string()));
    assert!(names.contains(&"ppt/media/image2.png".to_string()));

    // Even slide: image on the right, letterboxed square in a 4.3in x 3.5in slot at x=5.2in.
    let slide1 = read_entry(&mut archive, "ppt/slides/slide1.xml");
    assert!(slide1.contains("Intro &amp; Goals"));
    assert!(slide1.contains("Second &lt;point&gt;"));
    assert!(slide1.contains(r#"<a:srgbClr val="00529B"/>"#));
    assert!(slide1.contains(r#"<a:off x="5120640" y="1097280"/>"#));
    assert!(slide1.contains(r#"<a:ext cx="3200400" cy="3200400"/>"#));
    assert!(slide1.contains(r#"sz="1400""#));

    // Odd slide: image on the left, text box moved to x=5.0in.
    let slide2 = read_entry(&mut archive, "ppt/slides/slide2.xml");
    assert!(slide2.contains(r#"<a:off x="822960" y="1097280"/>"#));
    assert!(slide2.contains(r#"<a:off x="4572000" y="1097280"/>"#));

    // No image: single full-width body.
    let slide3 = read_entry(&mut archive, "ppt/slides/slide3.xml");
    assert!(!slide3.contains("<p:pic>"));
    assert!(slide3.contains(r#"<a:ext cx="8229600" cy="3657600"/>"#));
    assert!(slide3.contains(r#"sz="1600""#));

    let rels1 = read_entry(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
    assert!(rels1.contains(r#"Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml""#));
    assert!(rels1.contains(r#"Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png""#));
    assert!(slide1.contains(r#"<a:blip r:embed="rId2"/>"#));

    let rels3 = read_entry(&mut archive, "ppt/slides/_rels/slide3.xml.rels");
    assert!(rels3.contains("../slideLayouts/slideLayout1.xml"));
    assert!(!rels3.contains("../media/"));

    let core = read_entry(&mut archive, "docProps/core.xml");
    assert!(core.contains("<dc:title>Test Presentation</dc:title>"));

    let presentation = read_entry(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="5143500" type="screen16x9"/>"#));
}

#[test]
fn test_generate_pptx_includes_master_layout_and_theme() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("deck.pptx");
    let model = RenderModel::new(
        vec![entry("One", &["a"]), entry("Two", &["b"])],
        vec![None, None],
    )
    .expect("Failed to build model");

    generate_pptx(&model, &output_path, &PptxConfig::default()).expect("Failed to generate PPTX");

    let file = fs::File::open(&output_path).expect("Failed to open PPTX file");
    let mut archive = ZipArchive::new(file).expect("Failed to read PPTX as ZIP");

    let content_types = read_entry(&mut archive, "[Content_Types].xml");
    assert!(content_types.contains(r#"PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml""#));
    assert!(content_types.contains(r#"PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml""#));
    assert!(content_types.contains(r#"PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml""#));

    // Slides take rId1..rId2, so the master and theme follow them.
    let pres_rels = read_entry(&mut archive, "ppt/_rels/presentation.xml.rels");
    assert!(pres_rels.contains(r#"Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml""#));
    assert!(pres_rels.contains(r#"Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml""#));

    let presentation = read_entry(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains(r#"<p:sldMasterId id="2147483648" r:id="rId3"/>"#));
    let master_list = presentation.find("<p:sldMasterIdLst>").expect("master list");
    let slide_list = presentation.find("<p:sldIdLst>").expect("slide list");
    assert!(master_list < slide_list, "Master list must precede the slide list");

    let master = read_entry(&mut archive, "ppt/slideMasters/slideMaster1.xml");
    assert!(master.contains("<p:clrMap "));
    assert!(master.contains(r#"<p:sldLayoutId id="2147483649" r:id="rId1"/>"#));

    let master_rels = read_entry(&mut archive, "ppt/slideMasters/_rels/slideMaster1.xml.rels");
    assert!(master_rels.contains("../slideLayouts/slideLayout1.xml"));
    assert!(master_rels.contains("../theme/theme1.xml"));

    let layout = read_entry(&mut archive, "ppt/slideLayouts/slideLayout1.xml");
    assert!(layout.contains("<p:sldLayout "));
    let layout_rels = read_entry(&mut archive, "ppt/slideLayouts/_rels/slideLayout1.xml.rels");
    assert!(layout_rels.contains("../slideMasters/slideMaster1.xml"));

    let theme = read_entry(&mut archive, "ppt/theme/theme1.xml");
    assert!(theme.contains("<a:clrScheme "));
    assert!(theme.contains("<a:fontScheme "));
    assert!(theme.contains("<a:fmtScheme "));

    for n in 1..=2 {
        let rels = read_entry(&mut archive, &format!("ppt/slides/_rels/slide{}.xml.rels", n));
        assert!(rels.contains("../slideLayouts/slideLayout1.xml"));
    }
}

#[test]
fn test_generate_pptx_converts_undeclared_formats_to_png() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("deck.pptx");

    let img = ImageBuffer::from_fn(40, 30, |_, _| Rgb([10u8, 20u8, 30u8]));
    let mut tiff = Cursor::new(Vec::new());
    img.write_to(&mut tiff, ImageFormat::Tiff)
        .expect("Failed to encode TIFF");
    let image = NormalizedImage::from_bytes("image/tiff", &tiff.into_inner())
        .expect("Failed to normalize TIFF");

    let model = RenderModel::new(vec![entry("Scan", &["From a scanner"])], vec![Some(image)])
        .expect("Failed to build model");
    generate_pptx(&model, &output_path, &PptxConfig::default()).expect("Failed to generate PPTX");

    let file = fs::File::open(&output_path).expect("Failed to open PPTX file");
    let mut archive = ZipArchive::new(file).expect("Failed to read PPTX as ZIP");
    let names: Vec<String> = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .collect();
    assert!(names.contains(&"ppt/media/image1.png".to_string()));
    assert!(!names.iter().any(|name| name.ends_with(".tiff") || name.ends_with(".tif")));

    let mut media = Vec::new();
    archive
        .by_name("ppt/media/image1.png")
        .expect("Missing media")
        .read_to_end(&mut media)
        .expect("Failed to read media");
    assert_eq!(
        image::guess_format(&media).expect("Unrecognised media"),
        ImageFormat::Png
    );
    assert_eq!(
        image::load_from_memory(&media).expect("Media does not decode").width(),
        40
    );

    let rels = read_entry(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
    assert!(rels.contains("../media/image1.png"));
    let slide = read_entry(&mut archive, "ppt/slides/slide1.xml");
    assert!(slide.contains("<p:pic>"));
}

#[test]
fn test_generate_pptx_rejects_empty_model() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model = RenderModel::new(vec![], vec![]).expect("Failed to build model");
    let result = generate_pptx(
        &model,
        &temp_dir.path().join("empty.pptx"),
        &PptxConfig::default(),
    );
    assert!(result.is_err());
}
