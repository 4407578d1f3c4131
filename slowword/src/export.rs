//! PDF export.
//!
//! Export happens in two steps: [`PagePlan::layout`] decides where every
//! line and the image go (in PDF points, origin bottom-left), then
//! [`render`] turns the plan into PDF bytes with printpdf. There is one
//! page and no wrapping; lines that run past the page edge are simply
//! drawn off it.

use crate::document::{Document, FontName, FontSize};
use printpdf::{Image, ImageTransform, Mm, PdfDocument, Pt};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name written by the "save as pdf" action, relative to the
/// working directory.
pub const DEFAULT_OUTPUT: &str = "document.pdf";

/// A4 portrait.
const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);

const LEFT_MARGIN: f32 = 50.0;
const FIRST_BASELINE: f32 = 800.0;
const LINE_STEP: f32 = 20.0;
const IMAGE_WIDTH: f32 = 300.0;
const IMAGE_HEIGHT: f32 = 200.0;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),
    #[error("image not found: {}", .0.display())]
    ImageMissing(PathBuf),
    #[error("cannot read image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image has inconsistent dimensions: {}", .0.display())]
    ImageBuffer(PathBuf),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// One line of text at its baseline position.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Where the image goes: lower-left corner and size, in points.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePlacement {
    pub path: PathBuf,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything drawn on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct PagePlan {
    pub font: FontName,
    pub size: FontSize,
    pub runs: Vec<TextRun>,
    pub image: Option<ImagePlacement>,
}

impl PagePlan {
    pub fn layout(doc: &Document) -> Self {
        let mut y = FIRST_BASELINE;
        let mut runs = Vec::new();
        for line in doc.lines() {
            runs.push(TextRun {
                text: line.to_string(),
                x: LEFT_MARGIN,
                y,
            });
            y -= LINE_STEP;
        }

        // y is now where the next line would have gone
        let image = doc.image().map(|path| ImagePlacement {
            path: path.to_path_buf(),
            x: LEFT_MARGIN,
            y: y - IMAGE_HEIGHT,
            width: IMAGE_WIDTH,
            height: IMAGE_HEIGHT,
        });

        Self {
            font: doc.font,
            size: doc.size,
            runs,
            image,
        }
    }
}

/// Draw the plan into a single-page PDF.
pub fn render(plan: &PagePlan) -> Result<Vec<u8>> {
    let (pdf, page, layer) = PdfDocument::new("slowWord document", PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = pdf.add_builtin_font(plan.font.builtin())?;
    let layer = pdf.get_page(page).get_layer(layer);

    for run in &plan.runs {
        layer.use_text(
            run.text.as_str(),
            plan.size.as_f32(),
            Mm::from(Pt(run.x)),
            Mm::from(Pt(run.y)),
            &font,
        );
    }

    if let Some(placement) = &plan.image {
        let (image, width_px, height_px) = load_image(&placement.path)?;
        // at 72 dpi one pixel is one point, so the scale is target / pixels
        image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm::from(Pt(placement.x))),
                translate_y: Some(Mm::from(Pt(placement.y))),
                scale_x: Some(placement.width / width_px as f32),
                scale_y: Some(placement.height / height_px as f32),
                dpi: Some(72.0),
                ..Default::default()
            },
        );
    }

    Ok(pdf.save_to_bytes()?)
}

/// Decode `path` and convert it to printpdf's image type.
fn load_image(path: &Path) -> Result<(Image, u32, u32)> {
    if !path.is_file() {
        return Err(ExportError::ImageMissing(path.to_path_buf()));
    }
    let decoded = image::open(path).map_err(|source| ExportError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    // alpha is dropped; transparent pixels keep their stored colour
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let buffer = printpdf::image_crate::RgbImage::from_raw(width, height, rgb.into_raw())
        .ok_or_else(|| ExportError::ImageBuffer(path.to_path_buf()))?;
    let image = Image::from_dynamic_image(&printpdf::image_crate::DynamicImage::ImageRgb8(buffer));
    Ok((image, width.max(1), height.max(1)))
}

/// `document.pdf` in the current working directory.
pub fn default_output_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(DEFAULT_OUTPUT))
}

/// Export to an explicit path and return it made absolute. Nothing is
/// written if rendering fails.
pub fn export_to(doc: &Document, path: &Path) -> Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let plan = PagePlan::layout(doc);
    let bytes = render(&plan)?;
    let mut file = std::io::BufWriter::new(std::fs::File::create(&path)?);
    file.write_all(&bytes)?;
    file.flush()?;
    log::info!(
        "exported {} lines{} to {}",
        plan.runs.len(),
        if plan.image.is_some() { " and an image" } else { "" },
        path.display()
    );
    Ok(path)
}
