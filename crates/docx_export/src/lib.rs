//! Serializes a [`letter::DocumentPlan`] into a `.docx` file.
//!
//! The binary container format belongs to the `docx-rs` writer; this crate
//! only maps plan blocks onto its builders and owns the unit conversions
//! (inches to EMU/twips, points to half-points/twips). All filesystem access
//! of the export path lives here.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use docx_rs::{
    AlignmentType, BreakType, Docx, LineSpacing, LineSpacingType, PageMargin, Paragraph, Pic, Run,
    RunFonts, SpecialIndentType, Table, TableCell, TableLayoutType, TableRow, WidthType,
};
use image::GenericImageView;
use letter::{Alignment, DocBlock, DocumentPlan, DocumentStyle, ImageSpec, ParagraphSpec, TableSpec};
use tracing::info;

const EMU_PER_INCH: f32 = 914_400.0;
const TWIPS_PER_INCH: f32 = 1440.0;
const TWIPS_PER_PT: u32 = 20;
/// Single line spacing in twentieths of a point.
const SINGLE_LINE_TWIPS: f32 = 240.0;

fn inches_to_emu(inches: f32) -> u32 {
    (inches * EMU_PER_INCH).round() as u32
}

fn inches_to_twips(inches: f32) -> i32 {
    (inches * TWIPS_PER_INCH).round() as i32
}

fn pt_to_half_points(pt: u32) -> usize {
    (pt * 2) as usize
}

fn pt_to_twips(pt: u32) -> u32 {
    pt * TWIPS_PER_PT
}

fn spacing_multiplier_to_twips(multiplier: f32) -> u32 {
    (multiplier * SINGLE_LINE_TWIPS).round() as u32
}

fn alignment(align: Alignment) -> AlignmentType {
    match align {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
        Alignment::Justified => AlignmentType::Both,
    }
}

/// Writes the plan to `path`. The file is created (or truncated) only here;
/// composition upstream is side-effect-free, so a failed export leaves no
/// state of ours behind beyond what the writer guarantees for the file.
pub fn write_docx(plan: &DocumentPlan, path: &Path) -> Result<()> {
    let docx = build_docx(plan)?;
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    docx.build()
        .pack(file)
        .with_context(|| format!("failed to write document to {}", path.display()))?;
    info!(
        path = %path.display(),
        blocks = plan.blocks.len(),
        "document exported"
    );
    Ok(())
}

fn build_docx(plan: &DocumentPlan) -> Result<Docx> {
    let mut docx = apply_style(Docx::new(), &plan.style);
    for block in &plan.blocks {
        docx = match block {
            DocBlock::Paragraph(spec) => docx.add_paragraph(paragraph(spec, &plan.style)),
            DocBlock::Image(spec) => docx.add_paragraph(image_paragraph(spec)?),
            DocBlock::Table(spec) => docx.add_table(table(spec, &plan.style)),
            DocBlock::PageBreak => {
                docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
            }
        };
    }
    Ok(docx)
}

fn apply_style(docx: Docx, style: &DocumentStyle) -> Docx {
    docx.default_fonts(RunFonts::new().ascii(&style.font_name))
        .default_size(pt_to_half_points(style.size_pt))
        .page_margin(
            PageMargin::new()
                .left(inches_to_twips(style.margins.left_in))
                .right(inches_to_twips(style.margins.right_in))
                .top(inches_to_twips(style.margins.top_in))
                .bottom(inches_to_twips(style.margins.bottom_in)),
        )
}

fn paragraph(spec: &ParagraphSpec, style: &DocumentStyle) -> Paragraph {
    let mut run = Run::new().add_text(&spec.text);
    if spec.bold {
        run = run.bold();
    }
    if let Some(size_pt) = spec.size_pt {
        run = run.size(pt_to_half_points(size_pt));
    }

    let line_spacing = spec.line_spacing.unwrap_or(style.line_spacing);
    let space_after_pt = spec.space_after_pt.unwrap_or(style.space_after_pt);
    let mut paragraph = Paragraph::new()
        .add_run(run)
        .align(alignment(spec.align))
        .line_spacing(
            LineSpacing::new()
                .line_rule(LineSpacingType::Auto)
                .line(spacing_multiplier_to_twips(line_spacing) as i32)
                .after(pt_to_twips(space_after_pt)),
        );
    if let Some(indent_in) = spec.first_line_indent_in {
        paragraph = paragraph.indent(
            None,
            Some(SpecialIndentType::FirstLine(inches_to_twips(indent_in))),
            None,
            None,
        );
    }
    paragraph
}

fn image_paragraph(spec: &ImageSpec) -> Result<Paragraph> {
    let bytes = fs::read(&spec.path)
        .with_context(|| format!("failed to read image {}", spec.path.display()))?;
    let (width_emu, height_emu) = scaled_image_emu(&bytes, spec.width_in)
        .with_context(|| format!("failed to decode image {}", spec.path.display()))?;
    let pic = Pic::new(&bytes).size(width_emu, height_emu);
    Ok(Paragraph::new()
        .add_run(Run::new().add_image(pic))
        .align(alignment(spec.align)))
}

/// Sizes an image to the requested width, keeping its intrinsic aspect
/// ratio, and returns (width, height) in EMU.
fn scaled_image_emu(bytes: &[u8], width_in: f32) -> Result<(u32, u32)> {
    let decoded = image::load_from_memory(bytes).context("unsupported or corrupt image data")?;
    let (px_w, px_h) = decoded.dimensions();
    let width_emu = inches_to_emu(width_in);
    let height_emu = (width_emu as f32 * px_h as f32 / px_w as f32).round() as u32;
    Ok((width_emu, height_emu))
}

fn table(spec: &TableSpec, style: &DocumentStyle) -> Table {
    let grid: Vec<usize> = spec
        .column_widths_in
        .iter()
        .map(|width_in| inches_to_twips(*width_in) as usize)
        .collect();

    let rows = spec
        .rows
        .iter()
        .map(|row| {
            let cells = row
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    let mut table_cell = TableCell::new();
                    if let Some(width) = grid.get(column) {
                        table_cell = table_cell.width(*width, WidthType::Dxa);
                    }
                    for line in &cell.lines {
                        table_cell = table_cell.add_paragraph(paragraph(
                            &ParagraphSpec::new(line.clone(), cell.align),
                            style,
                        ));
                    }
                    table_cell
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();

    Table::new(rows)
        .set_grid(grid)
        .layout(TableLayoutType::Fixed)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
