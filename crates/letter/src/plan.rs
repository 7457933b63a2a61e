use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    error::LetterError,
    record::{ImageRef, LetterRecord},
    salutation::salutation,
};

/// Width of the embedded logo and stamp images, in inches.
pub const IMAGE_WIDTH_IN: f32 = 1.5;

const HEADER_COLUMN_WIDTH_IN: f32 = 3.5;
const COMPANY_NAME_SIZE_PT: u32 = 14;
const SALUTATION_SPACE_AFTER_PT: u32 = 12;
const BODY_FIRST_LINE_INDENT_IN: f32 = 0.5;
const BODY_LINE_SPACING: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphSpec {
    pub text: String,
    pub align: Alignment,
    pub bold: bool,
    /// Run size in points; `None` inherits the document default.
    pub size_pt: Option<u32>,
    pub first_line_indent_in: Option<f32>,
    /// Line spacing multiplier; `None` inherits the document default.
    pub line_spacing: Option<f32>,
    /// Spacing after the paragraph in points; `None` inherits the default.
    pub space_after_pt: Option<u32>,
}

impl ParagraphSpec {
    pub fn new(text: impl Into<String>, align: Alignment) -> Self {
        Self {
            text: text.into(),
            align,
            bold: false,
            size_pt: None,
            first_line_indent_in: None,
            line_spacing: None,
            space_after_pt: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size_pt(mut self, size_pt: u32) -> Self {
        self.size_pt = Some(size_pt);
        self
    }

    pub fn space_after_pt(mut self, space_after_pt: u32) -> Self {
        self.space_after_pt = Some(space_after_pt);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub path: PathBuf,
    pub width_in: f32,
    pub align: Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCellSpec {
    /// One paragraph per line inside the cell.
    pub lines: Vec<String>,
    pub align: Alignment,
}

/// Fixed-layout table; autofit is disabled, columns keep the given widths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub rows: Vec<Vec<TableCellSpec>>,
    pub column_widths_in: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocBlock {
    Paragraph(ParagraphSpec),
    Image(ImageSpec),
    Table(TableSpec),
    PageBreak,
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub left_in: f32,
    pub right_in: f32,
    pub top_in: f32,
    pub bottom_in: f32,
}

/// Document-wide defaults, applied once rather than per block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStyle {
    pub font_name: String,
    pub size_pt: u32,
    pub line_spacing: f32,
    pub space_after_pt: u32,
    pub margins: PageMargins,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            font_name: "Times New Roman".to_string(),
            size_pt: 12,
            line_spacing: 1.5,
            space_after_pt: 0,
            margins: PageMargins {
                left_in: 0.7874,
                right_in: 0.3937,
                top_in: 0.7874,
                bottom_in: 0.7874,
            },
        }
    }
}

/// Writer-agnostic description of the exported document: an ordered block
/// list plus the document-wide style. Purely descriptive; serialization to
/// the binary container is the document writer's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPlan {
    pub style: DocumentStyle,
    pub blocks: Vec<DocBlock>,
}

/// Composes the export plan from the current record.
///
/// Pure and idempotent; never touches the filesystem. Optional blocks (logo,
/// stamp, attachments) are omitted entirely when unset rather than emitted
/// as empty placeholders.
pub fn compose(record: &LetterRecord) -> Result<DocumentPlan, LetterError> {
    let mut blocks = Vec::new();

    if let Some(logo) = &record.logo {
        blocks.push(DocBlock::Image(image_block(logo, Alignment::Center)?));
    }

    blocks.push(DocBlock::Paragraph(
        ParagraphSpec::new(record.sender_company.clone(), Alignment::Center)
            .bold()
            .size_pt(COMPANY_NAME_SIZE_PT),
    ));

    blocks.push(DocBlock::Table(header_table(record)));

    blocks.push(DocBlock::Paragraph(ParagraphSpec::new(
        format!(
            "Исх. № {} от {}",
            record.outgoing_number, record.outgoing_date
        ),
        Alignment::Left,
    )));

    blocks.push(DocBlock::Paragraph(
        ParagraphSpec::new(salutation(&record.recipient_name), Alignment::Left)
            .space_after_pt(SALUTATION_SPACE_AFTER_PT),
    ));

    // Each source line becomes exactly one paragraph; empty lines stay as
    // empty (but present) paragraphs.
    for line in record.body_text.trim().split('\n') {
        blocks.push(DocBlock::Paragraph(ParagraphSpec {
            text: format!("  {}", line.trim()),
            align: Alignment::Justified,
            bold: false,
            size_pt: None,
            first_line_indent_in: Some(BODY_FIRST_LINE_INDENT_IN),
            line_spacing: Some(BODY_LINE_SPACING),
            space_after_pt: None,
        }));
    }

    for line in [
        "С уважением,".to_string(),
        record.sender_position.clone(),
        record.sender_company.clone(),
        record.sender_name.clone(),
    ] {
        blocks.push(DocBlock::Paragraph(ParagraphSpec::new(
            line,
            Alignment::Left,
        )));
    }

    if let Some(stamp) = &record.stamp {
        blocks.push(DocBlock::Image(image_block(stamp, Alignment::Right)?));
    }

    if !record.attachments.is_empty() {
        blocks.push(DocBlock::PageBreak);
        blocks.push(DocBlock::Paragraph(ParagraphSpec::new(
            "Вложения:",
            Alignment::Left,
        )));
        for attachment in &record.attachments {
            blocks.push(DocBlock::Paragraph(ParagraphSpec::new(
                attachment.clone(),
                Alignment::Left,
            )));
        }
    }

    Ok(DocumentPlan {
        style: DocumentStyle::default(),
        blocks,
    })
}

fn image_block(image: &ImageRef, align: Alignment) -> Result<ImageSpec, LetterError> {
    if image.path.as_os_str().is_empty() {
        return Err(LetterError::EmptyImagePath);
    }
    Ok(ImageSpec {
        path: image.path.clone(),
        width_in: IMAGE_WIDTH_IN,
        align,
    })
}

fn header_table(record: &LetterRecord) -> TableSpec {
    let sender_cell = TableCellSpec {
        lines: vec![
            format!("ИНН {} КПП {}", record.inn, record.kpp),
            format!("ОГРН {}", record.ogrn),
            record.legal_address.clone(),
            record.post_address.clone(),
            format!("Тел./факс: {}", record.phone),
        ],
        align: Alignment::Left,
    };
    let recipient_cell = TableCellSpec {
        lines: vec![
            record.recipient_position.clone(),
            record.recipient_company.clone(),
            record.recipient_name.clone(),
        ],
        align: Alignment::Right,
    };
    TableSpec {
        rows: vec![vec![sender_cell, recipient_cell]],
        column_widths_in: vec![HEADER_COLUMN_WIDTH_IN, HEADER_COLUMN_WIDTH_IN],
    }
}
