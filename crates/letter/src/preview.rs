use crate::{error::LetterError, record::LetterRecord, salutation::salutation};

/// Renders the plain-text preview of the letter.
///
/// Sixteen blocks in fixed order, joined with single newlines; blocks that
/// end a visual group embed their trailing blank lines. Field text passes
/// through verbatim, including embedded newlines. The `Result` keeps
/// formation failures distinct from a successful render so the presentation
/// layer can show them inline instead of crashing the preview.
pub fn render_preview(record: &LetterRecord) -> Result<String, LetterError> {
    let blocks = [
        record.sender_company.clone(),
        format!("ИНН {} КПП {}", record.inn, record.kpp),
        format!("ОГРН {}", record.ogrn),
        record.legal_address.clone(),
        record.post_address.clone(),
        format!("Тел./факс: {}\n", record.phone),
        record.recipient_position.clone(),
        record.recipient_company.clone(),
        format!("{}\n", record.recipient_name),
        format!(
            "Исх. № {} от {}\n",
            record.outgoing_number, record.outgoing_date
        ),
        format!("{}\n\n", salutation(&record.recipient_name)),
        format!("{}\n\n", record.body_text.trim()),
        "С уважением,".to_string(),
        record.sender_position.clone(),
        record.sender_company.clone(),
        record.sender_name.clone(),
    ];
    Ok(blocks.join("\n"))
}
