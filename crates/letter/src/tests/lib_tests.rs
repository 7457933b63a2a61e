use super::*;

fn populated_record() -> LetterRecord {
    LetterRecord {
        sender_company: "ООО Ромашка".to_string(),
        inn: "123".to_string(),
        kpp: "456".to_string(),
        ogrn: "789".to_string(),
        legal_address: "г. Москва, ул. Ленина, д. 1".to_string(),
        post_address: "г. Москва, а/я 5".to_string(),
        phone: "+7 495 000-00-00".to_string(),
        outgoing_number: "42".to_string(),
        outgoing_date: "01.09.2026".to_string(),
        sender_position: "Генеральный директор".to_string(),
        sender_name: "Сидоров С.С.".to_string(),
        recipient_company: "АО «Вектор»".to_string(),
        recipient_position: "Директору".to_string(),
        recipient_name: "Иван Петров".to_string(),
        body_text: "Текст.".to_string(),
        attachments: Vec::new(),
        logo: None,
        stamp: None,
    }
}

fn paragraph_texts(plan: &DocumentPlan) -> Vec<&str> {
    plan.blocks
        .iter()
        .filter_map(|block| match block {
            DocBlock::Paragraph(p) => Some(p.text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn salutation_uses_exactly_the_first_two_tokens() {
    assert_eq!(salutation("Иван Петров"), "Уважаемый Иван Петров!");
    assert_eq!(
        salutation("Иван Петрович Сидоров"),
        "Уважаемый Иван Петрович!"
    );
    assert_eq!(salutation("  Иван   Петров  "), "Уважаемый Иван Петров!");
}

#[test]
fn salutation_falls_back_below_two_tokens() {
    assert_eq!(salutation(""), "Уважаемый получатель!");
    assert_eq!(salutation("Иван"), "Уважаемый получатель!");
    assert_eq!(salutation("   "), "Уважаемый получатель!");
    assert_eq!(salutation("\t\n"), "Уважаемый получатель!");
}

#[test]
fn preview_reproduces_block_order_and_blank_lines() {
    let preview = render_preview(&populated_record()).expect("render");
    let lines: Vec<&str> = preview.split('\n').collect();
    assert_eq!(
        lines,
        vec![
            "ООО Ромашка",
            "ИНН 123 КПП 456",
            "ОГРН 789",
            "г. Москва, ул. Ленина, д. 1",
            "г. Москва, а/я 5",
            "Тел./факс: +7 495 000-00-00",
            "",
            "Директору",
            "АО «Вектор»",
            "Иван Петров",
            "",
            "Исх. № 42 от 01.09.2026",
            "",
            "Уважаемый Иван Петров!",
            "",
            "",
            "Текст.",
            "",
            "",
            "С уважением,",
            "Генеральный директор",
            "ООО Ромашка",
            "Сидоров С.С.",
        ]
    );
}

#[test]
fn preview_trims_body_only_at_render_time() {
    let mut record = populated_record();
    record.body_text = "\n\n  Текст письма.  \n\n".to_string();
    // The record keeps the loaded text verbatim.
    assert!(record.body_text.starts_with('\n'));
    let preview = render_preview(&record).expect("render");
    assert!(preview.contains("\nТекст письма.\n"));
    assert!(!preview.contains("  Текст письма.  "));
}

#[test]
fn preview_passes_embedded_newlines_through_verbatim() {
    let mut record = populated_record();
    record.legal_address = "строка 1\nстрока 2".to_string();
    let preview = render_preview(&record).expect("render");
    assert!(preview.contains("строка 1\nстрока 2"));
}

#[test]
fn preview_of_empty_record_is_well_formed() {
    let preview = render_preview(&LetterRecord::default()).expect("render");
    assert!(preview.contains("ИНН  КПП "));
    assert!(preview.contains("Уважаемый получатель!"));
    assert!(preview.ends_with("С уважением,\n\n\n"));
}

#[test]
fn compose_without_optionals_has_no_image_or_page_break_blocks() {
    let plan = compose(&populated_record()).expect("compose");
    assert!(!plan
        .blocks
        .iter()
        .any(|b| matches!(b, DocBlock::Image(_) | DocBlock::PageBreak)));
    // Company headline is the opening block when no logo is set.
    match &plan.blocks[0] {
        DocBlock::Paragraph(p) => {
            assert_eq!(p.text, "ООО Ромашка");
            assert_eq!(p.align, Alignment::Center);
            assert!(p.bold);
            assert_eq!(p.size_pt, Some(14));
        }
        other => panic!("expected company paragraph, got {other:?}"),
    }
}

#[test]
fn compose_places_logo_first_and_stamp_after_sign_off() {
    let mut record = populated_record();
    record.logo = Some(ImageRef::new("/tmp/logo.png"));
    record.stamp = Some(ImageRef::new("/tmp/stamp.png"));
    let plan = compose(&record).expect("compose");

    match &plan.blocks[0] {
        DocBlock::Image(image) => {
            assert_eq!(image.align, Alignment::Center);
            assert_eq!(image.width_in, 1.5);
        }
        other => panic!("expected logo image, got {other:?}"),
    }
    match plan.blocks.last().expect("blocks") {
        DocBlock::Image(image) => {
            assert_eq!(image.align, Alignment::Right);
            assert_eq!(image.width_in, 1.5);
        }
        other => panic!("expected stamp image, got {other:?}"),
    }
}

#[test]
fn compose_rejects_empty_image_path() {
    let mut record = populated_record();
    record.logo = Some(ImageRef::new(""));
    assert_eq!(compose(&record), Err(LetterError::EmptyImagePath));
}

#[test]
fn compose_header_table_splits_sender_and_recipient() {
    let plan = compose(&populated_record()).expect("compose");
    let table = plan
        .blocks
        .iter()
        .find_map(|block| match block {
            DocBlock::Table(t) => Some(t),
            _ => None,
        })
        .expect("header table");

    assert_eq!(table.column_widths_in, vec![3.5, 3.5]);
    assert_eq!(table.rows.len(), 1);
    let [sender, recipient] = &table.rows[0][..] else {
        panic!("expected two cells");
    };
    assert_eq!(sender.align, Alignment::Left);
    assert_eq!(
        sender.lines,
        vec![
            "ИНН 123 КПП 456",
            "ОГРН 789",
            "г. Москва, ул. Ленина, д. 1",
            "г. Москва, а/я 5",
            "Тел./факс: +7 495 000-00-00",
        ]
    );
    assert_eq!(recipient.align, Alignment::Right);
    assert_eq!(
        recipient.lines,
        vec!["Директору", "АО «Вектор»", "Иван Петров"]
    );
}

#[test]
fn compose_body_yields_one_justified_paragraph_per_line() {
    let mut record = populated_record();
    record.body_text = "Line1\nLine2".to_string();
    let plan = compose(&record).expect("compose");

    let body: Vec<&ParagraphSpec> = plan
        .blocks
        .iter()
        .filter_map(|block| match block {
            DocBlock::Paragraph(p) if p.align == Alignment::Justified => Some(p),
            _ => None,
        })
        .collect();
    assert_eq!(body.len(), 2);
    for (paragraph, expected) in body.iter().zip(["  Line1", "  Line2"]) {
        assert_eq!(paragraph.text, expected);
        assert_eq!(paragraph.first_line_indent_in, Some(0.5));
        assert_eq!(paragraph.line_spacing, Some(1.5));
    }
}

#[test]
fn compose_keeps_empty_body_lines_as_empty_paragraphs() {
    let mut record = populated_record();
    record.body_text = "Первый абзац.\n\nВторой абзац.".to_string();
    let plan = compose(&record).expect("compose");

    let body: Vec<&str> = plan
        .blocks
        .iter()
        .filter_map(|block| match block {
            DocBlock::Paragraph(p) if p.align == Alignment::Justified => Some(p.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(body, vec!["  Первый абзац.", "  ", "  Второй абзац."]);
}

#[test]
fn compose_salutation_paragraph_carries_space_after() {
    let plan = compose(&populated_record()).expect("compose");
    let salutation_paragraph = plan
        .blocks
        .iter()
        .find_map(|block| match block {
            DocBlock::Paragraph(p) if p.text == "Уважаемый Иван Петров!" => Some(p),
            _ => None,
        })
        .expect("salutation paragraph");
    assert_eq!(salutation_paragraph.space_after_pt, Some(12));
}

#[test]
fn compose_sign_off_order_is_fixed() {
    let plan = compose(&populated_record()).expect("compose");
    let texts = paragraph_texts(&plan);
    let start = texts
        .iter()
        .position(|t| *t == "С уважением,")
        .expect("sign-off");
    assert_eq!(
        &texts[start..start + 4],
        &[
            "С уважением,",
            "Генеральный директор",
            "ООО Ромашка",
            "Сидоров С.С.",
        ]
    );
}

#[test]
fn compose_attachments_follow_a_page_break_in_insertion_order() {
    let mut record = populated_record();
    record.push_attachment("Смета работ");
    record.push_attachment("Акт сверки");
    let plan = compose(&record).expect("compose");

    let break_index = plan
        .blocks
        .iter()
        .position(|b| matches!(b, DocBlock::PageBreak))
        .expect("page break");
    let tail: Vec<&str> = plan.blocks[break_index + 1..]
        .iter()
        .map(|block| match block {
            DocBlock::Paragraph(p) => p.text.as_str(),
            other => panic!("unexpected block after page break: {other:?}"),
        })
        .collect();
    assert_eq!(tail, vec!["Вложения:", "Смета работ", "Акт сверки"]);
}

#[test]
fn compose_is_idempotent() {
    let mut record = populated_record();
    record.push_attachment("Смета работ");
    record.logo = Some(ImageRef::new("/tmp/logo.png"));
    let first = compose(&record).expect("compose");
    let second = compose(&record).expect("compose");
    assert_eq!(first, second);
}

#[test]
fn document_style_matches_letter_defaults() {
    let style = DocumentStyle::default();
    assert_eq!(style.font_name, "Times New Roman");
    assert_eq!(style.size_pt, 12);
    assert_eq!(style.line_spacing, 1.5);
    assert_eq!(style.space_after_pt, 0);
    assert_eq!(style.margins.left_in, 0.7874);
    assert_eq!(style.margins.right_in, 0.3937);
}

#[test]
fn attachment_confirmation_trims_and_rejects_blank_text() {
    let mut record = LetterRecord::default();
    assert!(!record.push_attachment("   \n\t"));
    assert!(record.push_attachment("  Смета работ  \n"));
    assert_eq!(record.attachments, vec!["Смета работ"]);
}

#[test]
fn record_round_trips_through_serde() {
    let mut record = populated_record();
    record.stamp = Some(ImageRef::new("/tmp/stamp.png"));
    let json = serde_json::to_string(&record).expect("serialize");
    let restored: LetterRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, record);
}
