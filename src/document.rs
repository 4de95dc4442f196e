// workorder-generation-service/src/document.rs
//
// Structured work-order artifact. The block sequence and all fixed
// wording mirror the printed "Заказ-наряд" form; downstream renderers
// (screen preview, markdown/html/docx export) consume this structure
// rather than a flat string.

use serde::{Deserialize, Serialize};

use crate::models::DocumentBinding;
use crate::numerals;
use crate::template::{self, TABLE_HEADER};

pub const ORDER_TYPE_LABEL: &str = "ЗАКАЗ-НАРЯД";

pub const EXECUTOR_LINE: &str =
    "ИП ИВАНОВ ИВАН ИВАНОВИЧ, ИНН 366555444001, РОССИЯ, КУТЯКОВА, УЛ. 15.";

pub const VAT_NOTICE: &str = "НДС не облагается.";

pub const CONSENT_ITEMS: [&str; 2] = [
    "С перечнем и стоимостью работ ознакомлен и согласен.",
    "Даю согласие на обработку моих персональных данных (ФИО, номер телефона, марка и модель автомобиля) для целей исполнения настоящего заказ-наряда, информирования о статусе выполнения работ, а также для направления рекламных и информационных материалов о деятельности компании. Согласие может быть отозвано в любой момент путем направления письменного заявления в адрес компании.",
];

pub const CUSTOMER_SIGNATURE_LINE: &str =
    "Заказчик: _____________________________________________________________";
pub const COMPANY_SIGNATURE_LINE: &str =
    "Представитель компании: ______________________________________";
pub const CLOSING_DISCLAIMER: &str = "Претензий по качеству выполненных работ не имею.";
pub const CLIENT_SIGNATURE_LINE: &str = "Клиент: _______________________________";

/// Blank paragraphs reserved for handwritten notes.
const NOTES_BLANK_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    pub runs: Vec<TextRun>,
    pub alignment: Alignment,
}

impl ParagraphBlock {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            alignment: Alignment::Left,
        }
    }

    pub fn centered(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            alignment: Alignment::Center,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// One row of the bordered services table, already formatted for
/// display (prices and totals to 2 decimals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRow {
    pub index: usize,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub unit_price: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTable {
    pub header: Vec<String>,
    pub rows: Vec<ServiceRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph(ParagraphBlock),
    Table(ServiceTable),
}

/// Final structured artifact, ready for preview or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl WorkOrderDocument {
    /// Export filename stem: `<order-type-label>_<number>_<date>`.
    pub fn filename_stem(number: &str, date: &str) -> String {
        format!("Заказ-наряд_{}_{}", number, date)
    }
}

/// Assembles the artifact from a binding. Section order is fixed by the
/// printed form: title, executor, party, vehicle, services table,
/// totals, amount in words, consent, signatures, notes, closing
/// disclaimer.
pub fn build_document(binding: &DocumentBinding) -> WorkOrderDocument {
    let deal = &binding.deal;
    let totals = binding.totals;
    let mut blocks = Vec::new();

    // Title block
    blocks.push(Block::Paragraph(ParagraphBlock::centered(vec![TextRun::bold(
        ORDER_TYPE_LABEL,
    )])));
    blocks.push(Block::Paragraph(ParagraphBlock::centered(vec![TextRun::plain(
        format!("№{} от {}", deal.number, deal.date),
    )])));

    // Executor identity, fixed wording
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![
        TextRun::bold("Исполнитель: "),
        TextRun::plain(EXECUTOR_LINE),
    ])));
    blocks.push(Block::Paragraph(ParagraphBlock::empty()));

    // Party block
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![
        TextRun::bold("Заказчик: "),
        TextRun::plain(format!(
            "{} {} {}",
            deal.client_name.last_name, deal.client_name.first_name, deal.client_name.middle_name
        )),
    ])));
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![
        TextRun::bold("Телефон: "),
        TextRun::plain(&deal.phone),
    ])));
    blocks.push(Block::Paragraph(ParagraphBlock::empty()));

    // Vehicle block
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![
        TextRun::bold("Марка: "),
        TextRun::plain(format!("{}    ", deal.vehicle.brand)),
        TextRun::bold("Модель: "),
        TextRun::plain(&deal.vehicle.model),
    ])));
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![
        TextRun::bold("VIN: "),
        TextRun::plain(format!("{}    ", deal.vehicle.vin)),
        TextRun::bold("Год выпуска: "),
        TextRun::plain(&deal.vehicle.year),
    ])));

    // Services table
    blocks.push(Block::Table(ServiceTable {
        header: TABLE_HEADER.iter().map(|h| h.to_string()).collect(),
        rows: binding
            .services
            .iter()
            .enumerate()
            .map(|(i, line)| ServiceRow {
                index: i + 1,
                name: line.name.clone(),
                quantity: template::format_quantity(line.quantity),
                unit: line.unit.clone(),
                unit_price: format!("{:.2}", line.unit_price),
                total: format!("{:.2}", line.total),
            })
            .collect(),
    }));
    blocks.push(Block::Paragraph(ParagraphBlock::empty()));

    // Totals block
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![
        TextRun::plain("Итого: "),
        TextRun::plain(template::format_money(totals.subtotal)),
    ])));
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![
        TextRun::plain("Скидка: "),
        TextRun::plain(template::format_money(totals.discount)),
    ])));
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![
        TextRun::bold("Всего к оплате: "),
        TextRun::bold(template::format_money(totals.total)),
    ])));
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![TextRun::plain(VAT_NOTICE)])));
    blocks.push(Block::Paragraph(ParagraphBlock::empty()));

    // Amount-in-words summary line
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![TextRun::bold(format!(
        "Всего наименований {}, на сумму: {}",
        binding.services.len(),
        numerals::amount_in_words(totals.total)
    ))])));
    blocks.push(Block::Paragraph(ParagraphBlock::empty()));

    // Consent boilerplate, verbatim
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![TextRun::bold(
        "Согласие клиента:",
    )])));
    for item in CONSENT_ITEMS {
        blocks.push(Block::Paragraph(ParagraphBlock::new(vec![TextRun::plain(format!(
            "• {}",
            item
        ))])));
    }
    blocks.push(Block::Paragraph(ParagraphBlock::empty()));

    // Signature blanks
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![TextRun::bold("Подписи:")])));
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![TextRun::plain(
        CUSTOMER_SIGNATURE_LINE,
    )])));
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![TextRun::plain(
        COMPANY_SIGNATURE_LINE,
    )])));
    blocks.push(Block::Paragraph(ParagraphBlock::empty()));

    // Notes area
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![TextRun::bold(
        "Примечания к заказ-наряду:",
    )])));
    for _ in 0..NOTES_BLANK_LINES {
        blocks.push(Block::Paragraph(ParagraphBlock::empty()));
    }

    // Closing disclaimer and client signature
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![TextRun::plain(
        CLOSING_DISCLAIMER,
    )])));
    blocks.push(Block::Paragraph(ParagraphBlock::new(vec![TextRun::plain(
        CLIENT_SIGNATURE_LINE,
    )])));

    WorkOrderDocument {
        title: ORDER_TYPE_LABEL.to_string(),
        blocks,
    }
}
