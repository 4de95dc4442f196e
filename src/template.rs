// workorder-generation-service/src/template.rs
//
// Substitution engine for the `{{ГРУППА||Поле}}` token grammar used by
// the editable work-order templates. The grammar is closed: every
// supported (group, field) pair is a variant of [`Placeholder`], and
// resolution is an exhaustive match over the bound data. Tokens outside
// the grammar are left verbatim and reported, never dropped and never
// fatal.

use serde::Serialize;

use crate::models::{DocumentBinding, ServiceLine};
use crate::numerals;

pub const TABLE_HEADER: [&str; 6] = [
    "№",
    "Наименование работ/услуг",
    "Кол-во",
    "Ед.изм.",
    "Цена, руб.",
    "Сумма, руб.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentField {
    Number,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealField {
    LastName,
    FirstName,
    MiddleName,
    Brand,
    Model,
    Vin,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceField {
    Goods,
    Subtotal,
    Discount,
    Total,
    Count,
    AmountInWords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Document(DocumentField),
    Deal(DealField),
    Contact(ContactField),
    Invoice(InvoiceField),
}

impl Placeholder {
    /// Parses the inner part of a token (between `{{` and `}}`).
    pub fn parse(token: &str) -> Option<Self> {
        let (group, field) = token.split_once("||")?;
        match (group, field) {
            ("ДОКУМЕНТ", "Номер") => Some(Self::Document(DocumentField::Number)),
            ("ДОКУМЕНТ", "Дата") => Some(Self::Document(DocumentField::Date)),
            ("СДЕЛКА", "Фамилия") => Some(Self::Deal(DealField::LastName)),
            ("СДЕЛКА", "Имя") => Some(Self::Deal(DealField::FirstName)),
            ("СДЕЛКА", "Отчество") => Some(Self::Deal(DealField::MiddleName)),
            ("СДЕЛКА", "Марка") => Some(Self::Deal(DealField::Brand)),
            ("СДЕЛКА", "Модель") => Some(Self::Deal(DealField::Model)),
            ("СДЕЛКА", "VIN") => Some(Self::Deal(DealField::Vin)),
            ("СДЕЛКА", "Год выпуска") => Some(Self::Deal(DealField::Year)),
            ("КОНТАКТ", "Телефон") => Some(Self::Contact(ContactField::Phone)),
            ("ФАКТУРНАЯ ЧАСТЬ", "Товары") => Some(Self::Invoice(InvoiceField::Goods)),
            ("ФАКТУРНАЯ ЧАСТЬ", "Итого") => Some(Self::Invoice(InvoiceField::Subtotal)),
            ("ФАКТУРНАЯ ЧАСТЬ", "Скидка") => Some(Self::Invoice(InvoiceField::Discount)),
            ("ФАКТУРНАЯ ЧАСТЬ", "Всего к оплате") => Some(Self::Invoice(InvoiceField::Total)),
            ("ФАКТУРНАЯ ЧАСТЬ", "Количество") => Some(Self::Invoice(InvoiceField::Count)),
            ("ФАКТУРНАЯ ЧАСТЬ", "Сумма прописью") => {
                Some(Self::Invoice(InvoiceField::AmountInWords))
            }
            _ => None,
        }
    }

    fn resolve(&self, binding: &DocumentBinding) -> String {
        let deal = &binding.deal;
        match self {
            Self::Document(DocumentField::Number) => deal.number.clone(),
            Self::Document(DocumentField::Date) => deal.date.clone(),
            Self::Deal(DealField::LastName) => deal.client_name.last_name.clone(),
            Self::Deal(DealField::FirstName) => deal.client_name.first_name.clone(),
            Self::Deal(DealField::MiddleName) => deal.client_name.middle_name.clone(),
            Self::Deal(DealField::Brand) => deal.vehicle.brand.clone(),
            Self::Deal(DealField::Model) => deal.vehicle.model.clone(),
            Self::Deal(DealField::Vin) => deal.vehicle.vin.clone(),
            Self::Deal(DealField::Year) => deal.vehicle.year.clone(),
            Self::Contact(ContactField::Phone) => deal.phone.clone(),
            Self::Invoice(InvoiceField::Goods) => services_table(&binding.services),
            Self::Invoice(InvoiceField::Subtotal) => format_money(binding.totals.subtotal),
            Self::Invoice(InvoiceField::Discount) => format_money(binding.totals.discount),
            Self::Invoice(InvoiceField::Total) => format_money(binding.totals.total),
            Self::Invoice(InvoiceField::Count) => binding.services.len().to_string(),
            Self::Invoice(InvoiceField::AmountInWords) => {
                numerals::amount_in_words(binding.totals.total)
            }
        }
    }
}

/// Result of a substitution pass. `unresolved` holds the tokens that
/// had no mapping and were left verbatim in `text`.
#[derive(Debug, Clone, Serialize)]
pub struct Rendered {
    pub text: String,
    pub unresolved: Vec<String>,
}

/// Resolves every `{{...}}` token in `template` against `binding`.
/// Purely textual: neither input is mutated, repeated renders are
/// byte-identical.
pub fn render(template: &str, binding: &DocumentBinding) -> Rendered {
    let mut text = String::with_capacity(template.len());
    let mut unresolved = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        text.push_str(&rest[..start]);

        let inner = &after_open[..close];
        match Placeholder::parse(inner) {
            Some(placeholder) => text.push_str(&placeholder.resolve(binding)),
            None => {
                text.push_str("{{");
                text.push_str(inner);
                text.push_str("}}");
                unresolved.push(inner.to_string());
            }
        }
        rest = &after_open[close + 2..];
    }
    text.push_str(rest);

    Rendered { text, unresolved }
}

/// Plain-text expansion of the services table: fixed header labels,
/// one row per line with a 1-based index.
pub fn services_table(services: &[ServiceLine]) -> String {
    let mut out = TABLE_HEADER.join(" | ");
    for (index, line) in services.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!(
            "{} | {} | {} | {} | {:.2} | {:.2}",
            index + 1,
            line.name,
            format_quantity(line.quantity),
            line.unit,
            line.unit_price,
            line.total,
        ));
    }
    out
}

pub fn format_money(amount: f64) -> String {
    format!("{:.2} руб.", amount)
}

/// Quantities print without a forced decimal part: 2 rather than 2.00,
/// 1.5 as-is.
pub fn format_quantity(quantity: f64) -> String {
    format!("{}", quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DealRecord, DocumentTemplate, ServiceLine, Vehicle};

    fn binding() -> DocumentBinding {
        let deal = DealRecord {
            id: "101".into(),
            number: "101".into(),
            date: "2024-03-15".into(),
            client_name: crate::models::ClientName {
                last_name: "Петров".into(),
                first_name: "Пётр".into(),
                middle_name: "Петрович".into(),
            },
            phone: "+7 900 000-00-00".into(),
            vehicle: Vehicle {
                brand: "LADA".into(),
                model: "Vesta".into(),
                vin: "XTA210990Y1234567".into(),
                year: "2019".into(),
            },
            status: "Переговоры".into(),
            amount: 240.0,
        };
        let services = vec![
            ServiceLine::new("Замена масла", 2.0, "шт", 100.0, 10.0, 0.0),
            ServiceLine::new("Диагностика", 1.0, "шт", 50.0, 0.0, 20.0),
        ];
        let template = DocumentTemplate {
            id: "standard".into(),
            name: "Стандартный заказ-наряд".into(),
            description: String::new(),
            content: String::new(),
        };
        DocumentBinding::new(template, deal, services)
    }

    #[test]
    fn every_defined_token_resolves_exactly_once() {
        let template = "\
№{{ДОКУМЕНТ||Номер}} от {{ДОКУМЕНТ||Дата}}
{{СДЕЛКА||Фамилия}} {{СДЕЛКА||Имя}} {{СДЕЛКА||Отчество}}
{{КОНТАКТ||Телефон}}
{{СДЕЛКА||Марка}} {{СДЕЛКА||Модель}} {{СДЕЛКА||VIN}} {{СДЕЛКА||Год выпуска}}
{{ФАКТУРНАЯ ЧАСТЬ||Товары}}
{{ФАКТУРНАЯ ЧАСТЬ||Итого}} {{ФАКТУРНАЯ ЧАСТЬ||Скидка}} {{ФАКТУРНАЯ ЧАСТЬ||Всего к оплате}}
{{ФАКТУРНАЯ ЧАСТЬ||Количество}} {{ФАКТУРНАЯ ЧАСТЬ||Сумма прописью}}";

        let rendered = render(template, &binding());
        assert!(rendered.unresolved.is_empty());
        assert!(!rendered.text.contains("{{"));
        assert!(rendered.text.starts_with("№101 от 2024-03-15"));
        assert!(rendered.text.contains("Петров Пётр Петрович"));
        assert!(rendered.text.contains("LADA Vesta XTA210990Y1234567 2019"));
        assert!(rendered.text.contains("250.00 руб. 20.00 руб. 240.00 руб."));
        assert!(rendered.text.contains("2 двести сорок рублей"));
    }

    #[test]
    fn unknown_tokens_are_left_verbatim_and_reported() {
        let rendered = render("до {{СДЕЛКА||Неизвестно}} после", &binding());
        assert_eq!(rendered.text, "до {{СДЕЛКА||Неизвестно}} после");
        assert_eq!(rendered.unresolved, vec!["СДЕЛКА||Неизвестно".to_string()]);
    }

    #[test]
    fn unterminated_token_passes_through() {
        let rendered = render("хвост {{ДОКУМЕНТ||Номер", &binding());
        assert_eq!(rendered.text, "хвост {{ДОКУМЕНТ||Номер");
    }

    #[test]
    fn goods_token_expands_to_the_table() {
        let rendered = render("{{ФАКТУРНАЯ ЧАСТЬ||Товары}}", &binding());
        let mut lines = rendered.text.lines();
        assert_eq!(
            lines.next(),
            Some("№ | Наименование работ/услуг | Кол-во | Ед.изм. | Цена, руб. | Сумма, руб.")
        );
        assert_eq!(lines.next(), Some("1 | Замена масла | 2 | шт | 100.00 | 180.00"));
        assert_eq!(lines.next(), Some("2 | Диагностика | 1 | шт | 50.00 | 60.00"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn render_is_idempotent() {
        let b = binding();
        let template = "{{ДОКУМЕНТ||Номер}} {{ФАКТУРНАЯ ЧАСТЬ||Сумма прописью}}";
        assert_eq!(render(template, &b).text, render(template, &b).text);
    }

    #[test]
    fn render_does_not_mutate_binding() {
        let b = binding();
        let before = b.services.clone();
        let _ = render("{{ФАКТУРНАЯ ЧАСТЬ||Товары}}", &b);
        assert_eq!(b.services, before);
    }
}
