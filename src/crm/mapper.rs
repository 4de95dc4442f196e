// workorder-generation-service/src/crm/mapper.rs
//
// Heuristic extraction of the local deal record from CRM custom-field
// arrays. Missing data falls back to the "Не указано"/"Не указан"
// placeholders that the printed form expects.

use chrono::DateTime;

use super::models::{CrmContact, CrmDeal, CustomField};
use crate::models::{ClientName, DealRecord, Vehicle};

const UNKNOWN: &str = "Не указано";
const UNKNOWN_MASC: &str = "Не указан";

/// Contact phone lives either under the `PHONE` field code or under the
/// account-specific field id used by the source installation.
const PHONE_FIELD_CODES: [&str; 2] = ["PHONE", "66192"];

pub fn map_deal(deal: &CrmDeal, contact: Option<&CrmContact>) -> DealRecord {
    let (last_name, first_name, middle_name) = contact_name(contact);

    DealRecord {
        id: deal.id.to_string(),
        // The deal id doubles as the printed order number.
        number: deal.id.to_string(),
        date: DateTime::from_timestamp(deal.created_at, 0)
            .map(|dt| dt.date_naive().to_string())
            .unwrap_or_default(),
        client_name: ClientName {
            last_name: non_empty_or(last_name, UNKNOWN),
            first_name: non_empty_or(first_name, UNKNOWN),
            middle_name,
        },
        phone: non_empty_or(contact_phone(contact), UNKNOWN_MASC),
        vehicle: Vehicle {
            brand: non_empty_or(deal_field(deal, "CAR_BRAND"), UNKNOWN),
            model: non_empty_or(deal_field(deal, "CAR_MODEL"), UNKNOWN),
            vin: non_empty_or(deal_field(deal, "CAR_VIN"), UNKNOWN_MASC),
            year: non_empty_or(deal_field(deal, "CAR_YEAR"), UNKNOWN_MASC),
        },
        status: status_label(deal.status_id).to_string(),
        amount: deal.price,
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn first_value(fields: &[CustomField], code: &str) -> Option<String> {
    fields
        .iter()
        .find(|f| {
            f.field_code.as_deref() == Some(code) || f.field_id.to_string() == code
        })
        .and_then(|f| f.values.first())
        .map(|v| v.as_text())
}

fn deal_field(deal: &CrmDeal, code: &str) -> String {
    deal.custom_fields_values
        .as_deref()
        .and_then(|fields| first_value(fields, code))
        .unwrap_or_default()
}

fn contact_field(contact: Option<&CrmContact>, code: &str) -> String {
    contact
        .and_then(|c| c.custom_fields_values.as_deref())
        .and_then(|fields| first_value(fields, code))
        .unwrap_or_default()
}

fn contact_phone(contact: Option<&CrmContact>) -> String {
    for code in PHONE_FIELD_CODES {
        let phone = contact_field(contact, code);
        if !phone.is_empty() {
            return phone;
        }
    }
    String::new()
}

/// Structured first/last name when the CRM has them, otherwise a
/// best-effort split of the free-form display name into
/// family/given/patronymic.
fn contact_name(contact: Option<&CrmContact>) -> (String, String, String) {
    let Some(contact) = contact else {
        return Default::default();
    };

    let mut first_name = contact.first_name.clone().unwrap_or_default();
    let mut last_name = contact.last_name.clone().unwrap_or_default();
    let mut middle_name = String::new();

    if first_name.is_empty() && last_name.is_empty() && !contact.name.is_empty() {
        let mut parts = contact.name.split_whitespace();
        last_name = parts.next().unwrap_or_default().to_string();
        first_name = parts.next().unwrap_or_default().to_string();
        middle_name = parts.next().unwrap_or_default().to_string();
    }

    (last_name, first_name, middle_name)
}

/// Fixed pipeline-status labels of the source installation.
fn status_label(status_id: i64) -> &'static str {
    match status_id {
        142 => "Первичный контакт",
        143 => "Переговоры",
        144 => "Принимают решение",
        145 => "Согласование договора",
        146 => "Успешно реализовано",
        147 => "Закрыто и не реализовано",
        _ => "Неизвестный статус",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::models::CustomFieldValue;

    fn field(id: i64, code: Option<&str>, value: &str) -> CustomField {
        CustomField {
            field_id: id,
            field_code: code.map(str::to_string),
            values: vec![CustomFieldValue {
                value: serde_json::Value::String(value.to_string()),
                enum_id: None,
                enum_code: None,
            }],
        }
    }

    fn deal() -> CrmDeal {
        CrmDeal {
            id: 31337,
            name: "Сделка".to_string(),
            price: 2500.0,
            status_id: 143,
            pipeline_id: 1,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
            custom_fields_values: Some(vec![
                field(1, Some("CAR_BRAND"), "LADA"),
                field(2, Some("CAR_MODEL"), "Granta"),
                field(3, Some("CAR_VIN"), "XTA219010M1234567"),
                field(4, Some("CAR_YEAR"), "2021"),
            ]),
            embedded: None,
        }
    }

    #[test]
    fn maps_deal_fields_and_status() {
        let record = map_deal(&deal(), None);
        assert_eq!(record.id, "31337");
        assert_eq!(record.number, "31337");
        assert_eq!(record.date, "2023-11-14");
        assert_eq!(record.vehicle.brand, "LADA");
        assert_eq!(record.vehicle.model, "Granta");
        assert_eq!(record.status, "Переговоры");
        assert!((record.amount - 2500.0).abs() < 1e-9);
    }

    #[test]
    fn missing_contact_falls_back_to_placeholders() {
        let record = map_deal(&deal(), None);
        assert_eq!(record.client_name.last_name, "Не указано");
        assert_eq!(record.client_name.first_name, "Не указано");
        assert_eq!(record.client_name.middle_name, "");
        assert_eq!(record.phone, "Не указан");
    }

    #[test]
    fn splits_free_form_contact_name() {
        let contact = CrmContact {
            id: 5,
            name: "Иванов Иван Иванович".to_string(),
            first_name: None,
            last_name: None,
            custom_fields_values: Some(vec![field(66192, None, "+7 900 111-22-33")]),
        };
        let record = map_deal(&deal(), Some(&contact));
        assert_eq!(record.client_name.last_name, "Иванов");
        assert_eq!(record.client_name.first_name, "Иван");
        assert_eq!(record.client_name.middle_name, "Иванович");
        // phone resolved through the numeric field-id fallback
        assert_eq!(record.phone, "+7 900 111-22-33");
    }

    #[test]
    fn structured_name_wins_over_display_name() {
        let contact = CrmContact {
            id: 5,
            name: "кто-то другой".to_string(),
            first_name: Some("Пётр".to_string()),
            last_name: Some("Петров".to_string()),
            custom_fields_values: Some(vec![field(9, Some("PHONE"), "+7 495 765-43-21")]),
        };
        let record = map_deal(&deal(), Some(&contact));
        assert_eq!(record.client_name.last_name, "Петров");
        assert_eq!(record.client_name.first_name, "Пётр");
        assert_eq!(record.phone, "+7 495 765-43-21");
    }

    #[test]
    fn unknown_status_gets_the_fallback_label() {
        let mut d = deal();
        d.status_id = 999;
        assert_eq!(map_deal(&d, None).status, "Неизвестный статус");
    }
}
