// workorder-generation-service/src/templates.rs
//
// Stock work-order templates. Content is the business-approved wording
// and must stay byte-identical to the forms in circulation.

use crate::error::{DocumentError, Result};
use crate::models::DocumentTemplate;

const STANDARD_CONTENT: &str = "\
ЗАКАЗ-НАРЯД
№{{ДОКУМЕНТ||Номер}} от {{ДОКУМЕНТ||Дата}}

Исполнитель: ИП ИВАНОВ ИВАН ИВАНОВИЧ, ИНН 366555444001, РОССИЯ, КУТЯКОВА, УЛ. 15.

Заказчик: {{СДЕЛКА||Фамилия}} {{СДЕЛКА||Имя}} {{СДЕЛКА||Отчество}}
Телефон: {{КОНТАКТ||Телефон}}

Марка: {{СДЕЛКА||Марка}}
Модель: {{СДЕЛКА||Модель}}
VIN: {{СДЕЛКА||VIN}}
Год выпуска: {{СДЕЛКА||Год выпуска}}

{{ФАКТУРНАЯ ЧАСТЬ||Товары}}

Итого: {{ФАКТУРНАЯ ЧАСТЬ||Итого}}
Скидка: {{ФАКТУРНАЯ ЧАСТЬ||Скидка}}
Всего к оплате: {{ФАКТУРНАЯ ЧАСТЬ||Всего к оплате}}
НДС не облагается.

Всего наименований {{ФАКТУРНАЯ ЧАСТЬ||Количество}}, на сумму: {{ФАКТУРНАЯ ЧАСТЬ||Сумма прописью}}

Согласие клиента:
• С перечнем и стоимостью работ ознакомлен и согласен.
• Даю согласие на обработку моих персональных данных (ФИО, номер телефона, марка и модель автомобиля) для целей исполнения настоящего заказ-наряда, информирования о статусе выполнения работ, а также для направления рекламных и информационных материалов о деятельности компании. Согласие может быть отозвано в любой момент путем направления письменного заявления в адрес компании.

Подписи:
Заказчик: _____________________________________________________________
Представитель компании: ______________________________________

Примечания к заказ-наряду:


Претензий по качеству выполненных работ не имею.
Клиент: _______________________________";

const EXTENDED_CONTENT: &str = "\
ЗАКАЗ-НАРЯД (РАСШИРЕННЫЙ)
№{{ДОКУМЕНТ||Номер}} от {{ДОКУМЕНТ||Дата}}

Исполнитель: ИП ИВАНОВ ИВАН ИВАНОВИЧ, ИНН 366555444001, РОССИЯ, КУТЯКОВА, УЛ. 15.

Заказчик: {{СДЕЛКА||Фамилия}} {{СДЕЛКА||Имя}} {{СДЕЛКА||Отчество}}
Телефон: {{КОНТАКТ||Телефон}}

Данные автомобиля:
Марка: {{СДЕЛКА||Марка}}
Модель: {{СДЕЛКА||Модель}}
VIN: {{СДЕЛКА||VIN}}
Год выпуска: {{СДЕЛКА||Год выпуска}}

{{ФАКТУРНАЯ ЧАСТЬ||Товары}}

Финансовая информация:
Итого: {{ФАКТУРНАЯ ЧАСТЬ||Итого}}
Скидка: {{ФАКТУРНАЯ ЧАСТЬ||Скидка}}
Всего к оплате: {{ФАКТУРНАЯ ЧАСТЬ||Всего к оплате}}
НДС не облагается.

Всего наименований {{ФАКТУРНАЯ ЧАСТЬ||Количество}}, на сумму: {{ФАКТУРНАЯ ЧАСТЬ||Сумма прописью}}

Согласие клиента:
• С перечнем и стоимостью работ ознакомлен и согласен.
• Даю согласие на обработку моих персональных данных (ФИО, номер телефона, марка и модель автомобиля) для целей исполнения настоящего заказ-наряда, информирования о статусе выполнения работ, а также для направления рекламных и информационных материалов о деятельности компании. Согласие может быть отозвано в любой момент путем направления письменного заявления в адрес компании.

Подписи:
Заказчик: _____________________________________________________________
Представитель компании: ______________________________________

Дополнительные примечания:


Претензий по качеству выполненных работ не имею.
Клиент: _______________________________";

pub fn builtin_templates() -> Vec<DocumentTemplate> {
    vec![
        DocumentTemplate {
            id: "standard".to_string(),
            name: "Стандартный заказ-наряд".to_string(),
            description: "Базовый шаблон для автосервиса с полным набором полей".to_string(),
            content: STANDARD_CONTENT.to_string(),
        },
        DocumentTemplate {
            id: "extended".to_string(),
            name: "Расширенный заказ-наряд".to_string(),
            description: "Детализированный шаблон с дополнительными полями и примечаниями"
                .to_string(),
            content: EXTENDED_CONTENT.to_string(),
        },
    ]
}

/// Looks `id` up in `templates`, falling back to the built-in set.
pub fn find_template(templates: &[DocumentTemplate], id: &str) -> Result<DocumentTemplate> {
    templates
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .or_else(|| builtin_templates().into_iter().find(|t| t.id == id))
        .ok_or_else(|| DocumentError::TemplateNotFound(id.to_string()))
}
