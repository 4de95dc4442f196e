// workorder-generation-service/src/numerals.rs
//
// Russian "amount in words" rendering for the summary line of the
// printed order. Only one grouping level is supported (тысячи);
// amounts of a million and above produce a malformed phrase, a known
// limitation of the original form kept for compatibility.

const ONES: [&str; 10] = [
    "", "один", "два", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять",
];
const TEENS: [&str; 10] = [
    "десять",
    "одиннадцать",
    "двенадцать",
    "тринадцать",
    "четырнадцать",
    "пятнадцать",
    "шестнадцать",
    "семнадцать",
    "восемнадцать",
    "девятнадцать",
];
const TENS: [&str; 10] = [
    "",
    "",
    "двадцать",
    "тридцать",
    "сорок",
    "пятьдесят",
    "шестьдесят",
    "семьдесят",
    "восемьдесят",
    "девяносто",
];
const HUNDREDS: [&str; 10] = [
    "",
    "сто",
    "двести",
    "триста",
    "четыреста",
    "пятьсот",
    "шестьсот",
    "семьсот",
    "восемьсот",
    "девятьсот",
];

/// Renders a non-negative amount of rubles as words. The kopek clause
/// is rounded (not truncated) to two digits and omitted when zero;
/// zero renders as "ноль" with no currency suffix.
pub fn amount_in_words(amount: f64) -> String {
    if amount == 0.0 {
        return "ноль".to_string();
    }

    let integer = amount.floor();
    let kopeks = ((amount - integer) * 100.0).round() as u64;
    let integer = integer as u64;

    let mut result = String::new();

    if integer >= 1000 {
        result.push_str(&hundreds_phrase(integer / 1000));
        result.push_str(" тысяч ");
    }

    result.push_str(&hundreds_phrase(integer % 1000));

    if kopeks > 0 {
        result.push_str(&format!(" рублей {:02} копеек", kopeks));
    } else {
        result.push_str(" рублей");
    }

    normalize_spaces(&result)
}

/// Phrase for a value in 0..=999.
fn hundreds_phrase(n: u64) -> String {
    let mut phrase = String::new();

    if n >= 100 {
        phrase.push_str(HUNDREDS[(n / 100) as usize]);
        phrase.push(' ');
    }

    let remainder = n % 100;

    if (10..20).contains(&remainder) {
        phrase.push_str(TEENS[(remainder - 10) as usize]);
    } else {
        if remainder >= 20 {
            phrase.push_str(TENS[(remainder / 10) as usize]);
            phrase.push(' ');
        }
        if remainder % 10 > 0 {
            phrase.push_str(ONES[(remainder % 10) as usize]);
        }
    }

    phrase.trim().to_string()
}

fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_has_no_currency_suffix() {
        assert_eq!(amount_in_words(0.0), "ноль");
    }

    #[test]
    fn whole_amount_omits_kopeks() {
        assert_eq!(amount_in_words(100.0), "сто рублей");
        assert_eq!(amount_in_words(240.0), "двести сорок рублей");
    }

    #[test]
    fn kopeks_are_zero_padded() {
        assert_eq!(amount_in_words(5.05), "пять рублей 05 копеек");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(
            amount_in_words(1234.56),
            "один тысяч двести тридцать четыре рублей 56 копеек"
        );
    }

    #[test]
    fn teens_and_tens() {
        assert_eq!(amount_in_words(17.0), "семнадцать рублей");
        assert_eq!(amount_in_words(21.0), "двадцать один рублей");
        assert_eq!(amount_in_words(999.0), "девятьсот девяносто девять рублей");
    }

    #[test]
    fn kopeks_round_rather_than_truncate() {
        assert_eq!(amount_in_words(1.999), "один рублей 100 копеек");
        assert_eq!(amount_in_words(2.346), "два рублей 35 копеек");
    }

    #[test]
    fn no_double_spaces_from_empty_components() {
        // 1000 has an empty sub-thousand component.
        assert_eq!(amount_in_words(1000.0), "один тысяч рублей");
        assert!(!amount_in_words(100000.0).contains("  "));
    }
}
