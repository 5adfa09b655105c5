use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::models::Donation;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Rounds to whole paise; `-0.0` comes back as `0.0`.
fn round_to_paise(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0 + 0.0
}

/// Plain amount as printed on the standard layout: `5001`, `2500.50`.
pub fn format_amount(amount: f64) -> String {
    let amount = round_to_paise(amount);
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

/// Amount with Indian digit grouping: `4,000`, `1,00,000`, `12,34,567.50`.
pub fn format_amount_indian(amount: f64) -> String {
    let amount = round_to_paise(amount);
    let plain = format_amount(amount.abs());
    let (integer, decimal) = match plain.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (plain.as_str(), None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::new();
    if digits.len() <= 3 {
        grouped.push_str(integer);
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        for (i, c) in head.iter().enumerate() {
            if i > 0 && (head.len() - i) % 2 == 0 {
                grouped.push(',');
            }
            grouped.push(*c);
        }
        grouped.push(',');
        grouped.extend(tail);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    match decimal {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// `Rs. 5001/-`
pub fn rupees(amount: f64) -> String {
    format!("Rs. {}/-", format_amount(amount))
}

/// `Rs. 5,001/-`
pub fn rupees_indian(amount: f64) -> String {
    format!("Rs. {}/-", format_amount_indian(amount))
}

const ONES: [&str; 20] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

fn below_hundred(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

/// Spells out a whole number in the Indian system (thousand, lakh, crore).
pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts = Vec::new();
    let mut rest = n;
    for (unit, name) in [(10_000_000, "Crore"), (100_000, "Lakh"), (1_000, "Thousand"), (100, "Hundred")] {
        let count = rest / unit;
        if count > 0 {
            parts.push(format!("{} {}", number_to_words(count), name));
            rest %= unit;
        }
    }
    if rest > 0 {
        parts.push(below_hundred(rest));
    }
    parts.join(" ")
}

/// `Rupees Five Thousand One Only`, with paise when the amount has them.
pub fn amount_in_words(amount: f64) -> String {
    let amount = amount.max(0.0);
    let mut rupees = amount.trunc() as u64;
    let mut paise = ((amount - amount.trunc()) * 100.0).round() as u64;
    if paise == 100 {
        rupees += 1;
        paise = 0;
    }

    if paise > 0 {
        format!("Rupees {} and {} Paise Only", number_to_words(rupees), below_hundred(paise))
    } else {
        format!("Rupees {} Only", number_to_words(rupees))
    }
}

pub fn format_date_string(date_str: &str, format: &str) -> String {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(date_str) {
        return datetime.format(format).to_string();
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%.f") {
        return datetime.format(format).to_string();
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S%.f") {
        return datetime.format(format).to_string();
    }

    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return date.format(format).to_string();
    }

    date_str.to_string()
}

/// Printed receipt date; records without a timestamp print today's date.
pub fn receipt_date(donation: &Donation) -> String {
    match donation.created_at.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(created_at) => format_date_string(created_at, DATE_FORMAT),
        None => Local::now().format(DATE_FORMAT).to_string(),
    }
}

/// `#` followed by the first eight characters of the id, upper-cased.
pub fn receipt_number(id: &str) -> String {
    let prefix: String = id.trim().chars().take(8).collect();
    format!("#{}", prefix.to_uppercase())
}

/// `Receipt_{donor}_{id[0:6]}.pdf`
pub fn receipt_file_name(donation: &Donation) -> String {
    let donor: String = donation
        .display_name()
        .chars()
        .map(|c| if c.is_whitespace() || c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let id_prefix: String = donation.id.trim().chars().take(6).collect();
    format!("Receipt_{}_{}.pdf", donor, id_prefix)
}

/// Purpose line shared by the standard layout and the table's cash row.
pub fn towards_line(donation: &Donation) -> String {
    if donation.is_sponsorship() {
        match donation.kind() {
            Some(kind) => format!("Towards: Sponsorship - {}", kind),
            None => "Towards: Sponsorship".to_string(),
        }
    } else {
        "Towards: Festival Contribution".to_string()
    }
}
