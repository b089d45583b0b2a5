//! Renders whole-rupee amounts as English words in the Indian numbering
//! system (crore/lakh/thousand), as printed on 80G tax certificates.

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// Render a value below one thousand. Zero renders as the empty string so
/// that zero-valued buckets drop out of the final output entirely.
fn sub_thousand(n: u64) -> String {
    debug_assert!(n < 1000);
    match n {
        0 => String::new(),
        1..=19 => ONES[n as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{} {}", tens, ONES[ones as usize]),
            }
        }
        _ => {
            let hundreds = format!("{} Hundred", ONES[(n / 100) as usize]);
            match n % 100 {
                0 => hundreds,
                rest => format!("{} {}", hundreds, sub_thousand(rest)),
            }
        }
    }
}

/// Spell out a non-negative whole-rupee amount.
///
/// Zero renders as exactly `"Zero"`, with no `"Rupees Only"` suffix. Every
/// other value carries the suffix. The asymmetry is long-standing certificate
/// wording; do not regularize it without checking downstream templates.
pub fn rupees_in_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }

    let mut parts = Vec::new();

    let crores = amount / CRORE;
    if crores > 0 {
        parts.push(format!("{} Crore", sub_thousand(crores)));
    }

    let lakhs = (amount % CRORE) / LAKH;
    if lakhs > 0 {
        parts.push(format!("{} Lakh", sub_thousand(lakhs)));
    }

    let thousands = (amount % LAKH) / THOUSAND;
    if thousands > 0 {
        parts.push(format!("{} Thousand", sub_thousand(thousands)));
    }

    let remainder = amount % THOUSAND;
    if remainder > 0 {
        parts.push(sub_thousand(remainder));
    }

    format!("{} Rupees Only", parts.join(" "))
}
