use std::fmt::Write;

use crate::model::Certificate;

/// Render the certificate payload as a self-contained HTML document,
/// suitable for printing or attaching to the notification email.
pub fn certificate_html(certificate: &Certificate) -> String {
    let mut rows = String::new();
    for item in &certificate.line_items {
        // String formatting is infallible
        let _ = write!(
            rows,
            "<tr>\
                <td>{date}</td>\
                <td>{label}</td>\
                <td>{name}</td>\
                <td>{payment_ref}</td>\
                <td class=\"amount\">&#8377;{amount}</td>\
             </tr>",
            date = item.date.format("%d %b %Y"),
            label = escape(&item.label),
            name = escape(&item.donor_name),
            payment_ref = escape(&item.payment_ref),
            amount = item.amount,
        );
    }

    format!(
        include_str!("render/certificate.html"),
        org_name = escape(&certificate.organization.name),
        org_address = escape(&certificate.organization.address),
        org_pan = escape(&certificate.organization.pan),
        org_registration = escape(&certificate.organization.registration_80g),
        org_contact_email = escape(&certificate.organization.contact_email),
        org_contact_phone = escape(&certificate.organization.contact_phone),
        org_signatory = escape(&certificate.organization.signatory),
        certificate_number = escape(&certificate.certificate_number),
        issue_date = certificate.issue_date.format("%d %b %Y"),
        financial_year = escape(&certificate.financial_year),
        donor_name = escape(&certificate.donor.name),
        donor_email = escape(&certificate.donor.email),
        line_items = rows,
        total_amount = certificate.total_amount,
        total_amount_words = escape(&certificate.total_amount_words),
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
