// Receipt document builder.
//
// Produces the self-contained HTML handed to the artifact renderer: store
// header, customer block, product lines, payment history, and the
// total / paid / outstanding summary.

use rust_decimal::Decimal;

use crate::core::money;
use crate::modules::customers::models::Customer;
use crate::modules::sales::models::{LineItemDetail, Payment, Sale};
use crate::modules::settings::models::StoreSettings;

pub fn build_receipt_html(
    settings: &StoreSettings,
    customer: &Customer,
    sale: &Sale,
    line_items: &[LineItemDetail],
    payments: &[Payment],
    paid_total: Decimal,
) -> String {
    let outstanding = sale.total_amount - paid_total;

    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    html.push_str("<style>body{font-family:sans-serif;width:800px;margin:0 auto;color:#323232}");
    html.push_str("h1{color:#0d6efd}table{width:100%;border-collapse:collapse}");
    html.push_str("td,th{padding:4px 0;text-align:left}td.amount,th.amount{text-align:right}");
    html.push_str("hr{border:1px solid #dcdcdc}.paid{color:green}.due{color:red}</style>");
    html.push_str("</head><body>");

    html.push_str(&format!(
        "<h1>{}</h1><h2>Sale #{}</h2>",
        escape(&settings.store_name),
        sale.id
    ));
    html.push_str(&format!(
        "<p><strong>Customer:</strong> {}<br><strong>Date:</strong> {}</p>",
        escape(&customer.full_name()),
        sale.sold_at.format("%Y-%m-%d")
    ));
    html.push_str("<hr>");

    html.push_str("<h3>Products</h3><table>");
    for item in line_items {
        html.push_str(&format!(
            "<tr><td>{}x {} (@ {})</td><td class=\"amount\">{}</td></tr>",
            item.quantity,
            escape(&item.product_name),
            money::format_amount(item.unit_price),
            money::format_amount(item.subtotal()),
        ));
    }
    html.push_str("</table><hr>");

    html.push_str("<h3>Payment history</h3>");
    if payments.is_empty() {
        html.push_str("<p>No payments recorded yet.</p>");
    } else {
        html.push_str("<table>");
        for payment in payments {
            html.push_str(&format!(
                "<tr><td>Payment ({}) - {}</td><td class=\"amount paid\">{}</td></tr>",
                payment.method.as_str(),
                payment.paid_at.format("%Y-%m-%d"),
                money::format_amount(payment.amount),
            ));
        }
        html.push_str("</table>");
    }
    html.push_str("<hr>");

    html.push_str("<table>");
    html.push_str(&format!(
        "<tr><th class=\"amount\">Sale total:</th><td class=\"amount\">{}</td></tr>",
        money::format_amount(sale.total_amount)
    ));
    html.push_str(&format!(
        "<tr><th class=\"amount paid\">Total paid:</th><td class=\"amount paid\">{}</td></tr>",
        money::format_amount(paid_total)
    ));
    html.push_str(&format!(
        "<tr><th class=\"amount due\">Outstanding:</th><td class=\"amount due\">{}</td></tr>",
        money::format_amount(outstanding)
    ));
    html.push_str("</table>");

    html.push_str("<p><strong>Thank you for your business!</strong></p>");
    html.push_str("</body></html>");

    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::sales::models::{PaymentKind, SaleStatus};
    use chrono::NaiveDate;

    fn sample_sale() -> Sale {
        Sale {
            id: 7,
            customer_id: 1,
            sold_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            total_amount: Decimal::new(4000, 2),
            status: SaleStatus::AwaitingPayment,
            notes: None,
            payment_kind: PaymentKind::Cash,
            installment_count: None,
            installment_frequency: None,
            down_payment: None,
            annulled_by: None,
            annulment_motive: None,
            annulled_at: None,
        }
    }

    #[test]
    fn test_receipt_contains_totals_and_lines() {
        let settings = StoreSettings {
            id: 1,
            store_name: "My Store".to_string(),
            logo_path: None,
            tax_id: None,
            phone: None,
            address: None,
            email: None,
            daily_interest_pct: Decimal::ZERO,
            weekly_interest_pct: Decimal::ZERO,
            monthly_interest_pct: Decimal::ZERO,
            return_window_days: 30,
        };
        let customer = Customer {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: None,
            id_document: None,
            phone: None,
            email: None,
            address: None,
            city: None,
        };
        let items = vec![LineItemDetail {
            id: 1,
            sale_id: 7,
            product_id: 1,
            product_name: "T-shirt".to_string(),
            quantity: 2,
            unit_price: Decimal::new(2000, 2),
        }];

        let html = build_receipt_html(
            &settings,
            &customer,
            &sample_sale(),
            &items,
            &[],
            Decimal::ZERO,
        );

        assert!(html.contains("Sale #7"));
        assert!(html.contains("2x T-shirt"));
        assert!(html.contains("$40.00"));
        assert!(html.contains("No payments recorded yet."));
    }

    #[test]
    fn test_escape_markup_in_names() {
        assert_eq!(escape("A&B <shop>"), "A&amp;B &lt;shop&gt;");
    }
}
