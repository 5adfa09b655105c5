use pretty_assertions::assert_eq;
use serde_json::json;

use receipt_generator::pdf::{DrawOp, Page, Rgb};
use receipt_generator::{
    generate_receipt, render_receipt, Donation, Layout, ReceiptConfig, ReceiptGenerator, ThemeId,
};

fn donation(value: serde_json::Value) -> Donation {
    serde_json::from_value(value).unwrap()
}

fn config(value: serde_json::Value) -> ReceiptConfig {
    serde_json::from_value(value).unwrap()
}

fn table() -> ReceiptConfig {
    config(json!({ "layout": "table" }))
}

fn strokes(page: &Page) -> Vec<Rgb> {
    page.ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Rect { style, .. } => style.stroke,
            _ => None,
        })
        .collect()
}

#[test]
fn paid_in_full_cash_donation() {
    let d = donation(json!({
        "id": "5f0c2a9e-77aa-4c1e",
        "name_english": "Suresh Kumar",
        "amount": 5001,
        "received_amount": 5001,
        "donation_mode": "cash",
        "category": "chanda"
    }));

    let standard = render_receipt(&d, &ReceiptConfig::default()).page;
    assert!(standard.contains_text("PAID IN FULL"));

    let ledger = render_receipt(&d, &table()).page;
    assert!(ledger.contains_text("Received:"));
    assert!(!ledger.contains_text("Balance Due:"));
}

#[test]
fn partially_paid_cash_donation() {
    let d = donation(json!({
        "id": "b7",
        "amount": 10000,
        "received_amount": 4000,
        "donation_mode": "cash"
    }));

    let standard = render_receipt(&d, &ReceiptConfig::default()).page;
    assert!(standard.contains_text("PAYMENT PENDING: Rs. 6000/-"));

    let ledger = render_receipt(&d, &table()).page;
    assert!(ledger.contains_text("Received:"));
    assert!(ledger.contains_text("Rs. 4,000/-"));
    let due = ledger.find_text("Rs. 6,000/-").unwrap();
    assert_eq!(due.style.color, Rgb::RED);
    assert_eq!(ledger.find_text("Balance Due:").unwrap().style.color, Rgb::RED);
}

#[test]
fn goods_donation_without_value() {
    let d = donation(json!({
        "id": "c3",
        "amount": 0,
        "donation_mode": "goods",
        "type": "Rice 25kg"
    }));

    let page = render_receipt(&d, &table()).page;
    let goods_label = page.find_text("Goods").unwrap();
    let description = page.find_text("Rice 25kg").unwrap();
    assert_eq!(description.y, goods_label.y);

    assert!(!page.texts().any(|t| t.content.starts_with("Rs.")));
    assert!(!page.contains_text("Received:"));
    assert!(!page.contains_text("Balance Due:"));
    assert!(page.contains_text("-"));
}

#[test]
fn unknown_theme_falls_back_to_saffron() {
    let d = donation(json!({ "id": "d4", "amount": 251 }));
    let saffron = ThemeId::Saffron.theme();

    for layout in ["standard", "table"] {
        let page = render_receipt(&d, &config(json!({ "theme": "purple", "layout": layout }))).page;
        let colors = strokes(&page);
        assert!(!colors.is_empty());
        assert!(colors.iter().all(|c| *c == saffron.primary || *c == Rgb::BLACK || *c == Rgb::GRAY));
        assert!(colors.contains(&saffron.primary));
    }
}

#[test]
fn empty_config_uses_layout_titles() {
    let d = donation(json!({ "id": "e5", "amount": 101 }));

    let standard = render_receipt(&d, &config(json!({})));
    assert_eq!(standard.layout, Layout::Standard);
    assert!(standard.page.contains_text("Festival Receipt"));
    assert!(standard.page.contains_text("Thank you for your generous contribution. May God bless you!"));

    let ledger = render_receipt(&d, &table());
    assert_eq!(ledger.layout, Layout::Table);
    assert!(ledger.page.contains_text("Charitable Donation Receipt"));
}

#[test]
fn organization_name_stands_in_for_missing_title() {
    let d = donation(json!({ "id": "f6", "amount": 101 }));
    let page = render_receipt(&d, &config(json!({ "organization_name": "Sri Ganesh Seva Samithi" }))).page;
    assert!(page.contains_text("Sri Ganesh Seva Samithi"));
    assert!(!page.contains_text("Festival Receipt"));
}

#[test]
fn loose_flag_values_keep_blocks_visible() {
    let d = donation(json!({ "id": "a1b2c3d4e5", "amount": 11, "created_at": "2024-09-07" }));

    let loose = config(json!({ "show_date": 0, "show_receipt_no": "" }));
    let page = render_receipt(&d, &loose).page;
    assert!(page.contains_text("Date: 07/09/2024"));
    assert!(page.contains_text("Receipt No: #A1B2C3D4"));

    let off = config(json!({ "show_date": false, "show_receipt_no": false }));
    let page = render_receipt(&d, &off).page;
    assert!(!page.contains_text("Date: 07/09/2024"));
    assert!(!page.contains_text("Receipt No: #A1B2C3D4"));
}

#[test]
fn malformed_layout_renders_standard() {
    let d = donation(json!({ "id": "g7", "amount": 1 }));
    let receipt = render_receipt(&d, &config(json!({ "layout": "grid" })));
    assert_eq!(receipt.layout, Layout::Standard);
}

#[test]
fn writes_named_pdf_to_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let d = donation(json!({
        "id": "9a8b7c6d5e4f",
        "name": "Ramesh Babu",
        "amount": 1116,
        "donation_mode": "cash"
    }));

    let path = generate_receipt(&d, &ReceiptConfig::default(), dir.path()).unwrap();
    assert_eq!(path, dir.path().join("Receipt_Ramesh_Babu_9a8b7c.pdf"));

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn batch_reports_each_donation() {
    let dir = tempfile::tempdir().unwrap();
    let donations: Vec<Donation> = serde_json::from_value(json!([
        { "id": "111111aa", "name_english": "Anil", "amount": 501 },
        { "id": "222222bb", "name_english": "Bhavani", "amount": 1001, "donation_mode": "goods", "type": "Oil" },
        { "id": "333333cc", "amount": 0, "donation_mode": "service", "type": "Decoration" }
    ]))
    .unwrap();

    let generator = ReceiptGenerator::new(dir.path()).with_defaults(Layout::Table, ThemeId::Blue);
    let results = generator.generate_batch(&donations, &ReceiptConfig::default());

    let mut names: Vec<String> = results
        .iter()
        .map(|item| {
            let path = item.result.as_ref().unwrap();
            path.file_name().unwrap().to_string_lossy().into_owned()
        })
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Receipt_Anil_111111.pdf".to_string(),
            "Receipt_Bhavani_222222.pdf".to_string(),
            "Receipt_Donor_333333.pdf".to_string(),
        ]
    );
}
