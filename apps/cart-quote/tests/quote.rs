use cart_quote::{quote_cart, render_text, run, Args};
use storefront_config::PricingConfig;
use storefront_core::Currency;

const CART: &str = r#"{
    "currency": "PLN",
    "items": [
        { "productId": "A", "quantity": 2, "price": 19.99 },
        {
            "productId": "B",
            "warehouseId": "W1",
            "quantity": 1,
            "availableWarehouses": [{ "warehouseId": "W1", "basePrice": 30 }]
        }
    ]
}"#;

fn config_with_pln(rate: f64) -> PricingConfig {
    let mut config = PricingConfig::default();
    config.rates.pln = rate;
    config
}

#[test]
fn quotes_the_documented_cart() {
    let quote = quote_cart(CART, &config_with_pln(4.5), None, None).unwrap();

    assert_eq!(quote.summary.currency, Currency::Pln);
    assert_eq!(quote.summary.total_price, 314.91);

    let text = render_text(&quote);
    assert!(text.starts_with("Cart quote (PLN @ 4.5)"));
    assert!(text.contains("W1"));
    assert!(text.ends_with("Total: 314,91\u{a0}zł\n"));
}

#[test]
fn overrides_win_over_the_document() {
    let quote = quote_cart(CART, &config_with_pln(4.5), Some(Currency::Eur), Some(2.0)).unwrap();

    assert_eq!(quote.summary.currency, Currency::Eur);
    assert_eq!(quote.summary.total_price, 139.96);
}

#[test]
fn falls_back_to_config_currency() {
    let mut config = config_with_pln(4.0);
    config.display.currency = Some(Currency::Pln);

    let doc = r#"{ "items": [{ "productId": "A", "quantity": 1, "price": "10,00" }] }"#;
    let quote = quote_cart(doc, &config, None, None).unwrap();
    assert_eq!(quote.summary.currency, Currency::Pln);
    assert_eq!(quote.summary.total_price, 40.0);
}

#[test]
fn duplicate_lines_are_merged() {
    let doc = r#"{ "items": [
        { "productId": "A", "quantity": 1, "price": 5 },
        { "productId": "A", "quantity": 2, "price": 5 }
    ] }"#;
    let mut config = PricingConfig::default();
    config.display.currency = Some(Currency::Eur);

    let quote = quote_cart(doc, &config, None, None).unwrap();
    assert_eq!(quote.cart.item_count(), 1);
    assert_eq!(quote.summary.base_total_price, 15.0);
}

#[test]
fn sale_lines_show_a_badge() {
    let doc = r#"{ "currency": "EUR", "items": [
        { "productId": "A", "quantity": 1, "price": 100, "specialPrice": 80 }
    ] }"#;
    let quote = quote_cart(doc, &PricingConfig::default(), None, None).unwrap();

    assert!(render_text(&quote).contains("€80.00 (-20%)"));
}

#[test]
fn rejects_bad_input() {
    let config = PricingConfig::default();

    assert!(quote_cart("not json", &config, None, None).is_err());
    assert!(quote_cart(r#"{ "currency": "USD", "items": [] }"#, &config, None, None).is_err());
    assert!(quote_cart(
        r#"{ "currency": "EUR", "items": [{ "productId": "A", "quantity": 0 }] }"#,
        &config,
        None,
        None
    )
    .is_err());
    assert!(quote_cart(r#"{ "currency": "EUR", "items": [] }"#, &config, None, Some(0.0)).is_err());
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let cart = dir.path().join("cart.json");
    std::fs::write(&cart, CART).unwrap();

    let args = Args {
        cart,
        config: Some(dir.path().join("typo-pricing.toml")),
        currency: None,
        rate: None,
        json: false,
    };

    let err = run(&args).unwrap_err();
    assert!(format!("{:#}", err).contains("not found"));
}

#[test]
fn document_currency_is_case_insensitive() {
    let doc = r#"{ "currency": "pln", "items": [{ "productId": "A", "quantity": 1, "price": 10 }] }"#;
    let quote = quote_cart(doc, &config_with_pln(4.0), None, None).unwrap();

    assert_eq!(quote.summary.currency, Currency::Pln);
    assert_eq!(quote.summary.total_price, 40.0);
}
