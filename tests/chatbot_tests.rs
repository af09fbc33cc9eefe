use tadow_assistant::services::catalog::{Catalog, Category};
use tadow_assistant::services::chatbot::ShoppingAssistant;
use tadow_assistant::services::entities::{
    DEFAULT_MAX_PRICE, Entities, ExtractionWarning, extract_entities,
};
use tadow_assistant::services::intent::{Intent, detect_intent};

fn assistant() -> ShoppingAssistant {
    ShoppingAssistant::new(Catalog::demo())
}

#[test]
fn test_detect_intent() {
    assert_eq!(detect_intent("Find me a gaming laptop"), Intent::Search);
    assert_eq!(detect_intent("Is this a good deal?"), Intent::Analyze);
    assert_eq!(detect_intent("Compare iPhone vs Galaxy"), Intent::Compare);
    assert_eq!(detect_intent("When should I buy a TV?"), Intent::Timing);
    assert_eq!(detect_intent("Notify me about price drops"), Intent::Alert);
    assert_eq!(detect_intent("Show me deals under $200"), Intent::Budget);
    assert_eq!(detect_intent("random text"), Intent::General);
}

#[test]
fn test_gaming_text_searches_gaming() {
    for text in ["gaming", "GAMING gear", "best gaming laptop", "any gaming headphone deals?"] {
        assert_eq!(detect_intent(text), Intent::Search, "{text}");
        let entities = extract_entities(text, Intent::Search).unwrap();
        assert_eq!(entities.category, Some(Category::Gaming), "{text}");
    }
}

#[test]
fn test_category_keywords() {
    let cases = [
        ("laptop", Category::Laptops, "Laptops"),
        ("computer", Category::Laptops, "Laptops"),
        ("phone", Category::Phones, "Phones"),
        ("iphone", Category::Phones, "Phones"),
        ("galaxy", Category::Phones, "Phones"),
        ("gaming", Category::Gaming, "Gaming"),
        ("ps5", Category::Gaming, "Gaming"),
        ("xbox", Category::Gaming, "Gaming"),
        ("headphone", Category::Audio, "Audio"),
        ("headphones", Category::Audio, "Audio"),
        ("airpods", Category::Audio, "Audio"),
        ("audio", Category::Audio, "Audio"),
    ];

    for (keyword, category, label) in cases {
        let text = format!("Find a new {keyword} for me");
        assert_eq!(detect_intent(&text), Intent::Search, "{text}");
        let entities = extract_entities(&text, Intent::Search).unwrap();
        assert_eq!(entities.category, Some(category), "{text}");
        assert_eq!(entities.get("category").as_deref(), Some(label), "{text}");
    }
}

#[test]
fn test_headphone_search_returns_audio_deals() {
    let assistant = assistant();
    let reply = assistant.reply("Find headphone deals");

    assert_eq!(reply.entities.category, Some(Category::Audio));
    assert!(!reply.deals.is_empty());
    for deal in &reply.deals {
        assert_eq!(assistant.catalog().get(&deal.id).unwrap().category, Category::Audio);
    }
}

#[test]
fn test_budget_extraction() {
    let entities = extract_entities("Show me deals under $250", Intent::Budget).unwrap();
    assert_eq!(entities.max_price, Some(250));
    assert_eq!(entities.get("maxPrice").as_deref(), Some("250"));

    let entities = extract_entities("anything under 80 bucks", Intent::Budget).unwrap();
    assert_eq!(entities.max_price, Some(80));
}

#[test]
fn test_budget_default_is_reported() {
    let result = extract_entities("I'm on a budget", Intent::Budget);
    let warning = result.unwrap_err();
    assert!(matches!(warning, ExtractionWarning::BudgetDefaulted { .. }));
    assert_eq!(warning.into_fallback().max_price, Some(DEFAULT_MAX_PRICE));
}

#[test]
fn test_budget_reply_respects_ceiling_and_order() {
    let assistant = assistant();
    let entities = Entities { max_price: Some(500), ..Default::default() };
    let reply = assistant.respond(Intent::Budget, entities, "deals under $500");

    assert!(!reply.deals.is_empty());
    assert!(reply.deals.len() <= 3);
    assert!(reply.deals.iter().all(|d| d.current_price <= 500.0));

    let expected: Vec<&str> = assistant
        .catalog()
        .products()
        .iter()
        .filter(|p| p.current_price <= 500.0)
        .take(3)
        .map(|p| p.id.as_str())
        .collect();
    let actual: Vec<&str> = reply.deals.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(actual, expected);
    assert!(reply.text.contains(&reply.deals[0].title));
}

#[test]
fn test_gaming_laptop_under_budget_scenario() {
    let reply = assistant().reply("Find gaming laptop under $1500");

    assert_eq!(reply.intent, Intent::Search);
    assert_eq!(reply.entities.category, Some(Category::Gaming));
    assert_eq!(reply.entities.max_price, Some(1500));
    assert!(!reply.deals.is_empty());
    assert!(reply.deals.iter().all(|d| d.current_price <= 1500.0));

    let catalog = Catalog::demo();
    for deal in &reply.deals {
        assert_eq!(catalog.get(&deal.id).unwrap().category, Category::Gaming);
    }
}

#[test]
fn test_empty_input_falls_back() {
    let reply = assistant().reply("");
    assert_eq!(reply.intent, Intent::General);
    assert!(reply.deals.is_empty());
    assert!(reply.text.starts_with("I'm not sure I understood \"\""));
    assert!(reply.text.contains("Find deals"));
}

#[test]
fn test_general_echo_is_truncated() {
    let text = "é".repeat(80);
    let reply = assistant().reply(&text);
    assert_eq!(reply.intent, Intent::General);
    assert!(reply.text.contains(&"é".repeat(50)));
    assert!(!reply.text.contains(&"é".repeat(51)));
}

#[test]
fn test_search_without_matches() {
    let reply = assistant().reply("cheap phone under $100");
    assert_eq!(reply.intent, Intent::Search);
    assert!(reply.deals.is_empty());
    assert!(reply.text.contains("couldn't find any Phones deals under $100"));
}

#[test]
fn test_analyze_uses_first_hot_deal() {
    let reply = assistant().reply("Is this deal worth it?");
    assert_eq!(reply.intent, Intent::Analyze);
    assert_eq!(reply.deals.len(), 1);
    // deal-001 is hot at 18% off.
    assert_eq!(reply.deals[0].id, "deal-001");
    assert!(reply.text.contains("fair deal"));
}

#[test]
fn test_analyze_recommends_big_discounts() {
    let mut products = Catalog::demo().products().to_vec();
    products.retain(|p| p.id == "deal-008");
    let reply = ShoppingAssistant::new(Catalog::new(products)).reply("analyze this");
    assert!(reply.text.contains("recommend buying now"));
    assert!(reply.text.contains("Great Deal"));
}

#[test]
fn test_fixed_templates_have_no_deals() {
    let assistant = assistant();
    for text in ["compare these", "best time to buy?", "set an alert"] {
        let reply = assistant.reply(text);
        assert!(reply.deals.is_empty(), "{text}");
        assert!(!reply.suggestions.is_empty(), "{text}");
    }
    assert!(assistant.reply("compare these").text.contains("| Feature |"));
    assert!(assistant.reply("best time to buy?").text.contains("Black Friday"));
}

#[test]
fn test_empty_catalog_never_fails() {
    let assistant = ShoppingAssistant::new(Catalog::new(Vec::new()));
    for text in ["gaming", "is this a good deal", "under $10", ""] {
        let reply = assistant.reply(text);
        assert!(reply.deals.is_empty(), "{text}");
        assert!(!reply.text.is_empty(), "{text}");
    }
}
