// src/services/chatbot.rs
use serde::Serialize;

use super::{
    catalog::{Catalog, CatalogProduct, DealRecommendation},
    entities::{Entities, extract_entities},
    intent::{Intent, detect_intent},
};

const MAX_DEALS: usize = 3;
const ECHO_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReply {
    pub intent: Intent,
    pub entities: Entities,
    pub text: String,
    pub deals: Vec<DealRecommendation>,
    pub suggestions: Vec<String>,
}

/// Rule-based shopping assistant over an injected catalog.
#[derive(Debug, Clone)]
pub struct ShoppingAssistant {
    catalog: Catalog,
}

impl ShoppingAssistant {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Classify, extract and answer one user message.
    pub fn reply(&self, user_msg: &str) -> AssistantReply {
        let intent = detect_intent(user_msg);
        let entities = extract_entities(user_msg, intent).unwrap_or_else(|warning| {
            tracing::debug!(%intent, %warning, "entity extraction fell back to defaults");
            warning.into_fallback()
        });
        tracing::debug!(%intent, ?entities, "message classified");
        self.respond(intent, entities, user_msg)
    }

    pub fn respond(&self, intent: Intent, entities: Entities, user_msg: &str) -> AssistantReply {
        let (text, deals) = match intent {
            Intent::Search => self.search(&entities),
            Intent::Analyze => self.analyze(),
            Intent::Compare => (COMPARE_TEXT.to_string(), Vec::new()),
            Intent::Timing => (TIMING_TEXT.to_string(), Vec::new()),
            Intent::Alert => (ALERT_TEXT.to_string(), Vec::new()),
            Intent::Budget => self.budget(&entities),
            Intent::General => (general_text(user_msg), Vec::new()),
        };

        AssistantReply {
            intent,
            entities,
            text,
            deals,
            suggestions: suggestions_for(intent).iter().map(|s| s.to_string()).collect(),
        }
    }

    fn search(&self, entities: &Entities) -> (String, Vec<DealRecommendation>) {
        let Some(category) = entities.category else {
            return (NO_CATEGORY_TEXT.to_string(), Vec::new());
        };

        let matches: Vec<&CatalogProduct> = self
            .catalog
            .products()
            .iter()
            .filter(|p| p.category == category)
            .filter(|p| entities.max_price.is_none_or(|max| p.current_price <= f64::from(max)))
            .take(MAX_DEALS)
            .collect();

        let Some(top) = matches.first() else {
            let text = match entities.max_price {
                Some(max) => format!(
                    "I couldn't find any {category} deals under ${max} right now. Try raising your budget or ask me to set a price alert."
                ),
                None => format!(
                    "I couldn't find any {category} deals right now. Want me to set a price alert instead?"
                ),
            };
            return (text, Vec::new());
        };

        let mut text = format!(
            "I found {} great {category} deals for you!\n\n**Top pick:** {} at **${:.2}** ({}% off)",
            matches.len(),
            top.title,
            top.current_price,
            top.discount_percent,
        );
        if let Some(max) = entities.max_price {
            text.push_str(&format!("\n\nEverything here is under your ${max} limit."));
        }
        text.push_str("\n\nWant me to analyze any of these or compare them?");

        let deals = matches
            .into_iter()
            .map(|p| {
                let reason = format!("{}% off at {} - {}", p.discount_percent, p.store, p.verdict().label());
                DealRecommendation::from_product(p, reason)
            })
            .collect();
        (text, deals)
    }

    fn analyze(&self) -> (String, Vec<DealRecommendation>) {
        let products = self.catalog.products();
        let Some(deal) = products.iter().find(|p| p.is_hot).or_else(|| products.first()) else {
            return (
                "There are no deals to analyze right now. Check back soon!".to_string(),
                Vec::new(),
            );
        };

        let recommendation = if deal.discount_percent >= 20 {
            "I recommend buying now - this is one of the strongest prices we've tracked."
        } else {
            "This is a fair deal. If you're not in a hurry, a price alert could catch a deeper drop."
        };
        let low = deal
            .price_history
            .iter()
            .copied()
            .fold(deal.current_price, f64::min);

        let text = format!(
            "**Deal analysis: {title}**\n\n\
             **Price check**\n\
             - Current price: ${current:.2}\n\
             - Original price: ${original:.2}\n\
             - You save: ${savings:.2} ({discount}% off)\n\
             - Lowest tracked price: ${low:.2}\n\n\
             **Store:** {store}\n\n\
             **Verdict: {verdict}**\n{recommendation}",
            title = deal.title,
            current = deal.current_price,
            original = deal.original_price,
            savings = deal.savings(),
            discount = deal.discount_percent,
            store = deal.store,
            verdict = deal.verdict().label(),
        );

        let reason = format!("{} - {}% below list price", deal.verdict().label(), deal.discount_percent);
        (text, vec![DealRecommendation::from_product(deal, reason)])
    }

    fn budget(&self, entities: &Entities) -> (String, Vec<DealRecommendation>) {
        let max = entities.max_price.unwrap_or(super::entities::DEFAULT_MAX_PRICE);
        let matches: Vec<&CatalogProduct> = self
            .catalog
            .products()
            .iter()
            .filter(|p| p.current_price <= f64::from(max))
            .take(MAX_DEALS)
            .collect();

        let Some(best) = matches.first() else {
            return (
                format!("Nothing in the catalog fits under ${max} yet. Try a slightly higher budget?"),
                Vec::new(),
            );
        };

        let text = format!(
            "Here are the best deals under ${max}:\n\n**Best match:** {} for **${:.2}** ({}% off at {})\n\nI picked {} option{} that fit your budget.",
            best.title,
            best.current_price,
            best.discount_percent,
            best.store,
            matches.len(),
            if matches.len() == 1 { "" } else { "s" },
        );
        let deals = matches
            .into_iter()
            .map(|p| {
                let reason = format!("${:.2} - fits your ${max} budget", p.current_price);
                DealRecommendation::from_product(p, reason)
            })
            .collect();
        (text, deals)
    }
}

const NO_CATEGORY_TEXT: &str = "Tell me what you're shopping for - laptops, phones, gaming or audio - and I'll pull up the best current deals.";

const COMPARE_TEXT: &str = "Here's a quick comparison of popular options:\n\n\
| Feature | Option A | Option B |\n\
|---------|----------|----------|\n\
| Price | $899 | $1,099 |\n\
| Discount | 18% | 12% |\n\
| Rating | 4.7 | 4.5 |\n\
| Best for | Everyday use | Power users |\n\n\
**My take:** Option A is the better value unless you need the extra performance.";

const TIMING_TEXT: &str = "**When to buy**\n\n\
- **Black Friday / Cyber Monday** (late November): deepest discounts on electronics and laptops.\n\
- **Prime Day** (July): strong deals on Amazon devices, headphones and smart home gear.\n\
- **Back to school** (August): good prices on laptops and tablets.\n\
- **New model launches**: previous generations usually drop 15-30%.\n\n\
If a deal is already within 5% of its lowest tracked price, it's usually safe to buy now.";

const ALERT_TEXT: &str = "**Setting up a price alert**\n\n\
1. Open the product you're interested in.\n\
2. Tap **Set price alert** and enter your target price.\n\
3. We'll notify you as soon as the price drops to or below your target.\n\n\
You can manage all of your alerts from the **Alerts** page.";

fn general_text(user_msg: &str) -> String {
    let echo: String = user_msg.chars().take(ECHO_CHARS).collect();
    format!(
        "I'm not sure I understood \"{echo}\", but here's what I can help with:\n\n\
         - **Find deals** - \"Find gaming laptops\"\n\
         - **Analyze a deal** - \"Is this a good deal?\"\n\
         - **Compare products** - \"Compare iPhone vs Galaxy\"\n\
         - **Best time to buy** - \"When should I buy a TV?\"\n\
         - **Price alerts** - \"Alert me when prices drop\"\n\
         - **Budget shopping** - \"Show me deals under $200\""
    )
}

fn suggestions_for(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Search => &["Analyze the top pick", "Compare these deals", "Set a price alert"],
        Intent::Analyze => &["Find similar deals", "When is the best time to buy?"],
        Intent::Compare => &["Analyze the cheaper option", "Show me deals under $500"],
        Intent::Timing => &["Alert me when prices drop", "Find laptop deals"],
        Intent::Alert => &["Find headphone deals", "Show me deals under $200"],
        Intent::Budget => &["Find gaming deals", "Is this a good deal?"],
        Intent::General => &["Find gaming laptops", "Show me deals under $500", "When should I buy?"],
    }
}
