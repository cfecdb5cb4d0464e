//! Seeded catalog for demos and tests.

use crate::catalog::{Catalog, Product};
use crate::ids::ProductId;
use crate::money::Money;

fn product(
    id: &str,
    name: &str,
    category: &str,
    price_cents: i64,
    description: &str,
    image: &str,
    sizes: &[&str],
    highlight: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Money::from_cents(price_cents),
        description: description.to_string(),
        image: image.to_string(),
        gallery: vec![image.to_string()],
        sizes: sizes.iter().map(|s| s.to_string()).collect(),
        highlight,
    }
}

/// A small storefront catalog: sneakers, sunglasses, watches.
pub fn demo_catalog() -> Catalog {
    Catalog::new(vec![
        product(
            "tenis-city-runner",
            "Tênis City Runner",
            "tenis",
            69_990,
            "Amortecimento responsivo e cabedal respirável para o dia todo.",
            "tenis-city-runner.jpg",
            &["37", "38", "39", "40", "41", "42"],
            true,
        ),
        product(
            "tenis-trail-peak",
            "Tênis Trail Peak",
            "tenis",
            54_990,
            "Solado de alta tração e reforço lateral para trilhas leves.",
            "tenis-trail-peak.jpg",
            &["38", "39", "40", "41", "42", "43"],
            true,
        ),
        product(
            "tenis-urban-flow",
            "Tênis Urban Flow",
            "tenis",
            48_990,
            "Design urbano com palmilha de espuma de memória.",
            "tenis-urban-flow.jpg",
            &["36", "37", "38", "39", "40"],
            false,
        ),
        product(
            "oculos-aviador-classic",
            "Óculos Aviador Classic",
            "oculos",
            39_990,
            "Lentes com proteção UV total e armação leve em metal.",
            "oculos-aviador-classic.jpg",
            &["Único"],
            true,
        ),
        product(
            "oculos-round-retro",
            "Óculos Round Retrô",
            "oculos",
            34_990,
            "Armação transparente, leve e versátil para qualquer look.",
            "oculos-round-retro.jpg",
            &["Único"],
            false,
        ),
        product(
            "relogio-cronos-steel",
            "Relógio Cronos Steel",
            "relogios",
            62_990,
            "Pulseira em aço inox, resistência 5ATM e cronógrafo preciso.",
            "relogio-cronos-steel.jpg",
            &["40mm", "44mm"],
            true,
        ),
        product(
            "relogio-pulse-fit",
            "Relógio Pulse Fit",
            "relogios",
            48_990,
            "Tela AMOLED, GPS integrado e bateria para até 10 dias.",
            "relogio-pulse-fit.jpg",
            &["41mm", "45mm"],
            false,
        ),
    ])
}
