//! Vitrine demo - scripted walkthrough of the storefront core.
//!
//! Commands:
//! - `vitrine-demo catalog` - list the seeded catalog
//! - `vitrine-demo cart` - run a scripted cart session
//! - `vitrine-demo checkout` - simulate a payment end to end

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use vitrine_commerce::catalog::fixtures::demo_catalog;
use vitrine_commerce::checkout::generate_pix_code;
use vitrine_commerce::prelude::*;
use vitrine_storage::MemoryStore;

/// Vitrine demo - drive the cart store and the checkout simulation
#[derive(Parser)]
#[command(name = "vitrine-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the seeded catalog
    Catalog,

    /// Run a scripted cart session
    Cart,

    /// Simulate a checkout payment
    Checkout {
        /// Pay with Pix instead of a credit card
        #[arg(long)]
        pix: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Catalog => run_catalog(),
        Commands::Cart => run_cart(),
        Commands::Checkout { pix } => run_checkout(pix).await,
    }
}

fn run_catalog() -> Result<()> {
    let catalog = demo_catalog();

    println!("Catálogo ({} produtos)", catalog.all().len());
    for product in catalog.all() {
        let tag = if product.highlight { " *" } else { "" };
        println!(
            "  {:<24} {:<10} {}{}",
            product.id.as_str(),
            product.category,
            product.price.display(),
            tag
        );
    }

    println!("\nDestaques:");
    for product in catalog.featured(4) {
        println!("  {} - {}", product.name, product.price.display());
    }

    println!("\nRelacionados a tenis-city-runner:");
    for product in catalog.related("tenis-city-runner", 3) {
        println!("  {} - {}", product.name, product.price.display());
    }

    Ok(())
}

fn run_cart() -> Result<()> {
    let mut store = CartStore::new(MemoryStore::new(), demo_catalog());
    store.subscribe(|change: &CartChange| {
        println!(
            "  [{}] {} itens, total {}",
            CART_CHANGE_EVENT,
            change.cart.item_count(),
            change.totals.total.display()
        );
    });

    println!("Adicionando produtos...");
    store.add_item("tenis-city-runner");
    store.add_item(ItemPayload {
        id: Some("tenis-city-runner".to_string()),
        qty: Some(1.0),
        selected_size: Some("41".to_string()),
        ..ItemPayload::default()
    });
    store.add_item("relogio-cronos-steel");

    println!("Ajustando quantidades...");
    store.update_qty("relogio-cronos-steel", 2.0);

    println!("Removendo um item...");
    store.remove_item("tenis-city-runner");

    let cart = store.cart();
    println!("\nCarrinho final:");
    for item in &cart.items {
        println!(
            "  {} x{} - {}",
            item.name,
            item.qty,
            store.format_currency(item.line_total())
        );
    }
    let totals = store.totals();
    println!("Subtotal: {}", store.format_currency(totals.subtotal));
    println!("Total:    {}", store.format_currency(totals.total));

    Ok(())
}

async fn run_checkout(pix: bool) -> Result<()> {
    let mut store = CartStore::new(MemoryStore::new(), demo_catalog());
    store.add_item("tenis-city-runner");
    store.add_item("oculos-aviador-classic");

    let totals = store.totals();
    println!("Fechando pedido de {}", store.format_currency(totals.total));

    let form = if pix {
        let code = generate_pix_code(totals.total);
        let mut clipboard = EchoClipboard;
        if let Err(error) = clipboard.copy(&code) {
            // A clipboard failure is a passing notice, never a blocker.
            println!("Não foi possível copiar o código: {error}");
        }
        PaymentForm::pix()
    } else {
        PaymentForm::card(
            PaymentMethod::Credit,
            "Ana Souza",
            "4539 1488 0343 6467",
            "12/99",
            "123",
        )
    };

    let report = validate_form(&form);
    if !report.is_valid() {
        for error in &report.errors {
            println!("  campo {}: {}", error.field.as_str(), error.message);
        }
        anyhow::bail!("formulário de pagamento inválido");
    }

    let mut simulator = PaymentSimulator::new(Duration::from_millis(400));
    println!("[{}]", simulator.state().button_label());

    let confirmation = simulator.submit(&mut store, &form).await?;

    println!("[{}]", simulator.state().button_label());
    println!(
        "Pedido #{} confirmado via {} - carrinho com {} itens",
        confirmation.order_id,
        confirmation.method.display_name(),
        store.item_count()
    );

    Ok(())
}

/// Clipboard adapter that echoes instead of touching a real clipboard.
struct EchoClipboard;

impl Clipboard for EchoClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        println!("Código PIX copiado: {text}");
        Ok(())
    }
}
