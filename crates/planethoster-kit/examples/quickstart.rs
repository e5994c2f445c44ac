//! Quickstart - Essential reseller operations
//!
//! Covers: connection test, account, availability, domain lookups, pricing
//!
//! Run: cargo run --example quickstart -- example.com
//!
//! Set environment variables first:
//!   PLANETHOSTER_API_KEY=...
//!   PLANETHOSTER_API_USER=...
//!
//! Nothing in this example modifies a domain; the registration payload at the
//! end is only printed.

use planethoster_kit::*;

// ============================================================================
// 1. Account
// ============================================================================

async fn account_example(reseller: &Reseller) -> Result<(), Error> {
    println!("=== Account ===\n");

    let connection = reseller.test_connection().await?;
    println!("Connection: {}", connection.message);

    let account = reseller.account_info().await?;
    println!(
        "Credit: {} {}, {} active domains, {} active orders",
        account.credit_remaining,
        account.credit_currency,
        account.num_active_domains,
        account.num_active_orders
    );

    Ok(())
}

// ============================================================================
// 2. Domain lookups
// ============================================================================

async fn domain_example(reseller: &Reseller, sld: &str, tld: &str) -> Result<(), Error> {
    println!("\n=== {sld}.{tld} ===\n");

    let availability = reseller.check_availability(sld, tld).await?;
    if availability.available {
        println!("Available");
        if availability.is_premium {
            println!(
                "Premium: register {}, renew {}",
                availability.premium_register_price, availability.premium_renew_price
            );
        }
        return Ok(());
    }

    // Lookups below only make sense for domains in the reseller account.
    match reseller.domain_info(sld, tld).await {
        Ok(info) => {
            println!("Order #{}, expires {}", info.order_id, info.expiry_date);
        }
        Err(Error::Api(err)) => {
            println!("Not in this account: {err}");
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    let contacts = reseller.contact_details(sld, tld).await?;
    if let Some(registrant) = contacts.by_type("registrant") {
        println!("Registrant: {} <{}>", registrant.name, registrant.email);
    }

    let nameservers = reseller.nameservers(sld, tld).await?;
    println!("Nameservers: {}", nameservers.hosts().join(", "));

    let lock = reseller.registrar_lock(sld, tld).await?;
    println!("Registrar lock: {}", lock.is_locked);

    match reseller.dns_records(sld, tld).await {
        Ok(zone) => {
            for record in &zone.records {
                println!(
                    "  {:<20} {:<6} {}",
                    record.hostname, record.record_type, record.address
                );
            }
        }
        Err(Error::Api(err)) => println!("No hosted zone: {err}"),
        Err(e) => return Err(e),
    }

    Ok(())
}

// ============================================================================
// 3. Pricing
// ============================================================================

async fn pricing_example(reseller: &Reseller, tld: &str) -> Result<(), Error> {
    println!("\n=== Pricing ===\n");

    let prices = reseller.tld_prices().await?;
    println!("{} TLDs offered", prices.tlds.len());

    if let Some(price) = prices.get(tld) {
        println!(
            ".{tld}: register {}, renew {}, transfer {}",
            price.register, price.renew, price.transfer
        );
    }

    Ok(())
}

// ============================================================================
// 4. Building a registration (not sent)
// ============================================================================

fn registration_example() {
    println!("\n=== Registration payload ===\n");

    let registrant = Contact {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        email: "jane@example.com".into(),
        address1: "123 Main St".into(),
        city: "Montreal".into(),
        postal_code: "H2X 1Y4".into(),
        state: "QC".into(),
        country_code: "CA".into(),
        phone: "+1.5145550100".into(),
        ..Default::default()
    };

    let registration = DomainRegistration::new(registrant, "ns1.example.net", "ns2.example.net")
        .id_protection(true);

    println!("valid: {}", registration.is_valid());
    for param in registration.to_params() {
        println!("  {param}");
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let domain = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "example.com".to_string());
    let (sld, tld) = domain
        .split_once('.')
        .ok_or("expected a domain like example.com")?;

    let reseller = Reseller::from_env()?;

    account_example(&reseller).await?;
    domain_example(&reseller, sld, tld).await?;
    pricing_example(&reseller, tld).await?;
    registration_example();

    Ok(())
}
