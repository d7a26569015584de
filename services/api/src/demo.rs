use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::Args;
use skrotbil::coverage::{CoverageService, RegionId};
use skrotbil::dispatch::{
    DispatchService, DriverId, IntakeSubmission, PickupStatus, PickupStatusService,
};
use skrotbil::error::AppError;
use skrotbil::messaging::{SmsGateway, SmsMessage, SmsTemplate};
use skrotbil::pricing::{
    Collection, DistanceRuleDraft, FuelType, PartsDeclaration, PricingService, QuoteOutcome,
    QuoteRequest, VehicleProfile,
};
use skrotbil::tenant::TenantId;

use crate::infra::{
    load_register, parse_date, parse_fuel, InMemoryCoverageStore, InMemoryDispatchRepository,
    InMemoryPricingRepository, RecordingSmsGateway,
};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Tenant to price against
    #[arg(long, default_value = "yard-demo")]
    pub(crate) tenant: String,
    /// Vehicle age in years
    #[arg(long)]
    pub(crate) age_years: f64,
    /// Vehicle model year
    #[arg(long)]
    pub(crate) model_year: i32,
    /// Pickup distance in km; omit for a customer drop-off
    #[arg(long)]
    pub(crate) pickup_km: Option<f64>,
    /// Treat the drop-off as incomplete (ignored for pickups)
    #[arg(long)]
    pub(crate) incomplete: bool,
    /// Fuel type: gasoline, ethanol, electric, or other
    #[arg(long, default_value = "gasoline", value_parser = parse_fuel)]
    pub(crate) fuel: FuelType,
    /// Engine/transmission/catalytic converter still present
    #[arg(long)]
    pub(crate) drivetrain: bool,
    /// Battery/wheels/completeness bonus applies
    #[arg(long)]
    pub(crate) accessories: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for offers and scheduling (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

/// Demo tenants run against an in-memory store seeded with a three-tier
/// distance rule table and a summer campaign offer.
fn seeded_pricing(tenant: &TenantId) -> Result<PricingService<InMemoryPricingRepository>, AppError> {
    let repository = Arc::new(InMemoryPricingRepository::default());
    repository.seed_offers(tenant);
    let service = PricingService::new(repository);

    for (min, max, deduction) in [
        (0.0, Some(20.0), -250),
        (20.0, Some(50.0), -500),
        (50.0, None, -1000),
    ] {
        service.create_rule(DistanceRuleDraft {
            tenant_id: tenant.clone(),
            min_distance_km: min,
            max_distance_km: max,
            deduction_sek: deduction,
        })?;
    }

    Ok(service)
}

fn print_outcome(outcome: &QuoteOutcome) {
    for component in &outcome.components {
        println!("  {:>8} SEK  {}", component.amount_sek, component.notes);
    }
    println!("  total: {} SEK", outcome.total_sek);
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let tenant = TenantId(args.tenant);
    let service = seeded_pricing(&tenant)?;

    let collection = match args.pickup_km {
        Some(distance_km) => Collection::Pickup { distance_km },
        None => Collection::DropOff {
            complete: !args.incomplete,
        },
    };
    let request = QuoteRequest {
        tenant_id: tenant,
        vehicle: VehicleProfile {
            model_year: args.model_year,
            age_years: args.age_years,
            fuel: args.fuel,
        },
        collection,
        parts: PartsDeclaration {
            drivetrain: args.drivetrain,
            accessories: args.accessories,
        },
    };

    let outcome = service.quote(&request)?;
    println!("Quote breakdown");
    print_outcome(&outcome);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let tenant = TenantId("yard-demo".to_string());

    println!("Scrap pickup operations demo ({today})");

    println!("\nPricing");
    let pricing = seeded_pricing(&tenant)?;
    let pickup = QuoteRequest {
        tenant_id: tenant.clone(),
        vehicle: VehicleProfile {
            model_year: 2012,
            age_years: 14.0,
            fuel: FuelType::Gasoline,
        },
        collection: Collection::Pickup { distance_km: 35.0 },
        parts: PartsDeclaration {
            drivetrain: true,
            accessories: false,
        },
    };
    print_outcome(&pricing.quote(&pickup)?);

    let offers = pricing.offers(&tenant, today)?;
    println!("\nActive offers on {today}: {}", offers.len());
    for offer in &offers {
        println!("  {} ({} SEK)", offer.name, offer.amount_sek);
    }

    println!("\nCoverage");
    let register = Arc::new(load_register()?);
    let coverage = CoverageService::new(Arc::new(InMemoryCoverageStore::default()));
    let skane = register
        .region(&RegionId("skåne-län".to_string()))
        .cloned();
    if let Some(region) = skane {
        let selection = coverage.select_region(&tenant, &region)?;
        let status = coverage.region_status(&tenant, &region)?;
        println!(
            "  selected {} codes in {}; region is now {}",
            selection.added,
            region.name,
            status.level().label()
        );
    }

    println!("\nDispatch");
    let dispatch = DispatchService::new(Arc::new(InMemoryDispatchRepository::default()));
    let sms = RecordingSmsGateway::default();
    let order = dispatch.intake(
        &tenant,
        IntakeSubmission {
            registration: "ABC123".to_string(),
            owner_name: "Anna Andersson".to_string(),
            phone: "+46701234567".to_string(),
            postal_code: "21115".to_string(),
            scheduled_date: Some(today),
        },
    )?;
    println!("  order {} created as {}", order.id.0, order.status.label());

    let assigned = dispatch.assign_driver(&order.id, DriverId("driver-7".to_string()))?;
    println!("  driver assigned, order is {}", assigned.status.label());
    dispatch.transition(&order.id, PickupStatus::InProgress)?;
    let done = dispatch.transition(&order.id, PickupStatus::Completed)?;
    println!("  pickup finished as {}", done.status.label());

    if let Some(template) = SmsTemplate::standard_set()
        .into_iter()
        .find(|template| template.key == "pickup_scheduled")
    {
        let mut bindings = BTreeMap::new();
        bindings.insert("name".to_string(), "Anna".to_string());
        bindings.insert("registration".to_string(), "ABC123".to_string());
        bindings.insert("date".to_string(), today.to_string());
        bindings.insert("yard".to_string(), "Demo Skrot AB".to_string());
        let body = template.render(&bindings)?;
        sms.send(SmsMessage {
            recipient: "+46701234567".to_string(),
            body,
        })?;
    }
    for message in sms.messages() {
        println!("  sms to {}: {}", message.recipient, message.body);
    }

    Ok(())
}
