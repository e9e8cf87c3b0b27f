//! Stockdesk command line entry point.
//!
//! Thin presentation layer over the library: runs one operation, prints the
//! resulting notice to stdout and logs to stderr.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use stockdesk::client::{AsyncStoreClient, AsyncStoreClientImpl};
use stockdesk::notice::{
    created_notice, join_notice, membership_error_notice, product_deleted_notice,
    product_error_notice, product_saved_notice, validation_notice, Notice, Severity,
};
use stockdesk::repositories::{
    OrganizationRepository, ProductRepository, ProfileRepository, StoreOrganizationRepository,
    StoreProductRepository, StoreProfileRepository,
};
use stockdesk::{
    suggest_correction, CompanyResolver, Config, EmailValidator, MembershipService,
    MembershipServiceImpl, Metrics, ProductError, ProductForm, ProductService, ProductServiceImpl,
    StoreClient, VerificationClient, ZeroBounceVerifier,
};
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stockdesk", version, about = "Email validation, company membership and products")]
struct Cli {
    /// User id to attribute membership and product actions to
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate an email address
    Validate { email: String },
    /// Suggest a correction for a mistyped email domain
    Suggest { email: String },
    /// Look up an organization by its join code
    FindCompany { code: String },
    /// Join the organization with the given code
    Join { code: String },
    /// Create an organization and join it
    CreateCompany { name: String },
    /// Show the user's current organization
    Whoami,
    /// Manage the user's products
    #[command(subcommand)]
    Products(ProductCommand),
}

#[derive(Subcommand)]
enum ProductCommand {
    /// List products, newest first, optionally filtered
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a product
    Add(ProductFields),
    /// Edit a product; omitted fields keep their current value
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Args)]
struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    model: Option<String>,
    /// Ordered quantity
    #[arg(long)]
    stock: Option<String>,
    /// Produced quantity
    #[arg(long)]
    produced: Option<String>,
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    order_number: Option<String>,
    #[arg(long)]
    brand: Option<String>,
    #[arg(long)]
    fabric_number: Option<String>,
    /// ordered, arrived, cutting or ready
    #[arg(long)]
    fabric_status: Option<String>,
}

impl ProductFields {
    /// Overlay the given fields onto a form.
    fn apply_to(self, mut form: ProductForm) -> ProductForm {
        let fields = [
            (self.name, &mut form.name),
            (self.model, &mut form.model),
            (self.stock, &mut form.stock_quantity),
            (self.produced, &mut form.min_stock_level),
            (self.color, &mut form.color),
            (self.order_number, &mut form.order_number),
            (self.brand, &mut form.ordering_brand),
            (self.fabric_number, &mut form.fabric_number),
            (self.fabric_status, &mut form.fabric_status),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form
    }
}

fn print_notice(notice: &Notice) {
    let marker = match notice.severity {
        Severity::Success => "✓",
        Severity::Info => "i",
        Severity::Error => "✗",
    };
    println!("{} {}", marker, notice);
}

struct StoreRepositories {
    organizations: Arc<dyn OrganizationRepository>,
    profiles: Arc<dyn ProfileRepository>,
    products: Arc<dyn ProductRepository>,
}

fn store_repositories(config: &Config, metrics: &Metrics) -> StoreRepositories {
    let sync_client = StoreClient::new(config).with_metrics(metrics.clone());
    let client = Arc::new(AsyncStoreClientImpl::new(sync_client)) as Arc<dyn AsyncStoreClient>;

    StoreRepositories {
        organizations: Arc::new(StoreOrganizationRepository::new(client.clone())),
        profiles: Arc::new(StoreProfileRepository::new(client.clone())),
        products: Arc::new(StoreProductRepository::new(client)),
    }
}

fn print_product_error(e: ProductError) -> anyhow::Error {
    error!("Product operation failed: {}", e);
    print_notice(&product_error_notice(&e));
    e.into()
}

async fn run_products(
    command: ProductCommand,
    user: Option<&str>,
    service: &ProductServiceImpl,
) -> Result<()> {
    match command {
        ProductCommand::List { search } => {
            let products = service
                .search(user, search.as_deref().unwrap_or_default())
                .await
                .map_err(print_product_error)?;
            if products.is_empty() {
                println!("No products yet.");
            }
            for p in products {
                println!(
                    "{}  {}  model={}  brand={}  ordered={}  produced={}  fabric={}",
                    p.id,
                    p.name,
                    p.model.as_deref().unwrap_or("-"),
                    p.ordering_brand.as_deref().unwrap_or("-"),
                    p.stock_quantity.unwrap_or(0),
                    p.min_stock_level.unwrap_or(0),
                    p.fabric_status.map(|s| s.keyword()).unwrap_or("-"),
                );
            }
        }
        ProductCommand::Add(fields) => {
            let form = fields.apply_to(ProductForm::default());
            let product = service
                .save(user, &form, None)
                .await
                .map_err(print_product_error)?;
            print_notice(&product_saved_notice(&product, true));
        }
        ProductCommand::Update { id, fields } => {
            let existing = service
                .list_for_user(user)
                .await
                .map_err(print_product_error)?
                .into_iter()
                .find(|p| p.id == id)
                .ok_or_else(|| anyhow::anyhow!("No product with id {}", id))?;

            let form = fields.apply_to(ProductForm::from(&existing));
            let product = service
                .save(user, &form, Some(&existing))
                .await
                .map_err(print_product_error)?;
            print_notice(&product_saved_notice(&product, false));
        }
        ProductCommand::Delete { id } => {
            service.delete(user, &id).await.map_err(print_product_error)?;
            print_notice(&product_deleted_notice());
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Config::verification_from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let metrics = Metrics::new();
    let result = run(cli, settings, &metrics).await;
    debug!("Metrics: {}", metrics.summary());
    result
}

async fn run(cli: Cli, settings: Config, metrics: &Metrics) -> Result<()> {
    let user = cli.user.as_deref();

    match cli.command {
        Command::Validate { email } => {
            let verifier = Arc::new(ZeroBounceVerifier::new(VerificationClient::new(&settings)));
            let validator = EmailValidator::new(verifier).with_metrics(metrics.clone());

            let result = validator
                .validate(&email, settings.verification_api_key())
                .await;
            info!("Validation status for {}: {}", email, result.status);
            print_notice(&validation_notice(&result));
        }
        Command::Suggest { email } => match suggest_correction(&email) {
            Some(suggestion) => println!("{}", suggestion),
            None => println!("No suggestion for {}", email),
        },
        Command::FindCompany { code } => {
            let store = store_repositories(&Config::from_env()?, metrics);
            let resolver = CompanyResolver::new(store.organizations);

            match resolver.find_by_code(&code).await? {
                Some(org) => println!("{} ({}) code {}", org.name, org.id, org.code),
                None => println!("No organization found with code \"{}\"", code.trim()),
            }
        }
        Command::Join { code } => {
            let store = store_repositories(&Config::from_env()?, metrics);
            let service = MembershipServiceImpl::new(store.organizations, store.profiles);

            match service.join(user, &code).await {
                Ok(outcome) => print_notice(&join_notice(&outcome, &code)),
                Err(e) => {
                    error!("Join failed: {}", e);
                    print_notice(&membership_error_notice(&e));
                    return Err(e.into());
                }
            }
        }
        Command::CreateCompany { name } => {
            let store = store_repositories(&Config::from_env()?, metrics);
            let service = MembershipServiceImpl::new(store.organizations, store.profiles);

            match service.create_organization(user, &name).await {
                Ok(org) => print_notice(&created_notice(&org)),
                Err(e) => {
                    error!("Organization creation failed: {}", e);
                    print_notice(&membership_error_notice(&e));
                    return Err(e.into());
                }
            }
        }
        Command::Whoami => {
            let store = store_repositories(&Config::from_env()?, metrics);
            let service = MembershipServiceImpl::new(store.organizations, store.profiles);

            let membership = service.current_membership(user).await?;
            match membership.organization {
                Some(org) => println!(
                    "{} belongs to {} (code {})",
                    membership.profile.id, org.name, org.code
                ),
                None => println!("{} does not belong to an organization", membership.profile.id),
            }
        }
        Command::Products(command) => {
            let store = store_repositories(&Config::from_env()?, metrics);
            let service = ProductServiceImpl::new(store.products);
            run_products(command, user, &service).await?;
        }
    }

    Ok(())
}
