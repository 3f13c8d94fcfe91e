use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;

use shopkeeper::application::errors::AdminError;
use shopkeeper::application::routes::{self, Route, RouteOutcome};
use shopkeeper::application::services::{CatalogService, SessionManager};
use shopkeeper::application::state::CatalogStore;
use shopkeeper::application::validation::ProductDraft;
use shopkeeper::application::view::{self, DerivedView, ListQuery, SortOrder};
use shopkeeper::domain::entities::{Activity, Product};
use shopkeeper::infrastructure::config::Config;
use shopkeeper::infrastructure::gateway::HttpCatalogGateway;
use shopkeeper::infrastructure::storage::JsonSlotStore;

#[derive(Parser)]
#[command(name = "shopkeeper")]
#[command(about = "A product catalog admin console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive admin console
    Console,
    /// List products (filter, sort and page act on the derived view)
    List {
        #[arg(long, default_value = "")]
        filter: String,
        /// Sort by price descending instead of ascending
        #[arg(long)]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one product
    Show { id: u64 },
    /// Add a product
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Image URL; the last uploaded image is used when omitted
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
        #[arg(long, default_value_t = 0)]
        count: u64,
    },
    /// Replace the fields of an existing product
    Update {
        id: u64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
        #[arg(long, default_value_t = 0)]
        count: u64,
    },
    /// Delete a product
    Delete { id: u64 },
    /// Store a local image file as the next upload
    Upload { path: std::path::PathBuf },
    /// Merge the local catalog with the remote one
    Sync,
    /// Generate default config
    InitConfig,
    /// Show version
    Version,
}

type Service = CatalogService<JsonSlotStore, HttpCatalogGateway>;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        }
    };

    if let Err(e) = run(cli.command, config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: Config) -> Result<(), AdminError> {
    match command {
        Commands::Version => {
            println!("shopkeeper v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => {
            let yaml = serde_yaml::to_string(&Config::default())
                .map_err(|e| AdminError::Internal(e.to_string()))?;
            println!("{}", yaml);
            Ok(())
        }
        command => {
            let catalog = build_service(&config).await?;
            let result = dispatch(command, &catalog).await;
            // drain best-effort mirror calls before the runtime goes away
            catalog.flush_remote().await;
            result
        }
    }
}

async fn build_service(config: &Config) -> Result<Service, AdminError> {
    let slots = Arc::new(JsonSlotStore::new(
        &config.storage.directory,
        &config.storage.catalog_slot,
        &config.storage.image_slot,
    ));
    slots.init().await?;
    let gateway = Arc::new(HttpCatalogGateway::new(&config.gateway.base_url));
    let store = Arc::new(CatalogStore::new());
    Ok(Service::new(slots, gateway, store))
}

async fn dispatch(command: Commands, catalog: &Service) -> Result<(), AdminError> {
    match command {
        Commands::Console => console(catalog).await,
        Commands::List { filter, desc, page } => {
            catalog.sync().await?;
            let mut query = ListQuery::new();
            query.set_filter(filter);
            if desc {
                query.set_sort(SortOrder::Descending);
            }
            query.set_page(page);
            print_view(&view::compute(&catalog.store().snapshot(), &query));
            Ok(())
        }
        Commands::Show { id } => {
            match catalog.get_product(id).await {
                Some(product) => print_product(&product),
                None => print_not_found(id),
            }
            Ok(())
        }
        Commands::Add {
            title,
            price,
            description,
            category,
            image,
            rate,
            count,
        } => {
            let draft = ProductDraft {
                title,
                price,
                description,
                category,
                image,
                rate,
                count,
            };
            match catalog.add_product(draft).await {
                Ok(product) => println!("created {}", product),
                Err(AdminError::Validation(errors)) => print_validation(&errors),
                Err(e) => return Err(e),
            }
            Ok(())
        }
        Commands::Update {
            id,
            title,
            price,
            description,
            category,
            image,
            rate,
            count,
        } => {
            // replace-by-id only touches the local catalog, so the
            // pre-check must not consult the remote side
            if catalog.find_local(id).await.is_none() {
                print_not_found(id);
                return Ok(());
            }
            let draft = ProductDraft {
                title,
                price,
                description,
                category,
                image,
                rate,
                count,
            };
            match catalog.update_product(id, draft).await {
                Ok(product) => println!("updated {}", product),
                Err(AdminError::Validation(errors)) => print_validation(&errors),
                Err(e) => return Err(e),
            }
            Ok(())
        }
        Commands::Delete { id } => {
            if catalog.find_local(id).await.is_none() {
                print_not_found(id);
                return Ok(());
            }
            catalog.delete_product(id).await?;
            println!("deleted product {}", id);
            Ok(())
        }
        Commands::Upload { path } => {
            let data_url = catalog.store_image(&path).await?;
            println!("stored image ({} bytes as data URL)", data_url.len());
            Ok(())
        }
        Commands::Sync => {
            let merged = catalog.sync().await?;
            println!("catalog synced: {} products", merged.len());
            Ok(())
        }
        // handled in run() before service wiring
        Commands::Version | Commands::InitConfig => Ok(()),
    }
}

/// The interactive console: a login gate, then a command loop. Every line
/// of input counts as activity and re-arms the idle timer; an expired
/// session drops the user back to the login gate's exit.
async fn console(catalog: &Service) -> Result<(), AdminError> {
    let sessions = SessionManager::new();

    loop {
        let email = prompt("email: ")?;
        if email.is_empty() {
            return Ok(());
        }
        let password = prompt("password: ")?;
        let confirm = prompt("confirm password: ")?;
        match sessions.login(&email, &password, &confirm).await {
            Ok(session) => {
                println!("logged in as {}", session.user);
                break;
            }
            Err(AdminError::Validation(errors)) => print_validation(&errors),
            Err(e) => return Err(e),
        }
    }

    // view-mount: reconcile local and remote once
    catalog.sync().await?;
    let mut query = ListQuery::new();
    println!(
        "commands: list, filter <text>, sort asc|desc, page <n>, show <id>, delete <id>, open <path>, logout, quit"
    );

    loop {
        let line = prompt("> ")?;
        sessions.record_activity(Activity::KeyPress).await;
        if !sessions.is_logged_in().await {
            println!("session expired, please log in again");
            return Ok(());
        }

        // the argument is the whole remainder, so filter text may contain spaces
        let (cmd, rest) = split_command(&line);
        match (cmd, rest) {
            ("list", _) | ("", _) => {
                print_view(&view::compute(&catalog.store().snapshot(), &query));
            }
            ("filter", text) => {
                query.set_filter(text);
                print_view(&view::compute(&catalog.store().snapshot(), &query));
            }
            ("sort", "desc") => {
                query.set_sort(SortOrder::Descending);
                print_view(&view::compute(&catalog.store().snapshot(), &query));
            }
            ("sort", _) => {
                query.set_sort(SortOrder::Ascending);
                print_view(&view::compute(&catalog.store().snapshot(), &query));
            }
            ("page", n) => {
                query.set_page(n.parse().unwrap_or(1));
                print_view(&view::compute(&catalog.store().snapshot(), &query));
            }
            ("show", id) => match id.parse() {
                Ok(id) => match catalog.get_product(id).await {
                    Some(product) => print_product(&product),
                    None => print_not_found(id),
                },
                Err(_) => println!("usage: show <id>"),
            },
            ("delete", id) => match id.parse() {
                Ok(id) => {
                    if catalog.find_local(id).await.is_none() {
                        print_not_found(id);
                    } else {
                        catalog.delete_product(id).await?;
                        println!("deleted product {}", id);
                    }
                }
                Err(_) => println!("usage: delete <id>"),
            },
            ("open", path) => {
                let session = sessions.current().await;
                match routes::guard(Route::parse(path), session.as_ref()) {
                    RouteOutcome::Allow(route) => println!("-> {:?}", route),
                    RouteOutcome::RedirectToLogin => println!("-> redirect to /login"),
                }
            }
            ("logout", _) => {
                sessions.logout().await;
                println!("logged out");
                return Ok(());
            }
            ("quit", _) | ("exit", _) => {
                sessions.logout().await;
                return Ok(());
            }
            (other, _) => println!("unknown command: {}", other),
        }
    }
}

/// Split a console line into the command word and the rest of the line
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    }
}

fn prompt(label: &str) -> Result<String, AdminError> {
    print!("{}", label);
    std::io::stdout()
        .flush()
        .map_err(|e| AdminError::Internal(e.to_string()))?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| AdminError::Internal(e.to_string()))?;
    Ok(line.trim().to_string())
}

fn print_view(view: &DerivedView) {
    if view.total_items == 0 {
        println!("no products match");
        return;
    }
    for product in &view.items {
        println!("  {}", product);
    }
    let buttons: Vec<String> = view
        .page_window
        .iter()
        .map(|p| {
            if *p == view.page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    println!(
        "page {}/{} ({} products)  {}",
        view.page,
        view.total_pages,
        view.total_items,
        buttons.join(" ")
    );
}

fn print_product(product: &Product) {
    println!("{}", product);
    if !product.description.is_empty() {
        println!("  {}", product.description);
    }
    if !product.category.is_empty() {
        println!("  category: {}", product.category);
    }
    println!(
        "  rating: {}* ({} reviews)",
        product.rating.rate, product.rating.count
    );
}

fn print_not_found(id: u64) {
    println!("product {} was not found", id);
}

fn print_validation(errors: &[shopkeeper::application::errors::ValidationError]) {
    for error in errors {
        println!("  ! {}", error);
    }
}
