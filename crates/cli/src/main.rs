//! EmberMart CLI - Command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Authentication
//! embermart login -e dana@example.com -p <password>
//! embermart register -n "Dana Reed" -e dana@example.com -p <password>
//! embermart logout
//!
//! # Catalog
//! embermart products list --category extinguishers --available
//! embermart products show 42
//!
//! # Cart
//! embermart cart add 42 --quantity 2
//! embermart cart set 42 5
//! embermart cart remove 42
//! embermart cart show
//! embermart cart clear
//!
//! # Checkout & orders
//! embermart checkout --address "7 Elm St" --payment cash -o invoice.pdf
//! embermart orders
//! embermart invoice -o draft.pdf
//!
//! # Service requests & notifications
//! embermart requests submit -s "Annual inspection" -d "..." -t extinguisher
//! embermart requests list
//! embermart notifications list
//! embermart notifications read 7
//! ```
//!
//! # Environment Variables
//!
//! See `embermart_client::config` - `EMBERMART_API_BASE_URL` is required.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Listing output is the product of this binary.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use embermart_client::{ApiClient, CartStore, ClientConfig, ClientError, LocalStore, SessionStore};

mod commands;

#[derive(Parser)]
#[command(name = "embermart")]
#[command(author, version, about = "EmberMart command-line storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Log out and clear local session + cart
    Logout,
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Submit the cart as an order and save the invoice PDF
    Checkout {
        /// Recipient name (defaults to the logged-in user's name)
        #[arg(long)]
        name: Option<String>,

        /// Contact phone (defaults to the profile phone)
        #[arg(long)]
        phone: Option<String>,

        /// Shipping address (defaults to the profile address)
        #[arg(long)]
        address: Option<String>,

        /// Payment method: cash, online, or bank
        #[arg(long, default_value = "cash")]
        payment: String,

        /// Where to write the invoice PDF
        #[arg(short, long, default_value = "invoice.pdf")]
        output: String,
    },
    /// List your past orders
    Orders,
    /// Generate a draft invoice PDF from the current cart
    Invoice {
        /// Where to write the invoice PDF
        #[arg(short, long, default_value = "draft-invoice.pdf")]
        output: String,

        /// Payment method to print: cash, online, or bank
        #[arg(long, default_value = "cash")]
        payment: String,
    },
    /// Submit and list service requests
    Requests {
        #[command(subcommand)]
        action: RequestsAction,
    },
    /// List and mark notifications
    Notifications {
        #[command(subcommand)]
        action: NotificationsAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products with optional filters
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Only show products available for sale
        #[arg(short, long)]
        available: bool,

        /// Page number
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        id: i64,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (0 removes the line)
    Set {
        /// Product ID
        id: i64,

        /// New quantity
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum RequestsAction {
    /// Submit a service request
    Submit {
        /// Short subject line
        #[arg(short, long)]
        subject: String,

        /// Detailed description
        #[arg(short, long)]
        description: String,

        /// Equipment type (e.g., extinguisher, alarm, sprinkler)
        #[arg(short = 't', long)]
        equipment_type: String,
    },
    /// List your service requests
    List,
}

#[derive(Subcommand)]
enum NotificationsAction {
    /// List notifications
    List,
    /// Mark one notification read
    Read {
        /// Notification ID
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        // Client errors carry a short user-facing message; everything else
        // is logged as-is.
        if let Some(client_err) = e.downcast_ref::<ClientError>() {
            tracing::error!("{}", client_err.user_message());
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let store = LocalStore::open(&config.data_dir)?;
    let session = SessionStore::new(store.clone());
    let api = ApiClient::new(&config, session)?;
    let mut cart = CartStore::load(store);

    // Navigation-badge equivalent: echo the cart summary after any mutation.
    cart.subscribe(|snapshot| {
        println!(
            "Cart: {} item(s), total {}",
            snapshot.item_count(),
            snapshot.total()
        );
    });

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&api, &email, &password).await?,
        Commands::Register {
            name,
            email,
            password,
            phone,
        } => commands::auth::register(&api, &name, &email, &password, phone).await?,
        Commands::Logout => commands::auth::logout(&api, &mut cart)?,
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                available,
                page,
            } => commands::products::list(&api, category, available, page).await?,
            ProductsAction::Show { id } => commands::products::show(&api, id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&cart),
            CartAction::Add { id, quantity } => {
                commands::cart::add(&api, &mut cart, id, quantity).await?;
            }
            CartAction::Set { id, quantity } => {
                commands::cart::set_quantity(&api, &mut cart, id, quantity).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut cart, id),
            CartAction::Clear => commands::cart::clear(&mut cart),
        },
        Commands::Checkout {
            name,
            phone,
            address,
            payment,
            output,
        } => {
            commands::orders::checkout(&api, &mut cart, name, phone, address, &payment, &output)
                .await?;
        }
        Commands::Orders => commands::orders::list(&api).await?,
        Commands::Invoice { output, payment } => {
            commands::orders::draft_invoice(&api, &cart, &payment, &output)?;
        }
        Commands::Requests { action } => match action {
            RequestsAction::Submit {
                subject,
                description,
                equipment_type,
            } => commands::requests::submit(&api, &subject, &description, &equipment_type).await?,
            RequestsAction::List => commands::requests::list(&api).await?,
        },
        Commands::Notifications { action } => match action {
            NotificationsAction::List => commands::notifications::list(&api).await?,
            NotificationsAction::Read { id } => commands::notifications::read(&api, id).await?,
        },
    }
    Ok(())
}
