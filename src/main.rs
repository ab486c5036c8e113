//! Trinity CLI - Entry Point
//!
//! Command-line front end for the Trinity storefront API: log in, inspect
//! the session, and browse the staff/customer resources. Staff-only
//! commands run through the same route guard the web views use.

use anyhow::bail;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use trinity_client::{
    ApiClient, Config, FileSessionStore, GuardDecision, Role, RouteGuard,
};

#[derive(Parser)]
#[command(name = "trinity", version, about = "Trinity storefront API client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and persist the session
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the authenticated identity
    Whoami,
    /// List catalog products
    Products,
    /// List customers (staff only)
    Customers,
    /// List invoices (staff only)
    Invoices,
    /// Show the KPI report (staff only)
    Reports {
        /// Trailing window in days
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    let log_level = std::env::var("RUST_LOG")
        .map(|s| match s.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        })
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let session = Arc::new(FileSessionStore::open(&config.session_path));
    let client = ApiClient::from_config(&config, session)?;

    match cli.command {
        Command::Login { username, password } => {
            client.auth().login(&username, &password).await?;
            println!("Logged in as {}", username);
        }

        Command::Logout => {
            client.auth().logout();
            println!("Session cleared");
        }

        Command::Whoami => {
            require(&client, &[Role::Staff, Role::Customer]).await?;
            let identity = client.auth().me().await?;
            let role = if identity.user.is_staff { "staff" } else { "customer" };
            println!("{} ({})", identity.user.username, role);
            if let Some(customer) = identity.customer {
                println!("{} {} <{}>", customer.first_name, customer.last_name, customer.email);
            }
        }

        Command::Products => {
            require(&client, &[Role::Staff, Role::Customer]).await?;
            for product in client.products().list().await? {
                println!(
                    "#{:<5} {:<40} {:>8.2}  stock: {}",
                    product.id, product.name, product.price, product.quantity_in_stock
                );
            }
        }

        Command::Customers => {
            require(&client, &[Role::Staff]).await?;
            for customer in client.customers().list().await? {
                println!(
                    "#{:<5} {} {} <{}>",
                    customer.id, customer.first_name, customer.last_name, customer.email
                );
            }
        }

        Command::Invoices => {
            require(&client, &[Role::Staff]).await?;
            for invoice in client.invoices().list().await? {
                println!(
                    "{:<12} customer #{:<5} {:>10.2}  {:?}",
                    invoice.invoice_number, invoice.customer, invoice.total_amount, invoice.status
                );
            }
        }

        Command::Reports { days } => {
            require(&client, &[Role::Staff]).await?;
            let report = client.reports().kpis(days).await?;
            println!(
                "{} .. {} ({} days)",
                report.period.start_date, report.period.end_date, report.period.days
            );
            println!("revenue:      {:>12.2}", report.kpis.total_revenue);
            println!("orders:       {:>12}", report.kpis.total_orders);
            println!("avg order:    {:>12.2}", report.kpis.average_order_value);
            println!("customers:    {:>12}", report.kpis.total_customers);
            for alert in report.low_stock_alerts {
                println!("low stock: {} ({} left)", alert.name, alert.quantity_in_stock);
            }
        }
    }

    Ok(())
}

/// Run the route guard before a protected command
async fn require(client: &ApiClient, allow: &[Role]) -> anyhow::Result<()> {
    match RouteGuard::new(client, allow).evaluate().await {
        GuardDecision::Render(_) => Ok(()),
        GuardDecision::Redirect(trinity_client::LOGIN_ROUTE) => {
            bail!("Not logged in - run `trinity login <username>` first")
        }
        GuardDecision::Redirect(route) => {
            bail!("This command is not available for your role (see {})", route)
        }
    }
}
