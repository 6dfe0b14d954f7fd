//! CLI command implementations

use anyhow::Result;
use dialoguer::{Input, Password};
use std::fs;
use std::time::Duration;

use crate::api;
use crate::cli::{
    error, info, print_notifications, print_products, print_profile, print_sales_summary,
    print_stats, print_stores, success, warn, OutputFormat,
};
use crate::client::{AuthMode, FileStorage, HttpTransport, OfflineMode, SessionManager};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::demo::{self, DailyStats, InventoryNotification, Product, SalesPoint, Store};
use crate::error::Error;

/// Write a default storeintel.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Run 'storeintel serve' to start the API, then 'storeintel login'");

    Ok(())
}

/// Start the HTTP API server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config_or_default()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server on http://{}:{}", host, port));
    api::run_server(config, &host, port).await?;
    Ok(())
}

/// Sign in and persist the session
pub async fn login(email: Option<String>, password: Option<String>, offline: bool) -> Result<()> {
    let config = config::load_config_or_default()?;
    login_with(&config, email, password, offline).await
}

async fn login_with(
    config: &Config,
    email: Option<String>,
    password: Option<String>,
    offline: bool,
) -> Result<()> {
    let mut manager = session_manager(config, offline || config.client.offline_fallback)?;

    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    match manager.login(&email, &password).await {
        Ok(mode) => {
            if let Some(profile) = manager.profile() {
                success(&format!("Signed in as {} {}", profile.avatar, profile.name));
            }
            if mode == AuthMode::Offline {
                warn("Offline mode: the server could not be reached, signed in with local demo credentials");
            }
            Ok(())
        }
        Err(Error::MissingCredentials) => {
            warn("Email and password are required");
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e).context("Login failed")),
    }
}

/// Sign out and clear the persisted session
pub async fn logout() -> Result<()> {
    let config = config::load_config_or_default()?;
    let mut manager = session_manager(&config, false)?;
    manager.logout()?;
    warn("Signed out");
    Ok(())
}

/// Show the signed-in user
pub async fn whoami(format: OutputFormat) -> Result<()> {
    let config = config::load_config_or_default()?;
    let mut manager = session_manager(&config, false)?;

    if !manager.restore()? {
        info("Not signed in. Run 'storeintel login'");
        return Ok(());
    }
    let Some(profile) = manager.profile() else {
        return Ok(());
    };

    match format {
        OutputFormat::Table => print_profile(profile),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(profile)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(profile)?),
    }

    Ok(())
}

/// Show the dashboard for the signed-in user
pub async fn dashboard() -> Result<()> {
    let config = config::load_config_or_default()?;
    let mut manager = session_manager(&config, false)?;

    if !manager.restore()? {
        error("Not signed in. Run 'storeintel login'");
        return Ok(());
    }
    let (Some(profile), Some(token)) = (manager.profile(), manager.token()) else {
        return Ok(());
    };

    print_profile(profile);

    let transport = http_transport(&config)?;
    let data = match fetch_dashboard(&transport, token).await {
        Ok(data) => data,
        Err(e) => {
            warn(&format!("Could not load live data ({}), showing demo data", e));
            DashboardData::demo()
        }
    };

    print_stats(&data.stats);
    println!();
    print_sales_summary(&data.sales_chart);
    println!();
    print_notifications(&data.notifications);
    println!();
    print_products(&data.products);
    if profile.is_unrestricted() {
        println!();
        print_stores(&data.stores);
    }

    Ok(())
}

/// Hash a password for a configured user
pub async fn hash_password(cost: u32) -> Result<()> {
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    println!("{}", bcrypt::hash(password, cost)?);
    Ok(())
}

/// Everything the dashboard command shows
struct DashboardData {
    stats: DailyStats,
    sales_chart: Vec<SalesPoint>,
    notifications: Vec<InventoryNotification>,
    products: Vec<Product>,
    stores: Vec<Store>,
}

impl DashboardData {
    fn demo() -> Self {
        Self {
            stats: demo::daily_stats(),
            sales_chart: demo::current_sales_chart(),
            notifications: demo::notifications(),
            products: demo::products(),
            stores: demo::stores(),
        }
    }
}

async fn fetch_dashboard(
    transport: &HttpTransport,
    token: &str,
) -> crate::error::Result<DashboardData> {
    Ok(DashboardData {
        stats: transport.get_json("/analytics/daily-stats", token).await?,
        sales_chart: transport.get_json("/analytics/sales-chart", token).await?,
        notifications: transport.get_json("/inventory/notifications", token).await?,
        products: transport.get_json("/products", token).await?,
        stores: transport.get_json("/stores", token).await?,
    })
}

fn http_transport(config: &Config) -> Result<HttpTransport> {
    Ok(HttpTransport::new(
        config.client.base_url.clone(),
        Duration::from_secs(config.client.timeout_secs),
    )?)
}

fn session_manager(
    config: &Config,
    allow_offline: bool,
) -> Result<SessionManager<FileStorage, HttpTransport>> {
    let storage = FileStorage::new(&config.client.session_file);
    let manager = SessionManager::new(storage, http_transport(config)?);

    if allow_offline {
        let offline = OfflineMode::new(config.client.offline_secret.as_bytes())?;
        return Ok(manager.with_offline_mode(offline));
    }
    Ok(manager)
}
