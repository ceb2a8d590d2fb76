use std::process::ExitCode;

use agroguru::{
    AppContext,
    api::models::{
        AiTipRequest, CertificationReport, CertificationRequest, ChatRequest, CropPriceRequest,
        CropRecommendRequest, NewListing, SatelliteInsightRequest, WeatherRequest,
    },
    auth::{inspect_token, require_auth, require_superuser},
    config::Config,
    error::{AppError, AppResult},
    session::Role,
    utils::Season,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "agroguru", version, about = "AgroGuru farming advisory client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with email and password
    Login {
        email: String,
        #[arg(long, env = "AGROGURU_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        name: String,
        email: String,
        #[arg(long, env = "AGROGURU_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in as the ephemeral superuser
    SuLogin {
        #[arg(long)]
        secret: Option<String>,
    },
    Logout,
    /// Show the current session
    Whoami {
        /// Re-fetch the profile from the server
        #[arg(long)]
        refresh: bool,
    },
    /// Crop recommendation for soil, season and location
    Recommend {
        #[arg(long, default_value = "")]
        soil: String,
        /// Kharif, Rabi or Zaid; defaults to the current season
        #[arg(long)]
        season: Option<Season>,
        #[arg(long)]
        location: String,
        /// Print only the recommended crop names
        #[arg(long)]
        crops_only: bool,
    },
    Weather {
        location: String,
    },
    Tips,
    /// Ask for AI farming tips
    Ask {
        question: String,
        #[arg(long)]
        language: Option<String>,
    },
    /// Talk to the farming chatbot
    Chat {
        message: String,
        #[arg(long)]
        language: Option<String>,
    },
    Prices {
        #[arg(long)]
        location: String,
        #[arg(long)]
        crop: String,
    },
    PopularCrops,
    Schemes,
    Dashboard,
    CropHealth,
    /// Satellite insight by location name or coordinates
    Insight {
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        location: Option<String>,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    #[command(subcommand)]
    Market(MarketCommand),
    #[command(subcommand)]
    Certify(CertifyCommand),
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Change a user's role with the admin secret
    SetRole {
        email: String,
        #[arg(long, value_parser = ["user", "superuser"])]
        role: String,
        #[arg(long)]
        secret: Option<String>,
    },
}

#[derive(Subcommand)]
enum MarketCommand {
    List,
    Show {
        id: i64,
    },
    Add {
        #[arg(long)]
        crop: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        location: String,
        #[arg(long)]
        contact: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
enum CertifyCommand {
    /// Check equipment certification
    Verify {
        #[arg(long, default_value = "")]
        id: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        brand: String,
        #[arg(long, default_value = "")]
        origin: String,
        #[arg(long, default_value = "")]
        compliance: String,
    },
    /// Report a suspicious product
    Report {
        #[arg(long, default_value = "")]
        product_id: String,
        #[arg(long, default_value = "")]
        crop: String,
        #[arg(long, default_value = "")]
        reason: String,
        #[arg(long, default_value = "")]
        details: String,
    },
    Reports,
}

#[derive(Subcommand)]
enum AdminCommand {
    VerifyCrop { id: i64 },
    DeleteCrop { id: i64 },
    VerifyEquipment { id: i64 },
    DeleteEquipment { id: i64 },
    Equipment,
}

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化日志，输出到 stderr，避免干扰 JSON 结果
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match Config::from_env().and_then(AppContext::from_config) {
        Ok(ctx) => run(&ctx, cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            if let AppError::Api { details, .. } = &e {
                for detail in details {
                    eprintln!("  - {}", detail);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(ctx: &AppContext, command: Command) -> AppResult<()> {
    let api = &ctx.api;
    match command {
        Command::Login { email, password } => print_json(&ctx.auth.login(&email, &password).await?),
        Command::Register {
            name,
            email,
            password,
        } => print_json(&ctx.auth.register(&name, &email, &password).await?),
        Command::SuLogin { secret } => {
            let secret = admin_secret(ctx, secret)?;
            print_json(&ctx.auth.superuser_login(&secret).await?)
        }
        Command::Logout => {
            ctx.auth.logout().await;
            print_json(&json!({ "success": true }))
        }
        Command::Whoami { refresh } => {
            if refresh {
                ctx.auth.refresh_profile().await?;
            }
            let session = ctx.session.snapshot();
            let claims = session.token.as_deref().and_then(inspect_token);
            print_json(&json!({
                "authenticated": session.is_authenticated(),
                "user": session.user,
                "expires_at": claims.as_ref().and_then(|c| c.expires_at()).map(|t| t.to_rfc3339()),
                "expired": claims.as_ref().map(|c| c.is_expired()),
            }))
        }
        Command::Recommend {
            soil,
            season,
            location,
            crops_only,
        } => {
            require_auth(&ctx.session)?;
            let season = season.unwrap_or_else(Season::current);
            let rec = api
                .recommend_crop(&CropRecommendRequest::new(&soil, season, &location))
                .await?;
            if crops_only {
                print_json(&rec.crop_names())
            } else {
                print_json(&json!({ "table": rec.parsed_table(), "raw": rec }))
            }
        }
        Command::Weather { location } => {
            require_auth(&ctx.session)?;
            print_json(&api.weather(&WeatherRequest::new(&location)).await?)
        }
        Command::Tips => {
            require_auth(&ctx.session)?;
            print_json(&api.tips().await?)
        }
        Command::Ask { question, language } => {
            require_auth(&ctx.session)?;
            let req = AiTipRequest::new(&question, language.as_deref());
            print_json(&api.ai_tip(&req).await?)
        }
        Command::Chat { message, language } => {
            require_auth(&ctx.session)?;
            let req = ChatRequest::new(&message, language.as_deref());
            print_json(&api.ask_chatbot(&req).await?)
        }
        Command::Prices { location, crop } => {
            require_auth(&ctx.session)?;
            print_json(&api.crop_prices(&CropPriceRequest::new(&location, &crop)).await?)
        }
        Command::PopularCrops => {
            require_auth(&ctx.session)?;
            print_json(&api.popular_crops().await?)
        }
        Command::Schemes => {
            require_auth(&ctx.session)?;
            print_json(&api.schemes().await?)
        }
        Command::Dashboard => {
            require_auth(&ctx.session)?;
            print_json(&api.dashboard().await?)
        }
        Command::CropHealth => {
            require_auth(&ctx.session)?;
            print_json(&api.crop_health().await?)
        }
        Command::Insight { location, lat, lon } => {
            require_auth(&ctx.session)?;
            let req = match (lat, lon) {
                (Some(lat), Some(lon)) => SatelliteInsightRequest::at_coordinates(lat, lon),
                _ => SatelliteInsightRequest::at_location(location.as_deref().unwrap_or_default()),
            };
            print_json(&api.satellite_insight(&req).await?)
        }
        Command::Market(cmd) => run_market(ctx, cmd).await,
        Command::Certify(cmd) => run_certify(ctx, cmd).await,
        Command::Admin(cmd) => run_admin(ctx, cmd).await,
        Command::SetRole {
            email,
            role,
            secret,
        } => {
            // 用管理密钥授权，不依赖当前会话
            let secret = admin_secret(ctx, secret)?;
            let role = Role::from(role.as_str());
            print_json(&api.set_role(&secret, &email, role).await?)
        }
    }
}

async fn run_market(ctx: &AppContext, cmd: MarketCommand) -> AppResult<()> {
    require_auth(&ctx.session)?;
    let api = &ctx.api;
    match cmd {
        MarketCommand::List => print_json(&api.marketplace_listings().await?),
        MarketCommand::Show { id } => print_json(&api.marketplace_listing(id).await?),
        MarketCommand::Add {
            crop,
            quantity,
            price,
            location,
            contact,
        } => {
            let listing = NewListing {
                crop_name: crop,
                quantity,
                price,
                location,
                contact,
            };
            print_json(&api.add_marketplace_listing(&listing).await?)
        }
        MarketCommand::Delete { id } => print_json(&api.delete_marketplace_listing(id).await?),
    }
}

async fn run_certify(ctx: &AppContext, cmd: CertifyCommand) -> AppResult<()> {
    require_auth(&ctx.session)?;
    let api = &ctx.api;
    match cmd {
        CertifyCommand::Verify {
            id,
            name,
            brand,
            origin,
            compliance,
        } => {
            let req = CertificationRequest {
                equipment_id: id,
                equipment_name: name,
                brand,
                origin,
                compliance_info: compliance,
                extra: Default::default(),
            };
            print_json(&api.verify_certification(&req).await?)
        }
        CertifyCommand::Report {
            product_id,
            crop,
            reason,
            details,
        } => {
            let report = CertificationReport {
                product_id,
                crop_name: crop,
                reason,
                details,
            };
            print_json(&api.report_certification(&report).await?)
        }
        CertifyCommand::Reports => print_json(&api.certification_reports().await?),
    }
}

async fn run_admin(ctx: &AppContext, cmd: AdminCommand) -> AppResult<()> {
    require_superuser(&ctx.session)?;
    let api = &ctx.api;
    match cmd {
        AdminCommand::VerifyCrop { id } => print_json(&api.verify_crop(id).await?),
        AdminCommand::DeleteCrop { id } => print_json(&api.delete_crop(id).await?),
        AdminCommand::VerifyEquipment { id } => print_json(&api.verify_equipment(id).await?),
        AdminCommand::DeleteEquipment { id } => print_json(&api.delete_equipment(id).await?),
        AdminCommand::Equipment => print_json(&api.equipment_requests().await?),
    }
}

fn admin_secret(ctx: &AppContext, flag: Option<String>) -> AppResult<String> {
    flag.or_else(|| ctx.config.admin_secret.clone())
        .ok_or_else(|| AppError::Config("pass --secret or set AGROGURU_ADMIN_SECRET".into()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
