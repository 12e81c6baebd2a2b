//! meuPortefolio terminal client

use anyhow::{bail, Context};
use meuportefolio_client::api::types::{
    CreatePortfolioRequest, CreateUserRequest, LoginRequest, UpdatePortfolioRequest,
};
use meuportefolio_client::config::Config;
use meuportefolio_client::services::{
    AuthService, DashboardService, FundsService, SubscriptionService, TradingService,
};
use meuportefolio_client::services::subscription_service::SubscriptionAction;
use meuportefolio_client::services::trading_service::OrderSide;
use meuportefolio_client::session::SessionUser;
use meuportefolio_client::state::AppState;
use meuportefolio_client::view;
use meuportefolio_client::AppError;
use std::io::{BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
meuPortefolio terminal client

Usage: meuportefolio <command> [args]

Commands:
  login <email>                       authenticate (password read from stdin)
  register <name> <email> <country> <iban>
  logout                              end the session (local state always cleared)
  whoami                              show the current session identity
  dashboard                           account + portfolio rollup
  portfolios                          list owned portfolios
  portfolio create <name> [initial_funds]
  portfolio rename <portfolio_id> <new_name>
  portfolio delete <portfolio_id>
  portfolio show <portfolio_id>       summary and holdings
  assets [query] [asset_type]         browse market data
  history <asset_id>                  asset price history
  deposit <amount>                    add funds to the account
  withdraw <amount>                   remove funds from the account
  allocate <portfolio_id> <amount>    move account funds into a portfolio
  deallocate <portfolio_id> <amount>  move portfolio funds back to the account
  buy <portfolio_id> <asset_id> <quantity>
  sell <portfolio_id> <asset_id> <quantity>
  upgrade [months] [monthly_rate]     upgrade to premium
  subscription <cancel|renew> [months]
  payment-method <type> <details> [expiry]
  risk [portfolio_id]                 risk analysis (premium only)
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meuportefolio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print!("{}", USAGE);
        return Ok(());
    };

    let config = Config::from_env()?;
    let state = AppState::new(config)?;

    let result = dispatch(&state, command, &args[1..]).await;

    if let Err(e) = &result {
        // A connection-level failure gets the friendlier message the web
        // client showed, backed by the health probe.
        if let Some(app_err) = e.downcast_ref::<AppError>() {
            if app_err.is_connection() && !state.api.health().await {
                bail!(
                    "O servidor não está disponível. Verifique se o backend está a correr em {}",
                    state.config.api_base
                );
            }
        }
    }
    result
}

async fn dispatch(state: &AppState, command: &str, args: &[String]) -> anyhow::Result<()> {
    match command {
        "login" => {
            let email = args.first().context("usage: login <email>")?.clone();
            let password = read_password()?;
            let user = AuthService::login(state, LoginRequest { email, password }).await?;
            println!("Sessão iniciada como {} ({})", user.name, user.user_type);
        }
        "register" => {
            let [name, email, country, iban] = args else {
                bail!("usage: register <name> <email> <country> <iban>");
            };
            let password = read_password()?;
            let user = AuthService::register(
                state,
                CreateUserRequest {
                    name: name.clone(),
                    email: email.clone(),
                    password,
                    country_of_residence: country.clone(),
                    iban: iban.clone(),
                    user_type: "Basic".to_string(),
                },
            )
            .await?;
            println!("Conta criada e sessão iniciada como {}", user.name);
        }
        "logout" => {
            AuthService::logout(state).await?;
            println!("Sessão terminada");
        }
        "whoami" => match state.current_user() {
            Some(user) => println!("{} <{}> [{}]", user.name, user.email, user.user_type),
            None => println!("Sem sessão iniciada"),
        },
        "dashboard" => {
            let user = require_login(state)?;
            let data = DashboardService::load_dashboard(state.api.as_ref(), user.user_id).await?;
            print!("{}", view::render_dashboard(&data));
        }
        "portfolios" => {
            let user = require_login(state)?;
            let portfolios = state.api.list_portfolios(Some(user.user_id)).await?;
            if portfolios.is_empty() {
                println!("Sem portfólios");
            }
            for p in &portfolios {
                println!("{}", view::render_portfolio(p));
            }
        }
        "portfolio" => {
            let user = require_login(state)?;
            match args.first().map(String::as_str) {
                Some("create") => {
                    let name = args.get(1).context("usage: portfolio create <name> [initial_funds]")?;
                    let initial_funds = match args.get(2) {
                        Some(raw) => raw.parse().context("invalid initial funds")?,
                        None => 0.0,
                    };
                    let created = state
                        .api
                        .create_portfolio(&CreatePortfolioRequest {
                            name: name.clone(),
                            user_id: user.user_id,
                            initial_funds,
                        })
                        .await?;
                    // Render from the re-fetched record, not the request.
                    let fresh = state.api.get_portfolio(created.portfolio_id).await?;
                    println!("Portfólio criado:\n{}", view::render_portfolio(&fresh));
                }
                Some("rename") => {
                    let portfolio_id = parse_portfolio_id(args.get(1))?;
                    let new_name = args.get(2).context("usage: portfolio rename <portfolio_id> <new_name>")?;
                    state
                        .api
                        .update_portfolio(
                            portfolio_id,
                            &UpdatePortfolioRequest {
                                name: Some(new_name.clone()),
                            },
                        )
                        .await?;
                    let fresh = state.api.get_portfolio(portfolio_id).await?;
                    println!("{}", view::render_portfolio(&fresh));
                }
                Some("delete") => {
                    let portfolio_id = parse_portfolio_id(args.get(1))?;
                    state.api.delete_portfolio(portfolio_id).await?;
                    println!("Portfólio {} eliminado", portfolio_id);
                }
                Some("show") => {
                    let portfolio_id = parse_portfolio_id(args.get(1))?;
                    let (summary, holdings) = tokio::join!(
                        state.api.portfolio_summary(portfolio_id),
                        state.api.portfolio_holdings(portfolio_id),
                    );
                    print!("{}", view::render_portfolio_summary(&summary?));
                    for h in &holdings? {
                        println!("{}", view::render_holding(h));
                    }
                }
                _ => bail!("usage: portfolio <create|rename|delete|show> ..."),
            }
        }
        "assets" => {
            let query = args.first().map(String::as_str);
            let asset_type = args.get(1).map(String::as_str);
            let assets = state.api.list_assets(query, asset_type).await?;
            for a in &assets {
                println!("{}", view::render_asset(a));
            }
        }
        "history" => {
            let asset_id: i32 = args
                .first()
                .context("missing asset id")?
                .parse()
                .context("invalid asset id")?;
            let history = state.api.asset_price_history(asset_id).await?;
            for point in &history {
                println!(
                    "{}  {:<8} {:>12}  vol {}",
                    point.timestamp,
                    point.symbol,
                    view::format_eur(point.price),
                    point.volume
                );
            }
        }
        "deposit" => {
            let user = require_login(state)?;
            let amount = parse_amount(args.first())?;
            let result =
                FundsService::deposit(state.api.as_ref(), user.user_id, amount, None).await?;
            println!(
                "Depósito confirmado. Saldo atual: {}",
                view::format_eur(result.profile.account_balance)
            );
        }
        "withdraw" => {
            let user = require_login(state)?;
            let amount = parse_amount(args.first())?;
            let result =
                FundsService::withdraw(state.api.as_ref(), user.user_id, amount, None).await?;
            println!(
                "Levantamento confirmado. Saldo atual: {}",
                view::format_eur(result.profile.account_balance)
            );
        }
        "allocate" | "deallocate" => {
            let user = require_login(state)?;
            let portfolio_id: i32 = args
                .first()
                .context("missing portfolio id")?
                .parse()
                .context("invalid portfolio id")?;
            let amount = parse_amount(args.get(1))?;
            let result = if command == "allocate" {
                FundsService::allocate(state.api.as_ref(), user.user_id, portfolio_id, amount)
                    .await?
            } else {
                FundsService::deallocate(state.api.as_ref(), user.user_id, portfolio_id, amount)
                    .await?
            };
            println!(
                "Operação confirmada. Saldo da conta: {}",
                view::format_eur(result.profile.account_balance)
            );
        }
        "buy" | "sell" => {
            require_login(state)?;
            let portfolio_id: i32 = args
                .first()
                .context("missing portfolio id")?
                .parse()
                .context("invalid portfolio id")?;
            let asset_id: i32 = args
                .get(1)
                .context("missing asset id")?
                .parse()
                .context("invalid asset id")?;
            let quantity: f64 = args
                .get(2)
                .context("missing quantity")?
                .parse()
                .context("invalid quantity")?;

            let side = if command == "buy" {
                OrderSide::Buy
            } else {
                OrderSide::Sell
            };
            let preview =
                TradingService::preview(state.api.as_ref(), side, asset_id, quantity).await?;
            println!(
                "{} {} x {} @ {} = {} (estimado)",
                if side == OrderSide::Buy { "Compra" } else { "Venda" },
                preview.quantity,
                preview.symbol,
                view::format_eur(preview.price),
                view::format_eur(preview.estimated_total)
            );

            let result = if side == OrderSide::Buy {
                TradingService::buy(state.api.as_ref(), portfolio_id, asset_id, quantity).await?
            } else {
                TradingService::sell(state.api.as_ref(), portfolio_id, asset_id, quantity).await?
            };
            println!(
                "Transação {} confirmada. Valor do portfólio: {}",
                result.transaction_id,
                view::format_eur(result.balance.total_portfolio_value)
            );
        }
        "upgrade" => {
            let user = require_login(state)?;
            let months = args.first().map(|m| m.parse()).transpose()?;
            let rate = args.get(1).map(|r| r.parse()).transpose()?;
            let result =
                SubscriptionService::upgrade_premium(state.api.as_ref(), user.user_id, months, rate)
                    .await?;
            if result.profile.is_premium {
                println!("Conta Premium ativa. Análise de risco desbloqueada.");
            } else {
                println!("Upgrade registado mas a conta ainda não está Premium.");
            }
        }
        "subscription" => {
            let user = require_login(state)?;
            let action = match args.first().map(String::as_str) {
                Some("cancel") => SubscriptionAction::Cancel,
                Some("renew") => SubscriptionAction::Renew,
                _ => bail!("usage: subscription <cancel|renew> [months]"),
            };
            let months = args.get(1).map(|m| m.parse()).transpose()?;
            let result =
                SubscriptionService::manage(state.api.as_ref(), user.user_id, action, months, None)
                    .await?;
            println!("Subscrição atualizada ({})", result.status);
        }
        "payment-method" => {
            let user = require_login(state)?;
            let [method_type, details, rest @ ..] = args else {
                bail!("usage: payment-method <type> <details> [expiry]");
            };
            let expiry = rest.first().cloned();
            SubscriptionService::set_payment_method(
                state.api.as_ref(),
                user.user_id,
                method_type.clone(),
                details.clone(),
                expiry,
            )
            .await?;
            println!("Método de pagamento atualizado");
        }
        "risk" => {
            let user = require_login(state)?;
            // Gate on the freshly fetched profile, never on the cached
            // session identity.
            let profile = state.api.user_complete(user.user_id).await?;
            if !view::Gate::for_profile(&profile).is_unlocked() {
                bail!("A análise de risco requer uma conta Premium (use 'upgrade')");
            }
            match args.first() {
                Some(raw) => {
                    let portfolio_id: i32 = raw.parse().context("invalid portfolio id")?;
                    let risk = state.api.portfolio_risk_analysis(portfolio_id).await?;
                    print!("{}", view::render_portfolio_risk(&risk));
                }
                None => {
                    let (metrics, summary) = tokio::join!(
                        state.api.user_risk_metrics(user.user_id),
                        state.api.user_risk_summary(user.user_id),
                    );
                    print!("{}", view::render_risk(&metrics?));
                    print!("{}", view::render_risk_summary(&summary?));
                }
            }
        }
        "help" | "--help" | "-h" => print!("{}", USAGE),
        other => bail!("Unknown command '{}'\n\n{}", other, USAGE),
    }

    Ok(())
}

fn require_login(state: &AppState) -> anyhow::Result<SessionUser> {
    state
        .current_user()
        .context("Sem sessão iniciada. Use 'meuportefolio login <email>'")
}

fn parse_portfolio_id(arg: Option<&String>) -> anyhow::Result<i32> {
    arg.context("missing portfolio id")?
        .parse()
        .context("invalid portfolio id")
}

fn parse_amount(arg: Option<&String>) -> anyhow::Result<f64> {
    arg.context("missing amount")?
        .parse()
        .context("invalid amount")
}

fn read_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
