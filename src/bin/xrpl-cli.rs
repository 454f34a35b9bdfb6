use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::util::TryInitError;

use xrpl_console::backend::{BackendClient, BackendError};
use xrpl_console::config::{load_or_default, ConfigError, GatewayConfig};
use xrpl_console::forms::{
    self, account, check, did, escrow, nft, offer, oracle, payment, server, trustline, Asset,
    AssetId, ConsoleError, Form, Secret,
};
use xrpl_console::lifecycle::{signals, Shutdown};
use xrpl_console::observability::logging;
use xrpl_console::render::{render, render_json};
use xrpl_console::wallet::{
    qr, session::ACCOUNT_KEY, ConnectOutcome, SessionStore, SigningClient, WalletConnector,
    WalletError,
};

#[derive(Parser)]
#[command(name = "xrpl-cli")]
#[command(about = "Console for the XRPL REST backend", long_about = None)]
struct Cli {
    /// TOML configuration file ([client] and [wallet] sections).
    #[arg(short, long, global = true, env = "XRPL_CONSOLE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured backend URL.
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Override the configured signing proxy URL.
    #[arg(long, global = true)]
    proxy_url: Option<String>,

    /// Print raw JSON results.
    #[arg(long, global = true)]
    json: bool,

    /// Secret seed for signing operations.
    #[arg(long, global = true, env = "XRPL_SEED", hide_env_values = true)]
    seed: Option<Secret>,

    /// Debug logging to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect a wallet through the signing proxy
    #[command(subcommand)]
    Wallet(WalletCommand),

    #[command(flatten)]
    Form(FormCommand),
}

#[derive(Subcommand)]
enum WalletCommand {
    /// Show a sign-in QR code and wait for approval
    Connect,
    /// Show the connected account
    Status,
    /// Forget the connected account
    Disconnect,
}

#[derive(Subcommand)]
enum FormCommand {
    /// Accounts
    #[command(subcommand)]
    Account(AccountCommand),
    /// Trust lines
    #[command(subcommand)]
    Trustline(TrustlineCommand),
    /// Payments
    #[command(subcommand)]
    Payment(PaymentCommand),
    /// Checks
    #[command(subcommand)]
    Check(CheckCommand),
    /// Escrows
    #[command(subcommand)]
    Escrow(EscrowCommand),
    /// NFTs and NFT offers
    #[command(subcommand)]
    Nft(NftCommand),
    /// Price oracles
    #[command(subcommand)]
    Oracle(OracleCommand),
    /// Decentralized identifiers
    #[command(subcommand)]
    Did(DidCommand),
    /// DEX offers
    #[command(subcommand)]
    Offer(OfferCommand),
    /// Server status
    Server,
    /// Current transaction fees
    Fee,
    /// Ledger header
    Ledger {
        /// Ledger index, or validated / current / closed
        index: Option<String>,
    },
    /// Look up a transaction by hash
    Tx { hash: String },
}

#[derive(Subcommand)]
enum AccountCommand {
    /// Create and fund a test account
    Create,
    Info { address: String },
    Transactions {
        address: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    Objects {
        address: String,
        /// Ledger object type filter
        #[arg(long = "type")]
        object_type: Option<String>,
    },
}

#[derive(Subcommand)]
enum TrustlineCommand {
    Set {
        issuer: String,
        currency: String,
        limit: String,
    },
    Remove { issuer: String, currency: String },
    List { address: String },
}

#[derive(Args)]
struct PaymentExtras {
    #[arg(long = "tag")]
    destination_tag: Option<u32>,
    #[arg(long)]
    memo: Option<String>,
}

#[derive(Subcommand)]
enum PaymentCommand {
    /// Send XRP
    Xrp {
        destination: String,
        amount: String,
        #[command(flatten)]
        extras: PaymentExtras,
    },
    /// Send an issued currency
    Token {
        destination: String,
        amount: String,
        currency: String,
        issuer: String,
        #[command(flatten)]
        extras: PaymentExtras,
    },
}

#[derive(Subcommand)]
enum CheckCommand {
    Create {
        destination: String,
        /// VALUE for XRP, or VALUE/CURRENCY/ISSUER
        send_max: Asset,
        /// Expiration, in minutes from now
        #[arg(long)]
        expires_in: Option<u64>,
    },
    Cash { check_id: String, amount: Asset },
    Cancel { check_id: String },
    List { address: String },
}

#[derive(Args)]
struct EscrowTarget {
    owner: String,
    offer_sequence: u32,
}

impl EscrowTarget {
    fn reference(self, seed: Secret) -> escrow::EscrowReference {
        escrow::EscrowReference {
            seed,
            owner: self.owner,
            offer_sequence: self.offer_sequence,
        }
    }
}

#[derive(Subcommand)]
enum EscrowCommand {
    Create {
        destination: String,
        /// XRP amount
        amount: String,
        /// Minutes from now before the escrow can finish
        #[arg(long)]
        finish_after: u64,
        /// Minutes from now after which the escrow can be cancelled
        #[arg(long)]
        cancel_after: Option<u64>,
        #[arg(long = "tag")]
        destination_tag: Option<u32>,
    },
    Finish(EscrowTarget),
    Cancel(EscrowTarget),
    List { address: String },
}

#[derive(Subcommand)]
enum NftCommand {
    Mint {
        #[arg(long)]
        uri: Option<String>,
        #[arg(long, default_value_t = 0)]
        taxon: u32,
        /// Royalty in units of 1/100000 (0..=50000)
        #[arg(long)]
        transfer_fee: Option<u16>,
        #[arg(long)]
        transferable: bool,
        #[arg(long)]
        burnable: bool,
        #[arg(long)]
        only_xrp: bool,
    },
    Burn { nft_id: String },
    List { address: String },
    /// Offer an owned NFT for sale
    Sell {
        nft_id: String,
        amount: Asset,
        #[arg(long)]
        destination: Option<String>,
    },
    /// Offer to buy someone else's NFT
    Buy {
        nft_id: String,
        amount: Asset,
        #[arg(long)]
        owner: String,
    },
    Accept {
        #[arg(long, conflicts_with = "buy_offer")]
        sell_offer: Option<String>,
        #[arg(long)]
        buy_offer: Option<String>,
    },
    CancelOffers {
        #[arg(required = true)]
        offer_ids: Vec<String>,
    },
    Offers { nft_id: String },
}

#[derive(Subcommand)]
enum OracleCommand {
    Set {
        document_id: u32,
        #[arg(long)]
        provider: String,
        #[arg(long)]
        asset_class: String,
        #[arg(long)]
        uri: Option<String>,
        /// BASE/QUOTE=PRICE, repeatable
        #[arg(long = "price", required = true)]
        prices: Vec<oracle::PriceEntry>,
    },
    Delete { document_id: u32 },
    Get { address: String, document_id: u32 },
}

#[derive(Subcommand)]
enum DidCommand {
    Set {
        #[arg(long)]
        uri: Option<String>,
        #[arg(long)]
        data: Option<String>,
        #[arg(long)]
        document: Option<String>,
    },
    Delete,
    Get { address: String },
}

#[derive(Subcommand)]
enum OfferCommand {
    Create {
        /// What the offer gives: VALUE or VALUE/CURRENCY/ISSUER
        taker_gets: Asset,
        /// What the offer wants: VALUE or VALUE/CURRENCY/ISSUER
        taker_pays: Asset,
        #[arg(long)]
        expires_in: Option<u64>,
    },
    Cancel { offer_sequence: u32 },
    List { address: String },
    /// Order book between two assets (XRP or CURRENCY/ISSUER)
    Book { taker_gets: AssetId, taker_pays: AssetId },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{}", .0.user_message())]
    Console(#[from] ConsoleError),

    #[error("{}", .0.user_message())]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialise logging: {0}")]
    Logging(#[from] TryInitError),

    #[error("{0}")]
    NotConnected(&'static str),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.backend_url {
        config.client.backend_url = url;
    }
    if let Some(url) = cli.proxy_url {
        config.client.proxy_url = url;
    }

    let mut observability = config.observability.clone();
    observability.log_level = if cli.verbose { "debug" } else { "warn" }.to_string();
    logging::init_logging(&observability)?;

    match cli.command {
        Commands::Wallet(command) => wallet(command, &config).await,
        Commands::Form(command) => {
            let client = BackendClient::new(&config.client.backend_url, config.client.request_timeout())?;
            let form = command.into_form(cli.seed.unwrap_or_default());
            let result = forms::submit(&client, form.as_ref()).await?;
            if cli.json {
                println!("{}", render_json(&result));
            } else {
                println!("{}", render(&result));
            }
            Ok(())
        }
    }
}

async fn wallet(command: WalletCommand, config: &GatewayConfig) -> Result<(), CliError> {
    let session = SessionStore::load(&config.wallet.session_path)?;

    match command {
        WalletCommand::Status => {
            match session.connected_account() {
                Some(account) => println!("Connected: {}", account),
                None => println!("Not connected"),
            }
            Ok(())
        }
        WalletCommand::Disconnect => {
            if session.remove(ACCOUNT_KEY).is_some() {
                session.save()?;
            }
            println!("Disconnected");
            Ok(())
        }
        WalletCommand::Connect => {
            let client = SigningClient::new(&config.client.proxy_url, config.client.request_timeout())?;
            let connector = WalletConnector::new(client, session)
                .with_poll_interval(config.wallet.poll_interval())
                .with_timeout(config.wallet.timeout());

            let shutdown = Arc::new(Shutdown::new());
            let cancelled = shutdown.subscribe();
            signals::trigger_on_signal(shutdown);

            let outcome = connector
                .connect(
                    |payload| {
                        println!("Scan with your wallet app, or open:\n  {}\n", payload.sign_url());
                        match qr::render_terminal(payload.sign_url()) {
                            Ok(code) => println!("{}", code),
                            Err(e) => tracing::warn!(error = %e, "Could not render QR code"),
                        }
                        println!("Waiting for approval...");
                    },
                    cancelled,
                )
                .await?;

            match outcome {
                ConnectOutcome::Signed { account } => {
                    println!("Connected: {}", account);
                    Ok(())
                }
                ConnectOutcome::Expired => Err(CliError::NotConnected("sign-in request expired or was cancelled")),
                ConnectOutcome::TimedOut => Err(CliError::NotConnected("timed out waiting for sign-in")),
            }
        }
    }
}

impl FormCommand {
    fn into_form(self, seed: Secret) -> Box<dyn Form> {
        match self {
            FormCommand::Account(command) => match command {
                AccountCommand::Create => Box::new(account::CreateAccount),
                AccountCommand::Info { address } => Box::new(account::AccountInfo { address }),
                AccountCommand::Transactions { address, limit } => {
                    Box::new(account::AccountTransactions { address, limit })
                }
                AccountCommand::Objects { address, object_type } => {
                    Box::new(account::AccountObjects { address, object_type })
                }
            },
            FormCommand::Trustline(command) => match command {
                TrustlineCommand::Set { issuer, currency, limit } => Box::new(trustline::SetTrustLine {
                    seed,
                    issuer,
                    currency,
                    limit,
                }),
                TrustlineCommand::Remove { issuer, currency } => Box::new(trustline::RemoveTrustLine {
                    seed,
                    issuer,
                    currency,
                }),
                TrustlineCommand::List { address } => Box::new(trustline::ListTrustLines { address }),
            },
            FormCommand::Payment(command) => match command {
                PaymentCommand::Xrp { destination, amount, extras } => Box::new(payment::SendXrp {
                    seed,
                    destination,
                    amount,
                    destination_tag: extras.destination_tag,
                    memo: extras.memo,
                }),
                PaymentCommand::Token {
                    destination,
                    amount,
                    currency,
                    issuer,
                    extras,
                } => Box::new(payment::SendToken {
                    seed,
                    destination,
                    currency,
                    issuer,
                    amount,
                    destination_tag: extras.destination_tag,
                    memo: extras.memo,
                }),
            },
            FormCommand::Check(command) => match command {
                CheckCommand::Create {
                    destination,
                    send_max,
                    expires_in,
                } => Box::new(check::CreateCheck {
                    seed,
                    destination,
                    send_max,
                    expires_in_minutes: expires_in,
                }),
                CheckCommand::Cash { check_id, amount } => Box::new(check::CashCheck { seed, check_id, amount }),
                CheckCommand::Cancel { check_id } => Box::new(check::CancelCheck { seed, check_id }),
                CheckCommand::List { address } => Box::new(check::ListChecks { address }),
            },
            FormCommand::Escrow(command) => match command {
                EscrowCommand::Create {
                    destination,
                    amount,
                    finish_after,
                    cancel_after,
                    destination_tag,
                } => Box::new(escrow::CreateEscrow {
                    seed,
                    destination,
                    amount,
                    finish_after_minutes: finish_after,
                    cancel_after_minutes: cancel_after,
                    destination_tag,
                }),
                EscrowCommand::Finish(target) => Box::new(escrow::FinishEscrow(target.reference(seed))),
                EscrowCommand::Cancel(target) => Box::new(escrow::CancelEscrow(target.reference(seed))),
                EscrowCommand::List { address } => Box::new(escrow::ListEscrows { address }),
            },
            FormCommand::Nft(command) => match command {
                NftCommand::Mint {
                    uri,
                    taxon,
                    transfer_fee,
                    transferable,
                    burnable,
                    only_xrp,
                } => Box::new(nft::MintNft {
                    seed,
                    uri,
                    taxon,
                    transfer_fee,
                    transferable,
                    burnable,
                    only_xrp,
                }),
                NftCommand::Burn { nft_id } => Box::new(nft::BurnNft { seed, nft_id }),
                NftCommand::List { address } => Box::new(nft::ListNfts { address }),
                NftCommand::Sell {
                    nft_id,
                    amount,
                    destination,
                } => Box::new(nft::CreateNftSellOffer {
                    seed,
                    nft_id,
                    amount,
                    destination,
                }),
                NftCommand::Buy { nft_id, amount, owner } => Box::new(nft::CreateNftBuyOffer {
                    seed,
                    nft_id,
                    amount,
                    owner,
                }),
                NftCommand::Accept { sell_offer, buy_offer } => Box::new(nft::AcceptNftOffer {
                    seed,
                    sell_offer,
                    buy_offer,
                }),
                NftCommand::CancelOffers { offer_ids } => Box::new(nft::CancelNftOffer { seed, offer_ids }),
                NftCommand::Offers { nft_id } => Box::new(nft::NftOffers { nft_id }),
            },
            FormCommand::Oracle(command) => match command {
                OracleCommand::Set {
                    document_id,
                    provider,
                    asset_class,
                    uri,
                    prices,
                } => Box::new(oracle::SetOracle {
                    seed,
                    document_id,
                    provider,
                    asset_class,
                    uri,
                    prices,
                }),
                OracleCommand::Delete { document_id } => Box::new(oracle::DeleteOracle { seed, document_id }),
                OracleCommand::Get { address, document_id } => {
                    Box::new(oracle::GetOracle { address, document_id })
                }
            },
            FormCommand::Did(command) => match command {
                DidCommand::Set { uri, data, document } => Box::new(did::SetDid {
                    seed,
                    uri,
                    data,
                    document,
                }),
                DidCommand::Delete => Box::new(did::DeleteDid { seed }),
                DidCommand::Get { address } => Box::new(did::GetDid { address }),
            },
            FormCommand::Offer(command) => match command {
                OfferCommand::Create {
                    taker_gets,
                    taker_pays,
                    expires_in,
                } => Box::new(offer::CreateOffer {
                    seed,
                    taker_gets,
                    taker_pays,
                    expires_in_minutes: expires_in,
                }),
                OfferCommand::Cancel { offer_sequence } => Box::new(offer::CancelOffer { seed, offer_sequence }),
                OfferCommand::List { address } => Box::new(offer::ListOffers { address }),
                OfferCommand::Book { taker_gets, taker_pays } => {
                    Box::new(offer::OrderBook { taker_gets, taker_pays })
                }
            },
            FormCommand::Server => Box::new(server::ServerInfo),
            FormCommand::Fee => Box::new(server::Fee),
            FormCommand::Ledger { index } => Box::new(server::LedgerInfo { index }),
            FormCommand::Tx { hash } => Box::new(server::TransactionLookup { hash }),
        }
    }
}
