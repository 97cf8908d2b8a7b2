use std::sync::Arc;

use clap::{Parser, Subcommand};

use lanyard::{ApiError, FileTokenStore, IdentityClient, Session, User};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("not logged in; run `lanyard login` or `lanyard register` first")]
    NotLoggedIn,
}

#[derive(Parser, Debug)]
#[command(name = "lanyard", about = "Identity API session CLI")]
struct Cli {
    /// API root the /users/* endpoints are served under.
    #[arg(long, env = "LANYARD_BASE_URL", default_value = "http://127.0.0.1:8000/api")]
    base_url: String,

    /// File the session token is mirrored to between invocations.
    #[arg(long, env = "LANYARD_TOKEN_FILE", default_value = ".lanyard-token")]
    token_file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Authenticate with an existing account.
    Login { email: String, password: String },
    /// Create an account by upgrading a fresh anonymous identity.
    Register { email: String, password: String },
    /// Show the profile behind the stored token.
    Whoami,
    /// Clear the stored session.
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let api = Arc::new(IdentityClient::new(&cli.base_url));
    let store = Arc::new(FileTokenStore::new(&cli.token_file));
    let mut session = Session::new(api, store);

    match cli.command {
        Command::Login { email, password } => run_login(&mut session, &email, &password).await,
        Command::Register { email, password } => run_register(&mut session, &email, &password).await,
        Command::Whoami => run_whoami(&mut session).await,
        Command::Logout => run_logout(&mut session),
    }
}

async fn run_login(session: &mut Session, email: &str, password: &str) -> Result<(), CliError> {
    session.login(email, password).await?;
    print_profile(session.user());
    Ok(())
}

async fn run_register(session: &mut Session, email: &str, password: &str) -> Result<(), CliError> {
    session.register(email, password).await?;
    print_profile(session.user());
    Ok(())
}

async fn run_whoami(session: &mut Session) -> Result<(), CliError> {
    session.fetch_user().await;
    if !session.is_authenticated() {
        return Err(CliError::NotLoggedIn);
    }
    print_profile(session.user());
    Ok(())
}

fn run_logout(session: &mut Session) -> Result<(), CliError> {
    session.logout();
    println!("logged out");
    Ok(())
}

fn print_profile(user: Option<&User>) {
    let Some(user) = user else {
        println!("no profile loaded");
        return;
    };

    let email = user.email.as_deref().unwrap_or("<anonymous>");
    println!("id:        {}", user.id);
    println!("email:     {email}");
    println!("verified:  {}", user.is_verified);
    println!("superuser: {}", user.is_superuser);
    println!("created:   {}", user.created_at);
}
