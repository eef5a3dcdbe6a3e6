//! Console front end for the user dashboard.
//!
//! Signs in through the authentication service, then drives one
//! `DashboardSession` from line commands on stdin.

use std::error::Error;
use std::str::FromStr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use dashboard_prefs::adapters::{
    FileEntryStorage, HttpSessionBoundary, HttpSessionConfig, InMemoryEntryStorage,
};
use dashboard_prefs::application::{ConsentStore, DashboardSession, PreferenceStore};
use dashboard_prefs::config::{AppConfig, StorageBackend};
use dashboard_prefs::domain::foundation::UserRole;
use dashboard_prefs::domain::gate::GateOutcome;
use dashboard_prefs::domain::preferences::PreferenceField;
use dashboard_prefs::ports::{EntryStorage, Registration, SessionBoundary, SystemClock};
use dashboard_prefs::telemetry;

const SIGN_IN_HELP: &str = "\
Commands:
  login <email> <password>
  register <name> <email> <password> [admin]
  google <credential>
  quit";

const DASHBOARD_HELP: &str = "\
Commands:
  view                     show the dashboard
  set <field> <value>      edit language, theme or number
  save                     save preferences
  accept | decline         answer the cookie prompt
  enable                   reopen the cookie prompt
  reset                    forget stored consent and preferences
  ok                       dismiss the saved notice
  logout | quit";

/// A command typed before a session exists.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SignInCommand {
    Login { email: String, password: String },
    Register(Registration),
    Google(String),
    Quit,
}

impl FromStr for SignInCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["login", email, password] => Ok(SignInCommand::Login {
                email: email.to_string(),
                password: password.to_string(),
            }),
            ["register", name, email, password] => Ok(SignInCommand::Register(
                Registration::new(*name, *email, *password, UserRole::User),
            )),
            ["register", name, email, password, role] => Ok(SignInCommand::Register(
                Registration::new(*name, *email, *password, UserRole::from_code(role)),
            )),
            ["google", credential] => Ok(SignInCommand::Google(credential.to_string())),
            ["quit"] | ["exit"] => Ok(SignInCommand::Quit),
            _ => Err(SIGN_IN_HELP.to_string()),
        }
    }
}

/// A command typed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DashboardCommand {
    View,
    Set { field: PreferenceField, value: String },
    Save,
    Accept,
    Decline,
    Enable,
    Reset,
    Dismiss,
    Logout,
    Quit,
}

impl FromStr for DashboardCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = match (words.next(), words.next(), words.next()) {
            (Some("view"), None, _) => DashboardCommand::View,
            (Some("set"), Some(field), Some(value)) => DashboardCommand::Set {
                field: field.parse::<PreferenceField>().map_err(|e| e.to_string())?,
                value: value.to_string(),
            },
            (Some("save"), None, _) => DashboardCommand::Save,
            (Some("accept"), None, _) => DashboardCommand::Accept,
            (Some("decline"), None, _) => DashboardCommand::Decline,
            (Some("enable"), None, _) => DashboardCommand::Enable,
            (Some("reset"), None, _) => DashboardCommand::Reset,
            (Some("ok"), None, _) => DashboardCommand::Dismiss,
            (Some("logout"), None, _) => DashboardCommand::Logout,
            (Some("quit") | Some("exit"), None, _) => DashboardCommand::Quit,
            _ => return Err(DASHBOARD_HELP.to_string()),
        };
        if words.next().is_some() {
            return Err(DASHBOARD_HELP.to_string());
        }
        Ok(command)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    telemetry::init(&config.logging);
    config.validate()?;

    let storage: Arc<dyn EntryStorage> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileEntryStorage::new(&config.storage.path)),
        StorageBackend::Memory => Arc::new(InMemoryEntryStorage::new()),
    };
    let clock = Arc::new(SystemClock);
    let consent_store = ConsentStore::new(storage.clone(), clock.clone(), config.storage.consent_ttl());
    let preference_store = PreferenceStore::new(storage, clock, config.storage.preferences_ttl());

    let mut http_config = HttpSessionConfig::new(config.auth.api_base_url.clone())
        .with_timeout(config.auth.request_timeout());
    if let Some(cookie) = config.auth.session_cookie.clone() {
        http_config = http_config.with_session_cookie(cookie);
    }
    let boundary: Arc<dyn SessionBoundary> = Arc::new(HttpSessionBoundary::new(http_config)?);

    tracing::info!(api = %config.auth.api_base_url, "Starting dashboard");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("Loading...");
        match DashboardSession::open(
            boundary.clone(),
            consent_store.clone(),
            preference_store.clone(),
        )
        .await
        {
            Ok(session) => {
                if !run_dashboard(session, &mut lines).await? {
                    return Ok(());
                }
            }
            Err(e) if e.requires_reauthentication() => {
                if !run_sign_in(boundary.as_ref(), &mut lines).await? {
                    return Ok(());
                }
            }
            Err(e) => {
                eprintln!("{}", e);
                return Err(e.into());
            }
        }
    }
}

/// Returns `false` when the user quits.
async fn run_sign_in(
    boundary: &dyn SessionBoundary,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool, Box<dyn Error>> {
    println!("Please sign in.\n{}", SIGN_IN_HELP);

    while let Some(line) = lines.next_line().await? {
        let command = match line.trim().parse::<SignInCommand>() {
            Ok(command) => command,
            Err(help) => {
                println!("{}", help);
                continue;
            }
        };

        let result = match command {
            SignInCommand::Quit => return Ok(false),
            SignInCommand::Login { email, password } => boundary.login(&email, &password).await,
            SignInCommand::Register(registration) => {
                // Registration does not sign in; stay on this screen.
                match boundary.register(&registration).await {
                    Ok(message) => println!("{} Please sign in.", message),
                    Err(e) => println!("{}", e),
                }
                continue;
            }
            SignInCommand::Google(credential) => boundary.sign_in_with_google(&credential).await,
        };

        match result {
            Ok(message) => {
                println!("{}", message);
                return Ok(true);
            }
            Err(e) => println!("{}", e),
        }
    }

    Ok(false)
}

/// Returns `false` when the user quits, `true` after logout.
async fn run_dashboard(
    mut session: DashboardSession,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool, Box<dyn Error>> {
    println!("{}\n\n{}", session.view(), DASHBOARD_HELP);

    while let Some(line) = lines.next_line().await? {
        let command = match line.trim().parse::<DashboardCommand>() {
            Ok(command) => command,
            Err(help) => {
                println!("{}", help);
                continue;
            }
        };

        let outcome = match command {
            DashboardCommand::View => None,
            DashboardCommand::Set { field, value } => {
                if let Err(e) = session.edit_field(field, &value) {
                    println!("{}", e);
                }
                None
            }
            DashboardCommand::Save => Some(session.save_preferences().await),
            DashboardCommand::Accept => Some(session.accept_consent().await),
            DashboardCommand::Decline => Some(session.decline_consent().await),
            DashboardCommand::Enable => Some(session.reopen_consent_prompt()),
            DashboardCommand::Reset => Some(Ok(session.reset_preferences().await)),
            DashboardCommand::Dismiss => {
                session.dismiss_save_notice();
                None
            }
            DashboardCommand::Logout => {
                session.logout().await;
                return Ok(true);
            }
            DashboardCommand::Quit => return Ok(false),
        };

        match outcome {
            Some(Err(e)) => println!("{}", e),
            Some(Ok(GateOutcome::Reset)) => println!("Stored consent and preferences cleared."),
            _ => {}
        }
        println!("{}", session.view());
    }

    Ok(false)
}
