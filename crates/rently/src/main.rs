use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use rentlyapp::api::RentlyApi;
use rentlyapp::commands::message::ContactForm;
use rentlyapp::commands::ActionResult;
use rentlyapp::config::{default_data_dir, RentlyConfig};
use rentlyapp::forms::PropertyForm;
use rentlyapp::media::{ImageUpload, LocalMedia};
use rentlyapp::revalidate::NullRevalidator;
use rentlyapp::session::{SessionProvider, SessionUser, StaticSession};
use rentlyapp::store::fs::FileStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod args;
mod render;
use args::{Cli, Commands, MessageAction};
use render::{print_action, print_inbox, print_properties, print_property_full};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{} {e:#}", "Error:".red());
        std::process::exit(1);
    }
}

struct AppContext {
    api: RentlyApi<FileStore>,
    session: Option<SessionUser>,
    viewport: i32,
    data_dir: PathBuf,
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Login { email, name }) => handle_login(&mut ctx, email, name),
        Some(Commands::Logout) => handle_logout(&ctx),
        Some(Commands::List { search, page }) => handle_list(&ctx, search, page),
        Some(Commands::Featured) => handle_featured(&ctx),
        Some(Commands::View { id }) => handle_view(&ctx, id),
        Some(Commands::Mine) => handle_mine(&ctx),
        Some(Commands::Add { file, images }) => handle_add(&mut ctx, file, images),
        Some(Commands::Update { id, file }) => handle_update(&mut ctx, id, file),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, id),
        Some(Commands::Favorite { id }) => handle_favorite(&mut ctx, id),
        Some(Commands::Favorites) => handle_favorites(&ctx),
        Some(Commands::Contact { id, body, phone }) => handle_contact(&mut ctx, id, body, phone),
        Some(Commands::Messages { action }) => handle_messages(&mut ctx, action),
        None => handle_list(&ctx, None, 1),
    }
}

fn init_context(cli: &Cli) -> anyhow::Result<AppContext> {
    let data_dir = default_data_dir()?;
    let config = RentlyConfig::load(&data_dir).unwrap_or_default();
    let viewport = cli.width.unwrap_or(config.default_viewport);
    let session = load_session(&data_dir)?;

    let sessions: Box<dyn SessionProvider> = match &session {
        Some(user) => Box::new(StaticSession::signed_in(user.clone())),
        None => Box::new(StaticSession::signed_out()),
    };
    let api = RentlyApi::new(
        FileStore::new(data_dir.clone()),
        Box::new(LocalMedia::new(config.media_dir(&data_dir))),
        sessions,
        Box::new(NullRevalidator),
    );

    Ok(AppContext {
        api,
        session,
        viewport,
        data_dir,
    })
}

// --- Session file ---

fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join("session.json")
}

fn load_session(data_dir: &Path) -> anyhow::Result<Option<SessionUser>> {
    let path = session_path(data_dir);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("reading session file {}", path.display()))?;
    Ok(Some(serde_json::from_str(&content)?))
}

fn save_session(data_dir: &Path, user: &SessionUser) -> anyhow::Result<()> {
    fs::create_dir_all(data_dir)?;
    fs::write(session_path(data_dir), serde_json::to_string_pretty(user)?)?;
    Ok(())
}

// --- Handlers ---

fn handle_login(ctx: &mut AppContext, email: String, name: Option<String>) -> anyhow::Result<()> {
    let username = name
        .unwrap_or_else(|| email.split('@').next().unwrap_or("user").to_string());
    let user = ctx.api.ensure_user(&email, &username)?;
    let session_user = SessionUser {
        id: user.id,
        email: user.email.clone(),
        name: user.username.clone(),
    };
    save_session(&ctx.data_dir, &session_user)?;
    println!("{} {}", "Signed in as".green(), user.email);
    Ok(())
}

fn handle_logout(ctx: &AppContext) -> anyhow::Result<()> {
    let path = session_path(&ctx.data_dir);
    if path.exists() {
        fs::remove_file(path)?;
    }
    println!("Signed out.");
    Ok(())
}

fn handle_list(ctx: &AppContext, search: Option<String>, page: i64) -> anyhow::Result<()> {
    let result = ctx.api.page(page, ctx.viewport, search.as_deref())?;
    print_properties(&result.properties);
    if result.total_pages > 1 {
        println!("{}", format!("Page {} of {}", result.page, result.total_pages).dimmed());
    }
    Ok(())
}

fn handle_featured(ctx: &AppContext) -> anyhow::Result<()> {
    print_properties(&ctx.api.featured(ctx.viewport)?);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: Uuid) -> anyhow::Result<()> {
    let property = ctx.api.property(&id)?;
    let favorited = match &ctx.session {
        Some(_) => ctx.api.favorite_status(&id)?.favorited,
        None => None,
    };
    print_property_full(&property, favorited);
    Ok(())
}

fn handle_mine(ctx: &AppContext) -> anyhow::Result<()> {
    print_properties(&ctx.api.my_listings()?);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, file: PathBuf, images: Vec<PathBuf>) -> anyhow::Result<()> {
    let form = read_form(&file)?;
    let uploads = read_uploads(&images)?;
    let result = ctx.api.add_property(form, &uploads)?;
    finish(result)
}

fn handle_update(ctx: &mut AppContext, id: Uuid, file: PathBuf) -> anyhow::Result<()> {
    let form = read_form(&file)?;
    let result = ctx.api.update_property(&id, form)?;
    finish(result)
}

fn handle_delete(ctx: &mut AppContext, id: Uuid) -> anyhow::Result<()> {
    let result = ctx.api.delete_property(&id)?;
    finish(result)
}

fn handle_favorite(ctx: &mut AppContext, id: Uuid) -> anyhow::Result<()> {
    // Owners never see a favorite button in the web UI; mirror that here
    // rather than relying on the action layer, which permits it.
    if let Some(me) = &ctx.session {
        let property = ctx.api.property(&id)?;
        if property.owner == me.id {
            println!("{}", "You cannot favorite your own listing.".yellow());
            return Ok(());
        }
    }
    let result = ctx.api.toggle_favorite(&id)?;
    finish(result)
}

fn handle_favorites(ctx: &AppContext) -> anyhow::Result<()> {
    print_properties(&ctx.api.favorites()?);
    Ok(())
}

fn handle_contact(
    ctx: &mut AppContext,
    id: Uuid,
    body: String,
    phone: Option<String>,
) -> anyhow::Result<()> {
    let me = ctx
        .session
        .as_ref()
        .context("Not signed in; run `rently login <email>` first")?;
    let contact = ContactForm {
        name: me.name.clone(),
        email: me.email.clone(),
        phone,
        body,
    };
    let result = ctx.api.contact_owner(&id, contact)?;
    finish(result)
}

fn handle_messages(ctx: &mut AppContext, action: Option<MessageAction>) -> anyhow::Result<()> {
    match action.unwrap_or(MessageAction::List) {
        MessageAction::List => {
            print_inbox(&ctx.api.inbox()?);
            Ok(())
        }
        MessageAction::Unread => finish(ctx.api.unread_messages()?),
        MessageAction::Read { id } => finish(ctx.api.toggle_message_read(&id)?),
        MessageAction::Delete { id } => finish(ctx.api.delete_message(&id)?),
    }
}

// --- Helpers ---

fn read_form(path: &Path) -> anyhow::Result<PropertyForm> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading property form {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing property form {}", path.display()))
}

fn read_uploads(paths: &[PathBuf]) -> anyhow::Result<Vec<ImageUpload>> {
    paths
        .iter()
        .map(|p| {
            ImageUpload::from_path(p).with_context(|| format!("reading image {}", p.display()))
        })
        .collect()
}

/// Print the action outcome; non-Ok statuses exit 1 after rendering so
/// scripts can rely on the exit code.
fn finish(result: ActionResult) -> anyhow::Result<()> {
    print_action(&result);
    if result.status.is_ok() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
