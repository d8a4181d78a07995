//! Command handlers
//!
//! Everything goes through [`AppContext`]; stdout carries the user-facing
//! output, logs go to stderr or the log file.

use crate::cli::{AddContainerArgs, AddItemArgs, Command, PrintArgs};
use crate::config::Config;
use anyhow::{Context, bail};
use chrono::{Local, NaiveDate};
use boxed_client::{
    AppContext, Backend, ImageUpload, filter_containers, search_inventory, tag_counts,
};
use boxed_printer::{
    BrowserSurface, FileSurface, FlowAction, PngQrEncoder, PrintError, PrintFlow, SurfaceHandle,
    acquire_qr_images, dispatch, recommended_supplies,
};
use shared::{
    AppError, Container, ErrorCode, Item, LabelFormat, NewContainer, NewItem, ScanOutcome, TubVariant,
    intent::parse_command, util::short_id,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Commands that need a session
pub async fn run(command: Command, ctx: &AppContext, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::List { search } => list(ctx, search.as_deref()).await,
        Command::Show { id } => show(ctx, &id).await,
        Command::Print(args) => print(ctx, config, args).await,
        Command::Search { term } => search(ctx, &term).await,
        Command::Tags => tags(ctx).await,
        Command::Stats => {
            let stats = ctx.stats().await;
            println!("Tubs:  {}", stats.total_tubs);
            println!("Items: {}", stats.total_items);
            Ok(())
        }
        Command::AddContainer(args) => add_container(ctx, args).await,
        Command::AddItem(args) => add_item(ctx, args).await,
        Command::DeleteContainer { id } => {
            ctx.delete_container(&id).await?;
            println!("Deleted container {}", id);
            Ok(())
        }
        Command::DeleteItem { id } => {
            ctx.delete_item(&id).await?;
            println!("Deleted item {}", id);
            Ok(())
        }
        Command::Backup { out } => backup(ctx, config, out.as_deref()).await,
        Command::Restore { file } => restore(ctx, &file).await,
        Command::SetPassword { password } => {
            ctx.update_password(&password).await?;
            println!("Password updated");
            Ok(())
        }
        Command::Formats
        | Command::Supplies
        | Command::Voice { .. }
        | Command::Scan { .. }
        | Command::LoginUrl { .. }
        | Command::SignUp { .. }
        | Command::ResetPassword { .. } => bail!("command runs without a session"),
    }
}

/// Commands that run before any session exists
pub async fn run_unauthenticated(command: &Command, backend: &Backend) -> anyhow::Result<bool> {
    match command {
        Command::LoginUrl { provider, origin } => {
            println!("{}", AppContext::oauth_url(backend, provider, origin)?);
            Ok(true)
        }
        Command::SignUp { email, new_password } => {
            match AppContext::sign_up(backend.clone(), email, new_password).await? {
                Some(ctx) if ctx.is_demo() => println!("Demo mode: account not stored"),
                Some(_) => println!("Account created and signed in"),
                None => println!("Check {} for a confirmation link", email.trim()),
            }
            Ok(true)
        }
        Command::ResetPassword { email, origin } => {
            AppContext::request_password_reset(backend, email, origin).await?;
            println!("Password reset email sent to {}", email);
            Ok(true)
        }
        Command::Formats => {
            formats();
            Ok(true)
        }
        Command::Supplies => {
            supplies();
            Ok(true)
        }
        Command::Voice { words } => {
            voice(&words.join(" "));
            Ok(true)
        }
        Command::Scan { text } => {
            scan(text);
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn print_container_row(container: &Container) {
    println!(
        "{:<8} {:<28} {:<10} {}",
        short_id(&container.id, 8),
        container.name,
        TubVariant::label_or_default(container.icon),
        container.location.as_deref().unwrap_or("")
    );
}

async fn list(ctx: &AppContext, search: Option<&str>) -> anyhow::Result<()> {
    let containers = ctx.list_containers().await;
    let shown = filter_containers(&containers, search.unwrap_or(""));
    if shown.is_empty() {
        println!("No containers found");
        return Ok(());
    }
    for container in shown {
        print_container_row(container);
    }
    Ok(())
}

async fn show(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let details = ctx.container_details(id).await;
    let container = &details.container;
    println!("{} ({})", container.name, TubVariant::label_or_default(container.icon));
    println!("  id:       {}", container.id);
    if let Some(location) = container.location.as_deref().filter(|l| !l.is_empty()) {
        println!("  location: {}", location);
    }
    if !container.description_or_empty().is_empty() {
        println!("  {}", container.description_or_empty());
    }
    println!("  {} item(s)", details.items.len());
    let today = Local::now().date_naive();
    for item in &details.items {
        let tags = if item.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", item.tags.join(", "))
        };
        println!("  - {}{}{}", item.name, tags, expiry_note(item, today));
    }
    Ok(())
}

fn expiry_note(item: &Item, today: NaiveDate) -> String {
    match item.expiry_date {
        Some(date) if item.is_expired(today) => format!(" (EXPIRED {})", date),
        Some(date) => format!(" (expires {})", date),
        None => String::new(),
    }
}

fn formats() {
    for format in LabelFormat::ALL {
        println!("{:<18} {} - {}", format.id(), format.title(), format.subtitle());
    }
}

fn supplies() {
    for supply in recommended_supplies() {
        let marker = if supply.recommended { " (recommended)" } else { "" };
        println!("{} - {}{}", supply.product, supply.title, marker);
        println!("    {}", supply.url);
    }
}

fn voice(utterance: &str) {
    let intent = parse_command(utterance);
    match intent.route() {
        Some(route) => println!("{:?} -> {}", intent, route),
        None => println!("No command recognised"),
    }
}

fn scan(text: &str) {
    let outcome = ScanOutcome::parse(text);
    match (&outcome, outcome.route()) {
        (_, Some(route)) => println!("Container label -> {}", route),
        (ScanOutcome::Url { url }, None) => println!("Not a BoxedUp label (URL: {})", url),
        _ => println!("Not a BoxedUp label: {}", text.trim()),
    }
}

async fn search(ctx: &AppContext, term: &str) -> anyhow::Result<()> {
    let items = ctx.all_items().await;
    let containers = ctx.list_containers().await;
    let found = search_inventory(&items, term);
    if found.is_empty() {
        println!("No items match \"{}\"", term);
        return Ok(());
    }
    for item in found {
        let tub = containers
            .iter()
            .find(|c| c.id == item.tub_id)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        println!("{:<28} in {}", item.name, tub);
    }
    Ok(())
}

async fn tags(ctx: &AppContext) -> anyhow::Result<()> {
    let items = ctx.all_items().await;
    for entry in tag_counts(&items) {
        println!("{:>4}  {}", entry.count, entry.tag);
    }
    Ok(())
}

async fn add_container(ctx: &AppContext, args: AddContainerArgs) -> anyhow::Result<()> {
    let mut new = NewContainer::new(args.name);
    new.description = args.description;
    new.location = args.location;
    if let Some(color) = args.color {
        new.color = color;
    }
    if let Some(icon) = args.icon {
        new.icon = icon
            .parse()
            .map_err(|e: String| AppError::validation(e).with_detail("field", "icon"))?;
    }
    let created = ctx.create_container(new).await?;
    println!("Created {} ({})", created.name, created.id);
    Ok(())
}

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

async fn add_item(ctx: &AppContext, args: AddItemArgs) -> anyhow::Result<()> {
    let mut new = NewItem::new(args.tub_id, args.name);
    new.description = args.description;
    new.expiry_date = args.expires;
    for tag in &args.tags {
        new.add_tag(tag);
    }

    let image = match args.image {
        Some(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            Some(ImageUpload {
                bytes,
                content_type: content_type_for(&path).to_string(),
                file_name,
            })
        }
        None => None,
    };

    let added = ctx.add_item(new, image).await?;
    if let Some(warning) = &added.image_warning {
        warn!(warning = %warning, "Item saved without photo");
        println!("Warning: {}", warning);
    }
    println!("Added {} ({})", added.item.name, added.item.id);
    Ok(())
}

async fn select_containers(ctx: &AppContext, args: &PrintArgs) -> anyhow::Result<Vec<Container>> {
    let containers = ctx.list_containers().await;
    if args.all {
        return Ok(containers);
    }
    if args.ids.is_empty() {
        bail!("name at least one container id, or pass --all");
    }
    args.ids
        .iter()
        .map(|id| {
            containers
                .iter()
                .find(|c| &c.id == id)
                .cloned()
                .ok_or_else(|| {
                    anyhow::Error::from(
                        AppError::new(ErrorCode::ContainerNotFound).with_detail("id", id.as_str()),
                    )
                })
        })
        .collect()
}

/// Repeat each container `copies` times, keeping copies of one container together
fn repeat_labels(containers: Vec<Container>, copies: usize) -> Vec<Container> {
    containers
        .into_iter()
        .flat_map(|container| std::iter::repeat_n(container, copies))
        .collect()
}

async fn print(ctx: &AppContext, config: &Config, args: PrintArgs) -> anyhow::Result<()> {
    let format: LabelFormat = args.format.parse()?;
    let copies = if args.fill_sheet {
        format.labels_per_page()
    } else {
        usize::from(args.copies)
    };
    let containers = repeat_labels(select_containers(ctx, &args).await?, copies);

    let mut flow = PrintFlow::new();
    if args.buy_supplies {
        flow.apply(FlowAction::BuySupplies).map_err(AppError::from)?;
        supplies();
        flow.apply(FlowAction::SkipToPrint).map_err(AppError::from)?;
    } else {
        flow.apply(FlowAction::PrintLabels).map_err(AppError::from)?;
    }
    flow.select_format(format).map_err(AppError::from)?;

    let qrs = acquire_qr_images(Arc::new(PngQrEncoder), &containers)
        .await
        .map_err(AppError::from)?;
    let job = flow.commit(containers, qrs).map_err(AppError::from)?;
    info!(format = %format, labels = job.len(), pages = job.page_count(), "Printing labels");

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("failed to create {}", config.output_dir.display()))?;

    let handle = if args.open {
        match dispatch(&job, &BrowserSurface::new(&config.output_dir)).await {
            Ok(handle) => handle,
            Err(e @ PrintError::SurfaceUnavailable(_)) => {
                let err = AppError::from(e);
                warn!(error = %err, "Browser unavailable, document written only");
                eprintln!("{} (open the file manually)", err);
                dispatch(&job, &FileSurface::new(&config.output_dir))
                    .await
                    .map_err(AppError::from)?
            }
            Err(e) => return Err(AppError::from(e).into()),
        }
    } else {
        dispatch(&job, &FileSurface::new(&config.output_dir))
            .await
            .map_err(AppError::from)?
    };

    report_print(&handle, job.len(), format);
    Ok(())
}

fn report_print(handle: &SurfaceHandle, labels: usize, format: LabelFormat) {
    println!(
        "{} label(s), {} -> {}",
        labels,
        format.title(),
        handle.path.display()
    );
    if handle.launched {
        println!("Opened in browser; the print dialog appears once it loads");
    }
}

async fn backup(ctx: &AppContext, config: &Config, out: Option<&Path>) -> anyhow::Result<()> {
    let file = ctx.export_backup().await?;
    let path = match out {
        Some(path) => path.to_path_buf(),
        None => {
            tokio::fs::create_dir_all(&config.output_dir).await?;
            config.output_dir.join(&file.file_name)
        }
    };
    tokio::fs::write(&path, file.contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Backup saved to {}", path.display());
    Ok(())
}

async fn restore(ctx: &AppContext, file: &Path) -> anyhow::Result<()> {
    let json = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let summary = ctx.import_backup(&json).await?;
    println!("Restored {} tub(s) and {} item(s)", summary.tubs, summary.items);
    Ok(())
}

/// Exit status for an error: recoverable failures exit with 2
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AppError>() {
        Some(app) if app.code == ErrorCode::NotAuthenticated => 3,
        Some(app) if app.is_recoverable() => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxed_client::DemoBackend;
    use shared::Session;

    fn demo_context() -> AppContext {
        AppContext::new(
            Backend::from_shared(Arc::new(DemoBackend::seeded())),
            Session::demo(),
        )
    }

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::from_lookup(|_| None);
        config.output_dir = dir.to_path_buf();
        config
    }

    fn print_args(ids: &[&str], format: &str) -> PrintArgs {
        PrintArgs {
            ids: ids.iter().map(|s| s.to_string()).collect(),
            all: false,
            format: format.to_string(),
            copies: 1,
            fill_sheet: false,
            open: false,
            buy_supplies: false,
        }
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("a/photo.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("shot.png")), "image/png");
        assert_eq!(content_type_for(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn test_expiry_note() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut item = Item {
            id: "i1".into(),
            tub_id: "t1".into(),
            name: "Batteries".into(),
            description: None,
            image_url: None,
            expiry_date: None,
            tags: Vec::new(),
            user_id: None,
            created_at: None,
        };
        assert_eq!(expiry_note(&item, today), "");

        item.expiry_date = NaiveDate::from_ymd_opt(2026, 2, 28);
        assert_eq!(expiry_note(&item, today), " (EXPIRED 2026-02-28)");

        item.expiry_date = Some(today);
        assert_eq!(expiry_note(&item, today), " (expires 2026-03-01)");
    }

    #[test]
    fn test_exit_code() {
        let surface = anyhow::Error::from(AppError::from(PrintError::SurfaceUnavailable(
            "no display".into(),
        )));
        assert_eq!(exit_code(&surface), 2);
        assert_eq!(exit_code(&anyhow::Error::from(AppError::not_authenticated())), 3);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }

    #[tokio::test]
    async fn test_select_keeps_requested_order() {
        let ctx = demo_context();
        let selected = select_containers(&ctx, &print_args(&["mock-3", "mock-1"], "single"))
            .await
            .unwrap();
        let ids: Vec<&str> = selected.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["mock-3", "mock-1"]);
    }

    #[tokio::test]
    async fn test_select_repeated_id() {
        let ctx = demo_context();
        let selected = select_containers(&ctx, &print_args(&["mock-1", "mock-1"], "22806"))
            .await
            .unwrap();
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|c| c.id == "mock-1"));
    }

    #[test]
    fn test_repeat_labels_groups_copies() {
        let containers = vec![Container::named("a", "A"), Container::named("b", "B")];
        let ids: Vec<String> = repeat_labels(containers, 3)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, ["a", "a", "a", "b", "b", "b"]);
    }

    #[tokio::test]
    async fn test_fill_sheet_tiles_one_container() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = demo_context();
        let mut args = print_args(&["mock-2"], "22806");
        args.fill_sheet = true;

        print(&ctx, &config_in(dir.path()), args).await.unwrap();

        let html = std::fs::read_to_string(dir.path().join("labels-22806-12.html")).unwrap();
        assert_eq!(html.matches("class=\"label\"").count(), 12);
    }

    #[tokio::test]
    async fn test_unencodable_qr_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = demo_context();
        let created = ctx
            .create_container(NewContainer::new("x".repeat(4000)))
            .await
            .unwrap();

        let err = print(&ctx, &config_in(dir.path()), print_args(&[created.id.as_str()], "single"))
            .await
            .unwrap_err();
        let app = err.downcast_ref::<AppError>().unwrap();
        assert_eq!(app.code, ErrorCode::QrEncodingFailed);
        assert_eq!(exit_code(&err), 2);
    }

    #[tokio::test]
    async fn test_select_unknown_id() {
        let ctx = demo_context();
        let err = select_containers(&ctx, &print_args(&["nope"], "single"))
            .await
            .unwrap_err();
        let app = err.downcast_ref::<AppError>().unwrap();
        assert_eq!(app.code, ErrorCode::ContainerNotFound);
    }

    #[tokio::test]
    async fn test_print_writes_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("labels");
        let ctx = demo_context();
        let mut args = print_args(&[], "22806");
        args.all = true;

        print(&ctx, &config_in(&out), args).await.unwrap();

        let html = std::fs::read_to_string(out.join("labels-22806-4.html")).unwrap();
        assert_eq!(html.matches("class=\"label\"").count(), 4);
        assert!(html.contains("window.print()"));
    }

    #[tokio::test]
    async fn test_print_rejects_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = demo_context();
        let err = print(&ctx, &config_in(dir.path()), print_args(&["mock-1"], "a4"))
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<AppError>().is_some());
    }

    #[tokio::test]
    async fn test_backup_then_restore() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = demo_context();
        let path = dir.path().join("backup.json");
        backup(&ctx, &config_in(dir.path()), Some(&path)).await.unwrap();

        let target = AppContext::new(
            Backend::from_shared(Arc::new(DemoBackend::empty())),
            Session::demo(),
        );
        restore(&target, &path).await.unwrap();
        assert_eq!(target.list_containers().await.len(), 4);
    }
}
