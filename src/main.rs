use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use center_admin::client::dto::TokenPair;
use center_admin::config::ApiConfig;
use center_admin::error::AppError;
use center_admin::format::{self, DurationStyle};
use center_admin::listing::{Page, StudentFilter};
use center_admin::models::{OtRequest, PayrollQuery};
use center_admin::ot::{BreakdownRow, OtDecision};
use center_admin::qr::QrSubject;
use center_admin::schedule::{WeeklySchedule, summarize_day};
use center_admin::state::AppState;

#[derive(Parser)]
#[command(name = "center-admin")]
#[command(about = "Admin console for the tutoring center backend", long_about = None)]
struct Cli {
    /// Overrides API_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored access/refresh tokens
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    Classes {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Students {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        class_code: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Parents {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Staff {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Users {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Shifts {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Roles {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Review and decide overtime requests
    Ot {
        #[command(subcommand)]
        action: OtAction,
    },
    /// Print the calendar of the week containing DATE (default today)
    Week {
        date: Option<NaiveDate>,
    },
    Payroll {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        #[arg(long)]
        staff_id: Option<i64>,
    },
    /// Print the payload of a student or staff QR code
    Qr {
        kind: QrKind,
        id: i64,
    },
    Delete {
        resource: Resource,
        id: i64,
        /// Required, deletions cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    Set {
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        refresh_token: String,
    },
    Clear,
}

#[derive(Subcommand)]
enum OtAction {
    Pending,
    Show {
        id: i64,
    },
    /// Rows are ROLE:HOURS:MINUTES[:MULTIPLIER]
    Approve {
        id: i64,
        #[arg(long = "row", required = true, value_parser = parse_row)]
        rows: Vec<BreakdownRow>,
        #[arg(long)]
        notes: Option<String>,
    },
    Reject {
        id: i64,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum QrKind {
    Student,
    Staff,
}

#[derive(Clone, Copy, ValueEnum)]
enum Resource {
    Class,
    Student,
    Parent,
    Staff,
    User,
    Role,
    Shift,
    Report,
    Assignment,
}

fn parse_row(raw: &str) -> Result<BreakdownRow, String> {
    let parts: Vec<&str> = raw.split(':').collect();
    let number_error = |what: &str| format!("invalid {} in row {:?}", what, raw);

    match parts.as_slice() {
        [role, hours, minutes] | [role, hours, minutes, _] => {
            let hours = hours.parse().map_err(|_| number_error("hours"))?;
            let minutes = minutes.parse().map_err(|_| number_error("minutes"))?;
            let multiplier = match parts.get(3) {
                Some(m) => m.parse().map_err(|_| number_error("multiplier"))?,
                None => 1.0,
            };
            Ok(BreakdownRow::new(*role, hours, minutes, multiplier))
        }
        _ => Err(format!("expected ROLE:HOURS:MINUTES[:MULTIPLIER], got {:?}", raw)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "center_admin=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = ApiConfig::new_from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }
    info!("Using backend {}", config.base_url);

    let state = AppState::connect(&config).await?;

    if let Err(e) = run(&state, cli.command).await {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(state: &AppState, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Session { action } => match action {
            SessionAction::Set {
                access_token,
                refresh_token,
            } => {
                state
                    .tokens
                    .save(&TokenPair {
                        access_token,
                        refresh_token,
                    })
                    .await?;
                println!("Session stored.");
            }
            SessionAction::Clear => {
                state.tokens.clear().await?;
                println!("Session cleared.");
            }
        },
        Commands::Classes { search, page } => {
            let page = state.classes().page(&search, page).await?;
            print_page(&page, |c| format!("{:>5}  {:<12} {}", c.id, c.class_code, c.class_name));
        }
        Commands::Students {
            search,
            class_code,
            gender,
            page,
        } => {
            let filter = StudentFilter {
                search,
                class_code,
                gender,
            };
            let today = Local::now().date_naive();
            let page = state.students().page(&filter, page).await?;
            print_page(&page, |s| {
                let age = s.age_on(today).map(|a| a.to_string()).unwrap_or_else(|| "?".to_string());
                let classes: Vec<&str> = s.class_codes().collect();
                format!("{:>5}  {:<28} {:>3}  {}", s.id, s.full_name, age, classes.join(", "))
            });
        }
        Commands::Parents { search, page } => {
            let page = state.parents().page(&search, page).await?;
            print_page(&page, |p| {
                format!("{:>5}  {:<28} {}", p.id, p.full_name, p.phone_number.as_deref().unwrap_or("-"))
            });
        }
        Commands::Staff { search, page } => {
            let page = state.staff().page(&search, page).await?;
            print_page(&page, |staff| {
                let rates = if staff.is_fixed_salary() {
                    "fixed salary".to_string()
                } else {
                    staff
                        .rates
                        .iter()
                        .map(|(role, rate)| format!("{}={}", role, format::format_vnd(*rate)))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                format!("{:>5}  {:<28} {}", staff.id, staff.full_name, rates)
            });
        }
        Commands::Users { search, page } => {
            let page = state.users().page(&search, page).await?;
            print_page(&page, |user| {
                format!(
                    "{:>5}  {:<28} {:<32} {}",
                    user.id,
                    user.display_name(),
                    user.email,
                    user.role.as_deref().unwrap_or("-")
                )
            });
        }
        Commands::Shifts { search, page } => {
            let page = state.shifts().page(&search, page).await?;
            print_page(&page, |shift| {
                format!(
                    "{:>5}  {:<20} {} - {}  x{}",
                    shift.id, shift.name, shift.start_time, shift.end_time, shift.ot_multiplier
                )
            });
        }
        Commands::Roles { search, page } => {
            let page = state.roles().page(&search, page).await?;
            print_page(&page, |role| format!("{:>5}  {:<20} {}", role.id, role.key, role.name));
        }
        Commands::Ot { action } => run_ot(state, action).await?,
        Commands::Week { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let mut calendar = WeeklySchedule::new();
            state.schedules().refresh(&mut calendar).await?;
            for event in calendar.events_in_week(date) {
                println!(
                    "{} {} - {}  {}  {}",
                    event.start.format("%a %d/%m"),
                    event.start.format("%H:%M"),
                    event.end.format("%H:%M"),
                    event.color,
                    event.title
                );
            }
        }
        Commands::Payroll { from, to, staff_id } => {
            let query = PayrollQuery {
                from_date: from,
                to_date: to,
                staff_id,
            };
            for row in state.payroll().report(&query).await? {
                println!("{:<28} {}", row.full_name, format::format_vnd(row.total_pay));
                for day in &row.daily_breakdown {
                    println!(
                        "    {}  {} - {}  {}",
                        format::format_date(&day.date),
                        day.check_in.as_deref().unwrap_or("??:??"),
                        day.check_out.as_deref().unwrap_or("??:??"),
                        format::format_vnd(day.daily_pay)
                    );
                }
            }
        }
        Commands::Qr { kind, id } => {
            let subject = match kind {
                QrKind::Student => QrSubject::Student(id),
                QrKind::Staff => QrSubject::Staff(id),
            };
            println!("{}", subject.payload());
        }
        Commands::Delete { resource, id, yes } => {
            if !yes {
                return Err(AppError::Validation("Pass --yes to confirm the deletion.".to_string()));
            }
            match resource {
                Resource::Class => state.classes().delete(id).await?,
                Resource::Student => state.students().delete(id).await?,
                Resource::Parent => state.parents().delete(id).await?,
                Resource::Staff => state.staff().delete(id).await?,
                Resource::User => state.users().delete(id).await?,
                Resource::Role => state.roles().delete(id).await?,
                Resource::Shift => state.shifts().delete(id).await?,
                Resource::Report => state.reports().delete(id).await?,
                Resource::Assignment => state.schedules().delete_assignment(id).await?,
            }
            println!("Deleted.");
        }
    }

    Ok(())
}

async fn run_ot(state: &AppState, action: OtAction) -> Result<(), AppError> {
    let service = state.ot_requests();

    match action {
        OtAction::Pending => {
            for request in service.pending().await? {
                println!(
                    "{:>5}  {}  {:<28} {}",
                    request.id,
                    format::format_date(&request.date),
                    request.staff_name(),
                    format::format_duration(request.detected_duration.as_ref(), DurationStyle::Long)
                );
            }
        }
        OtAction::Show { id } => {
            let request = find_request(state, id).await?;
            let summary = summarize_day(&request.attendances, &request.schedules);
            println!("{} on {}", request.staff_name(), format::format_date(&request.date));
            println!("Status:    {}", request.status);
            println!(
                "Detected:  {}",
                format::format_duration(request.detected_duration.as_ref(), DurationStyle::Long)
            );
            println!("Check-in/out: {}", summary.check_in_out());
            for line in &summary.assignment_lines {
                println!("  {}", line);
            }
            if summary.needs_split() {
                println!("Several roles applied this day, consider splitting the OT.");
            }
            if let Some(breakdown) = &request.breakdown {
                let value = format::DurationValue::Breakdown(breakdown.clone());
                println!("Breakdown: {}", format::format_duration(Some(&value), DurationStyle::Compact));
            }
        }
        OtAction::Approve { id, rows, notes } => {
            let request = find_request(state, id).await?;
            let staff = state.staff().get(request.staff_id).await?;
            let prepared = service.decide(&request, &staff, OtDecision::Approve { rows, notes }).await?;
            println!(
                "Approved {} of OT for {}.",
                DurationStyle::Long.render(prepared.entered_minutes / 60, prepared.entered_minutes % 60),
                request.staff_name()
            );
            if !prepared.is_balanced() {
                println!("Note: the rows do not add up to the detected duration.");
            }
        }
        OtAction::Reject { id, notes } => {
            let request = find_request(state, id).await?;
            let staff = state.staff().get(request.staff_id).await?;
            service.decide(&request, &staff, OtDecision::Reject { notes }).await?;
            println!("Rejected OT request {}.", id);
        }
    }

    Ok(())
}

async fn find_request(state: &AppState, id: i64) -> Result<OtRequest, AppError> {
    let requests = state.ot_requests().list(None, None).await?;
    requests
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::Validation(format!("OT request {} not found.", id)))
}

fn print_page<T>(page: &Page<T>, line: impl Fn(&T) -> String) {
    for item in &page.items {
        println!("{}", line(item));
    }
    println!(
        "Page {} of {} ({} matching)",
        page.page,
        page.total_pages().max(1),
        page.total_items
    );
}
