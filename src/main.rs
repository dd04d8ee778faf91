//! TicketNow Admin
//!
//! Command line entry point

use std::path::PathBuf;
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info, warn};

use ticketnow_admin::{
    config::Settings,
    models::{PaymentStatus, QueueStatus, RegisterRequest, ReservationStatus},
    screens::{
        forms::{
            BookingForm, EventForm, EventTypeForm, GuestDetails, PaymentLogForm, ReservationForm,
            TicketTypeForm, UserForm, WaitingQueueForm,
        },
        BookingsScreen, EventTypesScreen, EventsScreen, ListState, Outcome, PaymentLogsScreen,
        ReservationsScreen, TicketTypesScreen, UsersScreen, WaitingQueuesScreen,
    },
    table::{SortDirection, TableRow},
    ui::{Confirmer, ConsoleConfirmer},
    utils::logging,
    AdminError, ServiceFactory,
};

#[derive(Parser)]
#[command(name = "ticketnow-admin", version, about = "Administrative console for TicketNow")]
struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long, short, env = "TICKETNOW_CONFIG")]
    config: Option<PathBuf>,

    /// Bearer token for the backends
    #[arg(long, env = "TICKETNOW_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Answer yes to every confirmation
    #[arg(long, short)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and print the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TICKETNOW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account on the events backend
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TICKETNOW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        username: Option<String>,
    },
    /// Print the effective configuration (token masked)
    Config,
    #[command(subcommand)]
    Events(EventCommand),
    #[command(subcommand)]
    EventTypes(EventTypeCommand),
    #[command(subcommand)]
    Payments(PaymentCommand),
    #[command(subcommand)]
    Reservations(ReservationCommand),
    #[command(subcommand)]
    TicketTypes(TicketTypeCommand),
    #[command(subcommand)]
    Queues(QueueCommand),
    #[command(subcommand)]
    Users(UserCommand),
    /// Ticket reservations of the signed-in account
    #[command(subcommand)]
    Bookings(BookingCommand),
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Case-insensitive filter
    #[arg(long)]
    search: Option<String>,
    /// Column to sort by
    #[arg(long)]
    sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(Args, Debug, Default)]
struct EventArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    short_description: Option<String>,
    #[arg(long = "type")]
    event_type_id: Option<i64>,
    /// Start, `YYYY-MM-DDTHH:MM`
    #[arg(long)]
    start: Option<String>,
    /// End, `YYYY-MM-DDTHH:MM`
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    capacity: Option<i64>,
    #[arg(long)]
    price: Option<f64>,
    /// Image to upload
    #[arg(long)]
    image: Option<PathBuf>,
}

impl EventArgs {
    fn apply(self, form: &mut EventForm) {
        if let Some(v) = self.name {
            form.event_name = v;
        }
        if let Some(v) = self.description {
            form.description = v;
        }
        if let Some(v) = self.short_description {
            form.short_description = v;
        }
        if self.event_type_id.is_some() {
            form.event_type_id = self.event_type_id;
        }
        if let Some(v) = self.start {
            form.start_datetime = v;
        }
        if let Some(v) = self.end {
            form.end_datetime = v;
        }
        if let Some(v) = self.capacity {
            form.capacity = v;
        }
        if self.price.is_some() {
            form.base_price = self.price;
        }
        if self.image.is_some() {
            form.image_path = self.image;
        }
    }
}

#[derive(Subcommand)]
enum EventCommand {
    List(ListArgs),
    Show { id: i64 },
    Create(EventArgs),
    Update {
        id: i64,
        #[command(flatten)]
        args: EventArgs,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum EventTypeCommand {
    List(ListArgs),
    Show { id: i64 },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum PaymentCommand {
    List(ListArgs),
    Show { id: String },
    Create {
        #[arg(long)]
        reservation: String,
        /// pending, approved, failed or refunded
        #[arg(long)]
        status: String,
        #[arg(long)]
        amount: f64,
    },
    Update {
        id: String,
        #[arg(long)]
        reservation: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
enum ReservationCommand {
    List(ListArgs),
    Show { id: String },
    /// Change the status: pending, confirmed, cancelled or expired
    SetStatus {
        id: String,
        status: String,
        #[arg(long)]
        reason: Option<String>,
    },
    Cancel {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    Delete { id: String },
}

#[derive(Args, Debug, Default)]
struct TicketTypeArgs {
    #[arg(long)]
    event: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    max_quantity: Option<i64>,
    #[arg(long)]
    stock: Option<i64>,
    #[arg(long)]
    active: Option<bool>,
    #[arg(long)]
    sales_start: Option<String>,
    #[arg(long)]
    sales_end: Option<String>,
}

impl TicketTypeArgs {
    fn apply(self, form: &mut TicketTypeForm) {
        if let Some(v) = self.event {
            form.event_id = v;
        }
        if let Some(v) = self.name {
            form.name = v;
        }
        if let Some(v) = self.price {
            form.price = v;
        }
        if let Some(v) = self.max_quantity {
            form.max_quantity = v;
        }
        if let Some(v) = self.stock {
            form.current_stock = v;
        }
        if let Some(v) = self.active {
            form.is_active = v;
        }
        if let Some(v) = self.sales_start {
            form.sales_start_at = v;
        }
        if let Some(v) = self.sales_end {
            form.sales_end_at = v;
        }
    }
}

#[derive(Subcommand)]
enum TicketTypeCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only ticket types of this event
        #[arg(long)]
        event: Option<String>,
    },
    Show { id: String },
    Create(TicketTypeArgs),
    Update {
        id: String,
        #[command(flatten)]
        args: TicketTypeArgs,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
enum QueueCommand {
    List(ListArgs),
    Show { id: String },
    Create {
        #[arg(long)]
        reservation: String,
        #[arg(long)]
        event: String,
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "waiting")]
        status: String,
    },
    /// Tell the user a spot is available
    Notify { id: String },
    Delete { id: String },
}

#[derive(Subcommand)]
enum UserCommand {
    List(ListArgs),
    Show { id: i64 },
    Update {
        id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Deactivate or reactivate an account
    ToggleStatus { id: i64 },
}

#[derive(Subcommand)]
enum BookingCommand {
    List(ListArgs),
    Create {
        #[arg(long)]
        event: i64,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
    },
    /// Book without an account
    Guest {
        #[arg(long)]
        event: i64,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        quantity: i64,
    },
    Cancel { id: i64 },
    /// Save the ticket PDF to a file or directory
    Pdf {
        id: i64,
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
    },
    /// Check that the token is still accepted
    CheckToken,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Settings::new().context("Failed to load configuration")?,
    }
    .with_token(cli.token.clone());
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _guard = logging::init_logging(&settings.logging)?;
    info!(version = ticketnow_admin::VERSION, "Starting {}", ticketnow_admin::info());

    let services = ServiceFactory::new(&settings)?;
    let confirmer = ConsoleConfirmer::new(cli.yes);
    let app = App {
        settings,
        services,
        confirmer: &confirmer,
    };

    let result = app.run(cli.command).await;
    if let Some(e) = result.as_ref().err().and_then(|e| e.downcast_ref::<AdminError>()) {
        error!(
            severity = %e.severity(),
            recoverable = e.is_recoverable(),
            status = ?e.status(),
            "Command failed: {}", e
        );
    }
    result
}

struct App<'a> {
    settings: Settings,
    services: ServiceFactory,
    confirmer: &'a dyn Confirmer,
}

impl App<'_> {
    fn page_size(&self) -> usize {
        self.settings.dashboard.page_size
    }

    async fn run(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Login { email, password } => {
                let response = self.services.auth_service.login(&email, &password).await?;
                println!("{}", response.token);
            }
            Command::Register { email, password, username } => {
                let request = RegisterRequest { email, password, username };
                let response = self.services.auth_service.register(&request).await?;
                println!("{} (user {})", response.message, response.user.user_id);
            }
            Command::Config => {
                print!("{}", toml::to_string_pretty(&self.settings.redacted())?);
            }
            Command::Events(cmd) => self.events(cmd).await?,
            Command::EventTypes(cmd) => self.event_types(cmd).await?,
            Command::Payments(cmd) => self.payments(cmd).await?,
            Command::Reservations(cmd) => self.reservations(cmd).await?,
            Command::TicketTypes(cmd) => self.ticket_types(cmd).await?,
            Command::Queues(cmd) => self.queues(cmd).await?,
            Command::Users(cmd) => self.users(cmd).await?,
            Command::Bookings(cmd) => self.bookings(cmd).await?,
        }
        Ok(())
    }

    async fn events(&self, cmd: EventCommand) -> anyhow::Result<()> {
        let mut screen = EventsScreen::new(&self.services, self.page_size());
        match cmd {
            EventCommand::List(args) => {
                screen.refresh().await;
                show_list(screen.list_mut(), &args, "Events")?;
            }
            EventCommand::Show { id } => print_json(&screen.get(id).await?)?,
            EventCommand::Create(args) => {
                screen.refresh().await;
                ensure_loaded(screen.list())?;
                let mut form = EventForm::default();
                args.apply(&mut form);
                finish(screen.create(form, self.confirmer).await?)?;
            }
            EventCommand::Update { id, args } => {
                screen.refresh().await;
                ensure_loaded(screen.list())?;
                let mut form = EventForm::from_event(&screen.get(id).await?);
                args.apply(&mut form);
                finish(screen.update(id, form, self.confirmer).await?)?;
            }
            EventCommand::Delete { id } => {
                finish(screen.delete(id, self.confirmer).await?)?;
            }
        }
        Ok(())
    }

    async fn event_types(&self, cmd: EventTypeCommand) -> anyhow::Result<()> {
        let mut screen = EventTypesScreen::new(&self.services, self.page_size());
        match cmd {
            EventTypeCommand::List(args) => {
                screen.refresh().await;
                show_list(screen.list_mut(), &args, "Event types")?;
            }
            EventTypeCommand::Show { id } => print_json(&screen.get(id).await?)?,
            EventTypeCommand::Create { name, description } => {
                let form = EventTypeForm {
                    type_name: name,
                    description: description.unwrap_or_default(),
                };
                finish(screen.create(form, self.confirmer).await?)?;
            }
            EventTypeCommand::Update { id, name, description } => {
                let mut form = EventTypeForm::from_event_type(&screen.get(id).await?);
                if let Some(name) = name {
                    form.type_name = name;
                }
                if let Some(description) = description {
                    form.description = description;
                }
                finish(screen.update(id, form, self.confirmer).await?)?;
            }
            EventTypeCommand::Delete { id } => {
                finish(screen.delete(id, self.confirmer).await?)?;
            }
        }
        Ok(())
    }

    async fn payments(&self, cmd: PaymentCommand) -> anyhow::Result<()> {
        let mut screen = PaymentLogsScreen::new(&self.services, self.page_size());
        match cmd {
            PaymentCommand::List(args) => {
                screen.refresh().await;
                show_list(screen.list_mut(), &args, "Payments")?;
            }
            PaymentCommand::Show { id } => print_json(&screen.get(&id).await?)?,
            PaymentCommand::Create { reservation, status, amount } => {
                screen.refresh().await;
                ensure_loaded(screen.list())?;
                let form = PaymentLogForm {
                    reservation_id: reservation,
                    status: Some(status.parse::<PaymentStatus>()?),
                    amount,
                };
                finish(screen.create(form, self.confirmer).await?)?;
            }
            PaymentCommand::Update { id, reservation, status, amount } => {
                screen.refresh().await;
                ensure_loaded(screen.list())?;
                let mut form = PaymentLogForm::from_log(&screen.get(&id).await?);
                if let Some(reservation) = reservation {
                    form.reservation_id = reservation;
                }
                if let Some(status) = status {
                    form.status = Some(status.parse::<PaymentStatus>()?);
                }
                if let Some(amount) = amount {
                    form.amount = amount;
                }
                finish(screen.update(&id, form, self.confirmer).await?)?;
            }
            PaymentCommand::Delete { id } => {
                finish(screen.delete(&id, self.confirmer).await?)?;
            }
        }
        Ok(())
    }

    async fn reservations(&self, cmd: ReservationCommand) -> anyhow::Result<()> {
        let page_size = self.settings.dashboard.reservations_page_size;
        let mut screen = ReservationsScreen::new(&self.services, page_size);
        match cmd {
            ReservationCommand::List(args) => {
                screen.refresh().await;
                show_list(screen.list_mut(), &args, "Reservations")?;
            }
            ReservationCommand::Show { id } => print_json(&screen.get(&id).await?)?,
            ReservationCommand::SetStatus { id, status, reason } => {
                let form = ReservationForm {
                    status: Some(status.parse::<ReservationStatus>()?),
                    cancellation_reason: reason,
                };
                finish(screen.update(&id, form, self.confirmer).await?)?;
            }
            ReservationCommand::Cancel { id, reason } => {
                finish(screen.cancel(&id, reason.as_deref(), self.confirmer).await?)?;
            }
            ReservationCommand::Delete { id } => {
                finish(screen.delete(&id, self.confirmer).await?)?;
            }
        }
        Ok(())
    }

    async fn ticket_types(&self, cmd: TicketTypeCommand) -> anyhow::Result<()> {
        let mut screen = TicketTypesScreen::new(&self.services, self.page_size());
        match cmd {
            TicketTypeCommand::List { list, event } => {
                match event {
                    Some(event_id) => screen.refresh_for_event(&event_id).await,
                    None => screen.refresh().await,
                }
                show_list(screen.list_mut(), &list, "Ticket types")?;
            }
            TicketTypeCommand::Show { id } => print_json(&screen.get(&id).await?)?,
            TicketTypeCommand::Create(args) => {
                let mut form = TicketTypeForm {
                    event_id: String::new(),
                    name: String::new(),
                    price: 0.0,
                    max_quantity: 0,
                    current_stock: 0,
                    is_active: true,
                    sales_start_at: String::new(),
                    sales_end_at: String::new(),
                };
                args.apply(&mut form);
                finish(screen.create(form, self.confirmer).await?)?;
            }
            TicketTypeCommand::Update { id, args } => {
                let mut form = TicketTypeForm::from_ticket_type(&screen.get(&id).await?);
                args.apply(&mut form);
                finish(screen.update(&id, form, self.confirmer).await?)?;
            }
            TicketTypeCommand::Delete { id } => {
                finish(screen.delete(&id, self.confirmer).await?)?;
            }
        }
        Ok(())
    }

    async fn queues(&self, cmd: QueueCommand) -> anyhow::Result<()> {
        let mut screen = WaitingQueuesScreen::new(&self.services, self.page_size());
        match cmd {
            QueueCommand::List(args) => {
                screen.refresh().await;
                show_list(screen.list_mut(), &args, "Waiting queue")?;
            }
            QueueCommand::Show { id } => print_json(&screen.get(&id).await?)?,
            QueueCommand::Create { reservation, event, user, status } => {
                let form = WaitingQueueForm {
                    reservation_id: reservation,
                    event_id: event,
                    user_id: user,
                    status: status.parse::<QueueStatus>()?,
                };
                finish(screen.create(form, self.confirmer).await?)?;
            }
            QueueCommand::Notify { id } => {
                finish(screen.notify(&id, self.confirmer).await?)?;
            }
            QueueCommand::Delete { id } => {
                finish(screen.delete(&id, self.confirmer).await?)?;
            }
        }
        Ok(())
    }

    async fn users(&self, cmd: UserCommand) -> anyhow::Result<()> {
        let mut screen = UsersScreen::new(&self.services, self.page_size());
        match cmd {
            UserCommand::List(args) => {
                screen.refresh().await;
                show_list(screen.list_mut(), &args, "Users")?;
            }
            UserCommand::Show { id } => print_json(&screen.get(id).await?)?,
            UserCommand::Update { id, username, phone } => {
                let mut form = UserForm::from_user(&screen.get(id).await?);
                if username.is_some() {
                    form.username = username;
                }
                if phone.is_some() {
                    form.phone = phone;
                }
                finish(screen.update(id, form, self.confirmer).await?)?;
            }
            UserCommand::ToggleStatus { id } => {
                // The current status only picks the dialog wording
                screen.refresh().await;
                if let Some(error) = screen.list().error() {
                    warn!(error = %error, "Could not read the current user status");
                }
                if let Some(status) = finish(screen.toggle_status(id, self.confirmer).await?)? {
                    println!("User {} is now {}", id, if status { "active" } else { "inactive" });
                }
            }
        }
        Ok(())
    }

    async fn bookings(&self, cmd: BookingCommand) -> anyhow::Result<()> {
        let mut screen = BookingsScreen::new(&self.services, self.page_size());
        match cmd {
            BookingCommand::List(args) => {
                screen.refresh().await;
                show_list(screen.list_mut(), &args, "My reservations")?;
            }
            BookingCommand::Create { event, quantity } => {
                let form = BookingForm { event_id: event, quantity };
                finish(screen.create(form, self.confirmer).await?)?;
            }
            BookingCommand::Guest { event, quantity, name, email, phone } => {
                let form = BookingForm { event_id: event, quantity };
                let guest = GuestDetails { name, email, phone };
                if let Some(booking) = finish(screen.create_guest(form, guest, self.confirmer).await?)? {
                    print_json(&booking)?;
                }
            }
            BookingCommand::Update { id, quantity } => {
                let form = BookingForm { event_id: 0, quantity };
                finish(screen.update(id, form, self.confirmer).await?)?;
            }
            BookingCommand::Cancel { id } => {
                finish(screen.cancel(id, self.confirmer).await?)?;
            }
            BookingCommand::Pdf { id, output } => {
                let path = screen.download_ticket(id, &output).await?;
                println!("{}", path.display());
            }
            BookingCommand::CheckToken => {
                let valid = screen.check_session().await?;
                println!("{}", if valid { "Token is valid" } else { "Token is not valid" });
                if !valid {
                    bail!("The configured token was rejected");
                }
            }
        }
        Ok(())
    }
}

/// Fail when the last load did not succeed
fn ensure_loaded<R: TableRow>(list: &ListState<R>) -> anyhow::Result<()> {
    match list.error() {
        Some(error) => match error.cause() {
            Some(cause) => bail!("{}: {}", error.message(), cause),
            None => bail!("{}", error.message()),
        },
        None => Ok(()),
    }
}

/// Apply search, sort and page flags, then print the table
fn show_list<R: TableRow>(list: &mut ListState<R>, args: &ListArgs, title: &str) -> anyhow::Result<()> {
    ensure_loaded(list)?;
    if let Some(term) = &args.search {
        list.search(term);
    }
    if let Some(key) = &args.sort {
        let direction = if args.desc { SortDirection::Desc } else { SortDirection::Asc };
        list.set_sort(key, direction)?;
    }
    if args.page > 1 && !list.go_to_page(args.page - 1) {
        warn!(page = args.page, "Page out of range, showing the first page");
    }
    print!("{}", list.render(title));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Turn a mutation outcome into the process result
fn finish<T>(outcome: Outcome<T>) -> anyhow::Result<Option<T>> {
    match outcome {
        Outcome::Done(value) => Ok(Some(value)),
        Outcome::Cancelled => {
            println!("Cancelled.");
            Ok(None)
        }
        Outcome::Failed(e) => Err(e.into()),
    }
}
