//! Book a course from the terminal.
//!
//! ```text
//! book --course-id 1 --name "Jane Doe" --email jane@example.com
//! ```
use clap::Parser;
use coursebook::client::{
    render_stats, BookingApi, InMemoryForm, Notifier, StatsRefresh, SubmissionHandler,
};
use coursebook::telemetry::{get_subscriber, init_subscriber};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address of the booking service.
    #[arg(long, env = "COURSEBOOK_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(short, long)]
    course_id: i64,

    /// Full name of the person booking.
    #[arg(short, long, default_value = "")]
    name: String,

    #[arg(short, long, default_value = "")]
    email: String,
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = get_subscriber("book".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber);

    let args = Args::parse();
    let api = BookingApi::new(args.base_url);
    let form = InMemoryForm::new(args.name, args.email);

    let refresh = StatsRefresh::new(api.clone());
    let handler = SubmissionHandler::new(api, args.course_id, TerminalNotifier, refresh);

    let outcome = handler.submit(&form).await;
    if let Some(stats) = handler.hook().finish().await {
        println!();
        print!("{}", render_stats(&stats));
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
