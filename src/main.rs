//! main.rs
use anyhow::Context;
use clap::{Parser, Subcommand};
use newsletter_signup::configuration::get_configuration;
use newsletter_signup::console::Console;
use newsletter_signup::domain::SubscriberDraft;
use newsletter_signup::subscription_client::SubscriptionClient;
use newsletter_signup::telemetry::{get_subscriber, init_subscriber};
use newsletter_signup::unsubscribe::UnsubscribeForm;
use newsletter_signup::wizard::SubscribeWizard;

#[derive(Parser)]
#[command(name = "newsletter-signup", about = "Subscribe to or leave the daily digest")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk through the three-step subscribe form.
    Subscribe,
    /// Remove an email address from the list.
    Unsubscribe {
        #[arg(long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let subscriber = get_subscriber("newsletter-signup".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber)?;

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let client = SubscriptionClient::new(
        configuration.endpoint.base_url.clone(),
        configuration.endpoint.timeout(),
    )
    .context("Failed to build the HTTP client.")?;

    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());
    match cli.command {
        Command::Subscribe => {
            let mut draft = SubscriberDraft::default();
            draft.country_code = configuration
                .form
                .country_code()
                .map_err(anyhow::Error::msg)
                .context("Invalid default country code.")?;
            let mut wizard = SubscribeWizard::new(draft);
            console.run_subscribe(&mut wizard, &client).await
        }
        Command::Unsubscribe { email } => {
            let mut form = UnsubscribeForm::new(email.unwrap_or_default());
            console.run_unsubscribe(&mut form, &client).await
        }
    }
}
