//! src/console.rs
//!
//! Line-based terminal front end for the subscribe wizard and the
//! unsubscribe form.
use anyhow::Context;
use std::io::{BufRead, Write};

use crate::domain::{
    ArticleMode, COUNTRY_CODES, CountryCode, MAX_PER_TOPIC, MAX_TAGS, PREDEFINED_TAGS,
    SIMPLE_COUNTS, TagChange,
};
use crate::subscription_client::SubscriptionClient;
use crate::unsubscribe::UnsubscribeForm;
use crate::wizard::{SUCCESS_DETAIL, SUCCESS_HEADLINE, Step, SubscribeWizard};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the wizard until the endpoint accepts the subscription.
    #[tracing::instrument(name = "Running the subscribe wizard", skip_all)]
    pub async fn run_subscribe(
        &mut self,
        wizard: &mut SubscribeWizard,
        client: &SubscriptionClient,
    ) -> Result<(), anyhow::Error> {
        while !wizard.is_submitted() {
            writeln!(self.output, "\n{}", wizard.progress())?;
            match wizard.step() {
                Step::PersonalDetails => self.personal_details(wizard)?,
                Step::Topics => self.topics(wizard)?,
                Step::ArticlePlan => self.article_plan(wizard, client).await?,
            }
        }
        writeln!(self.output, "\n✓ {}\n{}", SUCCESS_HEADLINE, SUCCESS_DETAIL)?;
        Ok(())
    }

    #[tracing::instrument(name = "Running the unsubscribe form", skip_all)]
    pub async fn run_unsubscribe(
        &mut self,
        form: &mut UnsubscribeForm,
        client: &SubscriptionClient,
    ) -> Result<(), anyhow::Error> {
        loop {
            while form.email.trim().is_empty() {
                form.email = self.ask("Email ID", "")?;
            }
            writeln!(self.output, "Unsubscribing…")?;
            let outcome = form.submit(client).await.cloned();
            if let Some(e) = form.error() {
                writeln!(self.output, "{}", e)?;
                form.email.clear();
                continue;
            }
            if let Some(outcome) = outcome {
                writeln!(self.output, "{}", outcome.message())?;
            }
            return Ok(());
        }
    }

    fn personal_details(&mut self, wizard: &mut SubscribeWizard) -> Result<(), anyhow::Error> {
        writeln!(
            self.output,
            "Press enter to keep the value in brackets, or type - to clear it."
        )?;
        let current = wizard.draft().clone();
        let first_name = self.ask("First Name *", &current.first_name)?;
        let last_name = self.ask("Last Name *", &current.last_name)?;
        let email = self.ask("Email ID *", &current.email)?;
        let codes = COUNTRY_CODES
            .iter()
            .map(|(code, country)| format!("{} {}", code, country))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(self.output, "Country codes: {}", codes)?;
        let country_code = self.ask("Country code", current.country_code.as_ref())?;
        let mobile = self.ask("Mobile (optional)", &current.mobile)?;

        let draft = wizard.draft_mut();
        draft.first_name = first_name;
        draft.last_name = last_name;
        draft.email = email;
        draft.mobile = mobile;
        match CountryCode::parse(&country_code) {
            Ok(code) => draft.country_code = code,
            Err(e) => writeln!(self.output, "{}", e)?,
        }

        if let Err(e) = wizard.next() {
            writeln!(self.output, "{}", e)?;
        }
        Ok(())
    }

    fn topics(&mut self, wizard: &mut SubscribeWizard) -> Result<(), anyhow::Error> {
        let tags = wizard.draft().tags();
        writeln!(self.output, "{} / {} tags selected", tags.len(), MAX_TAGS)?;
        for (i, label) in PREDEFINED_TAGS.iter().enumerate() {
            let mark = if tags.contains(label) { "x" } else { " " };
            writeln!(self.output, "{:>2}. [{}] {}", i + 1, mark, label)?;
        }
        let custom: Vec<String> = tags.custom_tags().map(|t| t.to_string()).collect();
        if !custom.is_empty() {
            writeln!(self.output, "Custom: {}", custom.join(", "))?;
        }
        writeln!(
            self.output,
            "Number toggles a tag, +name adds a custom tag, -name removes one, next or back."
        )?;

        let command = self.read_command()?;
        match command.as_str() {
            "" | "next" => {
                if let Err(e) = wizard.next() {
                    writeln!(self.output, "{}", e)?;
                }
            }
            "back" => {
                wizard.back();
            }
            _ => {
                let change = if let Some(label) = command.strip_prefix('+') {
                    wizard.draft_mut().add_custom_tag(label)
                } else if let Some(label) = command.strip_prefix('-') {
                    wizard.draft_mut().remove_tag(label.trim())
                } else if let Some(label) = command
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| PREDEFINED_TAGS.get(i))
                {
                    wizard.draft_mut().toggle_tag(label)
                } else {
                    writeln!(self.output, "Unrecognised command: {}", command)?;
                    return Ok(());
                };
                if change == TagChange::Unchanged {
                    writeln!(self.output, "No change to the selected tags.")?;
                }
            }
        }
        Ok(())
    }

    async fn article_plan(
        &mut self,
        wizard: &mut SubscribeWizard,
        client: &SubscriptionClient,
    ) -> Result<(), anyhow::Error> {
        let draft = wizard.draft();
        writeln!(self.output, "Mode: {}", draft.article_mode().as_str())?;
        match draft.article_mode() {
            ArticleMode::Simple => {
                let counts = SIMPLE_COUNTS.map(|n| n.to_string()).join(", ");
                writeln!(
                    self.output,
                    "Articles per newsletter: {} (choose {})",
                    draft.simple_count, counts
                )?;
            }
            ArticleMode::PerTopic => {
                let distribution = draft.topic_distribution();
                let verdict = if distribution.is_valid_total() {
                    "(multiple of 5 ✓)"
                } else {
                    "(must be multiple of 5)"
                };
                writeln!(
                    self.output,
                    "Total: {} articles {}",
                    distribution.total(),
                    verdict
                )?;
                for tag in draft.tags().iter() {
                    let count = distribution.get(tag.as_ref()).unwrap_or(0);
                    writeln!(self.output, "  {} = {}", tag, count)?;
                }
            }
        }
        writeln!(
            self.output,
            "simple, topic, a count, Tag=count (0-{}), back or submit.",
            MAX_PER_TOPIC
        )?;

        let command = self.read_command()?;
        match command.as_str() {
            "" | "submit" => {
                writeln!(self.output, "Subscribing…")?;
                wizard.submit(client).await;
                if let Some(message) = wizard.submit_error() {
                    writeln!(self.output, "{}", message)?;
                }
                for step in [Step::PersonalDetails, Step::Topics, Step::ArticlePlan] {
                    if let Some(e) = wizard.step_error(step) {
                        writeln!(self.output, "{}", e)?;
                        break;
                    }
                }
            }
            "back" => {
                wizard.back();
            }
            "simple" => {
                wizard.draft_mut().set_article_mode(ArticleMode::Simple);
            }
            "topic" => {
                if !wizard.draft_mut().set_article_mode(ArticleMode::PerTopic) {
                    writeln!(self.output, "Per-topic mode needs at least 2 tags.")?;
                }
            }
            _ => {
                if let Some((label, count)) = command.rsplit_once('=') {
                    let outcome = count
                        .trim()
                        .parse::<u32>()
                        .map_err(|e| e.to_string())
                        .and_then(|count| wizard.draft_mut().set_topic_count(label.trim(), count));
                    if let Err(e) = outcome {
                        writeln!(self.output, "{}", e)?;
                    }
                } else {
                    match command.parse::<u32>() {
                        Ok(count) if SIMPLE_COUNTS.contains(&count) => {
                            wizard.draft_mut().simple_count = count;
                        }
                        _ => writeln!(self.output, "Unrecognised command: {}", command)?,
                    }
                }
            }
        }
        Ok(())
    }

    /// Prompts with the current value. Enter keeps it, `-` clears it.
    fn ask(&mut self, label: &str, current: &str) -> Result<String, anyhow::Error> {
        if current.is_empty() {
            write!(self.output, "{}: ", label)?;
        } else {
            write!(self.output, "{} [{}]: ", label, current)?;
        }
        self.output.flush()?;
        let line = self.read_line()?;
        Ok(match line.as_str() {
            "" => current.to_string(),
            "-" => String::new(),
            _ => line,
        })
    }

    fn read_command(&mut self) -> Result<String, anyhow::Error> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(self.read_line()?.trim().to_string())
    }

    /// The line without its terminator. End of input is an error because
    /// the form can never be completed after it.
    fn read_line(&mut self) -> Result<String, anyhow::Error> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from the terminal.")?;
        if read == 0 {
            anyhow::bail!("Input closed before the form was finished.");
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}
