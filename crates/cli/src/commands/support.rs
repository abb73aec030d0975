//! FAQ and contact commands

use anyhow::Result;
use colored::Colorize;
use planner_lib::contact::{ContactForm, ContactRecord};
use planner_lib::faq::FaqEntry;

use crate::client::ApiClient;
use crate::output::{format_timestamp, print_json, print_success, print_warning, OutputFormat};

/// Show frequently asked questions
pub async fn list_faqs(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let faqs: Vec<FaqEntry> = client.get("api/faqs").await?;

    match format {
        OutputFormat::Json => print_json(&faqs)?,
        OutputFormat::Table => {
            println!("{}", "Frequently Asked Questions".bold());
            println!("{}", "=".repeat(50));
            for (i, faq) in faqs.iter().enumerate() {
                println!();
                println!("{} {}", format!("{}.", i + 1).dimmed(), faq.question.bold());
                println!("   {}", faq.answer);
            }
        }
    }

    Ok(())
}

/// Unforwarded messages are not re-sent later
fn forwarding_note(record: &ContactRecord) -> Option<&'static str> {
    (!record.forwarded).then_some("Message was stored but could not be forwarded to support")
}

/// Send a message to the support inbox
pub async fn send_contact(
    client: &ApiClient,
    form: ContactForm,
    format: OutputFormat,
) -> Result<()> {
    // Fail fast on input the service would reject anyway
    let form = form.validate()?;
    let record: ContactRecord = client.post("api/contact", &form).await?;

    match format {
        OutputFormat::Json => print_json(&record)?,
        OutputFormat::Table => {
            print_success(&format!("Message received (id {})", record.id.cyan()));
            println!("Subject:   {}", record.subject);
            println!("Received:  {}", format_timestamp(&record.created_at));
            if let Some(note) = forwarding_note(&record) {
                print_warning(note);
            }
        }
    }

    Ok(())
}
