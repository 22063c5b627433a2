use chrono::{DateTime, Utc};
use colored::Colorize;
use rentlyapp::commands::{ActionMessage, ActionResult, MessageLevel};
use rentlyapp::model::{Message, Property};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_WIDTH: usize = 34;
const SUMMARY_WIDTH: usize = 30;
const TIME_WIDTH: usize = 14;
const PREVIEW_WIDTH: usize = 60;
const FEATURED_MARKER: &str = "★";
const UNREAD_MARKER: &str = "●";

pub fn print_messages(messages: &[ActionMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Render a command outcome: field errors first, then the messages.
pub fn print_action(result: &ActionResult) {
    for (field, problem) in &result.form_errors {
        println!("  {}: {}", field.yellow(), problem.red());
    }
    print_messages(&result.messages);
    if let Some(unread) = result.unread {
        println!("{unread} unread message(s)");
    }
}

pub fn print_properties(properties: &[Property]) {
    if properties.is_empty() {
        println!("No listings found.");
        return;
    }
    for property in properties {
        let marker = if property.is_featured {
            FEATURED_MARKER
        } else {
            " "
        };
        let title = truncate_to_width(&property.name, TITLE_WIDTH);
        let title_pad = " ".repeat(TITLE_WIDTH.saturating_sub(title.width()));
        let summary = truncate_to_width(
            &format!(
                "{} · {}, {}",
                property.property_type, property.location.city, property.location.state
            ),
            SUMMARY_WIDTH,
        );
        let summary_pad = " ".repeat(SUMMARY_WIDTH.saturating_sub(summary.width()));
        let rate = format!("{:>10}", display_rate(property));

        println!(
            "{} {}{} {}{} {} {}",
            marker.yellow(),
            title.bold(),
            title_pad,
            summary.dimmed(),
            summary_pad,
            rate.green(),
            format_time_ago(property.created_at).dimmed(),
        );
        println!("   {}", property.id.to_string().dimmed());
    }
}

pub fn print_property_full(property: &Property, favorited: Option<bool>) {
    let marker = if property.is_featured {
        format!(" {FEATURED_MARKER}")
    } else {
        String::new()
    };
    println!("{}{}", property.name.bold(), marker.yellow());
    println!(
        "{} · {} bd · {} ba · {} sqft",
        property.property_type,
        property.beds,
        format_baths(property.baths),
        property.square_feet
    );
    println!(
        "{}, {}, {} {}",
        property.location.street,
        property.location.city,
        property.location.state,
        property.location.zipcode
    );
    println!("{}", display_rates_full(property).green());
    if !property.amenities.is_empty() {
        println!("Amenities: {}", property.amenities.join(", "));
    }
    println!();
    println!("{}", property.description);
    println!();
    println!(
        "Contact: {} <{}> {}",
        property.seller_info.name, property.seller_info.email, property.seller_info.phone
    );
    println!(
        "{} image(s) · listed {}",
        property.images.len(),
        format_time_ago(property.created_at).trim()
    );
    if favorited == Some(true) {
        println!("{}", "♥ In your favorites".magenta());
    }
    println!("{}", property.id.to_string().dimmed());
}

pub fn print_inbox(messages: &[Message]) {
    if messages.is_empty() {
        println!("No messages.");
        return;
    }
    for message in messages {
        let marker = if message.read { " " } else { UNREAD_MARKER };
        println!(
            "{} {} <{}> {}",
            marker.cyan(),
            message.name.bold(),
            message.email,
            format_time_ago(message.created_at).dimmed(),
        );
        println!("   {}", truncate_to_width(&message.body, PREVIEW_WIDTH));
        println!("   {}", message.id.to_string().dimmed());
    }
}

fn display_rate(property: &Property) -> String {
    if let Some(monthly) = property.rates.monthly {
        format!("${monthly}/mo")
    } else if let Some(weekly) = property.rates.weekly {
        format!("${weekly}/wk")
    } else if let Some(nightly) = property.rates.nightly {
        format!("${nightly}/night")
    } else {
        "—".to_string()
    }
}

fn display_rates_full(property: &Property) -> String {
    let mut parts = Vec::new();
    if let Some(nightly) = property.rates.nightly {
        parts.push(format!("${nightly}/night"));
    }
    if let Some(weekly) = property.rates.weekly {
        parts.push(format!("${weekly}/wk"));
    }
    if let Some(monthly) = property.rates.monthly {
        parts.push(format!("${monthly}/mo"));
    }
    if parts.is_empty() {
        "No rates listed".to_string()
    } else {
        parts.join(" · ")
    }
}

fn format_baths(baths: f32) -> String {
    if baths.fract() == 0.0 {
        format!("{baths:.0}")
    } else {
        format!("{baths:.1}")
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let text = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{text:>width$}", width = TIME_WIDTH)
}
