mod config;
mod logger;

use std::path::PathBuf;

use anyhow::{Context, Result};
use branch_slots::{
    day_availability, parse_iso_date, AppointmentRequest, ContactInfo, DateRange, DayAvailability,
    Directory,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "branch-slots",
    version,
    about = "Browse bank branches and book half-hour appointments"
)]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON directory of topics, branches and bookings (overrides the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the services that can be booked
    Topics,
    /// List the branches that offer a service
    Branches {
        #[arg(long)]
        topic: u32,
    },
    /// Show open slots at a branch on a date
    Slots {
        #[arg(long)]
        branch: u32,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
    /// Validate and book an appointment
    Book {
        #[arg(long)]
        topic: u32,
        #[arg(long)]
        branch: u32,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        time: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Treat this date as today (YYYY-MM-DD) instead of the clock
        #[arg(long)]
        today: Option<String>,
        /// Write the new booking back to the data file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let data_path = cli.data.clone().or_else(|| config.data.clone());
    let mut directory = match &data_path {
        Some(path) => Directory::load(path)
            .with_context(|| format!("failed to load directory {}", path.display()))?,
        None => Directory::seed(),
    };

    match cli.command {
        Command::Topics => {
            if cli.json {
                return print_json(&directory.topics);
            }
            for topic in &directory.topics {
                println!("{:>3}  {:<28} {}", topic.id, topic.name, topic.description);
            }
        }
        Command::Branches { topic } => {
            let topic = directory
                .topic(topic)
                .with_context(|| format!("unknown topic {topic}"))?;
            let branches = directory.branches_for_topic(topic.id);
            if cli.json {
                return print_json(&branches);
            }
            println!("Branches offering {}:", topic.name);
            for branch in branches {
                println!("{:>3}  {}", branch.id, branch.name);
                println!("     {}", branch.address);
                println!(
                    "     Mon-Fri {} | Sat {}",
                    branch.business_hours.weekday, branch.business_hours.saturday
                );
            }
        }
        Command::Slots { branch, date } => {
            let hours = config.hours.operating_hours()?;
            let branch = directory
                .branch(branch)
                .with_context(|| format!("unknown branch {branch}"))?;
            let day = day_availability(Some(&date), Some(branch), &directory.booked, &hours)?;
            if cli.json {
                return print_json(&day);
            }
            match day {
                DayAvailability::Open(slots) => {
                    for slot in slots {
                        println!("{slot}");
                    }
                }
                DayAvailability::Closed => println!("Branch is closed on this day."),
                DayAvailability::FullyBooked | DayAvailability::Unselected => {
                    println!("No available slots for this date. Please select another date.")
                }
            }
        }
        Command::Book {
            topic,
            branch,
            date,
            time,
            first_name,
            last_name,
            email,
            phone,
            today,
            save,
        } => {
            if save && data_path.is_none() {
                anyhow::bail!("--save needs a data file (--data or `data` in the config)");
            }
            let hours = config.hours.operating_hours()?;
            let today = match today {
                Some(s) => parse_iso_date(&s).context("invalid --today")?,
                None => config.booking.today()?,
            };
            let range = DateRange::from_today(today, config.booking.max_days_ahead);
            let request = AppointmentRequest {
                contact: ContactInfo {
                    first_name,
                    last_name,
                    email,
                    phone,
                },
                topic_id: topic,
                branch_id: branch,
                date,
                time,
            };

            let confirmation = directory.book(&request, &hours, &range)?;
            if let Some(path) = data_path.as_ref().filter(|_| save) {
                directory
                    .save(path)
                    .with_context(|| format!("failed to save directory {}", path.display()))?;
            }

            if cli.json {
                return print_json(&confirmation);
            }
            println!("Appointment Confirmed!");
            println!();
            println!(
                "  Contact:   {} {}",
                confirmation.first_name, confirmation.last_name
            );
            println!("             {}", confirmation.email);
            println!("             {}", confirmation.phone);
            println!("  Service:   {}", confirmation.topic);
            println!("  Location:  {}", confirmation.branch_name);
            println!("             {}", confirmation.branch_address);
            println!("  When:      {}", confirmation.long_date);
            println!("             {}", confirmation.time);
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
