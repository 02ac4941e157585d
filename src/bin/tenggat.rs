//! tenggat CLI: operator interface to the case register.

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tenggat::config::Config;
use tenggat::deadline::{self, DeadlineTable};
use tenggat::docket::{CaseReview, Docket};
use tenggat::model::{AgeCategory, CaseField, NewCase, StageKey};
use tenggat::telemetry::init_logging;

#[derive(Parser)]
#[command(name = "tenggat", about = "Case-processing deadline tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check one stage date against its deadline
    Check {
        /// Stage date as recorded (e.g. 2023-01-05 or 05/01/2023)
        date: String,
        /// Stage key: spdp, berkas_tahap_1, p18_p19, p21, tahap_2
        #[arg(long)]
        stage: String,
        /// Age category: dewasa or anak
        #[arg(long, default_value = "dewasa")]
        age: String,
        /// Evaluate as of this date instead of today
        #[arg(long)]
        today: Option<String>,
    },
    /// Print the deadline windows in effect
    Policy,
    /// Case register operations
    Case {
        #[command(subcommand)]
        action: CaseAction,
    },
    /// List cases with overdue stages
    Overdue {
        /// Evaluate as of this date instead of today
        #[arg(long)]
        today: Option<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CaseAction {
    /// Register a new case
    Add {
        /// Suspect name
        nama_tersangka: String,
        /// Charged article
        #[arg(long)]
        pasal: Option<String>,
        /// SPDP receipt text
        #[arg(long)]
        spdp: Option<String>,
        /// Suspect is a minor
        #[arg(long)]
        anak: bool,
    },
    /// List all cases, overdue stages marked with `!`
    List {
        #[arg(long)]
        today: Option<String>,
    },
    /// Show one case with per-stage deadlines
    Show {
        id: i64,
        #[arg(long)]
        today: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Edit one field; omit the value to clear it
    Set {
        id: i64,
        /// berkas_tahap_1, p18_p19, p21, tahap_2, limpah_pn, keterangan, kategori_usia
        field: String,
        value: Option<String>,
        /// Evaluate the edited stage as of this date instead of today
        #[arg(long)]
        today: Option<String>,
    },
    /// Delete a case
    Delete { id: i64 },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    init_logging(&config.log_level)?;
    let table = config.deadline_table()?;

    match cli.command {
        Command::Check {
            date,
            stage,
            age,
            today,
        } => cmd_check(&table, &date, &stage, &age, today.as_deref()),
        Command::Policy => {
            cmd_policy(&table);
            Ok(())
        }
        Command::Case { action } => {
            let mut docket = open_docket(&config, table)?;
            match action {
                CaseAction::Add {
                    nama_tersangka,
                    pasal,
                    spdp,
                    anak,
                } => cmd_case_add(&mut docket, nama_tersangka, pasal, spdp, anak),
                CaseAction::List { today } => cmd_case_list(&docket, resolve_today(today.as_deref())?),
                CaseAction::Show { id, today, json } => {
                    cmd_case_show(&docket, id, resolve_today(today.as_deref())?, json)
                }
                CaseAction::Set {
                    id,
                    field,
                    value,
                    today,
                } => cmd_case_set(
                    &mut docket,
                    id,
                    &field,
                    value.as_deref(),
                    resolve_today(today.as_deref())?,
                ),
                CaseAction::Delete { id } => {
                    docket.delete(id)?;
                    println!("Deleted case {id}.");
                    Ok(())
                }
            }
        }
        Command::Overdue { today, json } => {
            let docket = open_docket(&config, table)?;
            cmd_overdue(&docket, resolve_today(today.as_deref())?, json)
        }
    }
}

fn open_docket(config: &Config, table: DeadlineTable) -> anyhow::Result<Docket> {
    let docket = Docket::open(&config.database_path).with_context(|| {
        format!("cannot open case register {}", config.database_path.display())
    })?;
    Ok(docket.with_table(table))
}

/// `--today` accepts the same formats as stage dates.
fn resolve_today(today: Option<&str>) -> anyhow::Result<NaiveDate> {
    match today {
        Some(text) => deadline::parse_date(Some(text))
            .ok_or_else(|| anyhow::anyhow!("invalid --today date: {text}")),
        None => Ok(deadline::today()),
    }
}

fn cmd_check(
    table: &DeadlineTable,
    date: &str,
    stage: &str,
    age: &str,
    today: Option<&str>,
) -> anyhow::Result<()> {
    let stage: StageKey = stage.parse()?;
    let age: AgeCategory = age.parse()?;
    let now = resolve_today(today)?;

    match deadline::evaluate_text(table, Some(date), stage, age, now) {
        None => println!("{stage}: no usable date in {date:?}; not overdue"),
        Some(status) => {
            println!("Stage:      {} ({})", stage.label(), stage);
            println!("Age:        {age}");
            println!("Window:     {} day(s)", status.window_days);
            println!("Stage date: {}", status.stage_date);
            match status.deadline {
                Some(deadline) => println!("Deadline:   {deadline}"),
                None => println!("Deadline:   beyond calendar range"),
            }
            println!("As of:      {now}");
            println!(
                "Status:     {}",
                if status.overdue { "OVERDUE" } else { "on time" }
            );
            if let Some(days) = status.days_remaining {
                println!("Remaining:  {days} day(s)");
            }
        }
    }
    Ok(())
}

fn cmd_policy(table: &DeadlineTable) {
    println!("{:<16}  {:>6}  {:>6}", "STAGE", "DEWASA", "ANAK");
    println!("{}", "-".repeat(32));
    for stage in StageKey::ALL {
        println!(
            "{:<16}  {:>6}  {:>6}",
            stage.as_str(),
            table.window(stage, AgeCategory::Dewasa),
            table.window(stage, AgeCategory::Anak)
        );
    }
}

fn cmd_case_add(
    docket: &mut Docket,
    nama_tersangka: String,
    pasal: Option<String>,
    spdp: Option<String>,
    anak: bool,
) -> anyhow::Result<()> {
    let mut new = NewCase::new(nama_tersangka);
    if let Some(pasal) = pasal {
        new = new.pasal(pasal);
    }
    if let Some(spdp) = spdp {
        new = new.spdp(spdp);
    }
    if anak {
        new = new.anak();
    }

    let case = docket.add_case(new)?;
    println!("Created case {} ({})", case.id, case.kategori_usia);
    Ok(())
}

fn cmd_case_list(docket: &Docket, today: NaiveDate) -> anyhow::Result<()> {
    let cases = docket.list()?;
    if cases.is_empty() {
        println!("No cases found.");
        return Ok(());
    }

    print!("{:<5}  {:<24}  {:<6}", "ID", "NAMA TERSANGKA", "USIA");
    for stage in StageKey::ALL {
        print!("  {:<14}", stage.as_str());
    }
    println!();
    println!("{}", "-".repeat(41 + 16 * StageKey::ALL.len()));

    for case in &cases {
        let review = docket.review(case, today);
        print!(
            "{:<5}  {:<24}  {:<6}",
            case.id,
            truncate(&case.nama_tersangka, 24),
            case.kategori_usia.as_str()
        );
        for stage in &review.stages {
            let text = stage.raw.as_deref().unwrap_or("-");
            let mark = if stage.overdue { "!" } else { "" };
            print!("  {:<14}", format!("{}{mark}", truncate(text, 13)));
        }
        println!();
    }

    println!("\n{} case(s) as of {today}", cases.len());
    Ok(())
}

fn cmd_case_show(docket: &Docket, id: i64, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let case = docket.get(id)?;
    let review = docket.review(&case, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&review)?);
        return Ok(());
    }

    println!("ID:         {}", case.id);
    println!("Tersangka:  {}", case.nama_tersangka);
    println!("Pasal:      {}", case.pasal.as_deref().unwrap_or("-"));
    println!("Usia:       {}", case.kategori_usia);
    println!("Limpah PN:  {}", case.limpah_pn.as_deref().unwrap_or("-"));
    println!("Keterangan: {}", case.keterangan.as_deref().unwrap_or("-"));
    println!("Created:    {}", case.created_at.format("%Y-%m-%d %H:%M"));
    println!("---");
    print_stages(&review);
    Ok(())
}

fn cmd_case_set(
    docket: &mut Docket,
    id: i64,
    field: &str,
    value: Option<&str>,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let field: CaseField = field.parse()?;
    let case = docket.update_field(id, field, value)?;

    if let Some(stage) = field.stage() {
        let overdue = deadline::check_overdue(
            docket.table(),
            case.stage_text(stage),
            stage,
            case.kategori_usia,
            today,
        );
        println!(
            "Updated {field} on case {id}{}",
            if overdue { " (OVERDUE)" } else { "" }
        );
    } else {
        println!("Updated {field} on case {id}");
    }
    Ok(())
}

fn cmd_overdue(docket: &Docket, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let reviews = docket.overdue(today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reviews)?);
        return Ok(());
    }

    if reviews.is_empty() {
        println!("No overdue stages as of {today}.");
        return Ok(());
    }

    for review in &reviews {
        println!(
            "Case {}: {} ({})",
            review.case_id, review.nama_tersangka, review.kategori_usia
        );
        let stages: Vec<&str> = review.overdue_stages().map(StageKey::label).collect();
        println!("  overdue: {}", stages.join(", "));
    }
    println!("\n{} case(s) overdue as of {today}", reviews.len());
    Ok(())
}

fn print_stages(review: &CaseReview) {
    println!(
        "{:<16}  {:<20}  {:<10}  {:>9}  STATUS",
        "STAGE", "RECORDED", "DEADLINE", "REMAINING"
    );
    for stage in &review.stages {
        let raw = stage.raw.as_deref().unwrap_or("-");
        let (deadline, remaining) = match &stage.status {
            Some(status) => (
                status
                    .deadline
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                status
                    .days_remaining
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        let state = match (&stage.status, stage.overdue) {
            (_, true) => "OVERDUE",
            (Some(_), false) => "on time",
            (None, false) => "no date",
        };
        println!(
            "{:<16}  {:<20}  {:<10}  {:>9}  {state}",
            stage.stage.label(),
            truncate(raw, 20),
            deadline,
            remaining
        );
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
