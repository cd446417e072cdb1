use clap::{Parser, Subcommand};

mod cmd;
mod deductions;
mod invoice;
mod ledger;
mod money;
mod pricing;
mod records;
mod tax;

#[derive(Parser, Debug)]
#[command(
    name = "gigtax",
    version,
    about = "SARS tax compliance toolkit for South African gig workers and content creators"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full tax assessment for a year of assessment
    Report(cmd::report::ReportCommand),
    /// Aggregated totals, threshold progress and compliance status
    Summary(cmd::summary::SummaryCommand),
    /// Compliance status only; exits non-zero when action is overdue
    Compliance(cmd::compliance::ComplianceCommand),
    /// Record-level listing with filters
    Records(cmd::records::RecordsCommand),
    /// Surface data quality issues in the records
    Validate(cmd::validate::ValidateCommand),
    /// Per-expense deductibility analysis with SARS sections and caps
    Deductions(cmd::deductions::DeductionsCommand),
    /// Render an invoice from its JSON description
    Invoice(cmd::invoice::InvoiceCommand),
    /// Suggested price band for sponsored content
    Pricing(cmd::pricing::PricingCommand),
    /// SARS filing report export as CSV
    Export(cmd::export::ExportCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Report(c) => c.exec(),
        Command::Summary(c) => c.exec(),
        Command::Compliance(c) => c.exec(),
        Command::Records(c) => c.exec(),
        Command::Validate(c) => c.exec(),
        Command::Deductions(c) => c.exec(),
        Command::Invoice(c) => c.exec(),
        Command::Pricing(c) => c.exec(),
        Command::Export(c) => c.exec(),
        Command::Schema(c) => c.exec(),
    }
}
