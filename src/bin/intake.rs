use anyhow::Result;
use clap::{Parser, ValueEnum};
use prescreen::client::IntakeClient;
use prescreen::scoring::{ScoringRequest, ScoringResponse};

/// Collects the twelve applicant and loan attributes through
/// range-constrained arguments, submits them once, and renders the returned
/// classification. Mirrors the pre-screening intake form.
#[derive(Parser, Debug)]
#[command(
    name = "intake",
    about = "Collect applicant details and request a credit risk pre-screening",
    version
)]
struct Cli {
    /// Scoring service endpoint
    #[arg(long, default_value = "http://127.0.0.1:8080/predict")]
    endpoint: String,

    /// Loan amount, 1000 to 5000000
    #[arg(long, value_parser = parse_loan_amount)]
    loan_amnt: f64,

    /// Loan term
    #[arg(long, value_enum)]
    term: Term,

    /// Interest rate in percent, 5 to 40
    #[arg(long, value_parser = parse_interest_rate)]
    int_rate: f64,

    /// Credit score (FICO), 300 to 850
    #[arg(long, value_parser = clap::value_parser!(u32).range(300..=850))]
    fico_range_low: u32,

    /// Annual income, 50000 to 10000000
    #[arg(long, value_parser = parse_annual_income)]
    annual_inc: f64,

    /// Debt-to-income ratio in percent, 0 to 50
    #[arg(long, value_parser = parse_dti)]
    dti: f64,

    /// Employment length
    #[arg(long, value_enum)]
    emp_length: EmpLength,

    /// Loan purpose
    #[arg(long, value_enum)]
    purpose: Purpose,

    /// Open credit accounts, 0 to 100
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    open_acc: u32,

    /// Total credit accounts, 0 to 100
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    total_acc: u32,

    /// Revolving credit utilization in percent, 0 to 100
    #[arg(long, value_parser = parse_revol_util)]
    revol_util: f64,

    /// Credit inquiries in the last six months, 0 to 100
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    inq_last_6mths: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Term {
    #[value(name = "36")]
    ThirtySixMonths,
    #[value(name = "60")]
    SixtyMonths,
}

impl Term {
    /// Label the classifier was trained on.
    fn label(self) -> &'static str {
        match self {
            Term::ThirtySixMonths => "36 months",
            Term::SixtyMonths => "60 months",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmpLength {
    #[value(name = "lt-1")]
    LessThanOneYear,
    #[value(name = "1")]
    OneYear,
    #[value(name = "2")]
    TwoYears,
    #[value(name = "3")]
    ThreeYears,
    #[value(name = "4")]
    FourYears,
    #[value(name = "5")]
    FiveYears,
    #[value(name = "6")]
    SixYears,
    #[value(name = "7")]
    SevenYears,
    #[value(name = "8")]
    EightYears,
    #[value(name = "9")]
    NineYears,
    #[value(name = "10-plus")]
    TenPlusYears,
}

impl EmpLength {
    fn label(self) -> &'static str {
        match self {
            EmpLength::LessThanOneYear => "< 1 year",
            EmpLength::OneYear => "1 year",
            EmpLength::TwoYears => "2 years",
            EmpLength::ThreeYears => "3 years",
            EmpLength::FourYears => "4 years",
            EmpLength::FiveYears => "5 years",
            EmpLength::SixYears => "6 years",
            EmpLength::SevenYears => "7 years",
            EmpLength::EightYears => "8 years",
            EmpLength::NineYears => "9 years",
            EmpLength::TenPlusYears => "10+ years",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Purpose {
    DebtConsolidation,
    CreditCard,
    HomeImprovement,
    MajorPurchase,
    SmallBusiness,
    Car,
    Medical,
    House,
    Vacation,
    Moving,
    RenewableEnergy,
    Wedding,
    Educational,
    Other,
}

impl Purpose {
    fn label(self) -> &'static str {
        match self {
            Purpose::DebtConsolidation => "debt_consolidation",
            Purpose::CreditCard => "credit_card",
            Purpose::HomeImprovement => "home_improvement",
            Purpose::MajorPurchase => "major_purchase",
            Purpose::SmallBusiness => "small_business",
            Purpose::Car => "car",
            Purpose::Medical => "medical",
            Purpose::House => "house",
            Purpose::Vacation => "vacation",
            Purpose::Moving => "moving",
            Purpose::RenewableEnergy => "renewable_energy",
            Purpose::Wedding => "wedding",
            Purpose::Educational => "educational",
            Purpose::Other => "other",
        }
    }
}

fn parse_bounded(s: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !value.is_finite() || value < min || value > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(value)
}

fn parse_loan_amount(s: &str) -> Result<f64, String> {
    parse_bounded(s, 1000.0, 5_000_000.0)
}

fn parse_interest_rate(s: &str) -> Result<f64, String> {
    parse_bounded(s, 5.0, 40.0)
}

fn parse_annual_income(s: &str) -> Result<f64, String> {
    parse_bounded(s, 50_000.0, 10_000_000.0)
}

fn parse_dti(s: &str) -> Result<f64, String> {
    parse_bounded(s, 0.0, 50.0)
}

fn parse_revol_util(s: &str) -> Result<f64, String> {
    parse_bounded(s, 0.0, 100.0)
}

impl Cli {
    fn to_request(&self) -> ScoringRequest {
        ScoringRequest {
            loan_amnt: self.loan_amnt,
            term: self.term.label().to_string(),
            int_rate: self.int_rate,
            fico_range_low: f64::from(self.fico_range_low),
            annual_inc: self.annual_inc,
            dti: self.dti,
            emp_length: self.emp_length.label().to_string(),
            purpose: self.purpose.label().to_string(),
            open_acc: f64::from(self.open_acc),
            total_acc: f64::from(self.total_acc),
            revol_util: self.revol_util,
            inq_last_6mths: f64::from(self.inq_last_6mths),
        }
    }
}

fn render(result: &ScoringResponse) {
    println!("Risk assessment complete");
    println!();
    println!(
        "  Default probability   {:.1}%",
        result.default_probability * 100.0
    );
    println!("  Risk score            {}", result.risk_score);
    println!("  Risk level            {}", result.risk_level);
    println!();
    println!("Recommendation: {}", result.decision_recommendation);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".parse().unwrap()),
        )
        .init();

    let request = cli.to_request();
    let client = IntakeClient::new(&cli.endpoint)?;

    match client.submit(&request).await {
        Ok(result) => {
            render(&result);
            Ok(())
        }
        Err(e) => {
            eprintln!("Risk assessment failed: {}", e);
            std::process::exit(1);
        }
    }
}
