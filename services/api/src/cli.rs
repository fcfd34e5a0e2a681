use crate::infra::{load_classifier, resolve_model_path};
use crate::report::{
    render_batch_line, render_prediction, render_unreadable_row, BatchSummary,
};
use crate::server;
use churn_guard::error::AppError;
use churn_guard::prediction::{
    ChurnClassifier, ChurnPredictionService, CustomerProfile, ImportedRow, ProfileImporter,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Telco Churn Predictor",
    about = "Predict subscriber churn and explain the risk behind it",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Predict churn for a single customer profile
    Predict(PredictArgs),
    /// Score every row of a Telco-style CSV export
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured model descriptor path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Months the customer has been subscribed
    #[arg(long, default_value_t = 12, allow_negative_numbers = true)]
    pub(crate) tenure: i64,
    /// Current monthly charge
    #[arg(long, default_value_t = 70.0, allow_negative_numbers = true)]
    pub(crate) monthly_charges: f64,
    /// Total amount billed so far
    #[arg(long, default_value_t = 800.0, allow_negative_numbers = true)]
    pub(crate) total_charges: f64,
    /// Paperless billing: Yes or No
    #[arg(long, default_value = "Yes")]
    pub(crate) paperless: String,
    /// Contract: Month-to-month, One year or Two year
    #[arg(long, default_value = "Month-to-month")]
    pub(crate) contract: String,
    /// Internet service: DSL, Fiber optic or No
    #[arg(long, default_value = "DSL")]
    pub(crate) internet: String,
    /// Model descriptor to load instead of the configured one
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Print the prediction as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl PredictArgs {
    fn profile(&self) -> CustomerProfile {
        CustomerProfile {
            tenure_months: self.tenure,
            monthly_charges: self.monthly_charges,
            total_charges: self.total_charges,
            paperless_billing: self.paperless.clone(),
            contract_type: self.contract.clone(),
            internet_service: self.internet.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with tenure, MonthlyCharges, TotalCharges, PaperlessBilling, Contract
    /// and InternetService columns
    pub(crate) csv: PathBuf,
    /// Model descriptor to load instead of the configured one
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Batch(args) => run_batch(args),
    }
}

fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let model_path = resolve_model_path(args.model.clone())?;
    let service = ChurnPredictionService::new(load_classifier(&model_path)?);
    let profile = args.profile();

    let prediction = service.evaluate(&profile)?;

    if args.json {
        let payload = serde_json::to_string_pretty(&prediction)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{payload}");
    } else {
        print!(
            "{}",
            render_prediction(&profile, &prediction, &service.model_info())
        );
    }

    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let model_path = resolve_model_path(args.model)?;
    let service = ChurnPredictionService::new(load_classifier(&model_path)?);
    let rows = ProfileImporter::from_path(&args.csv)?;

    let (lines, summary) = score_rows(&service, &rows);
    for line in lines {
        println!("{line}");
    }
    println!("\n{summary}");
    Ok(())
}

fn score_rows<C>(
    service: &ChurnPredictionService<C>,
    rows: &[ImportedRow],
) -> (Vec<String>, BatchSummary)
where
    C: ChurnClassifier + ?Sized,
{
    let mut summary = BatchSummary::default();
    let lines = rows
        .iter()
        .map(|row| match row {
            Ok(imported) => {
                let outcome = service.evaluate(&imported.profile);
                match &outcome {
                    Ok(prediction) => summary.record(prediction.label),
                    Err(_) => summary.rejected += 1,
                }
                render_batch_line(imported, &outcome)
            }
            Err(err) => {
                summary.rejected += 1;
                render_unreadable_row(err)
            }
        })
        .collect();

    (lines, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn predict_defaults_match_profile_defaults() {
        let cli = Cli::try_parse_from(["churn", "predict"]).expect("parses");
        match cli.command {
            Some(Command::Predict(args)) => assert_eq!(args.profile(), CustomerProfile::default()),
            other => panic!("expected predict command, got {other:?}"),
        }
    }

    #[test]
    fn predict_accepts_negative_tenure_for_validation_downstream() {
        let cli = Cli::try_parse_from([
            "churn",
            "predict",
            "--tenure",
            "-1",
            "--contract",
            "Two year",
            "--json",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Predict(args)) => {
                assert_eq!(args.tenure, -1);
                assert_eq!(args.contract, "Two year");
                assert!(args.json);
            }
            other => panic!("expected predict command, got {other:?}"),
        }
    }

    #[test]
    fn batch_keeps_scoring_after_an_unreadable_row() {
        let model = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/churn_model.json");
        let service = ChurnPredictionService::new(load_classifier(&model).expect("model loads"));
        let csv = "customerID,tenure,MonthlyCharges,TotalCharges,PaperlessBilling,Contract,InternetService\n\
0001-AAAAA,1,95.0,95.0,Yes,Month-to-month,Fiber optic\n\
0002-BBBBB,1.5,30.0,45.0,No,One year,No\n\
0003-CCCCC,36,50.0,1800.0,No,Quarterly,DSL\n\
0004-DDDDD,60,25.0,1500.0,No,Two year,No\n";
        let rows = ProfileImporter::from_reader(csv.as_bytes()).expect("header is valid");

        let (lines, summary) = score_rows(&service, &rows);

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("0001-AAAAA: Churn"));
        assert!(lines[1].starts_with("0002-BBBBB: unreadable row"));
        assert!(lines[1].ends_with("skipped"));
        assert!(lines[2].starts_with("0003-CCCCC: skipped"));
        assert!(lines[3].starts_with("0004-DDDDD: Stay"));
        assert_eq!(
            summary,
            BatchSummary {
                scored: 2,
                churn: 1,
                rejected: 2
            }
        );
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["churn"]).expect("parses");
        assert!(cli.command.is_none());
    }
}
