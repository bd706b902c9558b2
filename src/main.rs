use log::{debug, error};
use std::env;
use std::process::ExitCode;

use mealplan_grocery::{
    load_meal_plan, GroceryConfig, GroceryError, InstacartClient, ShoppingList,
};

const USAGE: &str =
    "Usage: mealplan-grocery <meal-plan.json> [--partner] [--title <title>] [--search <term>]";

#[derive(Debug, Default)]
struct Args {
    path: String,
    partner: bool,
    title: Option<String>,
    search: Option<String>,
}

fn parse_args(raw: &[String]) -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--partner" => args.partner = true,
            "--title" => {
                args.title = Some(iter.next().ok_or("--title needs a value")?.clone());
            }
            "--search" => {
                args.search = Some(iter.next().ok_or("--search needs a value")?.clone());
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option {}", flag)),
            path if args.path.is_empty() => args.path = path.to_string(),
            extra => return Err(format!("Unexpected argument {}", extra)),
        }
    }

    if args.path.is_empty() {
        return Err("Please provide a meal plan file as an argument".to_string());
    }
    Ok(args)
}

async fn run(args: Args) -> Result<(), GroceryError> {
    let config = GroceryConfig::load()?;
    debug!("Default list title: {}", config.export.default_title);

    let plan = load_meal_plan(&args.path).await?;
    let mut builder = ShoppingList::builder()
        .title(args.title.unwrap_or(config.export.default_title.clone()))
        .meal_plan(&plan);
    if let Some(term) = args.search {
        builder = builder.search(term);
    }

    if args.partner {
        let partner = InstacartClient::new(&config.partner)?;
        let link = builder.send_to(&partner).await?;
        println!("{}", link.url);
    } else {
        println!("{}", builder.to_plain_text());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}\n{}", message, USAGE);
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let GroceryError::Partner(partner_error) = &e {
                if let Some(body) = partner_error.raw_body() {
                    debug!("Partner response body: {}", body);
                }
            }
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
