use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use frontdesk_core::provisioner::PURCHASE_TOKEN;
use frontdesk_core::{
    match_price, BusinessConfig, DeployError, NumberOrder, NumberSearchCriteria,
    PurchaseConfirmation,
};

use super::{block_on, build_runtime, CommandResult, RuntimeError};

pub struct DeployArgs {
    pub business: PathBuf,
    pub country: String,
    pub number_type: String,
    pub area_code: Option<String>,
    pub contains: Option<String>,
    pub limit: u32,
    pub confirm_price: Option<String>,
    pub confirm_token: Option<String>,
}

pub fn run(args: DeployArgs) -> CommandResult {
    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(RuntimeError::Config(message)) => {
            return CommandResult::failure("deploy", "config_validation", message, 2)
        }
        Err(RuntimeError::Client(error)) => {
            return CommandResult::failure("deploy", "provider", error.to_string(), 1)
        }
    };

    let business = match load_business_config(&args.business) {
        Ok(business) => business,
        Err(message) => return CommandResult::failure("deploy", "business_config", message, 2),
    };

    let criteria = NumberSearchCriteria {
        country: args.country.clone(),
        number_type: args.number_type.clone(),
        area_code: args.area_code.clone(),
        contains: args.contains.clone(),
        limit: args.limit,
    };

    let outcome = block_on(async {
        // Read-only preview so the operator sees what the purchase will cost
        // before the guarded pipeline asks for confirmation.
        let provisioner = runtime.deployer.provisioner();
        let candidates = provisioner.search(&criteria).await?;
        let quotes = provisioner.get_pricing(&criteria.country).await?;
        Ok::<_, frontdesk_core::ProviderError>((candidates, quotes))
    });
    let (candidates, quotes) = match outcome {
        Ok(Ok(preview)) => preview,
        Ok(Err(error)) => {
            let class = if error.is_unavailable() { "provider_unavailable" } else { "provider" };
            return CommandResult::failure("deploy", class, error.to_string(), 1);
        }
        Err(message) => return CommandResult::failure("deploy", "runtime", message, 1),
    };

    if candidates.is_empty() {
        return CommandResult::failure(
            "deploy",
            "no_numbers",
            format!("no numbers available for {}/{}", criteria.country, criteria.number_type),
            1,
        );
    }
    let quote = match match_price(&quotes, &criteria.number_type) {
        Ok(quote) => quote,
        Err(mismatch) => {
            return CommandResult::failure("deploy", "pricing_mismatch", mismatch.to_string(), 4)
        }
    };

    println!("Matched number: {} ({})", candidates[0].friendly_name, candidates[0].phone_number);
    println!(
        "Price: {} {} per month ({} type `{}`)",
        quote.current_price, quote.price_unit, criteria.country, quote.number_type
    );

    let confirmation = match gather_confirmation(&args, &quote.current_price) {
        Ok(confirmation) => confirmation,
        Err(message) => return CommandResult::failure("deploy", "io", message, 1),
    };

    let deployed = block_on(runtime.deployer.deploy_business_assistant(
        business,
        NumberOrder { criteria, confirmation },
    ));

    match deployed {
        Ok(Ok(result)) => {
            let summary = serde_json::to_string_pretty(&result)
                .unwrap_or_else(|error| format!("deployment succeeded, summary lost: {error}"));
            CommandResult::success("deploy", summary)
        }
        Ok(Err(error)) => failure_from_deploy_error(error),
        Err(message) => CommandResult::failure("deploy", "runtime", message, 1),
    }
}

fn failure_from_deploy_error(error: DeployError) -> CommandResult {
    let orphan_note = error
        .orphaned_assistant()
        .map(|id| format!(" (assistant {id} was created and is unlinked)"))
        .unwrap_or_default();
    let message = format!("{error}{orphan_note}");

    match &error {
        DeployError::Config(_) => CommandResult::failure("deploy", "business_config", message, 2),
        DeployError::Pricing { .. } => {
            CommandResult::failure("deploy", "pricing_mismatch", message, 4)
        }
        DeployError::PurchaseNotConfirmed { .. } => {
            CommandResult::failure("deploy", "purchase_declined", message, 3)
        }
        DeployError::NoNumbersAvailable { .. } => {
            CommandResult::failure("deploy", "no_numbers", message, 1)
        }
        DeployError::Aborted { .. } => CommandResult::failure("deploy", "aborted", message, 1),
    }
}

fn load_business_config(path: &PathBuf) -> Result<BusinessConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("could not read `{}`: {error}", path.display()))?;
    toml::from_str(&raw).map_err(|error| format!("could not parse `{}`: {error}", path.display()))
}

/// Uses the flags when both are present, otherwise prompts. The typed values
/// are passed through verbatim — only the line terminator is stripped — so
/// the guard in the provisioner sees exactly what the operator entered.
fn gather_confirmation(
    args: &DeployArgs,
    current_price: &str,
) -> Result<PurchaseConfirmation, String> {
    if let (Some(price), Some(token)) = (&args.confirm_price, &args.confirm_token) {
        return Ok(PurchaseConfirmation { price: price.clone(), token: token.clone() });
    }

    println!("This purchase will charge your carrier account.");
    let price = prompt(&format!("Re-type the monthly price exactly ({current_price}): "))?;
    let token = prompt(&format!("Type {PURCHASE_TOKEN} to authorize the charge: "))?;
    Ok(PurchaseConfirmation { price, token })
}

fn prompt(question: &str) -> Result<String, String> {
    print!("{question}");
    io::stdout().flush().map_err(|error| error.to_string())?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).map_err(|error| error.to_string())?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}
