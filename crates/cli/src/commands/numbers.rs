use frontdesk_core::NumberSearchCriteria;

use super::{block_on, build_runtime, CommandResult, RuntimeError};

pub fn search(
    country: String,
    number_type: String,
    area_code: Option<String>,
    contains: Option<String>,
    limit: u32,
) -> CommandResult {
    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(RuntimeError::Config(message)) => {
            return CommandResult::failure("numbers.search", "config_validation", message, 2)
        }
        Err(RuntimeError::Client(error)) => {
            return CommandResult::failure("numbers.search", "provider", error.to_string(), 1)
        }
    };

    let criteria = NumberSearchCriteria { country, number_type, area_code, contains, limit };
    let outcome = block_on(runtime.deployer.provisioner().search(&criteria));

    match outcome {
        Ok(Ok(candidates)) => {
            if candidates.is_empty() {
                return CommandResult::success(
                    "numbers.search",
                    "no numbers matched the given criteria",
                );
            }
            let lines = candidates
                .iter()
                .map(|candidate| {
                    let place = match (&candidate.locality, &candidate.region) {
                        (Some(locality), Some(region)) => format!(" — {locality}, {region}"),
                        (Some(locality), None) => format!(" — {locality}"),
                        (None, Some(region)) => format!(" — {region}"),
                        (None, None) => String::new(),
                    };
                    format!("{} ({}){place}", candidate.friendly_name, candidate.phone_number)
                })
                .collect::<Vec<_>>()
                .join("\n");
            CommandResult::success("numbers.search", lines)
        }
        Ok(Err(error)) => {
            let class = if error.is_unavailable() { "provider_unavailable" } else { "provider" };
            CommandResult::failure("numbers.search", class, error.to_string(), 1)
        }
        Err(message) => CommandResult::failure("numbers.search", "runtime", message, 1),
    }
}

pub fn pricing(country: String) -> CommandResult {
    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(RuntimeError::Config(message)) => {
            return CommandResult::failure("numbers.pricing", "config_validation", message, 2)
        }
        Err(RuntimeError::Client(error)) => {
            return CommandResult::failure("numbers.pricing", "provider", error.to_string(), 1)
        }
    };

    let outcome = block_on(runtime.deployer.provisioner().get_pricing(&country));

    match outcome {
        Ok(Ok(quotes)) => {
            if quotes.is_empty() {
                return CommandResult::success(
                    "numbers.pricing",
                    format!("carrier returned no pricing for {country}"),
                );
            }
            let lines = quotes
                .iter()
                .map(|quote| {
                    format!(
                        "{}: {} {} per month (base {})",
                        quote.number_type, quote.current_price, quote.price_unit, quote.base_price
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            CommandResult::success("numbers.pricing", lines)
        }
        Ok(Err(error)) => {
            let class = if error.is_unavailable() { "provider_unavailable" } else { "provider" };
            CommandResult::failure("numbers.pricing", class, error.to_string(), 1)
        }
        Err(message) => CommandResult::failure("numbers.pricing", "runtime", message, 1),
    }
}
