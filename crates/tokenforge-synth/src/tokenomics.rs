//! Tokenomics summary derived from extracted parameters.

use tokenforge_core::units::describe_seconds;
use tokenforge_core::{ParameterRecord, TokenomicsSummary};

const NOT_APPLICABLE: &str = "N/A";

/// Render basis points as a percentage with two decimals (`850` → `"8.50%"`).
pub(crate) fn format_basis_points(bps: u64) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}

/// Summarise the token economics a prompt describes.
///
/// Identity comes from the token metadata for fungible tokens, from the reward
/// token for staking programs, and from the program name otherwise. Rules list
/// one line per active parameter.
pub fn tokenomics_summary(params: &ParameterRecord) -> TokenomicsSummary {
    let (name, symbol, supply) = if params.is_fungible_token {
        (
            params.token_display_name.clone(),
            params.token_symbol.clone(),
            params.supply.clone(),
        )
    } else if params.is_staking {
        (
            format!("{} rewards", params.program_name),
            params.reward_token_symbol.clone(),
            NOT_APPLICABLE.to_string(),
        )
    } else {
        (
            params.program_name.clone(),
            NOT_APPLICABLE.to_string(),
            NOT_APPLICABLE.to_string(),
        )
    };

    let mut rules = Vec::new();

    if params.is_staking {
        if params.apr_basis_points > 0 {
            rules.push(format!(
                "Stakers earn {} APR, paid in {}",
                format_basis_points(params.apr_basis_points),
                params.reward_token_symbol
            ));
        } else {
            rules.push(format!(
                "Staking rewards are paid in {} (rate not specified)",
                params.reward_token_symbol
            ));
        }
        if params.lockup_duration_seconds > 0 {
            rules.push(format!(
                "Staked tokens are locked for {}",
                describe_seconds(params.lockup_duration_seconds)
            ));
        }
    }

    if params.early_withdrawal_penalty_basis_points > 0 {
        rules.push(format!(
            "Early withdrawals forfeit {}",
            format_basis_points(params.early_withdrawal_penalty_basis_points)
        ));
    } else if params.has_early_withdrawal_penalty {
        rules.push("Early withdrawals incur a penalty (rate not specified)".to_string());
    }

    if params.reward_vesting_duration_seconds > 0 {
        rules.push(format!(
            "Rewards vest over {}",
            describe_seconds(params.reward_vesting_duration_seconds)
        ));
    } else if params.has_reward_vesting {
        rules.push("Rewards vest over time (duration not specified)".to_string());
    }

    if params.is_fungible_token {
        rules.push(format!(
            "Fixed supply of {} {}",
            params.supply, params.token_symbol
        ));
    }

    if params.is_vesting {
        rules.push(format!("Vesting cliff: {}", params.vesting_cliff));
    }

    if rules.is_empty() {
        rules.push("No tokenomics rules were detected in the prompt".to_string());
    }

    TokenomicsSummary {
        name,
        symbol,
        supply,
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenforge_core::extract;

    #[test]
    fn basis_point_formatting() {
        assert_eq!(format_basis_points(0), "0.00%");
        assert_eq!(format_basis_points(5), "0.05%");
        assert_eq!(format_basis_points(850), "8.50%");
        assert_eq!(format_basis_points(10_000), "100.00%");
    }

    #[test]
    fn fungible_identity() {
        let t = tokenomics_summary(&extract(
            "Create a token named Sunny with symbol SUN and a supply of 5 million",
        ));
        assert_eq!(t.name, "Sunny");
        assert_eq!(t.symbol, "SUN");
        assert_eq!(t.supply, "5000000");
        assert_eq!(t.rules, vec!["Fixed supply of 5000000 SUN"]);
    }

    #[test]
    fn staking_identity_and_rules() {
        let t = tokenomics_summary(&extract(
            "staking program named pool, 12% APR, 2 week lockup, rewards paid in GEM",
        ));
        assert_eq!(t.name, "pool rewards");
        assert_eq!(t.symbol, "GEM");
        assert_eq!(t.supply, "N/A");
        assert_eq!(
            t.rules,
            vec![
                "Stakers earn 12.00% APR, paid in GEM",
                "Staked tokens are locked for 2 weeks",
            ]
        );
    }

    #[test]
    fn unspecified_features_are_called_out() {
        let t = tokenomics_summary(&extract(
            "staking with early withdrawal penalty and vested rewards",
        ));
        assert!(t.rules.contains(&"Staking rewards are paid in RWRD (rate not specified)".to_string()));
        assert!(t.rules.contains(&"Early withdrawals incur a penalty (rate not specified)".to_string()));
        assert!(t.rules.contains(&"Rewards vest over time (duration not specified)".to_string()));
    }

    #[test]
    fn nothing_detected() {
        let t = tokenomics_summary(&extract("hello"));
        assert_eq!(t.name, "my_program");
        assert_eq!(t.rules, vec!["No tokenomics rules were detected in the prompt"]);
    }
}
