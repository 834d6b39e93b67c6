use crate::cli::actions::Action;
use anyhow::Result;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        accounts: matches
            .get_many::<String>("account")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn handler_builds_server_action() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "turnstile",
            "--port",
            "9090",
            "--account",
            "alice:opensesame",
        ]);

        let Action::Server { port, accounts } = handler(&matches)?;
        assert_eq!(port, 9090);
        assert_eq!(accounts, vec!["alice:opensesame".to_string()]);

        Ok(())
    }

    #[test]
    fn handler_defaults_to_no_accounts() -> Result<()> {
        let matches = commands::new().get_matches_from(vec!["turnstile"]);

        let Action::Server { port, accounts } = handler(&matches)?;
        assert_eq!(port, 8080);
        assert!(accounts.is_empty());

        Ok(())
    }
}
