use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use conecta4::{HeuristicConfig, Opponent, Strategy};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// A computer player taking part in a tournament.
///
/// Loaded from JSON like `{"nick": "cautious", "strategy": "heuristic",
/// "heuristic": {"offense_tie_probability": 0.1}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    pub strategy: Opponent,
    #[serde(default)]
    pub heuristic: HeuristicConfig,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open player config '{}'", path.display()))?;
        let config: PlayerConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid player config '{}'", path.display()))?;
        if config.strategy == Opponent::Human {
            anyhow::bail!(
                "Player '{}' has no strategy, humans can't take part in a tournament",
                config.nick
            );
        }
        Ok(config)
    }

    /// Accepts either a path to a config file or the name of a strategy,
    /// which then also serves as the nick.
    pub fn resolve(arg: &str) -> anyhow::Result<Self> {
        let path = Path::new(arg);
        if path.is_file() {
            return Self::load(path);
        }
        match arg.parse::<Opponent>() {
            Ok(Opponent::Human) | Err(_) => {
                anyhow::bail!("'{}' is neither a player config file nor a strategy name", arg)
            }
            Ok(strategy) => Ok(Self {
                nick: String::from(arg),
                strategy,
                heuristic: HeuristicConfig::default(),
            }),
        }
    }

    pub fn build_strategy(&self, seed: u64) -> anyhow::Result<Box<dyn Strategy>> {
        self.strategy
            .build_with(StdRng::seed_from_u64(seed), self.heuristic)
            .with_context(|| format!("Player '{}' has no strategy", self.nick))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"nick": "bold", "strategy": "heuristic", "heuristic": {{"offense_tie_probability": 0.9}}}}"#
        )
        .unwrap();
        let config = PlayerConfig::load(file.path()).unwrap();
        assert_eq!(config.nick, "bold");
        assert_eq!(config.strategy, Opponent::Heuristic);
        assert_eq!(config.heuristic.offense_tie_probability, 0.9);
    }

    #[test]
    fn heuristic_tuning_is_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"nick": "r", "strategy": "reactive"}}"#).unwrap();
        let config = PlayerConfig::resolve(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.heuristic, HeuristicConfig::default());
    }

    #[test]
    fn humans_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"nick": "me", "strategy": "human"}}"#).unwrap();
        assert!(PlayerConfig::load(file.path()).is_err());
        assert!(PlayerConfig::resolve("human").is_err());
    }

    #[test]
    fn resolve_strategy_name() {
        let config = PlayerConfig::resolve("reactive").unwrap();
        assert_eq!(config.nick, "reactive");
        assert_eq!(config.strategy, Opponent::Reactive);
        assert_eq!(config.build_strategy(7).unwrap().name(), "reactive");
        assert!(PlayerConfig::resolve("no/such/file.json").is_err());
    }
}
